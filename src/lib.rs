//! JFlix Player Library
//!
//! Resolves embed URLs for third-party video providers, derives the frame
//! security attributes, and drives season/episode navigation for the player.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
