//! Core playback logic.

pub mod effects;
pub mod frame;
pub mod guide;
pub mod history;
pub mod navigator;
pub mod registry;
pub mod resolver;
