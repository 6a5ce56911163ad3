//! Shared utilities.

pub mod store;
pub mod text;
