//! External services.

pub mod tmdb;
