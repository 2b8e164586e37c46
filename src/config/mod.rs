//! Configuration module for Placefinder-RS
//!
//! Settings are read from the environment once at startup and passed into
//! each component explicitly; nothing consults the environment at request
//! time.

mod settings;

pub use settings::*;
