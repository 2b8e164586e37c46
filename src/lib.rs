//! Placefinder-RS: An LLM-assisted place search gateway written in Rust
//!
//! Accepts a free-text travel query, structures it through a best-effort
//! completion call, and forwards the derived search string to the Google
//! Places Text Search API, reshaping the results into a compact response
//! with map links.

pub mod config;
pub mod llm;
pub mod network;
pub mod places;
pub mod query;
pub mod results;
pub mod web;

pub use config::Settings;
pub use query::{Normalizer, SearchDescriptor};
pub use results::PlacesPayload;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timeout for completion requests in seconds
pub const COMPLETION_TIMEOUT: u64 = 5;

/// Maximum number of places returned per response
pub const MAX_PLACES: usize = 5;
