//! HTTP networking module
//!
//! Provides the outbound HTTP client shared by the completion and places
//! clients.

mod client;

pub use client::{HttpClient, HttpResponse};
