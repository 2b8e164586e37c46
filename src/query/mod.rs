//! Query normalization module
//!
//! Turns raw user text into a structured search descriptor. The descriptor
//! is produced either by the completion service (see [`crate::llm`]) or by
//! the deterministic naive fallback; every failure path degrades to the
//! fallback, so callers always receive a fully populated descriptor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Place type assumed when the query does not carry one
pub const DEFAULT_PLACE_TYPE: &str = "restaurant";

/// Structured search descriptor derived from raw user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDescriptor {
    /// Main search text, e.g. "tempat makan enak"
    pub query_text: String,
    /// City or area hint, possibly empty
    pub location_hint: String,
    /// Kind of place: restaurant, cafe, tourist_attraction, hotel, ...
    pub place_type: String,
}

impl SearchDescriptor {
    /// Deterministic fallback: treat the whole query as a restaurant search
    pub fn naive(raw_query: &str) -> Self {
        Self {
            query_text: raw_query.to_string(),
            location_hint: String::new(),
            place_type: DEFAULT_PLACE_TYPE.to_string(),
        }
    }
}

/// Failure modes of descriptor parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in completion content")]
    NoJsonObject,
    #[error("invalid JSON in completion content: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Completion output fields before per-field fallback is applied
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    query_text: Option<String>,
    #[serde(default)]
    location_hint: Option<String>,
    #[serde(default)]
    place_type: Option<String>,
}

/// Extract the first JSON object substring from free-form completion text.
///
/// Takes everything from the first `{` to the last `}` inclusive; models
/// often wrap the object in prose or code fences despite instructions.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse completion content into a descriptor.
///
/// Fields fall back individually: an absent or empty `query_text` becomes
/// the raw query, `location_hint` the empty string, and `place_type` the
/// default place type.
pub fn parse_descriptor(content: &str, raw_query: &str) -> Result<SearchDescriptor, ParseError> {
    let json = extract_json(content).ok_or(ParseError::NoJsonObject)?;
    let raw: RawDescriptor = serde_json::from_str(json)?;

    let non_empty = |value: Option<String>| value.filter(|s| !s.is_empty());

    Ok(SearchDescriptor {
        query_text: non_empty(raw.query_text).unwrap_or_else(|| raw_query.to_string()),
        location_hint: raw.location_hint.unwrap_or_default(),
        place_type: non_empty(raw.place_type).unwrap_or_else(|| DEFAULT_PLACE_TYPE.to_string()),
    })
}

/// Compose the provider query string from a descriptor.
///
/// Joins place type, query text, and location hint in that order, skipping
/// empty segments.
pub fn build_search_query(descriptor: &SearchDescriptor) -> String {
    [
        descriptor.place_type.as_str(),
        descriptor.query_text.as_str(),
        descriptor.location_hint.as_str(),
    ]
    .iter()
    .copied()
    .filter(|segment| !segment.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .trim()
    .to_string()
}

/// Trait for query normalizers
#[async_trait]
pub trait Normalizer: Send + Sync {
    /// Produce a descriptor for the raw query. Never fails; implementations
    /// degrade to [`SearchDescriptor::naive`] instead of propagating errors.
    async fn normalize(&self, raw_query: &str) -> SearchDescriptor;
}

/// Normalizer used when the completion service is not configured
pub struct NaiveNormalizer;

#[async_trait]
impl Normalizer for NaiveNormalizer {
    async fn normalize(&self, raw_query: &str) -> SearchDescriptor {
        SearchDescriptor::naive(raw_query)
    }
}
