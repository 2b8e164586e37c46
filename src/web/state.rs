//! Application state shared across handlers

use crate::config::Settings;
use crate::llm::LlmNormalizer;
use crate::network::HttpClient;
use crate::places::PlacesClient;
use crate::query::{NaiveNormalizer, Normalizer};
use crate::web::RateLimits;
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Query normalizer, completion-backed when configured
    pub normalizer: Arc<dyn Normalizer>,
    /// Places search client
    pub places: Arc<PlacesClient>,
    /// Per-client request limiters
    pub limits: Arc<RateLimits>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: HttpClient) -> Self {
        let normalizer: Arc<dyn Normalizer> = match settings.llm.clone() {
            Some(llm) => Arc::new(LlmNormalizer::new(client.clone(), llm)),
            None => {
                info!("Completion service not configured, using naive query parsing");
                Arc::new(NaiveNormalizer)
            }
        };

        Self {
            settings: Arc::new(settings),
            normalizer,
            places: Arc::new(PlacesClient::new(client)),
            limits: Arc::new(RateLimits::new()),
        }
    }
}
