//! Settings structures for Placefinder-RS configuration

use tracing::warn;
use url::Url;

/// Model identifier assumed when `LLM_MODEL` is unset
pub const DEFAULT_MODEL: &str = "llama-3";

/// Main settings structure
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerSettings,
    pub places: PlacesSettings,
    pub llm: Option<LlmSettings>,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Build settings from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings::from_env(),
            places: PlacesSettings::from_env(),
            llm: LlmSettings::from_env(),
            outgoing: OutgoingSettings::from_env(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Directory holding the bundled front-end
    pub static_dir: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
            static_dir: "public".to_string(),
        }
    }
}

impl ServerSettings {
    fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(port) = env_var("PORT").and_then(|v| v.parse().ok()) {
            settings.port = port;
        }
        if let Some(addr) = env_var("BIND_ADDRESS") {
            settings.bind_address = addr;
        }
        if let Some(dir) = env_var("STATIC_DIR") {
            settings.static_dir = dir;
        }
        settings
    }
}

/// Search-provider settings
#[derive(Debug, Clone, Default)]
pub struct PlacesSettings {
    /// Google Maps API key; checked per request, not at startup
    pub api_key: Option<String>,
}

impl PlacesSettings {
    fn from_env() -> Self {
        Self {
            api_key: env_var("GOOGLE_MAPS_API_KEY"),
        }
    }
}

/// Completion-service settings; present only when fully configured
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Base endpoint, without a version path prefix
    pub base_url: String,
    /// Bearer credential
    pub api_key: String,
    /// Model identifier
    pub model: String,
}

impl LlmSettings {
    /// Read completion-service settings from the environment.
    ///
    /// A missing base URL or credential selects the naive-fallback
    /// normalizer instead of failing startup.
    fn from_env() -> Option<Self> {
        let base_url = env_var("LLM_API_BASE_URL")?;
        let api_key = env_var("LLM_API_KEY")?;

        if Url::parse(&base_url).is_err() {
            warn!("LLM_API_BASE_URL is not a valid URL, completion service disabled");
            return None;
        }

        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: env_var("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

/// Outbound request settings
#[derive(Debug, Clone)]
pub struct OutgoingSettings {
    /// Default timeout for outbound requests in seconds
    pub request_timeout: f64,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
        }
    }
}

impl OutgoingSettings {
    fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(timeout) = env_var("REQUEST_TIMEOUT").and_then(|v| v.parse().ok()) {
            settings.request_timeout = timeout;
        }
        settings
    }
}

/// Environment lookup treating empty values as unset
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
