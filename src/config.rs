use serde::{Deserialize, Serialize};
use tracing::warn;

/// Runtime configuration.
///
/// The app historically accepted a network base URL from its environment
/// and never used it — no network calls are ever made. The value is
/// accepted and kept rather than rejected, so observable behavior matches
/// the original; its presence is logged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Accepted and unused; retained for compatibility.
    pub api_base_url: Option<String>,
}

impl Config {
    /// Read configuration from the environment (`JOTPAD_API_URL`).
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("JOTPAD_API_URL").ok();
        if api_base_url.is_some() {
            warn!("JOTPAD_API_URL is set but jotpad makes no network calls; the value is unused");
        }
        Self { api_base_url }
    }
}
