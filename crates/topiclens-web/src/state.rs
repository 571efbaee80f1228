//! Application state.

use std::sync::{Arc, OnceLock};

use topiclens_core::generate::LiveTimeouts;
use topiclens_core::model::{GeminiClient, GenerativeModel};
use topiclens_core::Config;
use tracing::debug;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    model: Arc<OnceLock<Arc<dyn GenerativeModel>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            model: Arc::new(OnceLock::new()),
        }
    }

    /// State with a pre-built model, bypassing lazy construction.
    pub fn with_model(config: Config, model: Arc<dyn GenerativeModel>) -> Self {
        let state = Self::new(config);
        let _ = state.model.set(model);
        state
    }

    /// The model client, built on first use.
    ///
    /// Returns `None` when no API key is configured.
    pub fn model(&self) -> Option<Arc<dyn GenerativeModel>> {
        let api_key = self.config.api_key()?;
        let model = self.model.get_or_init(|| {
            debug!(model = %self.config.model.name, "Initializing model client");
            Arc::new(GeminiClient::with_base_url(
                api_key,
                &self.config.model.name,
                &self.config.model.api_base,
            ))
        });
        Some(Arc::clone(model))
    }

    pub fn timeouts(&self) -> LiveTimeouts {
        LiveTimeouts {
            answer: self.config.answer_timeout(),
            topic: self.config.topic_timeout(),
        }
    }
}
