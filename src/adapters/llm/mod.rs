pub mod providers;

use futures::future::BoxFuture;
use std::sync::Arc;

use crate::adapters::config::Settings;
use crate::core::ports::llm::{DynError, GenerationPort, GenerationRequest};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Structured-output generation against the Gemini `generateContent` endpoint.
pub struct GeminiGenerationAdapter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerationAdapter {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: providers::google::DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl GenerationPort for GeminiGenerationAdapter {
    fn generate_json<'a>(
        &'a self,
        request: GenerationRequest<'a>,
    ) -> BoxFuture<'a, Result<String, DynError>> {
        Box::pin(async move {
            providers::google::generate_json(
                &self.client,
                &self.base_url,
                &self.api_key,
                &self.model,
                request.prompt,
                request.response_schema,
            )
            .await
        })
    }
}

/// Builds the generation adapter from settings, or `None` when no API key is configured.
pub fn adapter_from_settings(settings: &Settings) -> Option<Arc<dyn GenerationPort>> {
    build_adapter(settings.google_api_key(), &settings.gemini_model())
}

fn build_adapter(api_key: Option<String>, model: &str) -> Option<Arc<dyn GenerationPort>> {
    let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
        log::warn!("No Google API key configured; AI suggestions are disabled");
        return None;
    };
    Some(Arc::new(GeminiGenerationAdapter::new(api_key, model)))
}
