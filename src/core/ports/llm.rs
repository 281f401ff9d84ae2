use futures::future::BoxFuture;
use serde_json::Value;

pub use super::DynError;

#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    /// Response schema the model output must conform to (Gemini OpenAPI subset).
    pub response_schema: &'a Value,
}

pub trait GenerationPort: Send + Sync {
    /// Returns the raw JSON text produced by the model.
    fn generate_json<'a>(
        &'a self,
        request: GenerationRequest<'a>,
    ) -> BoxFuture<'a, Result<String, DynError>>;
}
