pub mod kv;
pub mod llm;

pub type DynError = Box<dyn std::error::Error + Send + Sync>;
