pub mod config;
pub mod kv;
pub mod llm;
pub mod suggest;
