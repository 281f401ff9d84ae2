pub mod adapters;
pub mod core;
pub mod runtime;

/// Installs the `env_logger` backend for the `log` facade. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
