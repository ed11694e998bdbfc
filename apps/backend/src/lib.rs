#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod services;
pub mod sse;
pub mod storage;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{AppConfig, ConfigError};
pub use errors::domain::DomainError;
pub use storage::{MemStorage, Storage};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
