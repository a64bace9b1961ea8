mod app;
mod config;
mod document;
mod probe;
mod scan;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use document::{AssertionError, DocumentError};
pub use probe::{ProbeError, ProbeErrorKind};
pub use scan::ScanError;
pub use validation::ValidationError;
