//! Error types for the runner binary.
//!
//! [`RunnerError`] wraps every failure mode during startup and play so that
//! `main` can propagate with `?`.

/// Top-level error for the runner binary.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: reign_core::config::ConfigError,
    },

    /// Catalog loading failed.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: reign_core::catalog::CatalogError,
    },

    /// The controller could not be created.
    #[error("controller error: {source}")]
    Controller {
        /// The underlying controller error.
        #[from]
        source: reign_core::ControllerError,
    },

    /// The final snapshot could not be serialized.
    #[error("snapshot serialization failed: {source}")]
    Snapshot {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// An environment variable holds an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}
