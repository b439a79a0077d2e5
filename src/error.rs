// src/error.rs

use std::io;

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Problems with the solver configuration. Solves themselves cannot fail.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid must have at least 3 nodes per side (window-width-steps = {n})")]
    GridTooSmall { n: usize },

    #[error("{name} must be positive and finite (got {value})")]
    NonPositiveStep { name: &'static str, value: f64 },

    #[error("field-solver-subtraction-trick must be finite and non-negative (got {0})")]
    InvalidTrick(f64),

    #[error("failed to read or write config: {0}")]
    Io(#[from] io::Error),

    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
