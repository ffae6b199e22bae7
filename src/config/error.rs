//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Rubric file not found: {}", .0.display())]
    RubricNotFound(PathBuf),

    #[error("Passive gate threshold must be within 0..=3, got {0}")]
    InvalidGateThreshold(f64),

    #[error("Verification gate threshold must be a whole score, got {0}")]
    FractionalGateThreshold(f64),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
