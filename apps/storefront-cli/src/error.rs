//! Error types for the storefront CLI.

use std::path::PathBuf;

use shopverse_core::{CoreError, ValidationError};
use shopverse_locator::LocatorError;

use crate::config::ConfigError;

/// Storefront CLI errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Locator(#[from] LocatorError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read cart {}: {source}", path.display())]
    CartFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed cart document: {0}")]
    CartParse(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
