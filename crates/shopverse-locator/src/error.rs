//! # Locator Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / CoreError                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LocatorError (this module) ← Adds the catalog path or store id         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in the CLI) ← Printed to the user                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use shopverse_core::CoreError;
use thiserror::Error;

/// Store catalog errors.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The catalog file could not be read.
    ///
    /// ## When This Occurs
    /// - Path does not exist
    /// - File permissions issue
    #[error("Failed to read store catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not a `{"stores": [...]}` JSON document.
    ///
    /// Individual bad entries do not raise this; they are skipped.
    #[error("Malformed store catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// No store with the given id in the loaded catalog.
    #[error("Store not found: {id}")]
    StoreNotFound { id: String },

    /// A geo query rejected its input (bad origin or radius).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl LocatorError {
    /// Creates a StoreNotFound error.
    pub fn store_not_found(id: impl Into<String>) -> Self {
        LocatorError::StoreNotFound { id: id.into() }
    }
}

/// Result type for locator operations.
pub type LocatorResult<T> = Result<T, LocatorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shopverse_core::ValidationError;

    #[test]
    fn test_error_messages() {
        let err = LocatorError::Io {
            path: PathBuf::from("/tmp/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read store catalog /tmp/missing.json: no such file"
        );

        assert_eq!(
            LocatorError::store_not_found("s9").to_string(),
            "Store not found: s9"
        );
    }

    #[test]
    fn test_core_errors_pass_through() {
        let core = CoreError::InvalidInput(ValidationError::Negative {
            field: "radius_km".to_string(),
        });
        let err: LocatorError = core.clone().into();
        assert_eq!(err.to_string(), core.to_string());
    }
}
