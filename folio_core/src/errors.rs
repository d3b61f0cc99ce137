//! # Error Types
//!
//! Structured error types for folio_core. Nothing in the page is allowed to
//! fail hard: every error here ends up either logged or shown to the visitor,
//! and the feature that raised it is skipped.
//!
//! ## Example
//!
//! ```rust
//! use folio_core::errors::{FolioError, FolioResult};
//!
//! fn check_delay(delay_ms: f64) -> FolioResult<()> {
//!     if delay_ms < 0.0 {
//!         return Err(FolioError::invalid_setting(
//!             "submit_delay_ms",
//!             delay_ms.to_string(),
//!             "Delay cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_delay(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for folio_core operations
pub type FolioResult<T> = Result<T, FolioError>;

/// Structured error type for page operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FolioError {
    /// A site setting is out of range
    #[error("Invalid setting '{field}': {value} - {reason}")]
    InvalidSetting {
        field: String,
        value: String,
        reason: String,
    },

    /// No case study is registered under this id
    #[error("Unknown project: {id}")]
    UnknownProject { id: String },

    /// Two case studies share one id
    #[error("Duplicate project id: {id}")]
    DuplicateProject { id: String },

    /// An element the host page was expected to provide is absent
    #[error("Missing page element: {selector}")]
    MissingElement { selector: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Host or internal failure (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FolioError {
    /// Create an InvalidSetting error
    pub fn invalid_setting(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FolioError::InvalidSetting {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownProject error
    pub fn unknown_project(id: impl Into<String>) -> Self {
        FolioError::UnknownProject { id: id.into() }
    }

    /// Create a DuplicateProject error
    pub fn duplicate_project(id: impl Into<String>) -> Self {
        FolioError::DuplicateProject { id: id.into() }
    }

    /// Create a MissingElement error
    pub fn missing_element(selector: impl Into<String>) -> Self {
        FolioError::MissingElement {
            selector: selector.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        FolioError::Internal {
            message: message.into(),
        }
    }

    /// Whether the page keeps working with only the affected feature skipped.
    ///
    /// Broken settings and catalogs fall back to the built-in defaults, and
    /// missing elements only disable their own feature.
    pub fn is_degradable(&self) -> bool {
        !matches!(self, FolioError::Internal { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FolioError::InvalidSetting { .. } => "INVALID_SETTING",
            FolioError::UnknownProject { .. } => "UNKNOWN_PROJECT",
            FolioError::DuplicateProject { .. } => "DUPLICATE_PROJECT",
            FolioError::MissingElement { .. } => "MISSING_ELEMENT",
            FolioError::Serialization { .. } => "SERIALIZATION_ERROR",
            FolioError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = FolioError::invalid_setting("reveal_threshold", "1.5", "Must be within 0..=1");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidSetting\""));
        let parsed: FolioError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, parsed);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(FolioError::unknown_project("x").error_code(), "UNKNOWN_PROJECT");
        assert_eq!(FolioError::missing_element("#navbar").error_code(), "MISSING_ELEMENT");
        assert_eq!(FolioError::internal("boom").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_only_internal_errors_are_not_degradable() {
        assert!(FolioError::missing_element("#hamburger").is_degradable());
        assert!(FolioError::duplicate_project("banca").is_degradable());
        assert!(!FolioError::internal("closure dropped").is_degradable());
    }

    #[test]
    fn test_from_serde_error() {
        let err: FolioError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_display_messages() {
        let err = FolioError::unknown_project("robotica");
        assert_eq!(err.to_string(), "Unknown project: robotica");
    }
}
