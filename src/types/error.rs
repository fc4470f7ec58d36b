//! Error types for the preset engine

use thiserror::Error;

/// Result codes surfaced to callers
///
/// Each error maps onto one of these so a UI can choose a user-facing
/// message without matching on the full error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Target absent from both user presets and the default catalog
    NotFound,
    /// User declined a confirmation prompt
    Cancelled,
    /// Caller passed an empty or missing identifier
    NoSelection,
    /// Disk read/write failure
    IoFailure,
    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Stable string form of the code
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "not_found",
            ErrorCode::Cancelled => "cancelled",
            ErrorCode::NoSelection => "no_selection",
            ErrorCode::IoFailure => "io_failure",
            ErrorCode::Internal => "internal",
        }
    }
}

/// Main error type for preset and settings operations
#[derive(Debug, Error)]
pub enum PresetError {
    /// Preset not found in user presets or defaults
    #[error("Preset not found: {0}")]
    NotFound(String),

    /// Confirmation declined
    #[error("Operation cancelled")]
    Cancelled,

    /// Empty preset name
    #[error("No preset selected")]
    NoSelection,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for the preset engine
pub type Result<T> = std::result::Result<T, PresetError>;

impl PresetError {
    /// Get the result code for this error
    pub fn error_code(&self) -> ErrorCode {
        match self {
            PresetError::NotFound(_) => ErrorCode::NotFound,
            PresetError::Cancelled => ErrorCode::Cancelled,
            PresetError::NoSelection => ErrorCode::NoSelection,
            PresetError::Io(_) => ErrorCode::IoFailure,
            PresetError::Json(_) => ErrorCode::IoFailure,
            PresetError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Check if this error was caused by the caller or the user rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PresetError::NotFound(_) | PresetError::Cancelled | PresetError::NoSelection
        )
    }

    /// Create a not found error
    pub fn not_found(name: impl Into<String>) -> Self {
        PresetError::NotFound(name.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        PresetError::Internal(msg.into())
    }
}
