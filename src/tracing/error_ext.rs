//! Error tracing extensions
//!
//! Logs errors with their result code and source chain. Used where the
//! engine degrades instead of propagating (persistence failures).

use crate::types::PresetError;
use std::error::Error as StdError;

/// Extension trait for logging errors with context
pub trait ErrorTraceExt {
    /// Log error with result code, client/system classification and error chain
    fn trace_error(&self) -> &Self;
}

impl ErrorTraceExt for PresetError {
    fn trace_error(&self) -> &Self {
        let error_code = self.error_code();

        let mut error_chain = Vec::new();
        let mut current_source = self.source();
        while let Some(source) = current_source {
            error_chain.push(source.to_string());
            current_source = source.source();
        }

        if self.is_client_error() {
            tracing::debug!(
                error = %self,
                error_code = error_code.code(),
                "Operation rejected"
            );
        } else {
            tracing::error!(
                error = %self,
                error_code = error_code.code(),
                error_chain_len = error_chain.len(),
                error_chain = ?error_chain,
                "Error occurred with full context"
            );
        }

        self
    }
}

/// Extension trait for Result types
pub trait ResultTraceExt<T, E>: Sized {
    /// Convert error to PresetError and log with context
    fn trace_context(self) -> Result<T, PresetError>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultTraceExt<T, E> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
    PresetError: From<E>,
{
    fn trace_context(self) -> Result<T, PresetError> {
        self.map_err(|e| {
            let preset_error = PresetError::from(e);
            preset_error.trace_error();
            preset_error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_trace_ext() {
        let error = PresetError::internal("Test failure");
        error.trace_error();
    }

    #[test]
    fn test_result_trace_ext() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "Permission denied",
        ));

        let converted = result.trace_context();
        assert!(matches!(converted, Err(PresetError::Io(_))));
    }
}
