//! Error types for the SatGate core.

/// Core error type for SatGate infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum SatgateError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for SatGate operations.
pub type SatgateResult<T> = Result<T, SatgateError>;
