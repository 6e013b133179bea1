//! CLI error types.

use thiserror::Error;

use convex_bonds::BondError;
use convex_core::ConvexError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither or both of `ytm` and `clean_price` were supplied.
    #[error("Ambiguous input: {reason}")]
    AmbiguousInput {
        /// Description of the conflict.
        reason: String,
    },

    /// An enum field holds a name outside the accepted set.
    #[error("Unsupported {field}: '{value}'")]
    UnsupportedEnumValue {
        /// The request field.
        field: String,
        /// The value supplied.
        value: String,
    },

    /// The request document is malformed or misses a required field.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("Configuration error: {path}: {reason}")]
    Config {
        /// Configuration file path.
        path: String,
        /// Description of the failure.
        reason: String,
    },

    /// Valuation error.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// Date error.
    #[error(transparent)]
    Core(#[from] ConvexError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CliError {
    /// Creates an ambiguous input error.
    #[must_use]
    pub fn ambiguous_input(reason: impl Into<String>) -> Self {
        Self::AmbiguousInput {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported enum value error.
    #[must_use]
    pub fn unsupported_enum_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnsupportedEnumValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AmbiguousInput { .. } => "AmbiguousInput",
            Self::UnsupportedEnumValue { .. } => "UnsupportedEnumValue",
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::Config { .. } => "ConfigError",
            Self::Bond(err) => err.kind(),
            Self::Core(err) => BondError::from(err.clone()).kind(),
            Self::Io(_) => "IoError",
            Self::Serialization(_) => "SerializationError",
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Serialization(err.to_string())
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
