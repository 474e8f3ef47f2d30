//! Error types for the progression engine.

/// Result type for progression operations.
pub type Result<T> = std::result::Result<T, ProgressionError>;

/// Errors raised by the progression engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    /// A caller passed a value outside the operation's domain.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument.
        message: String,
    },

    /// A curve or tier table cannot be used as configured.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// What was wrong with the configuration.
        message: String,
    },
}

impl ProgressionError {
    /// Create a new invalid argument error.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }

    /// Create a new invalid configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: msg.into(),
        }
    }

    /// Prefix the message with the scope it was raised in, e.g. a table name.
    #[must_use]
    pub fn within(self, scope: &str) -> Self {
        match self {
            Self::InvalidArgument { message } => Self::InvalidArgument {
                message: format!("{scope}: {message}"),
            },
            Self::InvalidConfiguration { message } => Self::InvalidConfiguration {
                message: format!("{scope}: {message}"),
            },
        }
    }
}
