//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

snowflake!(
    /// A Discord guild (server) ID.
    GuildId
);
snowflake!(
    /// A Discord user ID.
    UserId
);
snowflake!(
    /// A Discord role ID.
    RoleId
);
snowflake!(
    /// A Discord channel ID.
    ChannelId
);

impl RoleId {
    /// Renders the role as a Discord mention.
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

impl UserId {
    /// Renders the user as a Discord mention.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, GuildRankError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum GuildRankError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Discord API error.
    #[error("Discord API error: {0}")]
    Discord(String),

    /// Profile storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Localization error.
    #[error("Localization error: {0}")]
    Localization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
