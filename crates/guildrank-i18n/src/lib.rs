//! # guildrank i18n
//!
//! Message catalogue for guildrank replies, built on the Fluent
//! localization system.
//!
//! Resources are embedded at compile time and parsed once at startup, so a
//! broken catalogue stops the bot before it connects.
//!
//! ```rust
//! use guildrank_i18n::{fluent_args, Messages, DEFAULT_LOCALE};
//!
//! # fn example() -> Result<(), guildrank_i18n::I18nError> {
//! let messages = Messages::new(DEFAULT_LOCALE)?;
//! let text = messages.get("daily-claimed", fluent_args!["coins" => 250u64, "xp" => 50u64].as_ref());
//! assert!(text.contains("250"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod loader;
pub mod messages;

pub use error::*;
pub use loader::*;
pub use messages::*;

pub use fluent_bundle::{FluentArgs, FluentValue};

/// Builds `Option<FluentArgs>` from `key => value` pairs.
#[macro_export]
macro_rules! fluent_args {
    () => {
        None
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FluentArgs::new();
        $(
            args.set($key, $value);
        )+
        Some(args)
    }};
}
