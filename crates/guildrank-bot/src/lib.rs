//! # guildrank bot
//!
//! Discord community bot with XP leveling, cookie ranks and job progression.
//!
//! This is the main binary crate that orchestrates the application lifecycle:
//! configuration, logging, the Poise framework, profile autosave and graceful
//! shutdown.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod logging;

pub use bot::*;
pub use error::*;
pub use logging::*;
