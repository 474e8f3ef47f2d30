//! # guildrank config
//!
//! Type-safe configuration management with hot-reloading for guildrank.
//!
//! This crate provides configuration loading, validation, and caching
//! with support for hot-reloading and atomic updates. Validation builds the
//! [`ProgressionRules`](guildrank_progression::ProgressionRules) so a bad
//! tier table is rejected when the file is loaded, not when a member
//! first hits it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;
pub mod watcher;

pub use cache::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
pub use watcher::*;
