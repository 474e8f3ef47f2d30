//! # guildrank progression
//!
//! The tiered progression engine behind guildrank: XP growth curve,
//! level-up and level-down resolution, threshold tier selection, exclusive
//! role diffs and job sub-tier ordinals.
//!
//! Everything except [`sync`] is pure and synchronous. Callers own
//! read-modify-write atomicity of the profiles they pass in.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cooldown;
pub mod curve;
pub mod error;
pub mod job;
pub mod profile;
pub mod roles;
pub mod rules;
pub mod sync;
pub mod tier;

pub use cooldown::*;
pub use curve::*;
pub use error::*;
pub use job::*;
pub use profile::*;
pub use roles::*;
pub use rules::*;
pub use sync::*;
pub use tier::*;
