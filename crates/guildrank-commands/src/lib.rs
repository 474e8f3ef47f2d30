//! # guildrank commands
//!
//! Discord command implementations using the Poise framework for guildrank.
//!
//! Every command follows the same shape: check the request, read-modify-write
//! the member's profile through [`ProfileStore::update`], reply, then bring
//! the member's tier roles in line with [`sync_member_tiers`]. The pure parts
//! (`claim_daily`, `perform_work`, ...) are exposed for testing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod about;
pub mod cookie;
pub mod cooldown;
pub mod daily;
pub mod error;
pub mod events;
pub mod framework;
pub mod rank;
pub mod reload;
pub mod roles;
pub mod store;
pub mod tiers;
pub mod uptime;
pub mod work;
pub mod xp;

pub use cooldown::*;
pub use error::*;
pub use framework::*;
pub use roles::*;
pub use store::*;
