//! Test utilities and shared test helpers for guildrank.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for creating a mock timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::{GuildId, RoleId, UserId};

    /// Create a test guild ID.
    pub fn test_guild_id() -> GuildId {
        GuildId(111111111111111111)
    }

    /// Create a test user ID.
    pub fn test_user_id() -> UserId {
        UserId(987654321098765432)
    }

    /// Create multiple test user IDs.
    pub fn test_user_ids(count: usize) -> Vec<UserId> {
        (0..count)
            .map(|i| UserId(100000000000000000 + i as u64))
            .collect()
    }

    /// Create multiple distinct test role IDs.
    pub fn test_role_ids(count: usize) -> Vec<RoleId> {
        (0..count)
            .map(|i| RoleId(500000000000000000 + i as u64))
            .collect()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal valid configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
discord:
  token: "test_token"
"#
    }

    /// A full configuration with every ladder populated, as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "  prefix: \"?\"\n",
            "  level_up_channel_id: 123456789012345678\n",
            "\n",
            "leveling:\n",
            "  base: 100\n",
            "  exponent: 1.5\n",
            "  message_xp: 20\n",
            "  message_cooldown_seconds: 30\n",
            "\n",
            "economy:\n",
            "  daily_coins: 300\n",
            "  daily_xp: 75\n",
            "  daily_cooldown_hours: 24\n",
            "  work_cooldown_minutes: 45\n",
            "  cookie_cooldown_minutes: 30\n",
            "\n",
            "level_roles:\n",
            "  - { threshold: 5, name: \"Regular\", role_id: 500000000000000001 }\n",
            "  - { threshold: 10, name: \"Veteran\", role_id: 500000000000000002 }\n",
            "  - { threshold: 25, name: \"Legend\", role_id: 500000000000000003 }\n",
            "\n",
            "cookie_roles:\n",
            "  - { threshold: 100, name: \"Cookie Fan\", role_id: 500000000000000011 }\n",
            "  - { threshold: 500, name: \"Cookie Lover\", role_id: 500000000000000012 }\n",
            "  - { threshold: 1000, name: \"Cookie Monster\", role_id: 500000000000000013 }\n",
            "\n",
            "jobs:\n",
            "  - { title: \"Intern\", min_works: 0, max_works: 9, pay: 50, role_id: 500000000000000021 }\n",
            "  - { title: \"Junior\", min_works: 10, max_works: 19, pay: 80, role_id: 500000000000000022 }\n",
            "  - { title: \"Senior\", min_works: 20, pay: 120, role_id: 500000000000000023 }\n",
            "\n",
            "storage:\n",
            "  path: \"data/profiles.json\"\n",
            "  autosave_seconds: 120\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json_format: false\n"
        )
    }
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for a strictly increasing list of tier thresholds.
    pub fn threshold_strategy(max_len: usize) -> impl Strategy<Value = Vec<u64>> {
        proptest::collection::btree_set(0u64..100_000, 1..=max_len)
            .prop_map(|set| set.into_iter().collect())
    }

    /// Strategy for a level paired with an in-range accumulator value.
    pub fn level_strategy() -> impl Strategy<Value = u32> {
        0u32..500
    }
}
