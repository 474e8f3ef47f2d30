//! In-memory profile store with JSON snapshots.

use dashmap::DashMap;
use guildrank_common::{write_atomic, GuildId, GuildRankError, Result, UserId};
use guildrank_progression::{GrowthCurve, Profile};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// One persisted row.
#[derive(Debug, Serialize, Deserialize)]
struct StoredProfile {
    guild_id: GuildId,
    user_id: UserId,
    #[serde(flatten)]
    profile: Profile,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    profiles: Vec<StoredProfile>,
}

/// Profiles keyed by guild and member.
///
/// [`update`](Self::update) runs its closure while holding the entry lock, so
/// concurrent mutations of the same member are serialized and none is lost.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: DashMap<(GuildId, UserId), Profile>,
    dirty: AtomicBool,
}

impl ProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of a member's profile; unknown members get a fresh one.
    pub fn get(&self, guild: GuildId, user: UserId) -> Profile {
        self.profiles
            .get(&(guild, user))
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Read-modify-write of one profile, creating it on first use.
    ///
    /// The closure must not block: it runs under the shard lock.
    pub fn update<R>(&self, guild: GuildId, user: UserId, f: impl FnOnce(&mut Profile) -> R) -> R {
        let mut entry = self.profiles.entry((guild, user)).or_default();
        let result = f(entry.value_mut());
        drop(entry);
        self.dirty.store(true, Ordering::Release);
        result
    }

    /// Members of `guild` ordered by lifetime XP, highest first.
    pub fn leaderboard(&self, guild: GuildId, curve: &GrowthCurve, limit: usize) -> Vec<(UserId, Profile)> {
        let mut ranked: Vec<(u64, UserId, Profile)> = self
            .profiles
            .iter()
            .filter(|entry| entry.key().0 == guild)
            .map(|entry| (entry.value().total_xp(curve), entry.key().1, entry.value().clone()))
            .filter(|(total, _, _)| *total > 0)
            .collect();

        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(_, user, profile)| (user, profile))
            .collect()
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the store holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Whether anything changed since the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Loads a snapshot; a missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let store = Self::new();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No profile snapshot at {}, starting empty", path.display());
                return Ok(store);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_str(&contents)
            .map_err(|e| GuildRankError::Storage(format!("{}: {e}", path.display())))?;
        for row in snapshot.profiles {
            store.profiles.insert((row.guild_id, row.user_id), row.profile);
        }

        info!("Loaded {} profiles from {}", store.len(), path.display());
        Ok(store)
    }

    /// Writes a snapshot atomically and clears the dirty flag.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Cleared first so changes racing with the write are saved next time
        self.dirty.store(false, Ordering::Release);

        let mut profiles: Vec<StoredProfile> = self
            .profiles
            .iter()
            .map(|entry| StoredProfile {
                guild_id: entry.key().0,
                user_id: entry.key().1,
                profile: entry.value().clone(),
            })
            .collect();
        profiles.sort_by_key(|row| (row.guild_id, row.user_id));

        let json = serde_json::to_vec_pretty(&Snapshot { profiles })?;
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        if let Err(e) = write_atomic(path, &json) {
            self.dirty.store(true, Ordering::Release);
            return Err(e.into());
        }

        debug!("Saved {} profiles to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildrank_common::test_utils::{create_temp_dir, discord_fixtures};
    use std::sync::Arc;

    #[test]
    fn test_unknown_member_gets_default_profile() {
        let store = ProfileStore::new();
        let profile = store.get(discord_fixtures::test_guild_id(), discord_fixtures::test_user_id());
        assert_eq!(profile, Profile::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_marks_dirty() {
        let store = ProfileStore::new();
        let guild = discord_fixtures::test_guild_id();
        let user = discord_fixtures::test_user_id();

        let cookies = store.update(guild, user, |p| {
            p.award_cookies(3);
            p.cookies
        });

        assert_eq!(cookies, 3);
        assert!(store.is_dirty());
        assert_eq!(store.get(guild, user).cookies, 3);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = Arc::new(ProfileStore::new());
        let guild = discord_fixtures::test_guild_id();
        let user = discord_fixtures::test_user_id();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        store.update(guild, user, |p| p.award_coins(1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(guild, user).coins, 2000);
    }

    #[test]
    fn test_leaderboard_orders_by_lifetime_xp() {
        let store = ProfileStore::new();
        let curve = GrowthCurve::default();
        let guild = discord_fixtures::test_guild_id();
        let other_guild = GuildId(42);
        let users = discord_fixtures::test_user_ids(4);

        store.update(guild, users[0], |p| p.award_xp(&curve, 50).map(drop)).unwrap();
        store.update(guild, users[1], |p| p.award_xp(&curve, 800).map(drop)).unwrap();
        store.update(guild, users[2], |p| p.award_coins(10));
        store.update(other_guild, users[3], |p| p.award_xp(&curve, 5000).map(drop)).unwrap();

        let board = store.leaderboard(guild, &curve, 10);
        let order: Vec<UserId> = board.iter().map(|(user, _)| *user).collect();
        assert_eq!(order, vec![users[1], users[0]]);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = create_temp_dir();
        let path = dir.path().join("nested").join("profiles.json");
        let guild = discord_fixtures::test_guild_id();
        let user = discord_fixtures::test_user_id();

        let store = ProfileStore::new();
        store.update(guild, user, |p| {
            p.level = 4;
            p.xp = 12;
            p.successful_works = 9;
        });
        store.save(&path).unwrap();
        assert!(!store.is_dirty());

        let restored = ProfileStore::load(&path).unwrap();
        assert_eq!(restored.get(guild, user), store.get(guild, user));
        assert!(!restored.is_dirty());
    }

    #[test]
    fn test_missing_snapshot_is_empty() {
        let dir = create_temp_dir();
        let store = ProfileStore::load(&dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_rejected() {
        let dir = create_temp_dir();
        let path = dir.path().join("profiles.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(ProfileStore::load(&path), Err(GuildRankError::Storage(_))));
    }
}
