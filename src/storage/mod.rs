//! Local persistence: a string key-value store and the two records kept in it

pub mod leaderboard;
pub mod profile;
pub mod store;

pub use leaderboard::{Leaderboard, LeaderboardEntry, LEADERBOARD_KEY, LEADERBOARD_SIZE};
pub use profile::{PlayerProfile, PLAYER_NAME_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
