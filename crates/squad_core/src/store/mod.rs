// Key-value persistence for the roster collections

pub mod backend;
pub mod error;
pub mod roster;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StoreError;
pub use roster::{RosterStore, EVENTS_KEY, PLAYERS_KEY, STATS_KEY};
