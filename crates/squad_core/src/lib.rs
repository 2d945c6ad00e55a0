//! # squad_core - roster, schedule and attendance stats for one football squad
//!
//! All state lives in three JSON collections (players, events, stats) behind
//! a [`store::KeyValueStore`]. On top of that:
//! - [`stats`] derives attendance and games played from the event calendar
//!   and overlays manually edited goals/cards
//! - [`seed`] bootstraps a consistent demo dataset and regenerates stats
//!   with deterministic attendance backfill

pub mod config;
pub mod error;
pub mod images;
pub mod models;
pub mod seed;
pub mod stats;
pub mod store;

pub use config::{SeedConfig, SquadConfig};
pub use error::{Result, SquadError};
pub use images::{ImageResolver, NameMapResolver, NoImages};
pub use models::{
    sort_roster, Attendance, AttendanceMap, Event, EventPatch, EventType, Player, PlayerPatch,
    PlayerStats, Position, RosterOrder, StatField, TeamStats,
};
pub use seed::{SeedReport, Seeder};
pub use stats::{compute_stats, update_stat};
pub use store::{FileStore, KeyValueStore, MemoryStore, RosterStore, StoreError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
