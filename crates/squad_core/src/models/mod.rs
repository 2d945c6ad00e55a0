// Persisted records: players, calendar events, per-player stats

pub mod event;
pub mod player;
pub mod stats;

pub use event::{Attendance, AttendanceMap, Event, EventId, EventPatch, EventType};
pub use player::{sort_roster, Player, PlayerId, PlayerPatch, Position, RosterOrder};
pub use stats::{PlayerStats, StatField, TeamStats, TopScorer};
