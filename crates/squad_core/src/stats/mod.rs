//! Player statistics.
//!
//! Two sources feed a stats record: attendance-derived columns computed from
//! the event calendar, and goals/cards persisted after manual edits (or
//! written wholesale by the seeder). [`compute_stats`] composes the two pure
//! steps [`derive_from_events`] and [`merge_overlay`].

pub mod derive;
pub mod overlay;
pub mod team;

pub use derive::{attendance_percentage, derive_from_events};
pub use overlay::merge_overlay;
pub use team::{leaderboard, next_event, next_game, position_breakdown, team_summary, Metric};

use crate::error::{Result, SquadError};
use crate::models::{PlayerStats, StatField};
use crate::store::{KeyValueStore, RosterStore};

/// Merged stats view for every current player, in roster order. Read-only.
pub fn compute_stats<S: KeyValueStore>(store: &RosterStore<S>) -> Result<Vec<PlayerStats>> {
    let players = store.players()?;
    let events = store.events()?;
    let persisted = store.player_stats()?;

    Ok(merge_overlay(derive_from_events(&players, &events), &persisted))
}

/// Sets one manual stat column and writes the stats collection back.
///
/// A player without a persisted record gets one seeded from the computed
/// baseline. Read-modify-write with no locking; the last writer wins.
pub fn update_stat<S: KeyValueStore>(
    store: &mut RosterStore<S>,
    player_id: &str,
    field: StatField,
    value: u32,
) -> Result<PlayerStats> {
    let mut persisted = store.player_stats()?;

    let updated = match persisted.iter_mut().find(|s| s.player_id == player_id) {
        Some(record) => {
            record.set(field, value);
            record.clone()
        }
        None => {
            let mut record = compute_stats(store)?
                .into_iter()
                .find(|s| s.player_id == player_id)
                .ok_or_else(|| SquadError::PlayerNotFound(player_id.to_string()))?;
            record.set(field, value);
            persisted.push(record.clone());
            record
        }
    };

    store.save_player_stats(&persisted)?;
    log::debug!("Set {} = {} for player {}", field, value, player_id);
    Ok(updated)
}
