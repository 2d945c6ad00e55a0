use crate::models::{Event, Player, PlayerStats};

/// Builds one stats record per player from event attendance alone.
///
/// - `games_played`: game events where the player is marked present.
/// - `attendance_percentage`: events of any type where the player is marked
///   present, over the total number of events, rounded half up. `0` when
///   there are no events.
///
/// Goals and cards are left at zero; see [`super::merge_overlay`].
pub fn derive_from_events(players: &[Player], events: &[Event]) -> Vec<PlayerStats> {
    let total_events = events.len();

    players
        .iter()
        .map(|player| {
            let attended = events.iter().filter(|e| e.attendance.is_present(&player.id));
            let (mut games_played, mut attended_count) = (0u32, 0usize);
            for event in attended {
                attended_count += 1;
                if event.is_game() {
                    games_played += 1;
                }
            }

            PlayerStats {
                player_id: player.id.clone(),
                games_played,
                attendance_percentage: attendance_percentage(attended_count, total_events),
                ..Default::default()
            }
        })
        .collect()
}

pub fn attendance_percentage(attended: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (100.0 * attended as f64 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}
