use super::ordering::order_key;
use crate::models::{Attendance, Event, PlayerStats};

/// Rewrites game attendance so each player's present count matches their
/// `games_played`.
///
/// Per player, game events are ordered by `(order_key(player, event), event id)`;
/// the first `games_played` are marked present and the remaining games
/// explicitly absent. Training events are left alone. Returns the number of
/// attendance marks that changed.
pub fn assign_game_attendance(stats: &[PlayerStats], events: &mut [Event]) -> usize {
    let game_indices: Vec<usize> =
        events.iter().enumerate().filter(|(_, e)| e.is_game()).map(|(i, _)| i).collect();

    let mut changed = 0;
    for record in stats {
        let player_id = record.player_id.as_str();
        let mut ordered = game_indices.clone();
        ordered.sort_by(|&a, &b| {
            let key_a = (order_key(player_id, &events[a].id), &events[a].id);
            let key_b = (order_key(player_id, &events[b].id), &events[b].id);
            key_a.cmp(&key_b)
        });

        for (rank, &index) in ordered.iter().enumerate() {
            let present = rank < record.games_played as usize;
            let attendance = &mut events[index].attendance;
            let mark = if present { Attendance::Present } else { Attendance::Absent };
            if attendance.lookup(player_id) != mark {
                attendance.set(player_id, present);
                changed += 1;
            }
        }
    }
    changed
}
