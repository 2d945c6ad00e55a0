use crate::models::PlayerStats;

use std::collections::HashMap;

/// Copies persisted goals and cards onto freshly derived records.
///
/// Attendance and games played always come from `computed`. Players without
/// a persisted record keep the computed zeros.
pub fn merge_overlay(computed: Vec<PlayerStats>, persisted: &[PlayerStats]) -> Vec<PlayerStats> {
    let by_player: HashMap<&str, &PlayerStats> =
        persisted.iter().map(|s| (s.player_id.as_str(), s)).collect();

    computed
        .into_iter()
        .map(|mut stats| {
            if let Some(saved) = by_player.get(stats.player_id.as_str()) {
                stats.goals = saved.goals;
                stats.yellow_cards = saved.yellow_cards;
                stats.red_cards = saved.red_cards;
            }
            stats
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computed(id: &str, games: u32, pct: u8) -> PlayerStats {
        PlayerStats {
            player_id: id.to_string(),
            games_played: games,
            attendance_percentage: pct,
            ..Default::default()
        }
    }

    #[test]
    fn test_persisted_goals_and_cards_win() {
        let saved = PlayerStats {
            player_id: "p1".to_string(),
            games_played: 99,
            goals: 4,
            yellow_cards: 2,
            red_cards: 1,
            attendance_percentage: 10,
        };

        let merged = merge_overlay(vec![computed("p1", 3, 75)], &[saved]);

        assert_eq!(merged[0].goals, 4);
        assert_eq!(merged[0].yellow_cards, 2);
        assert_eq!(merged[0].red_cards, 1);
        // derived columns are untouched
        assert_eq!(merged[0].games_played, 3);
        assert_eq!(merged[0].attendance_percentage, 75);
    }

    #[test]
    fn test_missing_record_defaults_to_zero() {
        let merged = merge_overlay(vec![computed("p2", 1, 50)], &[PlayerStats::empty("p1")]);
        assert_eq!(merged[0].goals, 0);
        assert_eq!(merged[0].red_cards, 0);
    }

    #[test]
    fn test_orphan_persisted_records_are_ignored() {
        let merged = merge_overlay(Vec::new(), &[PlayerStats::empty("gone")]);
        assert!(merged.is_empty());
    }
}
