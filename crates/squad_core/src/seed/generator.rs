// Synthetic stats for demo rosters

use crate::config::{SeedConfig, StatRange};
use crate::models::{Player, PlayerStats};

use rand::Rng;

fn draw<R: Rng + ?Sized>(rng: &mut R, range: StatRange) -> u32 {
    let (min, max) = range.bounds();
    rng.gen_range(min..=max)
}

/// Attendance band for a player. Injured beats young beats key player.
pub fn attendance_band(player: &Player, config: &SeedConfig) -> StatRange {
    if player.is_injured {
        config.injured_attendance
    } else if player.is_young(config.young_age) {
        config.young_attendance
    } else if player.is_key_player(config.key_jersey_max) {
        config.key_attendance
    } else {
        config.default_attendance
    }
}

/// One generated record per player; attendance is persisted as drawn.
pub fn generate_stats<R: Rng + ?Sized>(
    players: &[Player],
    total_games: u32,
    config: &SeedConfig,
    rng: &mut R,
) -> Vec<PlayerStats> {
    players
        .iter()
        .map(|player| {
            let attendance = draw(rng, attendance_band(player, config)).min(100);

            let expected = (attendance as f64 / 100.0 * total_games as f64).round() as i64;
            let jitter = config.games_jitter as i64;
            let offset = if jitter > 0 { rng.gen_range(-jitter..=jitter) } else { 0 };
            let games_played = (expected + offset).clamp(0, total_games as i64) as u32;

            let goals = if player.position.is_attacker() {
                draw(rng, config.attacker_goals)
            } else {
                draw(rng, config.other_goals)
            };
            let yellow_cards = draw(rng, config.yellow_cards);
            let red_cards = if rng.gen_bool(config.red_card_probability()) {
                draw(rng, config.red_cards)
            } else {
                0
            };

            PlayerStats {
                player_id: player.id.clone(),
                games_played,
                goals,
                yellow_cards,
                red_cards,
                attendance_percentage: attendance as u8,
            }
        })
        .collect()
}
