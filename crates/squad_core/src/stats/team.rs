use crate::models::{Event, Player, PlayerStats, Position, TeamStats, TopScorer};

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Goals,
    Attendance,
    GamesPlayed,
}

impl Metric {
    fn value(&self, stats: &PlayerStats) -> u32 {
        match self {
            Metric::Goals => stats.goals,
            Metric::Attendance => stats.attendance_percentage as u32,
            Metric::GamesPlayed => stats.games_played,
        }
    }
}

pub fn team_summary(players: &[Player], stats: &[PlayerStats], events: &[Event]) -> TeamStats {
    let top_scorer = leaderboard(stats, Metric::Goals, 1).into_iter().next().map(|best| {
        let player_name = players
            .iter()
            .find(|p| p.id == best.player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        TopScorer { player_id: best.player_id.clone(), player_name, goals: best.goals }
    });

    let average_attendance = if stats.is_empty() {
        0
    } else {
        let sum: u32 = stats.iter().map(|s| s.attendance_percentage as u32).sum();
        (sum as f64 / stats.len() as f64).round() as u8
    };

    TeamStats {
        top_scorer,
        average_attendance,
        total_games: events.iter().filter(|e| e.is_game()).count(),
    }
}

/// Highest first, stable on ties. The goals board skips players without a goal.
pub fn leaderboard(stats: &[PlayerStats], metric: Metric, limit: usize) -> Vec<&PlayerStats> {
    let mut board: Vec<&PlayerStats> = stats
        .iter()
        .filter(|s| metric != Metric::Goals || s.goals > 0)
        .collect();
    board.sort_by(|a, b| metric.value(b).cmp(&metric.value(a)));
    board.truncate(limit);
    board
}

pub fn position_breakdown(players: &[Player]) -> BTreeMap<Position, usize> {
    let mut counts = BTreeMap::new();
    for player in players {
        *counts.entry(player.position).or_insert(0) += 1;
    }
    counts
}

/// Earliest event starting strictly after `now`.
pub fn next_event(events: &[Event], now: NaiveDateTime) -> Option<&Event> {
    events.iter().filter(|e| e.starts_at() > now).min_by_key(|e| e.starts_at())
}

/// Earliest game starting strictly after `now`; trainings are ignored.
pub fn next_game(events: &[Event], now: NaiveDateTime) -> Option<&Event> {
    events
        .iter()
        .filter(|e| e.is_game() && e.starts_at() > now)
        .min_by_key(|e| e.starts_at())
}
