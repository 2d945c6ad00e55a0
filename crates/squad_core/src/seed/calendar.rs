// Demo calendar generation, relative to an injected "today"

use crate::config::{Fixture, SeedConfig};
use crate::models::{Event, EventType};

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

pub fn new_event_id() -> String {
    format!("event_{}", Uuid::new_v4().simple())
}

fn game_from(fixture: &Fixture) -> Event {
    Event::new(
        new_event_id(),
        fixture.date,
        fixture.time,
        fixture.location.clone(),
        EventType::Game,
    )
}

fn training_on(date: NaiveDate, config: &SeedConfig) -> Event {
    Event::new(
        new_event_id(),
        date,
        config.training_time,
        config.training_location.clone(),
        EventType::Training,
    )
}

fn is_training_day(date: NaiveDate, config: &SeedConfig) -> bool {
    !config.rest_days.contains(&date.weekday())
}

/// Full calendar for an empty store.
///
/// Past fixtures strictly before `today`, trainings over the trailing window
/// (excluding today) and the coming window (excluding today), then upcoming
/// fixtures on or after `today`. Rest days get no training.
pub fn generate_calendar(today: NaiveDate, config: &SeedConfig) -> Vec<Event> {
    let mut events: Vec<Event> =
        config.past_games.iter().filter(|f| f.date < today).map(game_from).collect();

    // Dates past chrono's range are dropped
    let history = (1..=config.training_history_days)
        .rev()
        .filter_map(|days| today.checked_sub_signed(Duration::days(days as i64)));
    let ahead = (1..=config.training_ahead_days)
        .filter_map(|days| today.checked_add_signed(Duration::days(days as i64)));
    for date in history.chain(ahead) {
        if is_training_day(date, config) {
            events.push(training_on(date, config));
        }
    }

    events.extend(config.upcoming_games.iter().filter(|f| f.date >= today).map(game_from));
    events
}

/// Past fixtures that are missing from `existing` as game events.
pub fn missing_past_games(
    existing: &[Event],
    today: NaiveDate,
    config: &SeedConfig,
) -> Vec<Event> {
    config
        .past_games
        .iter()
        .filter(|f| f.date < today)
        .filter(|f| !existing.iter().any(|e| e.is_game() && e.date == f.date))
        .map(game_from)
        .collect()
}
