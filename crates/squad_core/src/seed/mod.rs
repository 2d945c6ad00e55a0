//! Demo data bootstrap.
//!
//! [`Seeder::ensure_seed_data`] is safe to call on every start: it fills an
//! empty store, repairs an existing roster, tops up the calendar with past
//! games and regenerates stats only when they are missing or stale. A store
//! that is already consistent sees no writes at all.

pub mod attendance;
pub mod calendar;
pub mod generator;
pub mod ordering;
pub mod roster;

pub use attendance::assign_game_attendance;
pub use calendar::{generate_calendar, missing_past_games};
pub use generator::{attendance_band, generate_stats};
pub use ordering::{order_key, rolling_hash};
pub use roster::{build_roster, correct_names, dedup_by_jersey, SEED_ROSTER};

use crate::config::SeedConfig;
use crate::error::Result;
use crate::images::ImageResolver;
use crate::models::{Event, Player};
use crate::store::{KeyValueStore, RosterStore};

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What a seeding pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub players_inserted: usize,
    pub names_corrected: usize,
    pub duplicates_removed: usize,
    pub events_added: usize,
    pub stats_regenerated: bool,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        *self == SeedReport::default()
    }
}

/// RNG for stat generation: fixed when the config pins a seed.
pub fn seeded_rng(config: &SeedConfig) -> ChaCha8Rng {
    match config.rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub struct Seeder<'a> {
    config: &'a SeedConfig,
    images: &'a dyn ImageResolver,
}

impl<'a> Seeder<'a> {
    pub fn new(config: &'a SeedConfig, images: &'a dyn ImageResolver) -> Self {
        Self { config, images }
    }

    pub fn ensure_seed_data<S, R>(
        &self,
        store: &mut RosterStore<S>,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<SeedReport>
    where
        S: KeyValueStore,
        R: Rng + ?Sized,
    {
        let mut report = SeedReport::default();

        let mut players = store.players()?;
        if players.is_empty() {
            players = build_roster(self.images);
            store.save_players(&players)?;
            report.players_inserted = players.len();
        } else {
            report.names_corrected = correct_names(&mut players, &self.config.name_corrections);
            if report.names_corrected > 0 {
                store.save_players(&players)?;
            }

            let before = players.len();
            players = dedup_by_jersey(players);
            report.duplicates_removed = before - players.len();
            if report.duplicates_removed > 0 {
                store.save_players(&players)?;
            }
        }

        let mut events = store.events()?;
        let games = events.iter().filter(|e| e.is_game()).count();
        if games < self.config.min_games {
            let added = if events.is_empty() {
                generate_calendar(today, self.config)
            } else {
                missing_past_games(&events, today, self.config)
            };
            if !added.is_empty() {
                report.events_added = added.len();
                events.extend(added);
                store.save_events(&events)?;
            }
        }

        let persisted = store.player_stats()?;
        let stale = persisted.is_empty() || persisted.len() != players.len();
        if stale || report.events_added > 0 {
            self.regenerate_stats(store, &players, &mut events, rng)?;
            report.stats_regenerated = true;
        }

        if report.is_noop() {
            log::debug!("Seed data already consistent");
        } else {
            log::info!("Seeding finished: {:?}", report);
        }
        Ok(report)
    }

    /// Wipes all collections and seeds roster, calendar and stats from scratch.
    pub fn reset_all<S, R>(
        &self,
        store: &mut RosterStore<S>,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<SeedReport>
    where
        S: KeyValueStore,
        R: Rng + ?Sized,
    {
        log::info!("Resetting all squad data");
        store.clear_all()?;

        let players = build_roster(self.images);
        store.save_players(&players)?;

        let mut events = generate_calendar(today, self.config);
        store.save_events(&events)?;

        self.regenerate_stats(store, &players, &mut events, rng)?;

        Ok(SeedReport {
            players_inserted: players.len(),
            events_added: events.len(),
            stats_regenerated: true,
            ..Default::default()
        })
    }

    fn regenerate_stats<S, R>(
        &self,
        store: &mut RosterStore<S>,
        players: &[Player],
        events: &mut [Event],
        rng: &mut R,
    ) -> Result<()>
    where
        S: KeyValueStore,
        R: Rng + ?Sized,
    {
        let total_games = events.iter().filter(|e| e.is_game()).count() as u32;
        let stats = generate_stats(players, total_games, self.config, rng);
        store.save_player_stats(&stats)?;

        let changed = assign_game_attendance(&stats, events);
        if changed > 0 {
            store.save_events(events)?;
        }
        log::info!(
            "Regenerated stats for {} players over {} games ({} attendance marks)",
            stats.len(),
            total_games,
            changed
        );
        Ok(())
    }
}
