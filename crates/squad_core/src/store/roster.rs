use super::backend::KeyValueStore;
use super::error::StoreError;
use crate::models::{Event, EventPatch, Player, PlayerPatch, PlayerStats};

use serde::de::DeserializeOwned;
use serde::Serialize;

pub const PLAYERS_KEY: &str = "squad_players";
pub const EVENTS_KEY: &str = "squad_events";
pub const STATS_KEY: &str = "squad_stats";

/// Typed access to the three persisted collections.
///
/// Each collection is one JSON array under a fixed key. Reads of an absent
/// key yield an empty vector. Every mutation rewrites the whole array; there
/// is no transaction across collections.
#[derive(Debug)]
pub struct RosterStore<S> {
    backend: S,
}

impl<S: KeyValueStore> RosterStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    // Players

    pub fn players(&self) -> Result<Vec<Player>, StoreError> {
        self.load(PLAYERS_KEY)
    }

    pub fn save_players(&mut self, players: &[Player]) -> Result<(), StoreError> {
        self.save(PLAYERS_KEY, players)
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), StoreError> {
        player.validate().map_err(StoreError::Validation)?;
        let mut players = self.players()?;
        players.push(player);
        self.save_players(&players)
    }

    /// Returns `false` (and writes nothing) when no player has this id.
    /// A patch that leaves the player invalid is rejected.
    pub fn update_player(&mut self, id: &str, patch: PlayerPatch) -> Result<bool, StoreError> {
        let mut players = self.players()?;
        match players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.apply(patch);
                player.validate().map_err(StoreError::Validation)?;
                self.save_players(&players)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete_player(&mut self, id: &str) -> Result<bool, StoreError> {
        let players = self.players()?;
        let before = players.len();
        let kept: Vec<Player> = players.into_iter().filter(|p| p.id != id).collect();
        let removed = kept.len() != before;
        self.save_players(&kept)?;
        if removed {
            log::info!("Deleted player {}", id);
        }
        Ok(removed)
    }

    // Events

    pub fn events(&self) -> Result<Vec<Event>, StoreError> {
        self.load(EVENTS_KEY)
    }

    pub fn save_events(&mut self, events: &[Event]) -> Result<(), StoreError> {
        self.save(EVENTS_KEY, events)
    }

    pub fn add_event(&mut self, event: Event) -> Result<(), StoreError> {
        event.validate().map_err(StoreError::Validation)?;
        let mut events = self.events()?;
        events.push(event);
        self.save_events(&events)
    }

    pub fn update_event(&mut self, id: &str, patch: EventPatch) -> Result<bool, StoreError> {
        let mut events = self.events()?;
        match events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.apply(patch);
                event.validate().map_err(StoreError::Validation)?;
                self.save_events(&events)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete_event(&mut self, id: &str) -> Result<bool, StoreError> {
        let events = self.events()?;
        let before = events.len();
        let kept: Vec<Event> = events.into_iter().filter(|e| e.id != id).collect();
        let removed = kept.len() != before;
        self.save_events(&kept)?;
        if removed {
            log::info!("Deleted event {}", id);
        }
        Ok(removed)
    }

    /// Sets one player's presence on one event. Returns the new presence.
    pub fn set_attendance(
        &mut self,
        event_id: &str,
        player_id: &str,
        present: Option<bool>,
    ) -> Result<Option<bool>, StoreError> {
        let mut events = self.events()?;
        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return Ok(None);
        };
        let now_present = match present {
            Some(value) => {
                event.attendance.set(player_id, value);
                value
            }
            None => event.attendance.toggle(player_id),
        };
        self.save_events(&events)?;
        Ok(Some(now_present))
    }

    /// Drops a player's mark so the event shows them as unrecorded.
    /// Returns `false` when the event does not exist.
    pub fn clear_attendance(
        &mut self,
        event_id: &str,
        player_id: &str,
    ) -> Result<bool, StoreError> {
        let mut events = self.events()?;
        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return Ok(false);
        };
        event.attendance.unrecord(player_id);
        self.save_events(&events)?;
        Ok(true)
    }

    // Stats

    pub fn player_stats(&self) -> Result<Vec<PlayerStats>, StoreError> {
        self.load(STATS_KEY)
    }

    pub fn save_player_stats(&mut self, stats: &[PlayerStats]) -> Result<(), StoreError> {
        self.save(STATS_KEY, stats)
    }

    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        for key in [PLAYERS_KEY, EVENTS_KEY, STATS_KEY] {
            self.backend.remove(key)?;
        }
        log::info!("Cleared players, events and stats");
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.backend.get(key)? {
            Some(data) => serde_json::from_str(&data)
                .map_err(|source| StoreError::Json { key: key.to_string(), source }),
            None => Ok(Vec::new()),
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_string(items)
            .map_err(|source| StoreError::Json { key: key.to_string(), source })?;
        self.backend.set(key, data)
    }
}
