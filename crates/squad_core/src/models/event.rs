use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::player::PlayerId;
use crate::error::SquadError;

pub type EventId = String;

/// A training session or a game on the team calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub attendance: AttendanceMap,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Training,
    Game,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventType::Training => f.write_str("training"),
            EventType::Game => f.write_str("game"),
        }
    }
}

impl FromStr for EventType {
    type Err = SquadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "training" => Ok(EventType::Training),
            "game" | "match" => Ok(EventType::Game),
            _ => Err(SquadError::UnknownEventType(s.to_string())),
        }
    }
}

impl Event {
    pub fn new(
        id: impl Into<EventId>,
        date: NaiveDate,
        time: NaiveTime,
        location: impl Into<String>,
        event_type: EventType,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            time,
            location: location.into(),
            event_type,
            attendance: AttendanceMap::default(),
        }
    }

    pub fn is_game(&self) -> bool {
        self.event_type == EventType::Game
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(event_type) = patch.event_type {
            self.event_type = event_type;
        }
        if let Some(attendance) = patch.attendance {
            self.attendance = attendance;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("event id is required".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("event location is required".to_string());
        }
        Ok(())
    }
}

/// Partial update for [`Event`]. Attendance, when given, replaces the whole map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub event_type: Option<EventType>,
    pub attendance: Option<AttendanceMap>,
}

/// Recorded presence of one player at one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attendance {
    Present,
    Absent,
    /// No entry for the player. Consumers currently treat this as absent.
    Unrecorded,
}

/// Sparse player id -> presence map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AttendanceMap(BTreeMap<PlayerId, bool>);

impl AttendanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, player_id: &str) -> Attendance {
        match self.0.get(player_id) {
            Some(true) => Attendance::Present,
            Some(false) => Attendance::Absent,
            None => Attendance::Unrecorded,
        }
    }

    pub fn is_present(&self, player_id: &str) -> bool {
        self.lookup(player_id) == Attendance::Present
    }

    pub fn set(&mut self, player_id: impl Into<PlayerId>, present: bool) {
        self.0.insert(player_id.into(), present);
    }

    /// Flips presence; an unrecorded player becomes present.
    pub fn toggle(&mut self, player_id: &str) -> bool {
        let present = !self.is_present(player_id);
        self.set(player_id, present);
        present
    }

    pub fn unrecord(&mut self, player_id: &str) {
        self.0.remove(player_id);
    }

    pub fn present_count(&self) -> usize {
        self.0.values().filter(|present| **present).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &bool)> {
        self.0.iter()
    }
}

impl FromIterator<(PlayerId, bool)> for AttendanceMap {
    fn from_iter<I: IntoIterator<Item = (PlayerId, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `HH:MM` wire format for event times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) fn test_event(id: &str, event_type: EventType, present: &[&str]) -> Event {
    let mut event = Event::new(
        id,
        NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        "Training ground",
        event_type,
    );
    for player_id in present {
        event.attendance.set(*player_id, true);
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let mut event = test_event("e1", EventType::Game, &["p1"]);
        event.time = NaiveTime::from_hms_opt(20, 30, 0).unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["date"], "2024-11-15");
        assert_eq!(json["time"], "20:30");
        assert_eq!(json["type"], "game");
        assert_eq!(json["attendance"]["p1"], true);
    }

    #[test]
    fn test_missing_attendance_reads_empty() {
        let json = concat!(
            r#"{"id":"e1","date":"2024-12-05","time":"18:00","#,
            r#""location":"Haifa","type":"training"}"#
        );
        let event: Event = serde_json::from_str(json).unwrap();

        assert!(event.attendance.is_empty());
        assert_eq!(event.event_type, EventType::Training);
    }

    #[test]
    fn test_tri_state_lookup() {
        let mut map = AttendanceMap::new();
        map.set("p1", true);
        map.set("p2", false);

        assert_eq!(map.lookup("p1"), Attendance::Present);
        assert_eq!(map.lookup("p2"), Attendance::Absent);
        assert_eq!(map.lookup("p3"), Attendance::Unrecorded);
        assert!(!map.is_present("p3"));
    }

    #[test]
    fn test_toggle_unrecorded_marks_present() {
        let mut map = AttendanceMap::new();
        assert!(map.toggle("p1"));
        assert!(!map.toggle("p1"));
        assert_eq!(map.lookup("p1"), Attendance::Absent);
    }

    #[test]
    fn test_patch_replaces_only_given_fields() {
        let mut event = test_event("e1", EventType::Training, &["p1"]);
        event.apply(EventPatch { location: Some("Stadium".to_string()), ..Default::default() });

        assert_eq!(event.location, "Stadium");
        assert!(event.attendance.is_present("p1"));
    }
}
