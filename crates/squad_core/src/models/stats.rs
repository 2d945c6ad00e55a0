use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::player::PlayerId;
use crate::error::SquadError;

/// Per-player statistics record, keyed by player id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub games_played: u32,
    pub goals: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    /// 0..=100
    pub attendance_percentage: u8,
}

impl PlayerStats {
    pub fn empty(player_id: impl Into<PlayerId>) -> Self {
        Self { player_id: player_id.into(), ..Default::default() }
    }

    pub fn get(&self, field: StatField) -> u32 {
        match field {
            StatField::Goals => self.goals,
            StatField::YellowCards => self.yellow_cards,
            StatField::RedCards => self.red_cards,
        }
    }

    pub fn set(&mut self, field: StatField, value: u32) {
        match field {
            StatField::Goals => self.goals = value,
            StatField::YellowCards => self.yellow_cards = value,
            StatField::RedCards => self.red_cards = value,
        }
    }
}

/// Manually edited stat columns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StatField {
    Goals,
    YellowCards,
    RedCards,
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatField::Goals => f.write_str("goals"),
            StatField::YellowCards => f.write_str("yellowCards"),
            StatField::RedCards => f.write_str("redCards"),
        }
    }
}

impl FromStr for StatField {
    type Err = SquadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goals" => Ok(StatField::Goals),
            "yellowCards" | "yellow-cards" | "yellow_cards" | "yellow" => {
                Ok(StatField::YellowCards)
            }
            "redCards" | "red-cards" | "red_cards" | "red" => Ok(StatField::RedCards),
            _ => Err(SquadError::UnknownStatField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopScorer {
    pub player_id: PlayerId,
    pub player_name: String,
    pub goals: u32,
}

/// Team-level dashboard figures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub top_scorer: Option<TopScorer>,
    pub average_attendance: u8,
    pub total_games: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_field_parse() {
        assert_eq!("goals".parse::<StatField>().unwrap(), StatField::Goals);
        assert_eq!("yellow-cards".parse::<StatField>().unwrap(), StatField::YellowCards);
        assert_eq!("redCards".parse::<StatField>().unwrap(), StatField::RedCards);
        assert!(matches!(
            "assists".parse::<StatField>(),
            Err(SquadError::UnknownStatField(_))
        ));
    }

    #[test]
    fn test_get_set_by_field() {
        let mut stats = PlayerStats::empty("p1");
        stats.set(StatField::YellowCards, 3);
        assert_eq!(stats.get(StatField::YellowCards), 3);
        assert_eq!(stats.get(StatField::Goals), 0);
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(PlayerStats::empty("p1")).unwrap();
        assert!(json.get("attendancePercentage").is_some());
        assert!(json.get("gamesPlayed").is_some());
    }
}
