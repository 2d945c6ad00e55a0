use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SquadError;

pub type PlayerId = String;

/// Squad member as persisted under the players key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub jersey_number: u32,
    pub position: Position,
    pub age: u8,
    pub is_injured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    /// Height in centimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u16>,
    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
}

impl Position {
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defense, Position::Midfield, Position::Attack];

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    pub fn is_attacker(&self) -> bool {
        matches!(self, Position::Attack)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::Defense => "defense",
            Position::Midfield => "midfield",
            Position::Attack => "attack",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = SquadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "goalkeeper" | "gk" => Ok(Position::Goalkeeper),
            "defense" | "defence" | "df" => Ok(Position::Defense),
            "midfield" | "mf" => Ok(Position::Midfield),
            "attack" | "fw" => Ok(Position::Attack),
            _ => Err(SquadError::UnknownPosition(s.to_string())),
        }
    }
}

/// Display order for roster listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RosterOrder {
    /// Grouped by position, then jersey number
    #[default]
    Position,
    Name,
    Age,
    Jersey,
}

impl FromStr for RosterOrder {
    type Err = SquadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "position" => Ok(RosterOrder::Position),
            "name" => Ok(RosterOrder::Name),
            "age" => Ok(RosterOrder::Age),
            "jersey" | "number" => Ok(RosterOrder::Jersey),
            _ => Err(SquadError::UnknownRosterOrder(s.to_string())),
        }
    }
}

/// Stable sort; names compare case-insensitively.
pub fn sort_roster(players: &mut [Player], order: RosterOrder) {
    match order {
        RosterOrder::Position => players.sort_by_key(|p| (p.position, p.jersey_number)),
        RosterOrder::Name => players.sort_by_cached_key(|p| p.name.to_lowercase()),
        RosterOrder::Age => players.sort_by_key(|p| p.age),
        RosterOrder::Jersey => players.sort_by_key(|p| p.jersey_number),
    }
}

impl Player {
    /// Key players get the high attendance band when stats are generated.
    pub fn is_key_player(&self, key_jersey_max: u32) -> bool {
        self.jersey_number <= key_jersey_max || self.position.is_goalkeeper()
    }

    pub fn is_young(&self, young_age: u8) -> bool {
        self.age < young_age
    }

    /// Shallow merge: only the fields set on the patch are overwritten.
    pub fn apply(&mut self, patch: PlayerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(jersey_number) = patch.jersey_number {
            self.jersey_number = jersey_number;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(is_injured) = patch.is_injured {
            self.is_injured = is_injured;
        }
        if patch.image_url.is_some() {
            self.image_url = patch.image_url;
        }
        if patch.nationality.is_some() {
            self.nationality = patch.nationality;
        }
        if patch.height.is_some() {
            self.height = patch.height;
        }
        if patch.weight.is_some() {
            self.weight = patch.weight;
        }
        if patch.date_of_birth.is_some() {
            self.date_of_birth = patch.date_of_birth;
        }
        if patch.contract_until.is_some() {
            self.contract_until = patch.contract_until;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("player id is required".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("player name is required".to_string());
        }
        Ok(())
    }
}

/// Partial update for [`Player`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub jersey_number: Option<u32>,
    pub position: Option<Position>,
    pub age: Option<u8>,
    pub is_injured: Option<bool>,
    pub image_url: Option<String>,
    pub nationality: Option<String>,
    pub height: Option<u16>,
    pub weight: Option<u16>,
    pub date_of_birth: Option<NaiveDate>,
    pub contract_until: Option<NaiveDate>,
}

#[cfg(test)]
pub(crate) fn test_player(id: &str, jersey_number: u32, position: Position) -> Player {
    Player {
        id: id.to_string(),
        name: format!("Player {}", jersey_number),
        jersey_number,
        position,
        age: 25,
        is_injured: false,
        image_url: None,
        nationality: None,
        height: None,
        weight: None,
        date_of_birth: None,
        contract_until: None,
    }
}
