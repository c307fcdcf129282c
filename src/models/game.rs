//! Games and matchday blocks. Games are kept as raw JSON objects because
//! imported legacy data uses several generations of field names; the canonical
//! shape is only materialized when a game is normalized for computation.

use crate::models::championship::Championship;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum games per matchday block (10 teams, one exempt).
pub const MAX_GAMES_PER_MATCHDAY: usize = 5;

/// Highest score a game can record; anything outside [0, MAX_SCORE] is
/// treated as unplayed.
pub const MAX_SCORE: u32 = 99;

/// Field-name fallbacks, newest first. New legacy spellings are additive:
/// append to the end so older data keeps resolving in the same order.
pub const HOME_TEAM_KEYS: [&str; 4] = ["homeTeam", "equipeDomicile", "domicile", "joueur1"];
pub const AWAY_TEAM_KEYS: [&str; 4] = ["awayTeam", "equipeExterieur", "exterieur", "joueur2"];
pub const HOME_SCORE_KEYS: [&str; 4] = ["homeScore", "scoreDomicile", "butsDomicile", "score1"];
pub const AWAY_SCORE_KEYS: [&str; 4] = ["awayScore", "scoreExterieur", "butsExterieur", "score2"];

/// Canonical shape of one game. `None` scores mean "not played yet".
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    #[serde(rename = "homeScore")]
    pub home_score: Option<u32>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<u32>,
}

impl Game {
    /// Both scores recorded.
    pub fn is_complete(&self) -> bool {
        matches!(
            (self.home_score, self.away_score),
            (Some(h), Some(a)) if h <= MAX_SCORE && a <= MAX_SCORE
        )
    }

    /// Canonical raw representation, suitable for storage in a matchday block.
    pub fn to_raw(&self) -> Value {
        serde_json::json!({
            "homeTeam": self.home_team,
            "awayTeam": self.away_team,
            "homeScore": self.home_score,
            "awayScore": self.away_score,
        })
    }
}

/// One round of fixtures: up to 5 games for one (championship, season, matchday).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchdayBlock {
    pub championship: Championship,
    pub season: u32,
    pub matchday: u32,
    #[serde(default)]
    pub games: Vec<Value>,
}

/// First string value found under the given keys; empty string if none.
pub fn first_string_field(raw: &Value, keys: &[&str]) -> String {
    if let Some(obj) = raw.as_object() {
        for key in keys {
            if let Some(s) = obj.get(*key).and_then(Value::as_str) {
                if !s.is_empty() {
                    return s.to_string();
                }
            }
        }
    }
    String::new()
}

/// Team names of a raw game, whatever generation of field names it uses.
pub fn raw_team_pair(raw: &Value) -> (String, String) {
    (
        first_string_field(raw, &HOME_TEAM_KEYS),
        first_string_field(raw, &AWAY_TEAM_KEYS),
    )
}
