//! Game normalization: reconcile raw game objects of any known field-name
//! generation into the canonical shape.

use crate::models::{
    first_string_field, Game, AWAY_SCORE_KEYS, AWAY_TEAM_KEYS, HOME_SCORE_KEYS, HOME_TEAM_KEYS,
    MAX_SCORE,
};
use serde_json::Value;

/// Normalize one raw game. Pure and idempotent: the canonical field names are
/// the first entry of each fallback list, so normalizing an already-normalized
/// game changes nothing.
///
/// Team fields default to `""` when no spelling is present. For scores, the
/// first key that is present at all wins even if its value is `null`
/// ("no score yet" is distinct from "field never written").
pub fn normalize(raw: &Value) -> Game {
    Game {
        home_team: first_string_field(raw, &HOME_TEAM_KEYS),
        away_team: first_string_field(raw, &AWAY_TEAM_KEYS),
        home_score: first_score_field(raw, &HOME_SCORE_KEYS),
        away_score: first_score_field(raw, &AWAY_SCORE_KEYS),
    }
}

fn first_score_field(raw: &Value, keys: &[&str]) -> Option<u32> {
    let obj = raw.as_object()?;
    for key in keys {
        if let Some(value) = obj.get(*key) {
            return parse_score(value);
        }
    }
    None
}

/// A usable score is an integer in [0, MAX_SCORE]; legacy data also stores
/// scores as numeric strings. Anything else reads as "not played".
pub fn parse_score(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if (0..=i64::from(MAX_SCORE)).contains(&n) {
        Some(n as u32)
    } else {
        None
    }
}
