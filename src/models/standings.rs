//! Per-team statistics and derived tables: standings rows, champions, pantheon.

use crate::models::championship::Championship;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Aggregate record of one team within one competition-instance.
/// Field names follow the scoreboard's display vocabulary: j = played,
/// g = wins, n = draws, p = losses, bp/bc = goals for/against.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub pts: u32,
    pub j: u32,
    pub g: u32,
    pub n: u32,
    pub p: u32,
    pub bp: u32,
    pub bc: u32,
    pub diff: i64,
}

impl TeamStats {
    /// Apply one finished game from this team's perspective.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.j += 1;
        self.bp += scored;
        self.bc += conceded;
        if scored > conceded {
            self.g += 1;
            self.pts += 3;
        } else if scored == conceded {
            self.n += 1;
            self.pts += 1;
        } else {
            self.p += 1;
        }
        self.diff = i64::from(self.bp) - i64::from(self.bc);
    }

    /// Sum another instance's record into this one. `diff` is recomputed from
    /// the summed goal totals rather than added, so a stale value in either
    /// operand cannot survive the merge.
    pub fn absorb(&mut self, other: &TeamStats) {
        self.pts += other.pts;
        self.j += other.j;
        self.g += other.g;
        self.n += other.n;
        self.p += other.p;
        self.bp += other.bp;
        self.bc += other.bc;
        self.diff = i64::from(self.bp) - i64::from(self.bc);
    }
}

/// One row of a ranked table. Positions are dense, 1-based. `pts` is the raw
/// figure; penalties only influence ordering, never the displayed record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    #[serde(default)]
    pub position: u32,
    #[serde(alias = "name", alias = "equipe")]
    pub team: String,
    #[serde(default)]
    pub pts: u32,
    #[serde(default)]
    pub j: u32,
    #[serde(default)]
    pub g: u32,
    #[serde(default)]
    pub n: u32,
    #[serde(default)]
    pub p: u32,
    #[serde(default)]
    pub bp: u32,
    #[serde(default)]
    pub bc: u32,
    #[serde(default, deserialize_with = "de_lenient_int")]
    pub diff: i64,
}

/// Legacy tables store goal difference either as a number or as a signed
/// string such as "+5"; unusable values degrade to 0.
fn de_lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(parse_lenient_int(&value))
}

fn parse_lenient_int(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.strip_prefix('+').unwrap_or(s).parse().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Season champion of one championship, derived once the season is complete.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChampionEntry {
    pub championship: Championship,
    pub season: u32,
    pub champion: String,
    #[serde(rename = "runnerUp", skip_serializing_if = "Option::is_none")]
    pub runner_up: Option<String>,
    pub points: i64,
}

/// All-time trophy count of one manager, broken out per championship.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PantheonEntry {
    pub rank: u32,
    pub manager: String,
    pub counts: BTreeMap<Championship, u32>,
    pub total: u32,
}
