//! Season-championship entries and the string key formats used in documents.

use crate::models::championship::Championship;
use crate::models::standings::StandingRow;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identity of one competition-instance. Serialized as
/// `"{storage key}_s{season}"`, e.g. `"Championnat d'Automne_s3"`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SeasonKey {
    pub championship: Championship,
    pub season: u32,
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_s{}", self.championship.storage_key(), self.season)
    }
}

impl FromStr for SeasonKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let idx = s
            .rfind("_s")
            .ok_or_else(|| format!("invalid season key: {s}"))?;
        let championship = Championship::parse(&s[..idx])
            .ok_or_else(|| format!("unknown championship in season key: {s}"))?;
        let season = s[idx + 2..]
            .parse()
            .map_err(|_| format!("invalid season number in key: {s}"))?;
        Ok(SeasonKey { championship, season })
    }
}

impl Serialize for SeasonKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SeasonKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Penalty identity. Serialized as `"{external id}_{season}_{team}"`,
/// e.g. `"aut_3_Nico"`. The team name may itself contain underscores, so
/// parsing splits on the first two only.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PenaltyKey {
    pub championship: Championship,
    pub season: u32,
    pub team: String,
}

impl fmt::Display for PenaltyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.championship.external_id(),
            self.season,
            self.team
        )
    }
}

impl FromStr for PenaltyKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '_');
        let championship = parts
            .next()
            .and_then(Championship::parse)
            .ok_or_else(|| format!("unknown championship in penalty key: {s}"))?;
        let season = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| format!("invalid season number in penalty key: {s}"))?;
        let team = parts
            .next()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| format!("missing team in penalty key: {s}"))?
            .to_string();
        Ok(PenaltyKey {
            championship,
            season,
            team,
        })
    }
}

impl Serialize for PenaltyKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PenaltyKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Cached view of one competition-instance: its last computed table, how many
/// matchdays it has recorded, and the season's exempt (bye) team if any.
/// Always rebuildable from match data when match data exists; legacy imports
/// may carry only this entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeasonEntry {
    #[serde(default)]
    pub standings: Vec<StandingRow>,
    #[serde(default, rename = "playedMatchdays")]
    pub played_matchdays: u32,
    #[serde(
        default,
        rename = "exemptTeam",
        skip_serializing_if = "Option::is_none"
    )]
    pub exempt_team: Option<String>,
}
