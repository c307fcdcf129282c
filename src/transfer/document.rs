//! Versioned document shape for persistence and import/export.

use crate::models::{Dataset, Manager, MatchdayBlock, PenaltyKey, SeasonEntry, SeasonKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat legacy format: entities at the top level.
pub const DOCUMENT_VERSION_V1: &str = "1.0";
/// Entity-based format written by this application.
pub const DOCUMENT_VERSION_V2: &str = "2.0";

/// The v2.0 document: a version tag, the entities, penalties, and (on
/// export) a timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub version: String,
    pub entities: Entities,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub penalties: BTreeMap<PenaltyKey, u32>,
    #[serde(
        default,
        rename = "exportDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub export_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub managers: BTreeMap<String, Manager>,
    #[serde(default)]
    pub seasons: BTreeMap<SeasonKey, SeasonEntry>,
    #[serde(default)]
    pub matches: Vec<MatchdayBlock>,
}

impl Document {
    /// Current dataset as a v2.0 document, without an export timestamp
    /// (the shape written to the backing store).
    pub fn snapshot(data: &Dataset) -> Self {
        Document {
            version: DOCUMENT_VERSION_V2.to_string(),
            entities: Entities {
                managers: data.managers.clone(),
                seasons: data.seasons.clone(),
                matches: data.matches.clone(),
            },
            penalties: data.penalties.clone(),
            export_date: None,
        }
    }

    /// Snapshot stamped for a user-facing export download.
    pub fn export(data: &Dataset, now: DateTime<Utc>) -> Self {
        let mut doc = Document::snapshot(data);
        doc.export_date = Some(now);
        doc
    }

    /// Unpack into a dataset. Manager entries from hand-edited files may lack
    /// an id; the map key fills in.
    pub fn into_dataset(self) -> Dataset {
        let mut managers = self.entities.managers;
        for (id, manager) in managers.iter_mut() {
            if manager.id.is_empty() {
                manager.id = id.clone();
            }
        }
        Dataset {
            managers,
            seasons: self.entities.seasons,
            matches: self.entities.matches,
            penalties: self.penalties,
        }
    }
}
