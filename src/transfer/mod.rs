//! Import/export of the whole dataset as a versioned JSON document.

mod document;
mod validate;

pub use document::{Document, Entities, DOCUMENT_VERSION_V1, DOCUMENT_VERSION_V2};
pub use validate::{validate_payload, ImportError, MAX_IMPORT_BYTES, MAX_NESTING_DEPTH};

use crate::models::{Dataset, Manager, MatchdayBlock, PenaltyKey, SeasonEntry, SeasonKey};
use serde_json::Value;
use std::collections::BTreeMap;

/// Validate an uploaded file and turn it into a dataset. Legacy v1.0 files
/// are upgraded in place; v2.0 files deserialize directly.
pub fn import_dataset(raw: &[u8]) -> Result<Dataset, ImportError> {
    let value = validate_payload(raw)?;
    let version = value
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let document = if version == DOCUMENT_VERSION_V1 {
        upgrade_legacy(&value)
    } else {
        serde_json::from_value::<Document>(value)
            .map_err(|_| ImportError::InvalidStructure("entities"))?
    };
    Ok(document.into_dataset())
}

/// Upgrade a flat v1.0 file. Those files carried a manager list (strings or
/// `{name}` objects), match blocks, optionally season tables and penalties;
/// individually malformed entries are skipped rather than failing the whole
/// import, because surviving legacy exports are known to be inconsistent.
fn upgrade_legacy(root: &Value) -> Document {
    let mut managers: BTreeMap<String, Manager> = BTreeMap::new();
    if let Some(list) = root.get("managers").and_then(Value::as_array) {
        for item in list {
            let name = item
                .as_str()
                .map(str::to_string)
                .or_else(|| item.get("name").and_then(Value::as_str).map(str::to_string));
            let Some(name) = name else { continue };
            let manager = Manager::new(name);
            managers.insert(manager.id.clone(), manager);
        }
    }

    let matches: Vec<MatchdayBlock> = root
        .get("matches")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    let mut seasons: BTreeMap<SeasonKey, SeasonEntry> = BTreeMap::new();
    if let Some(map) = root.get("seasons").and_then(Value::as_object) {
        for (raw_key, raw_entry) in map {
            let Ok(key) = raw_key.parse::<SeasonKey>() else {
                continue;
            };
            let Ok(entry) = serde_json::from_value::<SeasonEntry>(raw_entry.clone()) else {
                continue;
            };
            seasons.insert(key, entry);
        }
    }

    let mut penalties: BTreeMap<PenaltyKey, u32> = BTreeMap::new();
    if let Some(map) = root.get("penalties").and_then(Value::as_object) {
        for (raw_key, raw_points) in map {
            let Ok(key) = raw_key.parse::<PenaltyKey>() else {
                continue;
            };
            let Some(points) = raw_points.as_u64() else {
                continue;
            };
            penalties.insert(key, points as u32);
        }
    }

    Document {
        version: DOCUMENT_VERSION_V2.to_string(),
        entities: Entities {
            managers,
            seasons,
            matches,
        },
        penalties,
        export_date: None,
    }
}
