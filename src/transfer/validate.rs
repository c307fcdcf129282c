//! Defensive validation of uploaded files, before anything reaches the
//! dataset. These are checks on untrusted input, not business rules; only
//! the first failure is reported, with a user-facing French message.

use crate::transfer::document::{DOCUMENT_VERSION_V1, DOCUMENT_VERSION_V2};
use serde_json::Value;

/// Uploads larger than this are rejected outright.
pub const MAX_IMPORT_BYTES: usize = 10 * 1024 * 1024;

/// Maximum JSON nesting depth accepted in an upload.
pub const MAX_NESTING_DEPTH: usize = 10;

/// Substrings that disqualify a file: script/eval-injection markers have no
/// place in scoreboard data. Matched case-insensitively against every string
/// value in the document.
const FORBIDDEN_PATTERNS: [&str; 6] = [
    "<script",
    "javascript:",
    "onerror=",
    "onload=",
    "eval(",
    "document.cookie",
];

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImportError {
    TooLarge,
    InvalidJson,
    NotAnObject,
    UnsupportedVersion(String),
    InvalidStructure(&'static str),
    ForbiddenContent,
    TooDeep,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::TooLarge => write!(f, "Fichier trop volumineux (maximum 10 Mo)"),
            ImportError::InvalidJson => write!(f, "Fichier JSON invalide"),
            ImportError::NotAnObject => write!(f, "Format de fichier invalide"),
            ImportError::UnsupportedVersion(v) => {
                write!(f, "Version de fichier non supportée: {v}")
            }
            ImportError::InvalidStructure(field) => {
                write!(f, "Structure de fichier invalide: {field}")
            }
            ImportError::ForbiddenContent => write!(f, "Contenu non autorisé détecté"),
            ImportError::TooDeep => write!(f, "Structure imbriquée trop profonde"),
        }
    }
}

/// Run every check in order and hand back the parsed root on success.
pub fn validate_payload(raw: &[u8]) -> Result<Value, ImportError> {
    if raw.len() > MAX_IMPORT_BYTES {
        return Err(ImportError::TooLarge);
    }
    let value: Value = serde_json::from_slice(raw).map_err(|_| ImportError::InvalidJson)?;
    let root = value.as_object().ok_or(ImportError::NotAnObject)?;
    let version = root.get("version").and_then(Value::as_str).unwrap_or("");
    if version != DOCUMENT_VERSION_V1 && version != DOCUMENT_VERSION_V2 {
        return Err(ImportError::UnsupportedVersion(version.to_string()));
    }
    if version == DOCUMENT_VERSION_V2 {
        let entities = root
            .get("entities")
            .and_then(Value::as_object)
            .ok_or(ImportError::InvalidStructure("entities"))?;
        if !entities.get("managers").map_or(true, Value::is_object) {
            return Err(ImportError::InvalidStructure("managers"));
        }
        if !entities.get("seasons").map_or(true, Value::is_object) {
            return Err(ImportError::InvalidStructure("seasons"));
        }
        if !entities.get("matches").map_or(true, Value::is_array) {
            return Err(ImportError::InvalidStructure("matches"));
        }
    }
    scan_forbidden(&value)?;
    check_depth(&value, 1)?;
    Ok(value)
}

fn scan_forbidden(value: &Value) -> Result<(), ImportError> {
    match value {
        Value::String(s) => {
            let lowered = s.to_lowercase();
            if FORBIDDEN_PATTERNS.iter().any(|p| lowered.contains(p)) {
                return Err(ImportError::ForbiddenContent);
            }
        }
        Value::Array(items) => {
            for item in items {
                scan_forbidden(item)?;
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                scan_forbidden(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn check_depth(value: &Value, depth: usize) -> Result<(), ImportError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(ImportError::TooDeep);
    }
    match value {
        Value::Array(items) => {
            for item in items {
                check_depth(item, depth + 1)?;
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                check_depth(item, depth + 1)?;
            }
        }
        _ => {}
    }
    Ok(())
}
