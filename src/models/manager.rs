//! Manager (team) identity: generated slug id + display name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a manager name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// A manager (team). The id is generated once from the name and stays stable
/// across renames; match records and penalty keys reference the name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Manager {
    /// Create a manager with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = generate_id(&name);
        Self { id, name }
    }
}

/// 1-50 characters; letters (accented included), digits, space, `-`, `'`, `_`.
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LENGTH {
        return false;
    }
    trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '\'' | '_'))
}

/// Slugified name plus a short random suffix so two managers who ever shared
/// a name (e.g. after a rename) cannot collide on id.
pub fn generate_id(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let suffix = Uuid::new_v4().simple().to_string();
    if slug.is_empty() {
        suffix[..8].to_string()
    } else {
        format!("{}-{}", slug, &suffix[..8])
    }
}
