//! The five championships and their two naming schemes (short code / storage key).

use serde::{Deserialize, Serialize};

/// One of the five competitions. `LigueDesLigues` is the meta-championship:
/// it has no matches of its own and aggregates the four seasonal championships.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Championship {
    #[serde(rename = "ldl", alias = "Ligue des Ligues")]
    LigueDesLigues,
    #[serde(rename = "pri", alias = "Championnat de Printemps")]
    Printemps,
    #[serde(rename = "ete", alias = "Championnat d'Été")]
    Ete,
    #[serde(rename = "aut", alias = "Championnat d'Automne")]
    Automne,
    #[serde(rename = "hiv", alias = "Championnat d'Hiver")]
    Hiver,
}

impl Championship {
    /// Every championship, meta first.
    pub const ALL: [Championship; 5] = [
        Championship::LigueDesLigues,
        Championship::Printemps,
        Championship::Ete,
        Championship::Automne,
        Championship::Hiver,
    ];

    /// The four championships with their own matches, in calendar order.
    pub const SUBS: [Championship; 4] = [
        Championship::Printemps,
        Championship::Ete,
        Championship::Automne,
        Championship::Hiver,
    ];

    /// Short code used in penalty keys and API routes.
    pub fn external_id(self) -> &'static str {
        match self {
            Championship::LigueDesLigues => "ldl",
            Championship::Printemps => "pri",
            Championship::Ete => "ete",
            Championship::Automne => "aut",
            Championship::Hiver => "hiv",
        }
    }

    /// Localized name used in season keys and for display.
    pub fn storage_key(self) -> &'static str {
        match self {
            Championship::LigueDesLigues => "Ligue des Ligues",
            Championship::Printemps => "Championnat de Printemps",
            Championship::Ete => "Championnat d'Été",
            Championship::Automne => "Championnat d'Automne",
            Championship::Hiver => "Championnat d'Hiver",
        }
    }

    pub fn is_meta(self) -> bool {
        matches!(self, Championship::LigueDesLigues)
    }

    /// Resolve from either naming scheme (short code is matched case-insensitively).
    pub fn parse(s: &str) -> Option<Championship> {
        let s = s.trim();
        Championship::ALL
            .iter()
            .copied()
            .find(|c| c.external_id().eq_ignore_ascii_case(s) || c.storage_key() == s)
    }
}

impl std::fmt::Display for Championship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.storage_key())
    }
}
