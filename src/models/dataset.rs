//! Dataset snapshot and the single mutation surface over it.
//!
//! All derived views (standings, champions, pantheon) are pure functions of
//! one `Dataset`; every admin edit goes through one of the methods here and
//! is followed by a full recompute, so no derived state is ever patched in
//! place.

use crate::models::championship::Championship;
use crate::models::game::{
    raw_team_pair, MatchdayBlock, AWAY_TEAM_KEYS, HOME_TEAM_KEYS, MAX_GAMES_PER_MATCHDAY,
};
use crate::models::manager::{self, Manager};
use crate::models::season::{PenaltyKey, SeasonEntry, SeasonKey};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Errors that can occur while mutating the dataset.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Name is empty, too long, or uses characters outside the allowed set.
    InvalidManagerName,
    /// A manager with this name already exists (names are unique, case-insensitive).
    DuplicateManagerName,
    /// Manager id not found.
    ManagerNotFound(String),
    /// Championship route segment matched neither naming scheme.
    UnknownChampionship(String),
    /// The meta-championship aggregates the four others and has no matches of its own.
    MetaChampionshipHasNoMatches,
    /// Matchdays are numbered from 1.
    InvalidMatchday,
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::InvalidManagerName => {
                write!(f, "Manager name must be 1-50 letters, digits, spaces, - ' or _")
            }
            LeagueError::DuplicateManagerName => {
                write!(f, "A manager with this name already exists")
            }
            LeagueError::ManagerNotFound(id) => write!(f, "Manager not found: {id}"),
            LeagueError::UnknownChampionship(s) => write!(f, "Unknown championship: {s}"),
            LeagueError::MetaChampionshipHasNoMatches => {
                write!(f, "The Ligue des Ligues has no matches of its own")
            }
            LeagueError::InvalidMatchday => write!(f, "Matchday must be 1 or greater"),
        }
    }
}

/// The full in-memory dataset: source-of-truth entities plus cached season
/// tables. Derived champion and pantheon views live outside this struct.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct Dataset {
    /// Managers by id.
    pub managers: BTreeMap<String, Manager>,
    /// Season entries by (championship, season).
    pub seasons: BTreeMap<SeasonKey, SeasonEntry>,
    /// Matchday blocks; at most one per (championship, season, matchday).
    pub matches: Vec<MatchdayBlock>,
    /// Point deductions, applied at ranking time only.
    pub penalties: BTreeMap<PenaltyKey, u32>,
}

impl Dataset {
    /// Roster of display names, in id order.
    pub fn manager_names(&self) -> Vec<String> {
        self.managers.values().map(|m| m.name.clone()).collect()
    }

    pub fn find_manager_by_name(&self, name: &str) -> Option<&Manager> {
        self.managers
            .values()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Add a manager. Names are unique (case-insensitive) and validated.
    pub fn add_manager(&mut self, name: &str) -> Result<Manager, LeagueError> {
        let name = name.trim();
        if !manager::is_valid_name(name) {
            return Err(LeagueError::InvalidManagerName);
        }
        if self.find_manager_by_name(name).is_some() {
            return Err(LeagueError::DuplicateManagerName);
        }
        let created = Manager::new(name);
        self.managers.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    /// Rename a manager. The id stays stable; the new name is cascaded to
    /// every match record (whatever generation of field names it uses), to
    /// season exempt-team references, and to penalty keys. Cached standings
    /// carry the old name until the next recompute over match data.
    pub fn rename_manager(&mut self, id: &str, new_name: &str) -> Result<(), LeagueError> {
        let new_name = new_name.trim();
        if !manager::is_valid_name(new_name) {
            return Err(LeagueError::InvalidManagerName);
        }
        if self
            .managers
            .values()
            .any(|m| m.id != id && m.name.eq_ignore_ascii_case(new_name))
        {
            return Err(LeagueError::DuplicateManagerName);
        }
        let old_name = match self.managers.get_mut(id) {
            Some(m) => {
                let old = m.name.clone();
                m.name = new_name.to_string();
                old
            }
            None => return Err(LeagueError::ManagerNotFound(id.to_string())),
        };
        if old_name == new_name {
            return Ok(());
        }

        for block in &mut self.matches {
            for game in &mut block.games {
                if let Some(obj) = game.as_object_mut() {
                    for key in HOME_TEAM_KEYS.iter().chain(AWAY_TEAM_KEYS.iter()) {
                        if obj.get(*key).and_then(Value::as_str) == Some(old_name.as_str()) {
                            obj.insert((*key).to_string(), Value::String(new_name.to_string()));
                        }
                    }
                }
            }
        }
        for entry in self.seasons.values_mut() {
            if entry.exempt_team.as_deref() == Some(old_name.as_str()) {
                entry.exempt_team = Some(new_name.to_string());
            }
        }
        let penalties = std::mem::take(&mut self.penalties);
        self.penalties = penalties
            .into_iter()
            .map(|(mut key, points)| {
                if key.team == old_name {
                    key.team = new_name.to_string();
                }
                (key, points)
            })
            .collect();
        Ok(())
    }

    /// Delete a manager. Removes its participation references (penalties,
    /// exempt-team entries); historical match records are left untouched.
    pub fn delete_manager(&mut self, id: &str) -> Result<Manager, LeagueError> {
        let removed = self
            .managers
            .remove(id)
            .ok_or_else(|| LeagueError::ManagerNotFound(id.to_string()))?;
        self.penalties.retain(|key, _| key.team != removed.name);
        for entry in self.seasons.values_mut() {
            if entry.exempt_team.as_deref() == Some(removed.name.as_str()) {
                entry.exempt_team = None;
            }
        }
        Ok(removed)
    }

    /// Replace (or create) the block for one (championship, season, matchday).
    ///
    /// Games are sanitized on the way in: a team appears at most once per
    /// block (keep-first when the same pairing or team shows up again) and at
    /// most 5 games are kept.
    pub fn upsert_block(
        &mut self,
        championship: Championship,
        season: u32,
        matchday: u32,
        games: Vec<Value>,
    ) -> Result<(), LeagueError> {
        if championship.is_meta() {
            return Err(LeagueError::MetaChampionshipHasNoMatches);
        }
        if matchday == 0 {
            return Err(LeagueError::InvalidMatchday);
        }
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut kept: Vec<Value> = Vec::new();
        for game in games {
            if kept.len() >= MAX_GAMES_PER_MATCHDAY {
                break;
            }
            let (home, away) = raw_team_pair(&game);
            if (!home.is_empty() && seen.contains(&home))
                || (!away.is_empty() && seen.contains(&away))
            {
                continue;
            }
            if !home.is_empty() {
                seen.insert(home);
            }
            if !away.is_empty() {
                seen.insert(away);
            }
            kept.push(game);
        }
        match self.matches.iter_mut().find(|b| {
            b.championship == championship && b.season == season && b.matchday == matchday
        }) {
            Some(block) => block.games = kept,
            None => self.matches.push(MatchdayBlock {
                championship,
                season,
                matchday,
                games: kept,
            }),
        }
        Ok(())
    }

    /// Set a penalty; an existing value for the same key is overwritten.
    /// The team does not have to exist in the roster.
    pub fn set_penalty(&mut self, key: PenaltyKey, points: u32) {
        self.penalties.insert(key, points);
    }

    pub fn remove_penalty(&mut self, key: &PenaltyKey) -> Option<u32> {
        self.penalties.remove(key)
    }

    /// Penalty for one team in one competition-instance; 0 when none is set.
    pub fn penalty_for(&self, championship: Championship, season: u32, team: &str) -> u32 {
        self.penalties
            .get(&PenaltyKey {
                championship,
                season,
                team: team.to_string(),
            })
            .copied()
            .unwrap_or(0)
    }

    /// Ensure a season entry exists. Idempotent.
    pub fn create_season(&mut self, championship: Championship, season: u32) {
        self.seasons
            .entry(SeasonKey { championship, season })
            .or_default();
    }

    /// Set (or clear) the exempt team of one season. The bye team is shared
    /// across the four sub-championships; the meta entry carries none.
    pub fn set_exempt_team(&mut self, season: u32, team: Option<String>) {
        for championship in Championship::SUBS {
            self.seasons
                .entry(SeasonKey { championship, season })
                .or_default()
                .exempt_team = team.clone();
        }
    }

    /// Match blocks of one competition-instance, in matchday order.
    pub fn blocks_for(&self, championship: Championship, season: u32) -> Vec<&MatchdayBlock> {
        let mut blocks: Vec<&MatchdayBlock> = self
            .matches
            .iter()
            .filter(|b| b.championship == championship && b.season == season)
            .collect();
        blocks.sort_by_key(|b| b.matchday);
        blocks
    }

    pub fn has_matches(&self, championship: Championship, season: u32) -> bool {
        self.matches
            .iter()
            .any(|b| b.championship == championship && b.season == season)
    }

    /// Matchdays recorded as played: the highest matchday index present in
    /// the instance's blocks. Falls back to the cached season entry when the
    /// dataset holds no blocks (legacy imports carry tables without matches).
    /// For the meta-championship this is the sum over the four
    /// sub-championships.
    pub fn played_matchdays(&self, championship: Championship, season: u32) -> u32 {
        if championship.is_meta() {
            let summed: u32 = Championship::SUBS
                .iter()
                .map(|c| self.played_matchdays(*c, season))
                .sum();
            if summed > 0 {
                return summed;
            }
            return self
                .seasons
                .get(&SeasonKey { championship, season })
                .map(|e| e.played_matchdays)
                .unwrap_or(0);
        }
        let recorded = self
            .matches
            .iter()
            .filter(|b| b.championship == championship && b.season == season)
            .map(|b| b.matchday)
            .max();
        match recorded {
            Some(matchday) => matchday,
            None => self
                .seasons
                .get(&SeasonKey { championship, season })
                .map(|e| e.played_matchdays)
                .unwrap_or(0),
        }
    }

    /// Upsert another dataset into this one: managers by id, season entries
    /// by key, blocks by (championship, season, matchday), penalties by key.
    pub fn merge(&mut self, incoming: Dataset) {
        self.managers.extend(incoming.managers);
        self.seasons.extend(incoming.seasons);
        for block in incoming.matches {
            match self.matches.iter_mut().find(|b| {
                b.championship == block.championship
                    && b.season == block.season
                    && b.matchday == block.matchday
            }) {
                Some(existing) => *existing = block,
                None => self.matches.push(block),
            }
        }
        self.penalties.extend(incoming.penalties);
    }
}
