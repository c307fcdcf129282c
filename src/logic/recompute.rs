//! Full derived-state recompute: one pass over the current snapshot refreshes
//! every season table and rebuilds champions and pantheon.

use crate::logic::accumulate::accumulate;
use crate::logic::champion::resolve_champion;
use crate::logic::completion::is_season_complete;
use crate::logic::meta::aggregate_meta;
use crate::logic::rank::rank;
use crate::models::{ChampionEntry, Championship, Dataset, PantheonEntry, SeasonKey, StandingRow};
use crate::logic::pantheon::build_pantheon;
use serde::Serialize;

/// Derived views over one dataset snapshot. Replaced wholesale on every
/// recompute so champions and pantheon always reflect the same input state.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DerivedViews {
    /// Every resolved champion, ordered by championship then season.
    pub champions: Vec<ChampionEntry>,
    pub pantheon: Vec<PantheonEntry>,
}

impl DerivedViews {
    /// Chronological list of champions for one championship.
    pub fn palmares(&self, championship: Championship) -> Vec<&ChampionEntry> {
        self.champions
            .iter()
            .filter(|c| c.championship == championship)
            .collect()
    }
}

/// Recompute all derived state from `data`.
///
/// Season entries implied by match data are created, every instance with
/// match data gets its table re-ranked (instances without match data keep
/// their cached table - legacy imports), and champions and pantheon are
/// rebuilt from scratch. Completion is monotonic as long as matchday counts
/// do not decrease, but champion identity is never treated as terminal: a
/// penalty recorded after completion changes the champion on the next pass.
pub fn recompute(data: &mut Dataset) -> DerivedViews {
    let roster = data.manager_names();

    let implied: Vec<SeasonKey> = data
        .matches
        .iter()
        .map(|b| SeasonKey {
            championship: b.championship,
            season: b.season,
        })
        .collect();
    for key in implied {
        data.seasons
            .entry(SeasonKey {
                championship: Championship::LigueDesLigues,
                season: key.season,
            })
            .or_default();
        data.seasons.entry(key).or_default();
    }

    let keys: Vec<SeasonKey> = data.seasons.keys().copied().collect();
    let mut refreshed: Vec<(SeasonKey, Vec<StandingRow>, u32)> = Vec::new();
    for key in keys {
        if key.championship.is_meta() {
            let has_sub_matches = Championship::SUBS
                .iter()
                .any(|c| data.has_matches(*c, key.season));
            if has_sub_matches {
                let meta = aggregate_meta(data, key.season);
                refreshed.push((key, meta.standings, meta.progress.played));
            }
        } else if data.has_matches(key.championship, key.season) {
            let blocks = data.blocks_for(key.championship, key.season);
            let stats = accumulate(&blocks, &roster);
            let table = rank(&stats, |team| {
                data.penalty_for(key.championship, key.season, team)
            });
            let played = data.played_matchdays(key.championship, key.season);
            refreshed.push((key, table, played));
        }
    }
    for (key, standings, played) in refreshed {
        if let Some(entry) = data.seasons.get_mut(&key) {
            entry.standings = standings;
            entry.played_matchdays = played;
        }
    }

    let mut champions: Vec<ChampionEntry> = Vec::new();
    for (key, entry) in &data.seasons {
        let played = data.played_matchdays(key.championship, key.season);
        if !is_season_complete(key.championship, key.season, played) {
            continue;
        }
        let resolved = resolve_champion(key.championship, key.season, &entry.standings, |team| {
            data.penalty_for(key.championship, key.season, team)
        });
        if let Some(champion) = resolved {
            champions.push(champion);
        }
    }

    DerivedViews {
        champions,
        pantheon: build_pantheon(data),
    }
}
