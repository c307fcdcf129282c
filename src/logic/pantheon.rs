//! All-time trophy roll-up across every season and championship.

use crate::logic::champion::resolve_champion;
use crate::logic::completion::is_season_complete;
use crate::logic::exceptions::dual_champions;
use crate::models::{Championship, Dataset, PantheonEntry};
use std::collections::BTreeMap;

fn zero_counts() -> BTreeMap<Championship, u32> {
    Championship::ALL.iter().map(|c| (*c, 0)).collect()
}

/// Build the pantheon: per-manager trophy counts per championship plus a
/// total, ordered by total descending.
///
/// This is a full recompute over every season-championship entry, safe to
/// re-run on any data change; there is no incremental ledger to drift or
/// double-count. Incomplete seasons contribute nothing. A dual-champion
/// season credits both fixed names with one trophy each, even when a name is
/// no longer in the roster.
pub fn build_pantheon(data: &Dataset) -> Vec<PantheonEntry> {
    let mut counts: BTreeMap<String, BTreeMap<Championship, u32>> = data
        .managers
        .values()
        .map(|m| (m.name.clone(), zero_counts()))
        .collect();

    for (key, entry) in &data.seasons {
        let played = data.played_matchdays(key.championship, key.season);
        if !is_season_complete(key.championship, key.season, played) {
            continue;
        }
        let resolved = resolve_champion(key.championship, key.season, &entry.standings, |team| {
            data.penalty_for(key.championship, key.season, team)
        });
        let Some(champion) = resolved else {
            continue;
        };
        let names: Vec<String> = match dual_champions(key.championship, key.season) {
            Some(dual) => dual.champions.iter().map(|n| n.to_string()).collect(),
            None => vec![champion.champion],
        };
        for name in names {
            *counts
                .entry(name)
                .or_insert_with(zero_counts)
                .entry(key.championship)
                .or_insert(0) += 1;
        }
    }

    let mut entries: Vec<PantheonEntry> = counts
        .into_iter()
        .map(|(manager, per_championship)| {
            let total = per_championship.values().sum();
            PantheonEntry {
                rank: 0,
                manager,
                counts: per_championship,
                total,
            }
        })
        .collect();
    entries.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.manager.cmp(&b.manager)));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
    entries
}
