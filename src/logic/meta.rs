//! The Ligue des Ligues: a synthesized competition summing the four
//! sub-championships of one season. It has no matches of its own.

use crate::logic::accumulate::accumulate;
use crate::logic::completion::{season_progress, SeasonProgress};
use crate::logic::rank::rank;
use crate::models::{Championship, Dataset, StandingRow, TeamStats};
use serde::Serialize;
use std::collections::BTreeMap;

/// Meta-championship view for one season: the summed table, a per-team
/// breakdown of where the points came from (display only, never ranked on),
/// and overall progress.
#[derive(Clone, Debug, Serialize)]
pub struct MetaStandings {
    pub standings: Vec<StandingRow>,
    pub breakdown: BTreeMap<String, BTreeMap<Championship, u32>>,
    pub progress: SeasonProgress,
}

/// Aggregate the four sub-championships of `season` into the meta table.
///
/// Each sub-championship is accumulated independently over its own matches,
/// then every counter is summed per team; `diff` is recomputed from the
/// summed goal totals inside the merge rather than carried over. Ranking uses
/// the meta-championship's own penalty namespace. Progress counts the total
/// matchdays recorded across all four sub-championships.
pub fn aggregate_meta(data: &Dataset, season: u32) -> MetaStandings {
    let roster = data.manager_names();
    let mut summed: BTreeMap<String, TeamStats> = roster
        .iter()
        .map(|team| (team.clone(), TeamStats::default()))
        .collect();
    let mut breakdown: BTreeMap<String, BTreeMap<Championship, u32>> = BTreeMap::new();

    for championship in Championship::SUBS {
        let blocks = data.blocks_for(championship, season);
        let stats = accumulate(&blocks, &roster);
        for (team, team_stats) in &stats {
            summed.entry(team.clone()).or_default().absorb(team_stats);
            breakdown
                .entry(team.clone())
                .or_default()
                .insert(championship, team_stats.pts);
        }
    }
    breakdown.retain(|team, _| summed.get(team).map(|s| s.j > 0).unwrap_or(false));

    let standings = rank(&summed, |team| {
        data.penalty_for(Championship::LigueDesLigues, season, team)
    });
    let played = data.played_matchdays(Championship::LigueDesLigues, season);
    MetaStandings {
        standings,
        breakdown,
        progress: season_progress(Championship::LigueDesLigues, season, played),
    }
}
