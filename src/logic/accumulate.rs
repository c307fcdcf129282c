//! Fold matchday blocks of one competition-instance into per-team statistics.

use crate::logic::normalize::normalize;
use crate::models::{MatchdayBlock, TeamStats};
use std::collections::BTreeMap;

/// Accumulate every playable game in `blocks` into per-team records.
///
/// Every roster team starts at zero so teams that have not played yet are
/// still addressable by callers. Games missing a score (or carrying an
/// unparseable one) are skipped; teams found in game data but absent from the
/// roster are added lazily with zeroed stats rather than dropped, so a stale
/// roster cannot silently lose results. Addition is commutative, so the final
/// figures do not depend on block or game order.
pub fn accumulate(blocks: &[&MatchdayBlock], roster: &[String]) -> BTreeMap<String, TeamStats> {
    let mut stats: BTreeMap<String, TeamStats> = roster
        .iter()
        .map(|team| (team.clone(), TeamStats::default()))
        .collect();
    for block in blocks {
        for raw in &block.games {
            let game = normalize(raw);
            let (Some(home_score), Some(away_score)) = (game.home_score, game.away_score) else {
                continue;
            };
            if game.home_team.is_empty() || game.away_team.is_empty() {
                continue;
            }
            stats
                .entry(game.home_team)
                .or_default()
                .record(home_score, away_score);
            stats
                .entry(game.away_team)
                .or_default()
                .record(away_score, home_score);
        }
    }
    stats
}
