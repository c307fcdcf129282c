//! Pick the champion of a completed competition-instance.

use crate::logic::exceptions::dual_champions;
use crate::models::{ChampionEntry, Championship, StandingRow};

/// Resolve the champion from a completed instance's standings.
///
/// The cached table may have been ranked before the latest penalty was
/// recorded, so the rows are re-sorted here by effective points and goal
/// difference instead of trusting their stored positions. A season listed in
/// the dual-champions table short-circuits to its two fixed names, joined by
/// " / ", carrying the first cached row's raw points.
pub fn resolve_champion<F>(
    championship: Championship,
    season: u32,
    standings: &[StandingRow],
    penalty: F,
) -> Option<ChampionEntry>
where
    F: Fn(&str) -> u32,
{
    if let Some(dual) = dual_champions(championship, season) {
        let points = standings.first().map(|r| i64::from(r.pts)).unwrap_or(0);
        return Some(ChampionEntry {
            championship,
            season,
            champion: format!("{} / {}", dual.champions[0], dual.champions[1]),
            runner_up: None,
            points,
        });
    }
    if standings.is_empty() {
        return None;
    }
    let mut rows: Vec<(i64, &StandingRow)> = standings
        .iter()
        .map(|row| (i64::from(row.pts) - i64::from(penalty(&row.team)), row))
        .collect();
    rows.sort_by(|(ea, a), (eb, b)| {
        eb.cmp(ea)
            .then_with(|| b.diff.cmp(&a.diff))
            .then_with(|| a.team.cmp(&b.team))
    });
    let (points, top) = rows[0];
    Some(ChampionEntry {
        championship,
        season,
        champion: top.team.clone(),
        runner_up: rows.get(1).map(|(_, row)| row.team.clone()),
        points,
    })
}
