//! Order accumulated statistics into a positioned table.

use crate::models::{StandingRow, TeamStats};
use std::collections::BTreeMap;

/// Rank teams into a standings table.
///
/// Teams with zero games played are excluded (they have not entered the
/// competition this season). Ordering is by effective points
/// (`pts - penalty`) descending, then goal difference, then goals scored;
/// a full three-way tie falls back to team name so the result is
/// deterministic. Positions are dense and 1-based. Rows keep the raw `pts` -
/// a penalty can demote a team below an otherwise-inferior rival without
/// touching its displayed record.
pub fn rank<F>(stats: &BTreeMap<String, TeamStats>, penalty: F) -> Vec<StandingRow>
where
    F: Fn(&str) -> u32,
{
    let mut rows: Vec<(i64, StandingRow)> = stats
        .iter()
        .filter(|(_, s)| s.j > 0)
        .map(|(team, s)| {
            let effective = i64::from(s.pts) - i64::from(penalty(team));
            (
                effective,
                StandingRow {
                    position: 0,
                    team: team.clone(),
                    pts: s.pts,
                    j: s.j,
                    g: s.g,
                    n: s.n,
                    p: s.p,
                    bp: s.bp,
                    bc: s.bc,
                    diff: s.diff,
                },
            )
        })
        .collect();
    rows.sort_by(|(ea, a), (eb, b)| {
        eb.cmp(ea)
            .then_with(|| b.diff.cmp(&a.diff))
            .then_with(|| b.bp.cmp(&a.bp))
            .then_with(|| a.team.cmp(&b.team))
    });
    rows.into_iter()
        .enumerate()
        .map(|(i, (_, mut row))| {
            row.position = i as u32 + 1;
            row
        })
        .collect()
}
