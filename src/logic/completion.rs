//! Decide whether a competition-instance's season is finished.

use crate::logic::exceptions::{shortened_matchdays, SUB_SEASON_MATCHDAYS};
use crate::models::Championship;
use serde::Serialize;

/// Scheduled matchdays for one competition-instance. The meta-championship's
/// total is the sum over its four sub-championships, so a shortened sub
/// season (Hiver, season 6: 8 instead of 18) lowers the meta total for that
/// season as well (62 instead of 72).
pub fn total_matchdays(championship: Championship, season: u32) -> u32 {
    if championship.is_meta() {
        Championship::SUBS
            .iter()
            .map(|c| total_matchdays(*c, season))
            .sum()
    } else {
        shortened_matchdays(championship, season).unwrap_or(SUB_SEASON_MATCHDAYS)
    }
}

/// A season is complete when its recorded matchdays reach the scheduled
/// total. A sub-championship season listed in the shortened-season table is
/// complete unconditionally: the recorded history of such a season is all
/// there will ever be.
pub fn is_season_complete(championship: Championship, season: u32, played: u32) -> bool {
    if !championship.is_meta() && shortened_matchdays(championship, season).is_some() {
        return true;
    }
    played >= total_matchdays(championship, season)
}

/// Progress of one competition-instance, for display.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SeasonProgress {
    pub played: u32,
    pub total: u32,
    pub percent: u32,
    pub complete: bool,
}

pub fn season_progress(championship: Championship, season: u32, played: u32) -> SeasonProgress {
    let total = total_matchdays(championship, season);
    let percent = if total == 0 {
        0
    } else {
        ((f64::from(played) * 100.0 / f64::from(total)).round() as u32).min(100)
    };
    SeasonProgress {
        played,
        total,
        percent,
        complete: is_season_complete(championship, season, played),
    }
}
