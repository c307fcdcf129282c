//! Historical irregularities of the league, kept as data rather than logic.
//!
//! These entries record what actually happened in past seasons. They are
//! configuration to consult, not rules to generalize: the completion
//! evaluator and the champion resolver both read from this one table.

use crate::models::Championship;

/// Matchdays in a regular sub-championship season (10 teams, double
/// round-robin with one exempt team per matchday).
pub const SUB_SEASON_MATCHDAYS: u32 = 18;

/// A season that ran shorter than the regular calendar. Its recorded total
/// replaces the regular one, and the season counts as complete no matter how
/// many matchdays were recorded.
#[derive(Clone, Copy, Debug)]
pub struct ShortenedSeason {
    pub championship: Championship,
    pub season: u32,
    pub matchdays: u32,
}

/// Season 6: the Championnat d'Hiver stopped after 8 matchdays.
pub const SHORTENED_SEASONS: [ShortenedSeason; 1] = [ShortenedSeason {
    championship: Championship::Hiver,
    season: 6,
    matchdays: 8,
}];

pub fn shortened_matchdays(championship: Championship, season: u32) -> Option<u32> {
    SHORTENED_SEASONS
        .iter()
        .find(|s| s.championship == championship && s.season == season)
        .map(|s| s.matchdays)
}

/// A season that ended with two champions sharing the title.
#[derive(Clone, Copy, Debug)]
pub struct DualChampions {
    pub championship: Championship,
    pub season: u32,
    pub champions: [&'static str; 2],
}

/// Season 3 of the Championnat d'Automne finished level on every tiebreak.
pub const DUAL_CHAMPIONS: [DualChampions; 1] = [DualChampions {
    championship: Championship::Automne,
    season: 3,
    champions: ["Nico", "Seb"],
}];

pub fn dual_champions(championship: Championship, season: u32) -> Option<&'static DualChampions> {
    DUAL_CHAMPIONS
        .iter()
        .find(|d| d.championship == championship && d.season == season)
}
