//! Season completion: regular totals, the shortened season, meta progress.

use ligue_scoreboard_web::{
    is_season_complete, season_progress, total_matchdays, Championship, SUB_SEASON_MATCHDAYS,
};

#[test]
fn sub_championship_completes_at_eighteen() {
    assert_eq!(SUB_SEASON_MATCHDAYS, 18);
    assert!(is_season_complete(Championship::Printemps, 2, 18));
    assert!(!is_season_complete(Championship::Printemps, 2, 17));
    assert!(is_season_complete(Championship::Printemps, 2, 19));
}

#[test]
fn shortened_winter_season_is_always_complete() {
    // Season 6 of the Championnat d'Hiver stopped after 8 matchdays.
    assert_eq!(total_matchdays(Championship::Hiver, 6), 8);
    assert!(is_season_complete(Championship::Hiver, 6, 8));
    // The override is unconditional: recorded history is all there will be.
    assert!(is_season_complete(Championship::Hiver, 6, 3));
    // Other winter seasons follow the regular calendar.
    assert!(!is_season_complete(Championship::Hiver, 5, 8));
    assert!(is_season_complete(Championship::Hiver, 5, 18));
}

#[test]
fn meta_total_sums_the_four_sub_championships() {
    assert_eq!(total_matchdays(Championship::LigueDesLigues, 5), 72);
    // The shortened winter season lowers the season-6 meta total.
    assert_eq!(total_matchdays(Championship::LigueDesLigues, 6), 62);
}

#[test]
fn meta_progress_rounds_to_whole_percent() {
    // 18 + 18 + 18 + 17 matchdays across the four sub-championships.
    let progress = season_progress(Championship::LigueDesLigues, 5, 71);
    assert_eq!(progress.played, 71);
    assert_eq!(progress.total, 72);
    assert_eq!(progress.percent, 99);
    assert!(!progress.complete);

    let done = season_progress(Championship::LigueDesLigues, 5, 72);
    assert_eq!(done.percent, 100);
    assert!(done.complete);
}

#[test]
fn meta_is_incomplete_one_matchday_short() {
    assert!(!is_season_complete(Championship::LigueDesLigues, 5, 71));
    assert!(is_season_complete(Championship::LigueDesLigues, 5, 72));
    assert!(is_season_complete(Championship::LigueDesLigues, 6, 62));
    assert!(!is_season_complete(Championship::LigueDesLigues, 6, 61));
}
