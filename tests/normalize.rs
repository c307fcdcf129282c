//! Normalizer: legacy field-name fallbacks, null vs absent scores, idempotence.

use ligue_scoreboard_web::normalize;
use serde_json::json;

#[test]
fn current_schema_resolves() {
    let g = normalize(&json!({
        "homeTeam": "Alice", "awayTeam": "Bob",
        "homeScore": 2, "awayScore": 1
    }));
    assert_eq!(g.home_team, "Alice");
    assert_eq!(g.away_team, "Bob");
    assert_eq!(g.home_score, Some(2));
    assert_eq!(g.away_score, Some(1));
}

#[test]
fn legacy_field_names_resolve() {
    let g = normalize(&json!({
        "domicile": "Alice", "exterieur": "Bob",
        "butsDomicile": 4, "butsExterieur": 4
    }));
    assert_eq!(g.home_team, "Alice");
    assert_eq!(g.away_team, "Bob");
    assert_eq!(g.home_score, Some(4));
    assert_eq!(g.away_score, Some(4));

    let oldest = normalize(&json!({
        "joueur1": "Carla", "joueur2": "Dan",
        "score1": "3", "score2": "0"
    }));
    assert_eq!(oldest.home_team, "Carla");
    assert_eq!(oldest.away_team, "Dan");
    assert_eq!(oldest.home_score, Some(3));
    assert_eq!(oldest.away_score, Some(0));
}

#[test]
fn newest_spelling_wins_over_legacy() {
    let g = normalize(&json!({
        "homeTeam": "Alice", "domicile": "Someone Else",
        "awayTeam": "Bob", "joueur2": "Another",
        "homeScore": 1, "score1": 9,
        "awayScore": 0
    }));
    assert_eq!(g.home_team, "Alice");
    assert_eq!(g.away_team, "Bob");
    assert_eq!(g.home_score, Some(1));
}

#[test]
fn absent_fields_default() {
    let g = normalize(&json!({}));
    assert_eq!(g.home_team, "");
    assert_eq!(g.away_team, "");
    assert_eq!(g.home_score, None);
    assert_eq!(g.away_score, None);
}

#[test]
fn null_score_is_present_but_unplayed() {
    // homeScore is present (null), so the legacy spelling must not be consulted.
    let g = normalize(&json!({
        "homeTeam": "Alice", "awayTeam": "Bob",
        "homeScore": null, "scoreDomicile": 3,
        "awayScore": 1
    }));
    assert_eq!(g.home_score, None);
    assert_eq!(g.away_score, Some(1));
}

#[test]
fn numeric_string_scores_parse() {
    let g = normalize(&json!({
        "homeTeam": "Alice", "awayTeam": "Bob",
        "homeScore": " 7 ", "awayScore": "2"
    }));
    assert_eq!(g.home_score, Some(7));
    assert_eq!(g.away_score, Some(2));
}

#[test]
fn unusable_scores_read_as_unplayed() {
    let g = normalize(&json!({
        "homeTeam": "Alice", "awayTeam": "Bob",
        "homeScore": "three", "awayScore": 100
    }));
    assert_eq!(g.home_score, None);
    assert_eq!(g.away_score, None);

    let negative = normalize(&json!({
        "homeTeam": "Alice", "awayTeam": "Bob",
        "homeScore": -1, "awayScore": 0
    }));
    assert_eq!(negative.home_score, None);
}

#[test]
fn normalize_is_idempotent() {
    let raws = [
        json!({ "homeTeam": "Alice", "awayTeam": "Bob", "homeScore": 2, "awayScore": 1 }),
        json!({ "domicile": "Alice", "exterieur": "Bob", "score1": "5", "score2": null }),
        json!({ "joueur1": "Carla" }),
        json!({}),
    ];
    for raw in raws {
        let once = normalize(&raw);
        let twice = normalize(&once.to_raw());
        assert_eq!(once, twice);
    }
}
