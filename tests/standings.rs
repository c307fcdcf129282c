//! Accumulator and ranker: per-team records, tie-breaks, penalties.

use ligue_scoreboard_web::{accumulate, rank, Championship, MatchdayBlock};
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn block(matchday: u32, games: Vec<Value>) -> MatchdayBlock {
    MatchdayBlock {
        championship: Championship::Printemps,
        season: 1,
        matchday,
        games,
    }
}

fn game(home: &str, away: &str, hs: u32, aws: u32) -> Value {
    json!({ "homeTeam": home, "awayTeam": away, "homeScore": hs, "awayScore": aws })
}

fn roster(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn no_penalty(_: &str) -> u32 {
    0
}

#[test]
fn single_game_records_both_teams() {
    let b = block(1, vec![game("Alice", "Bob", 2, 1)]);
    let stats = accumulate(&[&b], &roster(&["Alice", "Bob"]));

    let home = &stats["Alice"];
    assert_eq!((home.pts, home.j, home.g, home.n, home.p), (3, 1, 1, 0, 0));
    assert_eq!((home.bp, home.bc, home.diff), (2, 1, 1));

    let away = &stats["Bob"];
    assert_eq!((away.pts, away.j, away.g, away.n, away.p), (0, 1, 0, 0, 1));
    assert_eq!((away.bp, away.bc, away.diff), (1, 2, -1));
}

#[test]
fn draws_award_one_point_each() {
    let b = block(1, vec![game("Alice", "Bob", 3, 3)]);
    let stats = accumulate(&[&b], &roster(&["Alice", "Bob"]));
    assert_eq!(stats["Alice"].pts, 1);
    assert_eq!(stats["Bob"].pts, 1);
    assert_eq!(stats["Alice"].n, 1);
}

#[test]
fn accumulation_is_order_independent() {
    let games = [
        game("Alice", "Bob", 2, 0),
        game("Carla", "Dan", 1, 1),
        game("Alice", "Carla", 0, 3),
        game("Bob", "Dan", 2, 2),
        game("Dan", "Alice", 1, 0),
    ];
    let teams = roster(&["Alice", "Bob", "Carla", "Dan"]);

    let forward: Vec<MatchdayBlock> = games
        .iter()
        .enumerate()
        .map(|(i, g)| block(i as u32 + 1, vec![g.clone()]))
        .collect();
    let reversed: Vec<MatchdayBlock> = games
        .iter()
        .rev()
        .enumerate()
        .map(|(i, g)| block(i as u32 + 1, vec![g.clone()]))
        .collect();

    let a = accumulate(&forward.iter().collect::<Vec<_>>(), &teams);
    let b = accumulate(&reversed.iter().collect::<Vec<_>>(), &teams);
    assert_eq!(a, b);
}

#[test]
fn points_and_goals_are_conserved() {
    let b1 = block(1, vec![game("Alice", "Bob", 2, 0), game("Carla", "Dan", 1, 1)]);
    let b2 = block(2, vec![game("Alice", "Carla", 4, 2), game("Bob", "Dan", 0, 0)]);
    let stats = accumulate(&[&b1, &b2], &roster(&["Alice", "Bob", "Carla", "Dan"]));

    let total_pts: u32 = stats.values().map(|s| s.pts).sum();
    // 2 decisive games, 2 draws: 3*2 + 2*2
    assert_eq!(total_pts, 10);
    let total_bp: u32 = stats.values().map(|s| s.bp).sum();
    let total_bc: u32 = stats.values().map(|s| s.bc).sum();
    assert_eq!(total_bp, total_bc);
}

#[test]
fn games_with_missing_or_unusable_scores_are_skipped() {
    let b = block(
        1,
        vec![
            game("Alice", "Bob", 2, 1),
            json!({ "homeTeam": "Carla", "awayTeam": "Dan", "homeScore": null, "awayScore": 2 }),
            json!({ "homeTeam": "Carla", "awayTeam": "Dan", "homeScore": "n/a", "awayScore": 2 }),
            json!({ "homeTeam": "Carla", "awayTeam": "Dan" }),
        ],
    );
    let stats = accumulate(&[&b], &roster(&["Alice", "Bob", "Carla", "Dan"]));
    assert_eq!(stats["Carla"].j, 0);
    assert_eq!(stats["Dan"].j, 0);
    assert_eq!(stats["Alice"].j, 1);
}

#[test]
fn unknown_teams_are_lazily_added() {
    let b = block(1, vec![game("Alice", "Newcomer", 0, 5)]);
    let stats = accumulate(&[&b], &roster(&["Alice"]));
    assert_eq!(stats["Newcomer"].pts, 3);
    assert_eq!(stats["Newcomer"].j, 1);
}

#[test]
fn teams_without_games_are_excluded_from_the_table() {
    let b = block(1, vec![game("Alice", "Bob", 1, 0)]);
    let stats = accumulate(&[&b], &roster(&["Alice", "Bob", "Idle"]));
    let table = rank(&stats, no_penalty);
    assert_eq!(table.len(), 2);
    assert!(table.iter().all(|r| r.team != "Idle"));
}

#[test]
fn goal_difference_then_goals_scored_break_ties() {
    // All three beat a whipping boy once: equal points.
    // Alice wins 4-0 (diff 4), Bob 3-0 (diff 3), Carla 5-2 (diff 3, more scored).
    let b = block(
        1,
        vec![
            game("Alice", "Mule", 4, 0),
            game("Bob", "Mule", 3, 0),
            game("Carla", "Mule", 5, 2),
        ],
    );
    let stats = accumulate(&[&b], &roster(&["Alice", "Bob", "Carla", "Mule"]));
    let table = rank(&stats, no_penalty);
    let order: Vec<&str> = table.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(order, ["Alice", "Carla", "Bob", "Mule"]);
    assert_eq!(
        table.iter().map(|r| r.position).collect::<Vec<_>>(),
        [1, 2, 3, 4]
    );
}

#[test]
fn full_three_way_tie_is_deterministic() {
    // Three identical 1-0 wins over three different opponents.
    let b = block(
        1,
        vec![
            game("Zoe", "Opp1", 1, 0),
            game("Mia", "Opp2", 1, 0),
            game("Ana", "Opp3", 1, 0),
        ],
    );
    let teams = roster(&["Zoe", "Mia", "Ana", "Opp1", "Opp2", "Opp3"]);
    let stats = accumulate(&[&b], &teams);
    let first = rank(&stats, no_penalty);
    let second = rank(&stats, no_penalty);
    assert_eq!(first, second);
    let top: Vec<&str> = first.iter().take(3).map(|r| r.team.as_str()).collect();
    assert_eq!(top, ["Ana", "Mia", "Zoe"]);
}

#[test]
fn penalty_demotes_below_unpenalized_rivals() {
    // Bob loses 1-2 (0 pts, diff -1, bp 1), Carla loses 0-1 (0 pts, diff -1, bp 0):
    // without penalties Bob edges Carla on goals scored.
    let b = block(1, vec![game("Alice", "Bob", 2, 1), game("Dan", "Carla", 1, 0)]);
    let teams = roster(&["Alice", "Bob", "Carla", "Dan"]);
    let stats = accumulate(&[&b], &teams);

    let table = rank(&stats, no_penalty);
    let bob = table.iter().position(|r| r.team == "Bob");
    let carla = table.iter().position(|r| r.team == "Carla");
    assert!(bob < carla);

    // A 5-point penalty drops Bob's effective points to -5, below everyone.
    let table = rank(&stats, |team| if team == "Bob" { 5 } else { 0 });
    assert_eq!(table.last().map(|r| r.team.as_str()), Some("Bob"));
    // Raw record is untouched in the displayed row.
    let bob_row = table.iter().find(|r| r.team == "Bob").unwrap();
    assert_eq!(bob_row.pts, 0);
}

#[test]
fn increasing_a_penalty_never_improves_rank() {
    let b = block(
        1,
        vec![game("Alice", "Bob", 2, 1), game("Carla", "Dan", 1, 1)],
    );
    let teams = roster(&["Alice", "Bob", "Carla", "Dan"]);
    let stats = accumulate(&[&b], &teams);

    let mut last_position = 0usize;
    for penalty in [0u32, 1, 2, 5, 20] {
        let table = rank(&stats, |team| if team == "Alice" { penalty } else { 0 });
        let position = table.iter().position(|r| r.team == "Alice").unwrap();
        assert!(position >= last_position);
        last_position = position;
    }
}

#[test]
fn empty_input_yields_an_empty_table() {
    let stats: BTreeMap<String, ligue_scoreboard_web::TeamStats> = BTreeMap::new();
    assert!(rank(&stats, no_penalty).is_empty());
}
