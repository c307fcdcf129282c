//! Import validation, legacy upgrade, export round-trip, key formats.

use chrono::Utc;
use ligue_scoreboard_web::{
    import_dataset, Championship, Dataset, Document, ImportError, PenaltyKey, SeasonKey,
    MAX_IMPORT_BYTES,
};
use serde_json::json;

fn import(value: serde_json::Value) -> Result<Dataset, ImportError> {
    import_dataset(value.to_string().as_bytes())
}

#[test]
fn oversized_payloads_are_rejected_before_parsing() {
    let raw = vec![b' '; MAX_IMPORT_BYTES + 1];
    assert_eq!(import_dataset(&raw), Err(ImportError::TooLarge));
}

#[test]
fn root_must_be_an_object() {
    assert_eq!(import(json!([1, 2, 3])), Err(ImportError::NotAnObject));
    assert_eq!(
        import_dataset(b"not json at all"),
        Err(ImportError::InvalidJson)
    );
}

#[test]
fn unknown_versions_are_rejected() {
    assert_eq!(
        import(json!({ "version": "3.0", "entities": {} })),
        Err(ImportError::UnsupportedVersion("3.0".to_string()))
    );
    assert_eq!(
        import(json!({ "entities": {} })),
        Err(ImportError::UnsupportedVersion(String::new()))
    );
}

#[test]
fn entity_containers_must_have_the_right_shape() {
    assert_eq!(
        import(json!({ "version": "2.0" })),
        Err(ImportError::InvalidStructure("entities"))
    );
    assert_eq!(
        import(json!({ "version": "2.0", "entities": { "managers": [] } })),
        Err(ImportError::InvalidStructure("managers"))
    );
    assert_eq!(
        import(json!({ "version": "2.0", "entities": { "matches": {} } })),
        Err(ImportError::InvalidStructure("matches"))
    );
}

#[test]
fn script_content_is_rejected_anywhere_in_the_document() {
    let err = import(json!({
        "version": "2.0",
        "entities": {
            "managers": {
                "x-1": { "id": "x-1", "name": "<script>alert(1)</script>" }
            }
        }
    }))
    .unwrap_err();
    assert_eq!(err, ImportError::ForbiddenContent);
    assert!(err.to_string().contains("Contenu non autorisé détecté"));
}

#[test]
fn excessive_nesting_is_rejected() {
    let mut value = json!("1");
    for _ in 0..12 {
        value = json!({ "a": value });
    }
    let mut root = serde_json::Map::new();
    root.insert("version".to_string(), json!("2.0"));
    root.insert("entities".to_string(), json!({}));
    root.insert("extra".to_string(), value);
    assert_eq!(
        import(serde_json::Value::Object(root)),
        Err(ImportError::TooDeep)
    );
}

#[test]
fn legacy_v1_files_upgrade_on_import() {
    let data = import(json!({
        "version": "1.0",
        "managers": ["Alice", { "name": "Bob" }, 42],
        "matches": [
            {
                "championship": "pri",
                "season": 1,
                "matchday": 1,
                "games": [{ "joueur1": "Alice", "joueur2": "Bob", "score1": 2, "score2": 1 }]
            },
            "garbage entry"
        ],
        "penalties": { "pri_1_Alice": 3, "not a key": 9 }
    }))
    .unwrap();

    let names: Vec<&str> = data.managers.values().map(|m| m.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Alice") && names.contains(&"Bob"));
    assert_eq!(data.matches.len(), 1);
    assert_eq!(data.matches[0].championship, Championship::Printemps);
    let key = PenaltyKey {
        championship: Championship::Printemps,
        season: 1,
        team: "Alice".to_string(),
    };
    assert_eq!(data.penalties.get(&key), Some(&3));
    assert_eq!(data.penalties.len(), 1);
}

#[test]
fn export_then_import_round_trips() {
    let mut data = Dataset::default();
    data.add_manager("Alice").unwrap();
    data.add_manager("Bob").unwrap();
    data.upsert_block(
        Championship::Automne,
        3,
        1,
        vec![json!({ "homeTeam": "Alice", "awayTeam": "Bob", "homeScore": 1, "awayScore": 1 })],
    )
    .unwrap();
    data.set_penalty(
        PenaltyKey {
            championship: Championship::LigueDesLigues,
            season: 3,
            team: "Bob".to_string(),
        },
        2,
    );
    data.set_exempt_team(3, Some("Alice".to_string()));

    let exported = Document::export(&data, Utc::now());
    assert!(exported.export_date.is_some());
    let raw = serde_json::to_vec(&exported).unwrap();
    let restored = import_dataset(&raw).unwrap();

    assert_eq!(restored.managers, data.managers);
    assert_eq!(restored.seasons, data.seasons);
    assert_eq!(restored.matches, data.matches);
    assert_eq!(restored.penalties, data.penalties);
}

#[test]
fn season_and_penalty_keys_use_their_naming_schemes() {
    let season_key = SeasonKey {
        championship: Championship::Automne,
        season: 3,
    };
    assert_eq!(season_key.to_string(), "Championnat d'Automne_s3");
    assert_eq!(
        "Championnat d'Automne_s3".parse::<SeasonKey>().unwrap(),
        season_key
    );
    // The short code parses too.
    assert_eq!("aut_s3".parse::<SeasonKey>().unwrap(), season_key);

    let penalty_key = PenaltyKey {
        championship: Championship::Automne,
        season: 3,
        team: "Jean_Pierre".to_string(),
    };
    assert_eq!(penalty_key.to_string(), "aut_3_Jean_Pierre");
    // Underscores in the team name survive parsing.
    assert_eq!("aut_3_Jean_Pierre".parse::<PenaltyKey>().unwrap(), penalty_key);

    assert!("nope_s1".parse::<SeasonKey>().is_err());
    assert!("aut_x_Team".parse::<PenaltyKey>().is_err());
}
