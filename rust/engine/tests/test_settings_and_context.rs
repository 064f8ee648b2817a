use holdem_engine::deck::Deck;
use holdem_engine::engine::Engine;
use holdem_engine::errors::ConfigError;
use holdem_engine::player::ActionKind;
use holdem_engine::settings::Settings;
use serde_json::Value;

#[test]
fn settings_validation() {
    assert_eq!(Settings::new(0, 10, 20), Err(ConfigError::ZeroChips));
    assert_eq!(
        Settings::new(1000, 0, 20),
        Err(ConfigError::NonPositiveBlind { small: 0, big: 20 })
    );
    assert_eq!(
        Settings::new(1000, 20, 20),
        Err(ConfigError::BlindOrder { small: 20, big: 20 })
    );
    assert_eq!(Settings::default(), Settings::new(1000, 10, 20).unwrap());
}

#[test]
fn settings_from_json_accept_both_spellings() {
    let a = Settings::from_json(r#"{"chips": 500, "blinds": [5, 10]}"#).unwrap();
    let b = Settings::from_json(r#"{"chips": 500, "blindes": [5, 10]}"#).unwrap();
    assert_eq!(a, b);
    assert!(matches!(Settings::from_json("{\"chips\": 500}"), Err(ConfigError::Parse(_))));
    assert!(matches!(Settings::from_json("not json"), Err(ConfigError::Parse(_))));
}

#[test]
fn engine_rejects_invalid_settings() {
    let settings = Settings {
        chips: 100,
        blinds: [50, 10],
    };
    let engine = Engine::new(settings, vec!["a", "b"], vec![0, 1], Deck::new_with_seed(1));
    assert_eq!(engine.unwrap_err(), ConfigError::BlindOrder { small: 50, big: 10 });
}

#[test]
fn context_serializes_the_whole_table() {
    let mut engine = Engine::new(Settings::default(), vec!["ann", "bob"], vec![0, 1], Deck::new_with_seed(5)).unwrap();
    let context = engine.new_round();
    let json: Value = serde_json::from_str(&context.to_json().unwrap()).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["round"], 1);
    assert_eq!(json["point"], "ACTION_NEEDED");
    assert_eq!(json["state"], "NORMAL");
    assert_eq!(json["stage"]["name"], "PRE_FLOP");
    assert_eq!(json["stage"]["depth"], 0);
    assert_eq!(json["bank"], 30);
    assert_eq!(json["current_player"], "bob");
    assert_eq!(json["last_action"]["identifier"], "ann");
    assert_eq!(json["last_action"]["kind"], "blind_bet");
    assert_eq!(json["last_action"]["bet"], 20);
    assert!(json["result"].is_null());
    assert!(json.get("error").is_none());

    let players = json["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    for player in players {
        assert_eq!(player["cards"].as_array().unwrap().len(), 2);
        assert_eq!(player["involved"], true);
    }
    assert_eq!(players[1]["abilities"]["call"], 10);
    assert_eq!(players[1]["abilities"]["raise"]["min"], 11);
}

#[test]
fn failed_context_only_carries_the_reason() {
    let mut engine = Engine::new(Settings::default(), vec!["ann", "bob"], vec![0, 1], Deck::new_with_seed(5)).unwrap();
    let context = engine.action(ActionKind::Check, 0);
    let json: Value = serde_json::from_str(&context.to_json().unwrap()).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["description"], "No player action is expected now");
    assert!(json.get("players").is_none());
}

#[test]
fn snapshot_marks_folded_players() {
    let mut engine = Engine::new(
        Settings::default(),
        vec!["a", "b", "c"],
        vec![0, 1, 2],
        Deck::new_with_seed(9),
    )
    .unwrap();
    engine.new_round();
    let actor = engine.snapshot().current_player.unwrap();
    engine.action(ActionKind::Fold, 0);
    let snapshot = engine.snapshot();
    assert!(!snapshot.player(&actor).unwrap().involved);
    assert_eq!(snapshot.players.iter().filter(|p| p.involved).count(), 2);
}
