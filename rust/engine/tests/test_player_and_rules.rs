use holdem_engine::errors::ActionError;
use holdem_engine::player::{Action, ActionKind, Player};
use holdem_engine::rules::{abilities, validate_action, RaiseRange, ValidatedAction};

fn seated(chips: u32) -> Player<&'static str> {
    let mut player = Player::new("sam");
    player.add_chips(chips);
    player
}

#[test]
fn action_kinds_round_trip_their_constants() {
    for kind in ActionKind::ALL {
        assert_eq!(kind.as_str().parse::<ActionKind>(), Ok(kind));
    }
    assert_eq!("all-in".parse::<ActionKind>(), Ok(ActionKind::AllIn));
    assert_eq!(
        "shove".parse::<ActionKind>(),
        Err(ActionError::UnknownKind("shove".to_string()))
    );
    assert_eq!(serde_json::to_string(&ActionKind::BlindBet).unwrap(), "\"blind_bet\"");
}

#[test]
fn abilities_when_stack_can_not_cover_the_bet() {
    let short = abilities(100, 300);
    assert_eq!(short.raise, RaiseRange::default());
    assert!(short.raise.is_empty());
    assert_eq!(short.call, 100);
    assert!(!short.check);

    let exact = abilities(300, 300);
    assert!(exact.raise.is_empty());
    assert_eq!(exact.call, 300);
}

#[test]
fn validation_errors() {
    let menu = abilities(1000, 50);
    assert_eq!(
        validate_action(1000, 50, &menu, ActionKind::AllIn, 1000),
        Err(ActionError::UnsupportedKind(ActionKind::AllIn))
    );
    assert_eq!(
        validate_action(1000, 50, &menu, ActionKind::Raise, 0),
        Err(ActionError::ZeroBet(ActionKind::Raise))
    );
    assert_eq!(
        validate_action(1000, 50, &menu, ActionKind::Raise, 50),
        Err(ActionError::RaiseRange { bet: 50, min: 51, max: 1000 })
    );
    assert_eq!(
        validate_action(1000, 50, &menu, ActionKind::Check, 0),
        Err(ActionError::CheckUnavailable { dif: 50 })
    );

    let open = abilities(1000, 0);
    assert_eq!(
        validate_action(1000, 0, &open, ActionKind::Call, 0),
        Err(ActionError::CallUnavailable)
    );
    assert_eq!(validate_action(1000, 0, &open, ActionKind::Fold, 0), Ok(ValidatedAction::Fold));
}

#[test]
fn short_call_becomes_all_in() {
    let menu = abilities(100, 300);
    assert_eq!(
        validate_action(100, 300, &menu, ActionKind::Call, 0),
        Ok(ValidatedAction::AllIn(100))
    );
}

#[test]
fn raise_moves_chips_into_every_bet_counter() {
    let mut player = seated(1000);
    player.update_dif(0);
    player.update_abilities();
    let action = player.apply(ActionKind::Raise, 300).unwrap();
    assert_eq!(action, Action { kind: ActionKind::Raise, bet: 300 });
    assert_eq!(player.chips(), 700);
    assert_eq!(player.round_bets(), 300);
    assert_eq!(player.stage_bets(), 300);
    assert_eq!(player.unpaid_bets(), 300);
    assert_eq!(player.last_action(), Some(action));
    assert!(!player.is_all_in());
}

#[test]
fn rejected_action_changes_nothing() {
    let mut player = seated(1000);
    player.update_dif(100);
    player.update_abilities();
    assert!(player.apply(ActionKind::Check, 0).is_err());
    assert!(player.apply(ActionKind::Raise, 2000).is_err());
    assert_eq!(player.chips(), 1000);
    assert_eq!(player.round_bets(), 0);
    assert_eq!(player.last_action(), None);
}

#[test]
fn call_answers_the_difference() {
    let mut player = seated(500);
    player.update_dif(120);
    player.update_abilities();
    assert_eq!(player.abilities().call, 120);
    let action = player.apply(ActionKind::Call, 0).unwrap();
    assert_eq!(action, Action { kind: ActionKind::Call, bet: 120 });
    assert_eq!(player.chips(), 380);
}

#[test]
fn raising_the_whole_stack_is_all_in() {
    let mut player = seated(400);
    player.update_abilities();
    let action = player.apply(ActionKind::Raise, 400).unwrap();
    assert_eq!(action, Action { kind: ActionKind::AllIn, bet: 400 });
    assert_eq!(player.chips(), 0);
    assert!(player.is_all_in());
}

#[test]
fn new_stage_keeps_round_bets() {
    let mut player = seated(1000);
    player.update_abilities();
    player.apply(ActionKind::BlindBet, 20).unwrap();
    player.new_stage();
    assert_eq!(player.stage_bets(), 0);
    assert_eq!(player.round_bets(), 20);
    assert_eq!(player.last_action(), None);

    player.new_round();
    assert_eq!(player.round_bets(), 0);
    assert_eq!(player.unpaid_bets(), 0);
    assert!(player.hand().is_empty());
}

#[test]
fn dif_never_goes_negative() {
    let mut player = seated(1000);
    player.update_abilities();
    player.apply(ActionKind::Raise, 300).unwrap();
    player.update_dif(100);
    assert_eq!(player.dif(), 0);
    player.update_dif(450);
    assert_eq!(player.dif(), 150);
}
