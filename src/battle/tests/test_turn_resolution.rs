use super::common::{lone_attacker, pokemon_with_hp, sure_hit, trainer};
use crate::battle::engine::{resolve_turn, BattleAction};
use crate::battle::state::{Battle, BattleEvent, EventBus, GameState, TurnRng};
use crate::element::{Affinity, Element};
use crate::moves::Move;
use pretty_assertions::assert_eq;

/// Oracle script for an open turn where both engines are scripted: one coin
/// flip, then one accuracy roll per attack that fires.
fn open_turn_rng(coin: u8, rolls: &[u8]) -> TurnRng {
    let mut outcomes = vec![coin];
    outcomes.extend_from_slice(rolls);
    TurnRng::new_scripted(outcomes)
}

#[test]
fn fire_attack_on_grass_doubles_damage_and_narrates_it() {
    let red = lone_attacker("RED", "A", Element::Fire, sure_hit("Ember", Element::Fire, 10), 30, 1);
    let blue = lone_attacker("BLUE", "B", Element::Grass, sure_hit("Vine Whip", Element::Grass, 15), 30, 1);
    let mut battle = Battle::new(red, blue);
    let mut bus = EventBus::new();

    // Coin 50 puts player 1 first; both attacks hit.
    let state = resolve_turn(&mut battle, &mut bus, open_turn_rng(50, &[1, 1]));

    assert_eq!(state, GameState::WaitingForActions);
    // Doubled: 10 power, Fire on Grass.
    assert!(bus.events().contains(&BattleEvent::DamageDealt {
        target: "B".to_string(),
        damage: 20,
        remaining_hp: 10,
    }));
    assert!(bus.events().contains(&BattleEvent::AttackEffectiveness {
        affinity: Affinity::Strong,
    }));
    assert_eq!(battle.players[1].active().current_hp(), 10);
    // The reply was halved: 15 power Grass on Fire -> 7.
    assert_eq!(battle.players[0].active().current_hp(), 23);
}

#[test]
fn coin_flip_gives_player_two_the_first_move() {
    let red = lone_attacker("RED", "A", Element::Normal, sure_hit("Tackle", Element::Normal, 5), 30, 1);
    let blue = lone_attacker("BLUE", "B", Element::Normal, sure_hit("Scratch", Element::Normal, 5), 30, 1);
    let mut battle = Battle::new(red, blue);
    let mut bus = EventBus::new();

    resolve_turn(&mut battle, &mut bus, open_turn_rng(51, &[1, 1]));

    let first_move_user = bus
        .events()
        .iter()
        .find_map(|event| match event {
            BattleEvent::MoveUsed { trainer, .. } => Some(trainer.clone()),
            _ => None,
        })
        .expect("someone attacked");
    assert_eq!(first_move_user, "BLUE");
}

#[test]
fn choices_are_gathered_from_player_one_first() {
    let red = lone_attacker("RED", "A", Element::Normal, sure_hit("Tackle", Element::Normal, 5), 30, 1);
    let blue = lone_attacker("BLUE", "B", Element::Normal, sure_hit("Scratch", Element::Normal, 5), 30, 1);
    let mut battle = Battle::new(red, blue);
    let mut bus = EventBus::new();

    resolve_turn(&mut battle, &mut bus, open_turn_rng(51, &[1, 1]));

    let prompts: Vec<String> = bus
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::TurnToChoose { trainer } => Some(trainer.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(prompts, vec!["RED".to_string(), "BLUE".to_string()]);
}

#[test]
fn a_missed_attack_deals_no_damage() {
    let shaky = Move::new("Fire Spin", Element::Fire, 15, 50);
    let red = lone_attacker("RED", "A", Element::Fire, shaky, 30, 1);
    let blue = lone_attacker("BLUE", "B", Element::Normal, sure_hit("Tackle", Element::Normal, 5), 30, 1);
    let mut battle = Battle::new(red, blue);
    let mut bus = EventBus::new();

    // RED first; roll 51 misses the 50-accuracy move, BLUE's reply hits.
    resolve_turn(&mut battle, &mut bus, open_turn_rng(50, &[51, 1]));

    assert!(bus.events().contains(&BattleEvent::MoveMissed));
    assert_eq!(battle.players[1].active().current_hp(), 30);
    assert_eq!(battle.players[0].active().current_hp(), 25);
}

#[test]
fn first_faint_cancels_the_second_action() {
    // RED's attack faints BLUE's only Pokemon; BLUE's scripted attack for the
    // same sub-turn must never fire.
    let red = lone_attacker("RED", "A", Element::Normal, sure_hit("Slam", Element::Normal, 30), 30, 1);
    let blue = lone_attacker("BLUE", "B", Element::Normal, sure_hit("Tackle", Element::Normal, 5), 10, 1);
    let mut battle = Battle::new(red, blue);
    let mut bus = EventBus::new();

    let state = resolve_turn(&mut battle, &mut bus, open_turn_rng(50, &[1]));

    let attackers: Vec<String> = bus
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::MoveUsed { trainer, .. } => Some(trainer.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(attackers, vec!["RED".to_string()]);
    // No damage attributable to BLUE's cancelled action.
    assert_eq!(battle.players[0].active().current_hp(), 30);
    assert_eq!(state, GameState::Player1Win);
}

#[test]
fn health_display_refreshes_between_damage_and_the_notices() {
    let red = lone_attacker("RED", "A", Element::Fire, sure_hit("Ember", Element::Fire, 10), 30, 1);
    let blue = lone_attacker("BLUE", "B", Element::Grass, sure_hit("Tackle", Element::Normal, 5), 30, 1);
    let mut battle = Battle::new(red, blue);
    let mut bus = EventBus::new();

    resolve_turn(&mut battle, &mut bus, open_turn_rng(50, &[1, 1]));

    // One refresh at turn start plus one mid-resolution per landed hit.
    assert_eq!(bus.refreshes(), 3);
}

#[test]
fn stale_attack_from_a_fainted_attacker_is_silent() {
    let mut red = trainer(
        "RED",
        vec![pokemon_with_hp("A", Element::Fire, vec![sure_hit("Ember", Element::Fire, 10)], 0)],
        vec![],
    );
    let mut blue = lone_attacker("BLUE", "B", Element::Grass, sure_hit("Tackle", Element::Normal, 5), 30, 0);
    let mut bus = EventBus::new();
    let mut rng = TurnRng::new_scripted(vec![1]);

    let action = BattleAction::Attack { move_index: 0 };
    action.apply(&mut red, &mut blue, 0, &mut bus, &mut rng);

    assert!(bus.is_empty());
    assert_eq!(blue.active().current_hp(), 30);
}

#[test]
fn attack_on_an_already_fainted_defender_is_silent() {
    let mut red = lone_attacker("RED", "A", Element::Fire, sure_hit("Ember", Element::Fire, 10), 30, 0);
    let mut blue = trainer(
        "BLUE",
        vec![pokemon_with_hp("B", Element::Grass, vec![sure_hit("Tackle", Element::Normal, 5)], 0)],
        vec![],
    );
    let mut bus = EventBus::new();
    let mut rng = TurnRng::new_scripted(vec![1]);

    let action = BattleAction::Attack { move_index: 0 };
    action.apply(&mut red, &mut blue, 0, &mut bus, &mut rng);

    assert!(bus.is_empty());
}

#[test]
fn out_of_range_move_index_is_silent() {
    let mut red = lone_attacker("RED", "A", Element::Fire, sure_hit("Ember", Element::Fire, 10), 30, 0);
    let mut blue = lone_attacker("BLUE", "B", Element::Grass, sure_hit("Tackle", Element::Normal, 5), 30, 0);
    let mut bus = EventBus::new();
    let mut rng = TurnRng::new_scripted(vec![1]);

    let action = BattleAction::Attack { move_index: 7 };
    action.apply(&mut red, &mut blue, 0, &mut bus, &mut rng);

    assert!(bus.is_empty());
    assert_eq!(blue.active().current_hp(), 30);
}
