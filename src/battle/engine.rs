//! Turn resolution: the state machine that drives a battle from
//! `WaitingForActions` to one of the three terminal outcomes.

use crate::battle::state::{Battle, BattleEvent, BattleInfo, BattleUi, GameState, TurnRng};
use crate::element::Affinity;
use crate::trainer::Trainer;
use serde::{Deserialize, Serialize};

/// One resolved choice, ready to execute. Attacking and switching share this
/// shape so the engine applies either without knowing which was picked; the
/// indices refer to the acting trainer's active move list and roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleAction {
    Attack { move_index: usize },
    Switch { team_index: usize },
}

impl BattleAction {
    /// Execute this action for `attacker` against `defender`.
    ///
    /// Total by policy: stale or malformed actions (fainted participants, an
    /// out-of-range index, a switch to self or to a fainted member) do nothing
    /// and narrate nothing. That guards against actions chosen before an
    /// interrupting faint.
    pub fn apply(
        self,
        attacker: &mut Trainer,
        defender: &mut Trainer,
        attacker_side: usize,
        ui: &mut dyn BattleUi,
        rng: &mut TurnRng,
    ) {
        match self {
            BattleAction::Attack { move_index } => {
                apply_attack(attacker, defender, attacker_side, move_index, ui, rng)
            }
            BattleAction::Switch { team_index } => apply_switch(attacker, team_index, ui),
        }
    }
}

fn apply_attack(
    attacker: &Trainer,
    defender: &mut Trainer,
    attacker_side: usize,
    move_index: usize,
    ui: &mut dyn BattleUi,
    rng: &mut TurnRng,
) {
    if attacker.active().is_fainted() || defender.active().is_fainted() {
        return;
    }
    let used = match attacker.active().moves.get(move_index) {
        Some(mv) => mv.clone(),
        None => return,
    };

    ui.notify(BattleEvent::MoveUsed {
        trainer: attacker.name.clone(),
        pokemon: attacker.active().name.clone(),
        used: used.name.clone(),
    });

    if rng.percent("accuracy roll") > used.accuracy {
        ui.notify(BattleEvent::MoveMissed);
        return;
    }

    let affinity = used.element.affinity_against(defender.active().element);
    let damage = used.damage_against(defender.active());
    let target = defender.active_mut();
    let fainted = target.take_damage(damage);
    let remaining_hp = target.current_hp();
    let target_name = target.name.clone();

    ui.notify(BattleEvent::DamageDealt {
        target: target_name.clone(),
        damage,
        remaining_hp,
    });
    // Health bars update before the follow-up notices land.
    ui.refresh(&sided_info(attacker, defender, attacker_side));

    if affinity != Affinity::Neutral {
        ui.notify(BattleEvent::AttackEffectiveness { affinity });
    }
    if fainted {
        ui.notify(BattleEvent::PokemonFainted { pokemon: target_name });
    }
}

fn apply_switch(attacker: &mut Trainer, team_index: usize, ui: &mut dyn BattleUi) {
    let valid = team_index < attacker.team().len()
        && team_index != attacker.active_index()
        && !attacker.team()[team_index].is_fainted();
    if !valid {
        return;
    }

    if !attacker.active().is_fainted() {
        ui.notify(BattleEvent::CalledBack {
            trainer: attacker.name.clone(),
            pokemon: attacker.active().name.clone(),
        });
    }
    attacker.switch_to(team_index);
    ui.notify(BattleEvent::SentOut {
        trainer: attacker.name.clone(),
        pokemon: attacker.active().name.clone(),
    });
}

/// Snapshot with the sides restored to fixed player order, whichever side is
/// acting.
fn sided_info(attacker: &Trainer, defender: &Trainer, attacker_side: usize) -> BattleInfo {
    if attacker_side == 0 {
        BattleInfo::from_sides(attacker, defender)
    } else {
        BattleInfo::from_sides(defender, attacker)
    }
}

/// Borrow the acting side and its opponent at once.
fn split_sides(players: &mut [Trainer; 2], side: usize) -> (&mut Trainer, &mut Trainer) {
    let [player1, player2] = players;
    if side == 0 {
        (player1, player2)
    } else {
        (player2, player1)
    }
}

/// Drive one full turn of the state machine and return the resulting state.
///
/// One call covers exactly one loop iteration: outcome check, then either a
/// forced-switch turn (one side's active fainted) or an open turn (both sides
/// choose, a coin flip orders execution), then the closing outcome check.
/// Calling this on an already finished battle is a no-op.
pub fn resolve_turn(battle: &mut Battle, ui: &mut dyn BattleUi, mut rng: TurnRng) -> GameState {
    if battle.game_state.is_terminal() {
        return battle.game_state;
    }
    if let Some(outcome) = check_outcome(battle) {
        return finish(battle, outcome, ui);
    }

    battle.turn_number += 1;
    ui.notify(BattleEvent::TurnStarted {
        turn_number: battle.turn_number,
    });
    ui.refresh(&battle.info());

    if battle.players[0].active().is_fainted() {
        forced_switch_turn(battle, 0, ui, &mut rng);
    } else if battle.players[1].active().is_fainted() {
        forced_switch_turn(battle, 1, ui, &mut rng);
    } else {
        open_turn(battle, ui, &mut rng);
    }

    match check_outcome(battle) {
        Some(outcome) => finish(battle, outcome, ui),
        None => {
            battle.game_state = GameState::WaitingForActions;
            battle.game_state
        }
    }
}

/// Run turns with a fresh random oracle each until the battle finishes.
///
/// Terminates because completed actions can only shrink a side's stock of
/// usable Pokemon, never grow it.
pub fn run_to_completion(battle: &mut Battle, ui: &mut dyn BattleUi) -> GameState {
    if battle.game_state.is_terminal() {
        return battle.game_state;
    }
    ui.notify(BattleEvent::BattleStarted);
    loop {
        let state = resolve_turn(battle, ui, TurnRng::new_random());
        if state.is_terminal() {
            return state;
        }
    }
}

/// The side whose active fainted spends its whole turn sending out a
/// replacement; the opponent then acts once against the fresh active.
fn forced_switch_turn(battle: &mut Battle, side: usize, ui: &mut dyn BattleUi, rng: &mut TurnRng) {
    battle.game_state = if side == 0 {
        GameState::WaitingForPlayer1Replacement
    } else {
        GameState::WaitingForPlayer2Replacement
    };
    ui.notify(BattleEvent::MustChooseReplacement {
        trainer: battle.players[side].name.clone(),
    });
    // The outcome check guarantees a switch target exists here.
    let (actor, opponent) = split_sides(&mut battle.players, side);
    let switch = actor.choose_switch_target(opponent.active(), rng);
    battle.game_state = GameState::TurnInProgress;
    switch.apply(actor, opponent, side, ui, rng);

    let other = 1 - side;
    ui.notify(BattleEvent::TurnToChoose {
        trainer: battle.players[other].name.clone(),
    });
    let (actor, opponent) = split_sides(&mut battle.players, other);
    let action = actor.choose_battle_action(opponent.active(), rng);
    action.apply(actor, opponent, other, ui, rng);
}

/// Both actives standing: gather both choices (side 1 first, side 2 second;
/// neither sees the other's pick), then a coin flip decides who moves first.
/// The second action fires only if neither active fainted in the meantime.
fn open_turn(battle: &mut Battle, ui: &mut dyn BattleUi, rng: &mut TurnRng) {
    ui.notify(BattleEvent::TurnToChoose {
        trainer: battle.players[0].name.clone(),
    });
    let (actor, opponent) = split_sides(&mut battle.players, 0);
    let first_action = actor.choose_battle_action(opponent.active(), rng);

    ui.notify(BattleEvent::TurnToChoose {
        trainer: battle.players[1].name.clone(),
    });
    let (actor, opponent) = split_sides(&mut battle.players, 1);
    let second_action = actor.choose_battle_action(opponent.active(), rng);

    battle.game_state = GameState::TurnInProgress;
    let actions = [first_action, second_action];
    let lead: usize = if rng.coin_flip("turn order") { 0 } else { 1 };

    let (actor, opponent) = split_sides(&mut battle.players, lead);
    actions[lead].apply(actor, opponent, lead, ui, rng);

    let interrupted = battle.players[0].active().is_fainted()
        || battle.players[1].active().is_fainted();
    if !interrupted {
        let trail = 1 - lead;
        let (actor, opponent) = split_sides(&mut battle.players, trail);
        actions[trail].apply(actor, opponent, trail, ui, rng);
    }
}

fn check_outcome(battle: &Battle) -> Option<GameState> {
    let player1_standing = battle.players[0].has_usable_pokemon();
    let player2_standing = battle.players[1].has_usable_pokemon();
    match (player1_standing, player2_standing) {
        (true, true) => None,
        (true, false) => Some(GameState::Player1Win),
        (false, true) => Some(GameState::Player2Win),
        (false, false) => Some(GameState::Draw),
    }
}

fn finish(battle: &mut Battle, outcome: GameState, ui: &mut dyn BattleUi) -> GameState {
    battle.game_state = outcome;
    let winner = match outcome {
        GameState::Player1Win => Some(battle.players[0].name.clone()),
        GameState::Player2Win => Some(battle.players[1].name.clone()),
        _ => None,
    };
    ui.notify(BattleEvent::BattleEnded { winner });
    outcome
}
