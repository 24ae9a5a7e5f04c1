//! Shared builders for engine scenario tests: fixed-team trainers driven by
//! scripted decision engines and scripted turn oracles, so every turn is
//! fully deterministic.

use crate::battle::state::TurnRng;
use crate::decision::{DecisionEngine, PickContext};
use crate::element::Element;
use crate::moves::Move;
use crate::pokemon::Pokemon;
use crate::trainer::Trainer;
use std::collections::VecDeque;

/// Decision engine that replays a fixed list of pick indices.
pub struct ScriptedEngine {
    picks: VecDeque<usize>,
}

impl ScriptedEngine {
    pub fn new(picks: Vec<usize>) -> Box<Self> {
        Box::new(ScriptedEngine {
            picks: picks.into(),
        })
    }
}

impl DecisionEngine for ScriptedEngine {
    fn pick_index(&mut self, ctx: &PickContext<'_>, _labels: &[String], _rng: &mut TurnRng) -> usize {
        self.picks
            .pop_front()
            .unwrap_or_else(|| panic!("script ran dry at '{}' for {}", ctx.prompt, ctx.chooser))
    }
}

pub fn sure_hit(name: &str, element: Element, power: u16) -> Move {
    Move::new(name, element, power, 100)
}

pub fn pokemon(name: &str, element: Element, moves: Vec<Move>) -> Pokemon {
    Pokemon::new(name, element, moves).expect("test pokemon")
}

pub fn pokemon_with_hp(name: &str, element: Element, moves: Vec<Move>, hp: u16) -> Pokemon {
    Pokemon::with_hp(name, element, moves, hp, 30).expect("test pokemon")
}

pub fn fainted(name: &str, element: Element, moves: Vec<Move>) -> Pokemon {
    pokemon_with_hp(name, element, moves, 0)
}

pub fn trainer(name: &str, team: Vec<Pokemon>, picks: Vec<usize>) -> Trainer {
    Trainer::new(name, team, ScriptedEngine::new(picks)).expect("test trainer")
}

/// A lone attacker: one Pokemon whose only option every turn is its one move,
/// scripted for `turns` turns of play.
pub fn lone_attacker(
    trainer_name: &str,
    pokemon_name: &str,
    element: Element,
    attack: Move,
    hp: u16,
    turns: usize,
) -> Trainer {
    // Each turn costs two picks: the Attack tag, then the move itself.
    let picks = vec![0; turns * 2];
    trainer(
        trainer_name,
        vec![pokemon_with_hp(pokemon_name, element, vec![attack], hp)],
        picks,
    )
}
