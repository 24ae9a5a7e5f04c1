use crate::battle::engine::BattleAction;
use crate::battle::state::TurnRng;
use crate::decision::{pick, DecisionEngine, PickContext};
use crate::errors::BattleError;
use crate::pokemon::Pokemon;
use serde::{Deserialize, Serialize};

/// The top-level choice a trainer makes each turn. `Switch` is only offered
/// while a live benched Pokemon exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleChoice {
    Attack,
    Switch,
}

impl BattleChoice {
    pub fn label(self) -> &'static str {
        match self {
            BattleChoice::Attack => "Attack",
            BattleChoice::Switch => "Switch",
        }
    }
}

/// A battle participant: a display name, a roster fixed for the match, the
/// index of the active Pokemon, and the decision policy all of its choices go
/// through.
///
/// Fainted Pokemon stay in the roster for end-of-match bookkeeping; the active
/// index only ever moves to a live roster member.
pub struct Trainer {
    pub name: String,
    team: Vec<Pokemon>,
    active_index: usize,
    engine: Box<dyn DecisionEngine>,
}

impl std::fmt::Debug for Trainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trainer")
            .field("name", &self.name)
            .field("team", &self.team)
            .field("active_index", &self.active_index)
            .finish_non_exhaustive()
    }
}

impl Trainer {
    /// Create a trainer. The first roster member starts active; the roster
    /// must be non-empty.
    pub fn new(
        name: impl Into<String>,
        team: Vec<Pokemon>,
        engine: Box<dyn DecisionEngine>,
    ) -> Result<Self, BattleError> {
        let name = name.into();
        if team.is_empty() {
            return Err(BattleError::EmptyTeam { trainer: name });
        }
        Ok(Trainer {
            name,
            team,
            active_index: 0,
            engine,
        })
    }

    pub fn team(&self) -> &[Pokemon] {
        &self.team
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> &Pokemon {
        &self.team[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut Pokemon {
        &mut self.team[self.active_index]
    }

    /// Move the active reference to `index`. Ignored unless the index names a
    /// live, non-active roster member; malformed switches are no-ops by policy.
    pub fn switch_to(&mut self, index: usize) {
        let valid = index < self.team.len()
            && index != self.active_index
            && !self.team[index].is_fainted();
        if valid {
            self.active_index = index;
        }
    }

    /// Any live roster member at all, active included.
    pub fn has_usable_pokemon(&self) -> bool {
        self.team.iter().any(|pokemon| !pokemon.is_fainted())
    }

    /// Any live roster member besides the active one.
    pub fn has_switchable_pokemon(&self) -> bool {
        self.team
            .iter()
            .enumerate()
            .any(|(i, pokemon)| i != self.active_index && !pokemon.is_fainted())
    }

    /// Whether anyone in the roster, fainted or not, has a type advantage over
    /// `opponent`. Informational only; no decision logic depends on it.
    pub fn has_type_advantage_over(&self, opponent: &Pokemon) -> bool {
        self.team.iter().any(|pokemon| pokemon.is_strong_against(opponent))
    }

    /// Name plus one marker per roster member: `*` standing, `x` fainted.
    pub fn roster_summary(&self) -> String {
        let markers: String = self
            .team
            .iter()
            .map(|pokemon| if pokemon.is_fainted() { 'x' } else { '*' })
            .collect();
        format!("{} ({})", self.name, markers)
    }

    /// Pick one of the active Pokemon's moves. The move list is non-empty by
    /// construction, so this always yields an action.
    pub fn choose_attack(&mut self, opponent: &Pokemon, rng: &mut TurnRng) -> BattleAction {
        let ctx = PickContext {
            chooser: &self.name,
            prompt: "choose an attack",
        };
        let moves = &self.team[self.active_index].moves;
        let indices: Vec<usize> = (0..moves.len()).collect();
        let move_index = *pick(
            self.engine.as_mut(),
            &ctx,
            &indices,
            |i| moves[*i].summary(opponent),
            rng,
        );
        BattleAction::Attack { move_index }
    }

    /// Pick a live benched Pokemon to switch to. Callers must check
    /// `has_switchable_pokemon` first; offering zero targets is a contract
    /// violation and aborts.
    pub fn choose_switch_target(&mut self, opponent: &Pokemon, rng: &mut TurnRng) -> BattleAction {
        let ctx = PickContext {
            chooser: &self.name,
            prompt: "choose a Pokemon",
        };
        let team = &self.team;
        let active_index = self.active_index;
        let eligible: Vec<usize> = team
            .iter()
            .enumerate()
            .filter(|(i, pokemon)| *i != active_index && !pokemon.is_fainted())
            .map(|(i, _)| i)
            .collect();
        let team_index = *pick(
            self.engine.as_mut(),
            &ctx,
            &eligible,
            |i| team[*i].summary(opponent),
            rng,
        );
        BattleAction::Switch { team_index }
    }

    /// Pick attack-or-switch, then resolve the chosen tag down to a concrete
    /// action. Attack is always on offer, so the alternatives are never empty.
    pub fn choose_battle_action(&mut self, opponent: &Pokemon, rng: &mut TurnRng) -> BattleAction {
        let alternatives = if self.has_switchable_pokemon() {
            vec![BattleChoice::Attack, BattleChoice::Switch]
        } else {
            vec![BattleChoice::Attack]
        };
        let ctx = PickContext {
            chooser: &self.name,
            prompt: "choose an action",
        };
        let choice = *pick(
            self.engine.as_mut(),
            &ctx,
            &alternatives,
            |c| c.label().to_string(),
            rng,
        );
        match choice {
            BattleChoice::Attack => self.choose_attack(opponent, rng),
            BattleChoice::Switch => self.choose_switch_target(opponent, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::RandomDecisionEngine;
    use crate::element::Element;
    use crate::moves::Move;
    use pretty_assertions::assert_eq;

    fn tackle() -> Move {
        Move::new("Tackle", Element::Normal, 5, 90)
    }

    fn pokemon(name: &str, element: Element) -> Pokemon {
        Pokemon::new(name, element, vec![tackle()]).expect("valid pokemon")
    }

    fn trainer(team: Vec<Pokemon>) -> Trainer {
        Trainer::new("RED", team, Box::new(RandomDecisionEngine)).expect("valid trainer")
    }

    fn faint(pokemon: &mut Pokemon) {
        pokemon.take_damage(u16::MAX);
    }

    #[test]
    fn empty_team_is_rejected() {
        let err = Trainer::new("RED", vec![], Box::new(RandomDecisionEngine)).unwrap_err();
        assert_eq!(err, BattleError::EmptyTeam { trainer: "RED".to_string() });
    }

    #[test]
    fn switch_to_self_is_ignored() {
        let mut t = trainer(vec![pokemon("A", Element::Fire), pokemon("B", Element::Water)]);
        t.switch_to(0);
        assert_eq!(t.active_index(), 0);
    }

    #[test]
    fn switch_to_fainted_member_is_ignored() {
        let mut t = trainer(vec![pokemon("A", Element::Fire), pokemon("B", Element::Water)]);
        faint(&mut t.team[1]);
        t.switch_to(1);
        assert_eq!(t.active_index(), 0);
    }

    #[test]
    fn switch_outside_the_roster_is_ignored() {
        let mut t = trainer(vec![pokemon("A", Element::Fire)]);
        t.switch_to(5);
        assert_eq!(t.active_index(), 0);
    }

    #[test]
    fn switch_to_live_bench_member_moves_the_active() {
        let mut t = trainer(vec![pokemon("A", Element::Fire), pokemon("B", Element::Water)]);
        t.switch_to(1);
        assert_eq!(t.active_index(), 1);
        assert_eq!(t.active().name, "B");
    }

    #[test]
    fn usable_and_switchable_queries() {
        let mut t = trainer(vec![pokemon("A", Element::Fire), pokemon("B", Element::Water)]);
        assert!(t.has_usable_pokemon());
        assert!(t.has_switchable_pokemon());

        faint(&mut t.team[1]);
        assert!(t.has_usable_pokemon());
        assert!(!t.has_switchable_pokemon());

        faint(&mut t.team[0]);
        assert!(!t.has_usable_pokemon());
    }

    #[test]
    fn type_advantage_counts_fainted_members() {
        let mut t = trainer(vec![pokemon("A", Element::Fire), pokemon("B", Element::Water)]);
        faint(&mut t.team[1]);
        let opponent = pokemon("Enemy", Element::Fire);
        // Only the fainted Water member is strong against Fire; it still counts.
        assert!(t.has_type_advantage_over(&opponent));
    }

    #[test]
    fn roster_summary_marks_fainted_members() {
        let mut t = trainer(vec![
            pokemon("A", Element::Fire),
            pokemon("B", Element::Water),
            pokemon("C", Element::Grass),
        ]);
        faint(&mut t.team[1]);
        assert_eq!(t.roster_summary(), "RED (*x*)");
    }

    #[test]
    fn choose_battle_action_without_bench_always_attacks() {
        let mut t = trainer(vec![pokemon("A", Element::Fire)]);
        let opponent = pokemon("Enemy", Element::Water);
        // Whatever the oracle says, Attack is the only tag on offer.
        for outcome in [1u8, 50, 100] {
            let mut rng = TurnRng::new_scripted(vec![outcome, 50]);
            let action = t.choose_battle_action(&opponent, &mut rng);
            assert!(matches!(action, BattleAction::Attack { .. }));
        }
    }

    #[test]
    fn choose_switch_target_skips_active_and_fainted() {
        let mut t = trainer(vec![
            pokemon("A", Element::Fire),
            pokemon("B", Element::Water),
            pokemon("C", Element::Grass),
        ]);
        faint(&mut t.team[1]);
        let opponent = pokemon("Enemy", Element::Normal);
        // Only index 2 is eligible, so every outcome lands on it.
        for outcome in [1u8, 50, 100] {
            let mut rng = TurnRng::new_scripted(vec![outcome]);
            let action = t.choose_switch_target(&opponent, &mut rng);
            assert_eq!(action, BattleAction::Switch { team_index: 2 });
        }
    }

    #[test]
    fn choose_attack_spans_the_move_list() {
        let moves = vec![
            Move::new("Razor Leaf", Element::Grass, 10, 70),
            Move::new("Vine Whip", Element::Grass, 15, 50),
            Move::new("Tackle", Element::Normal, 5, 90),
            Move::new("Scratch", Element::Normal, 5, 90),
        ];
        let bulbasaur = Pokemon::new("Bulbasaur", Element::Grass, moves).unwrap();
        let mut t = trainer(vec![bulbasaur]);
        let opponent = pokemon("Enemy", Element::Water);

        let mut low = TurnRng::new_scripted(vec![1]);
        assert_eq!(t.choose_attack(&opponent, &mut low), BattleAction::Attack { move_index: 0 });

        let mut high = TurnRng::new_scripted(vec![100]);
        assert_eq!(t.choose_attack(&opponent, &mut high), BattleAction::Attack { move_index: 3 });
    }
}
