use crate::element::Element;
use crate::errors::BattleError;
use crate::moves::Move;
use serde::{Deserialize, Serialize};

/// Arena Pokemon all share the same hit point pool.
pub const DEFAULT_HP: u16 = 30;

/// A combat unit: a name, an element, a health pool, and a fixed move list.
///
/// Health is private so the only way down is `take_damage` and there is no way
/// back up; a fainted Pokemon stays in its trainer's roster for record-keeping
/// but never fights again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub element: Element,
    current_hp: u16,
    max_hp: u16,
    pub moves: Vec<Move>,
}

impl Pokemon {
    /// Create a Pokemon with the standard arena health pool. The move list
    /// must be non-empty; every Pokemon can always at least attack.
    pub fn new(
        name: impl Into<String>,
        element: Element,
        moves: Vec<Move>,
    ) -> Result<Self, BattleError> {
        Self::with_hp(name, element, moves, DEFAULT_HP, DEFAULT_HP)
    }

    pub fn with_hp(
        name: impl Into<String>,
        element: Element,
        moves: Vec<Move>,
        current_hp: u16,
        max_hp: u16,
    ) -> Result<Self, BattleError> {
        let name = name.into();
        if moves.is_empty() {
            return Err(BattleError::NoMoves { pokemon: name });
        }
        Ok(Pokemon {
            name,
            element,
            current_hp: current_hp.min(max_hp),
            max_hp,
            moves,
        })
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Apply damage, flooring health at zero. Returns true if this faints the
    /// Pokemon (it was standing before and is at zero now).
    pub fn take_damage(&mut self, amount: u16) -> bool {
        let was_standing = !self.is_fainted();
        self.current_hp = self.current_hp.saturating_sub(amount);
        was_standing && self.is_fainted()
    }

    pub fn is_strong_against(&self, opponent: &Pokemon) -> bool {
        self.element.is_strong_against(opponent.element)
    }

    pub fn is_weak_against(&self, opponent: &Pokemon) -> bool {
        self.element.is_weak_against(opponent.element)
    }

    /// Marker this Pokemon shows next to its name when facing `opponent`.
    pub fn advantage_marker(&self, opponent: &Pokemon) -> &'static str {
        if self.is_strong_against(opponent) {
            "(+)"
        } else if self.is_weak_against(opponent) {
            "(-)"
        } else {
            ""
        }
    }

    /// One-line description relative to an opponent, used for the battle scene
    /// and as the switch-target menu label.
    pub fn summary(&self, opponent: &Pokemon) -> String {
        let marker = self.advantage_marker(opponent);
        if marker.is_empty() {
            format!("{} ({}) [{}]", self.name, self.current_hp, self.element)
        } else {
            format!("{} ({}) [{}] {}", self.name, self.current_hp, self.element, marker)
        }
    }
}
