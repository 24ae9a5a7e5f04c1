use crate::element::Element;
use crate::pokemon::Pokemon;
use serde::{Deserialize, Serialize};

/// A damage-dealing move owned by exactly one Pokemon's move list.
///
/// Moves are immutable once created. `accuracy` is a hit chance in percent
/// (1..=100), checked against one roll of the turn oracle per use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub element: Element,
    pub power: u16,
    pub accuracy: u8,
}

impl Move {
    pub fn new(name: impl Into<String>, element: Element, power: u16, accuracy: u8) -> Self {
        Move {
            name: name.into(),
            element,
            power,
            accuracy,
        }
    }

    /// Damage this move deals to `defender`, before any hit/miss roll: base
    /// power, doubled on a type advantage, halved (integer division) on a
    /// disadvantage.
    pub fn damage_against(&self, defender: &Pokemon) -> u16 {
        if self.element.is_strong_against(defender.element) {
            self.power.saturating_mul(2)
        } else if self.element.is_weak_against(defender.element) {
            self.power / 2
        } else {
            self.power
        }
    }

    pub fn is_strong_against(&self, opponent: &Pokemon) -> bool {
        self.element.is_strong_against(opponent.element)
    }

    pub fn is_weak_against(&self, opponent: &Pokemon) -> bool {
        self.element.is_weak_against(opponent.element)
    }

    /// Menu line shown when choosing an attack: name, power, accuracy, and a
    /// `(+)`/`(-)` marker for the matchup against `opponent`.
    pub fn summary(&self, opponent: &Pokemon) -> String {
        let line = format!(
            "{:<15}{:<8}{}%",
            self.name,
            format!("{} hp", self.power),
            self.accuracy
        );
        if self.is_strong_against(opponent) {
            format!("{} (+)", line)
        } else if self.is_weak_against(opponent) {
            format!("{} (-)", line)
        } else {
            line
        }
    }
}
