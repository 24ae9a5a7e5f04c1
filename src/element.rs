use serde::{Deserialize, Serialize};

/// The four elemental types in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Normal,
    Fire,
    Water,
    Grass,
}

/// How an attacking element fares against a defending element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affinity {
    Strong,
    Weak,
    Neutral,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Normal, Element::Fire, Element::Water, Element::Grass];

    /// Look up the directional matchup for `self` attacking `defender`.
    ///
    /// The table is the classic starter triangle: Fire beats Grass, Water beats
    /// Fire, Grass beats Water. Weak is the inverse of Strong between the same
    /// pair, and Normal is never strong or weak against anything.
    pub fn affinity_against(self, defender: Element) -> Affinity {
        if self.is_strong_against(defender) {
            Affinity::Strong
        } else if self.is_weak_against(defender) {
            Affinity::Weak
        } else {
            Affinity::Neutral
        }
    }

    pub fn is_strong_against(self, defender: Element) -> bool {
        matches!(
            (self, defender),
            (Element::Fire, Element::Grass)
                | (Element::Water, Element::Fire)
                | (Element::Grass, Element::Water)
        )
    }

    /// Weakness is strength seen from the other side, so this delegates to the
    /// reversed lookup rather than carrying a second table that could drift.
    pub fn is_weak_against(self, defender: Element) -> bool {
        defender.is_strong_against(self)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::Normal => "Normal",
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Grass => "Grass",
        };
        write!(f, "{}", name)
    }
}
