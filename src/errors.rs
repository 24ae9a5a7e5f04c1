use std::fmt;

/// Validation errors raised while assembling a battle.
///
/// Runtime misbehavior is deliberately not represented here: stale or malformed
/// actions resolve as silent no-ops, and contract violations (an empty
/// alternative list, an exhausted turn oracle) abort loudly instead of being
/// reported as recoverable errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    /// A trainer was created without any Pokemon.
    EmptyTeam { trainer: String },
    /// A Pokemon was created without any moves.
    NoMoves { pokemon: String },
}

impl fmt::Display for BattleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleError::EmptyTeam { trainer } => {
                write!(f, "trainer {} has no Pokemon in their team", trainer)
            }
            BattleError::NoMoves { pokemon } => {
                write!(f, "{} has no moves to fight with", pokemon)
            }
        }
    }
}

impl std::error::Error for BattleError {}
