// In: src/lib.rs

//! Pokemon Arena Battle Simulator
//!
//! A two-trainer, turn-based creature battle with a four-element affinity
//! triangle, pluggable decision engines for human and computer play, and a
//! typed event stream that keeps narration out of the battle core.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod decision;
pub mod element;
pub mod errors;
pub mod moves;
pub mod pokemon;
pub mod prefab_teams;
pub mod terminal;
pub mod trainer;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokemon-arena` crate,
// making it easy for users to import the most important types directly.

// Core battle engine functions and state.
pub use battle::engine::{resolve_turn, run_to_completion, BattleAction};
pub use battle::state::{
    Battle, BattleEvent, BattleInfo, BattleUi, EventBus, GameState, PokemonInfo, TrainerInfo,
    TurnRng,
};

// Core runtime types for a battle.
pub use element::{Affinity, Element};
pub use moves::Move;
pub use pokemon::{Pokemon, DEFAULT_HP};
pub use trainer::{BattleChoice, Trainer};

// Decision engines and the seams they plug into.
pub use decision::{
    pick, DecisionEngine, InteractiveDecisionEngine, PickContext, Picker, RandomDecisionEngine,
};

// Crate-specific error type.
pub use errors::BattleError;
