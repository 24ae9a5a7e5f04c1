//! Pluggable choice policies for battle trainers.
//!
//! Every decision a trainer makes during a battle goes through one
//! [`DecisionEngine`]: which move to use, which Pokemon to switch to, and
//! whether to attack or switch at all. The engine only ever sees the described
//! alternatives and returns the index of its pick, so a human behind a menu
//! and a uniform-random policy are interchangeable without the battle loop
//! knowing which is in play.

use crate::battle::state::TurnRng;

/// Context handed to an engine alongside the alternatives.
pub struct PickContext<'a> {
    /// Display name of the trainer making the choice.
    pub chooser: &'a str,
    /// Short description of what is being chosen.
    pub prompt: &'a str,
}

/// A strategy that selects one alternative out of a non-empty, ordered list.
///
/// The contract is index-based so the trait stays object-safe across the three
/// alternative kinds used in a battle (moves, switch targets, and the
/// attack-or-switch tag); [`pick`] is the typed front door callers actually use.
/// Implementations must return an index within `labels` and may block
/// cooperatively (the interactive engine does, until a human confirms).
pub trait DecisionEngine {
    fn pick_index(&mut self, ctx: &PickContext<'_>, labels: &[String], rng: &mut TurnRng) -> usize;
}

/// Select one element of `alternatives`, describing each one for the engine.
///
/// This is the uniform selection contract: the same call shape serves every
/// alternative type. Callers must never pass an empty list; doing so is an
/// internal contract violation and aborts.
pub fn pick<'a, T>(
    engine: &mut dyn DecisionEngine,
    ctx: &PickContext<'_>,
    alternatives: &'a [T],
    describe: impl Fn(&T) -> String,
    rng: &mut TurnRng,
) -> &'a T {
    assert!(
        !alternatives.is_empty(),
        "decision engine offered no alternatives for '{}'",
        ctx.prompt
    );
    let labels: Vec<String> = alternatives.iter().map(describe).collect();
    let index = engine.pick_index(ctx, &labels, rng);
    assert!(
        index < alternatives.len(),
        "decision engine picked index {} out of {} alternatives for '{}'",
        index,
        alternatives.len(),
        ctx.prompt
    );
    &alternatives[index]
}

/// Uniform-random policy. Stateless; every pick draws from the turn oracle so
/// scripted oracles reproduce its choices exactly.
pub struct RandomDecisionEngine;

impl DecisionEngine for RandomDecisionEngine {
    fn pick_index(&mut self, ctx: &PickContext<'_>, labels: &[String], rng: &mut TurnRng) -> usize {
        rng.pick_index(ctx.prompt, labels.len())
    }
}

/// Blocking, human-facing list selection. The battle loop never calls this
/// directly; it is the backing for [`InteractiveDecisionEngine`].
pub trait Picker {
    /// Present `options` and block until one is confirmed, returning its index.
    fn pick(&mut self, prompt: &str, options: &[String]) -> usize;
}

/// Policy that defers every choice to an external picker (e.g. a terminal
/// menu). The pick blocks the whole resolution loop until the human confirms;
/// nothing else in the battle advances while it is pending.
pub struct InteractiveDecisionEngine {
    picker: Box<dyn Picker>,
}

impl InteractiveDecisionEngine {
    pub fn new(picker: Box<dyn Picker>) -> Self {
        InteractiveDecisionEngine { picker }
    }
}

impl DecisionEngine for InteractiveDecisionEngine {
    fn pick_index(&mut self, ctx: &PickContext<'_>, labels: &[String], _rng: &mut TurnRng) -> usize {
        // Both humans in a hotseat game share one console, so the menu has to
        // say whose choice this is.
        let prompt = format!("{}: {}", ctx.chooser, ctx.prompt);
        self.picker.pick(&prompt, labels)
    }
}
