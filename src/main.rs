use pokemon_arena::battle::engine::run_to_completion;
use pokemon_arena::battle::state::{Battle, GameState};
use pokemon_arena::decision::{DecisionEngine, InteractiveDecisionEngine, RandomDecisionEngine};
use pokemon_arena::prefab_teams::random_squad;
use pokemon_arena::terminal::SharedTerminal;
use pokemon_arena::trainer::Trainer;
use std::error::Error;

const SQUAD_SIZE: usize = 3;
const NAME_LIMIT: usize = 10;

fn main() -> Result<(), Box<dyn Error>> {
    let terminal = SharedTerminal::new()?;
    terminal.say("Welcome to the Pokemon Arena!")?;

    let kinds = [
        "Human vs Computer",
        "Human vs Human",
        "Computer vs Computer",
    ];
    let labels: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
    let kind = terminal.menu("Choose a battle:", &labels)?;

    let (player1, player2) = match kind {
        0 => (
            human_trainer(&terminal, "RED")?,
            computer_trainer(&terminal, "BLUE")?,
        ),
        1 => (
            human_trainer(&terminal, "RED")?,
            human_trainer(&terminal, "BLUE")?,
        ),
        _ => (
            computer_trainer(&terminal, "RED")?,
            computer_trainer(&terminal, "BLUE")?,
        ),
    };

    let mut battle = Battle::new(player1, player2);
    let mut ui = terminal.clone();
    let outcome = run_to_completion(&mut battle, &mut ui);

    if outcome == GameState::Draw {
        terminal.say("Neither side can continue.")?;
    }
    terminal.say("Thanks for playing!")?;
    Ok(())
}

/// Ask for a name (falling back to `default` when the player just presses
/// Enter) and arm the trainer with a menu-driven decision engine.
fn human_trainer(terminal: &SharedTerminal, default: &str) -> Result<Trainer, Box<dyn Error>> {
    let prompt = format!("What's your name, challenger? (Enter for {})", default);
    let mut name = terminal.read_name(&prompt, NAME_LIMIT)?;
    if name.is_empty() {
        name = default.to_string();
    }
    let engine = InteractiveDecisionEngine::new(Box::new(terminal.clone()));
    build_trainer(name, Box::new(engine))
}

/// Computer trainers pick a strategy from the same menu a human would see.
/// Only the coin-flip strategy ships today, but the menu keeps the seam open.
fn computer_trainer(terminal: &SharedTerminal, name: &str) -> Result<Trainer, Box<dyn Error>> {
    let prompt = format!("Choose a strategy for {}:", name);
    let strategies = vec!["Random".to_string()];
    let _ = terminal.menu(&prompt, &strategies)?;
    terminal.say(&format!("{} joins the arena.", name))?;
    build_trainer(name.to_string(), Box::new(RandomDecisionEngine))
}

fn build_trainer(
    name: String,
    engine: Box<dyn DecisionEngine>,
) -> Result<Trainer, Box<dyn Error>> {
    let trainer = Trainer::new(name, random_squad(SQUAD_SIZE), engine)?;
    Ok(trainer)
}
