use crate::element::Affinity;
use crate::trainer::Trainer;
use serde::{Deserialize, Serialize};

/// Where the battle currently stands in its turn cycle.
///
/// `Player1Win`, `Player2Win` and `Draw` are terminal; everything else loops
/// back through `WaitingForActions` at the top of the next turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Both actives are standing; the next turn gathers an action from each side.
    WaitingForActions,
    /// Player 1's active fainted and a replacement must be sent out.
    WaitingForPlayer1Replacement,
    /// Player 2's active fainted and a replacement must be sent out.
    WaitingForPlayer2Replacement,
    /// Chosen actions are being executed.
    TurnInProgress,
    Player1Win,
    Player2Win,
    Draw,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Player1Win | GameState::Player2Win | GameState::Draw)
    }
}

/// Everything that can be narrated or recorded during a battle.
///
/// Events carry display names rather than references so they can outlive the
/// turn that produced them. `format` renders the player-facing line; events
/// that exist purely for bookkeeping render to `None` and are never shown.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted,
    TurnStarted {
        turn_number: u32,
    },
    MustChooseReplacement {
        trainer: String,
    },
    TurnToChoose {
        trainer: String,
    },
    MoveUsed {
        trainer: String,
        pokemon: String,
        used: String,
    },
    MoveMissed,
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    AttackEffectiveness {
        affinity: Affinity,
    },
    PokemonFainted {
        pokemon: String,
    },
    CalledBack {
        trainer: String,
        pokemon: String,
    },
    SentOut {
        trainer: String,
        pokemon: String,
    },
    BattleEnded {
        winner: Option<String>,
    },
}

impl BattleEvent {
    /// The narrated line for this event, or `None` for silent bookkeeping
    /// events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted => Some("The battle begins.".to_string()),
            BattleEvent::TurnStarted { .. } => None,
            BattleEvent::MustChooseReplacement { trainer } => {
                Some(format!("{} must choose a new Pokemon.", trainer))
            }
            BattleEvent::TurnToChoose { trainer } => {
                Some(format!("{}'s turn to choose an action.", trainer))
            }
            BattleEvent::MoveUsed { trainer, pokemon, used } => {
                Some(format!("{}'s {} used {}!", trainer, pokemon, used))
            }
            BattleEvent::MoveMissed => Some("It missed!".to_string()),
            BattleEvent::DamageDealt { .. } => None,
            BattleEvent::AttackEffectiveness { affinity } => match affinity {
                Affinity::Strong => Some("It was super effective!".to_string()),
                Affinity::Weak => Some("It was not very effective.".to_string()),
                Affinity::Neutral => None,
            },
            BattleEvent::PokemonFainted { pokemon } => Some(format!("{} fainted!", pokemon)),
            BattleEvent::CalledBack { trainer, pokemon } => {
                Some(format!("{} called back {}.", trainer, pokemon))
            }
            BattleEvent::SentOut { trainer, pokemon } => {
                Some(format!("{} chose {}. Go!", trainer, pokemon))
            }
            BattleEvent::BattleEnded { winner } => match winner {
                Some(name) => Some(format!("{} wins!", name)),
                None => Some("It's a draw!".to_string()),
            },
        }
    }

    /// System-paced notices are shown without waiting for acknowledgment; they
    /// immediately follow a health redraw and read as one sequence.
    pub fn auto_advance(&self) -> bool {
        matches!(self, BattleEvent::AttackEffectiveness { .. })
    }
}

/// The output boundary the battle core writes to. The core never reads
/// anything back: `notify` narrates one event, `refresh` lets a presentation
/// layer repaint health displays mid-resolution.
pub trait BattleUi {
    fn notify(&mut self, event: BattleEvent);
    fn refresh(&mut self, info: &BattleInfo);
}

/// Display snapshot of one active Pokemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInfo {
    pub summary: String,
    pub current_hp: u16,
    pub max_hp: u16,
}

/// Display snapshot of one side of the battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerInfo {
    /// Trainer name plus roster markers, e.g. `RED (*x*)`.
    pub header: String,
    pub active: PokemonInfo,
}

/// Display snapshot of the whole battle, sides in fixed player order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleInfo {
    pub sides: [TrainerInfo; 2],
}

impl BattleInfo {
    /// Snapshot two sides given in player order. Each active's summary carries
    /// its matchup marker against the opposing active.
    pub fn from_sides(player1: &Trainer, player2: &Trainer) -> Self {
        let side = |trainer: &Trainer, opponent: &Trainer| TrainerInfo {
            header: trainer.roster_summary(),
            active: PokemonInfo {
                summary: trainer.active().summary(opponent.active()),
                current_hp: trainer.active().current_hp(),
                max_hp: trainer.active().max_hp(),
            },
        };
        BattleInfo {
            sides: [side(player1, player2), side(player2, player1)],
        }
    }
}

/// A match between two trainers. Owns nothing beyond the trainers and the
/// bookkeeping derived from them; created once per match and discarded with it.
#[derive(Debug)]
pub struct Battle {
    pub players: [Trainer; 2],
    pub game_state: GameState,
    pub turn_number: u32,
}

impl Battle {
    pub fn new(player1: Trainer, player2: Trainer) -> Self {
        Battle {
            players: [player1, player2],
            game_state: GameState::WaitingForActions,
            turn_number: 0,
        }
    }

    pub fn info(&self) -> BattleInfo {
        BattleInfo::from_sides(&self.players[0], &self.players[1])
    }
}

/// Ordered recorder for battle events.
///
/// Doubles as a headless [`BattleUi`] so tests and non-interactive harnesses
/// can capture exactly what a battle narrated, in order.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
    refreshes: usize,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Number of redraw requests observed.
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Print all events using their narrated text, falling back to debug
    /// format for silent events.
    pub fn print_formatted(&self) {
        print!("{}", self);
    }
}

impl BattleUi for EventBus {
    fn notify(&mut self, event: BattleEvent) {
        self.push(event);
    }

    fn refresh(&mut self, _info: &BattleInfo) {
        self.refreshes += 1;
    }
}

impl std::fmt::Display for EventBus {
    /// Narrated lines, one per row; silent events shown in debug form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            match event.format() {
                Some(line) => writeln!(f, "  {}", line)?,
                None => writeln!(f, "  {:?}", event)?,
            }
        }
        Ok(())
    }
}

/// Oracle for every random draw a turn makes: accuracy rolls, the first-mover
/// coin flip, and random-policy picks.
///
/// Outcomes are percentages in 1..=100, pre-drawn so tests can script a whole
/// turn deterministically. Running out of outcomes means the engine asked for
/// more randomness than the script provided, which is a bug in the script or
/// the engine, so it aborts with the reason of the offending draw.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    cursor: usize,
}

impl TurnRng {
    /// Pool size for one production turn; far more than any turn can consume.
    const POOL: usize = 64;

    pub fn new_scripted(outcomes: Vec<u8>) -> Self {
        TurnRng { outcomes, cursor: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let outcomes = (0..Self::POOL).map(|_| rng.random_range(1..=100)).collect();
        TurnRng { outcomes, cursor: 0 }
    }

    /// Draw one outcome in 1..=100.
    pub fn percent(&mut self, reason: &str) -> u8 {
        if self.cursor >= self.outcomes.len() {
            panic!("turn oracle exhausted while drawing for: {}", reason);
        }
        let outcome = self.outcomes[self.cursor];
        self.cursor += 1;
        outcome
    }

    /// Fair coin: true on 1..=50, false on 51..=100.
    pub fn coin_flip(&mut self, reason: &str) -> bool {
        self.percent(reason) <= 50
    }

    /// Map one outcome onto an index in `0..len`.
    pub fn pick_index(&mut self, reason: &str, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index out of zero options for: {}", reason);
        let outcome = self.percent(reason) as usize;
        ((outcome - 1) * len / 100).min(len - 1)
    }
}
