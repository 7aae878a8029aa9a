//! Game-state machine: score, countdown, and win/lose phase.
//!
//! Rule set: find every target before the countdown runs out. Hits after
//! the game ended are ignored; a restart begins a fresh round.

mod session;

pub use session::{FindOutcome, GameEvent, GamePhase, GameRules, GameSession};
