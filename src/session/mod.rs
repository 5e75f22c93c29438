//! Presentation glue.
//!
//! `GameSession` owns the engine and the score store, holds the user
//! settings (tier, sound), and turns engine outcomes into `Presenter` and
//! `Scheduler` calls. A frontend implements those two traits and forwards
//! clicks, countdown ticks and re-hide callbacks to the session.

mod game;
pub mod presenter;

pub use game::{GameSession, Settings};
pub use presenter::{EndScreen, GameResult, Presenter, Scheduler, SoundCue};
