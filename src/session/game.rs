//! The glue between the engine, score persistence and a frontend.

use tracing::{debug, info, warn};

use super::presenter::{EndScreen, GameResult, Presenter, Scheduler, SoundCue};
use crate::core::{ConfigError, DifficultyTier, EngineConfig};
use crate::rules::{FlipOutcome, GameEngine, MismatchTicket, TickOutcome};
use crate::scores::{KeyValueStore, ScoreEntry, ScoreStore};

/// User-facing settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Tier used by the next `new_game`.
    pub tier: DifficultyTier,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tier: DifficultyTier::Easy,
            sound_enabled: true,
        }
    }
}

/// One player's game session: engine, high scores, settings and the
/// frontend callbacks.
pub struct GameSession<S, P, T> {
    engine: GameEngine,
    scores: ScoreStore<S>,
    settings: Settings,
    presenter: P,
    scheduler: T,
}

impl<S, P, T> GameSession<S, P, T>
where
    S: KeyValueStore,
    P: Presenter,
    T: Scheduler,
{
    /// Build a session from configuration. Shows the start prompt.
    pub fn new(config: EngineConfig, backend: S, presenter: P, scheduler: T) -> Result<Self, ConfigError> {
        let limit = config.high_score_limit;
        let engine = GameEngine::new(config)?;
        Ok(Self::with_engine(
            engine,
            ScoreStore::with_limit(backend, limit),
            presenter,
            scheduler,
        ))
    }

    /// Build a session around an existing engine. Shows the start prompt.
    pub fn with_engine(engine: GameEngine, scores: ScoreStore<S>, mut presenter: P, scheduler: T) -> Self {
        presenter.show_start_prompt();
        Self {
            engine,
            scores,
            settings: Settings::default(),
            presenter,
            scheduler,
        }
    }

    /// Start a game with the selected tier, replacing any game in progress.
    pub fn new_game(&mut self) -> Result<(), ConfigError> {
        self.scheduler.stop_countdown();
        let board = self.engine.start(self.settings.tier)?;

        self.presenter.hide_end_screen();
        self.presenter.render_board(board);
        self.presenter
            .update_stats(self.engine.moves(), self.engine.time_remaining());
        self.scheduler
            .start_countdown(self.engine.config().tick_interval);
        Ok(())
    }

    /// Change the tier. Any running game is dropped unscored.
    pub fn select_tier(&mut self, tier: DifficultyTier) {
        info!(from = %self.settings.tier, to = %tier, "tier selected");
        self.settings.tier = tier;
        self.engine.abandon();
        self.scheduler.stop_countdown();
        self.presenter.show_start_prompt();
    }

    /// Flip sound on or off. Returns the new state.
    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        debug!(enabled = self.settings.sound_enabled, "sound toggled");
        self.settings.sound_enabled
    }

    /// Handle a click on the card at `position`.
    pub fn click(&mut self, position: usize) -> FlipOutcome {
        let outcome = self.engine.flip_card(position);
        if outcome.is_rejected() {
            return outcome;
        }

        self.play(SoundCue::Flip);
        self.presenter.reveal(position);
        self.presenter
            .update_stats(self.engine.moves(), self.engine.time_remaining());

        match &outcome {
            FlipOutcome::Rejected(_) | FlipOutcome::Revealed { .. } => {}
            FlipOutcome::Matched { positions } => {
                self.play(SoundCue::Match);
                self.presenter.mark_solved(*positions);
            }
            FlipOutcome::Mismatch { ticket, delay, .. } => {
                self.scheduler.schedule_mismatch(*ticket, *delay);
            }
            FlipOutcome::Won { positions, entry } => {
                self.play(SoundCue::Match);
                self.presenter.mark_solved(*positions);
                self.finish_won(*entry);
            }
        }
        outcome
    }

    /// One countdown step.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick();
        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Running { time_remaining } => {
                self.presenter.update_stats(self.engine.moves(), time_remaining);
            }
            TickOutcome::Lost => {
                self.presenter.update_stats(self.engine.moves(), 0);
                self.finish_lost();
            }
        }
        outcome
    }

    /// Delayed re-hide of a mismatched pair.
    pub fn resolve_mismatch(&mut self, ticket: MismatchTicket) -> Option<[usize; 2]> {
        let hidden = self.engine.resolve_mismatch(&ticket)?;
        for position in hidden {
            self.presenter.hide(position);
        }
        Some(hidden)
    }

    fn finish_won(&mut self, entry: ScoreEntry) {
        self.scheduler.stop_countdown();
        self.play(SoundCue::Victory);

        let tier = self.engine.tier();
        let rank = match self.scores.record_win(tier, entry) {
            Ok(rank) => rank,
            Err(e) => {
                warn!(error = %e, tier = %tier, "failed to save high score");
                None
            }
        };
        self.show_end_screen(GameResult::Won(entry), rank);
    }

    fn finish_lost(&mut self) {
        self.scheduler.stop_countdown();
        self.play(SoundCue::Defeat);
        self.show_end_screen(GameResult::TimeUp, None);
    }

    fn show_end_screen(&mut self, result: GameResult, rank: Option<usize>) {
        let tier = self.engine.tier();
        let screen = EndScreen {
            tier,
            result,
            high_scores: self.scores.top(tier),
            rank,
        };
        self.presenter.show_end_screen(&screen);
    }

    fn play(&mut self, cue: SoundCue) {
        if self.settings.sound_enabled {
            self.presenter.play_sound(cue);
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreStore<S> {
        &self.scores
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }
}
