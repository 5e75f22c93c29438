//! Session integration tests.
//!
//! A recording presenter and scheduler stand in for the frontend, so the
//! tests can check which callbacks each trigger produces.

use std::time::Duration;

use memory_match::{
    Board, DifficultyTier, EndScreen, EngineConfig, FlipOutcome, GameEngine, GameResult, GameSession, KeyValueStore,
    MemoryStore, MismatchTicket, Phase, Presenter, Scheduler, ScoreEntry, ScoreStore, SoundCue, StoreError,
    TickOutcome,
};

// =============================================================================
// Test doubles
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Shown {
    Board(usize),
    Reveal(usize),
    Hide(usize),
    Solved([usize; 2]),
    Sound(SoundCue),
    Stats(u32, u32),
    StartPrompt,
    EndScreen(EndScreen),
    HideEndScreen,
}

#[derive(Default)]
struct Recorder {
    events: Vec<Shown>,
}

impl Recorder {
    fn sounds(&self) -> Vec<SoundCue> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Shown::Sound(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    fn end_screens(&self) -> Vec<&EndScreen> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Shown::EndScreen(screen) => Some(screen),
                _ => None,
            })
            .collect()
    }

    fn last_stats(&self) -> Option<(u32, u32)> {
        self.events.iter().rev().find_map(|e| match e {
            Shown::Stats(moves, time) => Some((*moves, *time)),
            _ => None,
        })
    }
}

impl Presenter for Recorder {
    fn render_board(&mut self, board: &Board) {
        self.events.push(Shown::Board(board.len()));
    }

    fn reveal(&mut self, position: usize) {
        self.events.push(Shown::Reveal(position));
    }

    fn hide(&mut self, position: usize) {
        self.events.push(Shown::Hide(position));
    }

    fn mark_solved(&mut self, positions: [usize; 2]) {
        self.events.push(Shown::Solved(positions));
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.events.push(Shown::Sound(cue));
    }

    fn update_stats(&mut self, moves: u32, time_remaining: u32) {
        self.events.push(Shown::Stats(moves, time_remaining));
    }

    fn show_start_prompt(&mut self) {
        self.events.push(Shown::StartPrompt);
    }

    fn show_end_screen(&mut self, screen: &EndScreen) {
        self.events.push(Shown::EndScreen(screen.clone()));
    }

    fn hide_end_screen(&mut self) {
        self.events.push(Shown::HideEndScreen);
    }
}

#[derive(Default)]
struct FakeClock {
    countdown: Option<Duration>,
    starts: usize,
    stops: usize,
    pending: Vec<(MismatchTicket, Duration)>,
}

impl Scheduler for FakeClock {
    fn start_countdown(&mut self, interval: Duration) {
        assert!(self.countdown.is_none(), "countdown started twice");
        self.countdown = Some(interval);
        self.starts += 1;
    }

    fn stop_countdown(&mut self) {
        self.countdown = None;
        self.stops += 1;
    }

    fn schedule_mismatch(&mut self, ticket: MismatchTicket, delay: Duration) {
        self.pending.push((ticket, delay));
    }
}

/// Backend that accepts reads but refuses every write.
#[derive(Default)]
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

type TestSession = GameSession<MemoryStore, Recorder, FakeClock>;

fn session(seed: u64) -> TestSession {
    let engine = GameEngine::with_seed(EngineConfig::default(), seed).unwrap();
    GameSession::with_engine(
        engine,
        ScoreStore::new(MemoryStore::new()),
        Recorder::default(),
        FakeClock::default(),
    )
}

fn non_partner(session: &TestSession, position: usize) -> usize {
    let board = session.engine().board();
    let image = board.get(position).unwrap().image_id;
    board.iter().find(|c| c.image_id != image).unwrap().position
}

/// Click every pair in board order.
fn solve_all(session: &mut TestSession) {
    for position in 0..session.engine().board().len() {
        if session.engine().is_solved(position) {
            continue;
        }
        let partner = session.engine().board().partner_of(position).unwrap();
        session.click(position);
        session.click(partner);
    }
}

// =============================================================================
// Starting
// =============================================================================

/// Test that a new session shows the start prompt and nothing else.
#[test]
fn test_new_session_shows_prompt() {
    let session = session(1);
    assert_eq!(session.presenter().events, vec![Shown::StartPrompt]);
    assert_eq!(session.engine().phase(), Phase::NotStarted);
    assert!(session.settings().sound_enabled);
}

/// Test that new_game renders the board and starts a single countdown.
#[test]
fn test_new_game_starts_countdown() {
    let mut session = session(1);
    session.new_game().unwrap();

    assert_eq!(
        session.presenter().events[1..],
        [Shown::HideEndScreen, Shown::Board(12), Shown::Stats(0, 60)]
    );
    assert_eq!(session.scheduler().countdown, Some(Duration::from_secs(1)));

    // Restarting stops the old countdown first (FakeClock panics otherwise)
    session.new_game().unwrap();
    assert_eq!(session.scheduler().starts, 2);
    assert_eq!(session.scheduler().stops, 2);
}

/// Test that GameSession::new builds a working session from configuration.
#[test]
fn test_session_from_config() {
    let config = EngineConfig::new().with_tick_interval(Duration::from_millis(250));
    let mut session = GameSession::new(config, MemoryStore::new(), Recorder::default(), FakeClock::default()).unwrap();
    session.new_game().unwrap();
    assert_eq!(session.scheduler().countdown, Some(Duration::from_millis(250)));
    assert_eq!(session.scores().limit(), 5);
}

// =============================================================================
// Clicking
// =============================================================================

/// Test that a mismatch schedules a re-hide that hides both cards.
#[test]
fn test_mismatch_schedules_rehide() {
    let mut session = session(4);
    session.new_game().unwrap();

    let other = non_partner(&session, 0);
    session.click(0);
    assert!(matches!(session.click(other), FlipOutcome::Mismatch { .. }));

    let (ticket, delay) = session.scheduler().pending[0];
    assert_eq!(delay, Duration::from_millis(1000));

    assert_eq!(session.resolve_mismatch(ticket), Some([0, other]));
    let tail = &session.presenter().events[session.presenter().events.len() - 2..];
    assert_eq!(tail, [Shown::Hide(0), Shown::Hide(other)]);

    // Firing the same callback again does nothing
    let before = session.presenter().events.len();
    assert_eq!(session.resolve_mismatch(ticket), None);
    assert_eq!(session.presenter().events.len(), before);
}

/// Test that rejected clicks produce no callbacks at all.
#[test]
fn test_rejected_click_is_silent() {
    let mut session = session(4);
    session.new_game().unwrap();
    session.click(3);
    let before = session.presenter().events.clone();

    assert!(session.click(3).is_rejected());
    assert!(session.click(99).is_rejected());
    assert_eq!(session.presenter().events, before);
}

/// Test that a match plays flip then match and marks the pair solved.
#[test]
fn test_match_callbacks() {
    let mut session = session(6);
    session.new_game().unwrap();
    let partner = session.engine().board().partner_of(0).unwrap();

    session.click(0);
    session.click(partner);

    assert_eq!(session.presenter().sounds(), vec![SoundCue::Flip, SoundCue::Flip, SoundCue::Match]);
    assert!(session.presenter().events.contains(&Shown::Solved([0, partner])));
    assert_eq!(session.presenter().last_stats(), Some((2, 60)));
}

/// Test that muting suppresses every sound cue.
#[test]
fn test_sound_toggle() {
    let mut session = session(6);
    assert!(!session.toggle_sound());
    session.new_game().unwrap();
    solve_all(&mut session);
    assert!(session.presenter().sounds().is_empty());

    assert!(session.toggle_sound());
}

// =============================================================================
// Game end
// =============================================================================

/// Test that a win stops the countdown and records the score exactly once.
#[test]
fn test_win_records_once() {
    let mut session = session(8);
    session.new_game().unwrap();
    for _ in 0..10 {
        session.tick();
    }
    solve_all(&mut session);

    assert_eq!(session.engine().phase(), Phase::Won);
    assert_eq!(session.scheduler().countdown, None);

    let expected = ScoreEntry {
        score: 600 + 500 - 60,
        moves: 12,
        time_remaining: 50,
    };
    assert_eq!(session.scores().top(DifficultyTier::Easy), vec![expected]);

    let screens = session.presenter().end_screens();
    assert_eq!(screens.len(), 1);
    assert_eq!(screens[0].result, GameResult::Won(expected));
    assert_eq!(screens[0].high_scores, vec![expected]);
    assert_eq!(screens[0].rank, Some(0));
    assert_eq!(session.presenter().sounds().last(), Some(&SoundCue::Victory));

    // Late ticks and clicks change nothing
    assert_eq!(session.tick(), TickOutcome::Ignored);
    assert!(session.click(0).is_rejected());
    assert_eq!(session.scores().top(DifficultyTier::Easy).len(), 1);
}

/// Test that running out of time shows "time up" and records nothing.
#[test]
fn test_loss_records_nothing() {
    let mut session = session(8);
    session.new_game().unwrap();
    let partner = session.engine().board().partner_of(0).unwrap();
    session.click(0);
    session.click(partner);

    while session.tick() != TickOutcome::Lost {}

    assert_eq!(session.engine().phase(), Phase::Lost);
    assert_eq!(session.scheduler().countdown, None);
    assert!(session.scores().load().is_empty());
    assert_eq!(session.presenter().last_stats(), Some((2, 0)));

    let screens = session.presenter().end_screens();
    assert_eq!(screens.len(), 1);
    assert_eq!(screens[0].result, GameResult::TimeUp);
    assert_eq!(screens[0].headline(), "Time's up!");
    assert_eq!(session.presenter().sounds().last(), Some(&SoundCue::Defeat));
}

/// Test that the end screen lists the active tier's scores only.
#[test]
fn test_end_screen_shows_tier_list() {
    let mut session = session(10);
    session.select_tier(DifficultyTier::Medium);
    session.new_game().unwrap();
    solve_all(&mut session);

    session.select_tier(DifficultyTier::Easy);
    session.new_game().unwrap();
    while session.tick() != TickOutcome::Lost {}

    let screens = session.presenter().end_screens();
    assert_eq!(screens.len(), 2);
    assert_eq!(screens[0].tier, DifficultyTier::Medium);
    assert_eq!(screens[0].high_scores.len(), 1);
    assert_eq!(screens[1].tier, DifficultyTier::Easy);
    assert!(screens[1].high_scores.is_empty());
}

/// Test that a failing store still shows the end screen.
#[test]
fn test_store_failure_is_not_fatal() {
    let engine = GameEngine::with_seed(EngineConfig::default(), 2).unwrap();
    let mut session = GameSession::with_engine(
        engine,
        ScoreStore::new(ReadOnlyStore),
        Recorder::default(),
        FakeClock::default(),
    );
    session.new_game().unwrap();
    for position in 0..12 {
        if session.engine().is_solved(position) {
            continue;
        }
        let partner = session.engine().board().partner_of(position).unwrap();
        session.click(position);
        session.click(partner);
    }

    assert_eq!(session.engine().phase(), Phase::Won);
    let screens = session.presenter().end_screens();
    assert_eq!(screens.len(), 1);
    assert_eq!(screens[0].rank, None);
    assert!(screens[0].high_scores.is_empty());
}

// =============================================================================
// Restart and tier changes
// =============================================================================

/// Test that a pending re-hide from an abandoned game is ignored.
#[test]
fn test_restart_discards_pending_rehide() {
    let mut session = session(12);
    session.new_game().unwrap();
    let other = non_partner(&session, 0);
    session.click(0);
    session.click(other);
    let (ticket, _) = session.scheduler().pending[0];

    session.select_tier(DifficultyTier::Hard);
    session.new_game().unwrap();

    assert_eq!(session.engine().moves(), 0);
    assert_eq!(session.engine().time_remaining(), 120);
    assert!(session.engine().flipped().is_empty());
    assert_eq!(session.resolve_mismatch(ticket), None);
}

/// Test that changing tier abandons the game and stops the countdown.
#[test]
fn test_select_tier_abandons() {
    let mut session = session(12);
    session.new_game().unwrap();
    session.click(0);

    session.select_tier(DifficultyTier::Medium);
    assert_eq!(session.settings().tier, DifficultyTier::Medium);
    assert_eq!(session.engine().phase(), Phase::NotStarted);
    assert_eq!(session.scheduler().countdown, None);
    assert_eq!(session.presenter().events.last(), Some(&Shown::StartPrompt));

    // The old countdown may still fire once; it is ignored
    assert_eq!(session.tick(), TickOutcome::Ignored);
    assert!(session.scores().load().is_empty());
}
