//! Session state machine: Menu, Playing, Paused and GameOver.
//!
//! The session owns the engine, the fixed clock and the mode toggles. Input
//! arrives as [`Command`]s; commands that make no sense in the current state
//! are ignored. Sound feedback leaves as [`Cue`]s for the audio adapter.

use super::clock::FixedClock;
use super::engine::Engine;
use super::tier::SpeedTier;
use super::types::{CollisionCause, TickEvent};
use crate::utils::persistence::ScoreStore;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Discrete player commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    PauseToggle,
    Start,
    Retry,
    ToMenu,
    ToggleHardMode,
    ToggleNightMode,
    ToggleSound,
}

/// Sound effect requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Score,
    Collision,
    SpeedTierChanged,
    Select,
}

impl Cue {
    /// Cue that accompanies an engine event, if any.
    pub fn for_event(event: &TickEvent) -> Option<Cue> {
        match event {
            TickEvent::ObstaclePassed { .. } => Some(Cue::Score),
            TickEvent::SpeedTierChanged { .. } => Some(Cue::SpeedTierChanged),
            TickEvent::Collision { .. } => Some(Cue::Collision),
            TickEvent::NewBestScore { .. } => None,
        }
    }
}

/// Menu toggles, seeded from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    pub hard_mode: bool,
    pub night_mode: bool,
    pub sound_enabled: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            hard_mode: false,
            night_mode: false,
            sound_enabled: true,
        }
    }
}

pub struct Session<R: Rng, S: ScoreStore> {
    engine: Engine<R>,
    store: S,
    state: SessionState,
    clock: FixedClock,
    toggles: Toggles,
    /// Best score as last written to the store.
    saved_best: u32,
    /// What ended the most recent session.
    last_collision: Option<CollisionCause>,
    /// The running session overtook the best score it started with.
    new_best: bool,
}

impl<R: Rng, S: ScoreStore> Session<R, S> {
    /// Create a session in the Menu state, loading the best score from `store`.
    pub fn new(rng: R, store: S, toggles: Toggles) -> Self {
        let best = store.load_best_score();
        let mut engine = Engine::new(rng, best);
        engine.reset(toggles.hard_mode);
        log::info!("loaded best score {}", best);

        Self {
            engine,
            store,
            state: SessionState::Menu,
            clock: FixedClock::default(),
            toggles,
            saved_best: best,
            last_collision: None,
            new_best: false,
        }
    }

    /// Apply a player command. Returns the cues to play.
    pub fn handle(&mut self, command: Command) -> Vec<Cue> {
        let mut cues = Vec::new();

        match (self.state, command) {
            (SessionState::Menu, Command::Start) | (SessionState::GameOver, Command::Retry) => {
                self.begin();
                self.push_cue(&mut cues, Cue::Select);
                self.push_cue(&mut cues, Cue::Jump);
            }
            (SessionState::Playing, Command::Jump) => {
                self.engine.jump();
                self.push_cue(&mut cues, Cue::Jump);
            }
            (SessionState::Playing, Command::PauseToggle) => {
                self.state = SessionState::Paused;
                self.clock.stop();
                log::debug!("paused at score {}", self.engine.score());
            }
            (SessionState::Paused, Command::PauseToggle) => {
                self.state = SessionState::Playing;
                self.clock.start();
                log::debug!("resumed");
            }
            (SessionState::GameOver, Command::ToMenu) => {
                self.engine.reset(self.toggles.hard_mode);
                self.new_best = false;
                self.state = SessionState::Menu;
            }
            (SessionState::Menu, Command::ToggleHardMode) => {
                self.toggles.hard_mode = !self.toggles.hard_mode;
                self.push_cue(&mut cues, Cue::Select);
            }
            (SessionState::Menu, Command::ToggleNightMode) => {
                self.toggles.night_mode = !self.toggles.night_mode;
                self.push_cue(&mut cues, Cue::Select);
            }
            (SessionState::Menu, Command::ToggleSound) => {
                self.toggles.sound_enabled = !self.toggles.sound_enabled;
                self.push_cue(&mut cues, Cue::Select);
            }
            (state, command) => {
                log::trace!("ignoring {:?} in {:?}", command, state);
            }
        }

        cues
    }

    /// Run one fixed step. Does nothing unless Playing.
    pub fn tick(&mut self) -> Vec<TickEvent> {
        if self.state != SessionState::Playing {
            return Vec::new();
        }

        let events = self.engine.tick();
        for event in &events {
            match event {
                TickEvent::Collision { cause } => self.finish(*cause),
                TickEvent::NewBestScore { .. } => self.new_best = true,
                TickEvent::SpeedTierChanged { tier } => {
                    log::debug!("speed tier {} at score {}", tier.level(), self.engine.score());
                }
                _ => {}
            }
        }
        events
    }

    /// Feed wall time to the clock and run every step that falls due.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<TickEvent> {
        let steps = self.clock.advance(dt_ms);
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.tick());
            if self.state != SessionState::Playing {
                break;
            }
        }
        events
    }

    /// Cues for a batch of engine events, respecting the sound toggle.
    pub fn cues_for(&self, events: &[TickEvent]) -> Vec<Cue> {
        if !self.toggles.sound_enabled {
            return Vec::new();
        }
        events.iter().filter_map(Cue::for_event).collect()
    }

    fn begin(&mut self) {
        self.engine.reset(self.toggles.hard_mode);
        self.engine.jump();
        self.state = SessionState::Playing;
        self.last_collision = None;
        self.new_best = false;
        self.clock.start();
        log::info!(
            "session started (hard: {}, best: {})",
            self.toggles.hard_mode,
            self.engine.best_score()
        );
    }

    fn finish(&mut self, cause: CollisionCause) {
        self.state = SessionState::GameOver;
        self.clock.stop();
        self.last_collision = Some(cause);
        log::info!(
            "session over: {:?}, score {}, best {}",
            cause,
            self.engine.score(),
            self.engine.best_score()
        );

        let best = self.engine.best_score();
        if best > self.saved_best {
            match self.store.save_best_score(best) {
                Ok(()) => self.saved_best = best,
                Err(e) => log::warn!("could not save best score {}: {}", best, e),
            }
        }
    }

    fn push_cue(&self, cues: &mut Vec<Cue>, cue: Cue) {
        if self.toggles.sound_enabled {
            cues.push(cue);
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn best_score(&self) -> u32 {
        self.engine.best_score()
    }

    pub fn tier(&self) -> SpeedTier {
        self.engine.tier()
    }

    pub fn last_collision(&self) -> Option<CollisionCause> {
        self.last_collision
    }

    /// Whether this session beat the previous best. A tie does not count.
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::MemoryScoreStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> Session<ChaCha8Rng, MemoryScoreStore> {
        Session::new(
            ChaCha8Rng::seed_from_u64(11),
            MemoryScoreStore::default(),
            Toggles::default(),
        )
    }

    /// Tick until the session leaves Playing, with a safety cap.
    fn crash(session: &mut Session<ChaCha8Rng, MemoryScoreStore>) -> Vec<TickEvent> {
        let mut events = Vec::new();
        for _ in 0..10_000 {
            events.extend(session.tick());
            if session.state() != SessionState::Playing {
                break;
            }
        }
        events
    }

    #[test]
    fn test_starts_in_menu() {
        let session = session();
        assert_eq!(session.state(), SessionState::Menu);
        assert!(!session.is_clock_running());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_start_resets_and_jumps() {
        let mut session = session();
        let cues = session.handle(Command::Start);
        assert_eq!(session.state(), SessionState::Playing);
        assert!(session.is_clock_running());
        assert_eq!(cues, vec![Cue::Select, Cue::Jump]);
        assert!((session.engine().bird().velocity - (-11.0)).abs() < 1e-9);
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut session = session();
        assert!(session.handle(Command::Jump).is_empty());
        assert!(session.engine().bird().velocity.abs() < f64::EPSILON);

        session.handle(Command::Start);
        session.tick();
        assert_eq!(session.handle(Command::Jump), vec![Cue::Jump]);
        assert!((session.engine().bird().velocity - (-11.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pause_freezes_the_engine() {
        let mut session = session();
        session.handle(Command::Start);
        session.tick();

        session.handle(Command::PauseToggle);
        assert_eq!(session.state(), SessionState::Paused);
        assert!(!session.is_clock_running());

        let bird_before = session.engine().bird().clone();
        assert!(session.tick().is_empty());
        assert!(session.advance(500).is_empty());
        assert!(session.handle(Command::Jump).is_empty());
        assert_eq!(session.engine().bird(), &bird_before);

        session.handle(Command::PauseToggle);
        assert_eq!(session.state(), SessionState::Playing);
        assert!(session.is_clock_running());
    }

    #[test]
    fn test_collision_ends_session_and_saves_best() {
        let mut session = session();
        session.handle(Command::Start);
        let events = crash(&mut session);

        assert_eq!(session.state(), SessionState::GameOver);
        assert!(!session.is_clock_running());
        assert!(events.last().is_some_and(TickEvent::is_collision));
        assert!(session.last_collision().is_some());
        // Free fall from the centre hits the ground long before the first pipe
        assert_eq!(session.last_collision(), Some(CollisionCause::Ground));
        // Score stayed at zero, so nothing new to save
        assert_eq!(session.store().saves, 0);
    }

    #[test]
    fn test_game_over_ignores_play_commands() {
        let mut session = session();
        session.handle(Command::Start);
        crash(&mut session);

        assert!(session.handle(Command::Jump).is_empty());
        assert!(session.handle(Command::PauseToggle).is_empty());
        assert!(session.handle(Command::ToggleHardMode).is_empty());
        assert_eq!(session.state(), SessionState::GameOver);
        assert!(!session.toggles().hard_mode);
        assert!(session.tick().is_empty());
    }

    #[test]
    fn test_retry_starts_fresh() {
        let mut session = session();
        session.handle(Command::Start);
        crash(&mut session);

        let cues = session.handle(Command::Retry);
        assert_eq!(cues, vec![Cue::Select, Cue::Jump]);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.engine().pipes().len(), 3);
        assert!(session.last_collision().is_none());
    }

    #[test]
    fn test_to_menu_resets_without_clock() {
        let mut session = session();
        session.handle(Command::Start);
        crash(&mut session);

        session.handle(Command::ToMenu);
        assert_eq!(session.state(), SessionState::Menu);
        assert!(!session.is_clock_running());
        assert!((session.engine().bird().y - 300.0).abs() < f64::EPSILON);
        assert_eq!(session.engine().tick_count(), 0);
    }

    #[test]
    fn test_toggles_only_in_menu() {
        let mut session = session();
        assert_eq!(session.handle(Command::ToggleHardMode), vec![Cue::Select]);
        assert_eq!(session.handle(Command::ToggleNightMode), vec![Cue::Select]);
        assert!(session.toggles().hard_mode);
        assert!(session.toggles().night_mode);

        session.handle(Command::Start);
        assert!(session.engine().handicap().hard_mode);
        assert!(session.handle(Command::ToggleNightMode).is_empty());
        assert!(session.toggles().night_mode);
    }

    #[test]
    fn test_sound_toggle_silences_cues() {
        let mut session = session();
        // Turning sound off plays nothing; turning it back on plays Select
        assert!(session.handle(Command::ToggleSound).is_empty());
        assert!(!session.toggles().sound_enabled);
        assert!(session.handle(Command::Start).is_empty());

        let events = crash(&mut session);
        assert!(session.cues_for(&events).is_empty());

        session.handle(Command::ToMenu);
        assert_eq!(session.handle(Command::ToggleSound), vec![Cue::Select]);
    }

    #[test]
    fn test_cue_mapping() {
        assert_eq!(
            Cue::for_event(&TickEvent::ObstaclePassed { score: 1 }),
            Some(Cue::Score)
        );
        assert_eq!(Cue::for_event(&TickEvent::NewBestScore { best: 1 }), None);
        assert_eq!(
            Cue::for_event(&TickEvent::Collision {
                cause: CollisionCause::Pipe
            }),
            Some(Cue::Collision)
        );
    }

    #[test]
    fn test_advance_runs_whole_steps() {
        let mut session = session();
        session.handle(Command::Start);
        session.advance(48);
        assert_eq!(session.engine().tick_count(), 3);
        session.advance(10);
        assert_eq!(session.engine().tick_count(), 3);
        session.advance(6);
        assert_eq!(session.engine().tick_count(), 4);
    }

    #[test]
    fn test_best_score_loaded_from_store() {
        let session = Session::new(
            ChaCha8Rng::seed_from_u64(1),
            MemoryScoreStore::with_best(17),
            Toggles::default(),
        );
        assert_eq!(session.best_score(), 17);
    }
}
