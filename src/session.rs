//! Session lifecycle and tick pacing
//!
//! The controller owns the menu/playing/paused/game-over state machine,
//! admits simulation ticks against wall-clock time, and routes typed host
//! commands into the simulation. It never touches platform APIs directly;
//! persistence goes through the injected `HighScoreStore`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscore::HighScoreStore;
use crate::sim::{self, Direction, GameData, TickOutcome};

/// Lifecycle phase; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Typed command set the host maps raw input onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    TogglePause,
    Start,
    Restart,
}

/// A host event: a discrete command, or the repeating frame signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Command(Command),
    /// Monotonic timestamp in ms, delivered roughly once per display refresh
    Frame { now_ms: f64 },
}

/// Side signals for the audio collaborator. At most one `FoodEaten` and one
/// `LevelUp` per tick; `GameOver` once per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten,
    LevelUp,
    GameOver,
}

/// Top-level session controller
pub struct Session<S> {
    phase: GamePhase,
    data: GameData,
    rng: Pcg32,
    store: S,
    /// Timestamp of the last admitted tick. `None` means the baseline is
    /// established by the next frame (fresh entry into Playing).
    last_tick_ms: Option<f64>,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a session in the menu with a freshly seeded game
    pub fn new(store: S, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let high_score = store.load();
        log::info!("session start, seed {seed}, best score {high_score}");
        let data = GameData::new(high_score, &mut rng);
        Self {
            phase: GamePhase::Menu,
            data,
            rng,
            store,
            last_tick_ms: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Read-only snapshot for the rendering collaborator
    pub fn data(&self) -> &GameData {
        &self.data
    }

    /// Single entry point for everything the host delivers
    pub fn handle_event(&mut self, event: Event) -> Vec<GameEvent> {
        match event {
            Event::Command(cmd) => {
                self.handle_command(cmd);
                Vec::new()
            }
            Event::Frame { now_ms } => self.handle_frame(now_ms),
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        use Command::*;
        use GamePhase::*;

        match (self.phase, cmd) {
            (Menu, Start) => {
                self.last_tick_ms = None;
                self.phase = Playing;
            }
            (Playing, TogglePause) => self.phase = Paused,
            (Paused, TogglePause) => {
                // fresh baseline so resuming does not burst queued ticks
                self.last_tick_ms = None;
                self.phase = Playing;
            }
            (GameOver, Restart) => {
                let high_score = self.data.high_score;
                self.data = GameData::new(high_score, &mut self.rng);
                self.phase = Menu;
            }
            (Playing, MoveUp) => self.data.buffer_direction(Direction::Up),
            (Playing, MoveDown) => self.data.buffer_direction(Direction::Down),
            (Playing, MoveLeft) => self.data.buffer_direction(Direction::Left),
            (Playing, MoveRight) => self.data.buffer_direction(Direction::Right),
            // anything else is a no-op for the current phase
            _ => {}
        }
    }

    fn handle_frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        let Some(last) = self.last_tick_ms else {
            self.last_tick_ms = Some(now_ms);
            return Vec::new();
        };
        if now_ms - last < f64::from(self.data.speed_ms) {
            return Vec::new();
        }
        // at most one tick per frame; a stalled host clock drops its
        // backlog instead of replaying it
        self.last_tick_ms = Some(now_ms);

        let mut signals = Vec::new();
        match sim::advance(&mut self.data, &mut self.rng) {
            TickOutcome::Moved { ate_food, level_up } => {
                if ate_food {
                    signals.push(GameEvent::FoodEaten);
                }
                if level_up {
                    signals.push(GameEvent::LevelUp);
                }
            }
            TickOutcome::Collision { final_score, .. }
            | TickOutcome::Cleared { final_score } => {
                self.finish_game(final_score);
                signals.push(GameEvent::GameOver);
            }
        }
        signals
    }

    fn finish_game(&mut self, final_score: u32) {
        self.phase = GamePhase::GameOver;
        if final_score > self.data.high_score {
            self.data.high_score = final_score;
            self.store.save(final_score);
            log::info!("new best score {final_score}");
        }
    }
}
