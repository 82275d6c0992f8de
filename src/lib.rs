//! Neon Snake - a classic grid snake game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, food, scoring)
//! - `session`: Lifecycle state machine, input routing and tick pacing
//! - `highscore`: Best-score persistence
//! - `render`: DOM grid renderer and HUD (browser only)
//! - `audio`: Web Audio sound effects (browser only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscore;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod session;
pub mod sim;

pub use highscore::HighScoreStore;
pub use session::{Command, Event, GameEvent, GamePhase, Session};
pub use sim::{Cell, Direction, GameData, Snake};

/// Game configuration constants
pub mod consts {
    /// The play field is square, GRID_SIZE x GRID_SIZE cells
    pub const GRID_SIZE: i32 = 20;
    /// Rendered size of one grid cell in CSS pixels
    pub const CELL_SIZE_PX: u32 = 24;

    /// Starting head cell
    pub const START_HEAD: (i32, i32) = (10, 10);
    /// Fallback food cell; normal placement is randomized
    pub const START_FOOD: (i32, i32) = (15, 15);

    /// Tick interval at level 1 (ms)
    pub const INITIAL_SPEED_MS: u32 = 150;
    /// Tick interval shrink per level (ms)
    pub const SPEED_STEP_MS: u32 = 15;
    /// Fastest allowed tick interval (ms)
    pub const MIN_SPEED_MS: u32 = 50;

    /// Food reward is FOOD_POINTS * current level
    pub const FOOD_POINTS: u32 = 10;
    /// Score span of one level
    pub const LEVEL_STEP_POINTS: u32 = 50;

    /// Rejection-sampling attempts before food placement falls back to a scan
    pub const FOOD_SAMPLE_LIMIT: u32 = 1024;
}
