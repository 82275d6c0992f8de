//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - One tick per call, no internal clock
//! - Injected RNG only (food placement is the single random choice)
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Cell, CellKind, Direction, GameData, Snake};
pub use tick::{CollisionKind, TickOutcome, advance, place_food};
