//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, velocities in pixels per tick
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (column-major block scan)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod rect;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{
    WallContact, bounce_velocity, paddle_bounce, reflect_off_walls, resolve_block_hits,
};
pub use grid::{Block, BlockColor, BlockGrid};
pub use rect::Rect;
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, ball_spawn_point};
pub use tick::{TickInput, tick};
