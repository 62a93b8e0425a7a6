//! Block Breaker - a single-screen ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state)
//! - `driver`: Frame loop driver (scheduling, input intents, presentation events)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{FrameScheduler, FrameTarget, Key, LoopDriver, Presenter};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels, origin top-left, y down)
    pub const PLAYFIELD_WIDTH: f32 = 540.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Spawn height above the bottom edge
    pub const BALL_SPAWN_LIFT: f32 = 30.0;
    /// Base velocity (pixels per tick)
    pub const BALL_START_DX: f32 = 4.0;
    pub const BALL_START_DY: f32 = -4.0;

    /// Paddle defaults - paddle sits flush with the bottom edge
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_MIN_WIDTH: f32 = 40.0;
    /// Width lost per level advance
    pub const PADDLE_SHRINK: f32 = 5.0;
    /// Keyboard hold movement per tick
    pub const PADDLE_KEY_STEP: f32 = 7.0;
    /// Fraction of speed that may go sideways after a paddle bounce
    pub const PADDLE_BOUNCE_DAMPING: f32 = 0.8;

    /// Block grid layout
    pub const BLOCK_COLUMNS: usize = 8;
    pub const BLOCK_ROWS: usize = 5;
    pub const BLOCK_WIDTH: f32 = 50.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_PADDING: f32 = 10.0;
    pub const BLOCK_OFFSET_LEFT: f32 = 35.0;
    pub const BLOCK_OFFSET_TOP: f32 = 60.0;

    /// Scoring and progression
    pub const BLOCK_POINTS: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;
    /// Ball velocity multiplier per level advance (both axes)
    pub const LEVEL_SPEED_SCALE: f32 = 1.1;
}
