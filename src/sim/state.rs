//! Game session state and core simulation types
//!
//! The session owns the ball, paddle and block grid for its lifetime and
//! sequences every phase transition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::BlockGrid;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Every block destroyed, waiting for advance
    LevelComplete,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Presentation events raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    LevelComplete,
    GameOver { final_score: u64 },
}

/// Ball spawn point
pub fn ball_spawn_point() -> Vec2 {
    Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT - BALL_SPAWN_LIFT)
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(vel: Vec2) -> Self {
        Self {
            pos: ball_spawn_point(),
            vel,
            radius: BALL_RADIUS,
        }
    }

    /// Put the ball back at the spawn point with the given velocity
    pub fn respawn(&mut self, vel: Vec2) {
        self.pos = ball_spawn_point();
        self.vel = vel;
    }

    /// Position after one more tick
    #[inline]
    pub fn projected(&self) -> Vec2 {
        self.pos + self.vel
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(width: f32) -> Self {
        let mut paddle = Self {
            x: 0.0,
            width,
            height: PADDLE_HEIGHT,
        };
        paddle.recenter();
        paddle
    }

    /// Fixed top edge
    #[inline]
    pub fn y(&self) -> f32 {
        PLAYFIELD_HEIGHT - self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y(), self.width, self.height)
    }

    pub fn max_x(&self) -> f32 {
        (PLAYFIELD_WIDTH - self.width).max(0.0)
    }

    pub fn recenter(&mut self) {
        self.x = (PLAYFIELD_WIDTH - self.width) / 2.0;
    }

    fn clamp(&mut self) {
        self.x = self.x.clamp(0.0, self.max_x());
    }

    /// Center the paddle under an absolute pointer position.
    /// Positions outside the playfield are ignored.
    pub fn move_to_pointer(&mut self, pointer_x: f32) {
        if pointer_x > 0.0 && pointer_x < PLAYFIELD_WIDTH {
            self.x = pointer_x - self.width / 2.0;
            self.clamp();
        }
    }

    /// Shift by a keyboard delta
    pub fn nudge(&mut self, dx: f32) {
        self.x += dx;
        self.clamp();
    }

    /// Shrink for the next level, never below `min_width`
    pub fn shrink(&mut self, amount: f32, min_width: f32) {
        self.width = (self.width - amount).max(min_width);
        self.clamp();
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter (Running ticks only)
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub blocks: BlockGrid,
    /// Velocity given to the ball on respawn this level
    pub level_velocity: Vec2,
    pub tuning: Tuning,
    /// Pending presentation events
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Create an idle session
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: tuning.starting_lives,
            level: 1,
            time_ticks: 0,
            ball: Ball::new(tuning.base_velocity),
            paddle: Paddle::new(tuning.paddle_width),
            blocks: BlockGrid::default(),
            level_velocity: tuning.base_velocity,
            tuning,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take pending presentation events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start (or restart) a session from scratch
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.level = 1;
        self.time_ticks = 0;
        self.level_velocity = self.tuning.base_velocity;
        self.blocks.reset();
        self.paddle = Paddle::new(self.tuning.paddle_width);
        self.ball.respawn(self.level_velocity);
        self.phase = GamePhase::Running;

        self.emit(GameEvent::ScoreChanged(self.score));
        self.emit(GameEvent::LivesChanged(self.lives));
        log::info!("Session started ({} blocks)", self.blocks.len());
    }

    /// Flip between Running and Paused. Other phases are left alone.
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => {
                log::debug!("Pause toggle ignored in {:?}", other);
                other
            }
        };
        self.phase
    }

    /// Move on from LevelComplete to the next level
    pub fn advance_level(&mut self) -> bool {
        if self.phase != GamePhase::LevelComplete {
            log::debug!("advance_level ignored in {:?}", self.phase);
            return false;
        }

        self.level += 1;
        let scale = self.tuning.level_speed_scale;
        // The frozen ball keeps its direction, only faster
        self.ball.vel *= scale;
        self.level_velocity *= scale;
        self.paddle
            .shrink(self.tuning.paddle_shrink, self.tuning.paddle_min_width);

        self.blocks.reset();
        self.ball.pos = ball_spawn_point();
        self.paddle.recenter();
        self.phase = GamePhase::Running;

        log::info!(
            "Level {} (paddle width {}, speed {:.2})",
            self.level,
            self.paddle.width,
            self.ball.speed()
        );
        true
    }

    /// Award points for a destroyed block
    pub(crate) fn award_block(&mut self) {
        self.score = self.score.saturating_add(self.tuning.block_points);
        self.emit(GameEvent::ScoreChanged(self.score));
    }

    /// Freeze the session after the last block falls
    pub(crate) fn complete_level(&mut self) {
        self.phase = GamePhase::LevelComplete;
        self.emit(GameEvent::LevelComplete);
        log::info!("Level {} complete, score {}", self.level, self.score);
    }

    /// Ball missed the paddle. Returns true if the session ended.
    pub(crate) fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.emit(GameEvent::LivesChanged(self.lives));
        log::debug!("Life lost, {} remaining", self.lives);

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.emit(GameEvent::GameOver {
                final_score: self.score,
            });
            log::info!("Game over at level {}, score {}", self.level, self.score);
            true
        } else {
            self.ball.respawn(self.level_velocity);
            self.paddle.recenter();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::default();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.is_running());
    }

    #[test]
    fn test_start_defaults() {
        let mut state = GameState::default();
        state.start();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.ball.pos, Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT - 30.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(state.paddle.x, (PLAYFIELD_WIDTH - 80.0) / 2.0);
        assert_eq!(state.blocks.alive_count(), 40);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ScoreChanged(0), GameEvent::LivesChanged(3)]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut state = GameState::default();
        state.start();
        state.score = 120;
        state.lives = 1;
        state.phase = GamePhase::LevelComplete;
        state.advance_level();
        state.phase = GamePhase::GameOver;

        state.start();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.paddle.width, PADDLE_WIDTH);
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = GameState::default();
        assert_eq!(state.toggle_pause(), GamePhase::Idle);

        state.start();
        assert_eq!(state.toggle_pause(), GamePhase::Paused);
        assert_eq!(state.toggle_pause(), GamePhase::Running);

        state.phase = GamePhase::GameOver;
        assert_eq!(state.toggle_pause(), GamePhase::GameOver);
    }

    #[test]
    fn test_advance_level_scales_and_shrinks() {
        let mut state = GameState::default();
        state.start();
        state.ball.vel = Vec2::new(3.0, -5.0);
        for block in state.blocks.iter_mut() {
            block.alive = false;
        }
        state.complete_level();

        assert!(state.advance_level());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.level, 2);
        assert_eq!(state.paddle.width, 75.0);
        assert!((state.ball.vel - Vec2::new(3.3, -5.5)).length() < 1e-5);
        assert!((state.level_velocity - Vec2::new(4.4, -4.4)).length() < 1e-5);
        assert_eq!(state.ball.pos, ball_spawn_point());
        assert_eq!(state.paddle.x, (PLAYFIELD_WIDTH - 75.0) / 2.0);
        assert_eq!(state.blocks.alive_count(), 40);
    }

    #[test]
    fn test_advance_level_only_from_level_complete() {
        let mut state = GameState::default();
        assert!(!state.advance_level());
        state.start();
        assert!(!state.advance_level());
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_paddle_width_floor() {
        let mut state = GameState::default();
        state.start();
        for _ in 0..20 {
            state.phase = GamePhase::LevelComplete;
            state.advance_level();
        }
        assert_eq!(state.paddle.width, PADDLE_MIN_WIDTH);
        assert_eq!(state.level, 21);
    }

    #[test]
    fn test_lose_life_respawns_with_level_velocity() {
        let mut state = GameState::default();
        state.start();
        state.level_velocity = Vec2::new(4.4, -4.4);
        state.ball.pos = Vec2::new(10.0, 470.0);
        state.ball.vel = Vec2::new(-2.0, 6.0);
        state.paddle.x = 0.0;

        assert!(!state.lose_life());
        assert_eq!(state.lives, 2);
        assert_eq!(state.ball.pos, ball_spawn_point());
        assert_eq!(state.ball.vel, Vec2::new(4.4, -4.4));
        assert_eq!(state.paddle.x, (PLAYFIELD_WIDTH - PADDLE_WIDTH) / 2.0);
    }

    #[test]
    fn test_pointer_clamps_and_ignores_outside() {
        let mut paddle = Paddle::new(80.0);
        paddle.move_to_pointer(5.0);
        assert_eq!(paddle.x, 0.0);
        paddle.move_to_pointer(535.0);
        assert_eq!(paddle.x, PLAYFIELD_WIDTH - 80.0);
        paddle.move_to_pointer(-20.0);
        assert_eq!(paddle.x, PLAYFIELD_WIDTH - 80.0);
        paddle.move_to_pointer(270.0);
        assert_eq!(paddle.x, 230.0);
    }

    #[test]
    fn test_snapshot_roundtrip_drops_events() {
        let mut state = GameState::default();
        state.start();
        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.phase, GamePhase::Running);
        assert_eq!(restored.blocks.alive_count(), 40);
        assert!(restored.drain_events().is_empty());
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let mut state = GameState::default();
        state.start();
        state.tuning.block_points = u64::MAX;
        state.award_block();
        state.award_block();
        assert_eq!(state.score, u64::MAX);
    }
}
