//! Idle/demo mode - AI plays the game
//!
//! Tracks the ball with a seeded aim offset. The offset is re-rolled whenever
//! the ball leaves the paddle, so rallies vary and the AI misses now and then.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::GameState;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Demo-mode paddle controller
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Current aim offset as a fraction of half the paddle width
    offset: f32,
    /// Largest offset magnitude; above 1.0 the AI can miss
    sloppiness: f32,
    was_rising: bool,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self::with_sloppiness(seed, 1.15)
    }

    pub fn with_sloppiness(seed: u64, sloppiness: f32) -> Self {
        let mut pilot = Self {
            rng: Pcg32::seed_from_u64(seed),
            offset: 0.0,
            sloppiness: if sloppiness.is_finite() {
                sloppiness.max(0.0)
            } else {
                0.0
            },
            was_rising: true,
        };
        pilot.reroll();
        pilot
    }

    fn reroll(&mut self) {
        self.offset = if self.sloppiness > 0.0 {
            self.rng.random_range(-self.sloppiness..=self.sloppiness)
        } else {
            0.0
        };
    }

    /// Pointer target for this tick, or None when the session is not running
    pub fn pointer_target(&mut self, state: &GameState) -> Option<f32> {
        if !state.is_running() {
            return None;
        }

        let ball = &state.ball;
        let rising = ball.vel.y < 0.0;
        if rising && !self.was_rising {
            self.reroll();
        }
        self.was_rising = rising;

        // Lead the ball a little when it is on the way down
        let lead = if rising {
            0.0
        } else {
            let ticks_left = (PLAYFIELD_HEIGHT - ball.pos.y) / ball.vel.y.max(1.0);
            (ball.vel.x * ticks_left * 0.25).clamp(-60.0, 60.0)
        };

        let target = ball.pos.x + lead - self.offset * state.paddle.width / 2.0;
        // Stay strictly inside the playfield so the pointer is never ignored
        Some(target.clamp(1.0, PLAYFIELD_WIDTH - 1.0))
    }
}
