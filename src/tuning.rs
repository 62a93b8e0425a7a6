//! Data-driven game balance
//!
//! Gameplay numbers live here so they can be overridden from JSON without
//! touching the simulation. Playfield and grid geometry stay in `consts`
//! because every bound check must agree on them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Fastest allowed level-1 ball (pixels per tick), under the block height
pub const MAX_BASE_SPEED: f32 = 16.0;
/// Largest per-level speed multiplier
pub const MAX_LEVEL_SPEED_SCALE: f32 = 2.0;
/// Largest per-block award
pub const MAX_BLOCK_POINTS: u64 = 1_000_000;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball velocity on start and respawn at level 1 (pixels per tick)
    pub base_velocity: Vec2,
    /// Multiplier applied to ball velocity on each level advance
    pub level_speed_scale: f32,
    /// Paddle width at level 1
    pub paddle_width: f32,
    /// Width lost per level advance
    pub paddle_shrink: f32,
    /// Paddle never shrinks below this
    pub paddle_min_width: f32,
    /// Keyboard hold movement per tick
    pub paddle_key_step: f32,
    /// Sideways share of speed after a paddle bounce, must stay below 1
    pub bounce_damping: f32,
    /// Points awarded per destroyed block
    pub block_points: u64,
    /// Lives at session start
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_velocity: Vec2::new(BALL_START_DX, BALL_START_DY),
            level_speed_scale: LEVEL_SPEED_SCALE,
            paddle_width: PADDLE_WIDTH,
            paddle_shrink: PADDLE_SHRINK,
            paddle_min_width: PADDLE_MIN_WIDTH,
            paddle_key_step: PADDLE_KEY_STEP,
            bounce_damping: PADDLE_BOUNCE_DAMPING,
            block_points: BLOCK_POINTS,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Correct values the simulation cannot honour
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(0.0..1.0).contains(&self.bounce_damping) {
            let fixed = if self.bounce_damping.is_finite() {
                self.bounce_damping.clamp(0.0, 0.95)
            } else {
                defaults.bounce_damping
            };
            log::warn!(
                "bounce_damping {} out of range [0, 1), using {}",
                self.bounce_damping,
                fixed
            );
            self.bounce_damping = fixed;
        }

        if self.base_velocity.y >= 0.0 || !self.base_velocity.is_finite() {
            log::warn!(
                "base_velocity {:?} must head upward, using default",
                self.base_velocity
            );
            self.base_velocity = defaults.base_velocity;
        } else if self.base_velocity.length() > MAX_BASE_SPEED {
            let fixed = self.base_velocity.clamp_length_max(MAX_BASE_SPEED);
            log::warn!(
                "base_velocity {:?} faster than {}, using {:?}",
                self.base_velocity,
                MAX_BASE_SPEED,
                fixed
            );
            self.base_velocity = fixed;
        }

        if !self.level_speed_scale.is_finite() {
            log::warn!(
                "level_speed_scale {} not finite, using default",
                self.level_speed_scale
            );
            self.level_speed_scale = defaults.level_speed_scale;
        } else if !(1.0..=MAX_LEVEL_SPEED_SCALE).contains(&self.level_speed_scale) {
            let fixed = self.level_speed_scale.clamp(1.0, MAX_LEVEL_SPEED_SCALE);
            log::warn!(
                "level_speed_scale {} out of range [1, {}], using {}",
                self.level_speed_scale,
                MAX_LEVEL_SPEED_SCALE,
                fixed
            );
            self.level_speed_scale = fixed;
        }

        // Paddle must fit inside the playfield and never collapse
        if !self.paddle_min_width.is_finite() {
            log::warn!("paddle_min_width {} not finite, using default", self.paddle_min_width);
            self.paddle_min_width = defaults.paddle_min_width;
        }
        let min_width = self.paddle_min_width.clamp(1.0, PLAYFIELD_WIDTH);
        if min_width != self.paddle_min_width {
            log::warn!("paddle_min_width {} clamped to {}", self.paddle_min_width, min_width);
            self.paddle_min_width = min_width;
        }
        if !self.paddle_width.is_finite() {
            log::warn!("paddle_width {} not finite, using default", self.paddle_width);
            self.paddle_width = defaults.paddle_width;
        }
        let width = self.paddle_width.clamp(self.paddle_min_width, PLAYFIELD_WIDTH);
        if width != self.paddle_width {
            log::warn!("paddle_width {} clamped to {}", self.paddle_width, width);
            self.paddle_width = width;
        }

        if !(0.0..=PLAYFIELD_WIDTH).contains(&self.paddle_shrink) {
            let fixed = if self.paddle_shrink.is_finite() {
                self.paddle_shrink.clamp(0.0, PLAYFIELD_WIDTH)
            } else {
                defaults.paddle_shrink
            };
            log::warn!("paddle_shrink {} out of range, using {}", self.paddle_shrink, fixed);
            self.paddle_shrink = fixed;
        }
        if !(self.paddle_key_step > 0.0 && self.paddle_key_step <= PLAYFIELD_WIDTH) {
            log::warn!(
                "paddle_key_step {} out of range (0, {}], using default",
                self.paddle_key_step,
                PLAYFIELD_WIDTH
            );
            self.paddle_key_step = defaults.paddle_key_step;
        }

        if self.block_points > MAX_BLOCK_POINTS {
            log::warn!(
                "block_points {} above {}, using {}",
                self.block_points,
                MAX_BLOCK_POINTS,
                MAX_BLOCK_POINTS
            );
            self.block_points = MAX_BLOCK_POINTS;
        }
        if self.starting_lives == 0 {
            log::warn!("starting_lives 0, using 1");
            self.starting_lives = 1;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "block_points": 25 }"#).unwrap();
        assert_eq!(tuning.block_points, 25);
        assert_eq!(tuning.paddle_width, PADDLE_WIDTH);
        assert_eq!(tuning.base_velocity, Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_damping_at_or_above_one_is_clamped() {
        let tuning = Tuning::from_json(r#"{ "bounce_damping": 1.5 }"#).unwrap();
        assert!(tuning.bounce_damping < 1.0);
    }

    #[test]
    fn test_paddle_width_respects_minimum() {
        let tuning = Tuning {
            paddle_width: 10.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.paddle_width, PADDLE_MIN_WIDTH);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_defaults_survive_sanitize() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }

    #[test]
    fn test_huge_block_points_are_capped() {
        let tuning = Tuning::from_json(r#"{ "block_points": 18446744073709551615 }"#).unwrap();
        assert_eq!(tuning.block_points, MAX_BLOCK_POINTS);
    }

    #[test]
    fn test_overflowing_speed_scale_falls_back() {
        // 1e39 does not fit in f32 and parses as infinity
        let tuning = Tuning::from_json(r#"{ "level_speed_scale": 1e39 }"#).unwrap();
        assert_eq!(tuning.level_speed_scale, LEVEL_SPEED_SCALE);

        let tuning = Tuning::from_json(r#"{ "level_speed_scale": 50.0 }"#).unwrap();
        assert_eq!(tuning.level_speed_scale, MAX_LEVEL_SPEED_SCALE);
    }

    #[test]
    fn test_non_finite_floats_fall_back() {
        let tuning = Tuning {
            bounce_damping: f32::NAN,
            paddle_width: f32::INFINITY,
            paddle_min_width: f32::NAN,
            paddle_shrink: f32::NAN,
            paddle_key_step: f32::NAN,
            base_velocity: Vec2::new(f32::NAN, -4.0),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_fast_base_velocity_is_capped() {
        let tuning = Tuning::from_json(r#"{ "base_velocity": [300.0, -400.0] }"#).unwrap();
        assert!((tuning.base_velocity.length() - MAX_BASE_SPEED).abs() < 1e-3);
        assert!(tuning.base_velocity.y < 0.0);
    }
}
