//! Collision detection and response
//!
//! Ball-vs-block uses only the ball's center point against each block
//! rectangle; the radius is ignored there, so a fast ball can tunnel through a
//! thin block. Every alive block is scanned with no early exit, so one tick can
//! destroy several blocks and flip `vel.y` once per hit.

use glam::Vec2;

use super::grid::BlockGrid;
use super::state::{Ball, Paddle};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Outcome of the wall pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    /// Nothing to resolve beyond side/top reflection
    Clear,
    /// Projected position crosses the bottom bound
    Bottom,
}

/// Destroy every alive block whose rectangle strictly contains the ball center.
///
/// Returns the number of blocks destroyed; `vel.y` is negated once per hit.
pub fn resolve_block_hits(ball: &mut Ball, grid: &mut BlockGrid) -> u32 {
    let mut hits = 0;
    for block in grid.iter_mut() {
        if block.alive && block.rect.contains_strict(ball.pos) {
            ball.vel.y = -ball.vel.y;
            block.alive = false;
            hits += 1;
            log::debug!("Block ({}, {}) destroyed", block.column, block.row);
        }
    }
    hits
}

/// Reflect off the side and top walls using the projected position.
///
/// The bottom edge never reflects; it is reported so the caller can run the
/// paddle/miss branch.
pub fn reflect_off_walls(ball: &mut Ball) -> WallContact {
    let next = ball.projected();

    if next.x > PLAYFIELD_WIDTH - ball.radius || next.x < ball.radius {
        ball.vel.x = -ball.vel.x;
    }

    if next.y < ball.radius {
        ball.vel.y = -ball.vel.y;
        WallContact::Clear
    } else if next.y > PLAYFIELD_HEIGHT - ball.radius {
        WallContact::Bottom
    } else {
        WallContact::Clear
    }
}

/// Normalized impact offset from the paddle center, roughly in [-1, 1]
pub fn hit_offset(ball_x: f32, paddle: &Paddle) -> f32 {
    (ball_x - paddle.center_x()) / (paddle.width / 2.0)
}

/// Redirect upward keeping speed, biased sideways by the impact offset.
///
/// The sideways component is capped at the total speed so the vertical part
/// can never go imaginary whatever the damping.
pub fn bounce_velocity(vel: Vec2, offset: f32, damping: f32) -> Vec2 {
    let speed = vel.length();
    let dx = (offset * speed * damping).clamp(-speed, speed);
    let dy = -(speed * speed - dx * dx).max(0.0).sqrt();
    Vec2::new(dx, dy)
}

/// Bounce off the paddle if the ball is within its horizontal span.
///
/// The new sideways component replaces any side-wall flip from the same tick,
/// so it is pointed back into the playfield when the next step would cross a
/// side wall. Returns false on a miss, leaving the ball untouched.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Paddle, damping: f32) -> bool {
    if !paddle.rect().spans_x(ball.pos.x) {
        return false;
    }
    let offset = hit_offset(ball.pos.x, paddle);
    ball.vel = bounce_velocity(ball.vel, offset, damping);

    let next_x = ball.pos.x + ball.vel.x;
    if next_x > PLAYFIELD_WIDTH - ball.radius {
        ball.vel.x = -ball.vel.x.abs();
    } else if next_x < ball.radius {
        ball.vel.x = ball.vel.x.abs();
    }
    true
}
