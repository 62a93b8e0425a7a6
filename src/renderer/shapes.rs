//! Shape generation for 2D primitives
//!
//! All coordinates are playfield pixels (origin top-left, y down); the
//! pipeline maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, hex_to_rgba};
use crate::settings::Settings;
use crate::sim::{GameState, Rect};

/// Segments used for the ball and its effects
const CIRCLE_SEGMENTS: u32 = 24;
/// Block outline thickness
const OUTLINE_WIDTH: f32 = 1.0;
/// Glow halo extends this far past the ball edge
const GLOW_SPREAD: f32 = 10.0;

/// Which optional effects to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub ball_glow: bool,
    pub paddle_gradient: bool,
    pub block_outlines: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ball_glow: true,
            paddle_gradient: true,
            block_outlines: true,
        }
    }
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            ball_glow: settings.effective_ball_glow(),
            paddle_gradient: settings.paddle_gradient,
            block_outlines: settings.block_outlines,
        }
    }
}

/// Filled rectangle with independent top and bottom colors
pub fn gradient_rect(rect: &Rect, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, top),
        Vertex::new(r, t, top),
        Vertex::new(l, b, bottom),
        Vertex::new(l, b, bottom),
        Vertex::new(r, t, top),
        Vertex::new(r, b, bottom),
    ]
}

/// Filled rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    gradient_rect(rect, color, color)
}

/// Rectangle outline drawn inside the rectangle's bounds
pub fn rect_outline(r: &Rect, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = width.min(r.size.x / 2.0).min(r.size.y / 2.0);
    let edges = [
        Rect::new(r.left(), r.top(), r.size.x, w),
        Rect::new(r.left(), r.bottom() - w, r.size.x, w),
        Rect::new(r.left(), r.top() + w, w, r.size.y - 2.0 * w),
        Rect::new(r.right() - w, r.top() + w, w, r.size.y - 2.0 * w),
    ];
    edges.iter().flat_map(|e| rect(e, color)).collect()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Soft halo: opaque at `inner_radius`, fully transparent at `outer_radius`
pub fn glow(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let clear = [color[0], color[1], color[2], 0.0];
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, clear));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, clear));
        vertices.push(Vertex::new(outer2.x, outer2.y, clear));
    }

    vertices
}

/// Build the full frame: ball, paddle, then alive blocks
pub fn build_frame(state: &GameState, options: &RenderOptions) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(state.blocks.len() * 30 + 512);

    // Ball
    let ball = &state.ball;
    if options.ball_glow {
        vertices.extend(glow(
            ball.pos,
            ball.radius,
            ball.radius + GLOW_SPREAD,
            colors::BALL_GLOW,
            CIRCLE_SEGMENTS,
        ));
    }
    vertices.extend(circle(ball.pos, ball.radius, colors::BALL, CIRCLE_SEGMENTS));
    let shine = ball.pos - Vec2::splat(ball.radius / 3.0);
    vertices.extend(circle(
        shine,
        ball.radius / 3.0,
        colors::BALL_HIGHLIGHT,
        CIRCLE_SEGMENTS / 2,
    ));

    // Paddle
    let paddle = state.paddle.rect();
    vertices.extend(rect(&paddle, colors::PADDLE));
    if options.paddle_gradient {
        vertices.extend(gradient_rect(
            &paddle,
            colors::PADDLE_SHINE,
            colors::PADDLE_SHADE,
        ));
    }

    // Blocks
    for block in state.blocks.iter().filter(|b| b.alive) {
        vertices.extend(rect(&block.rect, hex_to_rgba(block.color.hex(), 1.0)));
        if options.block_outlines {
            vertices.extend(rect_outline(
                &block.rect,
                OUTLINE_WIDTH,
                colors::BLOCK_OUTLINE,
            ));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: RenderOptions = RenderOptions {
        ball_glow: false,
        paddle_gradient: false,
        block_outlines: false,
    };

    #[test]
    fn test_circle_vertex_count() {
        let v = circle(Vec2::ZERO, 8.0, colors::BALL, 16);
        assert_eq!(v.len(), 48);
        assert!(v.iter().all(|v| Vec2::from(v.position).length() <= 8.0 + 1e-4));
    }

    #[test]
    fn test_outline_stays_inside() {
        let r = Rect::new(35.0, 60.0, 50.0, 20.0);
        let v = rect_outline(&r, 1.0, colors::BLOCK_OUTLINE);
        assert_eq!(v.len(), 24);
        for vertex in v {
            let [x, y] = vertex.position;
            assert!((35.0..=85.0).contains(&x));
            assert!((60.0..=80.0).contains(&y));
        }
    }

    #[test]
    fn test_frame_skips_destroyed_blocks() {
        let mut state = GameState::default();
        state.start();
        let full = build_frame(&state, &PLAIN).len();

        for block in state.blocks.iter_mut().take(10) {
            block.alive = false;
        }
        let partial = build_frame(&state, &PLAIN).len();
        assert_eq!(full - partial, 10 * 6);
    }

    #[test]
    fn test_effects_add_geometry() {
        let mut state = GameState::default();
        state.start();
        let plain = build_frame(&state, &PLAIN).len();
        let fancy = build_frame(&state, &RenderOptions::default()).len();
        let extra = CIRCLE_SEGMENTS as usize * 6 + 6 + 40 * 24;
        assert_eq!(fancy - plain, extra);
    }

    #[test]
    fn test_paddle_gradient_colors() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let v = gradient_rect(&r, colors::PADDLE_SHINE, colors::PADDLE_SHADE);
        assert_eq!(v[0].color, colors::PADDLE_SHINE);
        assert_eq!(v[5].color, colors::PADDLE_SHADE);
    }
}
