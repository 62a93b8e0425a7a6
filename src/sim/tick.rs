//! Per-frame simulation tick
//!
//! Advances the session by one step. Velocities are in pixels per tick, so
//! there is no timestep parameter.

use super::collision::{WallContact, paddle_bounce, reflect_off_walls, resolve_block_hits};
use super::state::GameState;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Absolute pointer x in playfield pixels
    pub pointer_x: Option<f32>,
    /// Move-left key held
    pub move_left: bool,
    /// Move-right key held
    pub move_right: bool,
}

impl TickInput {
    /// Signed keyboard delta for this tick; right wins when both are held
    pub fn key_delta(&self, step: f32) -> f32 {
        if self.move_right {
            step
        } else if self.move_left {
            -step
        } else {
            0.0
        }
    }
}

/// Advance the session by one tick. No-op unless Running.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;

    // Pointer first, then the key-hold delta at the tick boundary
    if let Some(x) = input.pointer_x {
        state.paddle.move_to_pointer(x);
    }
    let delta = input.key_delta(state.tuning.paddle_key_step);
    if delta != 0.0 {
        state.paddle.nudge(delta);
    }

    let hits = resolve_block_hits(&mut state.ball, &mut state.blocks);
    for _ in 0..hits {
        state.award_block();
    }
    if hits > 0 && state.blocks.all_destroyed() {
        // Freeze ball and paddle where they are
        state.complete_level();
        return;
    }

    if reflect_off_walls(&mut state.ball) == WallContact::Bottom {
        let damping = state.tuning.bounce_damping;
        if !paddle_bounce(&mut state.ball, &state.paddle, damping) {
            // Either frozen on game over or freshly respawned
            state.lose_life();
            return;
        }
    }

    state.ball.advance();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::grid::block_origin;
    use crate::sim::state::{GameEvent, GamePhase, ball_spawn_point};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running() -> GameState {
        let mut state = GameState::default();
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_is_noop_unless_running() {
        let mut state = GameState::default();
        let before = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.time_ticks, 0);

        state.start();
        state.toggle_pause();
        let before = state.ball.pos;
        tick(
            &mut state,
            &TickInput {
                move_right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.ball.pos, before);
        assert_eq!(state.paddle.x, (PLAYFIELD_WIDTH - PADDLE_WIDTH) / 2.0);
    }

    #[test]
    fn test_ball_advances() {
        let mut state = running();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, ball_spawn_point() + Vec2::new(4.0, -4.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_keyboard_step_and_priority() {
        let mut state = running();
        let start_x = state.paddle.x;
        tick(
            &mut state,
            &TickInput {
                move_left: true,
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.x, start_x - 7.0);

        tick(
            &mut state,
            &TickInput {
                move_left: true,
                move_right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.x, start_x);
    }

    #[test]
    fn test_keyboard_applies_after_pointer() {
        let mut state = running();
        tick(
            &mut state,
            &TickInput {
                pointer_x: Some(100.0),
                move_right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.paddle.x, 60.0 + 7.0);
    }

    #[test]
    fn test_single_block_hit_scores_ten() {
        let mut state = running();
        let origin = block_origin(3, 2);
        state.ball.pos = origin + Vec2::new(25.0, 10.0);
        state.ball.vel = Vec2::new(4.0, -4.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 10);
        assert!(!state.blocks.get(3, 2).unwrap().alive);
        assert_eq!(state.blocks.alive_count(), 39);
        assert_eq!(state.ball.vel.y, 4.0);
        assert_eq!(state.drain_events(), vec![GameEvent::ScoreChanged(10)]);
    }

    #[test]
    fn test_last_block_completes_level_and_freezes() {
        let mut state = running();
        for block in state.blocks.iter_mut() {
            block.alive = false;
        }
        state.blocks.iter_mut().last().unwrap().alive = true;
        let last = state.blocks.get(7, 4).unwrap().rect;
        let pos = last.center();
        state.ball.pos = pos;
        let paddle_x = state.paddle.x;

        tick(
            &mut state,
            &TickInput {
                move_left: true,
                ..Default::default()
            },
        );

        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.paddle.x, paddle_x - 7.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ScoreChanged(10), GameEvent::LevelComplete]
        );

        // Frozen until advanced
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_paddle_bounce_redirects_up() {
        let mut state = running();
        state.ball.pos = Vec2::new(state.paddle.center_x(), PLAYFIELD_HEIGHT - 10.0);
        state.ball.vel = Vec2::new(4.0, 4.0);
        let speed = state.ball.speed();

        tick(&mut state, &TickInput::default());

        assert!(state.ball.vel.y < 0.0);
        assert!((state.ball.speed() - speed).abs() < 1e-4);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_miss_costs_a_life_and_respawns() {
        let mut state = running();
        state.paddle.x = 0.0;
        state.ball.pos = Vec2::new(400.0, PLAYFIELD_HEIGHT - 10.0);
        state.ball.vel = Vec2::new(4.0, 4.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.ball.pos, ball_spawn_point());
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(state.paddle.x, (PLAYFIELD_WIDTH - PADDLE_WIDTH) / 2.0);
        assert_eq!(state.drain_events(), vec![GameEvent::LivesChanged(2)]);
    }

    #[test]
    fn test_miss_on_last_life_is_game_over() {
        let mut state = running();
        let origin = block_origin(0, 0);
        state.ball.pos = origin + Vec2::new(10.0, 10.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 10);
        state.drain_events();

        state.lives = 1;
        state.paddle.x = 0.0;
        let miss_pos = Vec2::new(400.0, PLAYFIELD_HEIGHT - 10.0);
        state.ball.pos = miss_pos;
        state.ball.vel = Vec2::new(4.0, 4.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ball.pos, miss_pos);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::LivesChanged(0),
                GameEvent::GameOver { final_score: 10 }
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_bounds(
            moves in proptest::collection::vec(
                (proptest::option::of(-100.0f32..700.0), any::<bool>(), any::<bool>()),
                1..200,
            )
        ) {
            let mut state = running();
            for (pointer_x, move_left, move_right) in moves {
                let input = TickInput { pointer_x, move_left, move_right };
                tick(&mut state, &input);
                prop_assert!(state.paddle.x >= 0.0);
                prop_assert!(state.paddle.x <= PLAYFIELD_WIDTH - state.paddle.width);
                if !state.is_running() {
                    state.start();
                }
            }
        }
    }
}
