//! Fixed timestep simulation tick
//!
//! Advances a round by one frame and reports what happened as events.

use super::ball::BallState;
use super::bricks::BrickHit;
use super::rect::intersects;
use super::state::{GameEvent, RoundOutcome, RoundState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer x position, if the pointer moved
    pub pointer_x: Option<i32>,
    /// Pointer released (launches an idle ball)
    pub launch: bool,
    /// Demo mode - the tick steers the paddle and launches on its own
    pub autoplay: bool,
}

/// Advance the round by one tick
pub fn tick(state: &mut RoundState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_over() {
        return events;
    }
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.autoplay {
        autoplay(state, &mut input);
    }

    if let Some(x) = input.pointer_x {
        state.paddle.move_to(x);
    }

    if input.launch && state.ball_idle() {
        let mut rng = state.rng_state.next_rng();
        let angle = state.ball.launch(&state.paddle, &mut rng);
        log::debug!(
            "Ball launched at {:.1} deg, vel {:?}",
            angle.to_degrees(),
            state.ball.vel
        );
        events.push(GameEvent::BallLaunched);
    }

    update_ball(state, &mut events);

    if let Some(outcome) = state.evaluate_outcome() {
        state.outcome = Some(outcome);
        let score = state.score;
        match outcome {
            RoundOutcome::Won => {
                log::info!("Round won with score {score}");
                events.push(GameEvent::RoundWon { score });
            }
            RoundOutcome::Lost => {
                log::info!("Round lost with score {score}");
                events.push(GameEvent::RoundLost { score });
            }
        }
    }

    events
}

/// Move the ball and resolve walls, loss, paddle and bricks, in that order
fn update_ball(state: &mut RoundState, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;
    let paddle = &state.paddle;

    if ball.state == BallState::Idle {
        ball.follow_paddle(paddle);
        return;
    }

    ball.advance();

    if ball.reflect_walls(state.config.screen_width) {
        events.push(GameEvent::WallBounce);
    }

    if ball.is_below(paddle) {
        state.lives.lose_life();
        ball.reset(paddle);
        let remaining = state.lives.count();
        log::info!("Ball lost, {remaining} lives left");
        events.push(GameEvent::LifeLost { remaining });
        return;
    }

    if ball.rebound_off_paddle(paddle) {
        events.push(GameEvent::PaddleRebound);
    }

    // Every intersecting brick is processed, in id order
    let ball_rect = ball.rect;
    for brick in state
        .bricks
        .iter_mut()
        .filter(|b| intersects(&ball_rect, &b.rect))
    {
        match brick.hit() {
            BrickHit::Cracked => events.push(GameEvent::BrickCracked { id: brick.id }),
            BrickHit::Destroyed => {
                state.score += 1;
                log::debug!("Brick {} destroyed, score {}", brick.id, state.score);
                events.push(GameEvent::BrickDestroyed {
                    id: brick.id,
                    row: brick.row,
                    col: brick.col,
                });
            }
        }
        ball.deflect_off(&brick.rect);
    }
    state.bricks.retain(|b| !b.is_destroyed());
}

/// Steer the paddle under the ball with a wandering offset so rallies vary
fn autoplay(state: &RoundState, input: &mut TickInput) {
    if state.ball_idle() {
        input.launch = true;
    }
    let time_factor = state.time_ticks as f64 * 0.05;
    let half = (state.paddle.rect.width / 2) as f64;
    let offset = (time_factor.sin() * 0.45 + (time_factor * 0.7).sin() * 0.2) * half;
    input.pointer_x = Some(state.ball.rect.center_x() + offset as i32);
}
