//! Ball state machine and collision response
//!
//! Velocities are integer pixels per tick. Angles are computed in `f64` and
//! the resulting components truncated toward zero, so motion is stepwise and
//! reproducible across platforms.

use std::f64::consts::{FRAC_PI_2, SQRT_2};

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use super::rect::{Rect, intersects};
use crate::config::RoundConfig;
use crate::consts::{BALL_IDLE_GAP, BALL_LAUNCH_GAP, PADDLE_DEPTH};
use crate::trunc_px;

/// Ball life-cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Resting on the paddle, follows it without simulation
    Idle,
    /// In flight
    Active,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    pub radius: i32,
    pub vel: IVec2,
    /// Speed used to recompute velocity after a paddle rebound
    pub rebound_speed: i32,
    pub state: BallState,
}

impl Ball {
    /// Idle ball resting on `paddle`
    pub fn new(config: &RoundConfig, paddle: &Paddle) -> Self {
        let diameter = config.ball_radius * 2;
        let mut ball = Self {
            rect: Rect::new(0, 0, diameter, diameter),
            radius: config.ball_radius,
            vel: IVec2::ZERO,
            rebound_speed: config.rebound_speed,
            state: BallState::Idle,
        };
        ball.follow_paddle(paddle);
        ball
    }

    pub fn is_active(&self) -> bool {
        self.state == BallState::Active
    }

    /// Current velocity magnitude
    pub fn speed(&self) -> f64 {
        self.vel.as_dvec2().length()
    }

    /// Speed given to a freshly launched ball: sqrt(2) * radius
    pub fn launch_speed(&self) -> i32 {
        trunc_px(SQRT_2 * self.radius as f64)
    }

    /// Pin the ball just above the paddle center
    pub fn follow_paddle(&mut self, paddle: &Paddle) {
        self.place_above(paddle, BALL_IDLE_GAP);
    }

    fn place_above(&mut self, paddle: &Paddle, gap: i32) {
        self.rect.set_center_x(paddle.rect.center_x());
        self.rect.set_bottom(paddle.rect.top() - gap);
    }

    /// Launch with a random angle within 45 degrees of straight up
    pub fn launch<R: Rng>(&mut self, paddle: &Paddle, rng: &mut R) -> f64 {
        let angle = (rng.random::<f64>() - 0.5) * FRAC_PI_2;
        self.launch_at(paddle, angle);
        angle
    }

    /// Launch at `angle` radians from vertical (positive leans right)
    pub fn launch_at(&mut self, paddle: &Paddle, angle: f64) {
        self.place_above(paddle, BALL_LAUNCH_GAP);
        let speed = self.launch_speed() as f64;
        self.vel = IVec2::new(
            trunc_px(speed * angle.sin()),
            -trunc_px(speed * angle.cos()),
        );
        self.state = BallState::Active;
    }

    /// Back to rest on the paddle after the ball is lost
    pub fn reset(&mut self, paddle: &Paddle) {
        self.state = BallState::Idle;
        self.vel = IVec2::ZERO;
        self.follow_paddle(paddle);
    }

    pub fn advance(&mut self) {
        self.rect.translate(self.vel);
    }

    /// Force velocity away from the left, right and top walls.
    /// Returns true if any component changed.
    pub fn reflect_walls(&mut self, screen_width: i32) -> bool {
        let before = self.vel;
        if self.rect.left() <= 0 {
            self.vel.x = self.vel.x.abs();
        }
        if self.rect.right() >= screen_width {
            self.vel.x = -self.vel.x.abs();
        }
        if self.rect.top() < 0 {
            self.vel.y = self.vel.y.abs();
        }
        self.vel != before
    }

    /// Lost once the ball's center drops below the paddle's center line.
    /// Horizontal alignment is not considered.
    pub fn is_below(&self, paddle: &Paddle) -> bool {
        self.rect.center_y() > paddle.rect.center_y()
    }

    /// Rebound off the paddle if touching it while falling.
    ///
    /// The outgoing angle blends the incoming angle with the impact offset
    /// from the paddle center, and the speed resets to `rebound_speed`.
    pub fn rebound_off_paddle(&mut self, paddle: &Paddle) -> bool {
        if self.vel.y <= 0 || !intersects(&self.rect, &paddle.rect) {
            return false;
        }
        self.vel = rebound_velocity(
            self.vel,
            self.rect.center_x() - paddle.rect.center_x(),
            self.rebound_speed,
        );
        true
    }

    /// Reflect off a brick: side hit flips dx, top/bottom hit flips dy
    pub fn deflect_off(&mut self, brick: &Rect) {
        let cy = self.rect.center_y();
        if brick.top() < cy && cy < brick.bottom() {
            self.vel.x = if self.rect.center_x() > brick.center_x() {
                self.vel.x.abs()
            } else {
                -self.vel.x.abs()
            };
        } else {
            self.vel.y = if cy > brick.center_y() {
                self.vel.y.abs()
            } else {
                -self.vel.y.abs()
            };
        }
    }
}

/// Outgoing velocity after a paddle hit at `offset` pixels from the paddle center
pub fn rebound_velocity(vel: IVec2, offset: i32, speed: i32) -> IVec2 {
    let ball_angle = (-vel.x as f64).atan2(vel.y as f64);
    let paddle_angle = (offset as f64).atan2(PADDLE_DEPTH);
    let angle = (paddle_angle - ball_angle) / 2.0;
    let speed = speed as f64;
    IVec2::new(trunc_px(angle.sin() * speed), -trunc_px(angle.cos() * speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f64::consts::FRAC_PI_4;

    fn setup() -> (RoundConfig, Paddle, Ball) {
        let config = RoundConfig::default();
        let paddle = Paddle::new(&config);
        let ball = Ball::new(&config, &paddle);
        (config, paddle, ball)
    }

    #[test]
    fn test_idle_ball_rests_on_paddle() {
        let (_, mut paddle, mut ball) = setup();
        assert_eq!(ball.state, BallState::Idle);
        assert_eq!(ball.rect.center_x(), paddle.rect.center_x());
        assert_eq!(ball.rect.bottom(), paddle.rect.top() - 5);

        paddle.move_to(100);
        ball.follow_paddle(&paddle);
        assert_eq!(ball.rect.center_x(), 100);
    }

    #[test]
    fn test_launch_straight_up() {
        let (_, paddle, mut ball) = setup();
        ball.launch_at(&paddle, 0.0);
        assert!(ball.is_active());
        assert_eq!(ball.vel, IVec2::new(0, -14));
        assert_eq!(ball.rect.bottom(), paddle.rect.top() - 2);
    }

    #[test]
    fn test_launch_speed_from_radius() {
        let (_, _, ball) = setup();
        assert_eq!(ball.launch_speed(), 14);
    }

    #[test]
    fn test_walls_reflect_idempotently() {
        let (_, _, mut ball) = setup();
        ball.state = BallState::Active;
        ball.rect.x = -3;
        ball.vel = IVec2::new(-5, -5);
        assert!(ball.reflect_walls(581));
        assert_eq!(ball.vel.x, 5);
        // Still past the wall next frame: must not flip back
        ball.rect.x = -1;
        assert!(!ball.reflect_walls(581));
        assert_eq!(ball.vel.x, 5);

        ball.rect.x = 570;
        assert!(ball.reflect_walls(581));
        assert_eq!(ball.vel.x, -5);
        assert!(!ball.reflect_walls(581));
        assert_eq!(ball.vel.x, -5);

        ball.rect.x = 200;
        ball.rect.y = -1;
        ball.reflect_walls(581);
        assert_eq!(ball.vel.y, 5);
        ball.reflect_walls(581);
        assert_eq!(ball.vel.y, 5);
    }

    #[test]
    fn test_top_edge_at_zero_does_not_reflect() {
        let (_, _, mut ball) = setup();
        ball.rect.x = 200;
        ball.rect.y = 0;
        ball.vel = IVec2::new(0, -5);
        assert!(!ball.reflect_walls(581));
        assert_eq!(ball.vel.y, -5);
    }

    #[test]
    fn test_center_hit_straight_down_returns_straight_up() {
        let (_, paddle, mut ball) = setup();
        ball.state = BallState::Active;
        ball.rect.set_center_x(paddle.rect.center_x());
        ball.rect.set_bottom(paddle.rect.top() + 3);
        ball.vel = IVec2::new(0, 10);
        assert!(ball.rebound_off_paddle(&paddle));
        assert_eq!(ball.vel, IVec2::new(0, -15));
    }

    #[test]
    fn test_edge_hit_angles_outward() {
        let (_, paddle, mut ball) = setup();
        ball.rect.set_center_x(paddle.rect.right() - 2);
        ball.rect.set_bottom(paddle.rect.top() + 3);
        ball.vel = IVec2::new(0, 10);
        assert!(ball.rebound_off_paddle(&paddle));
        assert!(ball.vel.x > 0);
        assert!(ball.vel.y < 0);
    }

    #[test]
    fn test_no_rebound_when_rising() {
        let (_, paddle, mut ball) = setup();
        ball.rect.set_center_x(paddle.rect.center_x());
        ball.rect.set_bottom(paddle.rect.top() + 3);
        ball.vel = IVec2::new(3, -10);
        assert!(!ball.rebound_off_paddle(&paddle));
        assert_eq!(ball.vel, IVec2::new(3, -10));
    }

    #[test]
    fn test_deflect_side_and_top() {
        let brick = Rect::new(100, 100, 50, 20);
        let (_, _, mut ball) = setup();

        // Center-y inside the brick band and right of center: side hit
        ball.rect = Rect::new(140, 100, 20, 20);
        ball.vel = IVec2::new(-4, -6);
        ball.deflect_off(&brick);
        assert_eq!(ball.vel, IVec2::new(4, -6));

        // Left of center: pushed left
        ball.rect = Rect::new(95, 100, 20, 20);
        ball.vel = IVec2::new(4, -6);
        ball.deflect_off(&brick);
        assert_eq!(ball.vel, IVec2::new(-4, -6));

        // Below the brick band: bottom hit sends it down
        ball.rect = Rect::new(110, 115, 20, 20);
        ball.vel = IVec2::new(4, -6);
        ball.deflect_off(&brick);
        assert_eq!(ball.vel, IVec2::new(4, 6));

        // Above: top hit sends it up
        ball.rect = Rect::new(110, 85, 20, 20);
        ball.vel = IVec2::new(4, 6);
        ball.deflect_off(&brick);
        assert_eq!(ball.vel, IVec2::new(4, -6));
    }

    #[test]
    fn test_loss_ignores_horizontal_alignment() {
        let (_, paddle, mut ball) = setup();
        ball.rect.x = 0;
        ball.rect.set_center_y(paddle.rect.center_y());
        assert!(!ball.is_below(&paddle));
        ball.rect.y += 1;
        assert!(ball.is_below(&paddle));
    }

    #[test]
    fn test_seeded_launch_is_reproducible() {
        let (_, paddle, mut a) = setup();
        let mut b = a.clone();
        let angle_a = a.launch(&paddle, &mut Pcg32::seed_from_u64(7));
        let angle_b = b.launch(&paddle, &mut Pcg32::seed_from_u64(7));
        assert_eq!(angle_a, angle_b);
        assert_eq!(a.vel, b.vel);
    }

    proptest! {
        #[test]
        fn prop_launch_within_45_degrees(seed in any::<u64>()) {
            let (_, paddle, mut ball) = setup();
            let angle = ball.launch(&paddle, &mut Pcg32::seed_from_u64(seed));
            prop_assert!((-FRAC_PI_4..FRAC_PI_4).contains(&angle));

            let v = ball.vel.as_dvec2();
            prop_assert!(v.y < 0.0);
            // Truncation may shave up to one pixel off each component
            let target = SQRT_2 * ball.radius as f64;
            prop_assert!(ball.speed() <= target + 1e-9);
            prop_assert!(ball.speed() >= target - 2.0);
            // Angle from vertical stays inside 45 degrees (+ truncation slack)
            prop_assert!(v.x.abs() <= -v.y + 1.0);
        }

        #[test]
        fn prop_rebound_speed_is_constant(
            dx in -20i32..=20,
            dy in 1i32..=20,
            offset in -55i32..=55,
        ) {
            let vel = rebound_velocity(IVec2::new(dx, dy), offset, 15);
            let speed = vel.as_dvec2().length();
            prop_assert!(speed <= 15.0 + 1e-9);
            prop_assert!(speed >= 15.0 - 2.0);
        }
    }
}
