//! Round state and simulation events
//!
//! Everything the tick mutates lives in `RoundState`, owned by the
//! orchestrator and passed explicitly.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallState};
use super::bricks::{Brick, build_grid};
use super::lives::LifeCounter;
use super::paddle::Paddle;
use crate::config::{ConfigError, RoundConfig};

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Every brick destroyed
    Won,
    /// Every life spent
    Lost,
}

/// Side effects triggered by a tick, consumed by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BallLaunched,
    WallBounce,
    PaddleRebound,
    /// Brick took a hit but is still standing
    BrickCracked { id: u32 },
    BrickDestroyed { id: u32, row: u32, col: u32 },
    LifeLost { remaining: usize },
    RoundWon { score: u32 },
    RoundLost { score: u32 },
}

/// RNG state wrapper for serialization
///
/// Each launch draws from a fresh PCG stream so a saved state replays the
/// same angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Generator for the next draw; advances the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub config: RoundConfig,
    pub rng_state: RngState,
    /// Live bricks, sorted by id
    pub bricks: Vec<Brick>,
    pub paddle: Paddle,
    pub ball: Ball,
    pub lives: LifeCounter,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once the round is over
    pub outcome: Option<RoundOutcome>,
}

impl RoundState {
    /// Fresh round: full grid, ball idle on a centered paddle
    pub fn new(config: RoundConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let bricks = build_grid(&config);
        Ok(Self::with_bricks(config, seed, bricks))
    }

    /// Round with a custom brick set (kept sorted by id)
    pub fn with_bricks(config: RoundConfig, seed: u64, mut bricks: Vec<Brick>) -> Self {
        bricks.sort_by_key(|b| b.id);
        let paddle = Paddle::new(&config);
        let ball = Ball::new(&config, &paddle);
        let lives = LifeCounter::for_round(&config);
        Self {
            config,
            rng_state: RngState::new(seed),
            bricks,
            paddle,
            ball,
            lives,
            score: 0,
            time_ticks: 0,
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn ball_idle(&self) -> bool {
        self.ball.state == BallState::Idle
    }

    /// Terminal check; lives are evaluated before bricks
    pub fn evaluate_outcome(&self) -> Option<RoundOutcome> {
        if self.lives.is_empty() {
            Some(RoundOutcome::Lost)
        } else if self.bricks.is_empty() {
            Some(RoundOutcome::Won)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round() {
        let state = RoundState::new(RoundConfig::default(), 1).unwrap();
        assert_eq!(state.bricks.len(), 54);
        assert_eq!(state.lives.count(), 10);
        assert_eq!(state.score, 0);
        assert!(state.ball_idle());
        assert_eq!(state.evaluate_outcome(), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RoundConfig {
            lives: 0,
            ..Default::default()
        };
        assert_eq!(
            RoundState::new(config, 1).err(),
            Some(ConfigError::NoLives)
        );

        // Never reaches the token row as a wrapped count
        let config = RoundConfig {
            lives: 3_000_000_000,
            ..Default::default()
        };
        assert_eq!(
            RoundState::new(config, 1).err(),
            Some(ConfigError::TooManyLives)
        );
    }

    #[test]
    fn test_lives_checked_before_bricks() {
        let mut state = RoundState::new(RoundConfig::default(), 1).unwrap();
        state.bricks.clear();
        assert_eq!(state.evaluate_outcome(), Some(RoundOutcome::Won));
        while state.lives.lose_life().is_some() {}
        assert_eq!(state.evaluate_outcome(), Some(RoundOutcome::Lost));
    }

    #[test]
    fn test_rng_streams_advance() {
        use rand::Rng;
        let mut a = RngState::new(42);
        let first: u32 = a.next_rng().random();
        let second: u32 = a.next_rng().random();
        assert_ne!(first, second);
        assert_eq!(a.stream, 2);

        let mut b = RngState::new(42);
        assert_eq!(first, b.next_rng().random::<u32>());
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = RoundState::new(RoundConfig::default(), 9).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: RoundState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bricks, state.bricks);
        assert_eq!(back.paddle, state.paddle);
        assert_eq!(back.ball, state.ball);
    }
}
