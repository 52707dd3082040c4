//! Player paddle

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::RoundConfig;
use crate::consts::PADDLE_BOTTOM_OFFSET;

/// The player's paddle; moves along x only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Screen width to clamp against, if clamping is enabled
    pub clamp_width: Option<i32>,
}

impl Paddle {
    /// Centered horizontally, near the bottom of the screen
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            rect: Rect::new(
                (config.screen_width - config.paddle_width) / 2,
                config.screen_height - PADDLE_BOTTOM_OFFSET,
                config.paddle_width,
                config.paddle_height,
            ),
            clamp_width: config.clamp_paddle.then_some(config.screen_width),
        }
    }

    /// Put the paddle's horizontal center at `x`; y never changes
    pub fn move_to(&mut self, x: i32) {
        self.rect.set_center_x(x);
        if let Some(width) = self.clamp_width {
            self.rect.x = self.rect.x.clamp(0, (width - self.rect.width).max(0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let paddle = Paddle::new(&RoundConfig::default());
        assert_eq!(paddle.rect, Rect::new(245, 584, 90, 11));
    }

    #[test]
    fn test_move_to_centers_without_clamp() {
        let mut paddle = Paddle::new(&RoundConfig::default());
        let y = paddle.rect.y;
        paddle.move_to(300);
        assert_eq!(paddle.rect.center_x(), 300);
        assert_eq!(paddle.rect.y, y);

        // Arcade behavior: the paddle may hang off the edge
        paddle.move_to(0);
        assert_eq!(paddle.rect.x, -45);
    }

    #[test]
    fn test_move_to_with_clamp() {
        let config = RoundConfig {
            clamp_paddle: true,
            ..Default::default()
        };
        let mut paddle = Paddle::new(&config);
        paddle.move_to(0);
        assert_eq!(paddle.rect.x, 0);
        paddle.move_to(10_000);
        assert_eq!(paddle.rect.right(), config.screen_width);
        paddle.move_to(290);
        assert_eq!(paddle.rect.center_x(), 290);
    }
}
