//! Backend-independent frame description
//!
//! A `Scene` is everything a surface needs to draw one frame: background,
//! sprites in draw order, the score line and the optional end banner.

use crate::sim::{Rect, RoundOutcome, RoundState};

pub type Rgb = [u8; 3];

/// Arcade palette
pub mod palette {
    use super::Rgb;

    pub const TEXT: Rgb = [255, 255, 255];
    pub const BACKGROUND: Rgb = [12, 14, 32];
    pub const BALL: Rgb = [220, 220, 220];
    pub const PADDLE: Rgb = [255, 255, 0];
    /// Brick colors, one per row (wrapping)
    pub const BRICKS: [Rgb; 6] = [
        [255, 0, 0],
        [255, 50, 0],
        [255, 100, 0],
        [255, 150, 0],
        [255, 200, 0],
        [255, 255, 0],
    ];

    pub fn brick(row: u32) -> Rgb {
        BRICKS[row as usize % BRICKS.len()]
    }
}

/// Score line position relative to the bottom-right corner
const SCORE_INSET_X: i32 = 150;
const SCORE_INSET_Y: i32 = 30;
pub const SCORE_FONT_PX: u32 = 34;
pub const BANNER_FONT_PX: u32 = 74;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteShape {
    Box,
    /// Filled circle inscribed in the rect
    Disc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub rect: Rect,
    pub color: Rgb,
    pub shape: SpriteShape,
}

/// Text anchored at its top-left corner or its center
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size_px: u32,
    pub centered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: i32,
    pub height: i32,
    pub background: Rgb,
    pub sprites: Vec<Sprite>,
    pub score: Label,
    pub banner: Option<Label>,
}

impl Scene {
    /// Describe the current round: paddle, life tokens, ball, then bricks
    pub fn from_round(state: &RoundState) -> Self {
        let mut sprites = Vec::with_capacity(state.bricks.len() + state.lives.count() + 2);
        sprites.push(Sprite {
            rect: state.paddle.rect,
            color: palette::PADDLE,
            shape: SpriteShape::Box,
        });
        sprites.extend(state.lives.tokens().iter().map(|&rect| Sprite {
            rect,
            color: palette::BALL,
            shape: SpriteShape::Box,
        }));
        sprites.push(Sprite {
            rect: state.ball.rect,
            color: palette::BALL,
            shape: SpriteShape::Disc,
        });
        sprites.extend(state.bricks.iter().map(|brick| Sprite {
            rect: brick.rect,
            color: palette::brick(brick.row),
            shape: SpriteShape::Box,
        }));

        let (width, height) = (state.config.screen_width, state.config.screen_height);
        let mut scene = Self {
            width,
            height,
            background: palette::BACKGROUND,
            sprites,
            score: Label {
                text: format!("Score: {}", state.score),
                x: width - SCORE_INSET_X,
                y: height - SCORE_INSET_Y,
                size_px: SCORE_FONT_PX,
                centered: false,
            },
            banner: None,
        };
        if let Some(outcome) = state.outcome {
            scene.set_banner(outcome);
        }
        scene
    }

    /// Centered end-of-round message
    pub fn set_banner(&mut self, outcome: RoundOutcome) {
        self.banner = Some(Label {
            text: banner_text(outcome).to_string(),
            x: self.width / 2,
            y: self.height / 2,
            size_px: BANNER_FONT_PX,
            centered: true,
        });
    }
}

pub fn banner_text(outcome: RoundOutcome) -> &'static str {
    match outcome {
        RoundOutcome::Won => "YOU WON!!",
        RoundOutcome::Lost => "Game over",
    }
}
