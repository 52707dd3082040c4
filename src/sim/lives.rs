//! Life counter: a row of tokens, last one removed first

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::RoundConfig;
use crate::consts::{LIFE_TOKEN_BOTTOM_OFFSET, LIFE_TOKEN_SIZE, LIFE_TOKEN_SPACING, LIFE_TOKEN_X};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeCounter {
    tokens: Vec<Rect>,
}

impl LifeCounter {
    pub fn new(count: u32, x: i32, y: i32) -> Self {
        let count = i32::try_from(count).unwrap_or(i32::MAX);
        let tokens = (0..count)
            .map(|c| {
                Rect::new(
                    x.saturating_add(c.saturating_mul(LIFE_TOKEN_SIZE + LIFE_TOKEN_SPACING)),
                    y,
                    LIFE_TOKEN_SIZE,
                    LIFE_TOKEN_SIZE,
                )
            })
            .collect();
        Self { tokens }
    }

    /// Token row at the bottom-left corner of the screen
    pub fn for_round(config: &RoundConfig) -> Self {
        Self::new(
            config.lives,
            LIFE_TOKEN_X,
            config.screen_height - LIFE_TOKEN_BOTTOM_OFFSET,
        )
    }

    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Rect] {
        &self.tokens
    }

    /// Remove the most recently added token
    pub fn lose_life(&mut self) -> Option<Rect> {
        self.tokens.pop()
    }
}
