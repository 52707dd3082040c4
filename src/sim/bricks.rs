//! Brick grid with per-row durability

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::RoundConfig;
use crate::consts::ARMORED_ROWS;

/// Result of a single hit on a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Took damage but is still standing
    Cracked,
    /// Reached its hit threshold and must leave the live set
    Destroyed,
}

/// A destructible brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub row: u32,
    pub col: u32,
    pub rect: Rect,
    pub hits: u8,
    pub required_hits: u8,
}

impl Brick {
    pub fn new(id: u32, row: u32, col: u32, rect: Rect) -> Self {
        Self {
            id,
            row,
            col,
            rect,
            hits: 0,
            required_hits: required_hits_for_row(row),
        }
    }

    /// Register one hit
    pub fn hit(&mut self) -> BrickHit {
        self.hits = (self.hits + 1).min(self.required_hits);
        if self.is_destroyed() {
            BrickHit::Destroyed
        } else {
            BrickHit::Cracked
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits >= self.required_hits
    }
}

/// The top rows are armored and take two hits
pub fn required_hits_for_row(row: u32) -> u8 {
    if row < ARMORED_ROWS { 2 } else { 1 }
}

/// Rectangle of the brick at (row, col) for the given layout
pub fn brick_rect(config: &RoundConfig, row: u32, col: u32) -> Rect {
    let (origin_x, origin_y) = config.brick_origin;
    Rect::new(
        origin_x + (config.brick_width + config.brick_gap) * col as i32,
        origin_y + (config.brick_height + config.brick_gap) * row as i32,
        config.brick_width,
        config.brick_height,
    )
}

/// Build the full grid in row-major order; ids start at 1 so the live set is id-sorted
pub fn build_grid(config: &RoundConfig) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(config.brick_rows as usize * config.brick_cols as usize);
    let mut id = 1;
    for row in 0..config.brick_rows {
        for col in 0..config.brick_cols {
            bricks.push(Brick::new(id, row, col, brick_rect(config, row, col)));
            id += 1;
        }
    }
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let config = RoundConfig::default();
        let bricks = build_grid(&config);
        assert_eq!(bricks.len(), 54);

        let first = &bricks[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.rect, Rect::new(25, 20, 50, 20));

        // Row 2, col 3
        let b = &bricks[2 * 9 + 3];
        assert_eq!((b.row, b.col), (2, 3));
        assert_eq!(b.rect.x, 25 + 60 * 3);
        assert_eq!(b.rect.y, 20 + 30 * 2);

        // Last column stays inside the screen
        let last = bricks.last().unwrap();
        assert!(last.rect.right() < config.screen_width);
        assert!(bricks.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_required_hits_by_row() {
        let bricks = build_grid(&RoundConfig::default());
        for brick in &bricks {
            let expected = if brick.row < 2 { 2 } else { 1 };
            assert_eq!(brick.required_hits, expected, "row {}", brick.row);
        }
    }

    #[test]
    fn test_armored_brick_needs_two_hits() {
        let mut brick = Brick::new(1, 0, 0, Rect::new(0, 0, 50, 20));
        assert_eq!(brick.hit(), BrickHit::Cracked);
        assert!(!brick.is_destroyed());
        assert_eq!(brick.hit(), BrickHit::Destroyed);
        assert_eq!(brick.hits, brick.required_hits);
    }

    #[test]
    fn test_plain_brick_breaks_on_first_hit() {
        let mut brick = Brick::new(1, 5, 0, Rect::new(0, 0, 50, 20));
        assert_eq!(brick.hit(), BrickHit::Destroyed);
        // Hit count never climbs past the threshold
        brick.hit();
        assert_eq!(brick.hits, 1);
    }
}
