//! Integer axis-aligned rectangle shared by every entity

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "rect must have positive size");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.center_y())
    }

    pub fn set_center_x(&mut self, cx: i32) {
        self.x = cx - self.width / 2;
    }

    pub fn set_center_y(&mut self, cy: i32) {
        self.y = cy - self.height / 2;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Strict overlap test; rectangles that only share an edge do not intersect
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_edges() {
        let r = Rect::new(10, 20, 50, 21);
        assert_eq!(r.right(), 60);
        assert_eq!(r.bottom(), 41);
        assert_eq!(r.center_x(), 35);
        // Odd height rounds the center down
        assert_eq!(r.center_y(), 30);
    }

    #[test]
    fn test_setters_recompute_origin() {
        let mut r = Rect::new(0, 0, 90, 11);
        r.set_center_x(100);
        assert_eq!(r.x, 55);
        assert_eq!(r.center_x(), 100);

        r.set_bottom(500);
        assert_eq!(r.y, 489);
        assert_eq!(r.bottom(), 500);

        r.set_right(581);
        assert_eq!(r.x, 491);

        r.set_center_y(50);
        assert_eq!(r.center_y(), 50);
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(intersects(&a, &Rect::new(5, 5, 10, 10)));
        assert!(intersects(&a, &Rect::new(2, 2, 2, 2)));
        // Touching edges only
        assert!(!intersects(&a, &Rect::new(10, 0, 10, 10)));
        assert!(!intersects(&a, &Rect::new(0, 10, 10, 10)));
        assert!(!intersects(&a, &Rect::new(30, 30, 5, 5)));
    }

    #[test]
    fn test_translate() {
        let mut r = Rect::new(1, 2, 3, 4);
        r.translate(IVec2::new(-5, 7));
        assert_eq!((r.x, r.y), (-4, 9));
    }
}
