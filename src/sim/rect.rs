//! Axis-aligned rectangle geometry for the paddle, ball and blocks
//!
//! All coordinates are integer screen pixels with the origin at the top-left
//! corner and y growing downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    /// Rectangle of the given size whose center sits at `center`
    pub fn centered_at(center: IVec2, size: IVec2) -> Self {
        Self {
            pos: center - size / 2,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    /// Center point (rounded toward the top-left on odd sizes)
    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }

    /// Inclusive point test: points on the boundary count as inside
    pub fn contains_point(&self, point: IVec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Inclusive overlap of the horizontal extents
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() <= other.right() && self.right() >= other.left()
    }

    /// Mid-points of the four edges
    pub fn edge_midpoints(&self) -> EdgePoints {
        let c = self.center();
        EdgePoints {
            top: IVec2::new(c.x, self.top()),
            bottom: IVec2::new(c.x, self.bottom()),
            left: IVec2::new(self.left(), c.y),
            right: IVec2::new(self.right(), c.y),
        }
    }
}

/// The four edge mid-points of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePoints {
    pub top: IVec2,
    pub bottom: IVec2,
    pub left: IVec2,
    pub right: IVec2,
}
