//! Axis-aligned bounding boxes
//!
//! An `Area` is a snapshot of some sprite's bounds at the moment it was
//! queried; it is recomputed on demand, never stored as live state.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned box given by its corner bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Area {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half.x, center.y - half.y, center.x + half.x, center.y + half.y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Closed-interval point test (edges count as inside)
    pub fn contains(&self, p: Vec2) -> bool {
        self.x1 <= p.x && p.x <= self.x2 && self.y1 <= p.y && p.y <= self.y2
    }

    /// Whether `other` lies completely inside this box (edges may touch)
    pub fn contains_area(&self, other: &Area) -> bool {
        self.x1 <= other.x1 && other.x2 <= self.x2 && self.y1 <= other.y1 && other.y2 <= self.y2
    }

    /// Center-distance overlap test; touching boxes collide
    pub fn overlaps(&self, other: &Area) -> bool {
        let d = (self.center() - other.center()).abs();
        d.x <= (self.width() + other.width()) / 2.0 && d.y <= (self.height() + other.height()) / 2.0
    }

    /// Bounding box of this box's corners after `transform`
    pub fn transformed(&self, transform: &Affine2) -> Area {
        let corners = [
            Vec2::new(self.x1, self.y1),
            Vec2::new(self.x2, self.y1),
            Vec2::new(self.x1, self.y2),
            Vec2::new(self.x2, self.y2),
        ]
        .map(|c| transform.transform_point2(c));

        let min = corners.iter().fold(Vec2::splat(f32::INFINITY), |acc, c| acc.min(*c));
        let max = corners.iter().fold(Vec2::splat(f32::NEG_INFINITY), |acc, c| acc.max(*c));
        Area::new(min.x, min.y, max.x, max.y)
    }
}
