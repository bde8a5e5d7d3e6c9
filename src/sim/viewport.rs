//! Zoom and pan of the rock wall
//!
//! The viewport owns the translation + uniform scale applied to the rock wall
//! group. Each scroll tick zooms by a fixed factor around the pointer, then
//! the pan is clamped so the background always covers the whole board.

use glam::{Affine2, Vec2};

use super::scene::Scene;

/// Coarse zoom state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomBand {
    /// Fully zoomed out
    Min,
    /// Somewhere in between
    Mid,
    /// Fully zoomed in (the only band where the nugget is shown)
    Max,
}

impl ZoomBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomBand::Min => "min",
            ZoomBand::Mid => "mid",
            ZoomBand::Max => "max",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Zoom in
    Up,
    /// Zoom out
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    /// Pan offset (canvas units)
    x: f32,
    y: f32,
    scale: f32,
    /// Zoom-out limit: the background exactly fills the board
    scale_min: f32,
    scale_max: f32,
    zoom_factor: f32,
    /// Board size
    canvas: Vec2,
    /// Background art size / board size
    image_scale: f32,
}

impl Viewport {
    pub fn new(canvas: Vec2, image_scale: f32) -> Self {
        let scale_min = 1.0 / image_scale;
        Self {
            x: 0.0,
            y: 0.0,
            scale: scale_min,
            scale_min,
            scale_max: scale_min,
            zoom_factor: 1.0,
            canvas,
            image_scale,
        }
    }

    /// Set the level's zoom limits and zoom out fully
    pub fn reset(&mut self, scene: &mut Scene, scale_max: f32, zoom_factor: f32) {
        if scale_max < self.scale_min {
            log::warn!(
                "scale_max {scale_max} below scale_min {}, using scale_min",
                self.scale_min
            );
        }
        self.scale_max = scale_max.max(self.scale_min);
        self.zoom_factor = zoom_factor;
        self.scale = self.scale_min;
        self.x = 0.0;
        self.y = 0.0;
        self.apply(scene);
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn scale_min(&self) -> f32 {
        self.scale_min
    }

    pub fn scale_max(&self) -> f32 {
        self.scale_max
    }

    /// Viewport space to canvas space
    pub fn transform(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(Vec2::splat(self.scale), 0.0, self.offset())
    }

    pub fn band(&self) -> ZoomBand {
        if self.scale == self.scale_max {
            ZoomBand::Max
        } else if self.scale == self.scale_min {
            ZoomBand::Min
        } else {
            ZoomBand::Mid
        }
    }

    /// Handle one scroll tick at `pointer` (canvas space).
    ///
    /// Returns the new band if this tick moved into a different one. Sideways
    /// scrolling changes nothing.
    pub fn scroll(
        &mut self,
        scene: &mut Scene,
        pointer: Vec2,
        direction: ScrollDirection,
    ) -> Option<ZoomBand> {
        let local = scene.canvas_to_view(pointer);

        let old_scale = self.scale;
        let old_band = self.band();

        self.scale = match direction {
            ScrollDirection::Up => (self.scale * self.zoom_factor).min(self.scale_max),
            ScrollDirection::Down => (self.scale / self.zoom_factor).max(self.scale_min),
            ScrollDirection::Left | ScrollDirection::Right => return None,
        };

        // Keep the point under the cursor fixed
        let offset = self.offset() + local * (old_scale - self.scale);

        // Never uncover the board: left/top edge pinned at most at 0,
        // right/bottom edge at least at the board size
        let min = self.canvas * (1.0 - self.scale * self.image_scale);
        self.x = offset.x.min(0.0).max(min.x);
        self.y = offset.y.min(0.0).max(min.y);

        self.apply(scene);

        let band = self.band();
        if band != old_band {
            log::debug!("Zoom band {} -> {}", old_band.as_str(), band.as_str());
            Some(band)
        } else {
            None
        }
    }

    /// Visible board rectangle expressed in viewport space
    pub fn visible_region(&self) -> (Vec2, Vec2) {
        let inv = self.transform().inverse();
        (inv.transform_point2(Vec2::ZERO), inv.transform_point2(self.canvas))
    }

    fn apply(&self, scene: &mut Scene) {
        scene.set_view(self.transform());
    }
}
