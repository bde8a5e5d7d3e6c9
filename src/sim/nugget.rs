//! The gold nugget the player is looking for

use glam::{Affine2, Vec2};

use super::area::Area;
use super::scene::{Scene, SpriteId};
use crate::consts::SPARKLE_NUGGET_OFFSET;

#[derive(Debug, Clone)]
pub struct Nugget {
    sprite: SpriteId,
    /// Nugget image pivot in its own space
    pivot: Vec2,
    /// Position in viewport space
    pos: Vec2,
}

impl Nugget {
    pub fn new(sprite: SpriteId, pivot: Vec2) -> Self {
        Self {
            sprite,
            pivot,
            pos: Vec2::ZERO,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        self.sprite
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Move the nugget so its pivot sits at `pos`
    pub fn reset(&mut self, scene: &mut Scene, pos: Vec2) {
        self.pos = pos;
        scene.set_transform(self.sprite, Affine2::from_translation(pos - self.pivot));
    }

    pub fn show(&self, scene: &mut Scene) {
        scene.set_visible(self.sprite, true);
    }

    pub fn hide(&self, scene: &mut Scene) {
        scene.set_visible(self.sprite, false);
    }

    pub fn is_visible(&self, scene: &Scene) -> bool {
        scene.is_visible(self.sprite)
    }

    /// Current bounds in canvas space
    pub fn bounds(&self, scene: &Scene) -> Option<Area> {
        scene.bounds(self.sprite)
    }

    /// Is the canvas point inside the nugget's box (edges included)?
    pub fn is_hit(&self, scene: &Scene, p: Vec2) -> bool {
        self.bounds(scene).is_some_and(|b| b.contains(p))
    }

    /// Where the sparkle is anchored (viewport space)
    pub fn sparkle_anchor(&self) -> Vec2 {
        self.pos - Vec2::splat(SPARKLE_NUGGET_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::{Layer, Sprite, SpriteKind};

    fn setup() -> (Scene, Nugget) {
        let mut scene = Scene::new();
        let pivot = Vec2::new(1000.0, 800.0);
        let id = scene.spawn(
            Sprite::new(SpriteKind::Nugget, Layer::Viewport, Area::from_center(pivot, Vec2::new(60.0, 40.0)))
                .hidden(),
        );
        (scene, Nugget::new(id, pivot))
    }

    #[test]
    fn test_reset_centers_on_position() {
        let (mut scene, mut nugget) = setup();
        nugget.reset(&mut scene, Vec2::new(300.0, 450.0));
        assert_eq!(nugget.bounds(&scene), Some(Area::new(270.0, 430.0, 330.0, 470.0)));
        assert_eq!(nugget.sparkle_anchor(), Vec2::new(290.0, 440.0));
    }

    #[test]
    fn test_hit_on_edge_but_not_outside() {
        let (mut scene, mut nugget) = setup();
        nugget.reset(&mut scene, Vec2::new(300.0, 450.0));
        assert!(nugget.is_hit(&scene, Vec2::new(270.0, 450.0)));
        assert!(nugget.is_hit(&scene, Vec2::new(330.0, 470.0)));
        assert!(!nugget.is_hit(&scene, Vec2::new(269.0, 450.0)));
        assert!(!nugget.is_hit(&scene, Vec2::new(300.0, 471.0)));
    }

    #[test]
    fn test_hit_uses_zoomed_bounds() {
        let (mut scene, mut nugget) = setup();
        nugget.reset(&mut scene, Vec2::new(300.0, 450.0));
        scene.set_view(Affine2::from_scale_angle_translation(Vec2::splat(0.5), 0.0, Vec2::new(-50.0, -100.0)));
        // Canvas bounds: (85, 115) - (115, 135)
        assert!(nugget.is_hit(&scene, Vec2::new(85.0, 115.0)));
        assert!(!nugget.is_hit(&scene, Vec2::new(84.0, 115.0)));
    }

    #[test]
    fn test_visibility_toggle() {
        let (mut scene, nugget) = setup();
        assert!(!nugget.is_visible(&scene));
        nugget.show(&mut scene);
        assert!(nugget.is_visible(&scene));
        nugget.hide(&mut scene);
        assert!(!nugget.is_visible(&scene));
    }
}
