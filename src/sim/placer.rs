//! Random, overlap-avoiding placement
//!
//! The placer keeps the set of blocking sprites. Placing an item draws random
//! positions until one does not collide with any blocker, then registers the
//! item as a blocker itself. Crowded boards get a bounded number of retries
//! and then the last position is accepted anyway.

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;

use super::scene::{Scene, SpriteId};
use crate::consts::MAX_PLACEMENT_RETRIES;

/// Outcome of a `Placer::place` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position handed to the placement callback (viewport space)
    pub pos: Vec2,
    /// Number of positions tried
    pub attempts: u32,
    /// True if no collision-free spot was found and the last one was kept
    pub overlapping: bool,
}

#[derive(Debug, Clone)]
pub struct Placer {
    /// Playable canvas size
    canvas: Vec2,
    /// Canvas-to-background magnification applied to drawn positions
    image_scale: f32,
    blockers: Vec<SpriteId>,
    /// Blocker -> index in `blockers`
    slots: HashMap<SpriteId, usize>,
}

impl Placer {
    pub fn new(canvas: Vec2, image_scale: f32) -> Self {
        Self {
            canvas,
            image_scale,
            blockers: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Place `item` at a random free spot and register it as a blocker.
    ///
    /// `apply` moves the item to the drawn position (and may vary its rotation
    /// or scale). Returns `None` if `item` is not in the scene.
    pub fn place<R, F>(
        &mut self,
        scene: &mut Scene,
        item: SpriteId,
        rng: &mut R,
        mut apply: F,
    ) -> Option<Placement>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut Scene, SpriteId, Vec2, &mut R),
    {
        let Some(area) = scene.bounds(item) else {
            log::warn!("Cannot place {item:?}: not in scene");
            return None;
        };
        // Truncated like pixel sizes; only bounds the draw range
        let half_w = (area.width() / 2.0) as i32;
        let half_h = (area.height() / 2.0) as i32;
        let canvas_w = self.canvas.x as i32;
        let canvas_h = self.canvas.y as i32;

        let mut attempts = 0;
        loop {
            attempts += 1;
            let x = draw(rng, half_w, canvas_w - half_w) as f32 * self.image_scale;
            let y = draw(rng, half_h, canvas_h - half_h) as f32 * self.image_scale;
            let pos = Vec2::new(x, y);

            apply(scene, item, pos, rng);

            let overlapping = self.collides(scene, item);
            if !overlapping || attempts > MAX_PLACEMENT_RETRIES {
                if overlapping {
                    log::warn!(
                        "No free spot for {item:?} after {attempts} attempts, accepting overlap"
                    );
                }
                self.add_blocker(item);
                return Some(Placement {
                    pos,
                    attempts,
                    overlapping,
                });
            }
        }
    }

    /// Register a blocking sprite
    pub fn add_blocker(&mut self, blocker: SpriteId) {
        if self.slots.contains_key(&blocker) {
            log::warn!("Blocker {blocker:?} already registered");
            return;
        }
        self.slots.insert(blocker, self.blockers.len());
        self.blockers.push(blocker);
    }

    /// Deregister a blocker. Returns false (and warns) if it was not registered.
    pub fn remove_blocker(&mut self, blocker: SpriteId) -> bool {
        let Some(index) = self.slots.remove(&blocker) else {
            log::warn!("Blocker {blocker:?} not in list");
            return false;
        };
        self.blockers.swap_remove(index);
        if let Some(moved) = self.blockers.get(index) {
            self.slots.insert(*moved, index);
        }
        true
    }

    pub fn remove_all_blockers(&mut self) {
        self.blockers.clear();
        self.slots.clear();
    }

    pub fn is_blocker(&self, id: SpriteId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn blockers(&self) -> &[SpriteId] {
        &self.blockers
    }

    /// Does `item` overlap any registered blocker (other than itself)?
    pub fn collides(&self, scene: &Scene, item: SpriteId) -> bool {
        let Some(area) = scene.bounds(item) else {
            return false;
        };
        self.blockers
            .iter()
            .filter(|b| **b != item)
            .filter_map(|b| scene.bounds(*b))
            .any(|b| area.overlaps(&b))
    }
}

/// Uniform integer in `[lo, hi)`; the midpoint if the item is too big for the range
fn draw<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    if lo < hi {
        rng.random_range(lo..hi)
    } else {
        (lo + hi) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH, SOURCE_IMAGE_SCALE};
    use crate::sim::area::Area;
    use crate::sim::scene::{Layer, Sprite, SpriteKind};
    use glam::Affine2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn board() -> Vec2 {
        Vec2::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Scene at minimum zoom, like every placement during play
    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.set_view(Affine2::from_scale(Vec2::splat(1.0 / SOURCE_IMAGE_SCALE)));
        scene
    }

    /// A 30x30 (canvas) item centered on its local origin
    fn item(scene: &mut Scene) -> SpriteId {
        scene.spawn(Sprite::new(
            SpriteKind::Stone(0),
            Layer::Viewport,
            Area::from_center(Vec2::ZERO, Vec2::splat(90.0)),
        ))
    }

    fn move_to(scene: &mut Scene, id: SpriteId, pos: Vec2, _rng: &mut Pcg32) {
        scene.set_transform(id, Affine2::from_translation(pos));
    }

    #[test]
    fn test_place_registers_item() {
        let mut scene = scene();
        let mut placer = Placer::new(board(), SOURCE_IMAGE_SCALE);
        let mut rng = Pcg32::seed_from_u64(1);
        let id = item(&mut scene);

        let placement = placer.place(&mut scene, id, &mut rng, move_to).unwrap();
        assert_eq!(placement.attempts, 1);
        assert!(!placement.overlapping);
        assert!(placer.is_blocker(id));

        // Item stays on the board
        let bounds = scene.bounds(id).unwrap();
        assert!(Area::new(0.0, 0.0, BOARD_WIDTH, BOARD_HEIGHT).contains_area(&bounds));
    }

    #[test]
    fn test_place_avoids_blocker() {
        let mut scene = scene();
        let mut placer = Placer::new(board(), SOURCE_IMAGE_SCALE);
        let mut rng = Pcg32::seed_from_u64(2);
        // Left half of the board is blocked
        let wall = scene.spawn(Sprite::region(Area::new(0.0, 0.0, 400.0, 520.0)));
        placer.add_blocker(wall);

        for _ in 0..10 {
            let id = item(&mut scene);
            let placement = placer.place(&mut scene, id, &mut rng, move_to).unwrap();
            assert!(!placement.overlapping);
            assert!(scene.bounds(id).unwrap().x1 > 400.0);
        }
    }

    #[test]
    fn test_full_board_terminates_with_overlap() {
        let mut scene = scene();
        let mut placer = Placer::new(board(), SOURCE_IMAGE_SCALE);
        let mut rng = Pcg32::seed_from_u64(3);
        let wall = scene.spawn(Sprite::region(Area::new(0.0, 0.0, BOARD_WIDTH, BOARD_HEIGHT)));
        placer.add_blocker(wall);

        let id = item(&mut scene);
        let mut calls = 0;
        let placement = placer
            .place(&mut scene, id, &mut rng, |scene, id, pos, rng| {
                calls += 1;
                move_to(scene, id, pos, rng);
            })
            .unwrap();
        assert!(placement.overlapping);
        assert_eq!(placement.attempts, MAX_PLACEMENT_RETRIES + 1);
        assert_eq!(calls, MAX_PLACEMENT_RETRIES + 1);
        // Accepted anyway
        assert!(placer.is_blocker(id));
    }

    #[test]
    fn test_remove_blocker_by_identity() {
        let mut scene = scene();
        let mut placer = Placer::new(board(), SOURCE_IMAGE_SCALE);
        let a = scene.spawn(Sprite::region(Area::new(0.0, 0.0, 10.0, 10.0)));
        let b = scene.spawn(Sprite::region(Area::new(0.0, 0.0, 10.0, 10.0)));
        let c = scene.spawn(Sprite::region(Area::new(0.0, 0.0, 10.0, 10.0)));
        placer.add_blocker(a);
        placer.add_blocker(b);
        placer.add_blocker(c);

        // Same bounds, different identity
        assert!(placer.remove_blocker(a));
        assert!(!placer.is_blocker(a));
        assert!(placer.is_blocker(b));
        assert!(placer.is_blocker(c));
        assert!(!placer.remove_blocker(a));

        assert!(placer.remove_blocker(c));
        assert_eq!(placer.blockers(), &[b]);

        placer.remove_all_blockers();
        assert!(placer.blockers().is_empty());
        assert!(!placer.remove_blocker(b));
    }

    #[test]
    fn test_place_unknown_item() {
        let mut scene = scene();
        let mut placer = Placer::new(board(), SOURCE_IMAGE_SCALE);
        let mut rng = Pcg32::seed_from_u64(4);
        let id = item(&mut scene);
        scene.despawn(id);
        assert!(placer.place(&mut scene, id, &mut rng, move_to).is_none());
        assert!(placer.blockers().is_empty());
    }

    #[test]
    fn test_despawned_blocker_is_ignored() {
        let mut scene = scene();
        let mut placer = Placer::new(board(), SOURCE_IMAGE_SCALE);
        let wall = scene.spawn(Sprite::region(Area::new(0.0, 0.0, BOARD_WIDTH, BOARD_HEIGHT)));
        placer.add_blocker(wall);
        scene.despawn(wall);

        let id = item(&mut scene);
        let mut rng = Pcg32::seed_from_u64(5);
        let placement = placer.place(&mut scene, id, &mut rng, move_to).unwrap();
        assert!(!placement.overlapping);
    }

    proptest! {
        #[test]
        fn prop_sparse_placement_is_collision_free(
            seed in any::<u64>(),
            blockers in prop::collection::vec((42.0f32..700.0, 42.0f32..440.0, 10.0f32..40.0, 10.0f32..40.0), 0..8),
        ) {
            let mut scene = scene();
            let mut placer = Placer::new(board(), SOURCE_IMAGE_SCALE);
            let mut rng = Pcg32::seed_from_u64(seed);
            for (x, y, w, h) in blockers {
                let id = scene.spawn(Sprite::region(Area::new(x, y, x + w, y + h)));
                placer.add_blocker(id);
            }

            let id = item(&mut scene);
            let placement = placer.place(&mut scene, id, &mut rng, move_to).unwrap();
            let area = scene.bounds(id).unwrap();
            let clear = placer
                .blockers()
                .iter()
                .filter(|b| **b != id)
                .all(|b| !scene.bounds(*b).unwrap().overlaps(&area));
            // Under 10% density a free spot within the retry budget is near-certain
            prop_assert!(!placement.overlapping);
            prop_assert!(clear);
        }

        #[test]
        fn prop_placement_always_terminates(
            seed in any::<u64>(),
            count in 0usize..60,
        ) {
            let mut scene = scene();
            let mut placer = Placer::new(board(), SOURCE_IMAGE_SCALE);
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..count {
                let id = item(&mut scene);
                let placement = placer.place(&mut scene, id, &mut rng, move_to).unwrap();
                prop_assert!(placement.attempts <= MAX_PLACEMENT_RETRIES + 1);
            }
            prop_assert_eq!(placer.blockers().len(), count);
        }
    }
}
