//! Stones scattered over the rock wall
//!
//! They make every level look a bit different and help orientation while
//! zooming. Each stone is placed through the placer with a random size and
//! tilt, so stones never cover the nugget or each other.

use rand::Rng;

use super::assets::{AssetCatalog, instantiate};
use super::placer::Placer;
use super::scene::{Layer, Scene, SpriteId, SpriteKind};
use crate::error::ConfigError;
use crate::pivot_transform;

/// Number of stone sub-images
pub const STONE_VARIANTS: u8 = 4;

#[derive(Debug, Clone, Default)]
pub struct Decorations {
    stones: Vec<SpriteId>,
}

impl Decorations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stones(&self) -> &[SpriteId] {
        &self.stones
    }

    /// Scatter `count` random stones over the viewport
    pub fn decorate<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        catalog: &dyn AssetCatalog,
        scene: &mut Scene,
        placer: &mut Placer,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        debug_assert!(self.stones.is_empty(), "viewport already decorated");

        for _ in 0..count {
            let kind = SpriteKind::Stone(rng.random_range(0..STONE_VARIANTS));
            let pivot = catalog.pivot(kind);
            let stone = instantiate(catalog, scene, kind, Layer::Viewport)?;
            self.stones.push(stone);

            placer.place(scene, stone, rng, |scene, stone, pos, rng| {
                // 1.2^[-4, 4): roughly half to double size
                let scale = 1.2f32.powi(rng.random_range(-4..4));
                let degrees = rng.random_range(-20..20) as f32;
                scene.set_transform(stone, pivot_transform(pivot, scale, degrees, pos));
            });
        }
        log::debug!("Placed {} decorations", self.stones.len());
        Ok(())
    }

    /// Remove all stones from the scene
    pub fn cleanup(&mut self, scene: &mut Scene) {
        for stone in self.stones.drain(..) {
            scene.despawn(stone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH, SOURCE_IMAGE_SCALE};
    use crate::sim::assets::RockwallAssets;
    use glam::{Affine2, Vec2};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_decorate_and_cleanup() {
        let mut scene = Scene::new();
        scene.set_view(Affine2::from_scale(Vec2::splat(1.0 / SOURCE_IMAGE_SCALE)));
        let mut placer = Placer::new(Vec2::new(BOARD_WIDTH, BOARD_HEIGHT), SOURCE_IMAGE_SCALE);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut decorations = Decorations::new();

        decorations
            .decorate(10, &RockwallAssets, &mut scene, &mut placer, &mut rng)
            .unwrap();
        assert_eq!(decorations.stones().len(), 10);
        assert_eq!(scene.len(), 10);
        for stone in decorations.stones() {
            assert!(placer.is_blocker(*stone));
            assert!(matches!(scene.get(*stone).unwrap().kind, SpriteKind::Stone(n) if n < STONE_VARIANTS));
        }

        let stones = decorations.stones().to_vec();
        decorations.cleanup(&mut scene);
        assert!(decorations.stones().is_empty());
        assert!(scene.is_empty());
        assert!(stones.iter().all(|s| !scene.contains(*s)));
    }

    #[test]
    fn test_stones_do_not_overlap_on_sparse_board() {
        let mut scene = Scene::new();
        scene.set_view(Affine2::from_scale(Vec2::splat(1.0 / SOURCE_IMAGE_SCALE)));
        let mut placer = Placer::new(Vec2::new(BOARD_WIDTH, BOARD_HEIGHT), SOURCE_IMAGE_SCALE);
        let mut rng = Pcg32::seed_from_u64(21);
        let mut decorations = Decorations::new();
        decorations
            .decorate(5, &RockwallAssets, &mut scene, &mut placer, &mut rng)
            .unwrap();

        let boxes: Vec<_> = decorations
            .stones()
            .iter()
            .map(|s| scene.bounds(*s).unwrap())
            .collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
    }
}
