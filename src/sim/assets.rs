//! Asset provider interface
//!
//! Image decoding lives in the host. The core only needs to know the
//! sub-image boxes and pivots so it can position and hit-test them.

use glam::Vec2;

use super::area::Area;
use super::scene::{Layer, Scene, Sprite, SpriteId, SpriteKind};
use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH, SOURCE_IMAGE_SCALE};
use crate::error::ConfigError;

/// Source of named sub-images
pub trait AssetCatalog {
    /// Bounds of a sub-image in its own coordinate space
    fn bounds(&self, kind: SpriteKind) -> Option<Area>;

    /// Point the sub-image is rotated/scaled about and positioned by
    fn pivot(&self, kind: SpriteKind) -> Vec2 {
        self.bounds(kind).map(|b| b.center()).unwrap_or(Vec2::ZERO)
    }
}

/// Instantiate a sub-image as a sprite
pub fn instantiate(
    catalog: &dyn AssetCatalog,
    scene: &mut Scene,
    kind: SpriteKind,
    layer: Layer,
) -> Result<SpriteId, ConfigError> {
    let local = catalog
        .bounds(kind)
        .ok_or(ConfigError::MissingSubImage(kind.asset_id()))?;
    Ok(scene.spawn(Sprite::new(kind, layer, local)))
}

/// The zoom math assumes the background is exactly the board scaled up
pub fn check_background(catalog: &dyn AssetCatalog) -> Result<(), ConfigError> {
    let bounds = catalog
        .bounds(SpriteKind::Background)
        .ok_or(ConfigError::MissingSubImage(SpriteKind::Background.asset_id()))?;
    let expected = (BOARD_WIDTH * SOURCE_IMAGE_SCALE, BOARD_HEIGHT * SOURCE_IMAGE_SCALE);
    if bounds.x1 != 0.0 || bounds.y1 != 0.0 || (bounds.x2, bounds.y2) != expected {
        return Err(ConfigError::BackgroundMismatch {
            expected,
            found: (bounds.width(), bounds.height()),
        });
    }
    Ok(())
}

/// Sub-image layout of the bundled rock wall artwork
#[derive(Debug, Clone, Copy, Default)]
pub struct RockwallAssets;

impl RockwallAssets {
    const NUGGET_PIVOT: Vec2 = Vec2::new(1000.0, 800.0);
    const SPARK_PIVOT: Vec2 = Vec2::new(600.0, 600.0);
    const LORRY_PIVOT: Vec2 = Vec2::new(2220.0, 1432.0);
    const STONE_PIVOTS: [Vec2; 4] = [
        Vec2::new(500.0, 1300.0),
        Vec2::new(1000.0, 1300.0),
        Vec2::new(1500.0, 1300.0),
        Vec2::new(2000.0, 1300.0),
    ];
}

impl AssetCatalog for RockwallAssets {
    fn bounds(&self, kind: SpriteKind) -> Option<Area> {
        let area = match kind {
            SpriteKind::Background => Area::new(
                0.0,
                0.0,
                BOARD_WIDTH * SOURCE_IMAGE_SCALE,
                BOARD_HEIGHT * SOURCE_IMAGE_SCALE,
            ),
            SpriteKind::Nugget => Area::from_center(Self::NUGGET_PIVOT, Vec2::new(60.0, 44.0)),
            SpriteKind::Spark => Area::from_center(Self::SPARK_PIVOT, Vec2::new(90.0, 90.0)),
            SpriteKind::Lorry => Area::from_center(Self::LORRY_PIVOT, Vec2::new(180.0, 120.0)),
            SpriteKind::Stone(n) => {
                let pivot = *Self::STONE_PIVOTS.get(n as usize)?;
                Area::from_center(pivot, Vec2::new(120.0 + 20.0 * n as f32, 90.0))
            }
            // Pixmap placed at (850, 850) before its 0.5 scale
            SpriteKind::TeacherIcon => Area::new(850.0, 850.0, 950.0, 950.0),
            SpriteKind::Region => return None,
        };
        Some(area)
    }

    fn pivot(&self, kind: SpriteKind) -> Vec2 {
        match kind {
            SpriteKind::Nugget => Self::NUGGET_PIVOT,
            SpriteKind::Spark => Self::SPARK_PIVOT,
            SpriteKind::Lorry => Self::LORRY_PIVOT,
            SpriteKind::Stone(n) => Self::STONE_PIVOTS
                .get(n as usize)
                .copied()
                .unwrap_or(Vec2::ZERO),
            _ => Vec2::ZERO,
        }
    }
}
