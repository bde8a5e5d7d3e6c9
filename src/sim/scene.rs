//! Sprite arena and coordinate spaces
//!
//! Sprites are addressed by generational `SpriteId` handles, so placer
//! registrations and event targets never hold references into the arena.
//!
//! Three coordinate spaces exist:
//! - sprite-local: the sub-image's own coordinates in the asset file
//! - viewport: the zoomable rock wall group (background art resolution)
//! - canvas: the 800x520 board, which is also the "root" pointer space

use glam::{Affine2, Vec2};

use super::area::Area;

/// Which named sub-image (or plain region) a sprite shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Nugget,
    Spark,
    Lorry,
    /// Decoration stone, variant 0..=3
    Stone(u8),
    TeacherIcon,
    /// Invisible blocking rectangle (UI chrome, screen edges)
    Region,
}

impl SpriteKind {
    /// Sub-image id inside the asset file
    pub fn asset_id(self) -> &'static str {
        match self {
            SpriteKind::Background => "#BACKGROUND",
            SpriteKind::Nugget => "#NUGGET",
            SpriteKind::Spark => "#SPARK",
            SpriteKind::Lorry => "#LORRY",
            SpriteKind::Stone(0) => "#STONE1",
            SpriteKind::Stone(1) => "#STONE2",
            SpriteKind::Stone(2) => "#STONE3",
            SpriteKind::Stone(_) => "#STONE4",
            SpriteKind::TeacherIcon => "tux-teacher.png",
            SpriteKind::Region => "",
        }
    }
}

/// Whether a sprite moves with the zoomable viewport or sits on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Canvas,
    Viewport,
}

/// A positionable, transformable, boxed image
#[derive(Debug, Clone)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub layer: Layer,
    /// Bounds in sprite-local space
    pub local: Area,
    /// Sprite-local to layer space
    pub transform: Affine2,
    pub visible: bool,
}

impl Sprite {
    pub fn new(kind: SpriteKind, layer: Layer, local: Area) -> Self {
        Self {
            kind,
            layer,
            local,
            transform: Affine2::IDENTITY,
            visible: true,
        }
    }

    /// Invisible fixed rectangle in canvas space
    pub fn region(area: Area) -> Self {
        Self {
            visible: false,
            ..Self::new(SpriteKind::Region, Layer::Canvas, area)
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_transform(mut self, transform: Affine2) -> Self {
        self.transform = transform;
        self
    }
}

/// Stable handle to a sprite in a `Scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    sprite: Option<Sprite>,
}

/// All sprites of the activity plus the viewport group's transform
#[derive(Debug, Clone)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Viewport space to canvas space
    view: Affine2,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            view: Affine2::IDENTITY,
        }
    }

    pub fn spawn(&mut self, sprite: Sprite) -> SpriteId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.sprite = Some(sprite);
            SpriteId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                sprite: Some(sprite),
            });
            SpriteId { index, generation: 0 }
        }
    }

    /// Remove a sprite; its id (and any copy of it) goes stale
    pub fn despawn(&mut self, id: SpriteId) -> Option<Sprite> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let sprite = slot.sprite.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(sprite)
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.sprite.as_ref())
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.sprite.as_mut())
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live sprites
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_transform(&mut self, id: SpriteId, transform: Affine2) {
        if let Some(sprite) = self.get_mut(id) {
            sprite.transform = transform;
        }
    }

    pub fn set_visible(&mut self, id: SpriteId, visible: bool) {
        if let Some(sprite) = self.get_mut(id) {
            sprite.visible = visible;
        }
    }

    pub fn is_visible(&self, id: SpriteId) -> bool {
        self.get(id).is_some_and(|s| s.visible)
    }

    /// Viewport-to-canvas transform
    pub fn view(&self) -> Affine2 {
        self.view
    }

    pub fn set_view(&mut self, view: Affine2) {
        self.view = view;
    }

    fn to_canvas(&self, sprite: &Sprite) -> Affine2 {
        match sprite.layer {
            Layer::Canvas => sprite.transform,
            Layer::Viewport => self.view * sprite.transform,
        }
    }

    /// Current bounds in canvas space. Hidden sprites still have bounds.
    pub fn bounds(&self, id: SpriteId) -> Option<Area> {
        let sprite = self.get(id)?;
        Some(sprite.local.transformed(&self.to_canvas(sprite)))
    }

    /// Convert a point from a sprite's local space to canvas space.
    ///
    /// Pointer events report coordinates relative to the topmost sprite under
    /// the pointer; `None` means the point already is in canvas space.
    pub fn item_to_canvas(&self, item: Option<SpriteId>, p: Vec2) -> Vec2 {
        match item.and_then(|id| self.get(id)) {
            Some(sprite) => self.to_canvas(sprite).transform_point2(p),
            None => p,
        }
    }

    /// Convert a canvas point into viewport space
    pub fn canvas_to_view(&self, p: Vec2) -> Vec2 {
        self.view.inverse().transform_point2(p)
    }
}
