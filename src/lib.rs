//! Nugget Mine - find the hidden gold nugget in a zoomable rock wall
//!
//! Core modules:
//! - `sim`: Deterministic game core (placement, viewport, sparkle animation, level flow)
//! - `settings`: Level table and game configuration
//! - `error`: Startup/configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{GameConfig, LevelParams};

use glam::{Affine2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Board (screen) size in canvas units
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 520.0;

    /// Factor by which the background art exceeds screen resolution.
    /// Must be > 1 so the art still looks sharp when zoomed in.
    pub const SOURCE_IMAGE_SCALE: f32 = 3.0;

    /// Extra placement draws after the first before a colliding spot is accepted
    pub const MAX_PLACEMENT_RETRIES: u32 = 20;

    /// Decorations scattered per level (default config)
    pub const DEFAULT_DECORATIONS: usize = 10;

    /// Pointer distance (canvas units) to the nugget that advances the tutorial
    pub const MIN_NUGGET_APPROACH: f32 = 50.0;

    /// Sparkle animation tick period in milliseconds
    pub const SPARKLE_TICK_MS: u64 = 30;
    /// Per-tick shrink factor during a spark phase
    pub const SPARKLE_SCALE_FACTOR: f32 = 0.90;
    /// Scale a spark phase starts at
    pub const SPARKLE_SCALE_MAX: f32 = 1.0;
    /// A spark phase ends once the scale drops below this
    pub const SPARKLE_SCALE_MIN: f32 = 0.4;
    /// Degrees rotated per tick (sign flips every phase)
    pub const SPARKLE_ROT_DELTA: f32 = 6.0;
    /// Base pause length in ticks
    pub const SPARKLE_PAUSE_TICKS: i32 = 25;
    /// Random variation of the pause length (half-open: [-v, v))
    pub const SPARKLE_PAUSE_VARIATION: i32 = 10;

    /// Offset of the sparkle anchor from the nugget position (up-left)
    pub const SPARKLE_NUGGET_OFFSET: f32 = 10.0;
}

/// Build the transform that moves `pivot` to `dest`, scaling and rotating about it.
///
/// Applied to a point this is: translate by `-pivot`, scale, rotate, translate to `dest`.
#[inline]
pub fn pivot_transform(pivot: Vec2, scale: f32, degrees: f32, dest: Vec2) -> Affine2 {
    Affine2::from_translation(dest)
        * Affine2::from_angle(degrees.to_radians())
        * Affine2::from_scale(Vec2::splat(scale))
        * Affine2::from_translation(-pivot)
}
