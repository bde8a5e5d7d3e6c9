//! Deterministic game core
//!
//! All gameplay logic lives here. Nothing in this module draws or reads
//! the clock during play:
//! - Time only advances through `MiningGame::advance`
//! - Seeded RNG only
//! - Rendering, audio and the tutorial artwork are the host's business

pub mod area;
pub mod assets;
pub mod decorations;
pub mod game;
pub mod host;
pub mod nugget;
pub mod placer;
pub mod scene;
pub mod sparkle;
pub mod timer;
pub mod tutorial;
pub mod viewport;

pub use area::Area;
pub use assets::{AssetCatalog, RockwallAssets};
pub use game::{ClickKind, InputEvent, MiningGame, TargetState, TutorialMode};
pub use host::{Host, LoggingHost, Sound};
pub use placer::{Placement, Placer};
pub use scene::{Layer, Scene, Sprite, SpriteId, SpriteKind};
pub use sparkle::{Sparkle, SparklePhase};
pub use timer::{Scheduler, TimerTask};
pub use tutorial::{Tutorial, TutorialStep, TutorialTracker};
pub use viewport::{ScrollDirection, Viewport, ZoomBand};
