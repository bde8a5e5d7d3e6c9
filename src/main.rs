//! Nugget Mine entry point
//!
//! The native binary has no window: it plays every level headlessly, zooming
//! in on each nugget, clicking it and zooming out again, and logs the run.
//!
//! Usage: `nugget-mine [config.json]` (set `RUST_LOG=debug` for details)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Nugget Mine (headless) starting...");

    if let Err(err) = autoplay::run(std::env::args().nth(1)) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use glam::Vec2;

    use nugget_mine::sim::{
        ClickKind, InputEvent, LoggingHost, MiningGame, RockwallAssets, ScrollDirection,
        TargetState, TutorialTracker, ZoomBand,
    };
    use nugget_mine::{ConfigError, GameConfig};

    /// Scroll ticks before giving up on reaching a zoom band
    const MAX_SCROLLS: usize = 32;
    /// Simulated time between inputs
    const STEP_MS: u64 = 120;

    type Game = MiningGame<LoggingHost, TutorialTracker>;

    pub fn run(config_path: Option<String>) -> Result<(), ConfigError> {
        let config = match config_path {
            Some(path) => GameConfig::load(std::path::Path::new(&path))?,
            None => GameConfig::default(),
        };
        let max_level = config.max_level();

        let mut game = MiningGame::start(
            config,
            Box::new(RockwallAssets),
            LoggingHost,
            TutorialTracker::default(),
        )?;

        loop {
            let level = game.level();
            play_level(&mut game);
            if game.target_state() != TargetState::Won {
                log::warn!("Level {level} not finished");
                break;
            }
            if level >= max_level {
                break;
            }
            // The host pauses while showing its bonus, resuming moves on
            game.pause(true);
            game.advance(STEP_MS);
            game.pause(false);
        }

        log::info!("Finished at level {} after {} ms", game.level(), game.scheduler().now());
        game.end();
        Ok(())
    }

    fn play_level(game: &mut Game) {
        let total = game.level_params().nuggets_to_collect;
        for _ in 0..total {
            let Some(center) = game.nugget_bounds().map(|b| b.center()) else {
                return;
            };
            zoom_until(game, ScrollDirection::Up, center, ZoomBand::Max);

            let Some(at) = game.nugget_bounds().map(|b| b.center()) else {
                return;
            };
            game.handle(InputEvent::Click {
                target: None,
                local: at,
                root: at,
                kind: ClickKind::Single,
            });
            game.advance(STEP_MS);
            log::debug!("Collected {}/{}", game.collected(), total);

            if game.target_state() == TargetState::Won {
                return;
            }
            zoom_until(game, ScrollDirection::Down, at, ZoomBand::Min);
        }
    }

    fn zoom_until(game: &mut Game, direction: ScrollDirection, at: Vec2, band: ZoomBand) {
        for _ in 0..MAX_SCROLLS {
            if game.zoom_band() == band {
                return;
            }
            game.handle(InputEvent::Scroll {
                direction,
                target: None,
                local: at,
            });
            game.advance(STEP_MS);
        }
        log::warn!("Zoom band {} not reached", band.as_str());
    }
}
