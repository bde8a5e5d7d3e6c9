//! Level flow: wires placement, viewport, nugget and sparkle together
//!
//! Input arrives as `InputEvent` values, timers are drained with `advance`.
//! The nugget is only shown at maximum zoom; after it has been collected the
//! player has to zoom all the way out before the next one is placed.

use glam::{Affine2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::area::Area;
use super::assets::{AssetCatalog, check_background, instantiate};
use super::decorations::{Decorations, STONE_VARIANTS};
use super::host::{Host, Sound};
use super::nugget::Nugget;
use super::placer::Placer;
use super::scene::{Layer, Scene, Sprite, SpriteId, SpriteKind};
use super::sparkle::Sparkle;
use super::timer::{Scheduler, TimerTask};
use super::tutorial::{Tutorial, TutorialStep};
use super::viewport::{ScrollDirection, Viewport, ZoomBand};
use crate::consts::*;
use crate::error::ConfigError;
use crate::pivot_transform;
use crate::settings::{GameConfig, LevelParams};

/// Host bar in the lower left corner
const BAR_BLOCKER: Area = Area::new(0.0, 470.0, 196.0, 520.0);

/// Board margins where no nugget should be placed
const EDGE_BLOCKERS: [Area; 4] = [
    Area::new(0.0, 0.0, 800.0, 42.0),   // top
    Area::new(758.0, 0.0, 800.0, 520.0), // right
    Area::new(0.0, 510.0, 800.0, 520.0), // bottom
    Area::new(0.0, 0.0, 42.0, 520.0),   // left
];

/// Lorry (nugget counter) position on the board
const LORRY_POS: Vec2 = Vec2::new(730.0, 470.0);
/// The lorry is not zoomed, so undo the art's magnification (and then some)
const LORRY_SCALE: f32 = 0.4;
const TEACHER_ICON_SCALE: f32 = 0.5;

/// Pointer click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// Input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// `local` is relative to `target` (the topmost sprite under the pointer),
    /// `root` to the board
    Click {
        target: Option<SpriteId>,
        local: Vec2,
        root: Vec2,
        kind: ClickKind,
    },
    Move { root: Vec2 },
    Scroll {
        direction: ScrollDirection,
        target: Option<SpriteId>,
        local: Vec2,
    },
}

/// Lifecycle of the nugget within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// No nugget placed yet
    Idle,
    /// Placed, only the sparkle shows where
    Hidden,
    /// Shown at maximum zoom, waiting for the click
    Visible,
    /// Collected, a new nugget follows at minimum zoom
    Collected,
    /// All nuggets of the level collected
    Won,
}

/// Whether the tutorial can be started or is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialMode {
    Unavailable,
    /// Teacher icon is shown
    Offered,
    Running,
}

pub struct MiningGame<H: Host, T: Tutorial> {
    config: GameConfig,
    catalog: Box<dyn AssetCatalog>,
    host: H,
    tutorial: T,
    rng: Pcg32,

    scene: Scene,
    scheduler: Scheduler,
    placer: Placer,
    viewport: Viewport,
    decorations: Decorations,
    nugget: Nugget,
    sparkle: Sparkle,

    lorry: SpriteId,
    teacher_icon: SpriteId,
    chrome: Vec<SpriteId>,
    tutorial_blocker: SpriteId,

    level: u32,
    params: LevelParams,
    collected: u32,
    target: TargetState,
    tutorial_mode: TutorialMode,
    paused: bool,
    ended: bool,
    last_mouse: Option<Vec2>,
    /// "Move to" restart that fell due while paused
    deferred_move_to: Option<Vec2>,
}

impl<H: Host, T: Tutorial> MiningGame<H, T> {
    /// Build the scene and start level 1
    pub fn start(
        config: GameConfig,
        catalog: Box<dyn AssetCatalog>,
        host: H,
        tutorial: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        check_background(catalog.as_ref())?;
        for n in 0..STONE_VARIANTS {
            let kind = SpriteKind::Stone(n);
            catalog
                .bounds(kind)
                .ok_or(ConfigError::MissingSubImage(kind.asset_id()))?;
        }

        let seed = config.seed.unwrap_or_else(clock_seed);
        log::info!("Starting mining activity with seed {seed}");

        let board = Vec2::new(BOARD_WIDTH, BOARD_HEIGHT);
        let mut scene = Scene::new();

        // Creation order is drawing order: the spark goes above the nugget
        instantiate(catalog.as_ref(), &mut scene, SpriteKind::Background, Layer::Viewport)?;
        let nugget = instantiate(catalog.as_ref(), &mut scene, SpriteKind::Nugget, Layer::Viewport)?;
        scene.set_visible(nugget, false);
        let spark = instantiate(catalog.as_ref(), &mut scene, SpriteKind::Spark, Layer::Viewport)?;
        scene.set_visible(spark, false);

        let lorry = instantiate(catalog.as_ref(), &mut scene, SpriteKind::Lorry, Layer::Canvas)?;
        scene.set_transform(
            lorry,
            pivot_transform(catalog.pivot(SpriteKind::Lorry), LORRY_SCALE, 0.0, LORRY_POS),
        );
        let teacher_icon =
            instantiate(catalog.as_ref(), &mut scene, SpriteKind::TeacherIcon, Layer::Canvas)?;
        scene.set_transform(teacher_icon, Affine2::from_scale(Vec2::splat(TEACHER_ICON_SCALE)));
        scene.set_visible(teacher_icon, false);

        let chrome = std::iter::once(BAR_BLOCKER)
            .chain(EDGE_BLOCKERS)
            .map(|area| scene.spawn(Sprite::region(area)))
            .collect();
        let tutorial_blocker = scene.spawn(Sprite::region(tutorial.blocking_area()));

        let params = *config.level(1).ok_or(ConfigError::EmptyLevelTable)?;
        let mut game = Self {
            nugget: Nugget::new(nugget, catalog.pivot(SpriteKind::Nugget)),
            sparkle: Sparkle::new(spark, catalog.pivot(SpriteKind::Spark)),
            config,
            catalog,
            host,
            tutorial,
            rng: Pcg32::seed_from_u64(seed),
            scene,
            scheduler: Scheduler::new(),
            placer: Placer::new(board, SOURCE_IMAGE_SCALE),
            viewport: Viewport::new(board, SOURCE_IMAGE_SCALE),
            decorations: Decorations::new(),
            lorry,
            teacher_icon,
            chrome,
            tutorial_blocker,
            level: 1,
            params,
            collected: 0,
            target: TargetState::Idle,
            tutorial_mode: TutorialMode::Unavailable,
            paused: false,
            ended: false,
            last_mouse: None,
            deferred_move_to: None,
        };
        game.set_level(1);
        Ok(game)
    }

    /// Tear down the current level and start `level`
    pub fn set_level(&mut self, level: u32) {
        if self.ended {
            log::warn!("set_level({level}) after end");
            return;
        }
        self.end_level();
        self.tutorial_mode = TutorialMode::Unavailable;

        self.level = level;
        self.host.set_level(level);
        match self.config.level(level) {
            Some(params) => self.params = *params,
            None => log::warn!("No values defined for level {level}, keeping current settings"),
        }

        if self.params.tutorial_startable {
            // Keep the nugget out from under the tutorial artwork
            self.placer.add_blocker(self.tutorial_blocker);
        }

        self.collected = 0;
        self.target = TargetState::Idle;
        self.nugget.hide(&mut self.scene);
        self.update_counter();

        self.viewport
            .reset(&mut self.scene, self.params.scale_max, self.params.zoom_factor);

        self.placer.add_blocker(self.lorry);
        for &blocker in &self.chrome {
            self.placer.add_blocker(blocker);
        }

        if let Err(err) = self.decorations.decorate(
            self.config.decorations_per_level,
            self.catalog.as_ref(),
            &mut self.scene,
            &mut self.placer,
            &mut self.rng,
        ) {
            log::error!("Decorating level {level} failed: {err}");
        }

        self.place_new_nugget();
    }

    /// Stop everything level-scoped: tutorial, animation, timers, blockers, stones
    pub fn end_level(&mut self) {
        self.tutorial.stop();
        self.sparkle.end(&mut self.scene, &mut self.scheduler);
        self.scheduler.clear();
        self.placer.remove_all_blockers();
        self.decorations.cleanup(&mut self.scene);
        self.deferred_move_to = None;

        self.target = TargetState::Idle;
        self.nugget.hide(&mut self.scene);
        self.tutorial_mode = TutorialMode::Unavailable;
        self.scene.set_visible(self.teacher_icon, false);
    }

    /// Terminate the activity. Later events are ignored.
    pub fn end(&mut self) {
        if self.ended {
            return;
        }
        self.end_level();
        self.tutorial.end();
        self.scene = Scene::new();
        self.ended = true;
        log::info!("Mining activity ended");
    }

    /// Host pause. Unpausing after a win (the bonus was shown) starts the next level.
    pub fn pause(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            return;
        }
        if self.target == TargetState::Won {
            self.set_level(self.next_level());
        } else if let Some(mouse) = self.deferred_move_to.take() {
            self.restart_tutorial_move_to(mouse);
        }
    }

    /// Dispatch one input event. Returns whether the event was handled.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        if self.ended {
            return false;
        }
        match event {
            InputEvent::Click {
                target,
                local,
                root,
                kind,
            } => self.on_click(target, local, root, kind),
            InputEvent::Move { root } => self.on_mouse_move(root),
            InputEvent::Scroll {
                direction,
                target,
                local,
            } => self.on_scroll(direction, target, local),
        }
    }

    /// Let `ms` milliseconds pass, firing due timers in order
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.on_timer(task);
        }
        self.scheduler.advance_to(until);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_params(&self) -> &LevelParams {
        &self.params
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn target_state(&self) -> TargetState {
        self.target
    }

    pub fn tutorial_mode(&self) -> TutorialMode {
        self.tutorial_mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn zoom_band(&self) -> ZoomBand {
        self.viewport.band()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn placer(&self) -> &Placer {
        &self.placer
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn sparkle(&self) -> &Sparkle {
        &self.sparkle
    }

    pub fn nugget(&self) -> &Nugget {
        &self.nugget
    }

    /// Nugget bounds on the board (also while hidden)
    pub fn nugget_bounds(&self) -> Option<Area> {
        self.nugget.bounds(&self.scene)
    }

    pub fn teacher_icon(&self) -> SpriteId {
        self.teacher_icon
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tutorial(&self) -> &T {
        &self.tutorial
    }

    fn next_level(&self) -> u32 {
        (self.level + 1).min(self.config.max_level())
    }

    fn place_new_nugget(&mut self) {
        let nugget = &mut self.nugget;
        self.placer.place(
            &mut self.scene,
            nugget.sprite(),
            &mut self.rng,
            |scene, _, pos, _| nugget.reset(scene, pos),
        );

        self.sparkle
            .reset(&mut self.scene, self.nugget.sparkle_anchor(), &mut self.rng);
        self.sparkle.animation_start(&mut self.scheduler);
        self.target = TargetState::Hidden;
        self.host.play_sound(Sound::NewNugget);

        self.tutorial_mode = if self.params.tutorial_startable {
            TutorialMode::Offered
        } else {
            TutorialMode::Unavailable
        };
        self.scene
            .set_visible(self.teacher_icon, self.tutorial_mode == TutorialMode::Offered);
    }

    fn start_tutorial(&mut self, root: Vec2) {
        self.scene.set_visible(self.teacher_icon, false);
        self.tutorial_mode = TutorialMode::Running;
        self.tutorial.start();

        match self.target {
            TargetState::Collected => self.tutorial.set_state(TutorialStep::ZoomOut, true, None),
            TargetState::Visible => self.tutorial.set_state(TutorialStep::Click, true, None),
            _ => {
                self.last_mouse = Some(root);
                let center = self.nugget_center();
                self.tutorial
                    .set_state(TutorialStep::MoveTo, true, Some((root, center)));
            }
        }
    }

    fn on_click(&mut self, target: Option<SpriteId>, local: Vec2, root: Vec2, kind: ClickKind) -> bool {
        if self.paused {
            return true;
        }
        if kind == ClickKind::Double {
            return false;
        }

        if target == Some(self.teacher_icon) && self.tutorial_mode == TutorialMode::Offered {
            self.start_tutorial(root);
            return true;
        }

        // The spark may sit above the nugget and receive the click, so test
        // the nugget's box instead of relying on the event target
        let p = self.scene.item_to_canvas(target, local);
        if self.target == TargetState::Visible
            && self.nugget.is_visible(&self.scene)
            && self.nugget.is_hit(&self.scene, p)
        {
            self.collect_nugget();
        }
        true
    }

    fn on_mouse_move(&mut self, root: Vec2) -> bool {
        if self.tutorial_mode != TutorialMode::Running {
            return true;
        }
        self.last_mouse = Some(root);

        if root.distance(self.nugget_center()) <= MIN_NUGGET_APPROACH {
            self.tutorial.set_state(TutorialStep::ZoomIn, false, None);
            if self.nugget.is_visible(&self.scene) {
                self.tutorial.set_state(TutorialStep::Click, false, None);
            }
        } else if self.tutorial.state() == Some(TutorialStep::MoveTo) {
            self.restart_tutorial_move_to(root);
        }
        true
    }

    fn on_scroll(&mut self, direction: ScrollDirection, target: Option<SpriteId>, local: Vec2) -> bool {
        if self.paused {
            return true;
        }
        let p = self.scene.item_to_canvas(target, local);
        if let Some(band) = self.viewport.scroll(&mut self.scene, p, direction) {
            self.on_zoom_change(band);
        }
        true
    }

    fn on_zoom_change(&mut self, band: ZoomBand) {
        let tutorial_running = self.tutorial_mode == TutorialMode::Running;
        if tutorial_running && self.tutorial.state() == Some(TutorialStep::MoveTo) {
            if let Some(mouse) = self.last_mouse {
                self.restart_tutorial_move_to(mouse);
            }
        }

        match band {
            ZoomBand::Min | ZoomBand::Mid => {
                self.nugget.hide(&mut self.scene);
                if self.target == TargetState::Visible {
                    self.target = TargetState::Hidden;
                }
                if band == ZoomBand::Min && self.target == TargetState::Collected {
                    if tutorial_running {
                        self.tutorial.stop();
                    }
                    self.place_new_nugget();
                }
            }
            ZoomBand::Max => {
                if tutorial_running {
                    self.tutorial.set_state(TutorialStep::Click, false, None);
                }
                if self.target == TargetState::Hidden {
                    self.nugget.show(&mut self.scene);
                    self.target = TargetState::Visible;
                }
            }
        }
    }

    fn collect_nugget(&mut self) {
        self.placer.remove_blocker(self.nugget.sprite());
        self.collected += 1;
        self.sparkle.animation_stop(&mut self.scene, &mut self.scheduler);
        self.nugget.hide(&mut self.scene);
        self.update_counter();

        if self.collected >= self.params.nuggets_to_collect {
            self.on_level_won();
        } else {
            self.host.play_sound(Sound::Pickaxe);
            self.target = TargetState::Collected;
            if self.tutorial_mode == TutorialMode::Running {
                self.tutorial.set_state(TutorialStep::ZoomOut, false, None);
            }
        }
    }

    fn on_level_won(&mut self) {
        if self.tutorial_mode == TutorialMode::Running {
            self.tutorial.stop();
        }
        self.tutorial_mode = TutorialMode::Unavailable;
        self.scene.set_visible(self.teacher_icon, false);
        self.target = TargetState::Won;
        log::info!("Level {} won", self.level);
        self.host.level_won();
    }

    fn update_counter(&mut self) {
        self.host
            .update_counter(self.collected, self.params.nuggets_to_collect);
    }

    /// Bounds are only current once the triggering event has been
    /// dispatched, so the restart runs as a zero-delay follow-up
    fn restart_tutorial_move_to(&mut self, mouse: Vec2) {
        self.scheduler
            .schedule_once(0, TimerTask::TutorialMoveTo { mouse });
    }

    fn on_timer(&mut self, task: TimerTask) {
        match task {
            TimerTask::SparkleTick => {
                if !self.paused {
                    self.sparkle.step(&mut self.scene, &mut self.rng);
                }
            }
            TimerTask::TutorialMoveTo { mouse } => {
                if self.paused {
                    // Replayed on unpause
                    self.deferred_move_to = Some(mouse);
                } else if self.tutorial_mode == TutorialMode::Running {
                    let center = self.nugget_center();
                    self.tutorial.restart_step(mouse, center);
                }
            }
        }
    }

    fn nugget_center(&self) -> Vec2 {
        self.nugget_bounds().map(|b| b.center()).unwrap_or(Vec2::ZERO)
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
