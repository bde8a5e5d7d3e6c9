//! Sparkle animation drawing the eye to the nugget
//!
//! A timer drives a two-phase cycle: during a spark phase the spark shrinks
//! and spins; once it is small enough it is hidden for a randomized pause,
//! then a new spark phase starts spinning the other way.

use glam::Vec2;
use rand::Rng;

use super::scene::{Scene, SpriteId};
use super::timer::{Scheduler, TimerId, TimerTask};
use crate::consts::*;
use crate::pivot_transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparklePhase {
    /// Spark visible, shrinking each tick
    Active,
    /// Spark hidden for the remaining ticks
    Pause { ticks_remaining: u32 },
}

#[derive(Debug, Clone)]
pub struct Sparkle {
    sprite: SpriteId,
    /// Spark image pivot in its own space
    pivot: Vec2,
    /// Anchor in viewport space
    anchor: Vec2,
    /// Degrees
    angle: f32,
    rot_delta: f32,
    scale: f32,
    phase: SparklePhase,
    timer: Option<TimerId>,
}

impl Sparkle {
    pub fn new(sprite: SpriteId, pivot: Vec2) -> Self {
        Self {
            sprite,
            pivot,
            anchor: Vec2::ZERO,
            angle: 0.0,
            rot_delta: 0.0,
            scale: 0.0,
            phase: SparklePhase::Pause { ticks_remaining: 0 },
            timer: None,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        self.sprite
    }

    pub fn phase(&self) -> SparklePhase {
        self.phase
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Move to a new anchor and start over with a fresh spark phase
    pub fn reset<R: Rng + ?Sized>(&mut self, scene: &mut Scene, anchor: Vec2, rng: &mut R) {
        self.anchor = anchor;
        // Flipped to -delta by the phase start
        self.rot_delta = SPARKLE_ROT_DELTA;
        self.start_phase(scene, rng);
    }

    pub fn animation_start(&mut self, scheduler: &mut Scheduler) {
        debug_assert!(self.timer.is_none(), "sparkle animation already running");
        if self.timer.is_some() {
            log::warn!("Sparkle animation already running");
            return;
        }
        self.timer = Some(scheduler.schedule_repeating(SPARKLE_TICK_MS, TimerTask::SparkleTick));
    }

    pub fn animation_stop(&mut self, scene: &mut Scene, scheduler: &mut Scheduler) {
        debug_assert!(self.timer.is_some(), "sparkle animation not running");
        let Some(timer) = self.timer.take() else {
            log::warn!("Sparkle animation not running");
            return;
        };
        scheduler.cancel(timer);
        scene.set_visible(self.sprite, false);
    }

    /// Teardown: stop if running, no-op otherwise
    pub fn end(&mut self, scene: &mut Scene, scheduler: &mut Scheduler) {
        if self.is_running() {
            self.animation_stop(scene, scheduler);
        }
    }

    /// One timer tick
    pub fn step<R: Rng + ?Sized>(&mut self, scene: &mut Scene, rng: &mut R) {
        match self.phase {
            SparklePhase::Pause { ticks_remaining } => {
                let left = ticks_remaining.saturating_sub(1);
                if left == 0 {
                    self.start_phase(scene, rng);
                } else {
                    self.phase = SparklePhase::Pause {
                        ticks_remaining: left,
                    };
                }
            }
            SparklePhase::Active if self.scale < SPARKLE_SCALE_MIN => {
                let ticks = SPARKLE_PAUSE_TICKS
                    + rng.random_range(-SPARKLE_PAUSE_VARIATION..SPARKLE_PAUSE_VARIATION);
                self.phase = SparklePhase::Pause {
                    ticks_remaining: ticks.max(1) as u32,
                };
                scene.set_visible(self.sprite, false);
            }
            SparklePhase::Active => {
                self.scale *= SPARKLE_SCALE_FACTOR;
                self.angle += self.rot_delta;
                self.update_transform(scene);
            }
        }
    }

    fn start_phase<R: Rng + ?Sized>(&mut self, scene: &mut Scene, rng: &mut R) {
        self.angle += rng.random_range(0..359) as f32;
        self.rot_delta = -self.rot_delta;
        self.scale = SPARKLE_SCALE_MAX;
        self.phase = SparklePhase::Active;
        self.update_transform(scene);
        scene.set_visible(self.sprite, true);
    }

    fn update_transform(&self, scene: &mut Scene) {
        scene.set_transform(
            self.sprite,
            pivot_transform(self.pivot, self.scale, self.angle, self.anchor),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::area::Area;
    use crate::sim::scene::{Layer, Sprite, SpriteKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Scene, Sparkle, Pcg32) {
        let mut scene = Scene::new();
        let pivot = Vec2::new(600.0, 600.0);
        let id = scene.spawn(
            Sprite::new(SpriteKind::Spark, Layer::Viewport, Area::from_center(pivot, Vec2::splat(90.0)))
                .hidden(),
        );
        (scene, Sparkle::new(id, pivot), Pcg32::seed_from_u64(42))
    }

    /// Ticks until the spark phase ends (ceil(log 0.4 / log 0.9) = 9)
    const SHRINK_TICKS: usize = 9;

    #[test]
    fn test_reset_starts_visible_phase() {
        let (mut scene, mut sparkle, mut rng) = setup();
        sparkle.reset(&mut scene, Vec2::new(300.0, 200.0), &mut rng);
        assert_eq!(sparkle.phase(), SparklePhase::Active);
        assert_eq!(sparkle.scale(), 1.0);
        assert!(scene.is_visible(sparkle.sprite()));
        // Spark is centered on the anchor
        let center = scene.bounds(sparkle.sprite()).unwrap().center();
        assert!((center - Vec2::new(300.0, 200.0)).length() < 1e-2);
    }

    #[test]
    fn test_spark_phase_then_pause() {
        let (mut scene, mut sparkle, mut rng) = setup();
        sparkle.reset(&mut scene, Vec2::ZERO, &mut rng);

        for _ in 0..SHRINK_TICKS {
            assert_eq!(sparkle.phase(), SparklePhase::Active);
            sparkle.step(&mut scene, &mut rng);
        }
        assert!(sparkle.scale() < SPARKLE_SCALE_MIN);
        assert_eq!(sparkle.phase(), SparklePhase::Active);

        sparkle.step(&mut scene, &mut rng);
        let SparklePhase::Pause { ticks_remaining } = sparkle.phase() else {
            panic!("expected pause");
        };
        assert!((15..=35).contains(&ticks_remaining));
        assert!(!scene.is_visible(sparkle.sprite()));
    }

    #[test]
    fn test_pause_length_and_direction_flip() {
        let (mut scene, mut sparkle, mut rng) = setup();
        sparkle.reset(&mut scene, Vec2::ZERO, &mut rng);

        for cycle in 0..20 {
            let angle_start = sparkle.angle();
            sparkle.step(&mut scene, &mut rng);
            let delta = sparkle.angle() - angle_start;
            // First phase spins negative, then alternates
            let expected = if cycle % 2 == 0 { -SPARKLE_ROT_DELTA } else { SPARKLE_ROT_DELTA };
            assert!((delta - expected).abs() < 1e-2);

            for _ in 0..SHRINK_TICKS {
                sparkle.step(&mut scene, &mut rng);
            }
            let mut pause = 0;
            while sparkle.phase() != SparklePhase::Active {
                sparkle.step(&mut scene, &mut rng);
                pause += 1;
            }
            assert!((15..=35).contains(&pause), "pause lasted {pause} ticks");
            assert!(scene.is_visible(sparkle.sprite()));
            assert_eq!(sparkle.scale(), 1.0);
        }
    }

    #[test]
    fn test_start_stop_manage_timer() {
        let (mut scene, mut sparkle, mut rng) = setup();
        let mut sched = Scheduler::new();
        sparkle.reset(&mut scene, Vec2::ZERO, &mut rng);

        sparkle.animation_start(&mut sched);
        assert!(sparkle.is_running());
        assert_eq!(sched.pending(), 1);

        sparkle.animation_stop(&mut scene, &mut sched);
        assert!(!sparkle.is_running());
        assert_eq!(sched.pending(), 0);
        assert!(!scene.is_visible(sparkle.sprite()));

        // end() on a stopped animator is fine
        sparkle.end(&mut scene, &mut sched);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not running")]
    fn test_stop_while_stopped_panics_in_debug() {
        let (mut scene, mut sparkle, _) = setup();
        let mut sched = Scheduler::new();
        sparkle.animation_stop(&mut scene, &mut sched);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already running")]
    fn test_start_while_running_panics_in_debug() {
        let (mut scene, mut sparkle, mut rng) = setup();
        let mut sched = Scheduler::new();
        sparkle.reset(&mut scene, Vec2::ZERO, &mut rng);
        sparkle.animation_start(&mut sched);
        sparkle.animation_start(&mut sched);
    }
}
