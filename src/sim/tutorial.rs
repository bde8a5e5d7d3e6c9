//! Tutorial collaborator
//!
//! The scripted tutorial (its animations and artwork) belongs to the host.
//! The game only advertises which step should be shown and asks for restarts.

use glam::Vec2;

use super::area::Area;

/// Steps of the tutorial, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TutorialStep {
    /// Move the pointer to the sparkle
    MoveTo,
    /// Scroll to zoom in
    ZoomIn,
    /// Click the nugget
    Click,
    /// Scroll to zoom out again
    ZoomOut,
}

impl TutorialStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            TutorialStep::MoveTo => "move to",
            TutorialStep::ZoomIn => "zoom in",
            TutorialStep::Click => "click",
            TutorialStep::ZoomOut => "zoom out",
        }
    }
}

pub trait Tutorial {
    fn start(&mut self);
    fn stop(&mut self);
    /// Activity teardown
    fn end(&mut self);
    /// Request a step. With `restart` the step is entered unconditionally;
    /// without it the tutorial only moves forward.
    /// `MoveTo` takes `(pointer, nugget)` in canvas space.
    fn set_state(&mut self, step: TutorialStep, restart: bool, points: Option<(Vec2, Vec2)>);
    /// Current step, `None` while not running
    fn state(&self) -> Option<TutorialStep>;
    /// Board area covered by the tutorial artwork (canvas space)
    fn blocking_area(&self) -> Area;
    /// Restart the current step's animation from the pointer to the nugget
    fn restart_step(&mut self, mouse: Vec2, target: Vec2);
}

/// Minimal tutorial that only tracks its state and logs transitions
#[derive(Debug, Clone)]
pub struct TutorialTracker {
    running: bool,
    step: TutorialStep,
    blocking_area: Area,
    /// Last animation endpoints (pointer, nugget)
    points: Option<(Vec2, Vec2)>,
    restarts: u32,
}

impl Default for TutorialTracker {
    fn default() -> Self {
        // Mouse/touchpad artwork in the upper right corner
        Self::new(Area::new(620.0, 60.0, 760.0, 200.0))
    }
}

impl TutorialTracker {
    pub fn new(blocking_area: Area) -> Self {
        Self {
            running: false,
            step: TutorialStep::MoveTo,
            blocking_area,
            points: None,
            restarts: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn points(&self) -> Option<(Vec2, Vec2)> {
        self.points
    }

    /// Number of animation restarts requested
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}

impl Tutorial for TutorialTracker {
    fn start(&mut self) {
        self.running = true;
        self.step = TutorialStep::MoveTo;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn end(&mut self) {
        self.running = false;
        self.points = None;
    }

    fn set_state(&mut self, step: TutorialStep, restart: bool, points: Option<(Vec2, Vec2)>) {
        if !self.running || (!restart && step <= self.step) {
            return;
        }
        log::debug!("Tutorial: {} -> {}", self.step.as_str(), step.as_str());
        self.step = step;
        if points.is_some() {
            self.points = points;
        }
    }

    fn state(&self) -> Option<TutorialStep> {
        self.running.then_some(self.step)
    }

    fn blocking_area(&self) -> Area {
        self.blocking_area
    }

    fn restart_step(&mut self, mouse: Vec2, target: Vec2) {
        if self.running {
            self.points = Some((mouse, target));
            self.restarts += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_only_move_forward_without_restart() {
        let mut t = TutorialTracker::default();
        assert_eq!(t.state(), None);
        t.start();
        assert_eq!(t.state(), Some(TutorialStep::MoveTo));

        t.set_state(TutorialStep::Click, false, None);
        assert_eq!(t.state(), Some(TutorialStep::Click));
        t.set_state(TutorialStep::ZoomIn, false, None);
        assert_eq!(t.state(), Some(TutorialStep::Click));
        t.set_state(TutorialStep::ZoomIn, true, None);
        assert_eq!(t.state(), Some(TutorialStep::ZoomIn));
    }

    #[test]
    fn test_ignored_while_stopped() {
        let mut t = TutorialTracker::default();
        t.set_state(TutorialStep::ZoomOut, true, None);
        t.restart_step(Vec2::ZERO, Vec2::ONE);
        assert_eq!(t.state(), None);
        assert_eq!(t.restarts(), 0);
    }

    #[test]
    fn test_restart_records_points() {
        let mut t = TutorialTracker::default();
        t.start();
        t.restart_step(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(t.points(), Some((Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0))));
        assert_eq!(t.restarts(), 1);
    }
}
