//! Deterministic timer queue
//!
//! Stands in for the host event loop's timeouts. Time only moves when the
//! caller drains due timers, so a zero-delay task always runs after the
//! event that scheduled it has been fully dispatched.

use glam::Vec2;

/// Work a timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerTask {
    /// Advance the sparkle animation by one step
    SparkleTick,
    /// Re-sample the nugget position and restart the tutorial's "move to" step
    TutorialMoveTo { mouse: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u64>,
    task: TimerTask,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Fire `task` once after `delay_ms` (0 = right after the current dispatch)
    pub fn schedule_once(&mut self, delay_ms: u64, task: TimerTask) -> TimerId {
        self.push(delay_ms, None, task)
    }

    /// Fire `task` every `period_ms` until cancelled
    pub fn schedule_repeating(&mut self, period_ms: u64, task: TimerTask) -> TimerId {
        self.push(period_ms, Some(period_ms.max(1)), task)
    }

    /// Cancel a timer. Returns false if it had already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Repeating timers are re-armed for their next period.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, TimerTask)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[index];
        self.now_ms = self.now_ms.max(timer.due_ms);
        let fired = (timer.id, timer.task);
        match timer.period_ms {
            Some(period) => timer.due_ms += period,
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(fired)
    }

    /// Move the clock forward after all due timers have been drained
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn push(&mut self, delay_ms: u64, period_ms: Option<u64>, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms,
            period_ms,
            task,
        });
        id
    }
}
