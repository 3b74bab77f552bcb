//! Timer primitives consumed by the grid controller.
//!
//! The controller never sleeps or spawns threads. It asks a [`Scheduler`] for
//! timers and expects the host's event loop to hand every firing back through
//! `Grid::on_timer`. [`ManualClock`] is a simulated scheduler that makes the
//! whole readiness/debounce state machine testable without real time passing.

use std::{fmt, time::Duration};

use log::trace;

/// Identifies a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedule-repeating, schedule-once and cancel, plus a monotonic clock.
pub trait Scheduler {
    /// Time elapsed since the scheduler started.
    fn now(&self) -> Duration;

    /// Schedules a timer that fires every `interval` until cancelled.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Schedules a timer that fires once after `delay`.
    fn schedule_once(&mut self, delay: Duration) -> TimerId;

    /// Cancels a timer. Cancelling an unknown or already fired timer is a no-op.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    due: Duration,
    interval: Option<Duration>,
}

/// A simulated clock.
///
/// Time only moves when the owner asks it to. Due timers are handed out one
/// at a time by [`ManualClock::pop_due`] so that a firing which cancels or
/// schedules other timers is observed before the next firing is chosen.
///
/// # Examples
///
/// ```
/// # use std::time::Duration;
/// # use brickwork_core::timer::{ManualClock, Scheduler};
/// let mut clock = ManualClock::new();
/// let poll = clock.schedule_repeating(Duration::from_millis(100));
///
/// let until = Duration::from_millis(250);
/// assert_eq!(clock.pop_due(until), Some(poll));
/// assert_eq!(clock.now(), Duration::from_millis(100));
/// assert_eq!(clock.pop_due(until), Some(poll));
/// assert_eq!(clock.pop_due(until), None);
///
/// clock.settle(until);
/// assert_eq!(clock.now(), until);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

impl ManualClock {
    /// Smallest interval a repeating timer may use; zero would never let time advance.
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers currently scheduled.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if the given timer is still scheduled.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    /// Advances to the earliest timer due at or before `until` and fires it.
    ///
    /// Ties are broken by scheduling order. Repeating timers are re-armed,
    /// one-shot timers are removed. Returns `None`, leaving the clock
    /// untouched, when nothing is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(position, _)| position)?;

        let PendingTimer { id, due, interval } = self.timers[position].clone();
        self.now = self.now.max(due);

        match interval {
            Some(interval) => self.timers[position].due = due + interval,
            None => {
                self.timers.remove(position);
            }
        }

        trace!(timer = id.raw(), now_ms = self.now.as_millis(); "Timer fired");
        Some(id)
    }

    /// Moves the clock forward to `until` without firing anything.
    ///
    /// The clock never moves backwards.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, due: Duration, interval: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(PendingTimer { id, due, interval });
        id
    }
}

impl Scheduler for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let interval = interval.max(Self::MIN_INTERVAL);
        self.insert(self.now + interval, Some(interval))
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        self.insert(self.now + delay, None)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }
}
