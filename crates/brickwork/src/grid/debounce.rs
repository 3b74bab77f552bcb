//! Trailing debounce over a single pending timer.

use std::time::Duration;

use log::trace;

use brickwork_core::timer::{Scheduler, TimerId};

/// Coalesces bursts of events into one action fired after the burst quiets.
///
/// At most one timer is pending at a time. Events arriving while it is
/// pending only move the quiet-period start; when the timer fires too early
/// it is re-armed for the remainder, so the action runs `delay` after the
/// last event of the burst.
#[derive(Debug)]
pub(crate) struct Debounce {
    delay: Duration,
    pending: Option<TimerId>,
    last_event: Duration,
}

impl Debounce {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_event: Duration::ZERO,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records an event, scheduling a timer if none is pending.
    pub(crate) fn trigger<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.last_event = scheduler.now();
        if self.pending.is_none() {
            let id = scheduler.schedule_once(self.delay);
            trace!(timer = id.raw(); "Debounce armed");
            self.pending = Some(id);
        }
    }

    /// Handles a timer firing. Returns true when the debounced action is due.
    ///
    /// Timers other than the pending one are ignored.
    pub(crate) fn fire<S: Scheduler>(&mut self, id: TimerId, scheduler: &mut S) -> bool {
        if self.pending != Some(id) {
            return false;
        }

        let quiet = scheduler.now().saturating_sub(self.last_event);
        if quiet < self.delay {
            let id = scheduler.schedule_once(self.delay - quiet);
            trace!(timer = id.raw(); "Debounce re-armed");
            self.pending = Some(id);
            return false;
        }

        self.pending = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use brickwork_core::timer::ManualClock;

    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    /// Fires due timers up to `until`, returning the times the action ran.
    fn run(debounce: &mut Debounce, clock: &mut ManualClock, until: Duration) -> Vec<Duration> {
        let mut fired = Vec::new();
        while let Some(id) = clock.pop_due(until) {
            if debounce.fire(id, clock) {
                fired.push(clock.now());
            }
        }
        clock.settle(until);
        fired
    }

    #[test]
    fn test_single_event_fires_after_delay() {
        let mut clock = ManualClock::new();
        let mut debounce = Debounce::new(ms(200));

        debounce.trigger(&mut clock);
        assert!(debounce.is_pending());

        assert!(run(&mut debounce, &mut clock, ms(199)).is_empty());
        assert_eq!(run(&mut debounce, &mut clock, ms(1000)), vec![ms(200)]);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_burst_fires_once_after_last_event() {
        let mut clock = ManualClock::new();
        let mut debounce = Debounce::new(ms(200));

        for step in 0..10 {
            clock.settle(ms(step * 20));
            debounce.trigger(&mut clock);
        }
        assert_eq!(clock.pending(), 1);

        assert_eq!(run(&mut debounce, &mut clock, ms(2000)), vec![ms(380)]);
    }

    #[test]
    fn test_next_burst_schedules_fresh_timer() {
        let mut clock = ManualClock::new();
        let mut debounce = Debounce::new(ms(200));

        debounce.trigger(&mut clock);
        assert_eq!(run(&mut debounce, &mut clock, ms(500)), vec![ms(200)]);

        debounce.trigger(&mut clock);
        assert_eq!(run(&mut debounce, &mut clock, ms(1000)), vec![ms(700)]);
    }

    #[test]
    fn test_foreign_timer_is_ignored() {
        let mut clock = ManualClock::new();
        let mut debounce = Debounce::new(ms(200));
        let other = clock.schedule_once(ms(10));

        debounce.trigger(&mut clock);
        assert_eq!(clock.pop_due(ms(50)), Some(other));
        assert!(!debounce.fire(other, &mut clock));
        assert!(debounce.is_pending());
    }
}
