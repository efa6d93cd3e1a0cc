//! Cancelable delayed actions driven by the UI tick
//!
//! Components never spawn timers. They arm a [`DelayedAction`] with the
//! current instant and poll it from their tick handler. Dropping the owner
//! drops the deadline with it, so a dead component can never observe a late
//! firing.

use std::time::{Duration, Instant};
use tracing::trace;

/// A one-shot deadline that can be scheduled, superseded and cancelled.
#[derive(Debug, Clone)]
pub struct DelayedAction {
    name: &'static str,
    delay: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl DelayedAction {
    pub fn new(name: &'static str, delay: Duration) -> Self {
        Self {
            name,
            delay,
            deadline: None,
            generation: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the action. A pending deadline is replaced, never queued.
    ///
    /// Returns the generation of the new schedule.
    pub fn schedule(&mut self, now: Instant) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now + self.delay);
        trace!(
            "{} scheduled (generation {}, {:?})",
            self.name,
            self.generation,
            self.delay
        );
        self.generation
    }

    /// Disarm the action. Returns whether something was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.deadline.take().is_some();
        if was_pending {
            trace!("{} cancelled (generation {})", self.name, self.generation);
        }
        was_pending
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire the action if its deadline has passed.
    ///
    /// Returns `true` exactly once per schedule.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                trace!("{} fired (generation {})", self.name, self.generation);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut action = DelayedAction::new("close", Duration::from_millis(200));
        action.schedule(start);

        assert!(!action.fire_if_due(start + Duration::from_millis(199)));
        assert!(action.fire_if_due(start + Duration::from_millis(200)));
        assert!(!action.fire_if_due(start + Duration::from_millis(400)));
        assert!(!action.is_pending());
    }

    #[test]
    fn test_reschedule_supersedes_pending_deadline() {
        let start = Instant::now();
        let mut action = DelayedAction::new("close", Duration::from_millis(200));
        let first = action.schedule(start);
        let second = action.schedule(start + Duration::from_millis(150));

        assert!(second > first);
        // The original deadline no longer fires.
        assert!(!action.fire_if_due(start + Duration::from_millis(250)));
        assert!(action.fire_if_due(start + Duration::from_millis(350)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut action = DelayedAction::new("blur", Duration::from_millis(150));
        assert!(!action.cancel());

        action.schedule(start);
        assert_eq!(
            action.remaining(start + Duration::from_millis(100)),
            Some(Duration::from_millis(50))
        );
        assert!(action.cancel());
        assert!(!action.fire_if_due(start + Duration::from_secs(1)));
        assert_eq!(action.remaining(start), None);
    }
}
