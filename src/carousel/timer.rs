use std::time::Duration;

use tokio::time::Instant;

/// Identity of one started timer. A new id is minted on every start, so a
/// handle kept across a reset no longer matches the live timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    id: TimerId,
    deadline: Instant,
}

/// Repeating auto-advance deadline. Holds zero or one live timer.
#[derive(Debug, Clone)]
pub struct AutoAdvanceTimer {
    interval: Duration,
    active: Option<ActiveTimer>,
    next_id: u64,
}

impl AutoAdvanceTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            active: None,
            next_id: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the timer for `now + interval`, replacing any live timer.
    pub fn start(&mut self, now: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.active = Some(ActiveTimer {
            id,
            deadline: now + self.interval,
        });
        id
    }

    /// Invalidate the live timer and start a fresh one from `now`.
    pub fn reset(&mut self, now: Instant) -> TimerId {
        self.stop();
        self.start(now)
    }

    pub fn stop(&mut self) {
        self.active = None;
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.active.is_some_and(|t| t.id == id)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.active.map(|t| t.deadline)
    }

    /// Consume a due tick and re-arm for the next one.
    ///
    /// Ticks missed while the host was busy collapse into a single tick; the
    /// next deadline is always in the future relative to `now`.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if now < active.deadline {
            return false;
        }
        let mut next = active.deadline + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        active.deadline = next;
        true
    }
}
