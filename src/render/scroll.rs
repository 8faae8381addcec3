use std::time::Duration;

use tokio::time::Instant;

/// Smoothstep ease-in-out over `t` in `[0, 1]`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    pub from: f32,
    pub to: f32,
    pub started_at: Instant,
    pub duration: Duration,
}

impl ScrollAnimation {
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn offset_at(&self, now: Instant) -> f32 {
        let k = ease_in_out(self.progress(now));
        self.from + (self.to - self.from) * k
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Horizontal content offset of the strip, possibly mid-animation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    settled: f32,
    animation: Option<ScrollAnimation>,
}

impl ScrollState {
    pub fn offset_at(&self, now: Instant) -> f32 {
        match &self.animation {
            Some(anim) => anim.offset_at(now),
            None => self.settled,
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation.is_some_and(|a| !a.is_finished(now))
    }

    /// Start an animated scroll to `target`, interrupting any running one
    /// from wherever it currently is.
    pub fn animate_to(&mut self, target: f32, now: Instant, duration: Duration) {
        let from = self.offset_at(now);
        self.settled = target;
        self.animation = if duration.is_zero() || (from - target).abs() < f32::EPSILON {
            None
        } else {
            Some(ScrollAnimation {
                from,
                to: target,
                started_at: now,
                duration,
            })
        };
    }

    /// Move without animating, e.g. after the viewport was resized.
    pub fn jump_to(&mut self, target: f32) {
        self.settled = target;
        self.animation = None;
    }

    /// Drop a finished animation.
    pub fn settle(&mut self, now: Instant) {
        if self.animation.is_some_and(|a| a.is_finished(now)) {
            self.animation = None;
        }
    }

    pub fn target(&self) -> f32 {
        self.settled
    }
}
