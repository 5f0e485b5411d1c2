//! Transform animation with supersede semantics.
//!
//! At most one [`Animation`] is in flight. Starting a new one replaces the old
//! one and begins from the value the old one had reached at that instant, so
//! there is never a jump back to a stale start or forward to a stale target.
//! Sampling at or past the end always yields the target bit-for-bit.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use crate::transform::Transform;

/// Cubic ease-in-out on `[0, 1]`. Monotonic, with `f(0) = 0` and `f(1) = 1`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// One interpolation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub from: Transform,
    pub to: Transform,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Animation {
    /// Linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Interpolated transform at `now`; exactly `to` once finished.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> Transform {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, ease_cubic_in_out(t))
    }
}

/// Result of advancing the scheduler by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub transform: Transform,
    pub finished: bool,
}

/// Owns the (at most one) in-flight animation.
#[derive(Debug, Clone, Default)]
pub struct AnimationScheduler {
    active: Option<Animation>,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The in-flight animation, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Animation> {
        self.active.as_ref()
    }

    /// Interpolated value of the in-flight animation at `now`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> Option<Transform> {
        self.active.as_ref().map(|a| a.sample(now_ms))
    }

    /// Start animating towards `target`, superseding anything in flight.
    ///
    /// `current` is the committed transform; it is only used as the start
    /// value when nothing is in flight. Returns the start value actually used.
    pub fn animate_to(&mut self, current: Transform, target: Transform, duration_ms: f64, now_ms: f64) -> Transform {
        let from = self.sample(now_ms).unwrap_or(current);
        self.active = Some(Animation { from, to: target, start_ms: now_ms, duration_ms: duration_ms.max(0.0) });
        from
    }

    /// Advance to `now`. Clears the animation once its final value is produced.
    pub fn tick(&mut self, now_ms: f64) -> Option<FrameSample> {
        let animation = self.active?;
        let transform = animation.sample(now_ms);
        let finished = animation.is_finished(now_ms);
        if finished {
            self.active = None;
        }
        Some(FrameSample { transform, finished })
    }

    /// Stop the in-flight animation, returning the value it had reached.
    pub fn cancel(&mut self, now_ms: f64) -> Option<Transform> {
        self.active.take().map(|a| a.sample(now_ms))
    }
}
