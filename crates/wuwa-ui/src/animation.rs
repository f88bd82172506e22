//! Animation primitives: easing functions and tweens.
//!
//! Tweens are evaluated against absolute timestamps rather than advanced by
//! per-frame deltas, so a timer that skips or coalesces ticks never drifts.

/// Signature shared by every easing curve.
pub type Easing = fn(f32) -> f32;

/// Standard easing functions.
///
/// Input `t` is clamped to `[0.0, 1.0]`. Output is the eased value.
pub mod easing {
    /// Linear easing (no acceleration).
    pub fn linear(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    /// Quadratic ease-in (slow start).
    pub fn ease_in_quad(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        t * t
    }

    /// Quadratic ease-out (slow end).
    pub fn ease_out_quad(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        t * (2.0 - t)
    }

    /// Quadratic ease-in-out (slow start and end).
    pub fn ease_in_out_quad(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            2.0 * t * t
        } else {
            -1.0 + (4.0 - 2.0 * t) * t
        }
    }
}

/// Value between `start` and `target` after `fraction` of the way through.
///
/// The result never leaves the closed interval spanned by the two ends, even
/// under float rounding.
pub fn interpolate(start: f32, target: f32, fraction: f32, easing: Easing) -> f32 {
    let eased = easing(fraction);
    let value = start + (target - start) * eased;
    let (lo, hi) = if start <= target {
        (start, target)
    } else {
        (target, start)
    };
    value.clamp(lo, hi)
}

/// A single property animation anchored at an absolute start time.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    /// Starting value.
    pub start: f32,
    /// Target value.
    pub end: f32,
    /// Timestamp (ms) the tween started at.
    pub started_ms: u64,
    /// Total duration in milliseconds.
    pub duration_ms: u32,
    /// Easing function to apply.
    pub easing: Easing,
}

impl Tween {
    /// Create a new tween starting at `started_ms`.
    pub fn new(start: f32, end: f32, started_ms: u64, duration_ms: u32, easing: Easing) -> Self {
        Self {
            start,
            end,
            started_ms,
            duration_ms,
            easing,
        }
    }

    /// Milliseconds elapsed at `now_ms`, capped at the duration.
    pub fn elapsed_ms(&self, now_ms: u64) -> u32 {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        elapsed.min(u64::from(self.duration_ms)) as u32
    }

    /// Progress in `[0.0, 1.0]` at `now_ms`.
    pub fn fraction_at(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.elapsed_ms(now_ms) as f32 / self.duration_ms as f32
    }

    /// Interpolated value at `now_ms`.
    pub fn value_at(&self, now_ms: u64) -> f32 {
        if self.is_finished_at(now_ms) {
            return self.end;
        }
        interpolate(self.start, self.end, self.fraction_at(now_ms), self.easing)
    }

    /// True once `now_ms` has reached the end of the tween.
    pub fn is_finished_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= u64::from(self.duration_ms)
    }
}
