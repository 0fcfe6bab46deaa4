use serde::{Deserialize, Serialize};

/// Scalar attribute interpolated toward a target over time.
///
/// Retargeting starts from wherever the value currently is, so a redraw that
/// lands mid-flight supersedes the running transition instead of queueing
/// behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatedValue {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl AnimatedValue {
    #[must_use]
    pub const fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn sample(self, now_ms: f64) -> f64 {
        let end_ms = self.start_ms + self.duration_ms;
        if self.duration_ms <= 0.0 || now_ms >= end_ms {
            return self.to;
        }
        if now_ms <= self.start_ms {
            return self.from;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    #[must_use]
    pub fn is_settled(self, now_ms: f64) -> bool {
        self.duration_ms <= 0.0 || now_ms >= self.start_ms + self.duration_ms
    }

    pub fn retarget(&mut self, to: f64, now_ms: f64, duration_ms: f64) {
        let current = self.sample(now_ms);
        self.from = if current.is_finite() { current } else { to };
        self.to = to;
        self.start_ms = now_ms;
        self.duration_ms = duration_ms;
    }

    pub fn snap(&mut self, to: f64) {
        *self = Self::settled(to);
    }
}

#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}
