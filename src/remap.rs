//! Linear remapping helpers and the domain/range windows built from them.
//!
//! The curve math works in whatever units the caller supplies (canvas
//! pixels, seconds, …).  These helpers translate between those units and the
//! unitless `[0, 1]` space animation callers expect.

use serde::{Deserialize, Serialize};

/// Errors produced when a remap cannot be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemapError {
    /// `inverse_lerp` over an interval whose bounds are equal.
    #[error("degenerate interval [{start}, {end}]: bounds must differ")]
    DegenerateInterval { start: f64, end: f64 },

    /// A sample table was requested with zero steps.
    #[error("sample count must be at least 1")]
    InvalidSampleCount,

    /// A sample table was requested with more steps than allowed.
    #[error("sample count {count} exceeds the maximum of {max}")]
    TooManySamples { count: usize, max: usize },
}

/// Linear interpolation: `(1 - t)·a + t·b`.
///
/// Not clamped; `t` outside `[0, 1]` extrapolates.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + b * t
}

/// Inverse of [`lerp`]: the `t` for which `lerp(a, b, t) == v`.
///
/// Fails with [`RemapError::DegenerateInterval`] when `a == b`.
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> Result<f64, RemapError> {
    if a == b {
        return Err(RemapError::DegenerateInterval { start: a, end: b });
    }
    Ok((v - a) / (b - a))
}

/// Map `v` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn remap(
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
    v: f64,
) -> Result<f64, RemapError> {
    let t = inverse_lerp(in_min, in_max, v)?;
    Ok(lerp(out_min, out_max, t))
}

/// A closed interval `[start, end]` in caller units.
///
/// `start` may be greater than `end`.  A reversed interval maps `0.0` to the
/// larger bound, which is how screen-space callers (y growing downward)
/// express "up is positive".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The unit interval `[0, 1]`.
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Point at fraction `t` along the interval.
    pub fn lerp(&self, t: f64) -> f64 {
        lerp(self.start, self.end, t)
    }

    /// Fraction of the way `v` lies along the interval.
    pub fn inverse_lerp(&self, v: f64) -> Result<f64, RemapError> {
        inverse_lerp(self.start, self.end, v)
    }

    /// The same interval traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Signed length `end - start`.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    pub fn max(&self) -> f64 {
        self.start.max(self.end)
    }

    /// Clamp `v` into the interval regardless of its direction.
    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min()).min(self.max())
    }

    /// Whether the bounds coincide (every `inverse_lerp` would fail).
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Domain and range intervals used by the normalized sampler.
///
/// Normalized time is lerped into `domain`; the curve's output is mapped back
/// to `[0, 1]` through `range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub domain: Interval,
    pub range: Interval,
}

impl Window {
    pub fn new(domain: Interval, range: Interval) -> Self {
        Self { domain, range }
    }

    /// A window whose domain and range are the same interval.
    pub fn square(interval: Interval) -> Self {
        Self::new(interval, interval)
    }
}
