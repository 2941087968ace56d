//! Cubic Bézier evaluation and inverse sampling.
//!
//! A 2-D cubic Bézier is evaluated one axis at a time: each axis has its own
//! [`ControlPoints`] and shares the parameter `t`.  Remapping "time" through
//! such a curve means solving the x-axis for `t` and then evaluating the
//! y-axis at that `t`, which is what [`sample_at`] and [`sample_normalized`]
//! do.
//!
//! Everything here is a pure function over `Copy` values.

use crate::remap::{RemapError, Window};
use log::trace;
use serde::{Deserialize, Serialize};

/// Slopes smaller than this stop the Newton iteration early.
pub const MIN_SLOPE: f64 = 1e-6;

/// Largest `max_iterations` a [`SolverConfig`] may ask for.
pub const MAX_ITERATIONS: u32 = 1000;

/// The four control point coordinates of one axis of a cubic Bézier.
///
/// `p0` and `p3` are the anchored endpoints; `p1` and `p2` are the tangent
/// handles and may lie anywhere (including outside `[p0, p3]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoints {
    pub p0: f64,
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
}

impl ControlPoints {
    pub fn new(p0: f64, p1: f64, p2: f64, p3: f64) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Shorthand for [`evaluate`].
    pub fn at(&self, t: f64) -> f64 {
        evaluate(self, t)
    }

    /// Shorthand for [`derivative`].
    pub fn slope_at(&self, t: f64) -> f64 {
        derivative(self, t)
    }

    /// Whether the curve is non-decreasing over `[0, 1]` given this
    /// control polygon (`p0 <= p1, p2 <= p3`).  A sufficient condition only.
    pub fn is_loosely_monotonic(&self) -> bool {
        self.p0 <= self.p1 && self.p0 <= self.p2 && self.p1 <= self.p3 && self.p2 <= self.p3
    }
}

/// Stopping criteria for the inverse solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Absolute tolerance on `|B(t) - target|`.  Default: `1e-4`.
    pub tolerance: f64,
    /// Upper bound on Newton iterations.  Default: `10`.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 10,
        }
    }
}

impl SolverConfig {
    /// Reject settings that make every solve run to the bound without
    /// converging, or make the bound too large for a redraw path.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(SolverConfigError::Tolerance(self.tolerance));
        }
        if self.max_iterations > MAX_ITERATIONS {
            return Err(SolverConfigError::TooManyIterations(self.max_iterations));
        }
        Ok(())
    }
}

/// A [`SolverConfig`] that [`SolverConfig::validate`] refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverConfigError {
    #[error("tolerance must be positive, got {0}")]
    Tolerance(f64),
    #[error("max_iterations must be at most {max}, got {0}", max = MAX_ITERATIONS)]
    TooManyIterations(u32),
}

/// Result of [`solve`] / [`solve_from`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Best estimate of the parameter, always in `[0, 1]`.
    pub t: f64,
    /// Newton iterations attempted.
    pub iterations: u32,
    /// Whether `|B(t) - target| < tolerance` holds for the returned `t`.
    pub converged: bool,
}

fn clamp01(t: f64) -> f64 {
    t.max(0.0).min(1.0)
}

/// Evaluate the cubic Bernstein polynomial at `t`.
///
/// `B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3`
pub fn evaluate(p: &ControlPoints, t: f64) -> f64 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    uu * u * p.p0 + 3.0 * uu * t * p.p1 + 3.0 * u * tt * p.p2 + tt * t * p.p3
}

/// First derivative of [`evaluate`] with respect to `t`.
///
/// `B'(t) = 3(1-t)²(P1-P0) + 6(1-t)t(P2-P1) + 3t²(P3-P2)`
pub fn derivative(p: &ControlPoints, t: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * (p.p1 - p.p0) + 6.0 * u * t * (p.p2 - p.p1) + 3.0 * t * t * (p.p3 - p.p2)
}

/// Linear first guess for `target`: its fraction along `[p0, p3]`, or `0.5`
/// when the endpoints coincide.
fn initial_guess(target: f64, p: &ControlPoints) -> f64 {
    if p.p3 != p.p0 {
        (target - p.p0) / (p.p3 - p.p0)
    } else {
        0.5
    }
}

/// Find the `t` in `[0, 1]` whose curve value is `target`.
///
/// Newton-Raphson starting from the linear estimate, clamped to `[0, 1]`
/// after every step.  Never fails: when the tolerance is not reached within
/// `max_iterations`, or the slope flattens below [`MIN_SLOPE`], the current
/// estimate is returned as is.  Use [`solve`] to find out whether it
/// converged.
///
/// For non-monotonic curves any root may be returned; which one depends on
/// the starting point.  See [`solve_from`].
pub fn solve_t_for_value(target: f64, p: &ControlPoints, config: &SolverConfig) -> f64 {
    solve(target, p, config).t
}

/// Like [`solve_t_for_value`] but also reports the iteration count and
/// whether the tolerance was met.
pub fn solve(target: f64, p: &ControlPoints, config: &SolverConfig) -> Solution {
    solve_from(target, p, initial_guess(target, p), config)
}

/// Newton-Raphson from a caller-chosen starting parameter.
///
/// Seeding with the previous frame's `t` keeps a sampled sequence on the
/// same branch of a non-monotonic curve.  A NaN seed falls back to `0.5`.
pub fn solve_from(target: f64, p: &ControlPoints, seed: f64, config: &SolverConfig) -> Solution {
    let mut t = if seed.is_nan() { 0.5 } else { clamp01(seed) };

    for i in 0..config.max_iterations {
        let error = evaluate(p, t) - target;
        if error.abs() < config.tolerance {
            return Solution {
                t,
                iterations: i + 1,
                converged: true,
            };
        }

        let slope = derivative(p, t);
        if slope.abs() < MIN_SLOPE {
            trace!("flat slope {:e} at t={}, stopping", slope, t);
            return Solution {
                t,
                iterations: i + 1,
                converged: false,
            };
        }

        t = clamp01(t - error / slope);
    }

    let converged = (evaluate(p, t) - target).abs() < config.tolerance;
    if !converged {
        trace!(
            "no convergence for target {} after {} iterations (t={})",
            target,
            config.max_iterations,
            t
        );
    }
    Solution {
        t,
        iterations: config.max_iterations,
        converged,
    }
}

/// Sample the curve at horizontal coordinate `x`, in the caller's units.
///
/// Solves `x_points` for `t`, then evaluates `y_points` at that `t`.
pub fn sample_at(
    x: f64,
    x_points: &ControlPoints,
    y_points: &ControlPoints,
    config: &SolverConfig,
) -> f64 {
    let t = solve_t_for_value(x, x_points, config);
    evaluate(y_points, t)
}

/// Sample the curve in normalized `[0, 1] × [0, 1]` animation space.
///
/// `t_norm` is lerped into `window.domain`, the curve is sampled there, and
/// the result is mapped back through `window.range`.  Fails only when
/// `window.range` is degenerate.
pub fn sample_normalized(
    t_norm: f64,
    window: &Window,
    x_points: &ControlPoints,
    y_points: &ControlPoints,
    config: &SolverConfig,
) -> Result<f64, RemapError> {
    let x = window.domain.lerp(t_norm);
    let y = sample_at(x, x_points, y_points, config);
    window.range.inverse_lerp(y)
}

//  CSS-style easing

/// A CSS-like `cubic-bezier(x1, y1, x2, y2)` easing curve.
///
/// Endpoints are fixed at `(0, 0)` and `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicEasing {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

const EASING_SOLVER: SolverConfig = SolverConfig {
    tolerance: 1e-6,
    max_iterations: 16,
};

impl CubicEasing {
    /// CSS `ease`.
    pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);
    /// CSS `ease-in`.
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
    /// CSS `ease-out`.
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
    /// CSS `ease-in-out`.
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn x_points(&self) -> ControlPoints {
        ControlPoints::new(0.0, self.x1, self.x2, 1.0)
    }

    pub fn y_points(&self) -> ControlPoints {
        ControlPoints::new(0.0, self.y1, self.y2, 1.0)
    }

    /// Eased progress for normalized time `u` (clamped to `[0, 1]`).
    pub fn apply(&self, u: f64) -> f64 {
        let u = clamp01(u);
        sample_at(u, &self.x_points(), &self.y_points(), &EASING_SOLVER)
    }

    /// Interpolate between `a` and `b` with this easing.
    pub fn interpolate(&self, a: f64, b: f64, u: f64) -> f64 {
        a + (b - a) * self.apply(u)
    }
}

impl Default for CubicEasing {
    fn default() -> Self {
        Self::EASE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remap::Interval;

    fn symmetric() -> ControlPoints {
        ControlPoints::new(20.0, 200.0, 200.0, 380.0)
    }

    fn near_linear() -> ControlPoints {
        ControlPoints::new(0.0, 0.3, 0.7, 1.0)
    }

    fn assorted() -> Vec<ControlPoints> {
        vec![
            symmetric(),
            near_linear(),
            ControlPoints::new(-3.0, 10.0, -7.5, 2.0),
            ControlPoints::new(5.0, 5.0, 5.0, 5.0),
            ControlPoints::new(0.0, 1.0, -1.0, 0.0),
        ]
    }

    //  evaluate / derivative

    #[test]
    fn evaluate_hits_endpoints_exactly() {
        for p in assorted() {
            assert_eq!(evaluate(&p, 0.0), p.p0);
            assert_eq!(evaluate(&p, 1.0), p.p3);
        }
    }

    #[test]
    fn evaluate_symmetric_midpoint() {
        assert_eq!(evaluate(&symmetric(), 0.5), 200.0);
    }

    #[test]
    fn derivative_at_endpoints() {
        for p in assorted() {
            assert!((derivative(&p, 0.0) - 3.0 * (p.p1 - p.p0)).abs() < 1e-12);
            assert!((derivative(&p, 1.0) - 3.0 * (p.p3 - p.p2)).abs() < 1e-12);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let p = ControlPoints::new(-3.0, 10.0, -7.5, 2.0);
        let h = 1e-6;
        for i in 1..10 {
            let t = i as f64 / 10.0;
            let numeric = (evaluate(&p, t + h) - evaluate(&p, t - h)) / (2.0 * h);
            assert!((numeric - derivative(&p, t)).abs() < 1e-5, "t={}", t);
        }
    }

    #[test]
    fn evaluate_is_defined_outside_unit_interval() {
        let p = near_linear();
        assert!(evaluate(&p, -0.5).is_finite());
        assert!(evaluate(&p, 1.5).is_finite());
    }

    //  solver

    #[test]
    fn round_trip_on_monotonic_curves() {
        let cfg = SolverConfig::default();
        for p in [symmetric(), near_linear()] {
            assert!(p.is_loosely_monotonic());
            for i in 0..=100 {
                let t_star = i as f64 / 100.0;
                let target = evaluate(&p, t_star);
                let t = solve_t_for_value(target, &p, &cfg);
                assert!(
                    (evaluate(&p, t) - target).abs() < cfg.tolerance,
                    "t*={} t={} p={:?}",
                    t_star,
                    t,
                    p
                );
            }
        }
    }

    #[test]
    fn boundary_targets_map_to_endpoints() {
        let cfg = SolverConfig::default();
        let p = symmetric();
        assert!(solve_t_for_value(p.p0, &p, &cfg).abs() < 1e-9);
        assert!((solve_t_for_value(p.p3, &p, &cfg) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn targets_outside_span_clamp() {
        let cfg = SolverConfig::default();
        let p = symmetric();
        assert_eq!(solve_t_for_value(-1000.0, &p, &cfg), 0.0);
        assert_eq!(solve_t_for_value(1000.0, &p, &cfg), 1.0);
    }

    #[test]
    fn concrete_scenario_290() {
        let cfg = SolverConfig::default();
        let p = symmetric();
        let s = solve(290.0, &p, &cfg);
        assert!(s.converged);
        assert!(s.iterations <= 10);
        assert!((evaluate(&p, s.t) - 290.0).abs() < 1e-4);
        assert!(s.t > 0.5 && s.t < 1.0);
    }

    #[test]
    fn degenerate_endpoints_do_not_divide_by_zero() {
        let cfg = SolverConfig::default();
        let p = ControlPoints::new(0.0, 1.0, -1.0, 0.0);
        let t = solve_t_for_value(0.0, &p, &cfg);
        assert_eq!(t, 0.5);

        let t = solve_t_for_value(0.2, &p, &cfg);
        assert!(t.is_finite());
        assert!((0.0..=1.0).contains(&t));
    }

    #[test]
    fn fully_flat_curve_stops_immediately() {
        let cfg = SolverConfig::default();
        let p = ControlPoints::new(0.0, 0.0, 0.0, 0.0);
        let s = solve(1.0, &p, &cfg);
        assert_eq!(s.t, 0.5);
        assert_eq!(s.iterations, 1);
        assert!(!s.converged);
    }

    #[test]
    fn flat_slope_at_initial_guess_terminates() {
        let cfg = SolverConfig::default();
        // P0 == P1 and P2 == P3: slope is zero at both endpoints.
        let p = ControlPoints::new(0.0, 0.0, 1.0, 1.0);
        let s = solve(-0.5, &p, &cfg);
        assert_eq!(s.t, 0.0);
        assert_eq!(s.iterations, 1);
        assert!(!s.converged);

        let s = solve(1.5, &p, &cfg);
        assert_eq!(s.t, 1.0);
        assert!(!s.converged);
    }

    #[test]
    fn exhausting_iterations_returns_best_effort() {
        let cfg = SolverConfig {
            tolerance: 1e-12,
            max_iterations: 1,
        };
        let p = symmetric();
        let s = solve(290.0, &p, &cfg);
        assert_eq!(s.iterations, 1);
        assert!(!s.converged);
        assert!((0.0..=1.0).contains(&s.t));
        // The plain variant returns the same estimate without complaint.
        assert_eq!(solve_t_for_value(290.0, &p, &cfg), s.t);
    }

    #[test]
    fn zero_iterations_returns_clamped_guess() {
        let cfg = SolverConfig {
            tolerance: 1e-4,
            max_iterations: 0,
        };
        let p = symmetric();
        assert_eq!(solve_t_for_value(290.0, &p, &cfg), 0.75);
        assert_eq!(solve_t_for_value(10_000.0, &p, &cfg), 1.0);
    }

    #[test]
    fn nan_target_terminates_in_range() {
        let cfg = SolverConfig::default();
        let s = solve(f64::NAN, &symmetric(), &cfg);
        assert!(!s.converged);
        assert!((0.0..=1.0).contains(&s.t));
    }

    #[test]
    fn seeded_solve_picks_nearby_root() {
        // Loops back on itself: x rises, falls, rises again.
        let p = ControlPoints::new(0.0, 3.0, -2.0, 1.0);
        let cfg = SolverConfig::default();
        let target = evaluate(&p, 0.15);

        let low = solve_from(target, &p, 0.1, &cfg);
        assert!(low.converged);
        assert!((low.t - 0.15).abs() < 0.05, "t={}", low.t);

        let other = evaluate(&p, 0.9);
        let high = solve_from(other, &p, 0.95, &cfg);
        assert!(high.converged);
        assert!((high.t - 0.9).abs() < 0.05, "t={}", high.t);
    }

    #[test]
    fn solver_config_validation() {
        assert!(SolverConfig::default().validate().is_ok());
        let negative = SolverConfig {
            tolerance: -1.0,
            ..SolverConfig::default()
        };
        assert_eq!(negative.validate(), Err(SolverConfigError::Tolerance(-1.0)));
        let nan = SolverConfig {
            tolerance: f64::NAN,
            ..SolverConfig::default()
        };
        assert!(nan.validate().is_err());
        let huge = SolverConfig {
            max_iterations: u32::MAX,
            ..SolverConfig::default()
        };
        assert_eq!(huge.validate(), Err(SolverConfigError::TooManyIterations(u32::MAX)));
        let at_limit = SolverConfig {
            max_iterations: MAX_ITERATIONS,
            ..SolverConfig::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn nan_seed_falls_back_to_midpoint() {
        let cfg = SolverConfig {
            tolerance: 1e-4,
            max_iterations: 0,
        };
        let s = solve_from(1.0, &symmetric(), f64::NAN, &cfg);
        assert_eq!(s.t, 0.5);
    }

    //  sampling

    #[test]
    fn sample_normalized_symmetric_midpoint() {
        let p = symmetric();
        let window = Window::square(Interval::new(20.0, 380.0));
        let cfg = SolverConfig::default();
        let v = sample_normalized(0.5, &window, &p, &p, &cfg).unwrap();
        assert!((v - 0.5).abs() < 1e-6);

        let y = ControlPoints::new(20.0, 20.0, 380.0, 380.0);
        let v = sample_normalized(0.5, &window, &p, &y, &cfg).unwrap();
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sample_normalized_endpoints() {
        let x = symmetric();
        let y = ControlPoints::new(20.0, 20.0, 380.0, 380.0);
        let window = Window::square(Interval::new(20.0, 380.0));
        let cfg = SolverConfig::default();
        assert!(sample_normalized(0.0, &window, &x, &y, &cfg).unwrap().abs() < 1e-9);
        assert!((sample_normalized(1.0, &window, &x, &y, &cfg).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sample_normalized_reversed_range_inverts() {
        let x = symmetric();
        let y = ControlPoints::new(20.0, 20.0, 380.0, 380.0);
        let canvas = Interval::new(20.0, 380.0);
        let cfg = SolverConfig::default();
        let up = sample_normalized(0.3, &Window::square(canvas), &x, &y, &cfg).unwrap();
        let flipped = Window::new(canvas, canvas.reversed());
        let down = sample_normalized(0.3, &flipped, &x, &y, &cfg).unwrap();
        assert!((up + down - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sample_normalized_degenerate_range_is_error() {
        let p = symmetric();
        let window = Window::new(Interval::new(20.0, 380.0), Interval::new(5.0, 5.0));
        let cfg = SolverConfig::default();
        assert!(matches!(
            sample_normalized(0.5, &window, &p, &p, &cfg),
            Err(RemapError::DegenerateInterval { .. })
        ));
    }

    //  easing

    #[test]
    fn easing_endpoints() {
        for e in [
            CubicEasing::EASE,
            CubicEasing::EASE_IN,
            CubicEasing::EASE_OUT,
            CubicEasing::EASE_IN_OUT,
        ] {
            assert!(e.apply(0.0).abs() < 1e-6, "{:?}", e);
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", e);
        }
    }

    #[test]
    fn easing_is_monotonic() {
        let e = CubicEasing::EASE;
        let mut prev = e.apply(0.0);
        for i in 1..=50 {
            let v = e.apply(i as f64 / 50.0);
            assert!(v >= prev - 1e-6, "step {}", i);
            prev = v;
        }
    }

    #[test]
    fn ease_midpoint_matches_css() {
        assert!((CubicEasing::EASE.apply(0.5) - 0.8024).abs() < 1e-3);
    }

    #[test]
    fn diagonal_handles_are_linear() {
        let e = CubicEasing::new(0.2, 0.2, 0.8, 0.8);
        for i in 0..=10 {
            let u = i as f64 / 10.0;
            assert!((e.apply(u) - u).abs() < 1e-5, "u={}", u);
        }
    }

    #[test]
    fn easing_clamps_and_interpolates() {
        let e = CubicEasing::EASE;
        assert_eq!(e.apply(-1.0), e.apply(0.0));
        assert_eq!(e.apply(2.0), e.apply(1.0));
        assert!((e.interpolate(10.0, 20.0, 1.0) - 20.0).abs() < 1e-5);
        assert!((e.interpolate(10.0, 20.0, 0.0) - 10.0).abs() < 1e-5);
    }
}
