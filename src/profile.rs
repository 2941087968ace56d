//! Two-dimensional profile curves built from per-axis control points.

use crate::bezier::{self, ControlPoints, CubicEasing, SolverConfig};
use crate::remap::{Interval, RemapError, Window};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which of the editor's two curves is meant.
///
/// The *horizontal* curve has its handles sliding along the top and bottom
/// edges of the canvas (x varies, y is pinned).  The *vertical* curve has its
/// handles sliding along the left and right edges (y varies, x is pinned).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Parse an axis name (case-insensitive).
///
/// The mouse-button aliases match the editor: the left button drags the
/// horizontal curve, the right button the vertical one.
pub fn parse_axis(s: &str) -> Option<Axis> {
    match s.trim().to_lowercase().as_str() {
        "horizontal" | "x" | "lmb" | "left" => Some(Axis::Horizontal),
        "vertical" | "y" | "rmb" | "right" => Some(Axis::Vertical),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Axis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_axis(&s).ok_or_else(|| DeError::custom(format!("invalid axis: {:?}", s)))
    }
}

/// A 2-D cubic Bézier given as one [`ControlPoints`] per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileCurve {
    pub x: ControlPoints,
    pub y: ControlPoints,
}

impl ProfileCurve {
    pub fn new(x: ControlPoints, y: ControlPoints) -> Self {
        Self { x, y }
    }

    /// The unit-square profile equivalent to a CSS easing.
    pub fn from_easing(easing: &CubicEasing) -> Self {
        Self::new(easing.x_points(), easing.y_points())
    }

    /// Point on the curve at parameter `t`.
    pub fn point_at(&self, t: f64) -> [f64; 2] {
        [self.x.at(t), self.y.at(t)]
    }

    /// The four control points as `[x, y]` pairs.
    pub fn control_points(&self) -> [[f64; 2]; 4] {
        [
            [self.x.p0, self.y.p0],
            [self.x.p1, self.y.p1],
            [self.x.p2, self.y.p2],
            [self.x.p3, self.y.p3],
        ]
    }

    /// y at horizontal coordinate `x`, both in curve units.
    pub fn sample_at(&self, x: f64, config: &SolverConfig) -> f64 {
        bezier::sample_at(x, &self.x, &self.y, config)
    }

    /// See [`bezier::sample_normalized`].
    pub fn sample_normalized(
        &self,
        t_norm: f64,
        window: &Window,
        config: &SolverConfig,
    ) -> Result<f64, RemapError> {
        bezier::sample_normalized(t_norm, window, &self.x, &self.y, config)
    }

    /// Express the control points relative to `window`.
    ///
    /// x coordinates are mapped through `window.domain`, y coordinates
    /// through `window.range`.
    pub fn normalized(&self, window: &Window) -> Result<NormalizedControlPoints, RemapError> {
        let norm = |[x, y]: [f64; 2]| -> Result<[f64; 2], RemapError> {
            Ok([window.domain.inverse_lerp(x)?, window.range.inverse_lerp(y)?])
        };
        let [p0, p1, p2, p3] = self.control_points();
        Ok(NormalizedControlPoints {
            p0: norm(p0)?,
            p1: norm(p1)?,
            p2: norm(p2)?,
            p3: norm(p3)?,
        })
    }
}

/// Control points of a profile in unitless `[0, 1]²` space.
///
/// Serializes as `{"p0": [x, y], "p1": [x, y], …}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedControlPoints {
    pub p0: [f64; 2],
    pub p1: [f64; 2],
    pub p2: [f64; 2],
    pub p3: [f64; 2],
}

impl NormalizedControlPoints {
    /// Rebuild a curve in the unit square.
    pub fn to_profile(&self) -> ProfileCurve {
        ProfileCurve::new(
            ControlPoints::new(self.p0[0], self.p1[0], self.p2[0], self.p3[0]),
            ControlPoints::new(self.p0[1], self.p1[1], self.p2[1], self.p3[1]),
        )
    }

    /// The equivalent CSS easing, when the endpoints sit at `(0,0)` and
    /// `(1,1)`.
    pub fn as_easing(&self) -> Option<CubicEasing> {
        if self.p0 == [0.0, 0.0] && self.p3 == [1.0, 1.0] {
            Some(CubicEasing::new(self.p1[0], self.p1[1], self.p2[0], self.p2[1]))
        } else {
            None
        }
    }
}

/// Window mapping the unit square onto itself.
pub fn unit_window() -> Window {
    Window::square(Interval::unit())
}
