//! Toolkit-independent state of the interactive profile editor.
//!
//! The editor shows a square canvas with a margin on every side.  Two curves
//! run from the top-left corner of the inner canvas to its bottom-right
//! corner:
//!
//! * the **horizontal** curve, whose handles slide along the top and bottom
//!   edges (dragged with the left mouse button), and
//! * the **vertical** curve, whose handles slide along the left and right
//!   edges (dragged with the right mouse button).
//!
//! A single pointer position drives both handle pairs: handle 1 follows the
//! pointer, handle 2 is the pointer mirrored through the canvas centre.
//!
//! [`ProfileEditor`] owns that state explicitly.  A UI layer forwards pointer
//! events to it and draws whatever [`ProfileEditor::profile`] returns; an
//! animation host calls [`ProfileEditor::sample_normalized`].
//!
//! Canvas coordinates are screen-oriented (y grows downward), so the
//! normalized sampler reads the range upside down: the top edge of the
//! canvas is amount `1.0`, the bottom edge `0.0`.

use crate::bezier::{self, ControlPoints, SolverConfig};
use crate::profile::{Axis, NormalizedControlPoints, ProfileCurve};
use crate::remap::{Interval, RemapError, Window};
use log::debug;
use serde::{Deserialize, Serialize};

/// Most steps [`ProfileEditor::samples`] will produce in one table.
pub const MAX_SAMPLES: usize = 100_000;

/// Canvas geometry and initial handle positions, in canvas pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side length of the square canvas.  Default: `400.0`.
    pub size: f64,
    /// Inset of the curve area from every canvas edge.  Default: `20.0`.
    pub margin: f64,
    /// Initial position of handle 1 as `[x, y]`.  Default: `[200, 200]`.
    pub handle_1: [f64; 2],
    /// Initial position of handle 2 as `[x, y]`.  Default: `[200, 200]`.
    pub handle_2: [f64; 2],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            size: 400.0,
            margin: 20.0,
            handle_1: [200.0, 200.0],
            handle_2: [200.0, 200.0],
        }
    }
}

impl EditorConfig {
    /// The inner curve area along either axis.
    pub fn canvas(&self) -> Interval {
        Interval::new(self.margin, self.size - self.margin)
    }
}

/// Which mouse buttons are currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
}

impl MouseButtons {
    pub const BOTH: Self = Self {
        left: true,
        right: true,
    };
}

/// Editor session state: canvas, handles, and which curves are active.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    config: EditorConfig,
    solver: SolverConfig,
    handle_1: [f64; 2],
    handle_2: [f64; 2],
    buttons: MouseButtons,
}

impl ProfileEditor {
    /// Create an editor with handles at their configured starting positions.
    /// Both curves start out active.
    pub fn new(config: EditorConfig, solver: SolverConfig) -> Self {
        let canvas = config.canvas();
        let clamp = |[x, y]: [f64; 2]| [canvas.clamp(x), canvas.clamp(y)];
        Self {
            handle_1: clamp(config.handle_1),
            handle_2: clamp(config.handle_2),
            config,
            solver,
            buttons: MouseButtons::BOTH,
        }
    }

    //  Accessors

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    pub fn set_solver(&mut self, solver: SolverConfig) {
        self.solver = solver;
    }

    pub fn canvas(&self) -> Interval {
        self.config.canvas()
    }

    /// Current handle positions `(handle_1, handle_2)` as `[x, y]`.
    pub fn handles(&self) -> ([f64; 2], [f64; 2]) {
        (self.handle_1, self.handle_2)
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    /// Whether the curve for `axis` is currently shown.
    pub fn is_active(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.buttons.left,
            Axis::Vertical => self.buttons.right,
        }
    }

    /// Window used by [`sample_normalized`](Self::sample_normalized):
    /// the canvas as domain, the canvas flipped as range.
    pub fn window(&self) -> Window {
        let canvas = self.canvas();
        Window::new(canvas, canvas.reversed())
    }

    //  Input

    /// Record the buttons held after a press or release.
    pub fn set_buttons(&mut self, buttons: MouseButtons) {
        debug!("buttons: left={} right={}", buttons.left, buttons.right);
        self.buttons = buttons;
    }

    /// Move the handles for a pointer at canvas position `(px, py)`.
    ///
    /// Handle 1 follows the pointer; handle 2 is the pointer mirrored through
    /// the canvas centre with its axes swapped.  Both are clamped to the
    /// curve area.
    pub fn drag_to(&mut self, px: f64, py: f64) {
        let canvas = self.canvas();
        let size = self.config.size;
        let fx = px / size;
        let fy = py / size;

        self.handle_1 = [canvas.clamp(px), canvas.clamp(py)];
        self.handle_2 = [canvas.clamp(size * (1.0 - fy)), canvas.clamp(size * (1.0 - fx))];
        debug!("drag to ({}, {}): handles {:?} {:?}", px, py, self.handle_1, self.handle_2);
    }

    /// Put the handles back where the configuration started them.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone(), self.solver);
    }

    //  Curves

    /// The curve for `axis` in canvas coordinates.
    pub fn profile(&self, axis: Axis) -> ProfileCurve {
        let Interval { start: lo, end: hi } = self.canvas();
        let pinned = ControlPoints::new(lo, lo, hi, hi);
        match axis {
            Axis::Horizontal => ProfileCurve::new(
                ControlPoints::new(lo, self.handle_1[0], self.handle_2[0], hi),
                pinned,
            ),
            Axis::Vertical => ProfileCurve::new(
                pinned,
                ControlPoints::new(lo, self.handle_1[1], self.handle_2[1], hi),
            ),
        }
    }

    /// y of the `axis` curve at canvas x coordinate `x`.
    pub fn sample_at(&self, x: f64, axis: Axis) -> f64 {
        self.profile(axis).sample_at(x, &self.solver)
    }

    /// Amount in `[0, 1]` at normalized time `time` in `[0, 1]`.
    pub fn sample_normalized(&self, time: f64, axis: Axis) -> Result<f64, RemapError> {
        self.profile(axis).sample_normalized(time, &self.window(), &self.solver)
    }

    /// `count + 1` evenly spaced `(time, amount)` pairs covering `[0, 1]`.
    ///
    /// Each solve is seeded with the previous sample's parameter so the
    /// table follows one branch of the curve.  `count` must lie in
    /// `1..=MAX_SAMPLES`.
    pub fn samples(&self, count: usize, axis: Axis) -> Result<Vec<(f64, f64)>, RemapError> {
        if count == 0 {
            return Err(RemapError::InvalidSampleCount);
        }
        let rows = count
            .checked_add(1)
            .filter(|_| count <= MAX_SAMPLES)
            .ok_or(RemapError::TooManySamples {
                count,
                max: MAX_SAMPLES,
            })?;
        let profile = self.profile(axis);
        let window = self.window();

        let mut out = Vec::with_capacity(rows);
        let mut prev_t = None;
        for i in 0..=count {
            let time = i as f64 / count as f64;
            let x = window.domain.lerp(time);
            let solution = match prev_t {
                Some(seed) => bezier::solve_from(x, &profile.x, seed, &self.solver),
                None => bezier::solve(x, &profile.x, &self.solver),
            };
            prev_t = Some(solution.t);
            let amount = window.range.inverse_lerp(profile.y.at(solution.t))?;
            out.push((time, amount));
        }
        Ok(out)
    }

    /// Control points of the `axis` curve relative to the canvas, with y
    /// measured downward from the top edge.
    pub fn curve_values(&self, axis: Axis) -> Result<NormalizedControlPoints, RemapError> {
        self.profile(axis).normalized(&Window::square(self.canvas()))
    }
}

impl Default for ProfileEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default(), SolverConfig::default())
    }
}
