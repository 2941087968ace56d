//! Commands and responses exchanged with a headless editor session.
//!
//! A host that has no UI of its own (a script, an exporter, a test harness)
//! drives a [`ProfileEditor`](crate::editor::ProfileEditor) by sending
//! [`Command`]s and reading back one [`Response`] per command.  Both are
//! serialized as externally tagged JSON.
//!
//! ```json
//! {"Drag":{"x":100.0,"y":50.0}}
//! {"Sample":{"time":0.5,"axis":"horizontal"}}
//! {"Samples":{"count":10}}
//! {"CurveValues":"rmb"}
//! "Handles"
//! ```
//!
//! `axis` accepts the names understood by
//! [`parse_axis`](crate::profile::parse_axis) and defaults to the
//! horizontal curve when omitted.

use crate::bezier::SolverConfig;
use crate::editor::MouseButtons;
use crate::profile::{Axis, NormalizedControlPoints, ProfileCurve};
use serde::{Deserialize, Serialize};

/// Every action an editor session can perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Mouse buttons held after a press or release.
    Buttons(MouseButtons),

    /// Pointer moved to canvas position `(x, y)`; updates both handles.
    Drag { x: f64, y: f64 },

    /// Normalized amount at normalized `time`.
    Sample {
        time: f64,
        #[serde(default)]
        axis: Axis,
    },

    /// Curve y at canvas x coordinate `x`.
    SampleAt {
        x: f64,
        #[serde(default)]
        axis: Axis,
    },

    /// `count + 1` evenly spaced `(time, amount)` pairs.
    Samples {
        count: usize,
        #[serde(default)]
        axis: Axis,
    },

    /// Control points normalized to the canvas.
    CurveValues(Axis),

    /// Control points in canvas units, e.g. for drawing.
    Profile(Axis),

    /// Current handle positions.
    Handles,

    /// Replace the solver's stopping criteria.
    SetSolver(SolverConfig),

    /// Return handles and buttons to their starting state.
    Reset,
}

/// Reply to a single [`Command`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// The command was applied and has nothing to report.
    Ok,
    Value { time: f64, amount: f64 },
    Point { x: f64, y: f64 },
    /// `[time, amount]` pairs.
    Samples(Vec<[f64; 2]>),
    CurveValues(NormalizedControlPoints),
    Profile(ProfileCurve),
    Handles { handle_1: [f64; 2], handle_2: [f64; 2] },
    /// The command could not be carried out.
    Error(String),
}
