//! **curve-profile**: cubic Bézier profile curves for animation remapping.
//!
//! A profile is a 2-D cubic Bézier whose x axis is "time" and whose y axis is
//! "amount".  Sampling it at a given time means inverting the x polynomial
//! (Newton-Raphson, bounded and clamped to `[0, 1]`) and evaluating the y
//! polynomial at the parameter found.
//!
//! # Architecture
//!
//! * [`bezier`]: the pure math (forward evaluation, derivative, inverse
//!   solve, normalized sampler).  No state, no allocation.
//! * [`remap`]: `lerp` / `inverse_lerp` and the domain/range [`Window`]
//!   that converts caller units to `[0, 1]`.
//! * [`profile`] and [`editor`]: a 2-D curve type and the state of the
//!   interactive two-handle editor, independent of any UI toolkit.
//! * [`session`], [`command`], [`traits`], [`ipc`]: a command vocabulary and
//!   transport seam for driving an editor headlessly.
//!
//! [`Window`]: remap::Window

pub mod bezier;
pub mod command;
pub mod config;
pub mod editor;
pub mod ipc;
pub mod profile;
pub mod remap;
pub mod session;
pub mod traits;
