//! Transports that deliver commands to an editor session.
//!
//! External tools (scripts, animation exporters, etc.) write
//! newline-delimited JSON commands to the process.

pub mod listener;
