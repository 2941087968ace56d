//! The trait that decouples an editor session from whatever transport
//! delivers its commands.
//!
//! The [`EditorSession`](crate::session::EditorSession) only sees
//! [`Command`]s; whether they were typed on stdin, read from a file, or
//! produced by a UI event loop is up to the [`CommandSource`].

use crate::command::Command;
use std::sync::mpsc;

/// A source of [`Command`]s.
///
/// Implementations read from some transport and forward parsed commands
/// into the provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * When `sink` is closed the source stops and returns `Ok(())`.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start reading and forward every incoming [`Command`] into `sink`.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
