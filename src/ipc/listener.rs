//! Newline-delimited JSON [`CommandSource`] implementation.
//!
//! Reads any [`BufRead`] (stdin in the binary) and parses each line as a
//! JSON-encoded [`Command`].
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! {"Buttons":{"left":true,"right":false}}
//! {"Drag":{"x":120.0,"y":80.0}}
//! {"Sample":{"time":0.5,"axis":"horizontal"}}
//! {"Samples":{"count":10,"axis":"vertical"}}
//! "Handles"
//! ```

use crate::command::Command;
use crate::traits::CommandSource;
use log::{debug, error, info};
use std::io::BufRead;
use std::sync::mpsc;

/// A [`CommandSource`] that reads JSON commands, one per line.
///
/// Blank lines are skipped.  Lines that are not UTF-8 or fail to parse are
/// logged and skipped; the source keeps reading.
pub struct JsonLineSource<R> {
    reader: R,
}

/// Errors produced by the JSON line source.
#[derive(Debug, thiserror::Error)]
pub enum JsonLineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl<R: BufRead> JsonLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Parse a single raw line.  `Ok(None)` for blank lines.
    pub fn parse_line(line: &[u8]) -> Result<Option<Command>, JsonLineError> {
        let text = std::str::from_utf8(line)?.trim();
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(text)?))
    }
}

impl<R: BufRead + Send> CommandSource for JsonLineSource<R> {
    type Error = JsonLineError;

    /// Read until end of input.
    ///
    /// This method **blocks** on the reader.  Run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                debug!("end of input");
                return Ok(());
            }
            match Self::parse_line(&line) {
                Ok(None) => continue,
                Ok(Some(cmd)) => {
                    debug!("received {:?}", cmd);
                    if sink.send(cmd).is_err() {
                        info!("sink closed, shutting down");
                        return Ok(());
                    }
                }
                Err(e) => {
                    error!("bad command: {} ({})", String::from_utf8_lossy(&line).trim(), e);
                }
            }
        }
    }
}

//  Tests
