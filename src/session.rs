//! Applies [`Command`]s to a [`ProfileEditor`].
//!
//! [`EditorSession`] is the explicit owner of editor state: whoever manages
//! the editor's lifetime (the binary's main loop, a UI, a test) creates one
//! and feeds it commands.  Nothing here is global.

use crate::bezier::SolverConfigError;
use crate::command::{Command, Response};
use crate::config::Config;
use crate::editor::ProfileEditor;
use crate::remap::RemapError;
use log::{debug, warn};

/// Why a command could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Remap(#[from] RemapError),
    #[error("rejected solver settings: {0}")]
    Solver(#[from] SolverConfigError),
}

/// An editor plus the command dispatch around it.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    editor: ProfileEditor,
}

impl EditorSession {
    pub fn new(editor: ProfileEditor) -> Self {
        Self { editor }
    }

    /// Build a session from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(ProfileEditor::new(config.editor.clone(), config.solver))
    }

    pub fn editor(&self) -> &ProfileEditor {
        &self.editor
    }

    /// Apply one command and describe the outcome.
    ///
    /// Never panics; failures come back as [`Response::Error`].
    pub fn handle(&mut self, cmd: Command) -> Response {
        debug!("handling {:?}", cmd);
        match self.apply(cmd) {
            Ok(response) => response,
            Err(e) => {
                warn!("command failed: {}", e);
                Response::Error(e.to_string())
            }
        }
    }

    fn apply(&mut self, cmd: Command) -> Result<Response, SessionError> {
        let ed = &mut self.editor;
        Ok(match cmd {
            Command::Buttons(buttons) => {
                ed.set_buttons(buttons);
                Response::Ok
            }
            Command::Drag { x, y } => {
                ed.drag_to(x, y);
                Response::Ok
            }
            Command::Sample { time, axis } => Response::Value {
                time,
                amount: ed.sample_normalized(time, axis)?,
            },
            Command::SampleAt { x, axis } => Response::Point {
                x,
                y: ed.sample_at(x, axis),
            },
            Command::Samples { count, axis } => Response::Samples(
                ed.samples(count, axis)?
                    .into_iter()
                    .map(|(time, amount)| [time, amount])
                    .collect(),
            ),
            Command::CurveValues(axis) => Response::CurveValues(ed.curve_values(axis)?),
            Command::Profile(axis) => Response::Profile(ed.profile(axis)),
            Command::Handles => {
                let (handle_1, handle_2) = ed.handles();
                Response::Handles { handle_1, handle_2 }
            }
            Command::SetSolver(solver) => {
                solver.validate()?;
                ed.set_solver(solver);
                Response::Ok
            }
            Command::Reset => {
                ed.reset();
                Response::Ok
            }
        })
    }
}
