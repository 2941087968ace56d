//! Application configuration.
//!
//! The configuration is loaded from a JSON file whose path is passed on the
//! command line (`--config <path>`) or found at
//! `$XDG_CONFIG_HOME/curve-profile/config.json`.  Each concern has its own
//! top-level key so the file can grow new sections without breaking older
//! ones.
//!
//! # Example
//!
//! ```json
//! {
//!   "solver": {
//!     "tolerance": 0.0001,
//!     "max_iterations": 10
//!   },
//!   "editor": {
//!     "size": 400.0,
//!     "margin": 20.0,
//!     "handle_1": [200.0, 200.0],
//!     "handle_2": [200.0, 200.0]
//!   }
//! }
//! ```

use crate::bezier::SolverConfig;
use crate::editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional; a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Inverse-solve stopping criteria.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Canvas geometry and initial handle positions.
    #[serde(default)]
    pub editor: EditorConfig,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the sampler cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver
            .validate()
            .map_err(|e| ConfigError(format!("solver: {}", e)))?;
        if self.editor.canvas().is_degenerate() {
            return Err(ConfigError(format!(
                "editor.margin {} leaves no room on a canvas of size {}",
                self.editor.margin, self.editor.size
            )));
        }
        Ok(())
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
