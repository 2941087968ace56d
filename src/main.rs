//! Entry point for the **curve-profile** command.
//!
//! Reads newline-delimited JSON [`Command`]s from stdin on a background
//! thread, applies them to an [`EditorSession`] on the main thread, and
//! writes one JSON [`Response`] per command to stdout.
//!
//! ```text
//! curve-profile [--config <path>]
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use curve_profile::command::{Command, Response};
use curve_profile::config::Config;
use curve_profile::ipc::listener::JsonLineSource;
use curve_profile::session::EditorSession;
use curve_profile::traits::CommandSource;
use log::{error, info};
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::sync::mpsc;

/// Resolve the config directory (`$XDG_CONFIG_HOME/curve-profile`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("curve-profile")
}

/// Value of `--config <path>`, if given.
fn config_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

/// Load the config named on the command line, or
/// `$XDG_CONFIG_HOME/curve-profile/config.json`, falling back to compiled-in
/// defaults.
///
/// An explicitly named file that cannot be loaded is fatal.
fn load_config() -> Config {
    if let Some(path) = config_arg() {
        return match Config::load(&path) {
            Ok(cfg) => {
                info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        };
    }

    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no usable config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();
    let mut session = EditorSession::from_config(&config);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_stdin_source(cmd_tx);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for cmd in cmd_rx {
        let response = session.handle(cmd);
        if let Err(e) = write_response(&mut out, &response) {
            error!("failed to write response: {}", e);
            break;
        }
    }
    info!("input closed, exiting");
}

fn write_response(out: &mut impl Write, response: &Response) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()
}

fn spawn_stdin_source(tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let mut source = JsonLineSource::new(BufReader::new(std::io::stdin()));
        if let Err(e) = source.run(tx) {
            error!("stdin source error: {}", e);
        }
    });
}
