// SPDX-License-Identifier: MIT
//
// big-label — show a big block-letter label in each terminal pane.
//
// This is the binary that wires the crates together:
//
//   bl-term → raw terminal, input parsing, event loop, frame output
//   bl-core → glyphs, color assignment, label instances, compositor
//
// The Host implements bl-term's App trait. Each event flows through:
//
//   stdin → parser → Host::on_event → LabelSubsystem::on_input → Transition
//   paint → label surfaces blitted per pane → renderer → terminal
//
// Settings come from the command line first, then the config file, then
// built-in defaults.

mod config;
mod host;
mod logging;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use bl_core::{LabelContext, LabelSubsystem};
use bl_term::event_loop::EventLoop;
use bl_term::terminal;

use crate::config::Config;
use crate::host::Host;

// ─── Command Line ───────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "big-label", version, about = "Show a big block-letter label in each terminal pane")]
struct Cli {
    /// Label text. Defaults to the session name, then the window name.
    label: Option<String>,

    /// Number of side-by-side panes, each with its own label.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=16))]
    panes: Option<u16>,

    /// Session name used when no label is given.
    #[arg(long, env = "BIG_LABEL_SESSION")]
    session: Option<String>,

    /// Window name used when neither label nor session is given
    /// [default: current directory name].
    #[arg(long, env = "BIG_LABEL_WINDOW")]
    window: Option<String>,

    /// Re-enter label mode after each dismissal; q, Escape or Ctrl-C quit.
    #[arg(long)]
    respawn: bool,

    /// Config file [default: $XDG_CONFIG_HOME/big-label/config.toml].
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn context(&self) -> LabelContext {
        LabelContext {
            session_name: self.session.clone(),
            window_name: self.window.clone().or_else(current_dir_name),
        }
    }

    fn pane_count(&self, config: &Config) -> u16 {
        let requested = self.panes.or_else(|| config.panes.map(u16::from)).unwrap_or(1);
        let count = requested.clamp(1, host::MAX_PANES);
        if count != requested {
            log::warn!("pane count {requested} out of range, using {count}");
        }
        count
    }
}

fn current_dir_name() -> Option<String> {
    let dir = env::current_dir().ok()?;
    Some(dir.file_name()?.to_string_lossy().into_owned())
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = logging::init()? {
        log::info!("big-label {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    }

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    if !terminal::is_tty() {
        bail!("stdin is not a terminal");
    }

    let labels = LabelSubsystem::new(config.label_options());
    let mut host = Host::new(
        labels,
        cli.pane_count(&config),
        cli.label.clone(),
        cli.context(),
        cli.respawn,
    );

    let mut event_loop = EventLoop::new();
    host.start(event_loop.size());
    event_loop
        .run(&mut host)
        .context("terminal event loop failed")?;

    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("big-label").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn label_and_flags() {
        let cli = parse(&["dev", "--panes", "3", "--respawn", "--session", "work"]).unwrap();
        assert_eq!(cli.label.as_deref(), Some("dev"));
        assert_eq!(cli.panes, Some(3));
        assert!(cli.respawn);
        assert_eq!(cli.context().session_name.as_deref(), Some("work"));
    }

    #[test]
    fn pane_range_is_enforced() {
        assert!(parse(&["--panes", "0"]).is_err());
        assert!(parse(&["--panes", "17"]).is_err());
        assert!(parse(&["--panes", "16"]).is_ok());
    }

    #[test]
    fn pane_count_precedence() {
        let config = Config {
            panes: Some(4),
            ..Config::default()
        };
        assert_eq!(parse(&["--panes", "2"]).unwrap().pane_count(&config), 2);
        assert_eq!(parse(&[]).unwrap().pane_count(&config), 4);
        assert_eq!(parse(&[]).unwrap().pane_count(&Config::default()), 1);

        let too_many = Config {
            panes: Some(99),
            ..Config::default()
        };
        assert_eq!(parse(&[]).unwrap().pane_count(&too_many), 16);
    }

    #[test]
    fn explicit_window_wins_over_directory() {
        let cli = parse(&["--window", "editor"]).unwrap();
        assert_eq!(cli.context().window_name.as_deref(), Some("editor"));
    }
}
