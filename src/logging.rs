// SPDX-License-Identifier: MIT
//
// Logging — opt-in, file-only.
//
// The terminal belongs to the label panes, so nothing is ever logged to
// stderr. When `BIG_LABEL_LOG` names a file, `env_logger` appends to it,
// filtered by `RUST_LOG` (default `info`). Otherwise no logger is installed
// and every `log` macro is a no-op.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::Context;
use env_logger::{Env, Target};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "BIG_LABEL_LOG";

/// Install the file logger if `BIG_LABEL_LOG` is set. Returns the log path.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init() -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = log_path(std::env::var_os(LOG_ENV)) else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    // A logger installed earlier (tests) wins.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();

    Ok(Some(path))
}

fn log_path(var: Option<std::ffi::OsString>) -> Option<PathBuf> {
    var.filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unset_or_empty_means_no_log() {
        assert_eq!(log_path(None), None);
        assert_eq!(log_path(Some("".into())), None);
    }

    #[test]
    fn path_is_taken_verbatim() {
        assert_eq!(log_path(Some("/tmp/bl.log".into())), Some(PathBuf::from("/tmp/bl.log")));
    }
}
