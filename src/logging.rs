// Copyright 2026 Thomas Johannesson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Log output setup

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{Dispatch, Level};

/// Where log events go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Discard everything. Used by the interactive view, which owns stderr.
    Off,
    Stderr,
    /// Append to a file.
    File(PathBuf),
}

impl LogTarget {
    /// Pick the target for a run: an explicit log file wins, otherwise batch
    /// runs log to stderr and interactive runs stay silent.
    pub fn select(log_file: Option<PathBuf>, interactive: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path),
            None if interactive => LogTarget::Off,
            None => LogTarget::Stderr,
        }
    }
}

/// Build the dispatcher for one session.
///
/// The caller scopes it with [`tracing::dispatcher::with_default`]; nothing
/// is installed globally.
pub fn dispatch(target: &LogTarget, level: Level) -> Result<Dispatch> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true);

    let dispatch = match target {
        LogTarget::Off => Dispatch::none(),
        LogTarget::Stderr => Dispatch::new(builder.with_writer(std::io::stderr).finish()),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            Dispatch::new(
                builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .finish(),
            )
        }
    };
    Ok(dispatch)
}
