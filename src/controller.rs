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

// Interactive search loop and one-shot commands

use std::io::Write;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ratatui::{backend::Backend, Terminal};

use crate::app::AppState;
use crate::config::{Command, SessionConfig};
use crate::event::{InputEvent, InputSource};
use crate::filter;
use crate::repo::CommitSource;
use crate::{views, Commit};

/// Run the interactive search until interrupted or the input ends.
///
/// The commit list and repository metadata are read once up front; a
/// failure there is fatal. After that every key press updates the query,
/// re-runs the filter and repaints the whole screen. Per-query failures are
/// shown on screen and never end the loop.
///
/// Returns the final state so callers can inspect it.
pub fn run_interactive<B: Backend>(
    terminal: &mut Terminal<B>,
    source: &dyn CommitSource,
    input: &mut dyn InputSource,
    config: SessionConfig,
) -> Result<AppState> {
    let info = source
        .repo_info()
        .context("Failed to read repository information")?;
    let mut commits = source.list_commits().context("Failed to list commits")?;
    config.sort.apply(&mut commits);
    tracing::info!(
        repo = %info.name,
        commits = commits.len(),
        cap = config.cap,
        min_chars = config.min_chars,
        mode = ?config.mode,
        "interactive session started"
    );

    let mut app = AppState::new(config);
    app.show_unfiltered(source, &commits);

    loop {
        terminal.draw(|frame| views::search::render(&app, &info, frame))?;

        match input.next_event()? {
            None | Some(InputEvent::Interrupt) => break,
            Some(InputEvent::Char(c)) => {
                app.append_char(c);
                app.refresh_results(source, &commits);
            }
            Some(InputEvent::Backspace) => {
                app.backspace();
                app.refresh_results(source, &commits);
            }
            Some(InputEvent::Other) => {}
        }
    }

    tracing::info!(query = %app.query(), "interactive session ended");
    Ok(app)
}

/// Run one command and print its results to `out`, one line each.
///
/// Empty results are reported with an informational line rather than an
/// error. An invalid regex or a failing backend is returned as an error.
pub fn run_batch(
    source: &dyn CommitSource,
    command: Command,
    argument: &str,
    config: &SessionConfig,
    out: &mut impl Write,
) -> Result<()> {
    tracing::debug!(?command, argument, "running batch command");

    let found = match command {
        Command::BranchSearch => {
            let branches = source.list_branches(argument)?;
            if branches.is_empty() {
                writeln!(out, "No branches found with the name: {}", argument)?;
            }
            for branch in branches {
                writeln!(out, "Found branch: {}", branch)?;
            }
            return Ok(());
        }
        Command::SearchCommits => {
            let commits = sorted(source.list_commits()?, config);
            let progress = scan_progress(commits.len())?;
            let found = filter::filter_with_progress(
                source,
                &commits,
                argument,
                config.mode,
                config.cap,
                |n| progress.set_position(n as u64),
            );
            progress.finish_and_clear();
            found?
        }
        Command::FileCommits => {
            let mut commits = sorted(source.file_commits(argument)?, config);
            commits.truncate(config.cap);
            commits
        }
        Command::SubstringCommits => {
            let commits = sorted(source.list_commits()?, config);
            filter::substring_commits(source, &commits, argument, config.cap)?
        }
    };

    if found.is_empty() {
        writeln!(out, "No commits found for: {}", argument)?;
    }
    for commit in &found {
        writeln!(out, "{}", source.describe(commit)?)?;
    }
    Ok(())
}

fn sorted(mut commits: Vec<Commit>, config: &SessionConfig) -> Vec<Commit> {
    config.sort.apply(&mut commits);
    commits
}

/// Progress bar on stderr; hidden when stderr is not a terminal.
fn scan_progress(total: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Filtering commits [{elapsed_precise}] {bar:40} {pos}/{len}")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}
