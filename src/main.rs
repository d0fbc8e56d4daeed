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

// TUI application entry point

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use git_find::{
    config::Cli,
    controller,
    event::TerminalInput,
    logging::{self, LogTarget},
    repo,
    terminal,
};
use ratatui::{backend::CrosstermBackend, Terminal};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let target = LogTarget::select(cli.log_file.clone(), cli.command.is_none());
    let dispatch = logging::dispatch(&target, cli.log_level)?;

    tracing::dispatcher::with_default(&dispatch, || run(cli))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.session_config();
    let cwd = std::env::current_dir()?;

    let Some(command) = cli.command else {
        let source = repo::open(&cwd, cli.backend)?;

        terminal::with_restore(
            || {
                enable_raw_mode()?;
                execute!(io::stderr(), EnterAlternateScreen)?;
                Ok(())
            },
            || {
                let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
                controller::run_interactive(
                    &mut terminal,
                    source.as_ref(),
                    &mut TerminalInput,
                    config,
                )?;
                Ok(())
            },
            || {
                let raw = disable_raw_mode();
                execute!(io::stderr(), LeaveAlternateScreen)?;
                raw?;
                Ok(())
            },
        )?;
        return Ok(ExitCode::SUCCESS);
    };

    let Some(argument) = cli.argument.as_deref() else {
        println!("{}", command.missing_argument_message());
        return Ok(ExitCode::FAILURE);
    };

    let source = repo::open(&cwd, cli.backend)?;
    let stdout = io::stdout();
    controller::run_batch(source.as_ref(), command, argument, &config, &mut stdout.lock())?;
    Ok(ExitCode::SUCCESS)
}
