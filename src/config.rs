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

// Command-line configuration

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::filter::MatchMode;
use crate::Commit;

/// Search git commit history, interactively or in one shot.
#[derive(Parser, Debug)]
#[command(name = "gitfind")]
pub struct Cli {
    /// Run a single search and print the results instead of starting the
    /// interactive view.
    #[arg(value_enum)]
    pub command: Option<Command>,

    /// Branch substring, search keyword, file path or message substring.
    pub argument: Option<String>,

    /// Minimum query length before the interactive view starts filtering.
    #[arg(short = 'm', long, default_value_t = 0)]
    pub min_char_length: usize,

    /// Maximum number of commits to display.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub num_commits: usize,

    #[arg(short = 'o', long, value_enum, default_value_t = SortOrder::Chronological)]
    pub sort_order: SortOrder,

    #[arg(short = 'd', long, value_enum, default_value_t = SortDirection::Desc)]
    pub sort_direction: SortDirection,

    /// Treat the search term as a regular expression (case-sensitive).
    #[arg(short, long)]
    pub regex: bool,

    /// How to read the repository.
    #[arg(long, value_enum, default_value_t = Backend::Auto)]
    pub backend: Backend,

    /// Write log output to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log verbosity: error, warn, info, debug or trace.
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,
}

impl Cli {
    /// Session settings derived from the flags.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            min_chars: self.min_char_length,
            cap: self.num_commits,
            sort: SortSpec {
                order: self.sort_order,
                direction: self.sort_direction,
            },
            mode: if self.regex {
                MatchMode::Regex
            } else {
                MatchMode::Literal
            },
        }
    }
}

/// One-shot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Command {
    /// List local branches whose name contains the argument.
    BranchSearch,
    /// Commits whose message matches the keyword (or regex with --regex).
    SearchCommits,
    /// Commits that touch the given file path.
    FileCommits,
    /// Commits whose message contains the exact, case-sensitive substring.
    SubstringCommits,
}

impl Command {
    /// Error shown when the command is given without its argument.
    pub fn missing_argument_message(self) -> &'static str {
        match self {
            Command::BranchSearch => "Error: branch-search requires a branch name argument.",
            Command::SearchCommits => "Error: search-commits requires a search keyword argument.",
            Command::FileCommits => "Error: file-commits requires a file path argument.",
            Command::SubstringCommits => {
                "Error: substring-commits requires a substring argument."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Chronological,
    ReverseChronological,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// libgit2 when compiled in, otherwise the git executable.
    Auto,
    Libgit2,
    Cli,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Chronological => write!(f, "chronological"),
            SortOrder::ReverseChronological => write!(f, "reverse-chronological"),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Requested ordering of the commit list.
///
/// Backends yield history newest first. `chronological desc` keeps that
/// order; `chronological asc` yields oldest first. `reverse-chronological`
/// flips whatever the direction asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub order: SortOrder,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            order: SortOrder::Chronological,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn newest_first(&self) -> bool {
        match (self.order, self.direction) {
            (SortOrder::Chronological, SortDirection::Desc) => true,
            (SortOrder::Chronological, SortDirection::Asc) => false,
            (SortOrder::ReverseChronological, SortDirection::Desc) => false,
            (SortOrder::ReverseChronological, SortDirection::Asc) => true,
        }
    }

    /// Reorder a newest-first commit list in place.
    pub fn apply(&self, commits: &mut [Commit]) {
        if !self.newest_first() {
            commits.reverse();
        }
    }
}

/// Settings fixed for the lifetime of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub min_chars: usize,
    pub cap: usize,
    pub sort: SortSpec,
    pub mode: MatchMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_chars: 0,
            cap: 10,
            sort: SortSpec::default(),
            mode: MatchMode::Literal,
        }
    }
}
