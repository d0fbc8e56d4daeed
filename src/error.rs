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

// Error type shared by the commit source and filter engine

use thiserror::Error;

/// Errors raised while reading history or matching commits.
#[derive(Error, Debug)]
pub enum FindError {
    /// No repository at or above the starting directory.
    #[error("Not a git repository: {0}")]
    Repository(String),

    /// The query could not be compiled as a regular expression.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[cfg(feature = "libgit2")]
    #[error("libgit2 error: {0}")]
    Git(#[from] git2::Error),

    /// The `git` command could not be run or reported a failure.
    #[error("git command failed: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FindError>;
