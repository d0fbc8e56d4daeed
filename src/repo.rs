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

// Repository access

mod cli_impl;
#[cfg(feature = "libgit2")]
mod git2_impl;

use std::path::Path;

pub use cli_impl::GitCli;
#[cfg(feature = "libgit2")]
pub use git2_impl::Git2Repo;

use crate::config::Backend;
use crate::{Commit, RepoInfo, Result};

/// Number of hex characters shown for a commit id.
pub const SHORT_ID_LENGTH: usize = 7;

/// Read-only view of a repository's history.
///
/// Everything above this trait (filtering, session state, rendering) works
/// against `dyn CommitSource` and never learns which backend is active.
pub trait CommitSource {
    /// All commits reachable from any ref or HEAD, newest first.
    fn list_commits(&self) -> Result<Vec<Commit>>;

    /// Full raw commit message. Fetched on every call, never cached.
    fn message(&self, commit: &Commit) -> Result<String>;

    /// One-line summary: `<short-id> <date> | <subject> [<author>]`.
    fn describe(&self, commit: &Commit) -> Result<String>;

    /// Local branch names containing `substring`. No match is an empty list.
    fn list_branches(&self, substring: &str) -> Result<Vec<String>>;

    /// Commits whose change touches `path`, in the same order as
    /// [`list_commits`](CommitSource::list_commits).
    fn file_commits(&self, path: &str) -> Result<Vec<Commit>>;

    fn repo_info(&self) -> Result<RepoInfo>;
}

/// Open the repository containing `path` with the requested backend.
///
/// `Backend::Auto` prefers libgit2 when compiled in and falls back to the
/// `git` executable otherwise. The choice is made once here.
pub fn open(path: &Path, backend: Backend) -> Result<Box<dyn CommitSource>> {
    let source = match backend {
        Backend::Cli => open_cli(path)?,
        Backend::Libgit2 => open_libgit2(path)?,
        Backend::Auto if cfg!(feature = "libgit2") => open_libgit2(path)?,
        Backend::Auto => open_cli(path)?,
    };
    Ok(source)
}

fn open_cli(path: &Path) -> Result<Box<dyn CommitSource>> {
    tracing::debug!(path = %path.display(), "using git command-line backend");
    Ok(Box::new(GitCli::open(path)?))
}

#[cfg(feature = "libgit2")]
fn open_libgit2(path: &Path) -> Result<Box<dyn CommitSource>> {
    tracing::debug!(path = %path.display(), "using libgit2 backend");
    Ok(Box::new(Git2Repo::open(path.to_path_buf())?))
}

#[cfg(not(feature = "libgit2"))]
fn open_libgit2(_path: &Path) -> Result<Box<dyn CommitSource>> {
    Err(crate::FindError::Backend(
        "gitfind was built without libgit2 support".to_string(),
    ))
}

/// Format the one-line commit summary shared by all backends.
pub fn format_summary(oid: &str, date: &str, subject: &str, author: &str) -> String {
    let short_id: String = oid.chars().take(SHORT_ID_LENGTH).collect();
    format!("{} {} | {} [{}]", short_id, date, subject, author)
}
