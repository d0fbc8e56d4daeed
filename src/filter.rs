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

// Filter engine: capped, order-preserving commit message search

use regex::Regex;

use crate::repo::CommitSource;
use crate::{Commit, FindError, Result};

/// How a query is compared against commit messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring containment.
    Literal,
    /// Case-sensitive regular expression search.
    Regex,
}

/// A query prepared for repeated matching.
///
/// Construction does all the per-query work (lowercasing, regex compilation)
/// so a scan only pays for the per-message comparison.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Lowercased needle, compared against the lowercased message.
    Literal(String),
    Regex(Regex),
    /// Case-sensitive substring containment.
    Exact(String),
}

impl Matcher {
    /// Prepare `query` for the given mode.
    ///
    /// Fails with [`FindError::InvalidPattern`] when regex mode is requested
    /// and the query does not compile.
    pub fn new(query: &str, mode: MatchMode) -> Result<Self> {
        match mode {
            MatchMode::Literal => Ok(Matcher::Literal(query.to_lowercase())),
            MatchMode::Regex => Regex::new(query)
                .map(Matcher::Regex)
                .map_err(|source| FindError::InvalidPattern {
                    pattern: query.to_string(),
                    source,
                }),
        }
    }

    pub fn exact(needle: &str) -> Self {
        Matcher::Exact(needle.to_string())
    }

    pub fn is_match(&self, message: &str) -> bool {
        match self {
            Matcher::Literal(needle) => message.to_lowercase().contains(needle.as_str()),
            Matcher::Regex(re) => re.is_match(message),
            Matcher::Exact(needle) => message.contains(needle.as_str()),
        }
    }
}

/// Return the first `cap` commits whose message matches `query`.
///
/// See [`filter_with_progress`] for the exact semantics.
pub fn filter(
    source: &dyn CommitSource,
    commits: &[Commit],
    query: &str,
    mode: MatchMode,
    cap: usize,
) -> Result<Vec<Commit>> {
    filter_with_progress(source, commits, query, mode, cap, |_| {})
}

/// Return the first `cap` commits whose message matches `query`, calling
/// `on_scan` with the running count after each commit is examined.
///
/// Commits are examined in slice order and the result keeps that order.
/// Scanning stops at the `cap`-th match, so later commits are never read.
/// An empty literal query matches every message. The query is prepared
/// before any commit is read: an invalid regex fails without scanning.
pub fn filter_with_progress(
    source: &dyn CommitSource,
    commits: &[Commit],
    query: &str,
    mode: MatchMode,
    cap: usize,
    on_scan: impl FnMut(usize),
) -> Result<Vec<Commit>> {
    let matcher = Matcher::new(query, mode)?;
    scan(source, commits, &matcher, cap, on_scan)
}

/// Run a prepared matcher over `commits`, fetching each message lazily.
pub fn scan(
    source: &dyn CommitSource,
    commits: &[Commit],
    matcher: &Matcher,
    cap: usize,
    mut on_scan: impl FnMut(usize),
) -> Result<Vec<Commit>> {
    let mut matches = Vec::new();
    if cap == 0 {
        return Ok(matches);
    }

    for (index, commit) in commits.iter().enumerate() {
        let message = source.message(commit)?;
        on_scan(index + 1);

        if matcher.is_match(&message) {
            matches.push(commit.clone());
            if matches.len() >= cap {
                break;
            }
        }
    }

    Ok(matches)
}

/// Commits whose message contains `needle` exactly (case-sensitive).
pub fn substring_commits(
    source: &dyn CommitSource,
    commits: &[Commit],
    needle: &str,
    cap: usize,
) -> Result<Vec<Commit>> {
    scan(source, commits, &Matcher::exact(needle), cap, |_| {})
}

/// The first `cap` commits, unfiltered.
pub fn first_commits(commits: &[Commit], cap: usize) -> Vec<Commit> {
    commits.iter().take(cap).cloned().collect()
}
