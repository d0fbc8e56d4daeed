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

// Interactive search session state

use crate::config::SessionConfig;
use crate::filter;
use crate::repo::CommitSource;
use crate::{Commit, Result};

/// A matched commit together with its display line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub commit: Commit,
    pub line: String,
}

/// Outcome of the most recent refresh, shown on the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Query below the minimum length: first commits shown as-is.
    Unfiltered,
    Matched { matches: usize, scanned: usize },
    /// The query failed (bad pattern, unreadable commit). Previous results
    /// stay on screen.
    Rejected(String),
}

/// Application state for the interactive search view.
///
/// The configuration is fixed at construction; only the query, results and
/// status change while the session runs.
pub struct AppState {
    config: SessionConfig,
    query: String,
    pub results: Vec<ResultEntry>,
    pub status: Status,
}

impl AppState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            query: String::new(),
            results: Vec::new(),
            status: Status::Unfiltered,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn append_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character. No-op on an empty query.
    pub fn backspace(&mut self) {
        self.query.pop();
    }

    /// Replace the results with the first `cap` commits, unfiltered.
    pub fn show_unfiltered(&mut self, source: &dyn CommitSource, commits: &[Commit]) {
        let first = filter::first_commits(commits, self.config.cap);
        match describe_all(source, first) {
            Ok(entries) => {
                self.results = entries;
                self.status = Status::Unfiltered;
            }
            Err(err) => self.reject(err.to_string()),
        }
    }

    /// Recompute the results for the current query.
    ///
    /// Filters when the query has reached the minimum length, otherwise
    /// shows the first commits unfiltered. Failures never propagate: they
    /// become a [`Status::Rejected`] message and the previous results stay.
    pub fn refresh_results(&mut self, source: &dyn CommitSource, commits: &[Commit]) {
        if self.query.chars().count() < self.config.min_chars {
            self.show_unfiltered(source, commits);
            return;
        }

        let mut scanned = 0;
        let found = filter::filter_with_progress(
            source,
            commits,
            &self.query,
            self.config.mode,
            self.config.cap,
            |n| scanned = n,
        )
        .and_then(|found| describe_all(source, found));

        match found {
            Ok(entries) => {
                tracing::debug!(query = %self.query, matches = entries.len(), scanned, "filtered");
                self.status = Status::Matched {
                    matches: entries.len(),
                    scanned,
                };
                self.results = entries;
            }
            Err(err) => self.reject(err.to_string()),
        }
    }

    fn reject(&mut self, message: String) {
        tracing::warn!(query = %self.query, error = %message, "query rejected");
        self.status = Status::Rejected(message);
    }
}

fn describe_all(source: &dyn CommitSource, commits: Vec<Commit>) -> Result<Vec<ResultEntry>> {
    commits
        .into_iter()
        .map(|commit| {
            let line = source.describe(&commit)?;
            Ok(ResultEntry { commit, line })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MatchMode;
    use crate::testing::MemorySource;

    const MESSAGES: [&str; 5] = ["fix bug", "add feature", "Fix typo", "refactor", "FIX crash"];

    fn state(mode: MatchMode, cap: usize, min_chars: usize) -> AppState {
        AppState::new(SessionConfig {
            mode,
            cap,
            min_chars,
            ..SessionConfig::default()
        })
    }

    fn result_oids(app: &AppState) -> Vec<&str> {
        app.results.iter().map(|r| r.commit.oid.as_str()).collect()
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.append_char(c);
        }
    }

    #[test]
    fn test_backspace_on_empty_query_is_noop() {
        let mut app = state(MatchMode::Literal, 10, 0);
        app.backspace();
        assert_eq!(app.query(), "");
        app.append_char('a');
        app.append_char('é');
        app.backspace();
        assert_eq!(app.query(), "a");
    }

    #[test]
    fn test_initial_results_are_first_cap_commits() {
        let source = MemorySource::new(&MESSAGES);
        let mut app = state(MatchMode::Literal, 2, 0);
        app.show_unfiltered(&source, &source.commits());

        assert_eq!(result_oids(&app), vec!["c1", "c2"]);
        assert_eq!(app.results[0].line, "c1 fix bug");
        assert_eq!(app.status, Status::Unfiltered);
        assert_eq!(source.reads(), 0);
    }

    #[test]
    fn test_refresh_filters_current_query() {
        let source = MemorySource::new(&MESSAGES);
        let mut app = state(MatchMode::Literal, 10, 0);
        type_str(&mut app, "fix");
        app.refresh_results(&source, &source.commits());

        assert_eq!(result_oids(&app), vec!["c1", "c3", "c5"]);
        assert_eq!(
            app.status,
            Status::Matched {
                matches: 3,
                scanned: 5
            }
        );
    }

    #[test]
    fn test_below_threshold_shows_unfiltered() {
        let source = MemorySource::new(&MESSAGES);
        let mut app = state(MatchMode::Literal, 3, 3);
        type_str(&mut app, "re");
        app.refresh_results(&source, &source.commits());

        assert_eq!(result_oids(&app), vec!["c1", "c2", "c3"]);
        assert_eq!(app.status, Status::Unfiltered);

        app.append_char('f');
        app.refresh_results(&source, &source.commits());
        assert_eq!(result_oids(&app), vec!["c4"]);
    }

    #[test]
    fn test_threshold_counts_characters_not_bytes() {
        let source = MemorySource::new(&["résumé update"]);
        let mut app = state(MatchMode::Literal, 3, 2);
        app.append_char('é');
        app.refresh_results(&source, &source.commits());
        assert_eq!(app.status, Status::Unfiltered);
    }

    #[test]
    fn test_invalid_pattern_keeps_previous_results() {
        let source = MemorySource::new(&MESSAGES);
        let mut app = state(MatchMode::Regex, 10, 0);
        type_str(&mut app, "fix");
        app.refresh_results(&source, &source.commits());
        assert_eq!(result_oids(&app), vec!["c1"]);

        app.append_char('(');
        app.refresh_results(&source, &source.commits());

        assert_eq!(result_oids(&app), vec!["c1"]);
        match &app.status {
            Status::Rejected(msg) => assert!(msg.contains("fix(")),
            other => panic!("expected rejection, got {:?}", other),
        }

        app.backspace();
        app.refresh_results(&source, &source.commits());
        assert!(matches!(app.status, Status::Matched { matches: 1, .. }));
    }

    #[test]
    fn test_backend_failure_is_absorbed() {
        let source = MemorySource::new(&MESSAGES).with_broken_commit("c2");
        let mut app = state(MatchMode::Literal, 10, 0);
        app.append_char('x');
        app.refresh_results(&source, &source.commits());

        assert!(app.results.is_empty());
        assert!(matches!(app.status, Status::Rejected(ref msg) if msg.contains("c2")));
    }
}
