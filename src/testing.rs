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

// In-memory commit source for unit tests

use std::cell::Cell;

use crate::repo::CommitSource;
use crate::{Commit, FindError, RepoInfo, Result};

/// History held in memory. Commit oids are "c1", "c2", ... in list order.
pub struct MemorySource {
    messages: Vec<String>,
    reads: Cell<usize>,
    broken: Option<String>,
}

impl MemorySource {
    pub fn new(messages: &[&str]) -> Self {
        Self {
            messages: messages.iter().map(|m| m.to_string()).collect(),
            reads: Cell::new(0),
            broken: None,
        }
    }

    /// Make reading the message of `oid` fail with a backend error.
    pub fn with_broken_commit(mut self, oid: &str) -> Self {
        self.broken = Some(oid.to_string());
        self
    }

    pub fn commits(&self) -> Vec<Commit> {
        (1..=self.messages.len())
            .map(|i| Commit::new(format!("c{}", i)))
            .collect()
    }

    /// Number of message bodies fetched so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    fn index(commit: &Commit) -> usize {
        commit.oid[1..].parse::<usize>().unwrap() - 1
    }
}

impl CommitSource for MemorySource {
    fn list_commits(&self) -> Result<Vec<Commit>> {
        Ok(self.commits())
    }

    fn message(&self, commit: &Commit) -> Result<String> {
        if self.broken.as_deref() == Some(commit.oid.as_str()) {
            return Err(FindError::Backend(format!("bad object {}", commit.oid)));
        }
        self.reads.set(self.reads.get() + 1);
        Ok(self.messages[Self::index(commit)].clone())
    }

    fn describe(&self, commit: &Commit) -> Result<String> {
        let message = &self.messages[Self::index(commit)];
        Ok(format!("{} {}", commit.oid, message))
    }

    fn list_branches(&self, substring: &str) -> Result<Vec<String>> {
        Ok(["main", "feature/search"]
            .into_iter()
            .filter(|name| name.contains(substring))
            .map(str::to_string)
            .collect())
    }

    fn file_commits(&self, _path: &str) -> Result<Vec<Commit>> {
        Ok(Vec::new())
    }

    fn repo_info(&self) -> Result<RepoInfo> {
        Ok(RepoInfo {
            name: "demo".to_string(),
            branch: "main".to_string(),
            remotes: vec!["origin\thttps://example.com/demo.git".to_string()],
        })
    }
}
