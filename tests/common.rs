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

use git2::{build::CheckoutBuilder, Repository, Signature, Time};
use git_find::repo::{format_summary, CommitSource};
use git_find::{Commit, RepoInfo};
use ratatui::{backend::TestBackend, Terminal};
use std::fs;
use tempfile::TempDir;

/// 2024-01-15 12:00:00 UTC
#[allow(dead_code)]
pub const BASE_TIME: i64 = 1_705_320_000;

/// Shared git repository fixture for integration tests.
///
/// Keeps a `git2::Repository` for low-level setup (creating commits, branches,
/// remotes) and exposes the directory so backends can be opened on it.
pub struct TestRepo {
    pub _temp_dir: TempDir,
    pub repo: Repository,
}

#[allow(dead_code)]
impl TestRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        Self {
            _temp_dir: temp_dir,
            repo,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self._temp_dir.path()
    }

    /// Commit `content` to `path` with a timestamp `seq` minutes after
    /// [`BASE_TIME`], so commit order never depends on the wall clock.
    pub fn commit_file(&self, path: &str, content: &str, message: &str, seq: i64) -> git2::Oid {
        let repo_path = self.repo.workdir().unwrap();
        let file_path = repo_path.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&file_path, content).unwrap();

        let mut index = self.repo.index().unwrap();
        index.add_path(std::path::Path::new(path)).unwrap();
        index.write().unwrap();

        let tree_oid = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_oid).unwrap();

        let sig = signature(seq);

        let parent_commit = if let Ok(head) = self.repo.head() {
            Some(self.repo.find_commit(head.target().unwrap()).unwrap())
        } else {
            None
        };

        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    pub fn create_branch(&self, name: &str, target: git2::Oid) {
        let commit = self.repo.find_commit(target).unwrap();
        self.repo.branch(name, &commit, false).unwrap();
    }

    pub fn checkout(&self, refname: &str) {
        self.repo.set_head(refname).unwrap();
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().force()))
            .unwrap();
    }

    /// Full name of the branch HEAD points at, e.g. `refs/heads/master`.
    pub fn head_ref(&self) -> String {
        self.repo.head().unwrap().name().unwrap().to_string()
    }

    /// Merge `other` into the current branch with a merge commit made
    /// `seq` minutes after [`BASE_TIME`]. The merge must not conflict.
    pub fn merge(&self, other: git2::Oid, message: &str, seq: i64) -> git2::Oid {
        let ours = self.repo.head().unwrap().peel_to_commit().unwrap();
        let theirs = self.repo.find_commit(other).unwrap();

        let mut index = self.repo.merge_commits(&ours, &theirs, None).unwrap();
        assert!(!index.has_conflicts());
        let tree_oid = index.write_tree_to(&self.repo).unwrap();
        let tree = self.repo.find_tree(tree_oid).unwrap();

        let sig = signature(seq);
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&ours, &theirs])
            .unwrap();
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().force()))
            .unwrap();
        oid
    }

    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo.remote(name, url).unwrap();
    }
}

#[allow(dead_code)]
fn signature(seq: i64) -> Signature<'static> {
    Signature::new(
        "Test User",
        "test@example.com",
        &Time::new(BASE_TIME + seq * 60, 0),
    )
    .unwrap()
}

/// Fixed in-memory history for view and controller tests.
///
/// Each entry is `(oid, message)`; commits are listed in entry order.
#[allow(dead_code)]
pub struct StaticSource {
    pub entries: Vec<(String, String)>,
}

#[allow(dead_code)]
impl StaticSource {
    pub fn new(messages: &[&str]) -> Self {
        let entries = messages
            .iter()
            .enumerate()
            .map(|(i, message)| {
                let digit = char::from_digit((i as u32 + 1) % 10, 10).unwrap();
                (digit.to_string().repeat(40), message.to_string())
            })
            .collect();
        Self { entries }
    }

    fn lookup(&self, commit: &Commit) -> git_find::Result<&str> {
        self.entries
            .iter()
            .find(|(oid, _)| *oid == commit.oid)
            .map(|(_, message)| message.as_str())
            .ok_or_else(|| git_find::FindError::Backend(format!("unknown commit {}", commit.oid)))
    }
}

impl CommitSource for StaticSource {
    fn list_commits(&self) -> git_find::Result<Vec<Commit>> {
        Ok(self.entries.iter().map(|(oid, _)| Commit::new(oid.clone())).collect())
    }

    fn message(&self, commit: &Commit) -> git_find::Result<String> {
        self.lookup(commit).map(str::to_string)
    }

    fn describe(&self, commit: &Commit) -> git_find::Result<String> {
        let subject = self.lookup(commit)?.lines().next().unwrap_or("");
        Ok(format_summary(&commit.oid, "2024-01-15", subject, "Test User"))
    }

    fn list_branches(&self, substring: &str) -> git_find::Result<Vec<String>> {
        Ok(["main"]
            .into_iter()
            .filter(|name| name.contains(substring))
            .map(str::to_string)
            .collect())
    }

    fn file_commits(&self, _path: &str) -> git_find::Result<Vec<Commit>> {
        Ok(Vec::new())
    }

    fn repo_info(&self) -> git_find::Result<RepoInfo> {
        Ok(RepoInfo {
            name: "demo".to_string(),
            branch: "main".to_string(),
            remotes: vec!["origin\thttps://example.com/demo.git".to_string()],
        })
    }
}

/// Rendered screen as text, trailing blanks removed.
#[allow(dead_code)]
pub fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|cell| cell.symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

/// Whether a `git` executable is available for the command-line backend.
#[allow(dead_code)]
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}
