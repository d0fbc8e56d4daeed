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

use std::collections::HashSet;

use crate::{Commit, FindError, RepoInfo, Result};

use super::{format_summary, CommitSource};

/// Concrete git repository backed by `libgit2` via the `git2` crate.
///
/// Construct with [`Git2Repo::open`]; then use through the [`CommitSource`] trait.
pub struct Git2Repo {
    inner: git2::Repository,
}

impl Git2Repo {
    /// Try to open a git repository by iteratively trying the given path and
    /// its parents until a repository root is found.
    pub fn open(mut path: std::path::PathBuf) -> Result<Self> {
        let start = path.display().to_string();
        loop {
            if let Ok(repo) = git2::Repository::open(&path) {
                return Ok(Git2Repo { inner: repo });
            }
            if !path.pop() {
                return Err(FindError::Repository(start));
            }
        }
    }

    fn find(&self, commit: &Commit) -> Result<git2::Commit<'_>> {
        let oid = git2::Oid::from_str(&commit.oid)?;
        Ok(self.inner.find_commit(oid)?)
    }

    /// Revwalk over every ref plus HEAD, newest commit first.
    fn walk_all(&self) -> Result<git2::Revwalk<'_>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push_glob("*")?;
        // Unborn HEAD in an empty repository has no target
        if let Some(head_oid) = self.inner.head().ok().and_then(|h| h.target()) {
            revwalk.push(head_oid)?;
        }
        Ok(revwalk)
    }

    /// Commits from every ref and HEAD that change `path`, with git's default
    /// history simplification.
    ///
    /// A commit whose `path` matches one of its parents is left out and only
    /// that parent is followed. Merges that differ from every parent are kept
    /// and all parents are followed. Root commits are kept when they add the
    /// path.
    fn simplified_history(&self, path: &str) -> Result<HashSet<git2::Oid>> {
        let mut opts = git2::DiffOptions::new();
        opts.pathspec(path);

        let mut pending = Vec::new();
        for reference in self.inner.references()? {
            if let Ok(commit) = reference?.peel_to_commit() {
                pending.push(commit.id());
            }
        }
        if let Some(head_oid) = self.inner.head().ok().and_then(|h| h.target()) {
            pending.push(head_oid);
        }

        let mut seen = HashSet::new();
        let mut touching = HashSet::new();
        while let Some(oid) = pending.pop() {
            if !seen.insert(oid) {
                continue;
            }
            let commit = self.inner.find_commit(oid)?;
            let tree = commit.tree()?;

            if commit.parent_count() == 0 {
                if self.changes_path(None, &tree, &mut opts)? {
                    touching.insert(oid);
                }
                continue;
            }

            let mut same_as = None;
            for parent in commit.parents() {
                if !self.changes_path(Some(&parent.tree()?), &tree, &mut opts)? {
                    same_as = Some(parent.id());
                    break;
                }
            }
            match same_as {
                Some(parent) => pending.push(parent),
                None => {
                    touching.insert(oid);
                    pending.extend(commit.parent_ids());
                }
            }
        }
        Ok(touching)
    }

    fn changes_path(
        &self,
        old: Option<&git2::Tree<'_>>,
        new: &git2::Tree<'_>,
        opts: &mut git2::DiffOptions,
    ) -> Result<bool> {
        let diff = self.inner.diff_tree_to_tree(old, Some(new), Some(opts))?;
        Ok(diff.deltas().len() > 0)
    }
}

impl CommitSource for Git2Repo {
    fn list_commits(&self) -> Result<Vec<Commit>> {
        let commits = self
            .walk_all()?
            .map(|oid| -> Result<Commit> { Ok(Commit::new(oid?.to_string())) })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = commits.len(), "listed commits");
        Ok(commits)
    }

    fn message(&self, commit: &Commit) -> Result<String> {
        let found = self.find(commit)?;
        Ok(String::from_utf8_lossy(found.message_bytes()).into_owned())
    }

    fn describe(&self, commit: &Commit) -> Result<String> {
        let found = self.find(commit)?;
        let author = found.author();
        Ok(format_summary(
            &commit.oid,
            &format_date(found.time()),
            found.summary().unwrap_or(""),
            author.name().unwrap_or(""),
        ))
    }

    fn list_branches(&self, substring: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.inner.branches(Some(git2::BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                if name.contains(substring) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn file_commits(&self, path: &str) -> Result<Vec<Commit>> {
        let touching = self.simplified_history(path)?;

        let mut commits = Vec::new();
        for oid_result in self.walk_all()? {
            let oid = oid_result?;
            if touching.contains(&oid) {
                commits.push(Commit::new(oid.to_string()));
            }
        }
        tracing::debug!(path, count = commits.len(), "listed file commits");
        Ok(commits)
    }

    fn repo_info(&self) -> Result<RepoInfo> {
        let root = self.inner.workdir().unwrap_or_else(|| self.inner.path());
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let branch = match self.inner.head() {
            Ok(head) if head.is_branch() => head.shorthand().unwrap_or("HEAD").to_string(),
            _ => "HEAD".to_string(),
        };

        let mut remotes = Vec::new();
        for remote_name in self.inner.remotes()?.iter().flatten() {
            let remote = self.inner.find_remote(remote_name)?;
            remotes.push(format!("{}\t{}", remote_name, remote.url().unwrap_or("")));
        }

        Ok(RepoInfo {
            name,
            branch,
            remotes,
        })
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn git_time_to_offset_datetime(git_time: git2::Time) -> time::OffsetDateTime {
    let offset_seconds = git_time.offset_minutes() * 60;
    let utc_offset =
        time::UtcOffset::from_whole_seconds(offset_seconds).unwrap_or(time::UtcOffset::UTC);

    time::OffsetDateTime::from_unix_timestamp(git_time.seconds())
        .unwrap_or(time::OffsetDateTime::UNIX_EPOCH)
        .to_offset(utc_offset)
}

/// Committer date as `YYYY-MM-DD` in the committer's own timezone.
fn format_date(git_time: git2::Time) -> String {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    git_time_to_offset_datetime(git_time)
        .format(format)
        .unwrap_or_default()
}
