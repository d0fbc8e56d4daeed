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

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Commit, FindError, RepoInfo, Result};

use super::{format_summary, CommitSource};

/// Separates fields in custom `--format` output.
const FIELD_SEP: char = '\x1f';

/// Repository accessed by running the `git` executable.
///
/// Used when libgit2 is not compiled in or `--backend cli` is requested.
/// Every query spawns one `git` process in the repository root.
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Locate the repository containing `path` via `git rev-parse`.
    pub fn open(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| {
                FindError::Backend(format!(
                    "failed to execute git: {}. Is git installed and in PATH?",
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(FindError::Repository(path.display().to_string()));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self {
            root: PathBuf::from(root),
        })
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(?args, "running git");
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.root).args(args);
        run_git(&mut cmd)
    }
}

fn run_git(cmd: &mut Command) -> Result<String> {
    let output = cmd.output().map_err(|e| {
        FindError::Backend(format!(
            "failed to execute git: {}. Is git installed and in PATH?",
            e
        ))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FindError::Backend(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn parse_oids(output: &str) -> Vec<Commit> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Commit::new)
        .collect()
}

/// Turn `git remote -v` output into `name<TAB>url` entries, one per remote.
fn parse_remotes(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_suffix(" (fetch)"))
        .map(str::to_string)
        .collect()
}

impl CommitSource for GitCli {
    fn list_commits(&self) -> Result<Vec<Commit>> {
        let output = self.git(&["log", "--all", "--date-order", "--format=%H"])?;
        let commits = parse_oids(&output);
        tracing::debug!(count = commits.len(), "listed commits");
        Ok(commits)
    }

    fn message(&self, commit: &Commit) -> Result<String> {
        self.git(&["log", "-1", "--format=%B", &commit.oid])
    }

    fn describe(&self, commit: &Commit) -> Result<String> {
        let output = self.git(&[
            "show",
            "-s",
            "--date=short",
            "--format=%cd%x1f%s%x1f%an",
            &commit.oid,
        ])?;
        let mut fields = output.trim_end_matches('\n').splitn(3, FIELD_SEP);
        let date = fields.next().unwrap_or("");
        let subject = fields.next().unwrap_or("");
        let author = fields.next().unwrap_or("");
        Ok(format_summary(&commit.oid, date, subject, author))
    }

    fn list_branches(&self, substring: &str) -> Result<Vec<String>> {
        // Local branches only, no detached HEAD entry
        let output = self.git(&["for-each-ref", "--format=%(refname:short)", "refs/heads/"])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty() && name.contains(substring))
            .map(str::to_string)
            .collect())
    }

    fn file_commits(&self, path: &str) -> Result<Vec<Commit>> {
        let output = self.git(&["log", "--all", "--date-order", "--format=%H", "--", path])?;
        Ok(parse_oids(&output))
    }

    fn repo_info(&self) -> Result<RepoInfo> {
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Fails on an unborn branch; report it like a detached HEAD
        let branch = self
            .git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .map(|out| out.trim().to_string())
            .unwrap_or_else(|_| "HEAD".to_string());

        let remotes = parse_remotes(&self.git(&["remote", "-v"])?);

        Ok(RepoInfo {
            name,
            branch,
            remotes,
        })
    }
}
