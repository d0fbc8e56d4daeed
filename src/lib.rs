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

// Core library for gitfind

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod filter;
pub mod logging;
pub mod repo;
pub mod terminal;
pub mod views;

#[cfg(test)]
mod testing;

pub use error::{FindError, Result};

/// Opaque handle to a commit in the repository history.
///
/// Only the object id is held. Author, date, subject and message are
/// resolved on demand through a [`repo::CommitSource`], so scanning a long
/// history never loads message bodies that are not inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Commit {
    pub oid: String,
}

impl Commit {
    pub fn new(oid: impl Into<String>) -> Self {
        Self { oid: oid.into() }
    }
}

/// Repository metadata shown in the interactive header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoInfo {
    /// Basename of the working directory.
    pub name: String,
    /// Current branch, or `HEAD` when detached.
    pub branch: String,
    /// One `name<TAB>url` entry per configured remote.
    pub remotes: Vec<String>,
}
