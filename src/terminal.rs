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

// Terminal session setup and teardown

use anyhow::Result;

/// Run `body` between `setup` and `restore`.
///
/// `restore` runs whenever `setup` was attempted, including when `setup`
/// fails partway (raw mode on, alternate screen not entered) or `body`
/// fails. The first error wins: setup, then body, then restore.
pub fn with_restore<T>(
    setup: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = setup().and_then(|()| body());
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}
