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

// Search view: repository header, query line and result list

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::app::{AppState, Status};
use crate::filter::MatchMode;
use crate::RepoInfo;

const PROMPT_STYLE: Style = Style::new().fg(Color::Yellow);
const STATUS_STYLE: Style = Style::new().fg(Color::DarkGray);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);

/// Visible terminal area, read from the frame on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub rows: u16,
    pub columns: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Prompt,
    Query,
    Status,
    Error,
    Result,
}

/// One painted line at a fixed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub row: u16,
    pub kind: LineKind,
    pub text: String,
}

/// Everything one repaint draws, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub lines: Vec<LayoutLine>,
    /// Row where the result list starts.
    pub header_rows: u16,
}

/// Assigns consecutive rows while a layout is being built.
struct RowCursor {
    row: u16,
    lines: Vec<LayoutLine>,
}

impl RowCursor {
    fn push(&mut self, kind: LineKind, text: String) {
        self.lines.push(LayoutLine {
            row: self.row,
            kind,
            text,
        });
        self.row = self.row.saturating_add(1);
    }

    fn skip(&mut self) {
        self.row = self.row.saturating_add(1);
    }
}

/// Compute the screen layout for the current state.
///
/// Every line is cut to `columns - 1` characters. Results fill the rows
/// below the header; any that do not fit are left out even when the result
/// set holds more. Lines that would fall below the last row are dropped.
pub fn layout(app: &AppState, info: &RepoInfo, geometry: Geometry) -> ScreenLayout {
    let config = app.config();
    let mut cursor = RowCursor {
        row: 0,
        lines: Vec::new(),
    };

    cursor.push(LineKind::Header, format!("Repository: {}", info.name));
    cursor.push(LineKind::Header, format!("Current Branch: {}", info.branch));
    cursor.push(LineKind::Header, "Remote URLs:".to_string());
    if info.remotes.is_empty() {
        cursor.push(LineKind::Header, "  (none)".to_string());
    }
    for remote in &info.remotes {
        cursor.push(LineKind::Header, format!("  {}", remote.replace('\t', " ")));
    }
    cursor.skip();
    cursor.push(
        LineKind::Header,
        format!("Min Char Length: {}", config.min_chars),
    );
    cursor.push(LineKind::Header, format!("Num Commits: {}", config.cap));
    cursor.push(LineKind::Header, format!("Sort Order: {}", config.sort.order));
    cursor.push(
        LineKind::Header,
        format!("Sort Direction: {}", config.sort.direction),
    );
    cursor.push(
        LineKind::Header,
        format!("Regex Mode: {}", config.mode == MatchMode::Regex),
    );
    cursor.skip();
    cursor.push(LineKind::Prompt, "Enter search term (Ctrl+C to exit):".to_string());
    cursor.push(LineKind::Query, app.query().to_string());
    match &app.status {
        Status::Unfiltered => cursor.push(
            LineKind::Status,
            format!("Showing the first {} commits", app.results.len()),
        ),
        Status::Matched { matches, scanned } => cursor.push(
            LineKind::Status,
            format!("{} matching commits ({} scanned)", matches, scanned),
        ),
        Status::Rejected(message) => cursor.push(LineKind::Error, message.clone()),
    }

    let header_rows = cursor.row;
    let visible = geometry.rows.saturating_sub(header_rows) as usize;
    for entry in app.results.iter().take(visible) {
        cursor.push(LineKind::Result, entry.line.clone());
    }

    let max_chars = geometry.columns.saturating_sub(1) as usize;
    let lines = cursor
        .lines
        .into_iter()
        .filter(|line| line.row < geometry.rows)
        .map(|line| LayoutLine {
            text: line.text.chars().take(max_chars).collect(),
            ..line
        })
        .collect();

    ScreenLayout { lines, header_rows }
}

/// Render the search view, repainting the whole frame.
pub fn render(app: &AppState, info: &RepoInfo, frame: &mut Frame) {
    let area = frame.area();
    let geometry = Geometry {
        rows: area.height,
        columns: area.width,
    };
    let screen = layout(app, info, geometry);

    frame.render_widget(Clear, area);
    for line in &screen.lines {
        let line_area = Rect {
            x: area.x,
            y: area.y + line.row,
            width: area.width,
            height: 1,
        };
        let style = match line.kind {
            LineKind::Prompt => PROMPT_STYLE,
            LineKind::Status => STATUS_STYLE,
            LineKind::Error => ERROR_STYLE,
            LineKind::Header | LineKind::Query | LineKind::Result => Style::default(),
        };
        frame.render_widget(Paragraph::new(line.text.as_str()).style(style), line_area);
    }
}
