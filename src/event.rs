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

// Event handling for terminal input

use std::collections::VecDeque;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Input events the search loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable character to append to the query.
    Char(char),
    Backspace,
    /// Ctrl+C. Raw mode swallows SIGINT, so the interrupt arrives as a key.
    Interrupt,
    /// Anything else (resize, mouse, navigation keys). Triggers a repaint.
    Other,
}

/// Source of input events for the search loop.
pub trait InputSource {
    /// Block until the next event. `None` means the input is exhausted.
    fn next_event(&mut self) -> Result<Option<InputEvent>>;
}

/// Reads key presses from the terminal via crossterm.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(Some(parse_key_event(event::read()?)))
    }
}

/// Replays a fixed sequence of events, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// One `Char` event per character of `text`.
    pub fn typing(text: &str) -> Self {
        Self::new(text.chars().map(InputEvent::Char))
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}

/// Parse a terminal event into an input event.
pub fn parse_key_event(event: Event) -> InputEvent {
    // To work in Windows, only care about key presses
    if let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    {
        return match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                InputEvent::Interrupt
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Char(c),
            KeyCode::Backspace => InputEvent::Backspace,
            _ => InputEvent::Other,
        };
    }
    InputEvent::Other
}
