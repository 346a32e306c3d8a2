//! Search input: a stateless field plus key-to-edit translation.
//!
//! The widget renders only what it is given. Edits are computed by [`edit`]
//! and handed back to the caller, which owns the value and the cursor.

use crate::tui::colors;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

/// Loading indicator frames
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Columns before the text starts: border + leading space
const TEXT_OFFSET: u16 = 2;

pub struct Input<'a> {
    pub value: &'a str,
    pub is_loading: bool,
    pub placeholder: &'a str,
    pub spinner_frame: usize,
}

impl Widget for Input<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::ACCENT))
            .title(" Search ");
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.value.is_empty() {
            Line::from(Span::styled(
                format!(" {}", self.placeholder),
                Style::default().fg(colors::MUTED),
            ))
        } else {
            Line::from(Span::styled(
                format!(" {}", self.value),
                Style::default().fg(colors::TEXT),
            ))
        };

        let reserved = if self.is_loading { 2 } else { 0 };
        let text_area = Rect {
            width: inner.width.saturating_sub(reserved),
            ..inner
        };
        Paragraph::new(line).render(text_area, buf);

        if self.is_loading && inner.width >= 2 && inner.height >= 1 {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            buf.set_string(
                inner.right() - 2,
                inner.y,
                glyph,
                Style::default().fg(colors::ACCENT),
            );
        }
    }
}

/// Terminal cursor position for byte offset `cursor` within `value`
pub fn cursor_position(area: Rect, value: &str, cursor: usize) -> Position {
    let before = value.get(..cursor).unwrap_or(value);
    let x = area.x + TEXT_OFFSET + before.width() as u16;
    let max_x = area.right().saturating_sub(2);
    Position::new(x.min(max_x), area.y + 1)
}

fn prev_boundary(value: &str, cursor: usize) -> usize {
    value[..cursor]
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_boundary(value: &str, cursor: usize) -> usize {
    value[cursor..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| cursor + i)
        .unwrap_or(value.len())
}

/// Apply an editing key. Moves `cursor` and returns the new value when the
/// text changed; `None` means the key was not an edit (or changed nothing).
pub fn edit(value: &str, cursor: &mut usize, key: KeyEvent) -> Option<String> {
    *cursor = (*cursor).min(value.len());
    while !value.is_char_boundary(*cursor) {
        *cursor -= 1;
    }

    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            *cursor = 0;
            (!value.is_empty()).then(String::new)
        }
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(c) => {
            let mut next = value.to_string();
            next.insert(*cursor, c);
            *cursor += c.len_utf8();
            Some(next)
        }
        KeyCode::Backspace => {
            if *cursor == 0 {
                return None;
            }
            let prev = prev_boundary(value, *cursor);
            let mut next = value.to_string();
            next.remove(prev);
            *cursor = prev;
            Some(next)
        }
        KeyCode::Delete => {
            if *cursor >= value.len() {
                return None;
            }
            let mut next = value.to_string();
            next.remove(*cursor);
            Some(next)
        }
        KeyCode::Left => {
            if *cursor > 0 {
                *cursor = prev_boundary(value, *cursor);
            }
            None
        }
        KeyCode::Right => {
            if *cursor < value.len() {
                *cursor = next_boundary(value, *cursor);
            }
            None
        }
        KeyCode::Home => {
            *cursor = 0;
            None
        }
        KeyCode::End => {
            *cursor = value.len();
            None
        }
        _ => None,
    }
}
