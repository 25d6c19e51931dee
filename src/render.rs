//! Terminal rendering for a path field
//!
//! Draws the bordered input (with ghost text), the validation line under it,
//! and the suggestion dropdown as an overlay. Returns where things landed so
//! the host can route mouse events back to the field.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::completion::split_row;
use crate::field::{FieldError, PathField};
use crate::widgets::popup;

/// Rows taken by one field: bordered input plus the message line
pub const FIELD_HEIGHT: u16 = 4;

const INPUT_HEIGHT: u16 = 3;
const DROPDOWN_BORDER_HEIGHT: u16 = 2;
const DROPDOWN_PADDING: u16 = 4;
const MIN_DROPDOWN_WIDTH: u16 = 20;

/// Screen regions of a rendered field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldLayout {
    pub input: Rect,
    pub dropdown: Option<Rect>,
    /// Index of the first dropdown row in the filtered list
    pub first_row: usize,
}

impl FieldLayout {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let position = Position::new(column, row);
        self.input.contains(position) || self.dropdown.is_some_and(|d| d.contains(position))
    }

    /// Filtered-suggestion index under the pointer, if it is over a dropdown row
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let dropdown = self.dropdown?;
        let inner = dropdown.inner(ratatui::layout::Margin::new(1, 1));
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        Some(self.first_row + (row - inner.y) as usize)
    }
}

/// Draw the input and message line into `area`. The dropdown is not drawn
/// here; call `render_dropdown` after every field so it overlays its siblings.
pub fn render_field(frame: &mut Frame, area: Rect, label: &str, field: &PathField) -> FieldLayout {
    let input = Rect {
        height: INPUT_HEIGHT.min(area.height),
        ..area
    };

    let border_color = if field.is_focused() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let title = Line::from(vec![
        Span::raw(format!(" {} ", label)),
        status_span(field),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color));

    let mut spans = vec![Span::styled(
        field.raw_value().to_string(),
        Style::default().fg(Color::White),
    )];
    if field.ghost_visible() {
        spans.push(Span::styled(
            field.inline_completion().to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input);

    if field.is_focused() {
        let cursor_x = input.x + 1 + field.raw_value().width() as u16;
        frame.set_cursor_position(Position::new(
            cursor_x.min(input.right().saturating_sub(2)),
            input.y + 1,
        ));
    }

    if area.height > INPUT_HEIGHT
        && let Some(message) = message_line(field)
    {
        let message_area = Rect {
            y: input.bottom(),
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(message), message_area);
    }

    FieldLayout {
        input,
        dropdown: None,
        first_row: 0,
    }
}

fn status_span(field: &PathField) -> Span<'static> {
    if field.is_validating() {
        Span::styled("… ", Style::default().fg(Color::Yellow))
    } else if field.is_valid() {
        Span::styled("✓ ", Style::default().fg(Color::Green))
    } else if field.error().is_some() {
        Span::styled("✗ ", Style::default().fg(Color::Red))
    } else {
        Span::raw("")
    }
}

fn message_line(field: &PathField) -> Option<Line<'static>> {
    let error = field.error()?;
    let style = match error {
        FieldError::Rejected(_) => Style::default().fg(Color::Red),
        FieldError::Unreachable => Style::default().fg(Color::Yellow),
    };
    Some(Line::from(Span::styled(format!(" {}", error), style)))
}

/// Overlay the dropdown under the field's input, if it is showing.
/// Updates `layout` with the dropdown's rect for hit testing.
pub fn render_dropdown(frame: &mut Frame, field: &PathField, layout: &mut FieldLayout) {
    layout.dropdown = None;
    if !field.dropdown_visible() {
        return;
    }

    let (first_row, rows) = field.visible_rows();
    if rows.is_empty() {
        return;
    }
    let separator = field.options().separator;
    let selected = field.selected_index();

    let content_width = rows.iter().map(|row| row.width()).max().unwrap_or(0);
    let width = u16::try_from(content_width)
        .unwrap_or(u16::MAX)
        .saturating_add(DROPDOWN_PADDING)
        .max(MIN_DROPDOWN_WIDTH)
        .min(layout.input.width);
    let height = rows.len() as u16 + DROPDOWN_BORDER_HEIGHT;
    let area = popup::popup_below_anchor(layout.input, width, height, frame.area());
    if area.height <= DROPDOWN_BORDER_HEIGHT {
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(offset, suggestion)| {
            let parts = split_row(field.raw_value(), suggestion, separator);
            let line = if selected == Some(first_row + offset) {
                Line::from(vec![
                    Span::styled(
                        format!("► {}", parts.typed),
                        Style::default().fg(Color::Black).bg(Color::Cyan),
                    ),
                    Span::styled(
                        parts.remaining,
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("  {}", parts.typed),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        parts.remaining,
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            };
            ListItem::new(line)
        })
        .collect();

    popup::clear_area(frame, area);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(list, area);

    layout.dropdown = Some(area);
    layout.first_row = first_row;
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
