use crate::tui::app::App;
use crate::tui::colors;
use crate::tui::input::{cursor_position, Input};
use crate::tui::results::ResultList;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const KEY_HELP: &str = " \u{2191}\u{2193}:Select  Enter:Open thumbnail  Esc:Clear/Quit  Ctrl+Q:Quit ";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    frame.render_widget(
        Input {
            value: app.controller.query(),
            is_loading: app.controller.is_loading(),
            placeholder: &app.placeholder,
            spinner_frame: app.spinner_frame,
        },
        chunks[0],
    );

    app.selection.set_viewport(chunks[1].height);

    // Results only when there is something to show
    if !app.controller.results().is_empty() {
        frame.render_widget(
            ResultList {
                query: app.controller.query(),
                products: app.controller.results(),
                selected: app.selection.selected,
                scroll_offset: app.selection.scroll_offset,
            },
            chunks[1],
        );
    }

    draw_status_bar(frame, app, chunks[2]);

    frame.set_cursor_position(cursor_position(
        chunks[0],
        app.controller.query(),
        app.cursor_pos,
    ));
}

pub fn status_text(app: &App) -> String {
    let controller = &app.controller;
    let count = controller.results().len();

    if controller.is_loading() {
        " Searching...".to_string()
    } else if count > 0 {
        match controller.total() {
            Some(total) if total as usize > count => {
                format!(" {} of {} results", count, total)
            }
            _ => format!(" {} results", count),
        }
    } else if controller.query().is_empty() {
        " Type to search the catalog".to_string()
    } else {
        String::new()
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = status_text(app);
    let right_text = KEY_HELP;

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = left_text.chars().count();
    let right_len = right_text.chars().count();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        format!("{:width$}", left_text, width = available_width)
    };

    let paragraph = Paragraph::new(status_str)
        .style(Style::default().fg(colors::TEXT).bg(colors::STATUS_BG));
    frame.render_widget(paragraph, area);
}
