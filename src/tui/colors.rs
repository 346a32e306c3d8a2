use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;
pub const TEXT: Color = Color::White;
pub const STATUS_BG: Color = Color::Rgb(40, 40, 50);

/// Style for matched query text, like an HTML `<mark>`
pub fn mark_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn title_style() -> Style {
    Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
}

pub fn description_style() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn thumbnail_style() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::ITALIC)
}

/// Alternating block background, highlighted when selected
pub fn row_background(visual_idx: usize, is_selected: bool) -> Color {
    if is_selected {
        Color::Rgb(60, 60, 80)
    } else if visual_idx % 2 == 1 {
        Color::Rgb(25, 25, 35)
    } else {
        Color::Reset
    }
}
