//! Result list rendering with inline match highlighting.
//!
//! Each product takes one block: thumbnail reference, title, description,
//! and a spacer line.

use crate::catalog::Product;
use crate::highlight::Highlighter;
use crate::tui::colors;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

/// Lines per result, including the spacer
pub const BLOCK_HEIGHT: u16 = 4;

/// Build a line from `text`, marking every occurrence of the query
pub fn highlighted_line<'a>(text: &'a str, highlighter: &Highlighter, base: Style) -> Line<'a> {
    let spans: Vec<Span<'a>> = highlighter
        .segments(text)
        .into_iter()
        .map(|seg| {
            if seg.emphasized {
                Span::styled(seg.text, base.patch(colors::mark_style()))
            } else {
                Span::styled(seg.text, base)
            }
        })
        .collect();
    Line::from(spans)
}

/// The three content lines of one product block
pub fn product_lines<'a>(product: &'a Product, highlighter: &Highlighter) -> [Line<'a>; 3] {
    [
        Line::from(Span::styled(
            format!("\u{1F5BC} {}", product.thumbnail),
            colors::thumbnail_style(),
        )),
        highlighted_line(&product.title, highlighter, colors::title_style()),
        highlighted_line(&product.description, highlighter, colors::description_style()),
    ]
}

pub struct ResultList<'a> {
    pub query: &'a str,
    pub products: &'a [Product],
    pub selected: Option<usize>,
    pub scroll_offset: usize,
}

impl ResultList<'_> {
    /// How many whole blocks fit in `height` rows
    pub fn visible_blocks(height: u16) -> usize {
        // The last block may omit its spacer
        ((height + 1) / BLOCK_HEIGHT) as usize
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let highlighter = Highlighter::new(self.query);
        let mut y = area.y;

        for (i, product) in self.products.iter().enumerate().skip(self.scroll_offset) {
            if y + BLOCK_HEIGHT - 1 > area.bottom() {
                break;
            }

            let is_selected = self.selected == Some(i);
            let bg = colors::row_background(i - self.scroll_offset, is_selected);
            let marker = if is_selected { "\u{258C} " } else { "  " };

            for (row, line) in product_lines(product, &highlighter).into_iter().enumerate() {
                let row_area = Rect::new(area.x, y + row as u16, area.width, 1);
                buf.set_style(row_area, Style::default().bg(bg));

                let mut spans = vec![Span::styled(marker, Style::default().fg(colors::ACCENT))];
                spans.extend(line.spans);
                buf.set_line(area.x, row_area.y, &Line::from(spans), area.width);
            }

            y += BLOCK_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn iphone() -> Product {
        Product {
            id: 1,
            title: "iPhone 13".into(),
            description: "A phone".into(),
            thumbnail: "x.jpg".into(),
        }
    }

    fn marked(line: &Line<'_>) -> Vec<(String, bool)> {
        line.spans
            .iter()
            .map(|s| (s.content.to_string(), s.style.bg == colors::mark_style().bg))
            .collect()
    }

    #[test]
    fn title_and_description_are_marked() {
        let product = iphone();
        let hl = Highlighter::new("phone");
        let [_, title, description] = product_lines(&product, &hl);

        assert_eq!(
            marked(&title),
            vec![
                ("i".to_string(), false),
                ("Phone".to_string(), true),
                (" 13".to_string(), false),
            ]
        );
        assert_eq!(
            marked(&description),
            vec![("A ".to_string(), false), ("phone".to_string(), true)]
        );
    }

    #[test]
    fn empty_query_marks_nothing() {
        let product = iphone();
        let hl = Highlighter::new("");
        let line = highlighted_line(&product.title, &hl, Style::default());
        assert_eq!(marked(&line), vec![("iPhone 13".to_string(), false)]);
    }

    #[test]
    fn renders_blocks_until_space_runs_out() {
        let products: Vec<Product> = (1..=5)
            .map(|id| Product {
                id,
                title: format!("Item {}", id),
                description: "desc".into(),
                thumbnail: format!("{}.jpg", id),
            })
            .collect();

        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(
                    ResultList {
                        query: "item",
                        products: &products,
                        selected: Some(0),
                        scroll_offset: 0,
                    },
                    frame.area(),
                )
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Item 1"));
        assert!(text.contains("Item 2"));
        assert!(!text.contains("Item 3"));
        assert_eq!(ResultList::visible_blocks(8), 2);
    }
}
