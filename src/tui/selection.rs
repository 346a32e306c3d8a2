//! Result selection, measured in whole result blocks
//!
//! Each product takes [`BLOCK_HEIGHT`](crate::tui::results::BLOCK_HEIGHT)
//! rows, so the window is sized from the results area height rather than a
//! row count. A partially visible block never counts as visible.

use crate::tui::results::ResultList;

#[derive(Debug)]
pub struct SelectionState {
    pub selected: Option<usize>,
    /// First block drawn
    pub scroll_offset: usize,
    visible_blocks: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_blocks: 1,
        }
    }
}

impl SelectionState {
    /// New result list: select the first entry, if any
    pub fn reset(&mut self, len: usize) {
        self.selected = if len == 0 { None } else { Some(0) };
        self.scroll_offset = 0;
    }

    /// Fit the window to a results area `height` rows tall
    pub fn set_viewport(&mut self, height: u16) {
        self.visible_blocks = ResultList::visible_blocks(height).max(1);
        if let Some(i) = self.selected {
            self.scroll_into_view(i);
        }
    }

    pub fn visible_blocks(&self) -> usize {
        self.visible_blocks
    }

    /// PageUp/PageDown distance: one screen, keeping one block of context
    pub fn page(&self) -> isize {
        self.visible_blocks.saturating_sub(1).max(1) as isize
    }

    /// Move the selection by `delta` blocks, clamped to the list
    pub fn step(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        let target = match self.selected {
            Some(i) => i.saturating_add_signed(delta).min(len - 1),
            None => 0,
        };
        self.selected = Some(target);
        self.scroll_into_view(target);
    }

    fn scroll_into_view(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + self.visible_blocks {
            self.scroll_offset = index + 1 - self.visible_blocks;
        }
    }
}
