use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::controller::SearchController;
use crate::tui::input::{self, SPINNER};
use crate::tui::selection::SelectionState;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct App {
    pub controller: SearchController,

    // Sub-states
    pub cursor_pos: usize,
    pub selection: SelectionState,
    pub placeholder: String,
    pub spinner_frame: usize,

    // Last result list the selection was synced to
    seen_generation: u64,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(catalog: Arc<dyn Catalog>, config: &AppConfig) -> Self {
        Self {
            controller: SearchController::new(catalog, config.debounce_delay(), Instant::now()),
            cursor_pos: 0,
            selection: SelectionState::default(),
            placeholder: config.placeholder.clone(),
            spinner_frame: 0,
            seen_generation: 0,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let mut timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if let Some(due) = self.controller.next_wakeup(Instant::now()) {
                timeout = timeout.min(due);
            }

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key, Instant::now());
                }
            }

            self.update(Instant::now());

            if last_tick.elapsed() >= tick_rate {
                if self.controller.is_loading() {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
                }
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Fire the debounced search if due, apply finished requests
    pub fn update(&mut self, now: Instant) {
        self.controller.tick(now);
        self.controller.process_messages();
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        let generation = self.controller.results_generation();
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.selection.reset(self.controller.results().len());
        }
    }

    fn set_query(&mut self, query: String, now: Instant) {
        self.controller.set_query(query, now);
    }

    fn open_selected(&self) {
        let Some(product) = self
            .selection
            .selected
            .and_then(|i| self.controller.results().get(i))
        else {
            return;
        };

        if let Err(e) = open::that_detached(&product.thumbnail) {
            tracing::warn!(target: "tui", id = product.id, error = %e, "failed to open thumbnail");
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let total = self.controller.results().len();
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.controller.query().is_empty() {
                    self.should_quit = true;
                } else {
                    self.cursor_pos = 0;
                    self.set_query(String::new(), now);
                }
            }
            KeyCode::Up => self.selection.step(-1, total),
            KeyCode::Down => self.selection.step(1, total),
            KeyCode::PageUp => self.selection.step(-self.selection.page(), total),
            KeyCode::PageDown => self.selection.step(self.selection.page(), total),
            KeyCode::Enter => self.open_selected(),
            _ => {
                let current = self.controller.query().to_string();
                if let Some(next) = input::edit(&current, &mut self.cursor_pos, key) {
                    self.set_query(next, now);
                }
            }
        }
    }
}
