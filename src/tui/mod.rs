pub mod app;
pub mod colors;
pub mod input;
pub mod results;
pub mod selection;
pub mod ui;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use std::sync::Arc;

/// Entry point: take over the terminal and run the search UI until quit
pub fn run(config: &AppConfig, catalog: Arc<dyn Catalog>) -> crate::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let mut app = app::App::new(catalog, config);

    let result = app.run(&mut terminal);

    ratatui::restore();
    result
}
