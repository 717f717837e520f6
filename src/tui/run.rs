//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::filter::Filter;
use crate::qr::QrImage;
use crate::store::TaskStore;
use crate::tui::app::App;

/// Initialise and run the terminal user interface.
/// Returns the task store as it was when the user quit.
pub fn run_tui(filter: Filter, qr: QrImage) -> io::Result<TaskStore> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(?filter, "starting ui");
    let mut app = App::new(filter, qr);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    let store = app.into_store();
    info!(tasks = store.len(), "ui closed");
    Ok(store)
}
