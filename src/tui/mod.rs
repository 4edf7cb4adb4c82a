//! Interactive search interface
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod view;

use anyhow::Result;
pub use app::App;
use tracing::info;
pub use view::{ResultPane, TuiView};

use crate::config::ClientConfig;
use crate::history::{HISTORY_KEY, HistoryStore};
use crate::storage::FileStore;
use crate::transport::HttpTransport;
use terminal::TerminalManager;

/// Run the interactive search UI until the user quits
pub fn run_interactive(config: &ClientConfig) -> Result<()> {
    let transport = HttpTransport::new(&config.server_url, config.timeout)?;
    let storage = FileStore::open(config.data_dir.clone())?;
    let history = HistoryStore::with_options(storage, HISTORY_KEY, config.history_capacity);
    info!(server = %config.server_url, entries = history.len(), "Starting interactive search");

    let mut app = App::new(transport, history, config.max_results);

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res
}
