mod aggregate;
mod config;
mod error;
mod goals;
mod ids;
mod ledger;
mod logging;
mod models;
mod run;
mod session;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::rc::Rc;

use crate::config::Config;
use crate::session::Session;
use crate::store::{PersistentStore, SqliteStore};

/// The store handle shared by the ledger and the goal tracker.
pub(crate) type SharedStore = Rc<dyn PersistentStore>;
pub(crate) type AppSession = Session<SharedStore>;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env()?;
    config.ensure_data_dir()?;
    logging::init(&config)?;

    let mut session = open_session(&config)?;

    match args.len() {
        1 => run::as_tui(&mut session, &config),
        2.. => run::as_cli(&args, &mut session, &config),
        _ => {
            eprintln!("Usage: pesowise [command]");
            Ok(())
        }
    }
}

fn open_session(config: &Config) -> Result<AppSession> {
    let db_path = config.db_path();
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    let store: SharedStore = Rc::new(store);
    Session::load(store).context("Failed to load saved data")
}
