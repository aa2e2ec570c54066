//! The Tower roster - main entry point.

use std::io;
use std::path::Path;

use roster_cli::{logging, Session};
use roster_core::config::{RosterConfig, CONFIG_FILE};
use roster_core::store::RecordStore;

fn main() -> anyhow::Result<()> {
    let (config, config_error) = RosterConfig::load_or_default(Path::new(CONFIG_FILE));

    // Initialize logging
    let log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Activity log unavailable: {e}");
            None
        }
    };
    if let Some(e) = config_error {
        tracing::warn!(error = %e, file = CONFIG_FILE, "Ignoring invalid configuration, using defaults");
    }

    let store = RecordStore::from_config(&config.storage);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store, stdin.lock(), stdout.lock());
    session.run()?;
    drop(session);

    // Flush and close the activity log.
    drop(log_guard);
    Ok(())
}
