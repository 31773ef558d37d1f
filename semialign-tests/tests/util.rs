use std::{fs::File, path::PathBuf, sync::Once};

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

static LOGGER: Once = Once::new();

pub fn init_logging() {
    LOGGER.call_once(|| {
        // Another logger may already be installed.
        TermLogger::init(
            LevelFilter::Info,
            Default::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )
        .ok();
    });
}

/// Opens a file from the `test_files` directory at the repository root.
pub fn open_test_file(name: &str) -> Result<File> {
    // working directory is this crate, a.k.a. "[...]/semialign-tests"
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "..", "test_files", name]
        .iter()
        .collect();
    File::open(&path).with_context(|| format!("Could not open {path:?}"))
}
