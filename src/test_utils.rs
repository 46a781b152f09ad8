//! Shared test utilities for the stock keeper.
//!
//! This module provides helpers for building pre-stocked inventories, for
//! driving a console session from a script of operator answers, and for
//! capturing log output.

use crate::{
    config::DisplayConfig,
    console::{Prompt, Session},
    core::InventoryManager,
    errors::Result,
};
use std::{
    io::{self, Cursor, Write},
    sync::{Arc, Mutex},
};
use tracing_subscriber::EnvFilter;

/// Builds an inventory holding `products` in the given order.
///
/// # Panics
/// Panics if any entry is invalid; fixtures are expected to be well-formed.
#[allow(clippy::expect_used)]
pub fn manager_with(products: &[(&str, i64)]) -> InventoryManager {
    let mut manager = InventoryManager::new();
    for (name, quantity) in products {
        manager
            .add_product(name, Some(*quantity))
            .expect("fixture product should be valid");
    }
    manager
}

/// Runs a whole session over `manager`, feeding it `script` one line per answer.
///
/// The script is raw bytes so tests can feed input that is not valid UTF-8.
///
/// Screen clearing and pauses are disabled. Returns the final inventory and
/// everything the session printed.
pub async fn run_script(
    manager: InventoryManager,
    script: impl AsRef<[u8]>,
) -> Result<(InventoryManager, String)> {
    let prompt = Prompt::new(Cursor::new(script.as_ref().to_vec()), Vec::new());
    let mut session = Session::new(manager, DisplayConfig::immediate(), prompt);
    session.run().await?;

    let (manager, prompt) = session.into_parts();
    let (_, output) = prompt.into_inner();
    Ok((manager, String::from_utf8_lossy(&output).into_owned()))
}

/// In-memory log sink shared between a test and its subscriber.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?;
        buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber at `level` active and returns its result along
/// with the formatted log lines.
pub fn capture_logs<T>(level: &str, f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    (value, logs.contents())
}
