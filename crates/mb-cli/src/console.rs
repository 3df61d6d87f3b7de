//! Console implementations of the UI and view-transport ports.

use anyhow::Result;
use async_trait::async_trait;
use mb_core::ports::{UiPort, ViewTransportPort};
use mb_core::ItemId;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Terminal UI: confirmation on stdin, notifications and the progress bar on
/// stderr.
pub struct ConsoleUi {
    assume_yes: bool,
}

impl ConsoleUi {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl UiPort for ConsoleUi {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let message = message.to_string();
        tokio::task::spawn_blocking(move || {
            eprint!("{message} [y/N] ");
            let _ = io::stderr().flush();
            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line).is_err() {
                return false;
            }
            matches!(line.trim(), "y" | "Y" | "yes")
        })
        .await
        .unwrap_or(false)
    }

    async fn notify(&self, message: &str) -> Result<()> {
        eprintln!("{message}");
        Ok(())
    }

    async fn render_progress(&self, fraction: f64) -> Result<()> {
        eprint!("\rprogress: {:3.0}%  ", fraction * 100.0);
        let _ = io::stderr().flush();
        Ok(())
    }

    async fn reset_search(&self) -> Result<()> {
        debug!("search input cleared");
        Ok(())
    }
}

/// Headless view transport. There is no rendered surface to scroll, so the
/// requests are only logged.
pub struct ConsoleView;

#[async_trait]
impl ViewTransportPort for ConsoleView {
    async fn scroll_into_view(&self, id: &ItemId) -> Result<()> {
        debug!(%id, "scroll into view");
        Ok(())
    }

    async fn toggle_checked(&self, id: &ItemId) -> Result<()> {
        debug!(%id, "toggle checked");
        Ok(())
    }

    async fn activate(&self, id: &ItemId) -> Result<()> {
        debug!(%id, "activate");
        Ok(())
    }
}
