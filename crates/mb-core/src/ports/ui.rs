use anyhow::Result;
use async_trait::async_trait;

/// Surrounding UI surface: prompts, notifications, the progress bar and the
/// search input.
#[async_trait]
pub trait UiPort: Send + Sync {
    /// Ask the user to confirm before a bulk action. `false` means a normal
    /// early return, not an error.
    async fn confirm(&self, message: &str) -> bool;

    /// Blocking user-visible notification. All user-facing failures go
    /// through here.
    async fn notify(&self, message: &str) -> Result<()>;

    /// Render the progress bar at the given displayed fraction.
    async fn render_progress(&self, fraction: f64) -> Result<()>;

    /// Clear the search input when a drop batch replaces the view.
    async fn reset_search(&self) -> Result<()>;
}
