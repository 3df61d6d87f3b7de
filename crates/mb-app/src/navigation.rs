//! Keyboard navigation over the grid.
//!
//! Pure transition planning lives in `mb_core::nav`; this controller applies
//! the planned move to the shared grid and drives the view-transport side
//! effects (scrolling, checkbox toggling, opening). Long-lived for the page
//! session; initial state is no highlight.

use anyhow::Result;
use mb_core::{nav, ports::ViewTransportPort, ItemId, NavCommand};
use std::sync::Arc;

use crate::grid::SharedGrid;

pub struct NavigationController {
    grid: SharedGrid,
    view: Arc<dyn ViewTransportPort>,
}

impl NavigationController {
    pub fn new(grid: SharedGrid, view: Arc<dyn ViewTransportPort>) -> Self {
        Self { grid, view }
    }

    /// Apply one command. `columns` is the current column count, derived by
    /// the caller from the live container width.
    #[tracing::instrument(name = "usecase.navigation.handle", skip(self))]
    pub async fn handle(&self, command: NavCommand, columns: usize) -> Result<()> {
        match command {
            NavCommand::Home => self.select_edge(columns, true).await,
            NavCommand::End => self.select_edge(columns, false).await,
            NavCommand::ToggleSelectCurrent => {
                if let Some(id) = self.highlighted_id().await {
                    self.view.toggle_checked(&id).await?;
                }
                Ok(())
            }
            NavCommand::ActivateCurrent => {
                if let Some(id) = self.highlighted_id().await {
                    self.view.activate(&id).await?;
                }
                Ok(())
            }
            directional => {
                // delta() is Some for everything not matched above.
                let (dx, dy) = directional.delta().unwrap_or((0, 0));
                self.step(columns, dx, dy).await
            }
        }
    }

    /// Directional move with the horizontal-carry wrap rule. A move that
    /// addresses no entry leaves the highlight unchanged.
    async fn step(&self, columns: usize, dx: isize, dy: isize) -> Result<()> {
        let target = {
            let mut grid = self.grid.lock().await;
            let layout = grid.compute_grid(columns);
            match nav::plan_move(&layout, dx, dy) {
                Some(index) => {
                    let id = grid.entry(index).map(|e| e.id.clone());
                    if let Some(id) = &id {
                        grid.highlight(id);
                    }
                    id
                }
                None => None,
            }
        };

        if let Some(id) = target {
            self.view.scroll_into_view(&id).await?;
        }
        Ok(())
    }

    /// Home/End: select the first/last entry unconditionally, prior
    /// highlight or not. No-op on an empty grid.
    async fn select_edge(&self, _columns: usize, first: bool) -> Result<()> {
        let target = {
            let mut grid = self.grid.lock().await;
            let index = if first {
                0
            } else {
                grid.len().saturating_sub(1)
            };
            let id = grid.entry(index).map(|e| e.id.clone());
            if let Some(id) = &id {
                grid.highlight(id);
            }
            id
        };

        if let Some(id) = target {
            self.view.scroll_into_view(&id).await?;
        }
        Ok(())
    }

    async fn highlighted_id(&self) -> Option<ItemId> {
        self.grid.lock().await.highlighted().map(|e| e.id.clone())
    }
}
