//! Tag completion for the search input.

use anyhow::Result;
use mb_core::{ports::TagCompletePort, tags};
use std::sync::Arc;

/// Completes the last whitespace-delimited token of the search input,
/// returning full replacement search strings.
pub struct CompleteTagUseCase {
    tags: Arc<dyn TagCompletePort>,
}

impl CompleteTagUseCase {
    pub fn new(tags: Arc<dyn TagCompletePort>) -> Self {
        Self { tags }
    }

    #[tracing::instrument(name = "usecase.tags.complete.execute", skip(self))]
    pub async fn execute(&self, input: &str) -> Result<Vec<String>> {
        // Nothing to complete on empty input or after a closing space.
        let Some(token) = tags::completion_token(input) else {
            return Ok(Vec::new());
        };
        let candidates = self.tags.complete(token).await?;
        Ok(tags::replace_last_token(input, &candidates))
    }
}
