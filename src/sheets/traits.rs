// Interaction source trait: the seam between the dashboard and its data.
//
// The Google Sheets client is the production implementation. Tests and
// offline runs can plug in anything that yields interactions.

use anyhow::Result;
use async_trait::async_trait;

use crate::interactions::{Interaction, InteractionKind};

/// Anything that can produce the current set of interactions of a kind.
///
/// An empty result is a valid answer ("no data"); the dashboard treats both
/// an empty result and an error as a cue to show sample data.
#[async_trait]
pub trait InteractionSource: Send + Sync {
    async fn fetch_interactions(&self, kind: InteractionKind) -> Result<Vec<Interaction>>;
}

/// Source that always comes back empty, so the controller falls back to the
/// sample dataset on every refresh.
pub struct EmptySource;

#[async_trait]
impl InteractionSource for EmptySource {
    async fn fetch_interactions(&self, _kind: InteractionKind) -> Result<Vec<Interaction>> {
        Ok(Vec::new())
    }
}
