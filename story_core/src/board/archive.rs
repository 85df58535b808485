//! The plot archive - a session-long record of every plot card ever created.
//!
//! Folding plots into a chapter removes them from the visible collection;
//! the archive is what makes splitting the chapter lossless. It grows
//! monotonically and exposes no removal API at all.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use card_model::{Card, CardId};

/// Permanent (for the session) record of all plot cards, independent of
/// whether they are currently visible or embedded in a chapter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlotArchive {
    plots: HashMap<CardId, Card>,
}

impl PlotArchive {
    /// Create a new empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a plot card by id, keeping the archived copy
    /// fresh when a visible plot is edited. Non-plot cards are ignored.
    pub fn record(&mut self, card: &Card) {
        if card.is_plot() {
            self.plots.insert(card.id, card.clone());
        }
    }

    /// Get an archived plot by id.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.plots.get(&id)
    }

    /// Whether a plot with this id has ever been recorded.
    pub fn contains(&self, id: CardId) -> bool {
        self.plots.contains_key(&id)
    }

    /// The archived plots matching the given ids, in the order the ids were
    /// requested. Unknown ids are silently omitted; callers that care about
    /// omissions compare lengths or check `contains` first.
    pub fn fetch_many(&self, ids: &[CardId]) -> Vec<&Card> {
        ids.iter().filter_map(|id| self.plots.get(id)).collect()
    }

    /// The number of plots ever recorded.
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }
}
