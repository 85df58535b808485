//! The merge/split engine - folding plots into chapters and unfolding them.
//!
//! The engine is a pure transformation over the visible collection (and, for
//! splits, the plot archive). It never writes to the archive itself: a plot
//! must already be recorded before it is merged, and `StoryBoard` guarantees
//! that. Inapplicable operations are observable no-ops, never errors.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use card_model::{Card, CardBody, CardId, CardType, ChapterFields};

use crate::board::{CardCollection, PlotArchive};

/// Configuration for the merge/split engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// How far apart restored plots are placed when a chapter is split.
    /// The k-th restored plot lands `k * step_distance` from the chapter's
    /// position along both axes, so none of them overlap exactly.
    pub step_distance: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            step_distance: 50.0,
        }
    }
}

/// What a merge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Two plots became a brand-new chapter.
    Chapter(CardId),
    /// A plot was appended to an existing chapter.
    Extended(CardId),
    /// Preconditions unmet; nothing changed.
    Skipped,
}

impl MergeOutcome {
    /// The card that should be selected after the merge, if any.
    pub fn selection(&self) -> Option<CardId> {
        match self {
            MergeOutcome::Chapter(id) | MergeOutcome::Extended(id) => Some(*id),
            MergeOutcome::Skipped => None,
        }
    }
}

/// What a split did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome {
    /// The chapter was removed and its plots restored to the canvas.
    Unfolded {
        /// Ids actually restored, in `plot_ids` order.
        restored: Vec<CardId>,
        /// Ids listed by the chapter but absent from the archive. Reported
        /// rather than silently dropped.
        missing: Vec<CardId>,
    },
    /// Preconditions unmet; nothing changed.
    Skipped,
}

/// Folds plot pairs and plots-into-chapters, and unfolds chapters back into
/// their plots.
#[derive(Debug, Clone, Default)]
pub struct MergeSplitEngine {
    config: MergeConfig,
}

impl MergeSplitEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MergeConfig::default())
    }

    /// Fold `source` into `target`.
    ///
    /// - plot onto plot: both are removed and replaced by a new chapter at
    ///   the target's position, with `plot_ids = [source, target]`, the
    ///   chapter placeholder title, and a summary content joining the two
    ///   source titles
    /// - plot onto chapter: the source id is appended to the chapter's
    ///   `plot_ids` and the source card is removed
    /// - anything else (non-plot source, same card, missing cards, or a
    ///   role/event/setting target) is skipped
    ///
    /// The source plot must already be recorded in the archive before this
    /// is called; the engine does not write to it.
    pub fn merge(
        &self,
        collection: &mut CardCollection,
        source_id: CardId,
        target_id: CardId,
    ) -> MergeOutcome {
        if source_id == target_id {
            debug!("merge skipped: source and target are the same card");
            return MergeOutcome::Skipped;
        }
        let (source_kind, source_title) = match collection.find(source_id) {
            Some(placed) => (placed.card.kind(), placed.card.title.clone()),
            None => {
                debug!("merge skipped: source {} not on the canvas", source_id);
                return MergeOutcome::Skipped;
            }
        };
        if source_kind != CardType::Plot {
            debug!("merge skipped: source {} is a {}", source_id, source_kind);
            return MergeOutcome::Skipped;
        }
        let target = match collection.find(target_id) {
            Some(placed) => placed,
            None => {
                debug!("merge skipped: target {} not on the canvas", target_id);
                return MergeOutcome::Skipped;
            }
        };

        match target.card.kind() {
            CardType::Plot => {
                let target_title = target.card.title.clone();
                let position = target.position;

                let chapter = Card::new(CardType::Chapter)
                    .with_content(format!("{} & {}", source_title, target_title))
                    .with_body(CardBody::Chapter(ChapterFields {
                        plot_ids: vec![source_id, target_id],
                        ..Default::default()
                    }));
                let chapter_id = chapter.id;

                collection.remove(source_id);
                collection.remove(target_id);
                // Both removals just succeeded, so the fresh id cannot clash.
                let _ = collection.add(chapter, position);

                MergeOutcome::Chapter(chapter_id)
            }
            CardType::Chapter => {
                if let Some(target) = collection.find_mut(target_id) {
                    if let CardBody::Chapter(fields) = &mut target.card.body {
                        fields.plot_ids.push(source_id);
                    }
                }
                collection.remove(source_id);

                MergeOutcome::Extended(target_id)
            }
            other => {
                debug!("merge skipped: target {} is a {}", target_id, other);
                MergeOutcome::Skipped
            }
        }
    }

    /// Unfold a chapter back into its plot cards.
    ///
    /// Every id in the chapter's `plot_ids` is fetched from the archive and
    /// restored at an increasing offset from the chapter's position; the
    /// chapter itself is removed. Ids the archive does not know are reported
    /// in the outcome and logged, not silently dropped.
    pub fn split(
        &self,
        collection: &mut CardCollection,
        archive: &PlotArchive,
        chapter_id: CardId,
    ) -> SplitOutcome {
        let chapter = match collection.find(chapter_id) {
            Some(placed) if placed.card.is_chapter() => placed,
            Some(placed) => {
                debug!(
                    "split skipped: {} is a {}, not a chapter",
                    chapter_id,
                    placed.card.kind()
                );
                return SplitOutcome::Skipped;
            }
            None => {
                debug!("split skipped: {} not on the canvas", chapter_id);
                return SplitOutcome::Skipped;
            }
        };

        let plot_ids = chapter.card.plot_ids().unwrap_or(&[]).to_vec();
        let origin = chapter.position;

        let mut missing = Vec::new();
        let mut found = Vec::new();
        for id in &plot_ids {
            match archive.get(*id) {
                Some(card) => found.push(card.clone()),
                None => {
                    warn!(
                        "chapter {} lists plot {} but the archive has no record of it",
                        chapter_id, id
                    );
                    missing.push(*id);
                }
            }
        }

        collection.remove(chapter_id);

        let mut restored = Vec::new();
        for (index, card) in found.into_iter().enumerate() {
            let position = origin.offset((index as f64 + 1.0) * self.config.step_distance);
            let id = card.id;
            match collection.add(card, position) {
                Ok(_) => restored.push(id),
                Err(err) => warn!("split of {} could not restore a plot: {}", chapter_id, err),
            }
        }

        SplitOutcome::Unfolded { restored, missing }
    }
}
