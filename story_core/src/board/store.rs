//! The story board - the single owned state container behind the canvas.
//!
//! UI events (add card, drag-stop overlap, basket toggle, generation result)
//! call into [`StoryBoard`], which delegates to the basket, the merge/split
//! engine, and the archive, and keeps the derived state (selection, editor
//! target, basket eligibility) consistent after every operation.

use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use card_model::{Card, CardBody, CardId, CardPatch, CardType, PlotFields, Position, PositionedCard};

use crate::generation::{
    GeneratedPlot, GenerationError, GenerationTicket, PlotMaterial, PlotRequest,
};
use crate::merge_split::{MergeConfig, MergeOutcome, MergeSplitEngine, SplitOutcome};

use super::{Basket, BasketError, BasketToggle, CardCollection, PlotArchive};

/// Unique identifier for canvas edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Create a new random edge ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection drawn between two cards.
///
/// Edges are tracked for the canvas only; no card semantics read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: CardId,
    pub target: CardId,
}

/// The mutable state behind the story canvas.
///
/// One value owns everything; every operation is a method taking `&mut self`
/// and runs to completion before the next is admitted. The sole asynchronous
/// concern - the external generation call - never mutates the board until a
/// result is explicitly accepted.
#[derive(Debug, Default)]
pub struct StoryBoard {
    collection: CardCollection,
    archive: PlotArchive,
    basket: Basket,
    engine: MergeSplitEngine,
    edges: Vec<Edge>,
    selected: Option<CardId>,
    editor_card: Option<CardId>,
    pending: Option<GenerationTicket>,
}

impl StoryBoard {
    /// Create an empty board with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty board with a specific merge/split configuration.
    pub fn with_config(config: MergeConfig) -> Self {
        Self {
            engine: MergeSplitEngine::new(config),
            ..Self::default()
        }
    }

    // --- card lifecycle -------------------------------------------------

    /// Add a fresh card of the given kind at a canvas position. The card
    /// starts with its kind's placeholder title and becomes selected.
    pub fn add_card(&mut self, kind: CardType, position: Position) -> CardId {
        self.add_card_with(kind, position, CardPatch::default())
    }

    /// Add a fresh card with initial data applied over the placeholder.
    ///
    /// Plot cards are recorded in the archive immediately: archiving is a
    /// side effect of creation here, never a caller obligation.
    pub fn add_card_with(
        &mut self,
        kind: CardType,
        position: Position,
        overrides: CardPatch,
    ) -> CardId {
        let mut card = Card::new(kind);
        card.apply_patch(&overrides);
        let id = card.id;

        self.archive.record(&card);
        // Freshly generated ids never collide with existing cards.
        let _ = self.collection.add(card, position);
        self.selected = Some(id);
        id
    }

    /// Merge a partial update into a visible card. Editing a plot refreshes
    /// its archived copy as well. Absent ids are a no-op.
    pub fn update_card(&mut self, id: CardId, patch: &CardPatch) -> bool {
        if !self.collection.apply_patch(id, patch) {
            return false;
        }
        if let Some(placed) = self.collection.find(id) {
            self.archive.record(&placed.card);
        }
        true
    }

    /// Move a single card. Absent ids are a no-op.
    pub fn move_card(&mut self, id: CardId, position: Position) {
        self.collection.update_position(id, position);
    }

    /// Apply a batch of position changes from the canvas layer.
    pub fn apply_positions(&mut self, moves: &[(CardId, Position)]) {
        for (id, position) in moves {
            self.collection.update_position(*id, *position);
        }
    }

    // --- selection & editor ---------------------------------------------

    /// Select a card, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<CardId>) {
        self.selected = id;
    }

    /// The currently selected card.
    pub fn selected(&self) -> Option<CardId> {
        self.selected
    }

    /// Open (or close, with `None`) the full-page editor for a card.
    pub fn open_editor(&mut self, id: Option<CardId>) {
        self.editor_card = id;
    }

    /// The card the editor is open for.
    pub fn editor_card(&self) -> Option<CardId> {
        self.editor_card
    }

    // --- basket ----------------------------------------------------------

    /// Toggle a card in and out of the basket.
    ///
    /// Only non-chapter cards currently on the canvas are eligible; an
    /// ineligible toggle changes nothing and returns `Ok(None)`. A full
    /// basket surfaces [`BasketError::Full`].
    pub fn toggle_basket(&mut self, id: CardId) -> Result<Option<BasketToggle>, BasketError> {
        let eligible = self
            .collection
            .find(id)
            .map(|placed| !placed.card.is_chapter())
            .unwrap_or(false);
        if !eligible {
            debug!("basket toggle ignored for {}: not an eligible card", id);
            return Ok(None);
        }
        self.basket.toggle(id).map(Some)
    }

    /// Empty the basket.
    pub fn clear_basket(&mut self) {
        self.basket.clear();
    }

    /// Basket member ids in insertion order.
    pub fn basket_members(&self) -> &[CardId] {
        self.basket.members()
    }

    /// The basket's cards, in basket order.
    pub fn basket_cards(&self) -> Vec<&PositionedCard> {
        self.basket
            .members()
            .iter()
            .filter_map(|id| self.collection.find(*id))
            .collect()
    }

    // --- merge / split ---------------------------------------------------

    /// Fold `source` into `target` (see [`MergeSplitEngine::merge`]).
    ///
    /// The source card's archive record is refreshed first, so the plots a
    /// chapter absorbs can always be restored later. The resulting chapter
    /// (new or extended) becomes selected, and basket ids that left the
    /// canvas are dropped.
    pub fn merge(&mut self, source_id: CardId, target_id: CardId) -> MergeOutcome {
        if let Some(placed) = self.collection.find(source_id) {
            self.archive.record(&placed.card);
        }

        let outcome = self.engine.merge(&mut self.collection, source_id, target_id);
        if let Some(id) = outcome.selection() {
            self.selected = Some(id);
        }
        self.prune_basket();
        outcome
    }

    /// Unfold a chapter back into its plots (see [`MergeSplitEngine::split`]).
    /// Clears the selection and, if the editor was open on the chapter,
    /// closes it.
    pub fn split(&mut self, chapter_id: CardId) -> SplitOutcome {
        let outcome = self.engine.split(&mut self.collection, &self.archive, chapter_id);
        if matches!(outcome, SplitOutcome::Unfolded { .. }) {
            self.selected = None;
            if self.editor_card == Some(chapter_id) {
                self.editor_card = None;
            }
            self.prune_basket();
        }
        outcome
    }

    /// Pick the merge target from the cards overlapping a just-dropped one:
    /// the first whose kind is plot or chapter and which is not the dragged
    /// card itself.
    pub fn merge_candidate(&self, dragged: CardId, overlaps: &[CardId]) -> Option<CardId> {
        overlaps
            .iter()
            .copied()
            .filter(|id| *id != dragged)
            .find(|id| {
                self.collection
                    .find(*id)
                    .map(|placed| placed.card.is_plot() || placed.card.is_chapter())
                    .unwrap_or(false)
            })
    }

    fn prune_basket(&mut self) {
        let collection = &self.collection;
        self.basket.retain(|id| {
            collection
                .find(*id)
                .map(|placed| !placed.card.is_chapter())
                .unwrap_or(false)
        });
    }

    // --- edges -----------------------------------------------------------

    /// Record a connection between two cards. Repeating an existing pair is
    /// a no-op. Edges carry no card semantics.
    pub fn connect(&mut self, source: CardId, target: CardId) -> bool {
        let exists = self
            .edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target);
        if exists {
            return false;
        }
        self.edges.push(Edge {
            id: EdgeId::new(),
            source,
            target,
        });
        true
    }

    /// All recorded edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // --- generation session ----------------------------------------------

    /// Start a generation request from the current basket.
    ///
    /// Snapshots the basket's cards (in order) and the instruction into a
    /// [`PlotRequest`] and issues the single outstanding ticket. Fails when
    /// the basket is empty or another request is still in flight; the
    /// collaborator call itself happens outside the board.
    pub fn begin_generation(
        &mut self,
        instruction: impl Into<String>,
    ) -> Result<PlotRequest, GenerationError> {
        if self.pending.is_some() {
            return Err(GenerationError::InFlight);
        }
        if self.basket.is_empty() {
            return Err(GenerationError::EmptyBasket);
        }

        let source_ids = self.basket.members().to_vec();
        let materials = self
            .basket_cards()
            .iter()
            .map(|placed| PlotMaterial::from_card(&placed.card))
            .collect();

        let ticket = GenerationTicket::new();
        self.pending = Some(ticket);

        Ok(PlotRequest {
            ticket,
            materials,
            instruction: instruction.into(),
            source_ids,
        })
    }

    /// Accept a generation result: create the plot card at the given canvas
    /// position, record its provenance and archive it, select it, and
    /// release the ticket. The basket is left as it was.
    pub fn accept_generation(
        &mut self,
        request: &PlotRequest,
        generated: GeneratedPlot,
        position: Position,
    ) -> Result<CardId, GenerationError> {
        if self.pending != Some(request.ticket) {
            return Err(GenerationError::StaleTicket);
        }
        self.pending = None;

        let card = Card::new(CardType::Plot)
            .with_title(generated.title)
            .with_content(generated.content)
            .with_body(CardBody::Plot(PlotFields {
                time_hint: generated.time_hint,
                place_hint: generated.place_hint,
                source_card_ids: request.source_ids.clone(),
                ..Default::default()
            }));
        let id = card.id;

        self.archive.record(&card);
        // Freshly generated ids never collide with existing cards.
        let _ = self.collection.add(card, position);
        self.selected = Some(id);
        Ok(id)
    }

    /// Release the ticket after the collaborator reported failure. No other
    /// state changes; the failure message is the caller's to surface.
    pub fn fail_generation(&mut self, ticket: GenerationTicket) -> Result<(), GenerationError> {
        if self.pending != Some(ticket) {
            return Err(GenerationError::StaleTicket);
        }
        self.pending = None;
        Ok(())
    }

    /// Whether a generation request is outstanding.
    pub fn generation_pending(&self) -> bool {
        self.pending.is_some()
    }

    // --- reading ---------------------------------------------------------

    /// The visible cards, for rendering.
    pub fn collection(&self) -> &CardCollection {
        &self.collection
    }

    /// The plot archive.
    pub fn archive(&self) -> &PlotArchive {
        &self.archive
    }

    /// The basket.
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// A chapter's compiled text: its own content when it has any, else the
    /// archived contents of its plots joined by blank lines. `None` for
    /// absent ids and non-chapters.
    pub fn chapter_manuscript(&self, id: CardId) -> Option<String> {
        let placed = self.collection.find(id)?;
        let plot_ids = placed.card.plot_ids()?;
        if !placed.card.content.is_empty() {
            return Some(placed.card.content.clone());
        }
        let joined = self
            .archive
            .fetch_many(plot_ids)
            .iter()
            .map(|card| card.content.as_str())
            .filter(|content| !content.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        Some(joined)
    }
}
