//! Plot generation session - the data contract around the external
//! text-generation collaborator.
//!
//! The collaborator itself (HTTP, model, retries) stays outside the core.
//! This module owns what crosses the boundary: the request snapshot built
//! from the basket, the prompt text, the success-payload shape, and the
//! single-in-flight ticket that keeps a basket session to one outstanding
//! request at a time.

mod response;

pub use response::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use card_model::{Card, CardId, CardType};

/// Errors raised by the generation session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A request is already outstanding for this board.
    #[error("a generation request is already in flight")]
    InFlight,

    /// The basket has nothing to generate from.
    #[error("the basket is empty")]
    EmptyBasket,

    /// The ticket does not match the outstanding request (already accepted,
    /// failed, or never issued).
    #[error("the generation ticket is no longer valid")]
    StaleTicket,
}

/// Identifies one outstanding generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationTicket(pub Uuid);

impl GenerationTicket {
    /// Create a new random ticket.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GenerationTicket {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GenerationTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One basket card as the collaborator sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotMaterial {
    pub kind: CardType,
    pub title: String,
    pub content: String,
}

impl PlotMaterial {
    /// Capture the collaborator-visible surface of a card.
    pub fn from_card(card: &Card) -> Self {
        Self {
            kind: card.kind(),
            title: card.title.clone(),
            content: card.content.clone(),
        }
    }
}

/// A snapshot of everything one generation request needs.
///
/// Materials are in basket insertion order, so the same basket always builds
/// the same request. The basket ids are kept so an accepted plot can record
/// its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    pub ticket: GenerationTicket,
    pub materials: Vec<PlotMaterial>,
    /// Free-text steering instruction; may be empty.
    pub instruction: String,
    /// The basket members the materials came from, in the same order.
    pub source_ids: Vec<CardId>,
}

impl PlotRequest {
    /// Format the request as the prompt sent to the collaborator.
    pub fn to_prompt_string(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "You are an experienced creative-writing assistant. Using the materials \
             below and the instruction, write one vivid story beat.\n\n",
        );

        prompt.push_str("## Materials\n");
        for material in &self.materials {
            let content = if material.content.is_empty() {
                "no description yet"
            } else {
                material.content.as_str()
            };
            prompt.push_str(&format!(
                "- {}: {} ({})\n",
                material.kind, material.title, content
            ));
        }
        prompt.push('\n');

        prompt.push_str("## Output\n");
        prompt.push_str(
            "Respond with pure JSON containing:\n\
             - title: a short, striking plot title\n\
             - content: the plot text itself, 200-300 words, strongly narrative\n\
             - timeHint: when it happens (e.g. dawn, deep night, three years later)\n\
             - placeHint: where it happens (e.g. a ruined temple, a busy street)\n\n\
             The plot must stay consistent with the materials.\n",
        );

        prompt.push('\n');
        prompt.push_str("## Instruction\n");
        if self.instruction.is_empty() {
            prompt.push_str("Write a new plot based on the materials above.\n");
        } else {
            prompt.push_str(&self.instruction);
            prompt.push('\n');
        }

        prompt
    }
}
