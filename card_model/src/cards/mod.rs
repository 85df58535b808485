//! Card definitions for the story canvas.

mod body;
mod card;

pub use body::*;
pub use card::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for all cards on the canvas.
///
/// Ids are generated once at creation and are never reused; a card keeps its
/// id even while it is folded into a chapter and absent from the visible
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub Uuid);

impl CardId {
    /// Create a new random card ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a card ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty card ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of cards a writer can place on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// A character in the story.
    Role,
    /// Something that happens or could happen.
    Event,
    /// A place, era, or piece of world-building.
    Setting,
    /// A concrete story beat; the only kind that merges into chapters.
    Plot,
    /// An ordered group of plot cards.
    Chapter,
}

impl CardType {
    /// The title a freshly created card of this kind starts with.
    pub fn placeholder_title(&self) -> &'static str {
        match self {
            CardType::Role => "new role",
            CardType::Event => "new event",
            CardType::Setting => "new setting",
            CardType::Plot => "new plot",
            CardType::Chapter => "new chapter",
        }
    }

    /// Human-readable label, used when assembling generation prompts.
    pub fn label(&self) -> &'static str {
        match self {
            CardType::Role => "role",
            CardType::Event => "event",
            CardType::Setting => "setting",
            CardType::Plot => "plot",
            CardType::Chapter => "chapter",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_uniqueness() {
        let a = CardId::new();
        let b = CardId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_card_id_display() {
        let id = CardId::nil();
        assert_eq!(id.to_string(), Uuid::nil().to_string());
    }

    #[test]
    fn test_placeholder_titles() {
        assert_eq!(CardType::Plot.placeholder_title(), "new plot");
        assert_eq!(CardType::Chapter.placeholder_title(), "new chapter");
        assert_eq!(CardType::Role.placeholder_title(), "new role");
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(CardType::Setting.label(), "setting");
        assert_eq!(CardType::Event.to_string(), "event");
    }
}
