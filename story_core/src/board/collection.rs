//! The visible card collection - an insertion-ordered mapping from card id
//! to card plus canvas position.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use card_model::{Card, CardId, CardPatch, Position, PositionedCard};

/// Errors raised by the collection itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A card with this id is already on the canvas. Should not occur when
    /// ids come from the generator, but the collection checks anyway.
    #[error("a card with id {0} already exists")]
    DuplicateId(CardId),
}

/// The cards currently visible on the canvas.
///
/// Iteration order is insertion order; removing a card keeps the order of
/// the rest. The collection knows nothing about the archive - callers keep
/// the two in sync.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CardCollection {
    cards: Vec<PositionedCard>,
}

impl CardCollection {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new card at the given position.
    pub fn add(&mut self, card: Card, position: Position) -> Result<CardId, CollectionError> {
        if self.contains(card.id) {
            return Err(CollectionError::DuplicateId(card.id));
        }
        let id = card.id;
        self.cards.push(PositionedCard::new(card, position));
        Ok(id)
    }

    /// Move a card. No-op when the id is absent.
    pub fn update_position(&mut self, id: CardId, position: Position) {
        if let Some(placed) = self.find_mut(id) {
            placed.position = position;
        }
    }

    /// Merge a partial update into a card's data. Returns whether the card
    /// was present; an absent id is a no-op, not an error.
    pub fn apply_patch(&mut self, id: CardId, patch: &CardPatch) -> bool {
        match self.find_mut(id) {
            Some(placed) => {
                placed.card.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Remove a card, returning it if it existed.
    pub fn remove(&mut self, id: CardId) -> Option<PositionedCard> {
        let index = self.cards.iter().position(|p| p.card.id == id)?;
        Some(self.cards.remove(index))
    }

    /// Get a card and its position by id.
    pub fn find(&self, id: CardId) -> Option<&PositionedCard> {
        self.cards.iter().find(|p| p.card.id == id)
    }

    /// Get mutable access to a card and its position by id.
    pub fn find_mut(&mut self, id: CardId) -> Option<&mut PositionedCard> {
        self.cards.iter_mut().find(|p| p.card.id == id)
    }

    /// Whether a card with this id is on the canvas.
    pub fn contains(&self, id: CardId) -> bool {
        self.find(id).is_some()
    }

    /// All cards in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PositionedCard> {
        self.cards.iter()
    }

    /// The number of visible cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_model::CardType;

    #[test]
    fn test_add_and_find() {
        let mut collection = CardCollection::new();
        let card = Card::new(CardType::Plot).with_title("ambush");
        let id = collection
            .add(card, Position::new(100.0, 550.0))
            .unwrap();

        let found = collection.find(id).unwrap();
        assert_eq!(found.card.title, "ambush");
        assert_eq!(found.position.y, 550.0);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut collection = CardCollection::new();
        let card = Card::new(CardType::Plot);
        let id = card.id;

        collection.add(card.clone(), Position::default()).unwrap();
        let err = collection.add(card, Position::default()).unwrap_err();

        assert_eq!(err, CollectionError::DuplicateId(id));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_update_position_absent_is_noop() {
        let mut collection = CardCollection::new();
        collection.update_position(CardId::new(), Position::new(1.0, 1.0));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_apply_patch() {
        let mut collection = CardCollection::new();
        let id = collection
            .add(Card::new(CardType::Role), Position::default())
            .unwrap();

        let changed = collection.apply_patch(id, &CardPatch::new().with_title("小瑶"));
        assert!(changed);
        assert_eq!(collection.find(id).unwrap().card.title, "小瑶");

        let missed = collection.apply_patch(CardId::new(), &CardPatch::new().with_title("x"));
        assert!(!missed);
    }

    #[test]
    fn test_remove() {
        let mut collection = CardCollection::new();
        let id = collection
            .add(Card::new(CardType::Event), Position::default())
            .unwrap();

        let removed = collection.remove(id);
        assert!(removed.is_some());
        assert!(collection.remove(id).is_none());
        assert!(!collection.contains(id));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut collection = CardCollection::new();
        let a = collection
            .add(Card::new(CardType::Plot).with_title("a"), Position::default())
            .unwrap();
        let b = collection
            .add(Card::new(CardType::Plot).with_title("b"), Position::default())
            .unwrap();
        let c = collection
            .add(Card::new(CardType::Plot).with_title("c"), Position::default())
            .unwrap();

        collection.remove(b);

        let order: Vec<CardId> = collection.iter().map(|p| p.card.id).collect();
        assert_eq!(order, vec![a, c]);
    }
}
