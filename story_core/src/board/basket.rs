//! The creative basket - the bounded selection staged for generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use card_model::CardId;

/// How many cards a basket holds by default.
pub const DEFAULT_BASKET_LIMIT: usize = 5;

/// Errors raised by basket operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasketError {
    /// The basket already holds its limit; nothing was changed. Surfaced to
    /// the user as a blocking notice.
    #[error("the basket holds at most {limit} cards")]
    Full { limit: usize },
}

/// What a successful toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasketToggle {
    Added,
    Removed,
}

/// A bounded, ordered, duplicate-free set of card ids.
///
/// Membership order is insertion order, which keeps generation requests
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    ids: Vec<CardId>,
    limit: usize,
}

impl Default for Basket {
    fn default() -> Self {
        Self::new()
    }
}

impl Basket {
    /// Create an empty basket with the default limit.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_BASKET_LIMIT)
    }

    /// Create an empty basket with a specific limit.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            ids: Vec::new(),
            limit,
        }
    }

    /// Toggle a card's membership. Removal always succeeds; insertion fails
    /// with [`BasketError::Full`] (and no mutation) once the limit is hit.
    pub fn toggle(&mut self, id: CardId) -> Result<BasketToggle, BasketError> {
        if let Some(index) = self.ids.iter().position(|member| *member == id) {
            self.ids.remove(index);
            return Ok(BasketToggle::Removed);
        }
        if self.ids.len() >= self.limit {
            return Err(BasketError::Full { limit: self.limit });
        }
        self.ids.push(id);
        Ok(BasketToggle::Added)
    }

    /// Empty the basket unconditionally.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// The member ids in insertion order.
    pub fn members(&self) -> &[CardId] {
        &self.ids
    }

    /// Whether a card is in the basket.
    pub fn contains(&self, id: CardId) -> bool {
        self.ids.contains(&id)
    }

    /// Drop every member the predicate rejects, keeping the rest in order.
    pub fn retain(&mut self, keep: impl FnMut(&CardId) -> bool) {
        self.ids.retain(keep);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The maximum number of members.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut basket = Basket::new();
        let id = CardId::new();

        assert_eq!(basket.toggle(id), Ok(BasketToggle::Added));
        assert!(basket.contains(id));

        assert_eq!(basket.toggle(id), Ok(BasketToggle::Removed));
        assert!(!basket.contains(id));
        assert!(basket.is_empty());
    }

    #[test]
    fn test_toggle_is_involutive() {
        let mut basket = Basket::new();
        let resident = CardId::new();
        basket.toggle(resident).unwrap();
        let before = basket.members().to_vec();

        let id = CardId::new();
        basket.toggle(id).unwrap();
        basket.toggle(id).unwrap();

        assert_eq!(basket.members(), before.as_slice());
    }

    #[test]
    fn test_limit_enforced_without_mutation() {
        let mut basket = Basket::with_limit(2);
        basket.toggle(CardId::new()).unwrap();
        basket.toggle(CardId::new()).unwrap();

        let overflow = CardId::new();
        assert_eq!(
            basket.toggle(overflow),
            Err(BasketError::Full { limit: 2 })
        );
        assert_eq!(basket.len(), 2);
        assert!(!basket.contains(overflow));
    }

    #[test]
    fn test_removal_succeeds_at_limit() {
        let mut basket = Basket::with_limit(1);
        let id = CardId::new();
        basket.toggle(id).unwrap();

        assert_eq!(basket.toggle(id), Ok(BasketToggle::Removed));
    }

    #[test]
    fn test_count_never_exceeds_limit() {
        let mut basket = Basket::new();
        let ids: Vec<CardId> = (0..20).map(|_| CardId::new()).collect();

        for (round, id) in ids.iter().cycle().take(60).enumerate() {
            let _ = basket.toggle(*id);
            assert!(basket.len() <= basket.limit(), "round {}", round);
        }
    }

    #[test]
    fn test_members_keep_insertion_order() {
        let mut basket = Basket::new();
        let a = CardId::new();
        let b = CardId::new();
        let c = CardId::new();
        for id in [a, b, c] {
            basket.toggle(id).unwrap();
        }

        basket.toggle(b).unwrap();

        assert_eq!(basket.members(), &[a, c]);
    }

    #[test]
    fn test_clear() {
        let mut basket = Basket::new();
        basket.toggle(CardId::new()).unwrap();
        basket.toggle(CardId::new()).unwrap();

        basket.clear();

        assert!(basket.is_empty());
    }

    #[test]
    fn test_retain() {
        let mut basket = Basket::new();
        let keep = CardId::new();
        let drop = CardId::new();
        basket.toggle(keep).unwrap();
        basket.toggle(drop).unwrap();

        basket.retain(|id| *id == keep);

        assert_eq!(basket.members(), &[keep]);
    }
}
