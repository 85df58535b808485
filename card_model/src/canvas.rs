//! Canvas placement types - where cards sit, not how they are drawn.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A 2-D canvas coordinate.
///
/// The rendering layer translates screen coordinates into canvas coordinates
/// before they reach the core; nothing here knows about panels or toolbars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A position offset by the same distance along both axes.
    pub fn offset(&self, distance: f64) -> Self {
        Self {
            x: self.x + distance,
            y: self.y + distance,
        }
    }
}

/// A card together with its canvas position - the unit the canvas renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedCard {
    pub card: Card,
    pub position: Position,
}

impl PositionedCard {
    pub fn new(card: Card, position: Position) -> Self {
        Self { card, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    #[test]
    fn test_position_offset() {
        let pos = Position::new(100.0, 200.0);
        let moved = pos.offset(50.0);

        assert_eq!(moved.x, 150.0);
        assert_eq!(moved.y, 250.0);
    }

    #[test]
    fn test_positioned_card() {
        let card = Card::new(CardType::Setting).with_title("幽风谷");
        let placed = PositionedCard::new(card, Position::new(100.0, 300.0));

        assert_eq!(placed.card.title, "幽风谷");
        assert_eq!(placed.position.x, 100.0);
    }
}
