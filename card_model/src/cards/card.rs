//! The card entity and its partial-update patch.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{CardBody, CardId, CardType};

/// A narrative card - the atomic content unit of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// Display title. Starts as a per-kind placeholder, may be empty.
    pub title: String,

    /// Summary or full text. Free text, may be empty.
    pub content: String,

    /// Kind-specific fields; also determines the card's kind.
    pub body: CardBody,
}

impl Card {
    /// Create a new card of the given kind with a fresh id and the kind's
    /// placeholder title.
    pub fn new(kind: CardType) -> Self {
        Self {
            id: CardId::new(),
            title: kind.placeholder_title().to_string(),
            content: String::new(),
            body: CardBody::for_kind(kind),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the content text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Replace the body. The body's variant must match the card's kind;
    /// a mismatched body is ignored.
    pub fn with_body(mut self, body: CardBody) -> Self {
        self.set_body(body);
        self
    }

    /// Add an open-ended attribute.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.extra_mut().insert(key.into(), value.into());
        self
    }

    /// The card's kind, derived from its body.
    pub fn kind(&self) -> CardType {
        self.body.kind()
    }

    pub fn is_plot(&self) -> bool {
        self.kind() == CardType::Plot
    }

    pub fn is_chapter(&self) -> bool {
        self.kind() == CardType::Chapter
    }

    /// The ordered plot ids of a chapter card, `None` for every other kind.
    pub fn plot_ids(&self) -> Option<&[CardId]> {
        match &self.body {
            CardBody::Chapter(fields) => Some(&fields.plot_ids),
            _ => None,
        }
    }

    /// Replace the body if its variant matches this card's kind.
    ///
    /// Returns whether the body was applied.
    pub fn set_body(&mut self, body: CardBody) -> bool {
        if body.kind() == self.kind() {
            self.body = body;
            true
        } else {
            debug!(
                "ignoring {} body for {} card {}",
                body.kind(),
                self.kind(),
                self.id
            );
            false
        }
    }

    /// Merge a partial update into this card.
    pub fn apply_patch(&mut self, patch: &CardPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(body) = &patch.body {
            self.set_body(body.clone());
        }
    }
}

/// A partial card update: only the supplied attributes change.
///
/// A `body` whose variant does not match the target card's kind is dropped
/// rather than applied; a card never changes kind after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub body: Option<CardBody>,
}

impl CardPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Patch the content text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Patch the body.
    pub fn with_body(mut self, body: CardBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.body.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{PlotFields, RoleFields};

    #[test]
    fn test_new_card_placeholder() {
        let card = Card::new(CardType::Plot);
        assert_eq!(card.title, "new plot");
        assert!(card.content.is_empty());
        assert_eq!(card.kind(), CardType::Plot);
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new(CardType::Role)
            .with_title("李风")
            .with_content("15岁孤儿，倔强")
            .with_body(CardBody::Role(RoleFields {
                age: "15".to_string(),
                traits: "倔强, 勇敢".to_string(),
                goal: "寻找身世".to_string(),
                secret: "随身玉佩".to_string(),
                ..Default::default()
            }));

        assert_eq!(card.title, "李风");
        match &card.body {
            CardBody::Role(fields) => assert_eq!(fields.age, "15"),
            _ => panic!("expected a role body"),
        }
    }

    #[test]
    fn test_plot_ids_only_for_chapters() {
        assert!(Card::new(CardType::Chapter).plot_ids().is_some());
        assert!(Card::new(CardType::Plot).plot_ids().is_none());
        assert!(Card::new(CardType::Role).plot_ids().is_none());
    }

    #[test]
    fn test_mismatched_body_is_dropped() {
        let mut card = Card::new(CardType::Role).with_title("hero");
        let applied = card.set_body(CardBody::for_kind(CardType::Plot));

        assert!(!applied);
        assert_eq!(card.kind(), CardType::Role);
    }

    #[test]
    fn test_apply_patch_merges() {
        let mut card = Card::new(CardType::Plot).with_content("old text");

        card.apply_patch(&CardPatch::new().with_title("ambush"));

        assert_eq!(card.title, "ambush");
        assert_eq!(card.content, "old text");
    }

    #[test]
    fn test_patch_with_mismatched_body_keeps_kind() {
        let mut card = Card::new(CardType::Plot);
        let patch = CardPatch::new()
            .with_body(CardBody::Role(RoleFields::default()))
            .with_title("still a plot");

        card.apply_patch(&patch);

        assert_eq!(card.kind(), CardType::Plot);
        assert_eq!(card.title, "still a plot");
    }

    #[test]
    fn test_patch_body_applies_when_matching() {
        let mut card = Card::new(CardType::Plot);
        card.apply_patch(&CardPatch::new().with_body(CardBody::Plot(PlotFields {
            time_hint: "midnight".to_string(),
            ..Default::default()
        })));

        match &card.body {
            CardBody::Plot(fields) => assert_eq!(fields.time_hint, "midnight"),
            _ => panic!("expected a plot body"),
        }
    }

    #[test]
    fn test_empty_patch() {
        assert!(CardPatch::new().is_empty());
        assert!(!CardPatch::new().with_title("t").is_empty());
    }
}
