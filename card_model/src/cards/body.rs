//! Per-kind card bodies - the typed attribute sets behind each card kind.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{CardId, CardType};

/// The kind-specific data of a card.
///
/// Each kind carries a fixed field set plus an `extra` string map for truly
/// open-ended attributes. Structural data lives in the variant that owns it:
/// only chapters have `plot_ids`, only plots have provenance, and the type
/// system keeps it that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardBody {
    Role(RoleFields),
    Event(EventFields),
    Setting(SettingFields),
    Plot(PlotFields),
    Chapter(ChapterFields),
}

impl CardBody {
    /// Create the default (empty) body for a card kind.
    pub fn for_kind(kind: CardType) -> Self {
        match kind {
            CardType::Role => CardBody::Role(RoleFields::default()),
            CardType::Event => CardBody::Event(EventFields::default()),
            CardType::Setting => CardBody::Setting(SettingFields::default()),
            CardType::Plot => CardBody::Plot(PlotFields::default()),
            CardType::Chapter => CardBody::Chapter(ChapterFields::default()),
        }
    }

    /// The card kind this body belongs to.
    pub fn kind(&self) -> CardType {
        match self {
            CardBody::Role(_) => CardType::Role,
            CardBody::Event(_) => CardType::Event,
            CardBody::Setting(_) => CardType::Setting,
            CardBody::Plot(_) => CardType::Plot,
            CardBody::Chapter(_) => CardType::Chapter,
        }
    }

    /// The open-ended attribute map, whatever the kind.
    pub fn extra(&self) -> &HashMap<String, String> {
        match self {
            CardBody::Role(f) => &f.extra,
            CardBody::Event(f) => &f.extra,
            CardBody::Setting(f) => &f.extra,
            CardBody::Plot(f) => &f.extra,
            CardBody::Chapter(f) => &f.extra,
        }
    }

    /// Mutable access to the open-ended attribute map.
    pub fn extra_mut(&mut self) -> &mut HashMap<String, String> {
        match self {
            CardBody::Role(f) => &mut f.extra,
            CardBody::Event(f) => &mut f.extra,
            CardBody::Setting(f) => &mut f.extra,
            CardBody::Plot(f) => &mut f.extra,
            CardBody::Chapter(f) => &mut f.extra,
        }
    }
}

/// Fields of a role (character) card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoleFields {
    pub age: String,
    pub traits: String,
    pub goal: String,
    pub secret: String,
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// Fields of an event card. Events are open-ended by nature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EventFields {
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// Fields of a setting (world-building) card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SettingFields {
    pub weather: String,
    pub atmosphere: String,
    pub key_items: String,
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// Fields of a plot card.
///
/// `source_card_ids` records which basket cards an externally generated plot
/// came from; it stays empty for manually created plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlotFields {
    pub time_hint: String,
    pub place_hint: String,
    #[serde(default)]
    pub source_card_ids: Vec<CardId>,
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// Fields of a chapter card.
///
/// `plot_ids` is the ordered list of plot cards folded into this chapter.
/// Order is insertion order and survives further merges. Chapters never
/// reference other chapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChapterFields {
    pub plot_ids: Vec<CardId>,
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_for_kind() {
        for kind in [
            CardType::Role,
            CardType::Event,
            CardType::Setting,
            CardType::Plot,
            CardType::Chapter,
        ] {
            assert_eq!(CardBody::for_kind(kind).kind(), kind);
        }
    }

    #[test]
    fn test_extra_map_access() {
        let mut body = CardBody::for_kind(CardType::Event);
        body.extra_mut()
            .insert("mood".to_string(), "tense".to_string());

        assert_eq!(body.extra().get("mood").map(String::as_str), Some("tense"));
    }

    #[test]
    fn test_chapter_owns_plot_ids() {
        let a = CardId::new();
        let b = CardId::new();
        let body = CardBody::Chapter(ChapterFields {
            plot_ids: vec![a, b],
            extra: HashMap::new(),
        });

        match body {
            CardBody::Chapter(fields) => assert_eq!(fields.plot_ids, vec![a, b]),
            _ => panic!("expected a chapter body"),
        }
    }

    #[test]
    fn test_plot_provenance_defaults_empty() {
        let body = CardBody::for_kind(CardType::Plot);
        match body {
            CardBody::Plot(fields) => {
                assert!(fields.source_card_ids.is_empty());
                assert!(fields.time_hint.is_empty());
            }
            _ => panic!("expected a plot body"),
        }
    }
}
