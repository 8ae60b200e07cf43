//! Card definitions.
//!
//! A `Card` is immutable once built and is shared between decks, search
//! clones and round outcomes as `Arc<Card>`.

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeKey, Attributes};

/// Unique identifier for a card within a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A vehicle card.
///
/// ## Example
///
/// ```
/// use trunfo::cards::{Card, CardId};
///
/// let falcon = Card::new(CardId::new(1), "Falcon GT")
///     .with_attr("speed", 320.0)
///     .with_attr("power", 480.0);
///
/// assert_eq!(falcon.value(&"speed".into()), Some(320.0));
/// assert!(!falcon.is_trump);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier within the catalog.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Numeric attribute values.
    pub attributes: Attributes,

    /// The trump card beats every non-trump card.
    #[serde(default, alias = "isTrump")]
    pub is_trump: bool,
}

impl Card {
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: Attributes::default(),
            is_trump: false,
        }
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<AttributeKey>, value: f64) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Mark as the trump card.
    #[must_use]
    pub fn trump(mut self) -> Self {
        self.is_trump = true;
        self
    }

    /// Value of an attribute, if the card has it.
    #[must_use]
    pub fn value(&self, key: &AttributeKey) -> Option<f64> {
        self.attributes.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id, CardId(42));
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new(CardId::new(11), "Super Trunfo")
            .with_attr("speed", 999.0)
            .trump();

        assert_eq!(card.name, "Super Trunfo");
        assert!(card.is_trump);
        assert_eq!(card.value(&"speed".into()), Some(999.0));
        assert_eq!(card.value(&"price".into()), None);
    }

    #[test]
    fn test_card_deserializes_catalog_shape() {
        let json = r#"{
            "id": 3,
            "name": "Thunder R",
            "attributes": {"speed": 300, "power": 430},
            "isTrump": false
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::new(3));
        assert_eq!(card.value(&"power".into()), Some(430.0));
        assert!(!card.is_trump);
    }

    #[test]
    fn test_trump_flag_defaults_to_false() {
        let json = r#"{"id": 1, "name": "Corsa GTi", "attributes": {"speed": 240}}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert!(!card.is_trump);
    }
}
