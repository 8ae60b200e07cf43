//! Card catalog: the validated, read-only card list a session deals from.
//!
//! Where the cards come from (a static table, a JSON file, a database) is the
//! business of a `CatalogProvider`. The engine only requires a validated list
//! with a consistent attribute key set; a `Catalog` is safe to share between
//! sessions behind an `Arc`.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::CatalogError;

use super::attributes::AttributeSet;
use super::definition::{Card, CardId};

/// Supplies the full card list at session start.
pub trait CatalogProvider {
    /// Produce a validated catalog or report why it cannot be built.
    fn load(&self) -> Result<Catalog, CatalogError>;
}

/// Validated card list plus its attribute key order.
///
/// ## Example
///
/// ```
/// use trunfo::cards::{AttributeSet, Card, CardId, Catalog};
///
/// let catalog = Catalog::new(
///     AttributeSet::new(["speed"]),
///     vec![
///         Card::new(CardId::new(1), "Falcon GT").with_attr("speed", 320.0),
///         Card::new(CardId::new(2), "Thunder R").with_attr("speed", 300.0),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert!(catalog.get(CardId::new(2)).is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    attributes: AttributeSet,
    cards: Vec<Arc<Card>>,
}

impl Catalog {
    /// Validate and build a catalog.
    ///
    /// Requires at least two cards, a non-empty key set, unique ids, every
    /// card carrying exactly the key set, and finite values only. More than
    /// one trump is accepted with a warning.
    pub fn new(attributes: AttributeSet, cards: Vec<Card>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }
        if cards.len() < 2 {
            return Err(CatalogError::TooSmall { found: cards.len() });
        }
        if attributes.is_empty() {
            return Err(CatalogError::NoAttributes);
        }

        let mut seen = FxHashSet::default();
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(CatalogError::DuplicateId(card.id));
            }
            if !attributes.matches(&card.attributes) {
                return Err(CatalogError::InconsistentAttributes { card: card.id });
            }
            for key in attributes.iter() {
                if card.value(key).is_some_and(|v| !v.is_finite()) {
                    return Err(CatalogError::NonFiniteValue {
                        card: card.id,
                        attribute: key.clone(),
                    });
                }
            }
        }

        let catalog = Self {
            attributes,
            cards: cards.into_iter().map(Arc::new).collect(),
        };
        let trumps = catalog.trump_count();
        if trumps > 1 {
            warn!(
                trumps,
                "catalog has more than one trump; trump against trump compares attributes"
            );
        }
        Ok(catalog)
    }

    /// Parse a catalog document.
    ///
    /// ```json
    /// { "attributes": ["speed", "power"],
    ///   "cards": [ { "id": 1, "name": "Falcon GT",
    ///                "attributes": { "speed": 320, "power": 480 },
    ///                "isTrump": false } ] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::new(doc.attributes, doc.cards)
    }

    /// The attribute key set in iteration order.
    #[must_use]
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// All cards in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[Arc<Card>] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Arc<Card>> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Number of trump cards. More than one makes trump-vs-trump possible.
    #[must_use]
    pub fn trump_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_trump).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Serialized catalog layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub attributes: AttributeSet,
    pub cards: Vec<Card>,
}

/// Provider over an in-memory card table.
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    attributes: AttributeSet,
    cards: Vec<Card>,
}

impl StaticCatalog {
    pub fn new(attributes: AttributeSet, cards: Vec<Card>) -> Self {
        Self { attributes, cards }
    }
}

impl CatalogProvider for StaticCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.attributes.clone(), self.cards.clone())
    }
}

/// Provider over a JSON catalog document.
#[derive(Clone, Debug)]
pub struct JsonCatalog {
    source: String,
}

impl JsonCatalog {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl CatalogProvider for JsonCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_json(&self.source)
    }
}
