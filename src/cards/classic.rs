//! The built-in eleven-car catalog, trump included.

use crate::core::CatalogError;

use super::attributes::AttributeSet;
use super::catalog::{Catalog, CatalogProvider};
use super::definition::{Card, CardId};

/// Attribute keys of the classic deck, in iteration order.
pub const CLASSIC_ATTRIBUTES: [&str; 4] = ["speed", "durability", "power", "price"];

// name, speed, durability, power, price
const CARS: [(&str, f64, f64, f64, f64); 10] = [
    ("Falcon GT", 320.0, 78.0, 480.0, 420_000.0),
    ("Veloce S", 330.0, 70.0, 520.0, 690_000.0),
    ("Strasse RS", 305.0, 85.0, 450.0, 510_000.0),
    ("Thunder R", 300.0, 88.0, 430.0, 290_000.0),
    ("Aurora X", 310.0, 92.0, 470.0, 580_000.0),
    ("Roadmaster V8", 280.0, 90.0, 400.0, 220_000.0),
    ("Corsa GTi", 240.0, 72.0, 220.0, 120_000.0),
    ("Tourer Hybrid", 230.0, 95.0, 200.0, 160_000.0),
    ("Riviera LX", 260.0, 80.0, 260.0, 240_000.0),
    ("Monaco V12", 340.0, 68.0, 700.0, 1_500_000.0),
];

/// Provider for the built-in deck: ten cars plus the "Super Trunfo" trump.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicCatalog;

impl ClassicCatalog {
    /// The raw cards, ids starting at 1, trump last.
    #[must_use]
    pub fn cards() -> Vec<Card> {
        let mut cards: Vec<Card> = CARS
            .iter()
            .zip(1u32..)
            .map(|(&(name, speed, durability, power, price), id)| {
                Card::new(CardId::new(id), name)
                    .with_attr("speed", speed)
                    .with_attr("durability", durability)
                    .with_attr("power", power)
                    .with_attr("price", price)
            })
            .collect();

        cards.push(
            Card::new(CardId::new(CARS.len() as u32 + 1), "Super Trunfo")
                .with_attr("speed", 999.0)
                .with_attr("durability", 999.0)
                .with_attr("power", 999.0)
                .with_attr("price", 999_999_999.0)
                .trump(),
        );
        cards
    }
}

impl CatalogProvider for ClassicCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Catalog::new(AttributeSet::new(CLASSIC_ATTRIBUTES), Self::cards())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_catalog_is_valid() {
        let catalog = ClassicCatalog.load().unwrap();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.trump_count(), 1);
        assert_eq!(catalog.attributes().len(), 4);
    }

    #[test]
    fn test_trump_is_last() {
        let cards = ClassicCatalog::cards();
        let trump = cards.last().unwrap();
        assert!(trump.is_trump);
        assert_eq!(trump.id, CardId::new(11));
        assert_eq!(trump.name, "Super Trunfo");
    }
}
