//! Card system: attributes, cards, decks, and catalogs.
//!
//! ## Key Types
//!
//! - `AttributeKey` / `AttributeSet`: the fixed, ordered comparison keys
//! - `Card`: immutable card value, shared as `Arc<Card>`
//! - `Deck`: FIFO deck with O(1) clone for search
//! - `Catalog`: validated card list a session deals from
//! - `CatalogProvider`: source of catalogs (static table, JSON, built-in deck)

pub mod attributes;
pub mod catalog;
pub mod classic;
pub mod deck;
pub mod definition;

pub use attributes::{AttributeKey, AttributeSet, Attributes};
pub use catalog::{Catalog, CatalogDocument, CatalogProvider, JsonCatalog, StaticCatalog};
pub use classic::{ClassicCatalog, CLASSIC_ATTRIBUTES};
pub use deck::Deck;
pub use definition::{Card, CardId};
