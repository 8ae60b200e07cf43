//! Card attribute system.
//!
//! Every card in a catalog carries the same small set of numeric attributes
//! (speed, power, price, ...). The set and its iteration order are fixed per
//! catalog; every tie-break in the AI follows that order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Key for accessing card attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    /// Create a new attribute key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AttributeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attribute values of a single card.
pub type Attributes = FxHashMap<AttributeKey, f64>;

/// The ordered attribute key set shared by every card of a catalog.
///
/// ```
/// use trunfo::cards::AttributeSet;
///
/// let set = AttributeSet::new(["speed", "durability", "power", "price"]);
/// assert_eq!(set.len(), 4);
/// assert_eq!(set.first().map(|k| k.as_str()), Some("speed"));
/// assert!(set.contains(&"power".into()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    keys: SmallVec<[AttributeKey; 6]>,
}

impl AttributeSet {
    /// Build a set from keys in iteration order. Repeated keys are dropped.
    pub fn new<K: Into<AttributeKey>>(keys: impl IntoIterator<Item = K>) -> Self {
        let mut set = Self::default();
        for key in keys {
            let key = key.into();
            if !set.contains(&key) {
                set.keys.push(key);
            }
        }
        set
    }

    /// Keys in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeKey> {
        self.keys.iter()
    }

    /// Keys as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[AttributeKey] {
        &self.keys
    }

    /// First key in iteration order.
    #[must_use]
    pub fn first(&self) -> Option<&AttributeKey> {
        self.keys.first()
    }

    #[must_use]
    pub fn contains(&self, key: &AttributeKey) -> bool {
        self.keys.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True when `attributes` has exactly these keys.
    #[must_use]
    pub fn matches(&self, attributes: &Attributes) -> bool {
        attributes.len() == self.keys.len() && self.keys.iter().all(|k| attributes.contains_key(k))
    }
}
