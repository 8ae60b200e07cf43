//! One-ply greedy attribute choice.
//!
//! Used as the Medium tier and as the fixed opponent reply inside the
//! asymmetric lookahead search.

use crate::cards::{AttributeKey, AttributeSet, Card};
use crate::rules::Clash;

/// Immediate advantage of `mover` over `opponent` on `key`.
///
/// A lone trump mover is worth `+inf` on every key and a lone trump
/// opponent `-inf`; two trumps (or none) compare plain values.
#[must_use]
pub fn advantage(mover: &Card, opponent: &Card, key: &AttributeKey) -> f64 {
    match Clash::trump_override(mover, opponent) {
        Some(Clash::Win) => f64::INFINITY,
        Some(Clash::Loss) => f64::NEG_INFINITY,
        _ => mover.value(key).unwrap_or(0.0) - opponent.value(key).unwrap_or(0.0),
    }
}

/// Greedy heuristic advisor.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAdvisor;

impl GreedyAdvisor {
    /// The key maximizing `mover[key] - opponent[key]`.
    ///
    /// Ties go to the earliest key in `attributes`. Returns `None` only for
    /// an empty key set.
    ///
    /// ```
    /// use trunfo::ai::GreedyAdvisor;
    /// use trunfo::cards::{AttributeSet, Card, CardId};
    ///
    /// let keys = AttributeSet::new(["speed", "power"]);
    /// let mover = Card::new(CardId::new(1), "A")
    ///     .with_attr("speed", 300.0)
    ///     .with_attr("power", 500.0);
    /// let opponent = Card::new(CardId::new(2), "B")
    ///     .with_attr("speed", 290.0)
    ///     .with_attr("power", 400.0);
    ///
    /// let best = GreedyAdvisor::best_attribute(&keys, &mover, &opponent).unwrap();
    /// assert_eq!(best.as_str(), "power");
    /// ```
    #[must_use]
    pub fn best_attribute<'a>(
        attributes: &'a AttributeSet,
        mover: &Card,
        opponent: &Card,
    ) -> Option<&'a AttributeKey> {
        let mut best: Option<(&AttributeKey, f64)> = None;
        for key in attributes.iter() {
            let adv = advantage(mover, opponent, key);
            match best {
                Some((_, top)) if adv <= top => {}
                _ => best = Some((key, adv)),
            }
        }
        best.map(|(key, _)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn keys() -> AttributeSet {
        AttributeSet::new(["speed", "durability", "power", "price"])
    }

    fn car(id: u32, values: [f64; 4]) -> Card {
        Card::new(CardId::new(id), format!("Car {id}"))
            .with_attr("speed", values[0])
            .with_attr("durability", values[1])
            .with_attr("power", values[2])
            .with_attr("price", values[3])
    }

    #[test]
    fn test_picks_largest_margin() {
        let mover = car(1, [320.0, 78.0, 480.0, 420_000.0]);
        let opponent = car(2, [300.0, 88.0, 430.0, 290_000.0]);

        let keys = keys();
        let best = GreedyAdvisor::best_attribute(&keys, &mover, &opponent).unwrap();
        assert_eq!(best.as_str(), "price");
    }

    #[test]
    fn test_ties_go_to_first_key() {
        let mover = car(1, [10.0, 10.0, 10.0, 10.0]);
        let opponent = car(2, [5.0, 5.0, 5.0, 5.0]);

        let keys = keys();
        let best = GreedyAdvisor::best_attribute(&keys, &mover, &opponent).unwrap();
        assert_eq!(best.as_str(), "speed");
    }

    #[test]
    fn test_negative_margins_pick_least_bad() {
        let mover = car(1, [1.0, 2.0, 3.0, 4.0]);
        let opponent = car(2, [10.0, 10.0, 4.0, 10.0]);

        let keys = keys();
        let best = GreedyAdvisor::best_attribute(&keys, &mover, &opponent).unwrap();
        assert_eq!(best.as_str(), "power");
    }

    #[test]
    fn test_trump_advantages() {
        let trump = car(1, [0.0; 4]).trump();
        let plain = car(2, [100.0; 4]);
        let key: AttributeKey = "speed".into();

        assert_eq!(advantage(&trump, &plain, &key), f64::INFINITY);
        assert_eq!(advantage(&plain, &trump, &key), f64::NEG_INFINITY);

        let other_trump = car(3, [50.0; 4]).trump();
        assert_eq!(advantage(&trump, &other_trump, &key), -50.0);
    }

    #[test]
    fn test_against_trump_falls_back_to_first_key() {
        let plain = car(1, [1.0, 999.0, 1.0, 1.0]);
        let trump = car(2, [0.0; 4]).trump();

        let keys = keys();
        let best = GreedyAdvisor::best_attribute(&keys, &plain, &trump).unwrap();
        assert_eq!(best.as_str(), "speed");
    }

    #[test]
    fn test_empty_key_set() {
        let a = car(1, [1.0; 4]);
        let b = car(2, [1.0; 4]);
        assert!(GreedyAdvisor::best_attribute(&AttributeSet::default(), &a, &b).is_none());
    }
}
