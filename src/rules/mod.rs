//! Round rules.
//!
//! A round compares the two in-play cards on one attribute (or by trump),
//! then moves both cards to the winner's deck. Sessions and the lookahead
//! search both go through these helpers, so simulated rounds follow exactly
//! the same rules as live ones.

pub mod resolver;

pub use resolver::{transfer, Clash, Resolution, RoundResolver, RoundWinner};
