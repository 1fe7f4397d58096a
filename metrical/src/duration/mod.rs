//! Durations, derived from nested proportions.
//!
//! A [`ProportionTree`] describes rhythm without concrete values, e.g.
//! "three equal notes, the last one split in two". [`normalize`] makes it
//! representable in power-of-two subdivisions and [`MetricalDurationTree`]
//! binds it to a concrete duration.

pub mod duration_tree;
pub mod proportion_tree;

pub use duration_tree::MetricalDurationTree;
pub use proportion_tree::{normalize, DistanceTree, ProportionTree};
