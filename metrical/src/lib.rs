//! Exact rhythm and tempo structures.
//!
//! Durations are rational numbers with power-of-two denominators, so
//! everything built here stays notatable:
//!
//! - [`duration`] turns trees of proportions (nested tuplets) into trees of
//!   metrical durations.
//! - [`spanning`] keeps sequences of spans (meters, tempo changes) keyed by
//!   their cumulative offset.
//! - [`tempo`] maps symbolic time to seconds through eased tempo changes.

pub mod duration;
pub mod meter;
pub mod primitives;
pub mod spanning;
pub mod tempo;
