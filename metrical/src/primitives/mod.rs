//! Building blocks for everything else in the crate.
//!
//! Rational arithmetic itself comes from the `fraction` crate. Here are the
//! helpers around it, the power-of-two [`MetricalDuration`] and the generic
//! leaf/branch [`Tree`].

pub mod fraction_tools;
pub mod metrical_duration;
pub mod tree;

pub use fraction::Fraction;
pub use fraction_tools::{
    closest_power_of_two, fraction_to_f64, gcd, gcd_all, lcm, lcm_all,
    normalize_fraction, zero,
};
pub use metrical_duration::MetricalDuration;
pub use tree::Tree;
