//! Tempo and mapping of symbolic time to seconds.
//!
//! Tempo changes are [`Interpolation`]s between two [`Tempo`]s, shaped by an
//! [`Easing`]. A [`Stratum`] lays interpolations one after another into a
//! tempo timeline.

use derivative::Derivative;

pub mod easing;
pub mod interpolation;
pub mod stratum;

pub use easing::Easing;
pub use interpolation::Interpolation;
pub use stratum::{Stratum, StratumBuilder};

/// Amount of segments per whole note, used to approximate seconds of
/// interpolations, that have no closed form.
pub static APPROXIMATION_RESOLUTION: u64 = 1024;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EasingError {
    #[error("Easing input should be in range [0, 1], found: {0}")]
    InputOutOfRange(f64),
    #[error(
        "Invalid parameter of {easing} easing: {value}, expected {expected}"
    )]
    InvalidParameter {
        easing: &'static str,
        value: f64,
        expected: &'static str,
    },
}
pub type EasingResult<T> = Result<T, EasingError>;

/// Beats per minute of the given subdivision (4 for quarters, 8 for eighths).
///
/// Equal tempos are the ones, that are equal after respelling to a common
/// subdivision: quarter = 60 is the same as eighth = 120.
///
/// # Example
/// ```
/// # use metrical::tempo::Tempo;
/// let quarter = Tempo::new(60.0, 4);
/// assert_eq!(quarter.duration_of_beat(), 1.0);
/// assert_eq!(quarter, Tempo::new(120.0, 8));
/// assert_eq!(quarter.respelling(2).beats_per_minute(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, Derivative)]
#[derivative(Default)]
pub struct Tempo {
    #[derivative(Default(value = "60.0"))]
    beats_per_minute: f64,
    #[derivative(Default(value = "4"))]
    subdivision: u64,
}
impl Tempo {
    /// # Panics
    /// If tempo is not positive, or subdivision is not a power of two.
    pub fn new(beats_per_minute: f64, subdivision: u64) -> Self {
        if !(beats_per_minute.is_finite() && beats_per_minute > 0.0) {
            panic!("tempo should be positive, found: {beats_per_minute}");
        }
        if !subdivision.is_power_of_two() {
            panic!("tempo subdivision should be a power of two: {subdivision}");
        }
        Self {
            beats_per_minute,
            subdivision,
        }
    }
    pub fn beats_per_minute(&self) -> f64 {
        self.beats_per_minute
    }
    pub fn subdivision(&self) -> u64 {
        self.subdivision
    }
    /// Seconds per beat.
    pub fn duration_of_beat(&self) -> f64 {
        60.0 / self.beats_per_minute
    }
    /// Same tempo, measured in another subdivision.
    pub fn respelling(&self, subdivision: u64) -> Self {
        let quotient = subdivision as f64 / self.subdivision as f64;
        Self::new(self.beats_per_minute * quotient, subdivision)
    }
}
impl PartialEq for Tempo {
    fn eq(&self, other: &Self) -> bool {
        let subdivision = self.subdivision.max(other.subdivision);
        self.respelling(subdivision).beats_per_minute
            == other.respelling(subdivision).beats_per_minute
    }
}
impl From<f64> for Tempo {
    /// Beats per minute of quarters.
    fn from(beats_per_minute: f64) -> Self {
        Self::new(beats_per_minute, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::Tempo;

    #[test]
    fn test_tempo() {
        let tempo = Tempo::default();
        assert_eq!(tempo.beats_per_minute(), 60.0);
        assert_eq!(tempo.subdivision(), 4);
        assert_eq!(Tempo::from(90.0), Tempo::new(90.0, 4));
        assert_eq!(Tempo::new(90.0, 4), Tempo::new(45.0, 2));
        assert_ne!(Tempo::new(90.0, 4), Tempo::new(90.0, 8));
        assert_eq!(Tempo::new(120.0, 4).duration_of_beat(), 0.5);
        let sixteenths = Tempo::new(120.0, 4).respelling(16);
        assert_eq!(sixteenths.beats_per_minute(), 480.0);
    }

    #[test]
    #[should_panic]
    fn test_non_positive_tempo() {
        let _ = Tempo::new(0.0, 4);
    }
}
