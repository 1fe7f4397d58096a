use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Sub},
};

use fraction::Fraction;

use super::fraction_tools::normalize_fraction;

/// Duration, that can be written in the score: its denominator is always a
/// power of two.
///
/// Keeps the spelling it was created with (`4/16` is not turned into `1/4`),
/// because the spelling tells the subdivision of the written value. Still,
/// comparison is made by value.
///
/// # Example
/// ```
/// # use fraction::Fraction;
/// # use metrical::primitives::MetricalDuration;
/// let a = MetricalDuration::new(4, 16);
/// assert_eq!(a.numerator(), 4);
/// assert_eq!(a, MetricalDuration::new(1, 4));
/// assert_eq!(a.get(), Fraction::new(1u64, 4u64));
/// assert_eq!(a + MetricalDuration::new(1, 8), MetricalDuration::new(6, 16));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MetricalDuration {
    numerator: u64,
    denominator: u64,
}
impl MetricalDuration {
    /// # Panics
    /// If denominator is not a power of two.
    pub fn new(numerator: u64, denominator: u64) -> Self {
        if !denominator.is_power_of_two() {
            panic!(
                "denominator of metrical duration should be a power of two: \
                {numerator}/{denominator}"
            );
        }
        Self {
            numerator,
            denominator,
        }
    }
    pub fn zero() -> Self {
        Self::new(0, 1)
    }
    pub fn numerator(&self) -> u64 {
        self.numerator
    }
    pub fn denominator(&self) -> u64 {
        self.denominator
    }
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }
    /// Exact value as Fraction.
    pub fn get(&self) -> Fraction {
        Fraction::new(self.numerator, self.denominator)
    }
    /// Same duration, written with the smallest possible denominator.
    pub fn reduced(&self) -> Self {
        Self::from(self.get())
    }
    /// Same duration, written in the given subdivision.
    ///
    /// # Panics
    /// If the duration can not be expressed in the subdivision
    /// (e.g. `3/16` in `8`).
    pub fn respelling(&self, denominator: u64) -> Self {
        let scaled = self.numerator as u128 * denominator as u128;
        if scaled % self.denominator as u128 != 0 {
            panic!("can not respell {self} in subdivision {denominator}");
        }
        Self::new((scaled / self.denominator as u128) as u64, denominator)
    }
    /// Split by plain and dotted values, from the smallest to the largest.
    ///
    /// ```
    /// # use metrical::primitives::MetricalDuration;
    /// assert_eq!(
    ///     MetricalDuration::new(7, 16).components(),
    ///     vec![MetricalDuration::new(3, 16), MetricalDuration::new(1, 4)]
    /// );
    /// ```
    pub fn components(&self) -> Vec<Self> {
        normalize_fraction(self.get())
            .into_iter()
            .map(Self::from)
            .collect()
    }
}
impl PartialEq for MetricalDuration {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}
impl Eq for MetricalDuration {}
impl PartialOrd for MetricalDuration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for MetricalDuration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get().cmp(&other.get())
    }
}
impl Default for MetricalDuration {
    fn default() -> Self {
        Self::zero()
    }
}
impl fmt::Display for MetricalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
/// # Panics
/// If fraction is negative, not finite or has non-power-of-two denominator.
impl From<Fraction> for MetricalDuration {
    fn from(value: Fraction) -> Self {
        if value.is_sign_negative() && value.numer() != Some(&0) {
            panic!("metrical duration can not be negative: {value}");
        }
        match (value.numer(), value.denom()) {
            (Some(num), Some(den)) => Self::new(*num, *den),
            _ => panic!("metrical duration should be finite: {value}"),
        }
    }
}
impl From<MetricalDuration> for Fraction {
    fn from(value: MetricalDuration) -> Self {
        value.get()
    }
}
impl Add for MetricalDuration {
    fn add(self, rhs: Self) -> Self::Output {
        let denominator = self.denominator.max(rhs.denominator);
        let (a, b) =
            (self.respelling(denominator), rhs.respelling(denominator));
        Self::new(a.numerator + b.numerator, denominator)
    }
    type Output = Self;
}
impl Sub for MetricalDuration {
    fn sub(self, rhs: Self) -> Self::Output {
        let denominator = self.denominator.max(rhs.denominator);
        let (a, b) =
            (self.respelling(denominator), rhs.respelling(denominator));
        if a.numerator < b.numerator {
            panic!(
                "metrical duration can not be negative. \
                left: {self}, right: {rhs}"
            );
        }
        Self::new(a.numerator - b.numerator, denominator)
    }
    type Output = Self;
}

#[cfg(test)]
mod tests {
    use fraction::Fraction;

    use super::MetricalDuration;

    #[test]
    fn metrical_duration() {
        let a = MetricalDuration::new(2, 8);
        let b = MetricalDuration::from(Fraction::new(1u64, 4u64));
        assert_eq!(a, b);
        assert_eq!(b.denominator(), 4);
        assert_eq!(a.reduced().denominator(), 4);
        assert_eq!(a.respelling(32).numerator(), 8);
        assert!(MetricalDuration::new(1, 8) < MetricalDuration::new(3, 16));
        assert_eq!(
            (MetricalDuration::new(3, 8) - MetricalDuration::new(1, 16))
                .to_string(),
            "5/16"
        );
        assert!(MetricalDuration::zero().is_zero());
    }
    #[test]
    #[should_panic]
    fn non_metrical_denominator() {
        let _ = MetricalDuration::new(1, 12);
    }
    #[test]
    #[should_panic]
    fn negative_sub() {
        let _ = MetricalDuration::new(1, 8) - MetricalDuration::new(1, 4);
    }
    #[test]
    #[should_panic]
    fn respelling_to_coarser_subdivision() {
        let _ = MetricalDuration::new(3, 16).respelling(8);
    }
}
