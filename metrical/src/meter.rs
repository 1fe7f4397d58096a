//! Meters and collections of them.
//!
//! Collection is a "ruler" of the score: meters follow one another, and the
//! first or the last one may be only partially covered (e.g. pickup measure).
use std::{fmt, ops::Range};

use fraction::Fraction;

use crate::{
    primitives::{zero, MetricalDuration},
    spanning::{SpanningContainer, SpanningContainerBuilder, SpanningFragment},
};

pub type MeterCollection = SpanningContainer<MeterFragment>;
pub type MeterCollectionBuilder = SpanningContainerBuilder<MeterFragment>;

/// Time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meter {
    numerator: u64,
    denominator: u64,
}
impl Meter {
    /// # Panics
    /// If denominator is not a power of two, or numerator is zero.
    pub fn new(numerator: u64, denominator: u64) -> Self {
        if numerator == 0 || !denominator.is_power_of_two() {
            panic!("invalid meter: {numerator}/{denominator}");
        }
        Self {
            numerator,
            denominator,
        }
    }
    pub fn numerator(&self) -> u64 {
        self.numerator
    }
    pub fn denominator(&self) -> u64 {
        self.denominator
    }
    /// Duration of the whole measure, spelled as the meter (`6/8` stays `6/8`).
    pub fn duration(&self) -> MetricalDuration {
        MetricalDuration::new(self.numerator, self.denominator)
    }
    pub fn length(&self) -> Fraction {
        self.duration().get()
    }
    /// Offset of every beat from the start of the measure.
    ///
    /// ```
    /// # use fraction::Fraction;
    /// # use metrical::meter::Meter;
    /// assert_eq!(
    ///     Meter::new(3, 8).beat_offsets(),
    ///     vec![
    ///         Fraction::new(0u64, 8u64),
    ///         Fraction::new(1u64, 8u64),
    ///         Fraction::new(2u64, 8u64)
    ///     ]
    /// );
    /// ```
    pub fn beat_offsets(&self) -> Vec<Fraction> {
        (0..self.numerator)
            .map(|beat| Fraction::new(beat, self.denominator))
            .collect()
    }
}
impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Meter, may be covered only partially.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterFragment {
    meter: Meter,
    range: Range<Fraction>,
}
impl MeterFragment {
    /// # Panics
    /// If range is empty or is not inside the meter.
    pub fn new(meter: Meter, range: Range<Fraction>) -> Self {
        if range.start < zero()
            || range.end > meter.length()
            || range.start >= range.end
        {
            panic!("range {:?} is out of meter {}", range, meter);
        }
        Self { meter, range }
    }
    pub fn meter(&self) -> &Meter {
        &self.meter
    }
    /// True if the whole meter is covered.
    pub fn is_whole(&self) -> bool {
        self.range.start == zero() && self.range.end == self.meter.length()
    }
    /// Beats inside the fragment, offset from the fragment start.
    pub fn beat_offsets(&self) -> Vec<Fraction> {
        self.meter
            .beat_offsets()
            .into_iter()
            .filter(|beat| self.range.contains(beat))
            .map(|beat| beat - self.range.start)
            .collect()
    }
}
impl From<Meter> for MeterFragment {
    fn from(meter: Meter) -> Self {
        Self {
            range: zero()..meter.length(),
            meter,
        }
    }
}
impl SpanningFragment for MeterFragment {
    fn range(&self) -> Range<Fraction> {
        self.range.clone()
    }
    fn fragment(&self, range: Range<Fraction>) -> Self {
        let start = range.start.max(self.range.start);
        let end = range.end.min(self.range.end);
        Self::new(self.meter, start..end)
    }
}

impl MeterCollectionBuilder {
    /// Append the whole meter.
    pub fn add_meter(&mut self, meter: Meter) -> &mut Self {
        self.add(MeterFragment::from(meter))
    }
}
impl MeterCollection {
    /// Offsets of every beat in the collection, from its start.
    pub fn beat_offsets(&self) -> Vec<Fraction> {
        self.iter()
            .flat_map(|(offset, fragment)| {
                fragment
                    .beat_offsets()
                    .into_iter()
                    .map(move |beat| offset + beat)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use fraction::Fraction;

    use crate::spanning::SpanningFragment;

    use super::{Meter, MeterCollection, MeterFragment};

    fn meters() -> MeterCollection {
        let mut builder = MeterCollection::builder();
        builder
            .add_meter(Meter::new(4, 4))
            .add_meter(Meter::new(4, 4))
            .add_meter(Meter::new(4, 4))
            .add_meter(Meter::new(7, 8))
            .add_meter(Meter::new(9, 8))
            .add_meter(Meter::new(4, 4));
        builder.build()
    }

    #[test]
    fn test_meter() {
        let meter = Meter::new(6, 8);
        assert_eq!(meter.duration().to_string(), "6/8");
        assert_eq!(meter.length(), Fraction::new(3u64, 4u64));
        assert_eq!(meter.to_string(), "6/8");
    }

    #[test]
    #[should_panic]
    fn test_non_metrical_meter() {
        let _ = Meter::new(3, 6);
    }

    #[test]
    fn test_fragment() {
        let whole = MeterFragment::from(Meter::new(4, 4));
        assert!(whole.is_whole());
        let tail =
            whole.fragment(Fraction::new(1u64, 4u64)..Fraction::from(1.0));
        assert!(!tail.is_whole());
        assert_eq!(tail.length(), Fraction::new(3u64, 4u64));
        assert_eq!(
            tail.beat_offsets(),
            vec![
                Fraction::new(0u64, 4u64),
                Fraction::new(1u64, 4u64),
                Fraction::new(2u64, 4u64)
            ]
        );
        let off_beat = whole
            .fragment(Fraction::new(1u64, 8u64)..Fraction::new(1u64, 2u64));
        assert_eq!(off_beat.beat_offsets(), vec![Fraction::new(1u64, 8u64)]);
    }

    #[test]
    fn test_collection() {
        let meters = meters();
        assert_eq!(meters.len(), 6);
        assert_eq!(meters.length(), Fraction::from(6.0));
        let (offset, fragment) = meters
            .element_containing(Fraction::new(8 * 3 + 7 + 3u64, 8u64))
            .expect("no meter at position");
        assert_eq!(offset, Fraction::new(8 * 3 + 7u64, 8u64));
        assert_eq!(*fragment.meter(), Meter::new(9, 8));
        assert_eq!(meters.beat_offsets().len(), 4 * 3 + 7 + 9 + 4);
    }

    #[test]
    fn test_collection_fragment() {
        let meters = meters();
        let fragment = meters.fragment(
            Fraction::new(5u64, 2u64)..Fraction::new(31u64 + 4, 8u64),
        );
        assert_eq!(fragment.len(), 3);
        assert_eq!(
            fragment.elements()[0],
            MeterFragment::new(
                Meter::new(4, 4),
                Fraction::new(1u64, 2u64)..Fraction::from(1.0)
            )
        );
        assert_eq!(*fragment.elements()[1].meter(), Meter::new(7, 8));
        assert!(fragment.elements()[1].is_whole());
        assert_eq!(
            fragment.elements()[2],
            MeterFragment::new(
                Meter::new(9, 8),
                Fraction::from(0.0)..Fraction::new(1u64, 2u64)
            )
        );
        assert_eq!(fragment.length(), Fraction::new(15u64, 8u64));
        assert_eq!(
            meters.fragment(Fraction::from(0.0)..meters.length()),
            meters
        );
    }
}
