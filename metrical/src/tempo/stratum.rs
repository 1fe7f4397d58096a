use fraction::Fraction;

use crate::{
    primitives::MetricalDuration,
    spanning::{
        SpanningContainer, SpanningContainerBuilder, SpanningFragment,
    },
};

use super::{Interpolation, Tempo};

/// Tempo timeline: interpolations, that follow one another.
///
/// Seconds offset of every interpolation is computed once, on construction.
///
/// # Example
/// ```
/// use fraction::Fraction;
/// use metrical::primitives::MetricalDuration;
/// use metrical::tempo::{Interpolation, Stratum, Tempo};
///
/// let mut builder = Stratum::builder();
/// let bar = MetricalDuration::new(4, 4);
/// let half = MetricalDuration::new(2, 4);
/// builder
///     .add(Interpolation::constant(Tempo::new(60.0, 4), bar))
///     .add(Interpolation::constant(Tempo::new(120.0, 4), half));
/// let stratum = builder.build();
///
/// let offset = Fraction::new(5u64, 4u64);
/// assert_eq!(stratum.seconds(), 5.0);
/// assert_eq!(stratum.seconds_offset(offset), Some(4.5));
/// assert_eq!(stratum.tempo_at(offset), Some(Tempo::new(120.0, 4)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Stratum {
    interpolations: SpanningContainer<Interpolation>,
    seconds_offsets: Vec<f64>,
}
impl Stratum {
    pub fn builder() -> StratumBuilder {
        StratumBuilder::new()
    }
    pub fn interpolations(&self) -> &SpanningContainer<Interpolation> {
        &self.interpolations
    }
    /// Symbolic length of the timeline.
    pub fn length(&self) -> Fraction {
        self.interpolations.length()
    }
    /// Duration of the whole timeline in seconds.
    pub fn seconds(&self) -> f64 {
        match (
            self.seconds_offsets.last(),
            self.interpolations.elements().last(),
        ) {
            (Some(offset), Some(last)) => offset + last.seconds(),
            _ => 0.0,
        }
    }

    /// Index of interpolation at offset.
    ///
    /// The end of the timeline belongs to the last interpolation.
    fn index_of(&self, offset: Fraction) -> Option<usize> {
        self.interpolations
            .index_of_element(offset, false)
            .or_else(|| self.interpolations.index_of_element(offset, true))
    }

    /// Interpolation at offset with the offset of its start.
    pub fn interpolation_containing(
        &self,
        offset: Fraction,
    ) -> Option<(Fraction, &Interpolation)> {
        let index = self.index_of(offset)?;
        Some((
            self.interpolations.offsets()[index],
            &self.interpolations.elements()[index],
        ))
    }

    /// # Returns
    /// None if offset is out of the timeline.
    pub fn tempo_at(&self, offset: Fraction) -> Option<Tempo> {
        let (start, interpolation) = self.interpolation_containing(offset)?;
        Some(interpolation.tempo_at(offset - start))
    }

    /// Seconds from the timeline start to the offset.
    ///
    /// # Returns
    /// None if offset is out of the timeline.
    pub fn seconds_offset(&self, offset: Fraction) -> Option<f64> {
        let index = self.index_of(offset)?;
        let start = self.interpolations.offsets()[index];
        let interpolation = &self.interpolations.elements()[index];
        let inside = interpolation.seconds_offset(offset - start);
        Some(self.seconds_offsets[index] + inside)
    }

    /// Part of the timeline between offsets, starting from zero.
    ///
    /// Offsets are metrical, so interpolations at the edges are cut into
    /// metrical durations too. The end is clamped to the timeline length.
    pub fn fragment(
        &self,
        from: MetricalDuration,
        to: MetricalDuration,
    ) -> Self {
        Self::from(self.interpolations.fragment(from.get()..to.get()))
    }
}
impl From<SpanningContainer<Interpolation>> for Stratum {
    fn from(interpolations: SpanningContainer<Interpolation>) -> Self {
        let seconds_offsets = interpolations
            .elements()
            .iter()
            .scan(0.0, |seconds, interpolation| {
                let offset = *seconds;
                *seconds += interpolation.seconds();
                Some(offset)
            })
            .collect::<Vec<_>>();
        log::debug!(
            "stratum of {} interpolations, seconds offsets: {:?}",
            interpolations.len(),
            seconds_offsets
        );
        Self {
            interpolations,
            seconds_offsets,
        }
    }
}
impl Default for Stratum {
    fn default() -> Self {
        Self::from(SpanningContainer::empty())
    }
}

#[derive(Debug, Default)]
pub struct StratumBuilder {
    builder: SpanningContainerBuilder<Interpolation>,
}
impl StratumBuilder {
    pub fn new() -> Self {
        Self {
            builder: SpanningContainerBuilder::new(),
        }
    }
    /// Append interpolation at the end of the timeline.
    pub fn add(&mut self, interpolation: Interpolation) -> &mut Self {
        log::debug!(
            "adding interpolation {:?} -> {:?} of {}",
            interpolation.start(),
            interpolation.end(),
            interpolation.length()
        );
        self.builder.add(interpolation);
        self
    }
    pub fn build(self) -> Stratum {
        Stratum::from(self.builder.build())
    }
}
