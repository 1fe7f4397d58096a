//! Single continuous tempo change.
use std::ops::Range;

use fraction::Fraction;

use crate::{
    primitives::{
        fraction_to_f64, fraction_tools::whole_part, lcm_all, zero,
        MetricalDuration,
    },
    spanning::SpanningFragment,
};

use super::{Easing, EasingResult, Tempo, APPROXIMATION_RESOLUTION};

/// Tempo change from `start` to `end` over the metrical duration.
///
/// Tempo is interpolated geometrically: the eased proportion of the
/// duration is applied to the ratio of tempos, not to their difference.
///
/// # Example
/// ```
/// use fraction::Fraction;
/// use metrical::primitives::MetricalDuration;
/// use metrical::tempo::{Interpolation, Tempo};
///
/// let ritardando = Interpolation::linear(
///     Tempo::new(120.0, 4),
///     Tempo::new(60.0, 4),
///     MetricalDuration::new(4, 4),
/// );
/// let middle = ritardando.tempo_at(Fraction::new(1u64, 2u64));
/// assert!((middle.beats_per_minute() - 60.0 * 2f64.sqrt()).abs() < 1e-9);
/// assert_eq!(
///     ritardando.tempo_at(Fraction::from(2.0)),
///     Tempo::new(60.0, 4)
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    start: Tempo,
    end: Tempo,
    duration: MetricalDuration,
    easing: Easing,
}
impl Interpolation {
    /// # Panics
    /// If duration is zero.
    pub fn new(
        start: Tempo,
        end: Tempo,
        duration: MetricalDuration,
        easing: Easing,
    ) -> EasingResult<Self> {
        easing.validate()?;
        if duration.is_zero() {
            panic!("interpolation should have non-zero duration");
        }
        Ok(Self {
            start,
            end,
            duration,
            easing,
        })
    }
    /// Tempo, that does not change.
    pub fn constant(tempo: Tempo, duration: MetricalDuration) -> Self {
        Self::linear(tempo, tempo, duration)
    }
    /// # Panics
    /// If duration is zero.
    pub fn linear(
        start: Tempo,
        end: Tempo,
        duration: MetricalDuration,
    ) -> Self {
        if duration.is_zero() {
            panic!("interpolation should have non-zero duration");
        }
        Self {
            start,
            end,
            duration,
            easing: Easing::Linear,
        }
    }

    pub fn start(&self) -> Tempo {
        self.start
    }
    pub fn end(&self) -> Tempo {
        self.end
    }
    pub fn duration(&self) -> MetricalDuration {
        self.duration
    }
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Tempo at the offset from the interpolation start.
    ///
    /// Offsets after the end give the end tempo.
    pub fn tempo_at(&self, offset: Fraction) -> Tempo {
        let duration = self.duration.get();
        if offset >= duration {
            return self.end;
        }
        let offset = offset.max(zero());
        let subdivision = self.common_subdivision();
        let (start, end) = (
            self.start.respelling(subdivision),
            self.end.respelling(subdivision),
        );
        let eased = self.ease(fraction_to_f64(offset / duration));
        let ratio = end.beats_per_minute() / start.beats_per_minute();
        Tempo::new(start.beats_per_minute() * ratio.powf(eased), subdivision)
    }

    /// Seconds from the interpolation start to the offset.
    ///
    /// Constant and linear interpolations are computed exactly, others are
    /// approximated (see [`Self::approximate_seconds_offset`]). After the end
    /// time flows with the end tempo.
    pub fn seconds_offset(&self, offset: Fraction) -> f64 {
        if offset <= zero() {
            return 0.0;
        }
        let duration = self.duration.get();
        if offset > duration {
            return self.seconds() + seconds_in(offset - duration, self.end);
        }
        if self.start == self.end {
            return seconds_in(offset, self.start);
        }
        match self.easing {
            Easing::Linear => self.linear_seconds_offset(offset),
            _ => self.approximate_seconds_offset(offset),
        }
    }

    /// Seconds of the whole interpolation.
    pub fn seconds(&self) -> f64 {
        self.seconds_offset(self.duration.get())
    }

    /// Sum of segments of `1 / APPROXIMATION_RESOLUTION`, each one played
    /// with the tempo at its start.
    pub fn approximate_seconds_offset(&self, offset: Fraction) -> f64 {
        let offset = offset.max(zero()).min(self.duration.get());
        let segment = Fraction::new(1u64, APPROXIMATION_RESOLUTION);
        let segments = whole_part(offset / segment);
        let mut seconds = (0..segments)
            .map(|idx| {
                let position = segment * Fraction::new(idx, 1u64);
                seconds_in(segment, self.tempo_at(position))
            })
            .sum::<f64>();
        let last = segment * Fraction::new(segments, 1u64);
        if offset > last {
            seconds += seconds_in(offset - last, self.tempo_at(last));
        }
        seconds
    }

    /// Closed form of the integral of beat duration.
    fn linear_seconds_offset(&self, offset: Fraction) -> f64 {
        let subdivision = self.common_subdivision();
        let a = self.start.respelling(subdivision).duration_of_beat();
        let b = self.end.respelling(subdivision).duration_of_beat();
        let beats = fraction_to_f64(
            self.duration.get() * Fraction::new(subdivision, 1u64),
        );
        let x = fraction_to_f64(offset / self.duration.get());
        let ratio = b / a;
        (ratio.powf(x) - 1.0) * a / ratio.ln() * beats
    }

    fn common_subdivision(&self) -> u64 {
        lcm_all([
            self.start.subdivision(),
            self.end.subdivision(),
            self.duration.denominator(),
        ])
    }

    /// Easing of x within `[0, 1]`, parameters are validated on construction.
    fn ease(&self, x: f64) -> f64 {
        match self.easing.evaluate(x.clamp(0.0, 1.0)) {
            Ok(eased) => eased,
            Err(error) => {
                unreachable!("easing of interpolation is invalid: {error}")
            }
        }
    }
}

/// Seconds of the duration, played in the constant tempo.
fn seconds_in(duration: Fraction, tempo: Tempo) -> f64 {
    fraction_to_f64(duration * Fraction::new(tempo.subdivision(), 1u64))
        * tempo.duration_of_beat()
}

impl SpanningFragment for Interpolation {
    fn range(&self) -> Range<Fraction> {
        zero()..self.duration.get()
    }

    /// Part of the interpolation within range, which is clamped to the
    /// interpolation duration.
    ///
    /// Fragment is always linear: the curve of eased interpolation is not
    /// preserved, only tempos at the edges are.
    ///
    /// # Panics
    /// If the clamped range is empty, or its length is not metrical.
    fn fragment(&self, range: Range<Fraction>) -> Self {
        let duration = self.duration.get();
        let start = range.start.max(zero()).min(duration);
        let end = range.end.max(start).min(duration);
        if start == zero() && end == duration {
            return self.clone();
        }
        let length = end - start;
        if length == zero() {
            panic!(
                "range {:?} is out of interpolation of {}",
                range, self.duration
            );
        }
        if !length.denom().map_or(false, |den| den.is_power_of_two()) {
            panic!(
                "fragment {:?} of interpolation has non-metrical length {}",
                range, length
            );
        }
        // TODO: fit the easing of the fragment to the curve of the whole
        // interpolation.
        Self::linear(
            self.tempo_at(start),
            self.tempo_at(end),
            MetricalDuration::from(length),
        )
    }
}
