//! Containers of spans, laid one after another on a rational timeline.
//!
//! Container is built only by appending: every element is placed at the
//! end of the previous one, so offsets of the container always partition
//! `[0, length)` without gaps and overlaps.
//!
//! # Example
//! ```
//! use fraction::Fraction;
//! use metrical::meter::{Meter, MeterCollection};
//!
//! let mut builder = MeterCollection::builder();
//! builder.add_meter(Meter::new(4, 4)).add_meter(Meter::new(3, 8));
//! let meters = builder.build();
//!
//! assert_eq!(meters.length(), Fraction::new(11u64, 8u64));
//! let (offset, fragment) = meters
//!     .element_containing(Fraction::new(9u64, 8u64))
//!     .unwrap();
//! assert_eq!(offset, Fraction::from(1.0));
//! assert_eq!(*fragment.meter(), Meter::new(3, 8));
//! ```

use std::ops::Range;

use fraction::Fraction;

use crate::primitives::zero;

/// Something, that covers a contiguous range of a timeline.
pub trait SpanningFragment: Clone {
    /// Covered range, in local coordinates of the element.
    fn range(&self) -> Range<Fraction>;

    fn length(&self) -> Fraction {
        let range = self.range();
        range.end - range.start
    }

    /// Part of the element within `range`, given in local coordinates.
    fn fragment(&self, range: Range<Fraction>) -> Self;
}

/// Elements keyed by offset of their start.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningContainer<T> {
    offsets: Vec<Fraction>,
    elements: Vec<T>,
    length: Fraction,
}
impl<T: SpanningFragment> SpanningContainer<T> {
    pub fn empty() -> Self {
        Self {
            offsets: Vec::new(),
            elements: Vec::new(),
            length: zero(),
        }
    }
    pub fn builder() -> SpanningContainerBuilder<T> {
        SpanningContainerBuilder::new()
    }

    /// Amount of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    /// Summary length of all elements.
    pub fn length(&self) -> Fraction {
        self.length
    }
    pub fn offsets(&self) -> &[Fraction] {
        &self.offsets
    }
    pub fn elements(&self) -> &[T] {
        &self.elements
    }
    /// Pairs of (offset, element).
    pub fn iter(&self) -> impl Iterator<Item = (Fraction, &T)> {
        self.offsets.iter().copied().zip(self.elements.iter())
    }

    /// Binary search of the element, that contains offset.
    ///
    /// Normally element owns its start, but not its end. With `allowing_end`
    /// it is the opposite: element owns its end, but not its start. It is
    /// needed to find the element, where a range ends.
    ///
    /// # Returns
    /// None if the offset is out of `[0, length)`
    /// (or out of `(0, length]` with `allowing_end`).
    pub fn index_of_element(
        &self,
        offset: Fraction,
        allowing_end: bool,
    ) -> Option<usize> {
        let (mut lower, mut upper) = (0, self.elements.len());
        while lower < upper {
            let mid = (lower + upper) / 2;
            let start = self.offsets[mid];
            let end = start + self.elements[mid].length();
            let (before, after) = match allowing_end {
                false => (offset < start, offset >= end),
                true => (offset <= start, offset > end),
            };
            if before {
                upper = mid;
            } else if after {
                lower = mid + 1;
            } else {
                return Some(mid);
            }
        }
        None
    }

    /// Element under the offset and offset of its start.
    pub fn element_containing(
        &self,
        offset: Fraction,
    ) -> Option<(Fraction, &T)> {
        let index = self.index_of_element(offset, false)?;
        Some((self.offsets[index], &self.elements[index]))
    }

    /// New container, that covers exactly `range` of this one.
    ///
    /// Elements at the edges are fragmented, elements in the middle are
    /// kept as they are. Offsets of the new container start from zero.
    /// Range, that ends after the container, is truncated at the end.
    pub fn fragment(&self, range: Range<Fraction>) -> Self {
        let upper = range.end.min(self.length);
        if range.start >= upper {
            return Self::empty();
        }
        let start_index = match self.index_of_element(range.start, false) {
            Some(index) => index,
            None => return Self::empty(),
        };
        let end_index = match self.index_of_element(upper, true) {
            Some(index) => index,
            None => return Self::empty(),
        };
        let mut builder = Self::builder();
        let start = &self.elements[start_index];
        let local_start = self.local_offset(start_index, range.start);
        if start_index == end_index {
            let local_end = self.local_offset(end_index, upper);
            builder.add(start.fragment(local_start..local_end));
            return builder.build();
        }
        builder.add(start.fragment(local_start..start.range().end));
        for element in &self.elements[start_index + 1..end_index] {
            builder.add(element.clone());
        }
        let end = &self.elements[end_index];
        let local_end = self.local_offset(end_index, upper);
        builder.add(end.fragment(end.range().start..local_end));
        builder.build()
    }

    /// Convert container offset to coordinates of the element at index.
    fn local_offset(&self, index: usize, offset: Fraction) -> Fraction {
        self.elements[index].range().start + (offset - self.offsets[index])
    }
}
impl<T: SpanningFragment> Default for SpanningContainer<T> {
    fn default() -> Self {
        Self::empty()
    }
}
impl<T: SpanningFragment> FromIterator<T> for SpanningContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = Self::builder();
        for element in iter {
            builder.add(element);
        }
        builder.build()
    }
}

/// The only way to fill [`SpanningContainer`].
#[derive(Debug)]
pub struct SpanningContainerBuilder<T> {
    offsets: Vec<Fraction>,
    elements: Vec<T>,
    offset: Fraction,
}
impl<T: SpanningFragment> SpanningContainerBuilder<T> {
    pub fn new() -> Self {
        Self {
            offsets: Vec::new(),
            elements: Vec::new(),
            offset: zero(),
        }
    }
    /// Place element at the end of the previous one.
    ///
    /// # Panics
    /// If element has no length.
    pub fn add(&mut self, element: T) -> &mut Self {
        let length = element.length();
        if length <= zero() {
            panic!(
                "spanning element should have positive length. range: {:?}",
                element.range()
            );
        }
        log::debug!("adding element of length {} at {}", length, self.offset);
        self.offsets.push(self.offset);
        self.elements.push(element);
        self.offset = self.offset + length;
        self
    }
    /// Offset, where the next element will be placed.
    pub fn offset(&self) -> Fraction {
        self.offset
    }
    pub fn build(self) -> SpanningContainer<T> {
        SpanningContainer {
            offsets: self.offsets,
            elements: self.elements,
            length: self.offset,
        }
    }
}
impl<T: SpanningFragment> Default for SpanningContainerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
