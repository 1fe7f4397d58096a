use fraction::Fraction;

use crate::primitives::{lcm, zero, MetricalDuration, Tree};

use super::proportion_tree::{normalize, ProportionTree};

/// Tree of concrete durations, built from proportions.
///
/// Root holds the whole duration, children split their parent according to
/// proportions. When children do not sum up to the parent, the branch is a
/// tuplet, and its ratio is reported by [`Self::leaf_scalings`].
///
/// # Example
/// ```
/// use metrical::duration::MetricalDurationTree;
/// use metrical::primitives::{MetricalDuration, Tree};
///
/// let tree = MetricalDurationTree::with_proportions(
///     MetricalDuration::new(1, 4),
///     &[1, 1, 1],
/// );
/// let eighth = MetricalDuration::new(1, 8);
/// assert_eq!(
///     tree.tree(),
///     &Tree::with_leaves(
///         MetricalDuration::new(2, 8),
///         [eighth, eighth, eighth]
///     )
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MetricalDurationTree {
    tree: Tree<MetricalDuration>,
}
impl MetricalDurationTree {
    /// Split duration by the proportion tree.
    ///
    /// Proportions are scaled to fit the amount of beats of duration,
    /// normalized, and then expressed in a subdivision, that keeps the root
    /// equal to the given duration.
    ///
    /// # Panics
    /// If duration or root proportion is zero, or if root proportion can not
    /// be related to the beats of duration by a power of two
    /// (e.g. root of 3 for a single beat).
    pub fn new(
        duration: MetricalDuration,
        proportions: &ProportionTree,
    ) -> Self {
        let beats = duration.numerator();
        let root = *proportions.value();
        if beats == 0 || root == 0 {
            panic!(
                "can not split zero duration. duration: {duration}, \
                proportions: {proportions:?}"
            );
        }
        let multiplier = lcm(beats, root) / root;
        let normalized = normalize(&proportions.map(|v| v * multiplier));
        let subdivision = duration.denominator() * (normalized.value() / beats);
        log::debug!(
            "splitting {} by {:?} in subdivision {}",
            duration, proportions, subdivision
        );
        Self {
            tree: normalized.map(|v| MetricalDuration::new(*v, subdivision)),
        }
    }

    /// Normalized proportions, read directly in the given subdivision.
    ///
    /// ```
    /// # use metrical::duration::MetricalDurationTree;
    /// # use metrical::primitives::{MetricalDuration, Tree};
    /// let tree = MetricalDurationTree::from_subdivision(
    ///     16,
    ///     &Tree::with_leaves(1, [1, 2, 3]),
    /// );
    /// assert_eq!(tree.duration().to_string(), "4/16");
    /// ```
    pub fn from_subdivision(
        subdivision: u64,
        proportions: &ProportionTree,
    ) -> Self {
        let normalized = normalize(proportions);
        Self {
            tree: normalized.map(|v| MetricalDuration::new(*v, subdivision)),
        }
    }

    /// One level of proportions. Empty proportions leave the duration
    /// undivided.
    pub fn with_proportions(
        duration: MetricalDuration,
        proportions: &[u64],
    ) -> Self {
        if proportions.is_empty() {
            return Self {
                tree: Tree::with_leaves(duration, [duration]),
            };
        }
        Self::new(
            duration,
            &Tree::with_leaves(
                duration.numerator(),
                proportions.iter().copied(),
            ),
        )
    }

    pub fn tree(&self) -> &Tree<MetricalDuration> {
        &self.tree
    }
    pub fn into_tree(self) -> Tree<MetricalDuration> {
        self.tree
    }
    /// Duration of the whole tree.
    pub fn duration(&self) -> MetricalDuration {
        *self.tree.value()
    }
    pub fn height(&self) -> usize {
        self.tree.height()
    }
    /// Written durations of leaves.
    pub fn leaves(&self) -> Vec<MetricalDuration> {
        self.tree.leaves().into_iter().copied().collect()
    }

    /// Product of tuplet ratios (parent / sum of children) above every leaf.
    ///
    /// ```
    /// # use fraction::Fraction;
    /// # use metrical::duration::MetricalDurationTree;
    /// # use metrical::primitives::MetricalDuration;
    /// let triplet = MetricalDurationTree::with_proportions(
    ///     MetricalDuration::new(1, 4),
    ///     &[1, 1, 1],
    /// );
    /// assert_eq!(triplet.leaf_scalings(), vec![Fraction::new(2u64, 3u64); 3]);
    /// ```
    pub fn leaf_scalings(&self) -> Vec<Fraction> {
        let mut scalings = Vec::new();
        collect_scalings(&self.tree, Fraction::new(1u64, 1u64), &mut scalings);
        scalings
    }

    /// How long every leaf really lasts: written duration times its scaling.
    pub fn sounding_durations(&self) -> Vec<Fraction> {
        self.leaves()
            .into_iter()
            .zip(self.leaf_scalings())
            .map(|(leaf, scaling)| leaf.get() * scaling)
            .collect()
    }

    /// Offset of every leaf from the start of the tree.
    pub fn leaf_offsets(&self) -> Vec<Fraction> {
        let mut offset = zero();
        self.sounding_durations()
            .into_iter()
            .map(|duration| {
                let current = offset;
                offset = offset + duration;
                current
            })
            .collect()
    }
}
impl From<MetricalDurationTree> for Tree<MetricalDuration> {
    fn from(value: MetricalDurationTree) -> Self {
        value.tree
    }
}

fn collect_scalings(
    tree: &Tree<MetricalDuration>,
    scaling: Fraction,
    scalings: &mut Vec<Fraction>,
) {
    match tree {
        Tree::Leaf(_) => scalings.push(scaling),
        Tree::Branch(value, children) => {
            let sum = children
                .iter()
                .fold(zero(), |sum, child| sum + child.value().get());
            let ratio = match sum == zero() {
                true => Fraction::new(1u64, 1u64),
                false => value.get() / sum,
            };
            for child in children {
                collect_scalings(child, scaling * ratio, scalings);
            }
        }
    }
}
