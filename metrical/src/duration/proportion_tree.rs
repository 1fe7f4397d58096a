//! Normalization of nested tuplet proportions.
//!
//! Proportion tree holds relative durations: every node value is a
//! proportion relative to its siblings, and the root value is the nominal
//! amount of subdivisions of the whole.
//!
//! After normalization every node can be written in one shared power-of-two
//! subdivision: sibling groups differ from their parent only by a tuplet
//! ratio, and every level is scaled consistently with the levels above.
//!
//! # Example
//! ```
//! use metrical::primitives::Tree;
//! use metrical::duration::normalize;
//!
//! // quarter: eighth + triplet of sixteenths.
//! let tree =
//!     Tree::branch(1, [Tree::leaf(1), Tree::with_leaves(1, [1, 1, 1])]);
//! assert_eq!(
//!     normalize(&tree),
//!     Tree::branch(4, [Tree::leaf(2), Tree::with_leaves(2, [1, 1, 1])])
//! );
//! ```

use crate::primitives::{closest_power_of_two, gcd, gcd_all, Tree};

pub type ProportionTree = Tree<u64>;
/// Power-of-two exponents, parallel to a [`ProportionTree`].
pub type DistanceTree = Tree<i32>;

/// Make every node of the tree representable in one power-of-two subdivision,
/// preserving relative durations of siblings.
///
/// Proportions are expected to be positive.
///
/// # Panics
/// If intermediate trees get out of shape, which means a bug.
pub fn normalize(tree: &ProportionTree) -> ProportionTree {
    let reduced = reduce_siblings(tree);
    let matched = match_parents(&reduced);
    let distances = propagate(&reduced.zip(&matched, encode_distance));
    let scaled = reduced.zip(&distances, decode_distance);
    let normalized = match_children(scaled);
    log::debug!("normalized proportions {:?} into {:?}", tree, normalized);
    normalized
}

/// Divide every sibling group by its greatest common divisor.
fn reduce_siblings(tree: &ProportionTree) -> ProportionTree {
    match tree {
        Tree::Leaf(_) => tree.clone(),
        Tree::Branch(value, children) => {
            let divisor =
                gcd_all(children.iter().map(|child| *child.value())).max(1);
            Tree::branch(
                *value,
                children.iter().map(|child| {
                    reduce_siblings(child).with_value(child.value() / divisor)
                }),
            )
        }
    }
}

/// Bring every parent to the power-of-two neighborhood of its children sum.
fn match_parents(tree: &ProportionTree) -> ProportionTree {
    match tree {
        Tree::Leaf(_) => tree.clone(),
        Tree::Branch(value, children) => {
            let sum = children.iter().map(|child| *child.value()).sum();
            Tree::branch(
                match_parent(*value, sum),
                children.iter().map(match_parents),
            )
        }
    }
}

fn match_parent(parent: u64, sum: u64) -> u64 {
    if parent == 0 || sum == 0 || parent == sum {
        return parent;
    }
    if parent < sum {
        return closest_power_of_two(parent, sum).unwrap_or(parent);
    }
    parent / gcd(parent, sum)
}

fn encode_distance(original: &u64, matched: &u64) -> i32 {
    if *original == 0 || *matched == 0 {
        return 0;
    }
    (*matched as f64 / *original as f64).log2() as i32
}

fn decode_distance(original: &u64, distance: &i32) -> u64 {
    (*original as f64 * 2f64.powi(*distance)).round() as u64
}

/// Turn per-node distances into exponents, shared by every sibling group
/// and never negative.
fn propagate(distances: &DistanceTree) -> DistanceTree {
    let accumulated = accumulate_up(distances);
    inherit_down(distances, (*accumulated.value()).max(0))
}

/// Every branch gets its own distance plus the deepest requirement below.
fn accumulate_up(tree: &DistanceTree) -> DistanceTree {
    match tree {
        Tree::Leaf(distance) => Tree::Leaf(*distance),
        Tree::Branch(distance, children) => {
            let children: Vec<_> = children.iter().map(accumulate_up).collect();
            let deepest = children
                .iter()
                .map(|child| *child.value())
                .max()
                .unwrap_or(0)
                .max(0);
            Tree::Branch(distance + deepest, children)
        }
    }
}

fn inherit_down(tree: &DistanceTree, exponent: i32) -> DistanceTree {
    match tree {
        Tree::Leaf(_) => Tree::Leaf(exponent),
        Tree::Branch(distance, children) => Tree::branch(
            exponent,
            children
                .iter()
                .map(|child| inherit_down(child, exponent - distance)),
        ),
    }
}

/// Scale sibling groups, that are still shorter than their parent.
fn match_children(tree: ProportionTree) -> ProportionTree {
    match tree {
        Tree::Leaf(_) => tree,
        Tree::Branch(value, children) => {
            let sum: u64 = children.iter().map(|child| *child.value()).sum();
            let children = match sum > 0 && sum < value {
                false => children,
                true => {
                    let scale =
                        closest_power_of_two(sum, value).unwrap_or(sum) / sum;
                    children
                        .into_iter()
                        .map(|child| child.map(|v| v * scale))
                        .collect()
                }
            };
            Tree::branch(value, children.into_iter().map(match_children))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::primitives::Tree;

    use super::{
        match_parents, normalize, propagate, reduce_siblings, DistanceTree,
        ProportionTree,
    };

    fn sextuplet() -> ProportionTree {
        Tree::with_leaves(1, [1, 2, 3])
    }

    #[test]
    fn test_reduce_siblings() {
        let tree = Tree::branch(
            3,
            [Tree::with_leaves(4, [6, 9]), Tree::leaf(8), Tree::leaf(12)],
        );
        assert_eq!(
            reduce_siblings(&tree),
            Tree::branch(
                3,
                [Tree::with_leaves(1, [2, 3]), Tree::leaf(2), Tree::leaf(3)]
            )
        );
    }

    #[test]
    fn test_match_parents() {
        assert_eq!(
            match_parents(&sextuplet()),
            Tree::with_leaves(4, [1, 2, 3])
        );
        assert_eq!(
            match_parents(&Tree::with_leaves(4, [1, 1])),
            Tree::with_leaves(2, [1, 1])
        );
        assert_eq!(
            match_parents(&Tree::with_leaves(3, [1, 2])),
            Tree::with_leaves(3, [1, 2])
        );
    }

    #[test]
    fn test_propagate() {
        let distances: DistanceTree = Tree::branch(
            1,
            [Tree::with_leaves(2, [0, 0, 0]), Tree::leaf(0)],
        );
        assert_eq!(
            propagate(&distances),
            Tree::branch(3, [Tree::with_leaves(2, [0, 0, 0]), Tree::leaf(2)])
        );
        let negative: DistanceTree = Tree::with_leaves(-1, [0, 0]);
        assert_eq!(propagate(&negative), Tree::with_leaves(0, [1, 1]));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&sextuplet()), Tree::with_leaves(4, [1, 2, 3]));
        assert_eq!(
            normalize(&Tree::with_leaves(2, [1, 1, 1])),
            Tree::with_leaves(2, [1, 1, 1])
        );
        assert_eq!(
            normalize(&Tree::with_leaves(4, [1, 1])),
            Tree::with_leaves(4, [2, 2])
        );
        assert_eq!(
            normalize(&Tree::with_leaves(3, [2, 4])),
            Tree::with_leaves(3, [1, 2])
        );
        assert_eq!(
            normalize(&Tree::branch(1, [sextuplet(), Tree::leaf(1)])),
            Tree::branch(8, [Tree::with_leaves(4, [1, 2, 3]), Tree::leaf(4)])
        );
    }

    #[test]
    fn test_normalize_repairs_short_groups() {
        // single child can not fill 3 by a power of two.
        assert_eq!(
            normalize(&Tree::with_leaves(3, [1])),
            Tree::with_leaves(3, [2])
        );
        assert_eq!(
            normalize(&Tree::with_leaves(4, [1])),
            Tree::with_leaves(4, [4])
        );
    }

    #[test]
    fn test_normalize_leaf() {
        assert_eq!(normalize(&Tree::leaf(5)), Tree::leaf(5));
    }
}
