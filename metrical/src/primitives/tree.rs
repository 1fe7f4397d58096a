//! Minimal recursive tree, where both branches and leaves carry a value.

use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tree<T> {
    Leaf(T),
    /// Value of the node and its children.
    Branch(T, Vec<Tree<T>>),
}
impl<T> Tree<T> {
    pub fn leaf(value: T) -> Self {
        Self::Leaf(value)
    }
    pub fn branch(
        value: T,
        children: impl IntoIterator<Item = Tree<T>>,
    ) -> Self {
        Self::Branch(value, children.into_iter().collect())
    }
    /// Branch, which children are all leaves.
    ///
    /// ```
    /// # use metrical::primitives::Tree;
    /// assert_eq!(
    ///     Tree::with_leaves(1, [1, 2]),
    ///     Tree::branch(1, [Tree::leaf(1), Tree::leaf(2)])
    /// );
    /// ```
    pub fn with_leaves(value: T, leaves: impl IntoIterator<Item = T>) -> Self {
        Self::branch(value, leaves.into_iter().map(Self::leaf))
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Leaf(value) => value,
            Self::Branch(value, _) => value,
        }
    }
    /// Empty for leaves.
    pub fn children(&self) -> &[Tree<T>] {
        match self {
            Self::Leaf(_) => &[],
            Self::Branch(_, children) => children,
        }
    }
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
    /// Same tree with another value at the root.
    pub fn with_value(self, value: T) -> Self {
        match self {
            Self::Leaf(_) => Self::Leaf(value),
            Self::Branch(_, children) => Self::Branch(value, children),
        }
    }

    /// Values of all leaves, from left to right.
    pub fn leaves(&self) -> Vec<&T> {
        match self {
            Self::Leaf(value) => vec![value],
            Self::Branch(_, children) => {
                children.iter().flat_map(|child| child.leaves()).collect()
            }
        }
    }
    /// Amount of levels. Single leaf has height of 1.
    pub fn height(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(_, children) => {
                1 + children.iter().map(Tree::height).max().unwrap_or(0)
            }
        }
    }

    pub fn map<U, F>(&self, transform: F) -> Tree<U>
    where
        F: Fn(&T) -> U,
    {
        self.map_with(&transform)
    }
    fn map_with<U, F>(&self, transform: &F) -> Tree<U>
    where
        F: Fn(&T) -> U,
    {
        match self {
            Self::Leaf(value) => Tree::Leaf(transform(value)),
            Self::Branch(value, children) => Tree::Branch(
                transform(value),
                children
                    .iter()
                    .map(|child| child.map_with(transform))
                    .collect(),
            ),
        }
    }

    /// Combine values of two trees of the same shape.
    ///
    /// # Panics
    /// If trees have different shapes.
    pub fn zip<U, V, F>(&self, other: &Tree<U>, combine: F) -> Tree<V>
    where
        F: Fn(&T, &U) -> V,
    {
        self.zip_with(other, &combine)
    }
    fn zip_with<U, V, F>(&self, other: &Tree<U>, combine: &F) -> Tree<V>
    where
        F: Fn(&T, &U) -> V,
    {
        match (self, other) {
            (Self::Leaf(a), Tree::Leaf(b)) => Tree::Leaf(combine(a, b)),
            (Self::Branch(a, a_children), Tree::Branch(b, b_children)) => {
                Tree::Branch(
                    combine(a, b),
                    a_children
                        .iter()
                        .zip_eq(b_children.iter())
                        .map(|(a, b)| a.zip_with(b, combine))
                        .collect(),
                )
            }
            _ => panic!("can not zip trees of different shapes"),
        }
    }
}
