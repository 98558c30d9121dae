use crate::{math::Map, MinimizationError};

/// The state of a single element in the forest. A root stores the number of elements in its
/// class (itself included), which is always at least two; a root of a class of size one is a
/// [`Node::Singleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Singleton,
    ChildOf(usize),
    Root(usize),
}

/// A partition of the elements `0..len` into disjoint equivalence classes, realized as a forest
/// in which every class is a tree whose root is the representative of the class.
///
/// [`UnionFind::find`] compresses the path it walks, so that every visited element afterwards points
/// directly to the root. [`UnionFind::union`] attaches the smaller tree below the root of the larger
/// one. Together, these guarantee an amortized cost per operation that is bounded by the inverse of the
/// Ackermann function.
///
/// Through the public interface classes can only ever grow, there is no way of splitting a class.
/// To obtain a finer partition, a new structure has to be built.
///
/// # Example
/// ```
/// use minauto::math::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// uf.union(0, 2);
/// uf.union(3, 2);
/// assert_eq!(uf.find(0), uf.find(3));
/// assert!(!uf.same_class(1, 3));
/// assert_eq!(uf.classes(), vec![vec![0, 2, 3], vec![1]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionFind {
    nodes: Vec<Node>,
}

impl UnionFind {
    /// Creates a structure over `len` elements, each of which is in a class of its own.
    pub fn new(len: usize) -> Self {
        Self {
            nodes: vec![Node::Singleton; len],
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the structure is over zero elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn check(&self, element: usize) -> Result<(), MinimizationError> {
        if element < self.nodes.len() {
            Ok(())
        } else {
            Err(MinimizationError::ElementOutOfRange {
                element,
                len: self.nodes.len(),
            })
        }
    }

    fn size(&self, root: usize) -> usize {
        match self.nodes[root] {
            Node::Root(size) => size,
            _ => 1,
        }
    }

    /// Returns the representative of the class of `element`, or an error if `element` is out of range.
    pub fn try_find(&mut self, element: usize) -> Result<usize, MinimizationError> {
        self.check(element)?;

        let mut root = element;
        while let Node::ChildOf(parent) = self.nodes[root] {
            root = parent;
        }

        let mut current = element;
        while let Node::ChildOf(parent) = self.nodes[current] {
            self.nodes[current] = Node::ChildOf(root);
            current = parent;
        }

        Ok(root)
    }

    /// Returns the representative of the class of `element`.
    ///
    /// # Panics
    /// If `element` is not smaller than [`UnionFind::len`].
    pub fn find(&mut self, element: usize) -> usize {
        match self.try_find(element) {
            Ok(root) => root,
            Err(e) => panic!("{e}"),
        }
    }

    /// Merges the classes of `left` and `right` and returns the representative of the merged class.
    /// Does nothing if both are already in the same class. Fails if either element is out of range.
    pub fn try_union(&mut self, left: usize, right: usize) -> Result<usize, MinimizationError> {
        let i = self.try_find(left)?;
        let j = self.try_find(right)?;
        if i == j {
            return Ok(i);
        }

        let size = self.size(i) + self.size(j);
        let (root, child) = if self.size(j) < self.size(i) {
            (i, j)
        } else {
            (j, i)
        };
        self.nodes[child] = Node::ChildOf(root);
        self.nodes[root] = Node::Root(size);
        Ok(root)
    }

    /// Merges the classes of `left` and `right`, see [`UnionFind::try_union`].
    ///
    /// # Panics
    /// If either element is not smaller than [`UnionFind::len`].
    pub fn union(&mut self, left: usize, right: usize) -> usize {
        match self.try_union(left, right) {
            Ok(root) => root,
            Err(e) => panic!("{e}"),
        }
    }

    /// Replaces one class by the given parts, which have to be disjoint, non-empty and together
    /// make up exactly one class. The first member of every part becomes its representative.
    ///
    /// Only the nodes of the class are touched: no element of another class has a path into it.
    ///
    /// # Panics
    /// If an element of `parts` is not smaller than [`UnionFind::len`].
    pub(crate) fn reassign(&mut self, parts: &[Vec<usize>]) {
        for part in parts {
            let Some((&first, rest)) = part.split_first() else {
                continue;
            };
            self.nodes[first] = match part.len() {
                1 => Node::Singleton,
                len => Node::Root(len),
            };
            for &element in rest {
                self.nodes[element] = Node::ChildOf(first);
            }
        }
    }

    /// Returns `true` if `element` is the representative of its class.
    ///
    /// # Panics
    /// If `element` is not smaller than [`UnionFind::len`].
    pub fn is_representative(&self, element: usize) -> bool {
        if let Err(e) = self.check(element) {
            panic!("{e}");
        }
        !matches!(self.nodes[element], Node::ChildOf(_))
    }

    /// Returns `true` if `left` and `right` belong to the same class.
    pub fn same_class(&mut self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }

    /// Returns the number of classes.
    pub fn class_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| !matches!(node, Node::ChildOf(_)))
            .count()
    }

    /// Returns the members of every class. Members are sorted ascendingly and the classes are
    /// ordered by their smallest member, so the result does not depend on which elements are
    /// the representatives.
    pub fn classes(&mut self) -> Vec<Vec<usize>> {
        let mut position: Map<usize, usize> = Map::default();
        let mut classes: Vec<Vec<usize>> = Vec::new();
        for element in 0..self.len() {
            let root = self.find(element);
            let idx = *position.entry(root).or_insert_with(|| {
                classes.push(Vec::new());
                classes.len() - 1
            });
            classes[idx].push(element);
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, UnionFind};
    use crate::MinimizationError;

    /// Counts the elements whose path leads to `root`, which has to match the stored size.
    fn descendants(uf: &UnionFind, root: usize) -> usize {
        (0..uf.len())
            .filter(|&e| {
                let mut current = e;
                while let Node::ChildOf(parent) = uf.nodes[current] {
                    current = parent;
                }
                current == root
            })
            .count()
    }

    #[test]
    fn find_is_stable() {
        let mut uf = UnionFind::new(5);
        for e in 0..5 {
            assert_eq!(uf.find(e), uf.find(e));
            assert_eq!(uf.find(e), e);
            assert!(uf.is_representative(e));
        }
        assert_eq!(uf.class_count(), 5);
    }

    #[test]
    fn union_merges_and_is_symmetric() {
        let mut left = UnionFind::new(6);
        let mut right = UnionFind::new(6);
        for (a, b) in [(0, 1), (2, 3), (1, 3), (5, 4)] {
            left.union(a, b);
            right.union(b, a);
            assert_eq!(left.find(a), left.find(b));
            assert_eq!(right.find(a), right.find(b));
        }
        assert_eq!(left.classes(), right.classes());
        assert_eq!(left.classes(), vec![vec![0, 1, 2, 3], vec![4, 5]]);
    }

    #[test]
    fn union_is_transitive() {
        let mut uf = UnionFind::new(7);
        uf.union(1, 4);
        uf.union(4, 6);
        assert_eq!(uf.find(1), uf.find(6));
        assert!(!uf.same_class(0, 6));
        assert_eq!(uf.class_count(), 5);
    }

    #[test]
    fn union_of_same_class_is_noop() {
        let mut uf = UnionFind::new(3);
        let root = uf.union(0, 1);
        let before = uf.clone();
        assert_eq!(uf.union(1, 0), root);
        assert_eq!(uf, before);
    }

    #[test]
    fn weighted_union_attaches_smaller_tree() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        let big = uf.union(0, 2);
        let root = uf.union(3, 0);
        assert_eq!(root, big);
        assert_eq!(descendants(&uf, root), 4);
        assert_eq!(uf.nodes[root], Node::Root(4));
        assert!(!uf.is_representative(3));
    }

    #[test]
    fn path_compression_points_to_root() {
        let mut uf = UnionFind::new(8);
        // builds a tree of depth three
        uf.union(0, 1);
        uf.union(2, 3);
        uf.union(0, 2);
        uf.union(4, 5);
        uf.union(6, 7);
        uf.union(4, 6);
        uf.union(0, 4);
        let root = uf.find(0);
        for e in 0..8 {
            assert_eq!(uf.find(e), root);
            assert!(e == root || uf.nodes[e] == Node::ChildOf(root));
        }
        assert_eq!(uf.nodes[root], Node::Root(8));
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut uf = UnionFind::new(2);
        assert_eq!(
            uf.try_find(2),
            Err(MinimizationError::ElementOutOfRange { element: 2, len: 2 })
        );
        assert!(uf.try_union(0, 7).is_err());
        assert_eq!(uf.class_count(), 2);
    }

    #[test]
    fn reassign_splits_one_class() {
        let mut uf = UnionFind::new(7);
        for (a, b) in [(0, 2), (2, 4), (4, 6), (1, 3)] {
            uf.union(a, b);
        }
        let untouched = uf.find(3);
        uf.reassign(&[vec![0, 6], vec![2], vec![4]]);

        assert_eq!(
            uf.classes(),
            vec![vec![0, 6], vec![1, 3], vec![2], vec![4], vec![5]]
        );
        assert_eq!(uf.class_count(), 5);
        assert_eq!(uf.find(6), 0);
        assert_eq!(uf.find(3), untouched);
        assert!(uf.is_representative(2) && uf.is_representative(4));
        assert_eq!(uf.nodes[0], Node::Root(2));
        assert_eq!(descendants(&uf, 0), 2);

        // merging after a split keeps sizes consistent
        let root = uf.union(2, 6);
        assert_eq!(uf.nodes[root], Node::Root(3));
        assert_eq!(descendants(&uf, root), 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn find_panics_out_of_range() {
        UnionFind::new(1).find(1);
    }
}
