//! Binary search tree over one coordinate axis of a point set.
//!
//! The tree is built once from the points sorted along an [`Axis`] by
//! recursively splitting at the median. Points whose keys are exactly equal
//! are not stored as separate tree nodes: they hang off a single node as a
//! `duplicate` chain. This bounds the depth by the number of distinct keys
//! rather than the number of points, which matters for traces that revisit
//! the same coordinate many times.
//!
//! Nodes live in a flat pool sized to the input and refer to each other by
//! index. Entries can be removed, and inclusive range queries report every
//! live point whose key lies within `[min, max]`.

use std::cmp::Ordering;

use glam::Vec3;

use crate::axis::{compare_keys, Axis};

type NodeId = usize;

#[derive(Debug, Clone, Copy)]
struct Node {
    /// Position in the sorted id array.
    slot: usize,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Next node with the same key.
    duplicate: Option<NodeId>,
}

/// A search tree over one axis of a borrowed point slice.
///
/// Points are identified by their index in the slice. Keys must not be NaN.
#[derive(Debug, Clone)]
pub struct AxisTree<'a> {
    axis: Axis,
    points: &'a [Vec3],
    sorted: Vec<usize>,
    nodes: Vec<Node>,
    root: Option<NodeId>,
    len: usize,
}

impl<'a> AxisTree<'a> {
    /// Builds a tree containing every point of `points`.
    pub fn new(points: &'a [Vec3], axis: Axis) -> Self {
        let mut sorted: Vec<usize> = (0..points.len()).collect();
        axis.sort_ids(&mut sorted, points);

        let mut tree = Self {
            axis,
            points,
            sorted,
            nodes: Vec::with_capacity(points.len()),
            root: None,
            len: points.len(),
        };
        tree.root = tree.build(0, points.len());
        tree
    }

    /// The axis this tree is keyed on.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of points still in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if every point has been removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The point id stored at the root.
    #[must_use]
    pub fn root_id(&self) -> Option<usize> {
        self.root.map(|n| self.id(n))
    }

    /// Returns true if the point with index `id` is still in the tree.
    #[must_use]
    pub fn contains(&self, id: usize) -> bool {
        self.find(id).is_some()
    }

    /// Number of tree levels, not counting duplicate chains.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height_rec(self.root)
    }

    /// Removes the point with index `id`. Returns false if it was not present.
    pub fn remove(&mut self, id: usize) -> bool {
        if id >= self.points.len() {
            return false;
        }
        let target = self.axis.key(self.points[id]);
        let mut removed = false;
        self.root = self.remove_rec(self.root, id, target, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Calls `visit` with every point id whose key lies in `[min, max]`.
    pub fn range(&self, min: f32, max: f32, mut visit: impl FnMut(usize)) {
        if compare_keys(max, min) == Ordering::Less {
            log::warn!("ignoring range query with max {max} < min {min}");
            return;
        }
        self.range_rec(self.root, min, max, &mut visit);
    }

    /// Collects every point id whose key lies in `[min, max]`.
    #[must_use]
    pub fn range_ids(&self, min: f32, max: f32) -> Vec<usize> {
        let mut ids = Vec::new();
        self.range(min, max, |id| ids.push(id));
        ids
    }

    fn key(&self, node: NodeId) -> f32 {
        self.axis.key(self.points[self.id(node)])
    }

    fn id(&self, node: NodeId) -> usize {
        self.sorted[self.nodes[node].slot]
    }

    fn alloc(&mut self, slot: usize) -> NodeId {
        self.nodes.push(Node {
            slot,
            left: None,
            right: None,
            duplicate: None,
        });
        self.nodes.len() - 1
    }

    /// Builds the subtree for sorted slots `low..high`.
    fn build(&mut self, low: usize, high: usize) -> Option<NodeId> {
        if low >= high {
            return None;
        }
        let mid = low + (high - low - 1) / 2;
        let mid_key = self.axis.key(self.points[self.sorted[mid]]);
        let same = |tree: &Self, slot: usize| {
            compare_keys(tree.axis.key(tree.points[tree.sorted[slot]]), mid_key) == Ordering::Equal
        };

        let mut dup_low = mid;
        while dup_low > low && same(self, dup_low - 1) {
            dup_low -= 1;
        }
        let mut dup_high = mid;
        while dup_high + 1 < high && same(self, dup_high + 1) {
            dup_high += 1;
        }

        // The head holds the highest slot; the chain descends to the lowest.
        let head = self.alloc(dup_high);
        let mut tail = head;
        for slot in (dup_low..dup_high).rev() {
            let node = self.alloc(slot);
            self.nodes[tail].duplicate = Some(node);
            tail = node;
        }

        let left = self.build(low, dup_low);
        let right = self.build(dup_high + 1, high);
        self.nodes[head].left = left;
        self.nodes[head].right = right;
        Some(head)
    }

    fn find(&self, id: usize) -> Option<NodeId> {
        let target = self.axis.key(*self.points.get(id)?);
        let mut current = self.root;
        while let Some(node) = current {
            match compare_keys(self.key(node), target) {
                Ordering::Greater => current = self.nodes[node].left,
                Ordering::Less => current = self.nodes[node].right,
                Ordering::Equal => {
                    let mut chain = Some(node);
                    while let Some(entry) = chain {
                        if self.id(entry) == id {
                            return Some(entry);
                        }
                        chain = self.nodes[entry].duplicate;
                    }
                    return None;
                }
            }
        }
        None
    }

    fn remove_rec(
        &mut self,
        current: Option<NodeId>,
        id: usize,
        target: f32,
        removed: &mut bool,
    ) -> Option<NodeId> {
        let node = current?;
        match compare_keys(self.key(node), target) {
            Ordering::Greater => {
                let left = self.nodes[node].left;
                self.nodes[node].left = self.remove_rec(left, id, target, removed);
                Some(node)
            }
            Ordering::Less => {
                let right = self.nodes[node].right;
                self.nodes[node].right = self.remove_rec(right, id, target, removed);
                Some(node)
            }
            Ordering::Equal if self.id(node) != id => {
                // The target, if present, is somewhere down the duplicate chain.
                let mut prev = node;
                while let Some(entry) = self.nodes[prev].duplicate {
                    if self.id(entry) == id {
                        self.nodes[prev].duplicate = self.nodes[entry].duplicate;
                        *removed = true;
                        break;
                    }
                    prev = entry;
                }
                Some(node)
            }
            Ordering::Equal => {
                *removed = true;
                if let Some(next) = self.nodes[node].duplicate {
                    // Promote the next chain entry into this node.
                    self.nodes[node].slot = self.nodes[next].slot;
                    self.nodes[node].duplicate = self.nodes[next].duplicate;
                    return Some(node);
                }
                match (self.nodes[node].left, self.nodes[node].right) {
                    (None, child) | (child, None) => child,
                    (Some(_), Some(right)) => {
                        let mut successor = right;
                        while let Some(left) = self.nodes[successor].left {
                            successor = left;
                        }
                        self.swap_values(node, successor);
                        // The target now sits at the leftmost node of the right subtree.
                        self.nodes[node].right = self.remove_rec(Some(right), id, target, removed);
                        Some(node)
                    }
                }
            }
        }
    }

    fn swap_values(&mut self, a: NodeId, b: NodeId) {
        let (slot_a, dup_a) = (self.nodes[a].slot, self.nodes[a].duplicate);
        self.nodes[a].slot = self.nodes[b].slot;
        self.nodes[a].duplicate = self.nodes[b].duplicate;
        self.nodes[b].slot = slot_a;
        self.nodes[b].duplicate = dup_a;
    }

    fn range_rec<F: FnMut(usize)>(&self, current: Option<NodeId>, min: f32, max: f32, visit: &mut F) {
        let Some(node) = current else {
            return;
        };
        let key = self.key(node);
        let above_min = compare_keys(key, min) != Ordering::Less;
        let below_max = compare_keys(key, max) != Ordering::Greater;

        if above_min && below_max {
            self.range_rec(self.nodes[node].left, min, max, visit);
            self.range_rec(self.nodes[node].right, min, max, visit);
            let mut chain = Some(node);
            while let Some(entry) = chain {
                visit(self.id(entry));
                chain = self.nodes[entry].duplicate;
            }
            return;
        }
        if !above_min {
            self.range_rec(self.nodes[node].right, min, max, visit);
        }
        if !below_max {
            self.range_rec(self.nodes[node].left, min, max, visit);
        }
    }

    fn height_rec(&self, current: Option<NodeId>) -> usize {
        current.map_or(0, |node| {
            1 + self
                .height_rec(self.nodes[node].left)
                .max(self.height_rec(self.nodes[node].right))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brute_force(points: &[Vec3], axis: Axis, live: &[bool], min: f32, max: f32) -> Vec<usize> {
        (0..points.len())
            .filter(|&i| live[i])
            .filter(|&i| {
                let k = axis.key(points[i]);
                k >= min && k <= max
            })
            .collect()
    }

    fn sorted(mut ids: Vec<usize>) -> Vec<usize> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_empty_tree() {
        let tree = AxisTree::new(&[], Axis::X);
        assert!(tree.is_empty());
        assert_eq!(tree.root_id(), None);
        assert!(tree.range_ids(-1.0, 1.0).is_empty());
        assert!(!tree.contains(0));
    }

    #[test]
    fn test_duplicates_share_a_node() {
        // 100 points with only 4 distinct x values.
        let points: Vec<Vec3> = (0..100)
            .map(|i| Vec3::new((i % 4) as f32, i as f32, 0.0))
            .collect();
        let tree = AxisTree::new(&points, Axis::X);
        assert_eq!(tree.len(), 100);
        assert!(tree.height() <= 3, "height {}", tree.height());
        assert_eq!(tree.range_ids(1.0, 1.0).len(), 25);
        assert_eq!(sorted(tree.range_ids(0.5, 2.5)).len(), 50);
    }

    #[test]
    fn test_remove_chain_entries_and_heads() {
        let points = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        let mut tree = AxisTree::new(&points, Axis::X);
        for id in [1, 0, 2] {
            assert!(tree.remove(id));
            assert!(!tree.contains(id));
            assert!(!tree.remove(id));
        }
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(3));
        assert!(tree.contains(4));
        assert!(tree.range_ids(1.0, 1.0).is_empty());
        assert_eq!(sorted(tree.range_ids(-10.0, 10.0)), vec![3, 4]);
    }

    #[test]
    fn test_remove_node_with_two_children() {
        let points: Vec<Vec3> = (0..15).map(|i| Vec3::new(0.0, i as f32, 0.0)).collect();
        let mut tree = AxisTree::new(&points, Axis::Y);
        let root = tree.root_id().unwrap();
        assert!(tree.remove(root));
        assert_ne!(tree.root_id(), Some(root));
        for id in (0..15).filter(|&id| id != root) {
            assert!(tree.contains(id), "lost {id}");
        }
        assert_eq!(
            sorted(tree.range_ids(0.0, 14.0)),
            (0..15).filter(|&id| id != root).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let points = vec![Vec3::ZERO, Vec3::ONE];
        let tree = AxisTree::new(&points, Axis::Z);
        assert!(tree.range_ids(1.0, 0.0).is_empty());
    }

    #[test]
    fn test_out_of_bounds_id() {
        let points = vec![Vec3::ZERO];
        let mut tree = AxisTree::new(&points, Axis::X);
        assert!(!tree.contains(5));
        assert!(!tree.remove(5));
        assert_eq!(tree.len(), 1);
    }

    fn coarse_points() -> impl Strategy<Value = Vec<Vec3>> {
        // Quarter-unit grid so that exact duplicates are common.
        let coord = (-8i32..8).prop_map(|v| v as f32 * 0.25);
        prop::collection::vec((coord.clone(), coord.clone(), coord), 0..120)
            .prop_map(|v| v.into_iter().map(|(x, y, z)| Vec3::new(x, y, z)).collect())
    }

    proptest! {
        #[test]
        fn prop_range_matches_brute_force(
            points in coarse_points(),
            lo in -2.5f32..2.5,
            width in 0.0f32..3.0,
            removals in prop::collection::vec(any::<prop::sample::Index>(), 0..60),
        ) {
            for axis in Axis::ALL {
                let mut tree = AxisTree::new(&points, axis);
                let mut live = vec![true; points.len()];
                prop_assert_eq!(
                    sorted(tree.range_ids(lo, lo + width)),
                    brute_force(&points, axis, &live, lo, lo + width)
                );

                if points.is_empty() {
                    continue;
                }
                for index in &removals {
                    let id = index.index(points.len());
                    prop_assert_eq!(tree.remove(id), live[id]);
                    live[id] = false;
                }
                for (id, &alive) in live.iter().enumerate() {
                    prop_assert_eq!(tree.contains(id), alive);
                }
                prop_assert_eq!(tree.len(), live.iter().filter(|&&l| l).count());
                prop_assert_eq!(
                    sorted(tree.range_ids(lo, lo + width)),
                    brute_force(&points, axis, &live, lo, lo + width)
                );
            }
        }
    }
}
