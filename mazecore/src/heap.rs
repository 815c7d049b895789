//! Binary min-heap used by the best-first search.

use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Node<T> {
    item: T,
    score: f64,
    seq: u64,
}

impl<T> Node<T> {
    /// Lower score first, equal scores in insertion order.
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.seq.cmp(&other.seq))
    }

    fn precedes(&self, other: &Self) -> bool {
        self.cmp_priority(other) == Ordering::Less
    }
}

/// Min-heap keyed by a score the caller computes for every item.
///
/// Every parent's score is less than or equal to its children's, and items with equal
/// scores come out in the order they were inserted.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    nodes: Vec<Node<T>>,
    next_seq: u64,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert(&mut self, item: T, score: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.nodes.push(Node { item, score, seq });
        self.sift_up(self.nodes.len() - 1);
    }

    /// Removes the item with the smallest score, `None` when the heap is empty.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.nodes.is_empty() {
            return None;
        }

        let min = self.nodes.swap_remove(0);
        self.sift_down(0);
        Some(min.item)
    }

    pub fn peek_min(&self) -> Option<(&T, f64)> {
        self.nodes.first().map(|node| (&node.item, node.score))
    }

    /// Items in heap order, not sorted.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter().map(|node| &node.item)
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.nodes[child].precedes(&self.nodes[parent]) {
                break;
            }

            self.nodes.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * parent + 1;
            let right = left + 1;

            let mut smallest = parent;
            if left < len && self.nodes[left].precedes(&self.nodes[smallest]) {
                smallest = left;
            }
            if right < len && self.nodes[right].precedes(&self.nodes[smallest]) {
                smallest = right;
            }
            if smallest == parent {
                break;
            }

            self.nodes.swap(parent, smallest);
            parent = smallest;
        }
    }

    #[cfg(test)]
    fn holds_invariant(&self) -> bool {
        (1..self.nodes.len()).all(|i| self.nodes[(i - 1) / 2].score <= self.nodes[i].score)
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<(T, f64)> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = (T, f64)>>(&mut self, iter: I) {
        for (item, score) in iter {
            self.insert(item, score);
        }
    }
}

impl<T> FromIterator<(T, f64)> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut heap = MinHeap::new();
        heap.extend(iter);
        heap
    }
}
