//! Fringe containers: FIFO queue, LIFO stack, binary-heap priority queue,
//! and bounded priority queue.
//!
//! All of them share the [`Fringe`] contract so the traversal loop in
//! [`crate::search`] is written once. The ordering key for the priority queue
//! comes from an injected [`NodeOrdering`]; nodes carry no comparator of
//! their own.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::node::{NodeOrdering, SearchNode};

/// A container of nodes waiting to be expanded.
pub trait Fringe<S, A> {
    /// Add a node.
    fn push(&mut self, node: Rc<SearchNode<S, A>>);

    /// Remove and return the next node to expand.
    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>>;

    /// Number of pending nodes.
    fn len(&self) -> usize;

    /// Whether no nodes are pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest `len()` observed after any push.
    fn high_water(&self) -> usize;

    /// Nodes discarded because the container was at capacity.
    fn dropped(&self) -> u64 {
        0
    }
}

/// First-in, first-out fringe (breadth-first search).
pub struct FifoFringe<S, A> {
    queue: VecDeque<Rc<SearchNode<S, A>>>,
    high_water: usize,
}

impl<S, A> FifoFringe<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            high_water: 0,
        }
    }
}

impl<S, A> Default for FifoFringe<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Fringe<S, A> for FifoFringe<S, A> {
    fn push(&mut self, node: Rc<SearchNode<S, A>>) {
        self.queue.push_back(node);
        self.high_water = self.high_water.max(self.queue.len());
    }

    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}

/// Last-in, first-out fringe (depth-first and depth-limited search).
pub struct StackFringe<S, A> {
    stack: Vec<Rc<SearchNode<S, A>>>,
    high_water: usize,
}

impl<S, A> StackFringe<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            high_water: 0,
        }
    }
}

impl<S, A> Default for StackFringe<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Fringe<S, A> for StackFringe<S, A> {
    fn push(&mut self, node: Rc<SearchNode<S, A>>) {
        self.stack.push(node);
        self.high_water = self.high_water.max(self.stack.len());
    }

    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}

/// A heap entry: rank (smaller is better) and push sequence number.
///
/// `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse` to pop the
/// smallest `(rank, seq)` first.
struct HeapEntry<S, A> {
    rank: f64,
    seq: u64,
    node: Rc<SearchNode<S, A>>,
}

impl<S, A> PartialEq for HeapEntry<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl<S, A> Eq for HeapEntry<S, A> {}

impl<S, A> PartialOrd for HeapEntry<S, A> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, A> Ord for HeapEntry<S, A> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Unbounded priority fringe on a binary heap, O(log n) per push and pop.
///
/// Equal keys pop oldest first under every ordering. Uniform-cost, greedy
/// and A* run on this fringe; value-ordered searches that need random
/// tie-breaking use [`BoundedPriorityFringe`].
pub struct HeapFringe<S, A> {
    heap: BinaryHeap<Reverse<HeapEntry<S, A>>>,
    ordering: NodeOrdering,
    next_seq: u64,
    high_water: usize,
}

impl<S, A> HeapFringe<S, A> {
    #[must_use]
    pub fn new(ordering: NodeOrdering) -> Self {
        Self {
            heap: BinaryHeap::new(),
            ordering,
            next_seq: 0,
            high_water: 0,
        }
    }

    /// The ordering this fringe was built with.
    #[must_use]
    pub fn ordering(&self) -> NodeOrdering {
        self.ordering
    }

    /// Keys turned into a rank where smaller is better. Nodes without a key
    /// rank after every keyed node.
    fn rank_of(&self, node: &SearchNode<S, A>) -> f64 {
        match self.ordering.key(node) {
            Some(key) if self.ordering.maximizes() => -key,
            Some(key) => key,
            None => f64::INFINITY,
        }
    }
}

impl<S, A> Fringe<S, A> for HeapFringe<S, A> {
    fn push(&mut self, node: Rc<SearchNode<S, A>>) {
        let rank = self.rank_of(&node);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(HeapEntry { rank, seq, node }));
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>> {
        self.heap.pop().map(|Reverse(entry)| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }
}

/// A priority entry with its key cached at push time.
struct PriorityEntry<S, A> {
    key: f64,
    node: Rc<SearchNode<S, A>>,
}

/// Priority fringe that retains at most `capacity` best nodes.
///
/// Entries are kept sorted best-first. Under a minimizing ordering equal keys
/// pop oldest first. Under [`NodeOrdering::Value`] equal keys pop uniformly
/// at random, so a search is not biased toward whichever node the problem
/// happened to enumerate first.
///
/// When a push exceeds `capacity`, the worst entry is discarded.
pub struct BoundedPriorityFringe<S, A> {
    entries: VecDeque<PriorityEntry<S, A>>,
    ordering: NodeOrdering,
    capacity: Option<usize>,
    rng: ChaCha8Rng,
    high_water: usize,
    dropped: u64,
}

impl<S, A> BoundedPriorityFringe<S, A> {
    /// A priority fringe with no capacity limit.
    #[must_use]
    pub fn unbounded(ordering: NodeOrdering) -> Self {
        Self {
            entries: VecDeque::new(),
            ordering,
            capacity: None,
            rng: ChaCha8Rng::from_entropy(),
            high_water: 0,
            dropped: 0,
        }
    }

    /// A priority fringe keeping at most `capacity` nodes.
    #[must_use]
    pub fn bounded(ordering: NodeOrdering, capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::unbounded(ordering)
        }
    }

    /// Replace the tie-break generator (for reproducible runs).
    #[must_use]
    pub fn with_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.rng = rng;
        self
    }

    /// The ordering this fringe was built with.
    #[must_use]
    pub fn ordering(&self) -> NodeOrdering {
        self.ordering
    }

    /// The retention limit, if any.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Nodes lacking a key for this ordering sort after every keyed node.
    fn key_of(&self, node: &SearchNode<S, A>) -> f64 {
        self.ordering.key(node).unwrap_or(if self.ordering.maximizes() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        })
    }

    /// Index of the entry to pop: the front, or a random member of the
    /// leading run of equal keys under a maximizing ordering.
    fn pop_index(&mut self) -> usize {
        if !self.ordering.maximizes() {
            return 0;
        }
        let Some(front) = self.entries.front() else {
            return 0;
        };
        let best = front.key;
        let ties = self
            .entries
            .iter()
            .take_while(|e| e.key.total_cmp(&best).is_eq())
            .count();
        if ties > 1 {
            self.rng.gen_range(0..ties)
        } else {
            0
        }
    }
}

impl<S, A> Fringe<S, A> for BoundedPriorityFringe<S, A> {
    fn push(&mut self, node: Rc<SearchNode<S, A>>) {
        let key = self.key_of(&node);
        let ordering = self.ordering;
        // Insert after every entry that is at least as good: equal keys stay FIFO.
        let at = self
            .entries
            .partition_point(|e| ordering.compare_keys(e.key, key).is_le());
        self.entries.insert(at, PriorityEntry { key, node });

        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                self.entries.pop_back();
                self.dropped += 1;
                log::trace!("priority fringe over capacity {capacity}, dropped worst entry");
            }
        }
        self.high_water = self.high_water.max(self.entries.len());
    }

    fn pop(&mut self) -> Option<Rc<SearchNode<S, A>>> {
        let index = self.pop_index();
        self.entries.remove(index).map(|e| e.node)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }

    fn dropped(&self) -> u64 {
        self.dropped
    }
}
