//! Huffman tree construction.
//!
//! The tree is built once per input from its byte frequencies. Every tree
//! carries exactly one extra leaf, the end-of-stream symbol, with weight 1.
//!
//! # Tie-breaking
//!
//! Nodes are ordered by `(weight, sequence)`. Leaves get sequence numbers in
//! ascending byte order, the end-of-stream leaf gets the next one, and every
//! merged node gets the next number after that. Among equal weights the
//! node created first is removed first, so a given input always produces
//! the same tree and the same compressed bytes.

use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// Value of the end-of-stream symbol in the 9-bit header field.
pub const PSEUDO_EOF: u16 = 256;

/// Number of distinct symbols: 256 bytes plus end-of-stream.
pub const SYMBOL_COUNT: usize = 257;

/// A leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A literal byte.
    Byte(u8),
    /// End-of-stream marker.
    EndOfStream,
}

impl Symbol {
    /// Numeric value (0-255 for bytes, 256 for end-of-stream).
    pub fn value(self) -> u16 {
        match self {
            Self::Byte(b) => u16::from(b),
            Self::EndOfStream => PSEUDO_EOF,
        }
    }

    /// Symbol for a numeric value, or `None` above 256.
    pub fn from_value(value: u16) -> Option<Self> {
        match value {
            0..=255 => Some(Self::Byte(value as u8)),
            PSEUDO_EOF => Some(Self::EndOfStream),
            _ => None,
        }
    }

    /// Index into per-symbol tables.
    #[inline]
    pub fn index(self) -> usize {
        self.value() as usize
    }

    /// Whether this is the end-of-stream marker.
    pub fn is_end_of_stream(self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(b) if b.is_ascii_graphic() => write!(f, "{:#04x} '{}'", b, *b as char),
            Self::Byte(b) => write!(f, "{:#04x}", b),
            Self::EndOfStream => f.write_str("EOS"),
        }
    }
}

/// A vertex of the code tree.
///
/// Children are owned, so the tree can never share or cycle. Weights only
/// matter while building; a tree read back from a header has zero weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A symbol.
    Leaf {
        /// Symbol stored at this leaf.
        symbol: Symbol,
        /// Occurrence count.
        weight: u64,
    },
    /// A decision point: `0` goes left, `1` goes right.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree for bit `0`.
        left: Box<TreeNode>,
        /// Subtree for bit `1`.
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Create a leaf.
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        Self::Leaf { symbol, weight }
    }

    /// Combine two nodes; `left` is the smaller one.
    pub fn merge(left: Self, right: Self) -> Self {
        Self::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Weight of this node.
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Leaf symbol, or `None` for an internal node.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::Leaf { symbol, .. } => Some(*symbol),
            Self::Internal { .. } => None,
        }
    }

    /// Children of an internal node.
    pub fn children(&self) -> Option<(&TreeNode, &TreeNode)> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Priority queue entry ordered by `(weight, sequence)`, smallest first.
#[derive(Debug)]
struct QueueEntry {
    weight: u64,
    sequence: u32,
    node: TreeNode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that BinaryHeap pops the lightest, oldest node.
        (other.weight, other.sequence).cmp(&(self.weight, self.sequence))
    }
}

/// Min-queue of tree nodes with insertion-order tie-breaking.
#[derive(Debug)]
struct NodeQueue {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u32,
}

impl NodeQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    fn push(&mut self, node: TreeNode) {
        let entry = QueueEntry {
            weight: node.weight(),
            sequence: self.next_sequence,
            node,
        };
        self.next_sequence += 1;
        self.heap.push(entry);
    }

    fn pop(&mut self) -> Option<TreeNode> {
        self.heap.pop().map(|entry| entry.node)
    }
}

/// A complete code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
}

impl HuffmanTree {
    /// Build the optimal tree for the given counts.
    ///
    /// Bytes with a zero count get no leaf. The end-of-stream leaf is added
    /// unconditionally, so an empty input yields a tree whose root is that
    /// single leaf.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let mut queue = NodeQueue::with_capacity(frequencies.distinct() + 1);

        for (byte, count) in frequencies.iter() {
            queue.push(TreeNode::leaf(Symbol::Byte(byte), count));
        }
        queue.push(TreeNode::leaf(Symbol::EndOfStream, 1));

        let root = loop {
            match (queue.pop(), queue.pop()) {
                (Some(left), Some(right)) => queue.push(TreeNode::merge(left, right)),
                (Some(root), None) => break root,
                (None, _) => unreachable!("queue always holds the end-of-stream leaf"),
            }
        };

        let tree = Self { root };
        log::debug!(
            "built Huffman tree: {} leaves, depth {}, weight {}",
            tree.leaf_count(),
            tree.depth(),
            tree.root.weight()
        );
        tree
    }

    /// Build a tree directly from its root without validation.
    pub fn from_root(root: TreeNode) -> Self {
        Self { root }
    }

    /// Root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of leaves (distinct bytes plus end-of-stream).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Whether the root is itself a leaf (empty input).
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights_consistent(node: &TreeNode) -> bool {
        match node {
            TreeNode::Leaf { .. } => true,
            TreeNode::Internal {
                weight,
                left,
                right,
            } => {
                *weight == left.weight() + right.weight()
                    && weights_consistent(left)
                    && weights_consistent(right)
            }
        }
    }

    fn count_end_of_stream(node: &TreeNode) -> usize {
        match node {
            TreeNode::Leaf { symbol, .. } => usize::from(symbol.is_end_of_stream()),
            TreeNode::Internal { left, right, .. } => {
                count_end_of_stream(left) + count_end_of_stream(right)
            }
        }
    }

    #[test]
    fn test_symbol_values() {
        assert_eq!(Symbol::Byte(0).value(), 0);
        assert_eq!(Symbol::Byte(255).value(), 255);
        assert_eq!(Symbol::EndOfStream.value(), 256);
        assert_eq!(Symbol::from_value(97), Some(Symbol::Byte(97)));
        assert_eq!(Symbol::from_value(256), Some(Symbol::EndOfStream));
        assert_eq!(Symbol::from_value(257), None);
        assert_eq!(Symbol::from_value(511), None);
    }

    #[test]
    fn test_empty_input_single_leaf() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::new());
        assert!(tree.is_single_leaf());
        assert_eq!(tree.root().symbol(), Some(Symbol::EndOfStream));
        assert_eq!(tree.root().weight(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_single_symbol_tree() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"aaaa"));
        let (left, right) = tree.root().children().unwrap();

        // EOS (weight 1) is removed first and becomes the left child.
        assert_eq!(left.symbol(), Some(Symbol::EndOfStream));
        assert_eq!(right.symbol(), Some(Symbol::Byte(b'a')));
        assert_eq!(right.weight(), 4);
        assert_eq!(tree.root().weight(), 5);
    }

    #[test]
    fn test_tie_break_by_insertion_order() {
        // a, b and EOS all weigh 1: a (seq 0) and b (seq 1) merge first,
        // then EOS (seq 2, weight 1) pairs with the merged node (weight 2).
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(b"ab"));
        let (left, right) = tree.root().children().unwrap();

        assert_eq!(left.symbol(), Some(Symbol::EndOfStream));
        let (ll, lr) = right.children().unwrap();
        assert_eq!(ll.symbol(), Some(Symbol::Byte(b'a')));
        assert_eq!(lr.symbol(), Some(Symbol::Byte(b'b')));
    }

    #[test]
    fn test_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let freq = FrequencyTable::from_bytes(data);
        assert_eq!(
            HuffmanTree::from_frequencies(&freq),
            HuffmanTree::from_frequencies(&freq)
        );
    }

    #[test]
    fn test_structure_invariants() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; (b as usize % 7) + 1]).collect();
        let freq = FrequencyTable::from_bytes(&data);
        let tree = HuffmanTree::from_frequencies(&freq);

        assert_eq!(tree.leaf_count(), 257);
        assert_eq!(count_end_of_stream(tree.root()), 1);
        assert!(weights_consistent(tree.root()));
        assert_eq!(tree.root().weight(), data.len() as u64 + 1);
    }

    #[test]
    fn test_skewed_weights_depth() {
        // Fibonacci counts next to the weight-1 EOS leaf give a chain.
        let mut counts = [0u64; 256];
        let (mut a, mut b) = (1u64, 2u64);
        for count in counts.iter_mut().take(20) {
            *count = a;
            let next = a + b;
            a = b;
            b = next;
        }
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from(counts));
        assert_eq!(tree.leaf_count(), 21);
        assert_eq!(tree.depth(), 20);
    }
}
