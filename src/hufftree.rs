use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::code_table::{self, CodeTable};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

/// Build a Huffman tree from `frequencies`. See [`HuffmanTree::from_frequencies`].
pub fn build(frequencies: &FrequencyTable) -> Result<HuffmanTree> {
    HuffmanTree::from_frequencies(frequencies)
}

/// A Huffman tree built from symbol frequencies.
///
/// Equality is structural: two trees are equal when they have the same shape,
/// the same leaf symbols in the same positions and the same weight at every
/// node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Build a tree by repeatedly merging the two lightest nodes.
    ///
    /// Fails with [`HuffmanError::InvalidInput`] when fewer than two distinct
    /// symbols are present or the total weight does not fit in a `u64`.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.len() < 2 {
            return Err(HuffmanError::invalid_input(format!(
                "need at least 2 distinct symbols, got {}",
                frequencies.len()
            )));
        }
        let total = frequencies
            .total()
            .ok_or_else(|| HuffmanError::invalid_input("total weight overflows u64"))?;

        // FrequencyTable iterates in symbol order, so seeding is reproducible.
        let entries: Vec<QueueEntry> = frequencies
            .iter()
            .map(|(symbol, weight)| QueueEntry::leaf(HuffNode::new(symbol, weight)))
            .collect();

        debug!(symbols = entries.len(), total, "building huffman tree");
        Self::build_from_heap(MinHeap::build(entries))
    }

    /// Count the bytes in `bytes` and build a tree from the result.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    fn build_from_heap(mut heap: MinHeap<QueueEntry>) -> Result<Self> {
        let mut seq = 0usize;
        let root = loop {
            let x = heap
                .extract_min()
                .ok_or_else(|| HuffmanError::invalid_input("empty priority queue"))?;
            let Some(y) = heap.extract_min() else {
                break x.node;
            };

            let z = HuffNode::merge(x.node, y.node)?;
            trace!(seq, weight = z.weight(), remaining = heap.heap_size(), "merged nodes");
            heap.insert(QueueEntry::internal(z, seq));
            seq += 1;
        };

        debug!(merges = seq, weight = root.weight(), "huffman tree built");
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Total weight, i.e. the root's weight.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Derive the symbol to code mapping. See [`code_table::extract`].
    pub fn generate_table(&self) -> Result<CodeTable> {
        code_table::extract(self)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|(node, _)| node.is_leaf()).count()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.nodes().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Whether every internal node weighs exactly the sum of its children.
    pub fn is_weight_consistent(&self) -> bool {
        self.nodes().all(|(node, _)| match node {
            HuffNode::Leaf { .. } => true,
            HuffNode::Internal {
                weight,
                left,
                right,
            } => left.weight().checked_add(right.weight()) == Some(*weight),
        })
    }

    /// Pre-order walk (node, left, right) yielding each node with its depth.
    fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![(&self.root, 0)],
        }
    }

    /// Render the tree one node per line, indented by depth, under a
    /// `Huffman tree: <label>` heading.
    pub fn render(&self, label: &str) -> String {
        format!("Huffman tree: {}\n{}", label, self)
    }

    pub fn print_structure(&self, label: &str) {
        print!("{}", self.render(label));
    }
}

impl From<HuffNode> for HuffmanTree {
    fn from(root: HuffNode) -> Self {
        HuffmanTree { root }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(&self.root, 0usize, "root")];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                HuffNode::Leaf { symbol, weight } => {
                    writeln!(
                        f,
                        "{}{}-> Leaf: '{}' ({}) [weight: {}]",
                        indent,
                        label,
                        symbol.escape_ascii(),
                        symbol,
                        weight
                    )?;
                }
                HuffNode::Internal {
                    weight,
                    left,
                    right,
                } => {
                    writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                    stack.push((right.as_ref(), depth + 1, "R"));
                    stack.push((left.as_ref(), depth + 1, "L"));
                }
            }
        }
        Ok(())
    }
}

struct Nodes<'a> {
    stack: Vec<(&'a HuffNode, usize)>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (&'a HuffNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if let HuffNode::Internal { left, right, .. } = node {
            self.stack.push((right.as_ref(), depth + 1));
            self.stack.push((left.as_ref(), depth + 1));
        }
        Some((node, depth))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: u8, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Join two subtrees; `a` becomes the left (0) branch.
    ///
    /// Fails with [`HuffmanError::InvalidInput`] if the combined weight
    /// overflows a `u64`.
    pub fn merge(a: Self, b: Self) -> Result<Self> {
        let weight = a
            .weight()
            .checked_add(b.weight())
            .ok_or_else(|| HuffmanError::invalid_input("merged weight overflows u64"))?;
        Ok(HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        })
    }
}

/// Priority queue slot used only while the tree is being built.
///
/// Orders by weight, then leaves before internal nodes, then leaves by
/// symbol and internal nodes by merge sequence.
#[derive(Debug)]
struct QueueEntry {
    node: HuffNode,
    seq: usize,
}

impl QueueEntry {
    fn leaf(node: HuffNode) -> Self {
        QueueEntry { node, seq: 0 }
    }

    fn internal(node: HuffNode, seq: usize) -> Self {
        QueueEntry { node, seq }
    }

    fn key(&self) -> (u64, u8, usize) {
        match &self.node {
            HuffNode::Leaf { symbol, weight } => (*weight, 0, usize::from(*symbol)),
            HuffNode::Internal { weight, .. } => (*weight, 1, self.seq),
        }
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
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
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn join(a: HuffNode, b: HuffNode) -> HuffNode {
        HuffNode::merge(a, b).unwrap()
    }

    fn abcd() -> FrequencyTable {
        FrequencyTable::from([(b'A', 3), (b'B', 2), (b'C', 1), (b'D', 1)])
    }

    #[test]
    fn test_build_seed_tree() {
        let tree = HuffmanTree::from_frequencies(&abcd()).unwrap();

        let expected = HuffmanTree::from(join(
            HuffNode::new(b'A', 3),
            join(
                HuffNode::new(b'B', 2),
                join(HuffNode::new(b'C', 1), HuffNode::new(b'D', 1)),
            ),
        ));

        if tree != expected {
            tree.print_structure("actual");
            expected.print_structure("expected");
            panic!("trees are not equal");
        }
        assert_eq!(tree.weight(), 7);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.depth(), 3);
        assert!(tree.is_weight_consistent());
    }

    #[test]
    fn test_two_symbols_single_merge() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from([(9, 4), (2, 4)])).unwrap();
        let expected = HuffmanTree::from(join(HuffNode::new(2, 4), HuffNode::new(9, 4)));
        assert_eq!(tree, expected);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_rejects_small_alphabets() {
        let err = HuffmanTree::from_frequencies(&FrequencyTable::new()).unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidInput { .. }));

        let err = HuffmanTree::from_frequencies(&FrequencyTable::from([(b'A', 1)])).unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidInput { .. }));
    }

    #[test]
    fn test_rejects_weight_overflow() {
        let freqs = FrequencyTable::from([(0, u64::MAX), (1, 1)]);
        let err = HuffmanTree::from_frequencies(&freqs).unwrap_err();
        assert_eq!(err, HuffmanError::invalid_input("total weight overflows u64"));
    }

    #[test]
    fn test_leaf_sorts_before_internal_on_tie() {
        // After C+D merge into weight 2, the leaf B (weight 2) must be
        // extracted first and land on the left.
        let tree = HuffmanTree::from_frequencies(&abcd()).unwrap();
        let HuffNode::Internal { right, .. } = tree.root() else {
            panic!("root must be internal");
        };
        let HuffNode::Internal { left, right, .. } = right.as_ref() else {
            panic!("expected internal node of weight 4");
        };
        assert_eq!(**left, HuffNode::new(b'B', 2));
        assert!(!right.is_leaf());
    }

    #[test]
    fn test_internal_ties_use_merge_order() {
        // Four equal leaves produce two weight-2 internals; the earlier
        // merge ({0,1}) must become the left child of the root.
        let freqs = FrequencyTable::from([(0, 1), (1, 1), (2, 1), (3, 1)]);
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        let expected = HuffmanTree::from(join(
            join(HuffNode::new(0, 1), HuffNode::new(1, 1)),
            join(HuffNode::new(2, 1), HuffNode::new(3, 1)),
        ));
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_equality_checks_weights() {
        let a = HuffmanTree::from(join(HuffNode::new(1, 1), HuffNode::new(2, 2)));
        let b = HuffmanTree::from(join(HuffNode::new(1, 1), HuffNode::new(2, 3)));
        let c = HuffmanTree::from(join(HuffNode::new(2, 2), HuffNode::new(1, 1)));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_merge_rejects_weight_overflow() {
        let err = HuffNode::merge(HuffNode::new(0, u64::MAX), HuffNode::new(1, 1)).unwrap_err();
        assert_eq!(err, HuffmanError::invalid_input("merged weight overflows u64"));

        let max = join(HuffNode::new(0, u64::MAX - 1), HuffNode::new(1, 1));
        assert_eq!(max.weight(), u64::MAX);
    }

    #[test]
    fn test_weight_consistency_detects_bad_sum() {
        let bad = HuffmanTree::from(HuffNode::Internal {
            weight: 10,
            left: Box::new(HuffNode::new(1, 1)),
            right: Box::new(HuffNode::new(2, 2)),
        });
        assert!(!bad.is_weight_consistent());
    }

    #[test]
    fn test_render_preorder_with_indent() {
        let tree = HuffmanTree::from_frequencies(&abcd()).unwrap();
        let rendered = tree.render("seed");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Huffman tree: seed",
                "root-> Internal [weight: 7]",
                "  L-> Leaf: 'A' (65) [weight: 3]",
                "  R-> Internal [weight: 4]",
                "    L-> Leaf: 'B' (66) [weight: 2]",
                "    R-> Internal [weight: 2]",
                "      L-> Leaf: 'C' (67) [weight: 1]",
                "      R-> Leaf: 'D' (68) [weight: 1]",
            ]
        );
    }

    #[test]
    fn test_from_bytes() {
        let tree = HuffmanTree::from_bytes(b"AAABBCD").unwrap();
        assert_eq!(tree, HuffmanTree::from_frequencies(&abcd()).unwrap());
        assert!(HuffmanTree::from_bytes(b"aaaa").is_err());
    }

    #[test]
    fn test_full_alphabet_depth_bounded() {
        let freqs: FrequencyTable = (0..=255u8).map(|s| (s, u64::from(s) + 1)).collect();
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        assert_eq!(tree.leaf_count(), 256);
        assert!(tree.depth() <= 255);
        assert!(tree.is_weight_consistent());
    }
}
