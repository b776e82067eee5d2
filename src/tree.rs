//! Optimal prefix-code tree construction.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bitvec::prelude::*;
use derivative::Derivative;
use tracing::debug;

use crate::error::{Error, Result};

/// One node of the prefix-code tree: a leaf owning a symbol, or an internal
/// node owning exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    fn leaf(symbol: char, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Heap ordering is weight first, then arrival sequence, so equal weights
/// resolve in favour of the earlier-queued node. The payload never
/// participates in comparisons.
#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct HeapEntry {
    weight: u64,
    seq: u64,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: HuffNode,
}

/// A fully built prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffTree {
    root: HuffNode,
}

impl HuffTree {
    /// Build the optimal tree for `ranked` (symbol, weight) pairs by
    /// repeatedly merging the two least-weight nodes.
    ///
    /// `ranked` order doubles as the tie-break order: leaves take their rank
    /// as sequence number and merged nodes queue behind everything inserted
    /// before them, which pins down the tree shape when weights collide.
    pub fn build(ranked: &[(char, u64)]) -> Result<Self> {
        let mut heap: BinaryHeap<Reverse<HeapEntry>> = ranked
            .iter()
            .enumerate()
            .map(|(rank, &(symbol, weight))| {
                Reverse(HeapEntry {
                    weight,
                    seq: rank as u64,
                    node: HuffNode::leaf(symbol, weight),
                })
            })
            .collect();

        let mut seq = heap.len() as u64;
        while heap.len() > 1 {
            let Some((Reverse(first), Reverse(second))) = heap.pop().zip(heap.pop()) else {
                break;
            };
            let node = HuffNode::merge(first.node, second.node);
            heap.push(Reverse(HeapEntry {
                weight: node.weight(),
                seq,
                node,
            }));
            seq += 1;
        }

        let root = heap
            .pop()
            .map(|Reverse(entry)| entry.node)
            .ok_or(Error::NoSymbols)?;
        let tree = HuffTree { root };
        debug!(
            symbols = ranked.len(),
            height = tree.max_encoding_length(),
            "built prefix-code tree"
        );
        Ok(tree)
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Height of the tree, which is the length of the longest code word.
    /// A lone-leaf tree has height zero: its one symbol needs no bits.
    pub fn max_encoding_length(&self) -> u32 {
        fn depth(node: &HuffNode) -> u32 {
            match node {
                HuffNode::Leaf { .. } => 0,
                HuffNode::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }

    /// Decode one symbol from the low bits of `tailbits`.
    ///
    /// Returns the symbol and the number of bits consumed so the caller can
    /// advance its bit cursor. Every `u64` reaches some leaf because internal
    /// nodes always carry two children.
    pub fn decode_tailbits(&self, mut tailbits: u64) -> (char, u32) {
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            match node {
                HuffNode::Leaf { symbol, .. } => return (*symbol, depth),
                HuffNode::Internal { left, right, .. } => {
                    node = if tailbits & 1 == 0 { left } else { right };
                    tailbits /= 2;
                    depth += 1;
                }
            }
        }
    }

    /// Decode a whole bit stream written in root-to-leaf code order.
    ///
    /// A lone-leaf tree yields no symbols: its zero-bit code puts nothing in
    /// the stream to walk.
    pub fn decode_bits(&self, bits: &BitSlice) -> Vec<char> {
        if matches!(self.root, HuffNode::Leaf { .. }) {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut node = &self.root;
        for bit in bits.iter().by_vals() {
            if let HuffNode::Internal { left, right, .. } = node {
                node = if bit { right } else { left };
            }
            if let HuffNode::Leaf { symbol, .. } = node {
                out.push(*symbol);
                node = &self.root;
            }
        }
        out
    }
}
