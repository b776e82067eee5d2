//! Per-symbol code words and the table-driven encoder.

use std::cmp::Reverse;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::alphabet;
use crate::tree::{HuffNode, HuffTree};

/// One symbol's code word: the root-to-leaf digit sequence, `false` for a
/// left edge and `true` for a right edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    bits: BitBox,
}

impl Code {
    /// Number of digits in the code word.
    pub fn len(&self) -> u32 {
        self.bits.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Digits in root-to-leaf order.
    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }

    /// The code word packed into an integer, plus its digit count.
    ///
    /// Digits accumulate leaf-to-root so the root-side digit lands in the
    /// least significant bit. A decoder can then strip one digit at a time
    /// with mask-and-halve without knowing the length up front.
    pub fn packed(&self) -> (u64, u32) {
        let mut value = 0u64;
        for idx in (0..self.bits.len()).rev() {
            value = value * 2 + self.bits[idx] as u64;
        }
        (value, self.len())
    }
}

/// One row of the code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub symbol: char,
    pub weight: u64,
    pub code: Code,
}

/// Every trained symbol's code word, heaviest symbol first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    entries: Vec<CodeEntry>,
}

impl Codebook {
    /// Walk `tree` depth-first and record the digit path to every leaf.
    pub fn derive(tree: &HuffTree) -> Self {
        fn walk(node: &HuffNode, path: &mut BitVec, entries: &mut Vec<CodeEntry>) {
            match node {
                HuffNode::Leaf { symbol, weight } => entries.push(CodeEntry {
                    symbol: *symbol,
                    weight: *weight,
                    code: Code {
                        bits: path.clone().into_boxed_bitslice(),
                    },
                }),
                HuffNode::Internal { left, right, .. } => {
                    path.push(false);
                    walk(left, path, entries);
                    path.pop();

                    path.push(true);
                    walk(right, path, entries);
                    path.pop();
                }
            }
        }

        let mut entries = Vec::new();
        let mut path = BitVec::new();
        walk(tree.root(), &mut path, &mut entries);
        // Same order as the ranked symbol list, so a generated encoder tests
        // frequent characters first.
        entries.sort_by_key(|e| (Reverse(e.weight), alphabet::charset_index(e.symbol)));
        Codebook { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table rows, heaviest symbol first.
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    /// The code word for `c`, or `None` for untrained characters.
    pub fn code_for(&self, c: char) -> Option<&Code> {
        self.entries.iter().find(|e| e.symbol == c).map(|e| &e.code)
    }

    /// Length of the longest code word. Equals the tree height.
    pub fn max_code_len(&self) -> u32 {
        self.entries.iter().map(|e| e.code.len()).max().unwrap_or(0)
    }

    /// Σ weight·length over the table, the quantity the tree minimises.
    pub fn weighted_length(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| e.weight * u64::from(e.code.len()))
            .sum()
    }

    /// Concatenate the code words of every character of `s`, root-side digit
    /// first. `None` if any character has no trained code.
    pub fn encode_str(&self, s: &str) -> Option<BitVec> {
        let mut out = BitVec::new();
        for c in s.chars() {
            out.extend_from_bitslice(self.code_for(c)?.bits());
        }
        Some(out)
    }
}

/// Wire form of a codebook: packed integers instead of live bit slices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableCodebook {
    entries: Vec<SerializableCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableCode {
    symbol: char,
    weight: u64,
    bits: u64,
    num_bits: u32,
}

impl From<&Codebook> for SerializableCodebook {
    fn from(book: &Codebook) -> Self {
        Self {
            entries: book
                .entries
                .iter()
                .map(|e| {
                    let (bits, num_bits) = e.code.packed();
                    SerializableCode {
                        symbol: e.symbol,
                        weight: e.weight,
                        bits,
                        num_bits,
                    }
                })
                .collect(),
        }
    }
}

impl From<SerializableCodebook> for Codebook {
    fn from(wire: SerializableCodebook) -> Self {
        Self {
            entries: wire
                .entries
                .into_iter()
                .map(|e| {
                    let mut bits = BitVec::with_capacity(e.num_bits as usize);
                    for i in 0..e.num_bits {
                        bits.push((e.bits >> i) & 1 == 1);
                    }
                    CodeEntry {
                        symbol: e.symbol,
                        weight: e.weight,
                        code: Code {
                            bits: bits.into_boxed_bitslice(),
                        },
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skewed_book() -> (HuffTree, Codebook) {
        let tree = HuffTree::build(&[('a', 10), ('b', 5), ('c', 5), ('d', 1)]).unwrap();
        let book = Codebook::derive(&tree);
        (tree, book)
    }

    #[test]
    fn codes_follow_the_tree_shape() {
        let (_, book) = skewed_book();
        assert_eq!(book.code_for('a').unwrap().bits(), bits![0]);
        assert_eq!(book.code_for('c').unwrap().bits(), bits![1, 0]);
        assert_eq!(book.code_for('d').unwrap().bits(), bits![1, 1, 0]);
        assert_eq!(book.code_for('b').unwrap().bits(), bits![1, 1, 1]);
        assert_eq!(book.code_for('z'), None);
    }

    #[test]
    fn entries_are_ordered_heaviest_first() {
        let (_, book) = skewed_book();
        let symbols: Vec<char> = book.entries().iter().map(|e| e.symbol).collect();
        assert_eq!(symbols, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn packed_puts_the_root_digit_in_the_low_bit() {
        let (tree, book) = skewed_book();
        assert_eq!(book.code_for('a').unwrap().packed(), (0b0, 1));
        assert_eq!(book.code_for('c').unwrap().packed(), (0b01, 2));
        assert_eq!(book.code_for('d').unwrap().packed(), (0b011, 3));
        assert_eq!(book.code_for('b').unwrap().packed(), (0b111, 3));
        for entry in book.entries() {
            let (bits, num_bits) = entry.code.packed();
            assert_eq!(tree.decode_tailbits(bits), (entry.symbol, num_bits));
        }
    }

    #[test]
    fn no_code_prefixes_another() {
        let (_, book) = skewed_book();
        for a in book.entries() {
            for b in book.entries() {
                if a.symbol != b.symbol {
                    assert!(!b.code.bits().starts_with(a.code.bits()));
                }
            }
        }
    }

    #[test]
    fn weighted_length_sums_weight_times_depth() {
        let (tree, book) = skewed_book();
        // 10*1 + 5*3 + 5*2 + 1*3 = 38
        assert_eq!(book.weighted_length(), 38);
        assert_eq!(book.max_code_len(), tree.max_encoding_length());
    }

    #[test]
    fn strings_encode_to_concatenated_codes() {
        let (tree, book) = skewed_book();
        let stream = book.encode_str("acdba").unwrap();
        assert_eq!(stream, bits![0, 1, 0, 1, 1, 0, 1, 1, 1, 0]);
        assert_eq!(tree.decode_bits(&stream), vec!['a', 'c', 'd', 'b', 'a']);
        assert_eq!(book.encode_str("ab!"), None);
    }

    #[test]
    fn single_symbol_code_is_empty() {
        let tree = HuffTree::build(&[('q', 3)]).unwrap();
        let book = Codebook::derive(&tree);
        let code = book.code_for('q').unwrap();
        assert!(code.is_empty());
        assert_eq!(code.packed(), (0, 0));
        assert_eq!(book.encode_str("qqq").unwrap(), BitVec::<usize, Lsb0>::new());
    }

    #[test]
    fn wire_form_round_trips() {
        let (_, book) = skewed_book();
        let wire = SerializableCodebook::from(&book);
        let back = Codebook::from(wire);
        assert_eq!(back, book);
    }
}
