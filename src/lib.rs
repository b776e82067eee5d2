//! Canonical Huffman coding over the mangled-name alphabet.
//!
//! This crate trains a variable-length prefix code on sample corpora of
//! mangled symbol names and renders a self-contained C++ header carrying the
//! matching bit-level encode and decode procedures. The pipeline is strictly
//! linear: corpus text feeds a [`FrequencyTable`], its ranked symbols feed
//! [`HuffTree::build`], the tree yields a [`Codebook`], and [`Artifact`]
//! renders the header for the consumer build.
//!
//! ```
//! use huffgen::{huffman, Codebook, FrequencyTable};
//!
//! let mut freq = FrequencyTable::new();
//! freq.add_line("_TtGV4main5ThingSi_");
//! let tree = huffman(&freq)?;
//! let codebook = Codebook::derive(&tree);
//!
//! let (bits, len) = codebook.code_for('T').expect("trained symbol").packed();
//! assert_eq!(tree.decode_tailbits(bits), ('T', len));
//! # Ok::<(), huffgen::Error>(())
//! ```

pub mod alphabet;
pub mod codebook;
pub mod emit;
pub mod error;
pub mod frequency;
pub mod tree;

pub use codebook::{Code, CodeEntry, Codebook, SerializableCodebook};
pub use emit::Artifact;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffNode, HuffTree};

/// Build the optimal prefix-code tree for everything counted so far.
pub fn huffman(freq: &FrequencyTable) -> Result<HuffTree> {
    HuffTree::build(&freq.ranked_symbols())
}
