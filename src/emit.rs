//! Emission of the generated C++ header.
//!
//! Rendering is a pure function of the trained tree, the code table and the
//! input file names: identical inputs produce byte-identical text.

use std::path::Path;

use tracing::debug;

use crate::alphabet;
use crate::codebook::Codebook;
use crate::tree::{HuffNode, HuffTree};

/// The self-contained header carrying the tables and both procedures.
#[derive(Debug)]
pub struct Artifact<'a> {
    inputs: &'a [String],
    tree: &'a HuffTree,
    codebook: &'a Codebook,
}

impl<'a> Artifact<'a> {
    pub fn new(inputs: &'a [String], tree: &'a HuffTree, codebook: &'a Codebook) -> Self {
        Self {
            inputs,
            tree,
            codebook,
        }
    }

    /// Render the complete header text.
    pub fn render(&self) -> String {
        let basenames: Vec<&str> = self
            .inputs
            .iter()
            .map(|p| {
                Path::new(p)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(p.as_str())
            })
            .collect();
        let index_entries: Vec<String> = alphabet::INDEX_OF_CHAR
            .iter()
            .map(|v| v.to_string())
            .collect();

        let mut out = String::new();
        out.push_str("#ifndef MANGLER_HUFFMAN_H\n");
        out.push_str("#define MANGLER_HUFFMAN_H\n");
        out.push_str("#include <assert.h>\n");
        out.push_str("#include <utility>\n");
        out.push_str("#include \"llvm/ADT/APInt.h\"\n");
        out.push_str("using APInt = llvm::APInt;\n");
        out.push_str("// This file is autogenerated. Do not modify this file.\n");
        out.push_str(&format!(
            "// Processing text files: {}\n",
            basenames.join(" ")
        ));
        out.push_str("namespace Huffman {\n");
        out.push_str("// The charset that the fragment indices can use:\n");
        out.push_str(&format!(
            "const unsigned CharsetLength = {};\n",
            alphabet::CHARSET_LEN
        ));
        out.push_str(&format!(
            "const unsigned LongestEncodingLength = {};\n",
            self.tree.max_encoding_length()
        ));
        out.push_str(&format!("const char *Charset = \"{}\";\n", alphabet::CHARSET));
        out.push_str(&format!(
            "const int IndexOfChar[] = {{ {} }};\n",
            index_entries.join(",")
        ));
        out.push_str("std::pair<char, unsigned> variable_decode(uint64_t tailbits) {\n");
        out.push_str(&decoder_logic(self.tree.root(), 0));
        out.push_str("\n  assert(false); return {0, 0};\n}\n");
        out.push_str("void variable_encode(uint64_t &bits, uint64_t &num_bits, char ch) {\n");
        out.push_str(&encoder_logic(self.codebook));
        out.push_str("  assert(false);\n}\n");
        out.push_str("} // namespace\n");
        out.push_str("#endif /* MANGLER_HUFFMAN_H */\n");

        debug!(bytes = out.len(), "rendered artifact");
        out
    }
}

/// One first-match-wins branch per symbol, heaviest first. The comment on
/// each branch shows the packed digits most significant bit first.
pub fn encoder_logic(codebook: &Codebook) -> String {
    let mut out = String::new();
    for entry in codebook.entries() {
        let (bits, num_bits) = entry.code.packed();
        let pattern: String = (0..num_bits)
            .rev()
            .map(|i| if (bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect();
        out.push_str(&format!(
            "if (ch == '{}') {{/*{}*/ bits = {}; num_bits = {}; return; }}\n",
            entry.symbol, pattern, bits, num_bits
        ));
    }
    out
}

/// Nested bit tests mirroring the tree shape. Each leaf returns its symbol
/// and the number of bits consumed to reach it; indentation tracks depth.
pub fn decoder_logic(node: &HuffNode, depth: u32) -> String {
    let space = " ".repeat(depth as usize);
    match node {
        HuffNode::Leaf { symbol, .. } => format!("{space}return {{'{symbol}', {depth}}};"),
        HuffNode::Internal { left, right, .. } => {
            let left_block = decoder_logic(left, depth + 1);
            let right_block = decoder_logic(right, depth + 1);
            format!(
                "{space}if ((tailbits & 1) == 0) {{\n{space} tailbits/=2;\n{left_block}\n{space}}}\n\
                 {space}if ((tailbits & 1) == 1) {{\n{space} tailbits/=2;\n{right_block}\n{space}}}"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::HuffTree;

    fn two_symbol() -> (HuffTree, Codebook) {
        let tree = HuffTree::build(&[('a', 2), ('b', 1)]).unwrap();
        let book = Codebook::derive(&tree);
        (tree, book)
    }

    #[test]
    fn decoder_nests_one_branch_per_edge() {
        let (tree, _) = two_symbol();
        let expected = "if ((tailbits & 1) == 0) {\n \
                        tailbits/=2;\n \
                        return {'b', 1};\n}\n\
                        if ((tailbits & 1) == 1) {\n \
                        tailbits/=2;\n \
                        return {'a', 1};\n}";
        assert_eq!(decoder_logic(tree.root(), 0), expected);
    }

    #[test]
    fn encoder_emits_one_branch_per_symbol_heaviest_first() {
        let (_, book) = two_symbol();
        let expected = "if (ch == 'a') {/*1*/ bits = 1; num_bits = 1; return; }\n\
                        if (ch == 'b') {/*0*/ bits = 0; num_bits = 1; return; }\n";
        assert_eq!(encoder_logic(&book), expected);
    }

    #[test]
    fn single_symbol_encodes_to_zero_bits() {
        let tree = HuffTree::build(&[('x', 9)]).unwrap();
        let book = Codebook::derive(&tree);
        assert_eq!(
            encoder_logic(&book),
            "if (ch == 'x') {/**/ bits = 0; num_bits = 0; return; }\n"
        );
        assert_eq!(decoder_logic(tree.root(), 0), "return {'x', 0};");
    }

    #[test]
    fn render_wraps_the_header_in_guard_and_namespace() {
        let (tree, book) = two_symbol();
        let inputs = vec!["/corpus/dir/names.txt".to_string()];
        let text = Artifact::new(&inputs, &tree, &book).render();

        assert!(text.starts_with("#ifndef MANGLER_HUFFMAN_H\n#define MANGLER_HUFFMAN_H\n"));
        assert!(text.ends_with("} // namespace\n#endif /* MANGLER_HUFFMAN_H */\n"));
        assert!(text.contains("// Processing text files: names.txt\n"));
        assert!(text.contains("const unsigned CharsetLength = 64;\n"));
        assert!(text.contains("const unsigned LongestEncodingLength = 1;\n"));
        assert!(text.contains(&format!("const char *Charset = \"{}\";\n", alphabet::CHARSET)));
        assert!(text.contains("std::pair<char, unsigned> variable_decode(uint64_t tailbits) {"));
        assert!(text.contains("void variable_encode(uint64_t &bits, uint64_t &num_bits, char ch) {"));
        assert!(text.contains("  assert(false); return {0, 0};\n}"));
    }

    #[test]
    fn render_is_deterministic() {
        let (tree, book) = two_symbol();
        let inputs = vec!["names.txt".to_string(), "more.txt".to_string()];
        let artifact = Artifact::new(&inputs, &tree, &book);
        assert_eq!(artifact.render(), artifact.render());
        assert!(artifact.render().contains("// Processing text files: names.txt more.txt\n"));
    }
}
