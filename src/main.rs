//! Huffman encoding generation tool.
//!
//! Reads the given corpus files, trains the code on the characters of the
//! allowed alphabet, and writes the generated header to stdout. Diagnostics
//! go to stderr; `RUST_LOG` controls their verbosity.

use std::io::Write;
use std::{env, process};

use tracing::info;
use tracing_subscriber::EnvFilter;

use huffgen::{huffman, Artifact, Codebook, FrequencyTable};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let inputs: Vec<String> = env::args().skip(1).collect();
    if inputs.is_empty() {
        eprintln!("-- Huffman encoding generation tool --");
        eprintln!("Usage: huffgen file1.txt file2.txt file3.txt ...");
        process::exit(1);
    }

    let mut freq = FrequencyTable::new();
    for path in &inputs {
        if let Err(e) = freq.add_file(path) {
            eprintln!("Failed to read {}: {}", path, e);
            process::exit(1);
        }
        info!(file = %path, "processed corpus file");
    }

    let tree = match huffman(&freq) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let codebook = Codebook::derive(&tree);
    info!(
        symbols = codebook.len(),
        longest = tree.max_encoding_length(),
        "trained encoding"
    );

    let artifact = Artifact::new(&inputs, &tree, &codebook).render();
    if let Err(e) = std::io::stdout().write_all(artifact.as_bytes()) {
        eprintln!("Failed to write artifact: {}", e);
        process::exit(1);
    }
}
