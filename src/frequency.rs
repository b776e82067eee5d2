//! Character frequency aggregation over corpus text.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::alphabet;
use crate::error::Result;

/// Per-character occurrence counts for a training corpus.
///
/// Counting is raw: every character of a trimmed line lands in the histogram,
/// whitespace and punctuation included. The alphabet filter applies when the
/// symbols are ranked, not here.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<char, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every character of `line` after trimming surrounding whitespace.
    pub fn add_line(&mut self, line: &str) {
        for c in line.trim().chars() {
            *self.counts.entry(c).or_default() += 1;
        }
    }

    /// Feed each line of `text` through [`add_line`](Self::add_line).
    pub fn add_text(&mut self, text: &str) {
        for line in text.lines() {
            self.add_line(line);
        }
    }

    /// Read `path` whole and count its text. Invalid UTF-8 is replaced
    /// lossily; the replacement characters fall outside the alphabet and are
    /// dropped at ranking time.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let raw = fs::read(path)?;
        self.add_text(&String::from_utf8_lossy(&raw));
        Ok(())
    }

    /// Number of distinct characters seen so far, allowed or not.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Occurrence count for `c`, zero if never seen.
    pub fn count(&self, c: char) -> u64 {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    /// Allowed symbols paired with their weights, heaviest first.
    ///
    /// Characters outside the alphabet are silently dropped. Weight ties
    /// order by charset position so the ranking is reproducible run to run.
    pub fn ranked_symbols(&self) -> Vec<(char, u64)> {
        let mut ranked: Vec<(usize, char, u64)> = self
            .counts
            .iter()
            .filter_map(|(&c, &n)| alphabet::charset_index(c).map(|pos| (pos, c, n)))
            .collect();
        ranked.sort_by_key(|&(pos, _, n)| (std::cmp::Reverse(n), pos));
        debug!(
            distinct = self.counts.len(),
            eligible = ranked.len(),
            "ranked corpus symbols"
        );
        ranked.into_iter().map(|(_, c, n)| (c, n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_trimmed_before_counting() {
        let mut freq = FrequencyTable::new();
        freq.add_line("  ab  ");
        assert_eq!(freq.count('a'), 1);
        assert_eq!(freq.count('b'), 1);
        assert_eq!(freq.count(' '), 0);
    }

    #[test]
    fn interior_whitespace_is_counted() {
        let mut freq = FrequencyTable::new();
        freq.add_line("a b");
        assert_eq!(freq.count(' '), 1);
        assert_eq!(freq.distinct(), 3);
    }

    #[test]
    fn ranking_orders_by_weight_then_charset_position() {
        let mut freq = FrequencyTable::new();
        freq.add_text("ccc\nbbb\naaaa\nd");
        assert_eq!(
            freq.ranked_symbols(),
            vec![('a', 4), ('b', 3), ('c', 3), ('d', 1)]
        );
    }

    #[test]
    fn ranking_drops_foreign_characters() {
        let mut freq = FrequencyTable::new();
        freq.add_text("a!!!!b");
        assert_eq!(freq.count('!'), 4);
        assert_eq!(freq.ranked_symbols(), vec![('a', 1), ('b', 1)]);
    }

    #[test]
    fn text_splits_into_lines() {
        let mut freq = FrequencyTable::new();
        freq.add_text(" x \n y \n");
        assert_eq!(freq.count('x'), 1);
        assert_eq!(freq.count('y'), 1);
        assert_eq!(freq.count(' '), 0);
    }
}
