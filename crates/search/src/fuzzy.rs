//! Fuzzy matching with the Bitap (shift-and) algorithm.
//!
//! A pattern is compiled once into per-character bit masks and then run
//! against each field. The score of a match is `errors / pattern_len`, plus a
//! proximity penalty when location matters; `0.0` is only returned when the
//! pattern equals the whole text. Patterns longer than [`MAX_PATTERN_BITS`]
//! characters are split into chunks whose scores are averaged.

use crate::config::MatchOptions;
use std::collections::HashMap;

/// Longest pattern a single bit mask can hold.
pub const MAX_PATTERN_BITS: usize = 32;

/// Lowest score a non-identical match can get.
pub const MIN_MATCH_SCORE: f64 = 0.001;

/// Outcome of matching one pattern against one text.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Whether the text matched within the threshold
    pub is_match: bool,
    /// Dissimilarity, 0.0 (identical) to 1.0
    pub score: f64,
    /// Inclusive character ranges that matched
    pub indices: Vec<(usize, usize)>,
}

impl MatchResult {
    /// A non-match.
    pub fn none() -> Self {
        Self {
            is_match: false,
            score: 1.0,
            indices: Vec::new(),
        }
    }
}

/// Something that can score a text against a compiled query.
pub trait Matcher: Send + Sync {
    /// Match the (already lowercased) text.
    fn search(&self, text: &str) -> MatchResult;
}

#[derive(Debug, Clone)]
struct Chunk {
    pattern: Vec<char>,
    alphabet: HashMap<char, u64>,
    start_index: usize,
}

impl Chunk {
    fn new(pattern: &[char], start_index: usize) -> Self {
        let len = pattern.len();
        let mut alphabet: HashMap<char, u64> = HashMap::new();
        for (i, c) in pattern.iter().enumerate() {
            *alphabet.entry(*c).or_insert(0) |= 1 << (len - i - 1);
        }
        Self {
            pattern: pattern.to_vec(),
            alphabet,
            start_index,
        }
    }
}

/// A compiled Bitap pattern.
#[derive(Debug, Clone)]
pub struct BitapPattern {
    pattern: String,
    chunks: Vec<Chunk>,
    options: MatchOptions,
}

impl BitapPattern {
    /// Compile a pattern. The pattern is lowercased.
    pub fn new(pattern: &str, options: &MatchOptions) -> Self {
        let pattern = pattern.to_lowercase();
        let chars: Vec<char> = pattern.chars().collect();
        let len = chars.len();

        let mut chunks = Vec::new();
        if len <= MAX_PATTERN_BITS {
            if len > 0 {
                chunks.push(Chunk::new(&chars, 0));
            }
        } else {
            let remainder = len % MAX_PATTERN_BITS;
            let end = len - remainder;
            let mut i = 0;
            while i < end {
                chunks.push(Chunk::new(&chars[i..i + MAX_PATTERN_BITS], i));
                i += MAX_PATTERN_BITS;
            }
            if remainder > 0 {
                let start = len - MAX_PATTERN_BITS;
                chunks.push(Chunk::new(&chars[start..], start));
            }
        }

        Self {
            pattern,
            chunks,
            options: options.clone(),
        }
    }

    /// The lowercased pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Matcher for BitapPattern {
    fn search(&self, text: &str) -> MatchResult {
        if self.chunks.is_empty() || text.is_empty() {
            return MatchResult::none();
        }

        if self.pattern == text {
            return MatchResult {
                is_match: true,
                score: 0.0,
                indices: vec![(0, text.chars().count() - 1)],
            };
        }

        let text: Vec<char> = text.chars().collect();
        let mut all_indices = Vec::new();
        let mut total_score = 0.0;
        let mut has_matches = false;

        for chunk in &self.chunks {
            let result = search_chunk(
                &text,
                chunk,
                self.options.location + chunk.start_index,
                &self.options,
            );
            if result.is_match {
                has_matches = true;
                all_indices.extend(result.indices);
            }
            total_score += result.score;
        }

        MatchResult {
            is_match: has_matches,
            score: if has_matches {
                total_score / self.chunks.len() as f64
            } else {
                1.0
            },
            indices: all_indices,
        }
    }
}

struct Scorer {
    pattern_len: usize,
    expected_location: usize,
    distance: usize,
    ignore_location: bool,
}

impl Scorer {
    fn score(&self, errors: usize, current_location: usize) -> f64 {
        let accuracy = errors as f64 / self.pattern_len as f64;
        if self.ignore_location {
            return accuracy;
        }

        let proximity = self.expected_location.abs_diff(current_location);
        if self.distance == 0 {
            return if proximity > 0 { 1.0 } else { accuracy };
        }

        accuracy + proximity as f64 / self.distance as f64
    }
}

fn search_chunk(
    text: &[char],
    chunk: &Chunk,
    location: usize,
    options: &MatchOptions,
) -> MatchResult {
    let pattern = &chunk.pattern;
    let pattern_len = pattern.len();
    let text_len = text.len();
    let expected_location = location.min(text_len);

    let scorer = Scorer {
        pattern_len,
        expected_location,
        distance: options.distance,
        ignore_location: options.ignore_location,
    };

    let mut current_threshold = options.threshold;
    let mut match_mask = vec![false; text_len];

    // Exact occurrences tighten the threshold before the fuzzy pass.
    let mut cursor = expected_location;
    while let Some(index) = find_from(text, pattern, cursor) {
        current_threshold = current_threshold.min(scorer.score(0, index));
        cursor = index + pattern_len;
        for slot in &mut match_mask[index..index + pattern_len] {
            *slot = true;
        }
    }

    let mut best_location: Option<usize> = None;
    let mut final_score = 1.0;
    let mut last_bit_arr: Vec<u64> = Vec::new();
    let mut bin_max = pattern_len + text_len;
    let mask: u64 = 1 << (pattern_len - 1);

    for errors in 0..pattern_len {
        // Widest window in which this many errors can still pass.
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            if scorer.score(errors, expected_location + bin_mid) <= current_threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = (expected_location + 1).saturating_sub(bin_mid).max(1);
        let finish = if options.find_all_matches {
            text_len
        } else {
            (expected_location + bin_mid).min(text_len) + pattern_len
        };

        let mut bit_arr = vec![0u64; finish + 2];
        bit_arr[finish + 1] = (1u64 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let current_location = j - 1;
            let char_match = text
                .get(current_location)
                .and_then(|c| chunk.alphabet.get(c))
                .copied()
                .unwrap_or(0);

            if let Some(slot) = match_mask.get_mut(current_location) {
                *slot = char_match != 0;
            }

            bit_arr[j] = ((bit_arr[j + 1] << 1) | 1) & char_match;

            if errors > 0 {
                let prev_next = last_bit_arr.get(j + 1).copied().unwrap_or(0);
                let prev_here = last_bit_arr.get(j).copied().unwrap_or(0);
                bit_arr[j] |= ((prev_next | prev_here) << 1) | 1 | prev_next;
            }

            if bit_arr[j] & mask != 0 {
                let score = scorer.score(errors, current_location);
                if score <= current_threshold {
                    current_threshold = score;
                    final_score = score;
                    best_location = Some(current_location);

                    if current_location <= expected_location {
                        break;
                    }
                    start = (2 * expected_location).saturating_sub(current_location).max(1);
                }
            }

            j -= 1;
        }

        // One more error can't beat what we have.
        if scorer.score(errors + 1, expected_location) > current_threshold {
            break;
        }
        last_bit_arr = bit_arr;
    }

    let indices = mask_to_indices(&match_mask, options.min_match_char_length);
    MatchResult {
        is_match: best_location.is_some() && !indices.is_empty(),
        score: f64::max(MIN_MATCH_SCORE, final_score),
        indices,
    }
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.is_empty() || from + pattern.len() > text.len() {
        return None;
    }
    text[from..]
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|offset| from + offset)
}

/// Collapse a per-character match mask into inclusive runs of at least `min_len`.
pub fn mask_to_indices(mask: &[bool], min_len: usize) -> Vec<(usize, usize)> {
    let mut indices = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &matched) in mask.iter().enumerate() {
        match (matched, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= min_len {
                    indices.push((s, i - 1));
                }
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        if mask.len() - s >= min_len {
            indices.push((s, mask.len() - 1));
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(p: &str) -> BitapPattern {
        BitapPattern::new(p, &MatchOptions::default())
    }

    #[test]
    fn test_identical_text_scores_zero() {
        let result = pattern("pancakes").search("pancakes");
        assert!(result.is_match);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.indices, vec![(0, 7)]);
    }

    #[test]
    fn test_substring_scores_floor() {
        let result = pattern("chocolate").search("chocolate chip cookies");
        assert!(result.is_match);
        assert_eq!(result.score, MIN_MATCH_SCORE);
    }

    #[test]
    fn test_match_anywhere_when_location_ignored() {
        let text = format!("{}chocolate", "x".repeat(500));
        let result = pattern("chocolate").search(&text);
        assert!(result.is_match);
        assert_eq!(result.score, MIN_MATCH_SCORE);
    }

    #[test]
    fn test_one_typo() {
        let result = pattern("choclate").search("dark chocolate tart");
        assert!(result.is_match);
        assert!((result.score - 1.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_many_errors() {
        let result = pattern("chocolate").search("vanilla sponge");
        assert!(!result.is_match);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_pattern_is_lowercased() {
        assert!(pattern("GARLIC").search("roasted garlic").is_match);
    }

    #[test]
    fn test_single_char_runs_do_not_count() {
        let options = MatchOptions {
            threshold: 1.0,
            ..MatchOptions::default()
        };
        let result = BitapPattern::new("zq", &options).search("z q");
        assert!(!result.is_match);
    }

    #[test]
    fn test_location_penalty_when_enabled() {
        let options = MatchOptions {
            ignore_location: false,
            distance: 10,
            ..MatchOptions::default()
        };
        let near = BitapPattern::new("soup", &options).search("soup of the day");
        let far = BitapPattern::new("soup", &options).search("the best of all the soup");
        assert!(near.is_match);
        assert!(!far.is_match);
    }

    #[test]
    fn test_long_pattern_is_chunked() {
        let long = "slow cooked pulled pork shoulder with apple cider";
        assert!(long.chars().count() > MAX_PATTERN_BITS);
        let compiled = pattern(long);
        assert_eq!(compiled.chunks.len(), 2);
        let result = compiled.search(&format!("{} and slaw", long));
        assert!(result.is_match);
        assert_eq!(result.score, MIN_MATCH_SCORE);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(!pattern("").search("anything").is_match);
        assert!(!pattern("soup").search("").is_match);
    }

    #[test]
    fn test_mask_to_indices() {
        let mask = [true, true, false, true, false, true, true, true];
        assert_eq!(mask_to_indices(&mask, 2), vec![(0, 1), (5, 7)]);
        assert_eq!(mask_to_indices(&mask, 1), vec![(0, 1), (3, 3), (5, 7)]);
    }
}
