use std::{
    ops::Range,
    sync::OnceLock,
};

use regex::Regex;

fn sentence_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"[.!?]\s+").expect("sentence boundary regex is valid"))
}

/// Splits text at `.`, `!` or `?` followed by whitespace.
///
/// Terminal punctuation stays with its sentence and blank pieces are dropped, so the returned
/// indices are contiguous and match what narration highlights.
pub fn split_sentences(text: &str) -> Vec<String> {
    sentence_ranges(text).into_iter().map(|range| text[range].to_string()).collect()
}

/// Byte ranges of the trimmed sentences of `text`, in order.
pub fn sentence_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for boundary in sentence_boundary().find_iter(text) {
        // Every boundary starts with a single-byte ASCII punctuation mark.
        let end = boundary.start() + 1;
        push_trimmed(&mut ranges, text, start..end);
        start = boundary.end();
    }
    push_trimmed(&mut ranges, text, start..text.len());

    ranges
}

fn push_trimmed(ranges: &mut Vec<Range<usize>>, text: &str, piece: Range<usize>) {
    let raw = &text[piece.clone()];
    let trimmed_start = raw.trim_start();
    let trimmed = trimmed_start.trim_end();
    if trimmed.is_empty() {
        return;
    }
    let start = piece.start + (raw.len() - trimmed_start.len());
    ranges.push(start..start + trimmed.len());
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = split_sentences("Hi. Bob ran! Did he stop? Yes.");
        assert_eq!(sentences, vec!["Hi.", "Bob ran!", "Did he stop?", "Yes."]);
    }

    #[test]
    fn no_punctuation_is_one_sentence() {
        assert_eq!(split_sentences("  just one line here  "), vec!["just one line here"]);
    }

    #[test]
    fn punctuation_without_whitespace_does_not_split() {
        assert_eq!(split_sentences("Version 2.5 is out.Really"), vec!["Version 2.5 is out.Really"]);
    }

    #[test]
    fn newlines_and_runs_of_whitespace_are_boundaries() {
        let sentences = split_sentences("First line.\n\nSecond line!\tThird?");
        assert_eq!(sentences, vec!["First line.", "Second line!", "Third?"]);
    }

    #[test]
    fn ranges_point_at_trimmed_sentences() {
        let text = "  One.  Two!\nThree";
        let ranges = sentence_ranges(text);
        let pieces: Vec<&str> = ranges.iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(pieces, vec!["One.", "Two!", "Three"]);
        assert_eq!(ranges[0], 2..6);
    }

    #[test]
    fn blank_input_has_no_sentences() {
        assert!(split_sentences("   \n ").is_empty());
        assert!(is_blank(" \t"));
        assert!(!is_blank(" a "));
    }
}
