//! Punctuation-based sentence segmentation.
//!
//! Segmentation is a heuristic, not an NLP sentence splitter: a sentence is any
//! run of text ending in one or more of `.`, `!` or `?`. Abbreviations,
//! decimals and quotations are not disambiguated.
//!
//! Rules, in order of precedence:
//!
//! 1. every run matching [`SENTENCE_PATTERN`], trimmed, empty runs dropped;
//! 2. otherwise the input split on line breaks, trimmed, empty pieces dropped;
//! 3. otherwise the whole trimmed input, if it is not blank;
//! 4. otherwise nothing.

use super::model::SentenceUnit;
use once_cell::sync::Lazy;
use regex::Regex;

/// A run of non-terminators followed by one or more terminators.
pub const SENTENCE_PATTERN: &str = r"[^.!?]+[.!?]+";

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(SENTENCE_PATTERN).expect("sentence pattern is valid"));

static LINE_BREAKS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n+").expect("line break pattern is valid"));

/// Segments raw text into sentence units.
///
/// Unit `i` carries `original_indices == [i]` and the id `sentence-{i}`. The
/// result is empty only for blank input.
///
/// # Examples
///
/// ```
/// use shadowspeak_core::sentence::segment;
///
/// let units = segment("Hello there. How are you?");
/// assert_eq!(units.len(), 2);
/// assert_eq!(units[1].text, "How are you?");
/// assert_eq!(units[1].original_indices, vec![1]);
/// ```
pub fn segment(text: &str) -> Vec<SentenceUnit> {
    split_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(index, sentence)| SentenceUnit::original(index, sentence))
        .collect()
}

/// Applies the segmentation rules and returns the sentence texts.
pub fn split_sentences(text: &str) -> Vec<String> {
    let sentences = punctuation_parts(text);
    if !sentences.is_empty() {
        return sentences;
    }

    let lines: Vec<String> = LINE_BREAKS_RE
        .split(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if !lines.is_empty() {
        return lines;
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    }
}

/// Rule 1 on its own: the trimmed, non-empty punctuation-terminated runs.
///
/// Text after the last terminator is not part of any run and is not returned.
pub fn punctuation_parts(text: &str) -> Vec<String> {
    SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`punctuation_parts`], but keeps unterminated trailing text as a final
/// part. Used when splitting a unit back apart, where dropping the tail would
/// lose text the learner typed.
pub(crate) fn punctuation_parts_with_tail(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut consumed = 0;
    for m in SENTENCE_RE.find_iter(text) {
        let part = m.as_str().trim();
        if !part.is_empty() {
            parts.push(part.to_string());
        }
        consumed = m.end();
    }

    if !parts.is_empty() {
        let tail = text[consumed..].trim();
        if !tail.is_empty() {
            parts.push(tail.to_string());
        }
    }
    parts
}
