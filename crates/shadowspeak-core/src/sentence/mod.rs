//! Sentence domain module.
//!
//! # Module Structure
//!
//! - `model`: The `SentenceUnit` entity and the partition check
//! - `segmenter`: Raw text to units
//! - `editor`: Merge, split and text edits, plus the draft `SentenceEditor`

mod editor;
mod model;
mod segmenter;

pub use editor::{SentenceEditor, edit_text, merge, split};
pub use model::{SentenceUnit, is_partition, repair_partition, texts};
pub use segmenter::{SENTENCE_PATTERN, punctuation_parts, segment, split_sentences};
