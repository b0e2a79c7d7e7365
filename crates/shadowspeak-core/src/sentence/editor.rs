//! Merge, split and text editing over a unit sequence.
//!
//! Every operation either applies completely or leaves the sequence untouched
//! and returns `false`. None of them raise an error: an out-of-range index or
//! an atomic unit is simply not editable. All of them keep the partition
//! property checked by [`super::is_partition`].

use super::model::SentenceUnit;
use super::segmenter::punctuation_parts_with_tail;

/// Combines the unit at `index` with the unit after it.
///
/// The merged text joins both texts with a single space and the original
/// indices are concatenated in order. The merged id is derived from the
/// covered indices, so merging the same pair twice yields the same identity.
pub fn merge(units: &mut Vec<SentenceUnit>, index: usize) -> bool {
    if index + 1 >= units.len() {
        tracing::debug!(index, len = units.len(), "merge ignored: no following unit");
        return false;
    }

    let next = units.remove(index + 1);
    let current = &mut units[index];
    current.text = format!("{} {}", current.text, next.text);
    current.original_indices.extend(next.original_indices);
    current.id = SentenceUnit::id_for(&current.original_indices);
    true
}

/// Reverses a previous merge on the unit at `index`.
///
/// The unit's text is re-segmented with the punctuation rule and the pieces
/// are matched positionally against the unit's original indices. When the
/// counts agree every piece becomes a unit with a single original index, which
/// is the exact inverse of the merges that built the unit.
///
/// When the text was edited after merging, the counts can disagree:
///
/// - fewer pieces than indices: the last piece keeps all remaining indices and
///   stays a merged unit;
/// - more pieces than indices: surplus trailing pieces are joined onto the
///   last one.
///
/// Either way no index is dropped or repeated and no text is lost. A unit that
/// re-segments into a single piece is left as it is.
pub fn split(units: &mut Vec<SentenceUnit>, index: usize) -> bool {
    let Some(unit) = units.get(index) else {
        tracing::debug!(index, len = units.len(), "split ignored: index out of range");
        return false;
    };
    if !unit.is_merged() {
        tracing::debug!(index, "split ignored: unit is not merged");
        return false;
    }

    let parts = punctuation_parts_with_tail(&unit.text);
    if parts.len() < 2 {
        tracing::debug!(index, "split ignored: text does not re-segment");
        return false;
    }
    if parts.len() != unit.original_indices.len() {
        tracing::warn!(
            index,
            parts = parts.len(),
            merged = unit.original_indices.len(),
            "split text no longer matches merged sentence count; renormalising"
        );
    }

    let pieces = renormalize(parts, &unit.original_indices);
    let replacement: Vec<SentenceUnit> = pieces
        .into_iter()
        .map(|(text, original_indices)| SentenceUnit {
            id: SentenceUnit::id_for(&original_indices),
            text,
            original_indices,
        })
        .collect();

    units.splice(index..=index, replacement);
    true
}

/// Replaces the text of the unit at `index`.
///
/// Blank input, unchanged text and out-of-range indices are ignored. The
/// unit's id and original indices are kept, so a merged unit whose text was
/// edited can still be split.
pub fn edit_text(units: &mut [SentenceUnit], index: usize, text: &str) -> bool {
    let trimmed = text.trim();
    match units.get_mut(index) {
        Some(unit) if !trimmed.is_empty() && unit.text != trimmed => {
            unit.text = trimmed.to_string();
            true
        }
        _ => false,
    }
}

/// Pairs pieces with original indices, keeping both fully covered.
fn renormalize(mut parts: Vec<String>, indices: &[usize]) -> Vec<(String, Vec<usize>)> {
    let count = parts.len().min(indices.len());
    let tail_text = parts.split_off(count - 1).join(" ");

    let mut pieces: Vec<(String, Vec<usize>)> = parts
        .into_iter()
        .zip(indices.iter())
        .map(|(text, &index)| (text, vec![index]))
        .collect();
    pieces.push((tail_text, indices[count - 1..].to_vec()));
    pieces
}

/// A draft copy of a session's units for an editing sheet.
///
/// Edits apply to the draft only; [`SentenceEditor::apply`] hands back the
/// edited sequence and dropping the editor discards it.
#[derive(Debug, Clone)]
pub struct SentenceEditor {
    items: Vec<SentenceUnit>,
}

impl SentenceEditor {
    /// Starts a draft from a copy of `units`.
    pub fn new(units: &[SentenceUnit]) -> Self {
        Self {
            items: units.to_vec(),
        }
    }

    /// The current draft sequence.
    pub fn items(&self) -> &[SentenceUnit] {
        &self.items
    }

    pub fn merge(&mut self, index: usize) -> bool {
        merge(&mut self.items, index)
    }

    pub fn split(&mut self, index: usize) -> bool {
        split(&mut self.items, index)
    }

    pub fn edit_text(&mut self, index: usize, text: &str) -> bool {
        edit_text(&mut self.items, index, text)
    }

    /// Finishes editing and returns the draft.
    pub fn apply(self) -> Vec<SentenceUnit> {
        self.items
    }
}
