//! Sentence unit domain model.

use serde::{Deserialize, Serialize};

/// One editable chunk of practice text.
///
/// A unit produced by the segmenter stands for exactly one original sentence.
/// After merging it may stand for several; `original_indices` records which
/// positions of the initial segmentation it currently covers so that a merge
/// can later be reversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceUnit {
    /// Identifier, unique within a session
    pub id: String,
    /// Trimmed, non-empty sentence text
    pub text: String,
    /// Positions in the original segmentation (non-empty, ascending)
    pub original_indices: Vec<usize>,
}

impl SentenceUnit {
    /// Creates the unit for original sentence `index`.
    pub fn original(index: usize, text: impl Into<String>) -> Self {
        Self {
            id: Self::id_for(&[index]),
            text: text.into(),
            original_indices: vec![index],
        }
    }

    /// The id of a unit covering `indices`.
    ///
    /// `sentence-{i}` for a single sentence, `sentence-{first}-{last}` for a
    /// merged run. Within a partition the runs are disjoint, so ids stay
    /// unique, and splitting a run back apart restores the original ids.
    pub fn id_for(indices: &[usize]) -> String {
        match indices {
            [] => "sentence".to_string(),
            [only] => format!("sentence-{only}"),
            [first, .., last] => format!("sentence-{first}-{last}"),
        }
    }

    /// Returns true when this unit stands for more than one original sentence.
    pub fn is_merged(&self) -> bool {
        self.original_indices.len() > 1
    }

    /// The smallest original index this unit covers.
    pub fn first_index(&self) -> Option<usize> {
        self.original_indices.first().copied()
    }
}

/// Checks the partition property over a unit sequence.
///
/// The concatenated `original_indices` of all units, in order, must be exactly
/// `0..n` with every index present once. Ascending concatenation also implies
/// that units are ordered by their smallest index.
pub fn is_partition(units: &[SentenceUnit]) -> bool {
    let mut expected = 0usize;
    for unit in units {
        if unit.original_indices.is_empty() {
            return false;
        }
        for &index in &unit.original_indices {
            if index != expected {
                return false;
            }
            expected += 1;
        }
    }
    true
}

/// Renumbers units that do not form a partition.
///
/// Each unit keeps as many indices as it had (at least one) but they are
/// reassigned consecutively from zero, and ids are rebuilt from them. Returns
/// false, touching nothing, when `units` already is a partition.
pub fn repair_partition(units: &mut [SentenceUnit]) -> bool {
    if is_partition(units) {
        return false;
    }

    let mut next = 0;
    for unit in units.iter_mut() {
        let count = unit.original_indices.len().max(1);
        unit.original_indices = (next..next + count).collect();
        unit.id = SentenceUnit::id_for(&unit.original_indices);
        next += count;
    }
    true
}

/// Projects units onto their plain text, for presentation surfaces.
pub fn texts(units: &[SentenceUnit]) -> Vec<String> {
    units.iter().map(|unit| unit.text.clone()).collect()
}
