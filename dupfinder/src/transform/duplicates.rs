//! Duplicate extraction over normalized values.
//!
//! Every occurrence of a repeated value is kept, the first one included.
//! Nulls never match each other.

use std::collections::HashMap;

use crate::models::NormalizedValue;

/// Records sharing one normalized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub value: String,
    /// Record positions, ascending.
    pub rows: Vec<usize>,
}

/// Result of duplicate extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Duplicates {
    /// Groups in order of their first occurrence.
    pub groups: Vec<DuplicateGroup>,
    /// Positions of every record in any group, ascending.
    pub rows: Vec<usize>,
}

impl Duplicates {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Find all records whose non-null value occurs at least twice.
pub fn find_duplicates(values: &[NormalizedValue]) -> Duplicates {
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for (row, value) in values.iter().enumerate() {
        let Some(value) = value.as_deref() else {
            continue;
        };
        positions
            .entry(value)
            .or_insert_with(|| {
                order.push(value);
                Vec::new()
            })
            .push(row);
    }

    let groups: Vec<DuplicateGroup> = order
        .into_iter()
        .filter_map(|value| {
            let rows = positions.remove(value)?;
            (rows.len() >= 2).then(|| DuplicateGroup {
                value: value.to_string(),
                rows,
            })
        })
        .collect();

    let mut rows: Vec<usize> = groups.iter().flat_map(|g| g.rows.iter().copied()).collect();
    rows.sort_unstable();

    Duplicates { groups, rows }
}
