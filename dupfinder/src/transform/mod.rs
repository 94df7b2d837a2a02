//! Transformation module.
//!
//! - Normalize: Column classification and whitespace trimming
//! - Duplicates: Records sharing a normalized value
//! - Pipeline: The end-to-end run

pub mod duplicates;
pub mod normalize;
pub mod pipeline;

pub use duplicates::{find_duplicates, DuplicateGroup, Duplicates};
pub use normalize::{classify_column, normalize_cell, normalize_column, ColumnKind, NormalizedColumn, NumericKind};
pub use pipeline::*;
