//! Named categorical columns and two-column confusion-matrix extraction.
//!
//! A [`Frame`] is the thinnest useful stand-in for a data frame: ordered,
//! named columns of optional string labels with a shared row count. The
//! extraction helper pulls a truth column and an estimate column out by
//! name and hands them to the matrix builder.

use serde::{Deserialize, Serialize};

use crate::confusion::{ConfusionMatrix, NaPolicy};
use crate::error::{Error, Result};

/// Ordered collection of equal-length categorical columns.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<(String, Vec<Option<String>>)>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ColumnLengthMismatch`] when `values` disagrees
    /// with the existing row count.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<String>>,
    ) -> Result<()> {
        let name = name.into();
        if let Some(expected) = self.n_rows() {
            if values.len() != expected {
                return Err(Error::ColumnLengthMismatch { name, len: values.len(), expected });
            }
        }
        self.columns.push((name, values));
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&[Option<String>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Row count, or `None` for a frame with no columns yet.
    pub fn n_rows(&self) -> Option<usize> {
        self.columns.first().map(|(_, values)| values.len())
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }
}

/// Build a confusion matrix from two named columns of a frame.
///
/// When `levels` is `None` the alphabet is inferred as the sorted set of
/// distinct non-missing values across both columns, which makes the
/// event-first ordering deterministic.
///
/// # Errors
///
/// Fails when either column name is unknown, when fewer than two distinct
/// levels can be determined, or with any builder error from
/// [`ConfusionMatrix::from_optional`].
pub fn confusion_from_columns(
    frame: &Frame,
    truth_col: &str,
    estimate_col: &str,
    levels: Option<&[String]>,
    na: NaPolicy,
) -> Result<ConfusionMatrix<String>> {
    let truth = frame
        .column(truth_col)
        .ok_or_else(|| Error::ColumnNotFound { name: truth_col.to_string() })?;
    let estimate = frame
        .column(estimate_col)
        .ok_or_else(|| Error::ColumnNotFound { name: estimate_col.to_string() })?;

    match levels {
        Some(levels) => ConfusionMatrix::from_optional(truth, estimate, levels, na),
        None => {
            let inferred = infer_levels(truth, estimate);
            ConfusionMatrix::from_optional(truth, estimate, &inferred, na)
        }
    }
}

fn infer_levels(truth: &[Option<String>], estimate: &[Option<String>]) -> Vec<String> {
    let mut levels: Vec<String> = truth
        .iter()
        .chain(estimate.iter())
        .filter_map(|v| v.clone())
        .collect();
    levels.sort();
    levels.dedup();
    levels
}
