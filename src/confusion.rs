//! Confusion matrix construction over a fixed level alphabet.
//!
//! Element `[i][j]` counts observations **predicted** as level `i` whose
//! **true** level is `j`. Rows are predictions, columns are ground truth.
//! Every level of the alphabet is materialized on both axes, including
//! levels with zero observations, so downstream indexing never shifts.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How missing values in paired observation sequences are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NaPolicy {
    /// Drop a pair when either side is missing (the default).
    #[default]
    Strip,
    /// Fail immediately on the first missing value.
    Fail,
}

/// Square contingency table of counts indexed by (predicted, truth).
///
/// Built once from paired label sequences or a caller-supplied count table;
/// immutable thereafter. The level order is fixed at construction and
/// defines the event-first convention used by the binary evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix<L> {
    /// `counts[predicted][truth]`
    counts: Vec<Vec<usize>>,
    /// Ordered level alphabet shared by both axes.
    levels: Vec<L>,
}

impl<L: Clone + Eq + Hash + fmt::Debug> ConfusionMatrix<L> {
    /// Build from truth/estimate sequences with no missing-value encoding.
    ///
    /// # Errors
    ///
    /// Fails when the sequences differ in length, are empty, when `levels`
    /// has fewer than two distinct entries, or when an observed label is
    /// outside `levels`.
    pub fn from_labels(truth: &[L], estimate: &[L], levels: &[L]) -> Result<Self> {
        let pairs = truth.iter().zip(estimate.iter()).map(|(t, e)| (Some(t), Some(e)));
        Self::build(pairs, truth.len(), estimate.len(), levels, NaPolicy::Strip)
    }

    /// Build from truth/estimate sequences that may contain missing values.
    ///
    /// Under [`NaPolicy::Strip`] a pair is dropped when either side is
    /// `None`; under [`NaPolicy::Fail`] the first missing value aborts the
    /// build with [`Error::MissingValue`].
    pub fn from_optional(
        truth: &[Option<L>],
        estimate: &[Option<L>],
        levels: &[L],
        na: NaPolicy,
    ) -> Result<Self> {
        let pairs = truth
            .iter()
            .zip(estimate.iter())
            .map(|(t, e)| (t.as_ref(), e.as_ref()));
        Self::build(pairs, truth.len(), estimate.len(), levels, na)
    }

    /// Wrap a caller-supplied count table.
    ///
    /// # Errors
    ///
    /// Fails when the table is not `levels.len()` square, when `levels` has
    /// duplicates, or when it has fewer than two entries.
    pub fn from_counts(counts: Vec<Vec<usize>>, levels: Vec<L>) -> Result<Self> {
        Self::check_levels(&levels)?;
        let n = levels.len();
        if counts.len() != n || counts.iter().any(|row| row.len() != n) {
            return Err(Error::MalformedTable {
                expected: n,
                rows: counts.len(),
                widths: counts.iter().map(Vec::len).collect(),
            });
        }
        Ok(Self { counts, levels })
    }

    fn build<'a, I>(
        pairs: I,
        truth_len: usize,
        estimate_len: usize,
        levels: &[L],
        na: NaPolicy,
    ) -> Result<Self>
    where
        L: 'a,
        I: Iterator<Item = (Option<&'a L>, Option<&'a L>)>,
    {
        if truth_len != estimate_len {
            return Err(Error::LengthMismatch { truth: truth_len, estimate: estimate_len });
        }
        Self::check_levels(levels)?;

        let index: HashMap<&L, usize> =
            levels.iter().enumerate().map(|(i, l)| (l, i)).collect();
        let lookup = |label: &L, i: usize| -> Result<usize> {
            index.get(label).copied().ok_or_else(|| Error::UnknownLabel {
                label: format!("{label:?}"),
                index: i,
            })
        };

        let n = levels.len();
        let mut counts = vec![vec![0usize; n]; n];
        let mut kept = 0usize;

        for (i, (t, e)) in pairs.enumerate() {
            match (t, e) {
                (Some(t), Some(e)) => {
                    counts[lookup(e, i)?][lookup(t, i)?] += 1;
                    kept += 1;
                }
                _ if na == NaPolicy::Fail => return Err(Error::MissingValue { index: i }),
                _ => {}
            }
        }

        if kept == 0 {
            return Err(Error::EmptyData);
        }
        Ok(Self { counts, levels: levels.to_vec() })
    }

    fn check_levels(levels: &[L]) -> Result<()> {
        if levels.len() < 2 {
            return Err(Error::TooFewLevels(levels.len()));
        }
        let mut seen = HashMap::with_capacity(levels.len());
        for level in levels {
            if seen.insert(level, ()).is_some() {
                return Err(Error::DuplicateLevel { level: format!("{level:?}") });
            }
        }
        Ok(())
    }

    /// Ordered level alphabet.
    pub fn levels(&self) -> &[L] {
        &self.levels
    }

    /// Number of levels (the table is `n_levels` square).
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    /// Position of a level in the alphabet, if present.
    pub fn index_of(&self, level: &L) -> Option<usize> {
        self.levels.iter().position(|l| l == level)
    }

    /// Count at (predicted index, truth index).
    pub fn count(&self, predicted: usize, truth: usize) -> usize {
        self.counts[predicted][truth]
    }

    /// The raw count table, `counts[predicted][truth]`.
    pub fn counts(&self) -> &Vec<Vec<usize>> {
        &self.counts
    }

    /// Total observation count (sum over all cells).
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Column sum: observations whose true level is `truth`.
    pub fn truth_total(&self, truth: usize) -> usize {
        self.counts.iter().map(|row| row[truth]).sum()
    }

    /// Row sum: observations predicted as `predicted`.
    pub fn predicted_total(&self, predicted: usize) -> usize {
        self.counts[predicted].iter().sum()
    }
}

impl<L: fmt::Debug> fmt::Display for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix (rows = predicted, columns = truth):")?;

        write!(f, "{:>12}", "")?;
        for level in &self.levels {
            write!(f, " {:>10}", format!("True {level:?}"))?;
        }
        writeln!(f)?;

        for (i, level) in self.levels.iter().enumerate() {
            write!(f, "{:>12}", format!("Pred {level:?}"))?;
            for count in &self.counts[i] {
                write!(f, " {count:>10}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
