//! Binary classification metrics over a 2x2 confusion matrix.
//!
//! Sensitivity, specificity, and the prevalence-adjusted predictive values
//! (PPV, NPV). Divisions over zero trials yield `f64::NAN` rather than an
//! error, and NaN propagates through the predictive-value formulas.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::confusion::ConfusionMatrix;
use crate::error::{Error, Result};

/// Which level of a two-level alphabet counts as the positive (event) class
/// when none is named explicitly.
///
/// Replaces the event-first session flag of classical stats packages with a
/// value threaded through each call; the default matches the common
/// convention that the first level is the event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLevel {
    /// The first level of the alphabet is the positive class (the default).
    #[default]
    First,
    /// The second level of the alphabet is the positive class.
    Second,
}

/// Evaluator for binary metrics, with positive/negative roles resolved once.
#[derive(Clone, Debug)]
pub struct BinaryEval<'a, L> {
    matrix: &'a ConfusionMatrix<L>,
    positive: usize,
    negative: usize,
}

impl<'a, L: Clone + Eq + Hash + fmt::Debug> BinaryEval<'a, L> {
    /// Resolve the positive class from the level order convention.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotBinary`] unless the matrix is exactly 2x2.
    pub fn new(matrix: &'a ConfusionMatrix<L>, event: EventLevel) -> Result<Self> {
        Self::check_binary(matrix)?;
        let positive = match event {
            EventLevel::First => 0,
            EventLevel::Second => 1,
        };
        Ok(Self { matrix, positive, negative: 1 - positive })
    }

    /// Resolve the positive class by explicit level, overriding any
    /// convention.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotBinary`] for non-2x2 matrices and with
    /// [`Error::UnknownLevel`] when `positive` is not among the matrix
    /// levels.
    pub fn with_positive(matrix: &'a ConfusionMatrix<L>, positive: &L) -> Result<Self> {
        Self::check_binary(matrix)?;
        let positive = matrix
            .index_of(positive)
            .ok_or_else(|| Error::UnknownLevel { level: format!("{positive:?}") })?;
        Ok(Self { matrix, positive, negative: 1 - positive })
    }

    fn check_binary(matrix: &ConfusionMatrix<L>) -> Result<()> {
        if matrix.n_levels() != 2 {
            return Err(Error::NotBinary(matrix.n_levels()));
        }
        Ok(())
    }

    /// The level playing the positive (event) role.
    pub fn positive_level(&self) -> &L {
        &self.matrix.levels()[self.positive]
    }

    /// The level playing the negative (non-event) role.
    pub fn negative_level(&self) -> &L {
        &self.matrix.levels()[self.negative]
    }

    /// True positive rate: correct positive calls over actual positives.
    ///
    /// NaN when no actual positives exist.
    pub fn sensitivity(&self) -> f64 {
        let tp = self.matrix.count(self.positive, self.positive) as f64;
        tp / self.matrix.truth_total(self.positive) as f64
    }

    /// True negative rate: correct negative calls over actual negatives.
    ///
    /// NaN when no actual negatives exist.
    pub fn specificity(&self) -> f64 {
        let tn = self.matrix.count(self.negative, self.negative) as f64;
        tn / self.matrix.truth_total(self.negative) as f64
    }

    /// Empirical prevalence: actual positives over total observations.
    pub fn prevalence(&self) -> f64 {
        self.matrix.truth_total(self.positive) as f64 / self.matrix.total() as f64
    }

    /// Positive predictive value under the given prevalence, or under the
    /// empirical prevalence when `None`.
    ///
    /// NaN sensitivity or specificity propagates into the result.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidPrevalence`] when an explicit prevalence
    /// falls outside (0, 1).
    pub fn ppv(&self, prevalence: Option<f64>) -> Result<f64> {
        let p = self.resolve_prevalence(prevalence)?;
        let sens = self.sensitivity();
        let spec = self.specificity();
        Ok((sens * p) / (sens * p + (1.0 - spec) * (1.0 - p)))
    }

    /// Negative predictive value under the given prevalence, or under the
    /// empirical prevalence when `None`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidPrevalence`] when an explicit prevalence
    /// falls outside (0, 1).
    pub fn npv(&self, prevalence: Option<f64>) -> Result<f64> {
        let p = self.resolve_prevalence(prevalence)?;
        let sens = self.sensitivity();
        let spec = self.specificity();
        Ok((spec * (1.0 - p)) / ((1.0 - sens) * p + spec * (1.0 - p)))
    }

    fn resolve_prevalence(&self, prevalence: Option<f64>) -> Result<f64> {
        match prevalence {
            Some(p) if p <= 0.0 || p >= 1.0 || p.is_nan() => Err(Error::InvalidPrevalence(p)),
            Some(p) => Ok(p),
            None => Ok(self.prevalence()),
        }
    }
}

/// Sensitivity with the positive class taken from the level convention.
pub fn sensitivity<L: Clone + Eq + Hash + fmt::Debug>(
    matrix: &ConfusionMatrix<L>,
    event: EventLevel,
) -> Result<f64> {
    Ok(BinaryEval::new(matrix, event)?.sensitivity())
}

/// Specificity with the positive class taken from the level convention.
pub fn specificity<L: Clone + Eq + Hash + fmt::Debug>(
    matrix: &ConfusionMatrix<L>,
    event: EventLevel,
) -> Result<f64> {
    Ok(BinaryEval::new(matrix, event)?.specificity())
}

/// Positive predictive value with the positive class taken from the level
/// convention; `prevalence` overrides the empirical estimate.
pub fn ppv<L: Clone + Eq + Hash + fmt::Debug>(
    matrix: &ConfusionMatrix<L>,
    event: EventLevel,
    prevalence: Option<f64>,
) -> Result<f64> {
    BinaryEval::new(matrix, event)?.ppv(prevalence)
}

/// Negative predictive value with the positive class taken from the level
/// convention; `prevalence` overrides the empirical estimate.
pub fn npv<L: Clone + Eq + Hash + fmt::Debug>(
    matrix: &ConfusionMatrix<L>,
    event: EventLevel,
    prevalence: Option<f64>,
) -> Result<f64> {
    BinaryEval::new(matrix, event)?.npv(prevalence)
}

/// All four binary metrics plus the prevalence they were computed under.
///
/// Undefined entries are NaN; serialization preserves them as JSON `null`
/// only with serializers that support it, so consumers should check
/// `is_nan` before formatting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryMetrics {
    pub sensitivity: f64,
    pub specificity: f64,
    pub ppv: f64,
    pub npv: f64,
    pub prevalence: f64,
}

impl BinaryMetrics {
    /// Compute every metric from a 2x2 matrix under the level convention.
    ///
    /// `prevalence` overrides the empirical estimate for the predictive
    /// values; the reported `prevalence` field is whichever was used.
    pub fn from_matrix<L: Clone + Eq + Hash + fmt::Debug>(
        matrix: &ConfusionMatrix<L>,
        event: EventLevel,
        prevalence: Option<f64>,
    ) -> Result<Self> {
        let eval = BinaryEval::new(matrix, event)?;
        Ok(Self {
            sensitivity: eval.sensitivity(),
            specificity: eval.specificity(),
            ppv: eval.ppv(prevalence)?,
            npv: eval.npv(prevalence)?,
            prevalence: eval.resolve_prevalence(prevalence)?,
        })
    }
}

impl fmt::Display for BinaryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |v: f64| {
            if v.is_nan() {
                "        NA".to_string()
            } else {
                format!("{v:>10.4}")
            }
        };
        writeln!(
            f,
            "{:>12} {:>12} {:>10} {:>10} {:>10}",
            "sensitivity", "specificity", "ppv", "npv", "prevalence"
        )?;
        writeln!(
            f,
            "{:>12} {:>12} {} {} {}",
            cell(self.sensitivity),
            cell(self.specificity),
            cell(self.ppv),
            cell(self.npv),
            cell(self.prevalence)
        )
    }
}
