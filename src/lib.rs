//! Binary classification performance metrics
//!
//! Provides the two-class evaluation primitives used in diagnostic-test
//! style analysis:
//! - Confusion matrix construction over a fixed level alphabet
//! - Sensitivity (true positive rate) and specificity (true negative rate)
//! - Prevalence-adjusted positive/negative predictive values
//! - Two-column extraction from a small categorical frame
//!
//! Rates over zero trials return `f64::NAN` rather than an error: the
//! undefined value is a legitimate domain outcome and propagates silently
//! through the predictive-value formulas.
//!
//! ## Example
//!
//! ```ignore
//! use evaluar::{BinaryEval, ConfusionMatrix, EventLevel};
//!
//! let levels = ["Yes", "No"];
//! let truth = ["Yes", "Yes", "No", "No", "No"];
//! let estimate = ["Yes", "No", "No", "No", "Yes"];
//!
//! let cm = ConfusionMatrix::from_labels(&truth, &estimate, &levels)?;
//! let eval = BinaryEval::new(&cm, EventLevel::First)?;
//! println!("sensitivity = {:.3}", eval.sensitivity()); // 0.500
//! println!("specificity = {:.3}", eval.specificity()); // 0.667
//! ```

mod binary;
mod confusion;
mod error;
mod frame;


pub use binary::{npv, ppv, sensitivity, specificity, BinaryEval, BinaryMetrics, EventLevel};
pub use confusion::{ConfusionMatrix, NaPolicy};
pub use error::{Error, Result};
pub use frame::{confusion_from_columns, Frame};
