use ndarray::{Array1, ArrayView1};

use crate::error::{FitErr, Result};

/// A paired one-feature dataset, immutable once built.
///
/// A constructed `Dataset` always has equal-length, non-empty, finite `xs` and `ys`.
#[derive(Debug, Clone)]
pub struct Dataset {
    xs: Array1<f64>,
    ys: Array1<f64>,
}

impl Dataset {
    /// Returns a new `Dataset`.
    ///
    /// # Arguments
    /// * `xs` - The inputs.
    /// * `ys` - The expected outputs, one per input.
    ///
    /// # Errors
    /// * `SizeMismatch` if the lengths differ.
    /// * `EmptyDataset` if there are no samples.
    /// * `NonFiniteSample` if any value is NaN or infinite.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(FitErr::SizeMismatch {
                a: "ys",
                b: "xs",
                got: ys.len(),
                expected: xs.len(),
            });
        }

        if xs.is_empty() {
            return Err(FitErr::EmptyDataset);
        }

        check_finite("xs", &xs)?;
        check_finite("ys", &ys)?;

        Ok(Self {
            xs: Array1::from(xs),
            ys: Array1::from(ys),
        })
    }

    /// Same as `new`, copying the samples out of borrowed slices.
    pub fn from_slices(xs: &[f64], ys: &[f64]) -> Result<Self> {
        Self::new(xs.to_vec(), ys.to_vec())
    }

    /// The amount of samples.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> ArrayView1<'_, f64> {
        self.xs.view()
    }

    pub fn ys(&self) -> ArrayView1<'_, f64> {
        self.ys.view()
    }
}

fn check_finite(which: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(FitErr::NonFiniteSample { which, index }),
        None => Ok(()),
    }
}
