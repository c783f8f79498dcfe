use colored::Colorize;

use std::fmt;

use crate::error::{EnsembleError, Result};

const CELL_WIDTH: usize = 8;


/// Counts of `(actual, predicted)` label pairs.
///
/// Rows are actual labels and columns are predicted labels,
/// both in the order of `classes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    classes: Vec<i64>,
    counts: Vec<Vec<usize>>,
}


impl ConfusionMatrix {
    /// Build the matrix from ground truth and predictions.
    ///
    /// Fails with `InvalidInput` if the two slices differ in length,
    /// or a label is not in `classes`.
    pub fn new(classes: &[i64], truth: &[i64], predicted: &[i64])
        -> Result<Self>
    {
        if truth.len() != predicted.len() {
            return Err(EnsembleError::InvalidInput(format!(
                "got {} true labels but {} predictions",
                truth.len(),
                predicted.len(),
            )));
        }

        let mut classes = classes.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let n_classes = classes.len();
        let mut counts = vec![vec![0_usize; n_classes]; n_classes];

        let position = |y: i64| {
            classes.binary_search(&y)
                .map_err(|_| EnsembleError::InvalidInput(format!(
                    "label {y} is not in {classes:?}"
                )))
        };
        for (&y, &p) in truth.iter().zip(predicted) {
            let i = position(y)?;
            let j = position(p)?;
            counts[i][j] += 1;
        }

        Ok(Self { classes, counts, })
    }


    /// Sorted labels indexing the rows and the columns.
    pub fn classes(&self) -> &[i64] {
        &self.classes[..]
    }


    /// Number of rows labeled `actual` and predicted as `predicted`.
    pub fn count(&self, actual: i64, predicted: i64) -> usize {
        let i = self.classes.binary_search(&actual);
        let j = self.classes.binary_search(&predicted);
        match (i, j) {
            (Ok(i), Ok(j)) => self.counts[i][j],
            _ => 0,
        }
    }


    /// Number of counted rows.
    pub fn total(&self) -> usize {
        self.counts.iter()
            .map(|row| row.iter().sum::<usize>())
            .sum()
    }


    /// Fraction of rows on the diagonal.
    /// Returns `None` for an empty matrix.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 { return None; }

        let correct = (0..self.classes.len())
            .map(|i| self.counts[i][i])
            .sum::<usize>();
        Some(correct as f64 / total as f64)
    }
}


impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>CELL_WIDTH$}", "actual")?;
        for y in &self.classes {
            write!(f, "{}", format!("{y:>CELL_WIDTH$}").bold())?;
        }
        writeln!(f)?;

        for (i, (y, row)) in self.classes.iter().zip(&self.counts).enumerate() {
            write!(f, "{}", format!("{y:>CELL_WIDTH$}").bold())?;
            for (j, count) in row.iter().enumerate() {
                let cell = format!("{count:>CELL_WIDTH$}");
                if i == j {
                    write!(f, "{}", cell.green())?;
                } else {
                    write!(f, "{cell}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let truth     = [0, 0, 1, 1, 2, 2];
        let predicted = [0, 1, 1, 1, 2, 0];
        let matrix = ConfusionMatrix::new(&[2, 1, 0], &truth, &predicted)
            .unwrap();

        assert_eq!(matrix.classes(), &[0, 1, 2]);
        assert_eq!(matrix.count(0, 0), 1);
        assert_eq!(matrix.count(0, 1), 1);
        assert_eq!(matrix.count(1, 1), 2);
        assert_eq!(matrix.count(2, 0), 1);
        assert_eq!(matrix.count(5, 0), 0);
        assert_eq!(matrix.total(), 6);
        assert_eq!(matrix.accuracy(), Some(4.0 / 6.0));
        assert!(!matrix.to_string().is_empty());
    }

    #[test]
    fn test_unknown_label() {
        let res = ConfusionMatrix::new(&[0, 1], &[0, 3], &[0, 1]);
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_length_mismatch() {
        let res = ConfusionMatrix::new(&[0, 1], &[0, 1, 1], &[0, 1]);
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_empty() {
        let matrix = ConfusionMatrix::new(&[0, 1], &[], &[]).unwrap();
        assert_eq!(matrix.accuracy(), None);
    }
}
