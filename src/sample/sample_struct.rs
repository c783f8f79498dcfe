use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::collections::HashMap;

use super::feature_struct::Feature;
use crate::error::{EnsembleError, Result};


/// A batch of examples stored column by column.
///
/// The target column is optional:
/// a query set has features only,
/// while a training set carries one integer class label per row.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<i64>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a [`Sample`] from row vectors.
    /// The columns are named `Feat. [1]`, `Feat. [2]`, ...
    ///
    /// Returns `InvalidInput` if the rows have different lengths.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
        where R: AsRef<[f64]>,
    {
        let n_sample = rows.len();
        let n_feature = rows.first()
            .map(|row| row.as_ref().len())
            .unwrap_or(0);

        let mut features = (1..=n_feature).map(|i| Feature::new(format!("Feat. [{i}]")))
            .collect::<Vec<_>>();

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_feature {
                return Err(EnsembleError::InvalidInput(format!(
                    "row {i} has {} features, expected {n_feature}",
                    row.len(),
                )));
            }
            features.iter_mut()
                .zip(row)
                .for_each(|(feat, &x)| { feat.append(x); });
        }

        let name_to_index = index_names(&features);
        Ok(Self {
            name_to_index,
            features,
            target: Vec::with_capacity(0),
            n_sample,
            n_feature,
        })
    }


    /// Attach class labels to `self`.
    /// The old labels, if any, are dropped.
    ///
    /// Returns `InvalidInput` if the number of labels
    /// differs from the number of rows.
    pub fn with_target(mut self, target: Vec<i64>) -> Result<Self> {
        if target.len() != self.n_sample {
            return Err(EnsembleError::InvalidInput(format!(
                "got {} labels for {} rows",
                target.len(),
                self.n_sample,
            )));
        }
        self.target = target;
        Ok(self)
    }


    /// Read a CSV format file to [`Sample`] type.
    /// This method returns `Err` if the file does not exist.
    ///
    /// If the CSV file does not header row,
    /// this method assigns a default name for each column:
    /// `Feat. [1]`, `Feat. [2]`, ..., `Feat. [n]`.
    ///
    /// **Do not forget** to call [`Sample::set_target`] to
    /// assign the class label.
    pub(crate) fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, has_header)
    }


    /// Read a CSV from [`BufReader`].
    /// All cells must be numeric.
    pub fn from_reader<R>(reader: BufReader<R>, has_header: bool)
        -> Result<Self>
        where R: Read,
    {
        let mut lines = reader.lines();

        let mut features: Option<Vec<Feature>> = None;
        if has_header {
            if let Some(line) = lines.next() {
                let names = line?.split(',')
                    .map(|name| Feature::new(name.trim()))
                    .collect::<Vec<_>>();
                features = Some(names);
            }
        }

        // Line numbers in messages count from 1 and include the header.
        let offset = 1 + has_header as usize;

        let mut n_sample = 0_usize;
        for (i, line) in lines.enumerate() {
            let line_no = i + offset;
            let line = line?;
            if line.trim().is_empty() { continue; }

            let xs = line.split(',')
                .map(|x| {
                    x.trim().parse::<f64>()
                        .map_err(|_| EnsembleError::InvalidInput(format!(
                            "the file contains non-numerical value. \
                            got {x} in line {line_no}"
                        )))
                })
                .collect::<Result<Vec<_>>>()?;

            // If the header does not exist,
            // construct a dummy header from the first row.
            let features = features.get_or_insert_with(|| {
                (1..=xs.len()).map(|k| Feature::new(format!("Feat. [{k}]")))
                    .collect()
            });

            if xs.len() != features.len() {
                return Err(EnsembleError::InvalidInput(format!(
                    "line {line_no} has {} columns, expected {}",
                    xs.len(),
                    features.len(),
                )));
            }

            features.iter_mut()
                .zip(xs)
                .for_each(|(feat, x)| { feat.append(x); });
            n_sample += 1;
        }

        let features = features.unwrap_or_default();
        let n_feature = features.len();
        let name_to_index = index_names(&features);

        Ok(Self {
            name_to_index,
            features,
            target: Vec::with_capacity(0),
            n_sample,
            n_feature,
        })
    }


    /// Move the feature of name `target` to the class labels.
    /// The old labels assigned to `self` will be dropped.
    ///
    /// Returns `InvalidInput` if the column does not exist
    /// or holds a non-integer value.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.name_to_index.get(target)
            .copied()
            .ok_or_else(|| EnsembleError::InvalidInput(format!(
                "the target class \"{target}\" does not exist"
            )))?;

        let column = self.features.remove(pos).into_vals();
        // `i64::MIN as f64` is exactly -2^63, and 2^63 itself is out of range.
        let lower = i64::MIN as f64;
        let non_integers = column.iter()
            .filter(|&&y| {
                !y.is_finite() || y.trunc() != y || y < lower || y >= -lower
            })
            .take(5)
            .map(|y| y.to_string())
            .collect::<Vec<_>>();
        if !non_integers.is_empty() {
            let line = non_integers.join(", ");
            return Err(EnsembleError::InvalidInput(format!(
                "target values must be integers in the range of `i64`. \
                Ex. [{line}, ...]"
            )));
        }

        self.target = column.into_iter()
            .map(|y| y as i64)
            .collect();
        self.n_feature -= 1;
        self.name_to_index = index_names(&self.features);

        Ok(self)
    }


    /// Returns the slice of class labels.
    /// The slice is empty if no label is attached.
    pub fn target(&self) -> &[i64] {
        &self.target[..]
    }


    /// Returns `true` if every row has a class label.
    pub fn has_target(&self) -> bool {
        self.n_sample > 0 && self.target.len() == self.n_sample
    }


    /// Returns the sorted distinct class labels.
    pub fn unique_target(&self) -> Vec<i64> {
        let mut target = self.target.clone();
        target.sort_unstable();
        target.dedup();
        target
    }


    /// Returns a slice of the features.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature named `name`.
    pub fn feature<S: AsRef<str>>(&self, name: S) -> Option<&Feature> {
        self.name_to_index.get(name.as_ref())
            .map(|&k| &self.features[k])
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the value of the `col`-th feature of the `row`-th example.
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.features[col][row]
    }


    /// Returns the `row`-th example as a vector.
    pub fn at(&self, row: usize) -> Vec<f64> {
        self.features.iter()
            .map(|feat| feat[row])
            .collect()
    }
}


fn index_names(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, f)| (f.name().to_string(), i))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn training_examples(bytes: &[u8], has_header: bool) -> Sample {
        let reader = BufReader::new(bytes);
        Sample::from_reader(reader, has_header)
            .unwrap()
            .set_target("class")
            .unwrap()
    }

    #[test]
    fn test_from_reader_01() {
        let bytes = b"\
            test,dummy,class\n\
            0.1,0.2,1\n\
            -8.0,2.0,0\n\
            3.0,-9.0,2\n\
            -0.001,0.0,0";
        let sample = training_examples(bytes, true);
        assert_eq!(sample.shape(), (4, 2));
        assert_eq!(sample.target(), &[1, 0, 2, 0]);
        assert_eq!(sample.unique_target(), vec![0, 1, 2]);
        assert_eq!(sample.at(2), vec![3.0, -9.0]);
        assert_eq!(sample.feature("dummy").unwrap()[1], 2.0);
    }

    #[test]
    fn test_from_reader_without_header() {
        let bytes = b"\
            0.1,0.2,1.0\n\
            0.3,0.4,0.0";
        let reader = BufReader::new(&bytes[..]);
        let sample = Sample::from_reader(reader, false).unwrap();
        assert_eq!(sample.shape(), (2, 3));
        assert!(!sample.has_target());
        assert_eq!(sample.features()[0].name(), "Feat. [1]");
    }

    #[test]
    fn test_non_integer_target() {
        let bytes = b"\
            x,class\n\
            0.1,0.5\n\
            0.2,1.0";
        let reader = BufReader::new(&bytes[..]);
        let res = Sample::from_reader(reader, true)
            .unwrap()
            .set_target("class");
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_out_of_range_target() {
        for big in ["1e20", "-1e20", "9223372036854775808"] {
            let csv = format!("x,class\n0.1,{big}\n0.2,0");
            let reader = BufReader::new(csv.as_bytes());
            let res = Sample::from_reader(reader, true)
                .unwrap()
                .set_target("class");
            assert!(
                matches!(res, Err(EnsembleError::InvalidInput(_))),
                "label {big} should be rejected"
            );
        }

        let bytes = b"x,class\n0.1,-9223372036854775808\n0.2,0";
        let sample = training_examples(bytes, true);
        assert_eq!(sample.target(), &[i64::MIN, 0]);
    }

    #[test]
    fn test_error_reports_file_line() {
        let bytes = b"\
            x,y\n\
            0.1,0.5\n\
            0.2,abc";
        let reader = BufReader::new(&bytes[..]);
        let err = Sample::from_reader(reader, true).unwrap_err();
        assert!(err.to_string().contains("line 3"), "got: {err}");

        let bytes = b"\
            0.1,0.5\n\
            0.2";
        let reader = BufReader::new(&bytes[..]);
        let err = Sample::from_reader(reader, false).unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[test]
    fn test_missing_target_column() {
        let bytes = b"x,y\n0.1,0.5";
        let reader = BufReader::new(&bytes[..]);
        let res = Sample::from_reader(reader, true)
            .unwrap()
            .set_target("class");
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]];
        let sample = Sample::from_rows(&rows)
            .unwrap()
            .with_target(vec![0, 1, 1])
            .unwrap();
        assert_eq!(sample.shape(), (3, 2));
        assert_eq!(sample.value(1, 1), 3.0);
        assert!(sample.has_target());
    }

    #[test]
    fn test_ragged_rows() {
        let rows = vec![vec![0.0, 1.0], vec![2.0]];
        let res = Sample::from_rows(&rows);
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_label_count_mismatch() {
        let rows = vec![vec![0.0], vec![2.0]];
        let res = Sample::from_rows(&rows)
            .unwrap()
            .with_target(vec![1]);
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }
}
