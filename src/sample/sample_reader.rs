use std::path::Path;

use super::sample_struct::Sample;
use crate::error::{EnsembleError, Result};


/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV file to [`Sample`].
///
/// # Example
/// ```no_run
/// use incforest::SampleReader;
/// let sample = SampleReader::default()
///     .file("/path/to/csv/file.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
}

impl<P, S> SampleReader<P, S> {
    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}

impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}

impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for the class label.
    /// Each item of the column must be an integer.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}

impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments.
    /// This method consumes `self.`
    ///
    /// Without a target column, the returned sample is a query set.
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or_else(|| EnsembleError::InvalidConfiguration(
                "the file name for csv is not set".to_string()
            ))?;

        let sample = Sample::from_csv(file, self.has_header)?;
        match self.target {
            Some(target) => sample.set_target(target),
            None => Ok(sample),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_without_file() {
        let res = SampleReader::<&str, &str>::default()
            .has_header(true)
            .target_feature("class")
            .read();
        assert!(matches!(res, Err(EnsembleError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_read_missing_file() {
        let res = SampleReader::default()
            .file("/this/file/does/not/exist.csv")
            .target_feature("class")
            .read();
        assert!(matches!(res, Err(EnsembleError::Io(_))));
    }
}
