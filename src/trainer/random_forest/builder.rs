use super::rforest::{MaxFeatures, RandomForest};
use crate::{
    common::tree::Depth,
    constants::DEFAULT_MIN_SAMPLES_SPLIT,
    error::{EnsembleError, Result},
    SplitBy,
};


/// A struct that builds `RandomForest`.
/// `RandomForestBuilder` keeps parameters for constructing `RandomForest`.
///
/// # Example
///
/// ```
/// use incforest::prelude::*;
///
/// let forest = RandomForestBuilder::new()
///     .max_depth(4)
///     .max_features(MaxFeatures::All)
///     .split_by(SplitBy::Entropy)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RandomForestBuilder {
    max_depth:         Option<usize>,
    min_samples_split: usize,
    max_features:      MaxFeatures,
    bootstrap:         bool,
    split_by:          SplitBy,
}


impl Default for RandomForestBuilder {
    fn default() -> Self {
        Self::new()
    }
}


impl RandomForestBuilder {
    /// Construct a new instance of [`RandomForestBuilder`].
    pub fn new() -> Self {
        Self {
            max_depth:         None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            max_features:      MaxFeatures::Sqrt,
            bootstrap:         true,
            split_by:          SplitBy::Gini,
        }
    }


    /// Specify the maximal depth of each tree.
    /// By default, trees grow until their leaves are pure.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }


    /// A node with fewer rows than `n` becomes a leaf.
    /// Default value is `2`.
    pub fn min_samples_split(mut self, n: usize) -> Self {
        self.min_samples_split = n;
        self
    }


    /// Set the number of features examined at each node.
    /// Default value is `MaxFeatures::Sqrt`.
    pub fn max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }


    /// Whether each tree is grown on a bootstrap resample.
    /// Default value is `true`.
    pub fn bootstrap(mut self, flag: bool) -> Self {
        self.bootstrap = flag;
        self
    }


    /// Set the node splitting rule.
    /// Default value is `SplitBy::Gini`.
    pub fn split_by(mut self, split_by: SplitBy) -> Self {
        self.split_by = split_by;
        self
    }


    /// Build a `RandomForest`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<RandomForest> {
        let max_depth = match self.max_depth {
            Some(0) => {
                return Err(EnsembleError::InvalidConfiguration(
                    "tree must have positive depth".to_string()
                ));
            },
            Some(depth) => Depth::from(depth),
            None => Depth::from(usize::MAX),
        };

        if self.min_samples_split < 2 {
            return Err(EnsembleError::InvalidConfiguration(format!(
                "`min_samples_split` must be at least 2. got {}.",
                self.min_samples_split,
            )));
        }

        match self.max_features {
            MaxFeatures::Fixed(0) => {
                return Err(EnsembleError::InvalidConfiguration(
                    "`MaxFeatures::Fixed` must be positive".to_string()
                ));
            },
            MaxFeatures::Fraction(f) if !(f > 0f64 && f <= 1f64) => {
                return Err(EnsembleError::InvalidConfiguration(format!(
                    "`MaxFeatures::Fraction` must be in (0, 1]. got {f}."
                )));
            },
            _ => {},
        }

        Ok(RandomForest::from_components(
            max_depth,
            self.min_samples_split,
            self.max_features,
            self.bootstrap,
            self.split_by,
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default() {
        assert!(RandomForestBuilder::default().build().is_ok());
    }

    #[test]
    fn test_zero_depth() {
        let res = RandomForestBuilder::new().max_depth(0).build();
        assert!(matches!(res, Err(EnsembleError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_min_samples_split() {
        let res = RandomForestBuilder::new().min_samples_split(1).build();
        assert!(matches!(res, Err(EnsembleError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_bad_fraction() {
        for f in [0.0, -0.5, 1.5, f64::NAN] {
            let res = RandomForestBuilder::new()
                .max_features(MaxFeatures::Fraction(f))
                .build();
            assert!(
                matches!(res, Err(EnsembleError::InvalidConfiguration(_))),
                "fraction {f} should be rejected"
            );
        }
    }
}
