use rand::prelude::*;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{
    common::{checker, tree::Depth},
    error::Result,
    trainer::decision_tree::{
        DecisionTreeClassifier,
        SplitBy,
        TreeGrower,
    },
    MemberTrainer,
    Sample,
};


/// Number of features examined at each node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// Square root of the number of features.
    Sqrt,
    /// Log2 of the number of features.
    Log2,
    /// Fraction of the number of features, in `(0, 1]`.
    Fraction(f64),
    /// Fixed number, capped by the number of features.
    Fixed(usize),
    /// All features.
    All,
}

impl MaxFeatures {
    /// Returns the number of features to examine
    /// out of `n_feature` features. Always at least `1`.
    pub fn resolve(&self, n_feature: usize) -> usize {
        let n = n_feature as f64;
        let amount = match *self {
            Self::Sqrt => n.sqrt().ceil() as usize,
            Self::Log2 => n.log2().ceil() as usize,
            Self::Fraction(f) => (n * f).ceil() as usize,
            Self::Fixed(k) => k,
            Self::All => n_feature,
        };
        amount.clamp(1, n_feature.max(1))
    }
}

impl fmt::Display for MaxFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqrt => write!(f, "sqrt"),
            Self::Log2 => write!(f, "log2"),
            Self::Fraction(r) => write!(f, "{r} of all"),
            Self::Fixed(k) => write!(f, "{k}"),
            Self::All => write!(f, "all"),
        }
    }
}


/// A bagged forest of decision trees.
///
/// Each call to [`MemberTrainer::train`] grows `n_members` trees,
/// the `j`-th of which on its own bootstrap resample
/// drawn with the seed `seed + j`.
/// At every node, only a random subset of features is examined.
///
/// [`RandomForest`] is constructed by
/// [`RandomForestBuilder`](crate::RandomForestBuilder).
///
/// # Example
/// ```no_run
/// use incforest::prelude::*;
///
/// let sample = SampleReader::default()
///     .file("/path/to/data/file.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
/// let forest = RandomForestBuilder::new()
///     .max_depth(8)
///     .split_by(SplitBy::Entropy)
///     .build()
///     .unwrap();
///
/// let trees = forest.train(&sample, 10, 0).unwrap();
/// assert_eq!(trees.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    max_depth:         Depth,
    min_samples_split: usize,
    max_features:      MaxFeatures,
    bootstrap:         bool,
    split_by:          SplitBy,
}


impl RandomForest {
    /// Initialize [`RandomForest`].
    /// This method is called only via `RandomForestBuilder::build`.
    #[inline]
    pub(super) fn from_components(
        max_depth:         Depth,
        min_samples_split: usize,
        max_features:      MaxFeatures,
        bootstrap:         bool,
        split_by:          SplitBy,
    ) -> Self
    {
        Self {
            max_depth,
            min_samples_split,
            max_features,
            bootstrap,
            split_by,
        }
    }


    /// Returns the rows used to grow one tree.
    fn resample<R: Rng>(&self, rng: &mut R, n_sample: usize) -> Vec<usize> {
        if self.bootstrap {
            (0..n_sample).map(|_| rng.gen_range(0..n_sample))
                .collect()
        } else {
            (0..n_sample).collect()
        }
    }
}


impl MemberTrainer for RandomForest {
    type Member = DecisionTreeClassifier;


    fn name(&self) -> &str {
        "Random Forest"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Max depth", format!("{}", self.max_depth)),
            ("Min samples split", format!("{}", self.min_samples_split)),
            ("Max features", format!("{}", self.max_features)),
            ("Bootstrap", format!("{}", self.bootstrap)),
            ("Split criterion", format!("{}", self.split_by)),
        ]);
        Some(info)
    }


    fn train(&self, sample: &Sample, n_members: usize, seed: u64)
        -> Result<Vec<Self::Member>>
    {
        checker::n_members(n_members)?;
        checker::training_sample(sample)?;

        let (n_sample, n_feature) = sample.shape();
        let classes = sample.unique_target();
        let max_features = self.max_features.resolve(n_feature);

        let grower = TreeGrower::new(
            sample, self.split_by, max_features, self.min_samples_split,
        );

        let members = (0..n_members).into_par_iter()
            .map(|j| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(j as u64));
                let indices = self.resample(&mut rng, n_sample);
                let tree = grower.grow(&mut rng, indices, self.max_depth);
                DecisionTreeClassifier::new(tree, classes.clone(), n_feature)
            })
            .collect::<Vec<_>>();

        Ok(members)
    }
}


impl fmt::Display for RandomForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------\n# {}\n", self.name())?;
        if let Some(info) = self.info() {
            for (key, value) in info {
                writeln!(f, "- {key}: {value}")?;
            }
        }
        write!(f, "----------")
    }
}
