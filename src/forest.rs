//! Provides `IncrementalForest`,
//! a forest that keeps absorbing new data.

use crate::{
    common::checker,
    constants::{DEFAULT_N_MEMBERS, DEFAULT_SEED},
    error::{EnsembleError, Result},
    MemberTrainer,
    Sample,
    WeightedMajority,
};


/// A forest that grows batch by batch.
///
/// [`IncrementalForest`] owns a [`MemberTrainer`] and a
/// [`WeightedMajority`].
/// [`IncrementalForest::fit`] trains the first batch,
/// and every [`IncrementalForest::update`] trains a new batch on new data
/// and appends it with its own vote weight.
/// Old members are never retrained.
///
/// Seeds are handed to the trainer explicitly:
/// the `k`-th member ever trained uses `seed + k`.
/// Hence, updating with weight `1` on the same data is the same as
/// training a larger forest in one go.
///
/// # Example
/// ```no_run
/// use incforest::prelude::*;
///
/// let old = SampleReader::default()
///     .file("/path/to/old.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// let new = SampleReader::default()
///     .file("/path/to/new.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
/// let trainer = RandomForestBuilder::new().build().unwrap();
/// let mut forest = IncrementalForest::new(trainer, 50)
///     .unwrap()
///     .seed(1234);
///
/// forest.fit(&old, 1).unwrap();
/// // Members trained on the new data vote three times.
/// forest.update(&new, 3).unwrap();
///
/// let accuracy = forest.score(&new).unwrap();
/// println!("accuracy: {accuracy}");
/// ```
pub struct IncrementalForest<T: MemberTrainer> {
    trainer:   T,
    ensemble:  WeightedMajority<T::Member>,
    n_members: usize,
    seed:      u64,
    n_batches: usize,
}


impl<T: MemberTrainer> IncrementalForest<T> {
    /// Construct an empty forest that trains
    /// `n_members` members per batch with `trainer`.
    pub fn new(trainer: T, n_members: usize) -> Result<Self> {
        checker::n_members(n_members)?;
        Ok(Self {
            trainer,
            ensemble: WeightedMajority::new(),
            n_members,
            seed: DEFAULT_SEED,
            n_batches: 0,
        })
    }


    /// Construct an empty forest that trains
    /// `DEFAULT_N_MEMBERS` members per batch.
    pub fn with_trainer(trainer: T) -> Self {
        Self {
            trainer,
            ensemble: WeightedMajority::new(),
            n_members: DEFAULT_N_MEMBERS,
            seed: DEFAULT_SEED,
            n_batches: 0,
        }
    }


    /// Set the base seed.
    /// Default value is `DEFAULT_SEED`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Returns the trainer.
    pub fn trainer(&self) -> &T {
        &self.trainer
    }


    /// Returns the current ensemble.
    pub fn ensemble(&self) -> &WeightedMajority<T::Member> {
        &self.ensemble
    }


    /// Consumes `self` and returns the ensemble.
    pub fn into_ensemble(self) -> WeightedMajority<T::Member> {
        self.ensemble
    }


    /// Number of members trained per batch.
    pub fn n_members(&self) -> usize {
        self.n_members
    }


    /// Number of batches absorbed so far.
    pub fn n_batches(&self) -> usize {
        self.n_batches
    }


    /// Train the first batch on `sample` and
    /// give its members the vote weight `weight`.
    pub fn fit(&mut self, sample: &Sample, weight: u32) -> Result<&mut Self> {
        if self.ensemble.is_initialized() {
            return Err(EnsembleError::InvalidConfiguration(
                "the forest is already fitted. use `update` for new data"
                    .to_string()
            ));
        }
        checker::weight(weight)?;

        let members = self.train_batch(sample)?;
        self.ensemble.initialize(members, weight)?;
        self.n_batches += 1;
        Ok(self)
    }


    /// Train a new batch on `sample` and append it
    /// with the vote weight `weight`.
    /// The members trained so far are left untouched.
    pub fn update(&mut self, sample: &Sample, weight: u32)
        -> Result<&mut Self>
    {
        if !self.ensemble.is_initialized() {
            return Err(EnsembleError::NotInitialized);
        }
        checker::weight(weight)?;

        let members = self.train_batch(sample)?;
        self.ensemble.append(members, weight)?;
        self.n_batches += 1;
        Ok(self)
    }


    fn train_batch(&self, sample: &Sample) -> Result<Vec<T::Member>> {
        let offset = self.ensemble.len() as u64;
        let seed = self.seed.wrapping_add(offset);
        let members = self.trainer.train(sample, self.n_members, seed)?;

        if members.len() != self.n_members {
            return Err(EnsembleError::Trainer(format!(
                "{} returned {} members, expected {}",
                self.trainer.name(),
                members.len(),
                self.n_members,
            )));
        }
        Ok(members)
    }
}


impl<T> IncrementalForest<T>
    where T: MemberTrainer,
          T::Member: Sync,
{
    /// Predict the label of each row of `sample`
    /// by weighted majority vote.
    pub fn predict(&self, sample: &Sample) -> Result<Vec<i64>> {
        self.ensemble.predict_votes(sample)
    }


    /// Returns the accuracy on `sample`,
    /// which must carry its class labels.
    pub fn score(&self, sample: &Sample) -> Result<f64> {
        if !sample.has_target() {
            return Err(EnsembleError::InvalidInput(
                "the sample has no class labels to score against"
                    .to_string()
            ));
        }
        self.ensemble.score_votes(sample, sample.target())
    }


    /// Returns the accuracy on `sample` against `labels`.
    pub fn score_with(&self, sample: &Sample, labels: &[i64])
        -> Result<f64>
    {
        self.ensemble.score_votes(sample, labels)
    }
}
