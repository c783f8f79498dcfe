use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use std::collections::BTreeMap;

use crate::{
    common::checker,
    constants::DEFAULT_WEIGHT,
    error::{EnsembleError, Result},
    Classifier,
    Member,
    Sample,
};


/// Weighted ballot for one row.
/// Maps each voted label to the number of votes it received.
pub type Ballot = BTreeMap<i64, u64>;


/// An ensemble that predicts by weighted majority vote.
///
/// Each member casts a single vote per row,
/// counted as many times as its integer weight.
/// The predicted label is the mode of the resulting ballot.
/// If two or more labels tie, the lowest label wins.
///
/// Members are appended batch by batch;
/// every member of a batch shares the weight of the batch.
/// Members are never removed or re-weighted.
///
/// # Example
/// ```no_run
/// use incforest::prelude::*;
///
/// let train = SampleReader::default()
///     .file("/path/to/train.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// let fresh = SampleReader::default()
///     .file("/path/to/fresh.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
/// let forest = RandomForestBuilder::new().build().unwrap();
///
/// let members = forest.train(&train, 100, 0).unwrap();
/// let mut ensemble = WeightedMajority::from_members(members, 1).unwrap();
///
/// // Fresh data counts twice as much as the old one.
/// let members = forest.train(&fresh, 100, 100).unwrap();
/// ensemble.append(members, 2).unwrap();
///
/// let accuracy = ensemble.score_votes(&fresh, fresh.target()).unwrap();
/// println!("accuracy: {accuracy}");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WeightedMajority<H> {
    weights: Vec<u32>,
    hypotheses: Vec<H>,
    classes: Vec<i64>,
    n_feature: usize,
}


impl<H> Default for WeightedMajority<H> {
    fn default() -> Self {
        Self {
            weights: Vec::new(),
            hypotheses: Vec::new(),
            classes: Vec::new(),
            n_feature: 0,
        }
    }
}


impl<H> WeightedMajority<H> {
    /// Construct an empty, uninitialized ensemble.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }


    /// Returns `true` once the first batch is stored.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        !self.hypotheses.is_empty()
    }


    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }


    /// Returns `true` if there is no member.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }


    /// Vote weights, aligned with [`WeightedMajority::hypotheses`].
    #[inline]
    pub fn weights(&self) -> &[u32] {
        &self.weights[..]
    }


    /// Members in training order.
    #[inline]
    pub fn hypotheses(&self) -> &[H] {
        &self.hypotheses[..]
    }


    /// Sorted class labels fixed by the first batch.
    #[inline]
    pub fn classes(&self) -> &[i64] {
        &self.classes[..]
    }


    /// Number of features every member expects.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.n_feature
    }


    /// Number of votes in the ballot of any row,
    /// i.e., the sum of all weights.
    #[inline]
    pub fn total_weight(&self) -> u64 {
        self.weights.iter()
            .map(|&w| w as u64)
            .sum()
    }


    /// Iterate over the pairs `(weight, member)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &H)> + '_ {
        self.weights.iter()
            .copied()
            .zip(&self.hypotheses[..])
    }


    /// Decompose the combined hypothesis
    /// into the two vectors `Vec<u32>` and `Vec<H>`
    #[inline]
    pub fn decompose(self) -> (Vec<u32>, Vec<H>) {
        (self.weights, self.hypotheses)
    }


    /// The only place where members and weights grow.
    fn extend(&mut self, hypotheses: Vec<H>, weight: u32) {
        let n_new = hypotheses.len();
        self.weights.extend(std::iter::repeat(weight).take(n_new));
        self.hypotheses.extend(hypotheses);
        debug_assert_eq!(self.weights.len(), self.hypotheses.len());
    }
}


impl<H> WeightedMajority<H>
    where H: Member,
{
    /// Construct an ensemble from a first batch of members.
    /// Every member gets the vote weight `weight`.
    /// Use `WeightedMajority::try_from` for the unit weight.
    pub fn from_members(hypotheses: Vec<H>, weight: u32) -> Result<Self> {
        let mut ensemble = Self::new();
        ensemble.initialize(hypotheses, weight)?;
        Ok(ensemble)
    }


    /// Store the first batch of members with the vote weight `weight`.
    ///
    /// The class domain of the ensemble becomes the union of
    /// the members' class domains and stays fixed afterwards.
    ///
    /// Fails with `InvalidConfiguration` if `hypotheses` is empty,
    /// `weight` is zero, the members disagree on the feature count,
    /// or `self` is already initialized.
    pub fn initialize(&mut self, hypotheses: Vec<H>, weight: u32)
        -> Result<()>
    {
        if self.is_initialized() {
            return Err(EnsembleError::InvalidConfiguration(
                "the ensemble is already initialized. \
                use `append` to add a batch".to_string()
            ));
        }
        checker::weight(weight)?;
        checker::batch(&hypotheses)?;

        let n_feature = hypotheses[0].n_feature();
        same_feature_count(&hypotheses, n_feature)?;

        let mut classes = hypotheses.iter()
            .flat_map(|h| h.classes().iter().copied())
            .collect::<Vec<_>>();
        classes.sort_unstable();
        classes.dedup();
        if classes.is_empty() {
            return Err(EnsembleError::InvalidConfiguration(
                "the first batch does not know any class label".to_string()
            ));
        }

        self.classes = classes;
        self.n_feature = n_feature;
        self.extend(hypotheses, weight);
        Ok(())
    }


    /// Append a batch of newly trained members
    /// with the vote weight `weight`.
    /// Existing members and their weights are left untouched.
    ///
    /// Either the whole batch is appended or nothing changes.
    /// Fails with `NotInitialized` before [`WeightedMajority::initialize`],
    /// and with `InvalidConfiguration` if `hypotheses` is empty,
    /// `weight` is zero, a member reads a different number of features,
    /// or a member knows a label outside [`WeightedMajority::classes`].
    pub fn append(&mut self, hypotheses: Vec<H>, weight: u32)
        -> Result<()>
    {
        if !self.is_initialized() {
            return Err(EnsembleError::NotInitialized);
        }
        checker::weight(weight)?;
        checker::batch(&hypotheses)?;
        same_feature_count(&hypotheses, self.n_feature)?;

        let unseen = hypotheses.iter()
            .flat_map(|h| h.classes().iter().copied())
            .find(|y| self.classes.binary_search(y).is_err());
        if let Some(y) = unseen {
            return Err(EnsembleError::InvalidConfiguration(format!(
                "label {y} is not in the class domain {:?} \
                fixed by the first batch",
                self.classes,
            )));
        }

        self.extend(hypotheses, weight);
        Ok(())
    }


    /// Same as [`WeightedMajority::append`]
    /// with the vote weight `DEFAULT_WEIGHT`.
    pub fn append_unit(&mut self, hypotheses: Vec<H>) -> Result<()> {
        self.append(hypotheses, DEFAULT_WEIGHT)
    }
}


impl<H> WeightedMajority<H>
    where H: Classifier + Sync,
{
    /// Returns the weighted ballot of each row of `sample`.
    ///
    /// The votes of each ballot sum up to
    /// [`WeightedMajority::total_weight`].
    pub fn ballots(&self, sample: &Sample) -> Result<Vec<Ballot>> {
        if !self.is_initialized() {
            return Err(EnsembleError::NotInitialized);
        }
        checker::query(sample, self.n_feature)?;

        let n_sample = sample.shape().0;

        // Each member predicts the whole batch independently.
        let predictions = self.hypotheses.par_iter()
            .map(|h| h.predict_all(sample))
            .collect::<Vec<_>>();

        let ballots = (0..n_sample).into_par_iter()
            .map(|row| {
                let mut ballot = Ballot::new();
                self.weights.iter()
                    .zip(&predictions[..])
                    .for_each(|(&w, pred)| {
                        *ballot.entry(pred[row]).or_insert(0) += w as u64;
                    });
                ballot
            })
            .collect();
        Ok(ballots)
    }


    /// Predict the label of each row of `sample`
    /// by weighted majority vote.
    ///
    /// Fails with `NotInitialized` if there is no member,
    /// and with `InvalidInput` if `sample` is empty or
    /// its number of features differs from the members'.
    pub fn predict_votes(&self, sample: &Sample) -> Result<Vec<i64>> {
        let predictions = self.ballots(sample)?
            .iter()
            .map(mode)
            .collect();
        Ok(predictions)
    }


    /// Returns the fraction of rows of `sample`
    /// whose predicted label equals `labels`.
    ///
    /// Fails with `InvalidInput` if `sample` is empty or
    /// `labels` does not pair with the rows of `sample`.
    pub fn score_votes(&self, sample: &Sample, labels: &[i64])
        -> Result<f64>
    {
        checker::labels(sample, labels)?;
        let n_sample = labels.len() as f64;

        let n_correct = self.predict_votes(sample)?
            .into_iter()
            .zip(labels)
            .filter(|(p, y)| p == *y)
            .count();

        Ok(n_correct as f64 / n_sample)
    }
}


impl<H> TryFrom<Vec<H>> for WeightedMajority<H>
    where H: Member,
{
    type Error = EnsembleError;

    fn try_from(hypotheses: Vec<H>) -> Result<Self> {
        Self::from_members(hypotheses, DEFAULT_WEIGHT)
    }
}


/// Returns the most voted label.
/// On ties, the lowest label wins
/// since a `BTreeMap` iterates in ascending order.
fn mode(ballot: &Ballot) -> i64 {
    let mut best: Option<(i64, u64)> = None;
    for (&label, &count) in ballot {
        match best {
            Some((_, c)) if c >= count => {},
            _ => { best = Some((label, count)); },
        }
    }
    best.map(|(label, _)| label)
        .expect("a ballot of an initialized ensemble is never empty")
}


fn same_feature_count<H: Member>(hypotheses: &[H], n_feature: usize)
    -> Result<()>
{
    let mismatch = hypotheses.iter()
        .map(|h| h.n_feature())
        .find(|&n| n != n_feature);
    if let Some(n) = mismatch {
        return Err(EnsembleError::InvalidConfiguration(format!(
            "a member reads {n} features, expected {n_feature}"
        )));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    /// A member that always predicts the same label.
    #[derive(Debug, Clone)]
    struct Constant {
        label: i64,
        classes: Vec<i64>,
    }

    impl Constant {
        fn new(label: i64) -> Self {
            Self { label, classes: vec![0, 1, 2], }
        }
    }

    impl Classifier for Constant {
        fn predict(&self, _sample: &Sample, _row: usize) -> i64 {
            self.label
        }
    }

    impl Member for Constant {
        fn classes(&self) -> &[i64] {
            &self.classes[..]
        }

        fn n_feature(&self) -> usize {
            1
        }
    }

    fn batch(labels: &[i64]) -> Vec<Constant> {
        labels.iter().copied().map(Constant::new).collect()
    }

    fn query() -> Sample {
        Sample::from_rows(&[[0.0], [1.0]]).unwrap()
    }

    #[test]
    fn test_mode_tie_breaks_to_lowest_label() {
        let ballot = Ballot::from([(2, 3), (-1, 3), (5, 1)]);
        assert_eq!(mode(&ballot), -1);
    }

    #[test]
    fn test_mode_picks_the_maximum() {
        let ballot = Ballot::from([(0, 3), (1, 12)]);
        assert_eq!(mode(&ballot), 1);
    }

    #[test]
    fn test_tie_between_batches() {
        let mut ensemble = WeightedMajority::from_members(batch(&[1, 1]), 1)
            .unwrap();
        ensemble.append(batch(&[0]), 2).unwrap();
        let pred = ensemble.predict_votes(&query()).unwrap();
        assert_eq!(pred, vec![0, 0]);
    }

    #[test]
    fn test_double_initialize() {
        let mut ensemble = WeightedMajority::from_members(batch(&[0]), 1)
            .unwrap();
        let res = ensemble.initialize(batch(&[1]), 1);
        assert!(matches!(res, Err(EnsembleError::InvalidConfiguration(_))));
        assert_eq!(ensemble.len(), 1);
    }

    #[test]
    fn test_unseen_label_is_rejected() {
        let mut ensemble = WeightedMajority::from_members(batch(&[0]), 1)
            .unwrap();
        let stranger = Constant { label: 7, classes: vec![0, 7], };
        let res = ensemble.append(vec![stranger], 1);
        assert!(matches!(res, Err(EnsembleError::InvalidConfiguration(_))));
        assert_eq!(ensemble.len(), 1);
        assert_eq!(ensemble.weights(), &[1]);
    }

    #[test]
    fn test_total_weight() {
        let mut ensemble = WeightedMajority::from_members(batch(&[0, 1]), 3)
            .unwrap();
        ensemble.append(batch(&[2, 2, 2]), 4).unwrap();
        assert_eq!(ensemble.total_weight(), 2 * 3 + 3 * 4);
        let pairs = ensemble.iter()
            .map(|(w, h)| (w, h.label))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![(3, 0), (3, 1), (4, 2), (4, 2), (4, 2)]);
    }

    #[test]
    fn test_try_from_uses_unit_weight() {
        let ensemble = WeightedMajority::try_from(batch(&[0, 1, 1])).unwrap();
        assert_eq!(ensemble.weights(), &[1, 1, 1]);

        let res = WeightedMajority::try_from(batch(&[]));
        assert!(matches!(res, Err(EnsembleError::InvalidConfiguration(_))));
    }
}
