//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::Sample;
use crate::error::{EnsembleError, Result};


/// Check whether the vote weight is valid or not.
/// A member with zero influence should simply not be added.
#[inline(always)]
pub(crate) fn weight(weight: u32) -> Result<()> {
    if weight < 1 {
        return Err(EnsembleError::InvalidConfiguration(format!(
            "vote weight must be a positive integer. got {weight}."
        )));
    }
    Ok(())
}


/// Check whether a batch of members is non-empty.
#[inline(always)]
pub(crate) fn batch<H>(members: &[H]) -> Result<()> {
    if members.is_empty() {
        return Err(EnsembleError::InvalidConfiguration(
            "a batch must contain at least one member".to_string()
        ));
    }
    Ok(())
}


/// Check the number of members requested from a trainer.
#[inline(always)]
pub(crate) fn n_members(n_members: usize) -> Result<()> {
    if n_members == 0 {
        return Err(EnsembleError::InvalidConfiguration(
            "the number of members per batch must be positive".to_string()
        ));
    }
    Ok(())
}


/// Check whether the query sample is non-empty and
/// has `n_feature` features.
#[inline(always)]
pub(crate) fn query(sample: &Sample, n_feature: usize) -> Result<()> {
    let (n_examples, n_feat) = sample.shape();

    if n_examples == 0 {
        return Err(EnsembleError::InvalidInput(
            "the query set is empty".to_string()
        ));
    }

    if n_feat != n_feature {
        return Err(EnsembleError::InvalidInput(format!(
            "dimensionality mismatch. \
            expected {n_feature} features, got {n_feat}."
        )));
    }
    Ok(())
}


/// Check whether the ground-truth labels pair with the rows of `sample`.
#[inline(always)]
pub(crate) fn labels(sample: &Sample, labels: &[i64]) -> Result<()> {
    let n_examples = sample.shape().0;

    if n_examples == 0 {
        return Err(EnsembleError::InvalidInput(
            "cannot score an empty query set".to_string()
        ));
    }

    if n_examples != labels.len() {
        return Err(EnsembleError::InvalidInput(format!(
            "got {n_examples} samples but {} true labels",
            labels.len(),
        )));
    }
    Ok(())
}


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn training_sample(sample: &Sample) -> Result<()> {
    let (n_examples, n_feature) = sample.shape();

    if n_examples == 0 {
        return Err(EnsembleError::InvalidInput(
            "the training set is empty".to_string()
        ));
    }

    if n_feature == 0 {
        return Err(EnsembleError::InvalidInput(
            "the training set has no feature".to_string()
        ));
    }

    if !sample.has_target() {
        return Err(EnsembleError::InvalidInput(
            "the target class is not specified. \
            use `Sample::set_target` or `Sample::with_target`".to_string()
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn toy_sample() -> Sample {
        Sample::from_rows(&[[0.0, 1.0], [1.0, 0.0], [1.0, 1.0]])
            .unwrap()
    }

    #[test]
    fn test_weight_success_01() {
        assert!(weight(1).is_ok());
    }

    #[test]
    fn test_weight_success_02() {
        assert!(weight(u32::MAX).is_ok());
    }

    #[test]
    fn test_weight_failure_01() {
        let res = weight(0);
        assert!(matches!(res, Err(EnsembleError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_batch_failure_01() {
        let members: Vec<u8> = Vec::new();
        let res = batch(&members);
        assert!(matches!(res, Err(EnsembleError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_query_success_01() {
        let sample = toy_sample();
        assert!(query(&sample, 2).is_ok());
    }

    #[test]
    fn test_query_failure_01() {
        let sample = toy_sample();
        let res = query(&sample, 3);
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_query_failure_02() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let sample = Sample::from_rows(&rows).unwrap();
        let res = query(&sample, 0);
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_labels_failure_01() {
        let sample = toy_sample();
        let res = labels(&sample, &[0, 1]);
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_training_sample_failure_01() {
        let sample = toy_sample();
        let res = training_sample(&sample);
        assert!(matches!(res, Err(EnsembleError::InvalidInput(_))));
    }

    #[test]
    fn test_training_sample_success_01() {
        let sample = toy_sample().with_target(vec![0, 1, 1]).unwrap();
        assert!(training_sample(&sample).is_ok());
    }
}
