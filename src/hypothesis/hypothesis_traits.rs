use crate::Sample;


/// A trait that defines the behavor of classifier.
/// You only need to implement `predict` method.
pub trait Classifier {
    /// Predicts the label of the i'th row of the `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> i64;


    /// Predicts the labels of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<i64> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }
}


/// A trained classifier that can join a
/// [`WeightedMajority`](crate::WeightedMajority).
///
/// Besides predicting, a member reports the label domain
/// it was trained on and the number of features it reads.
pub trait Member: Classifier {
    /// Sorted class labels of the training set of this member.
    fn classes(&self) -> &[i64];

    /// Number of features this member expects per row.
    fn n_feature(&self) -> usize;
}


impl<H> Classifier for Box<H>
    where H: Classifier + ?Sized,
{
    fn predict(&self, sample: &Sample, row: usize) -> i64 {
        (**self).predict(sample, row)
    }
}


impl<H> Member for Box<H>
    where H: Member + ?Sized,
{
    fn classes(&self) -> &[i64] {
        (**self).classes()
    }

    fn n_feature(&self) -> usize {
        (**self).n_feature()
    }
}
