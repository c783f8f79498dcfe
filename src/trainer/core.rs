use crate::{
    error::Result,
    Member,
    Sample,
};


/// A trait that produces a batch of independently trained members.
///
/// The ensemble never looks inside the training;
/// it only relies on the contract below.
///
/// # Contract
/// - [`MemberTrainer::train`] returns exactly `n_members` members.
/// - The class domain of every member is the label set of `sample`.
/// - Given the same `sample` and `seed`, the output is the same.
pub trait MemberTrainer {
    /// The member type this trainer produces.
    type Member: Member;


    /// Returns the name of the trainer.
    fn name(&self) -> &str;


    /// Returns the information of the trainer as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Train `n_members` members on `sample`.
    /// The `j`-th member must depend on `seed` and `j` only,
    /// so that consecutive calls can pick disjoint seed ranges.
    fn train(&self, sample: &Sample, n_members: usize, seed: u64)
        -> Result<Vec<Self::Member>>;
}
