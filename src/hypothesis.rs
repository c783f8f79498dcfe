//! The core library for `Classifier` traits
//! and the weighted majority vote over them.

pub(crate) mod hypothesis_traits;
pub(crate) mod weighted_majority;


pub use hypothesis_traits::{
    Classifier,
    Member,
};

pub use weighted_majority::{
    Ballot,
    WeightedMajority,
};
