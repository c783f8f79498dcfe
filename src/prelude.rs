//! Exports the standard structs and traits.
//! 
pub use crate::forest::IncrementalForest;


pub use crate::hypothesis::{
    Ballot,
    Classifier,
    Member,
    WeightedMajority,
};


pub use crate::trainer::{
    // Trainer trait
    MemberTrainer,


    // Decision tree members
    DecisionTreeClassifier,
    SplitBy,


    // Bagged forest
    MaxFeatures,
    RandomForest,
    RandomForestBuilder,
};


pub use crate::sample::{
    Feature,
    Sample,
    SampleReader,
};


pub use crate::error::{
    EnsembleError,
    Result,
};
