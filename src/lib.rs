#![warn(missing_docs)]

//! 
//! A crate that provides an incrementally updatable random forest.
//! 
//! A forest trained on old data can absorb new data later on.
//! Instead of retraining, a new batch of trees is trained
//! on the new data and appended to the forest.
//! Each batch carries an integer vote weight,
//! so that the new data can influence the prediction
//! more than the old one.
//! 
//! The prediction is the **weighted majority vote**:
//! each tree casts one vote per example,
//! counted as many times as its weight,
//! and the most voted label wins.
//! Ties go to the lowest label.
//! 
//! - [`WeightedMajority`] is the ensemble itself.
//!     It stores the members and their weights
//!     and computes the vote.
//! - [`MemberTrainer`] is the trait of the trainers
//!     that produce a batch of members.
//!     [`RandomForest`] is the bagged decision tree trainer
//!     shipped with this crate.
//! - [`IncrementalForest`] combines a trainer and an ensemble.
//! 
//! # Example
//! ```no_run
//! use incforest::prelude::*;
//! 
//! let read = |file| SampleReader::default()
//!     .file(file)
//!     .has_header(true)
//!     .target_feature("class")
//!     .read()
//!     .unwrap();
//! let old = read("/path/to/old.csv");
//! let new = read("/path/to/new.csv");
//! let test = read("/path/to/test.csv");
//! 
//! let trainer = RandomForestBuilder::new()
//!     .max_depth(10)
//!     .build()
//!     .unwrap();
//! let mut forest = IncrementalForest::new(trainer, 100)
//!     .unwrap()
//!     .seed(0);
//! 
//! forest.fit(&old, 1).unwrap();
//! forest.update(&new, 2).unwrap();
//! 
//! let accuracy = forest.score(&test).unwrap();
//! println!("accuracy: {accuracy}");
//! ```

pub mod constants;
pub mod error;
pub mod sample;
pub mod hypothesis;
pub mod trainer;
pub mod forest;
pub mod research;
pub mod prelude;

mod common;


pub use error::{EnsembleError, Result};

pub use sample::{
    Feature,
    Sample,
    SampleReader,
};

pub use hypothesis::{
    Ballot,
    Classifier,
    Member,
    WeightedMajority,
};

pub use trainer::{
    DecisionTreeClassifier,
    MaxFeatures,
    MemberTrainer,
    RandomForest,
    RandomForestBuilder,
    SplitBy,
};

pub use forest::IncrementalForest;
