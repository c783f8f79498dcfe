//! The files in `trainer/` directory defines
//! `MemberTrainer` trait and the trainers.

/// Provides MemberTrainer trait.
pub mod core;

/// Defines Decision Tree members.
pub mod decision_tree;

/// Defines the bagged forest trainer.
pub mod random_forest;


pub use self::core::MemberTrainer;

pub use self::decision_tree::{
    DecisionTreeClassifier,
    SplitBy,
};

pub use self::random_forest::{
    MaxFeatures,
    RandomForest,
    RandomForestBuilder,
};
