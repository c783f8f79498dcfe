/// Defines the classifier grown by a trainer.
pub mod dtree_classifier;

/// Defines the inner representations of `DecisionTreeClassifier`.
mod node;
mod split_by;
mod grow;


pub use dtree_classifier::DecisionTreeClassifier;
pub use split_by::SplitBy;

pub(crate) use grow::TreeGrower;
