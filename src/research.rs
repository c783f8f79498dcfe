//! Tools for experiments:
//! a batch-by-batch logger and a confusion matrix.

/// Defines the logger that drives an `IncrementalForest`.
pub mod logger;

/// Defines the confusion matrix.
pub mod confusion_matrix;


pub use logger::Logger;
pub use confusion_matrix::ConfusionMatrix;
