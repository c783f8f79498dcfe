/// Defines the bagged forest trainer.
pub mod rforest;
/// Defines the builder of `RandomForest`.
pub mod builder;


pub use rforest::{MaxFeatures, RandomForest};
pub use builder::RandomForestBuilder;
