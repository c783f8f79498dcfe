//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use super::node::Tree;
use crate::{
    Classifier,
    Member,
    Sample,
};


/// Decision tree classifier.
/// This struct is just a wrapper of the grown tree
/// together with the label domain and the width of its training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Tree,
    classes: Vec<i64>,
    n_feature: usize,
}


impl DecisionTreeClassifier {
    pub(crate) fn new(tree: Tree, classes: Vec<i64>, n_feature: usize)
        -> Self
    {
        Self { tree, classes, n_feature, }
    }


    /// Returns the length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }


    /// Returns the number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.tree.n_leaves()
    }
}


impl Classifier for DecisionTreeClassifier {
    fn predict(&self, sample: &Sample, row: usize) -> i64 {
        self.tree.predict(sample, row)
    }
}


impl Member for DecisionTreeClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes[..]
    }

    fn n_feature(&self) -> usize {
        self.n_feature
    }
}
