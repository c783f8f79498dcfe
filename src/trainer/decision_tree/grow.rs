use rand::prelude::*;
use rand::seq::index;

use std::cmp::Ordering;

use super::node::{Node, Tree, ROOT};
use super::split_by::{SplitBy, LabelToWeight};
use crate::{
    common::tree::*,
    Sample,
};


/// Outcome of growing a single node.
enum Grown {
    Leaf(i64),
    Branch(Splitter, Vec<usize>, Vec<usize>),
}


/// Grows one tree on a (resampled) set of rows.
pub(crate) struct TreeGrower<'a> {
    sample:            &'a Sample,
    split_by:          SplitBy,
    max_features:      usize,
    min_samples_split: usize,
}


impl<'a> TreeGrower<'a> {
    #[inline]
    pub(crate) fn new(
        sample:            &'a Sample,
        split_by:          SplitBy,
        max_features:      usize,
        min_samples_split: usize,
    ) -> Self
    {
        Self { sample, split_by, max_features, min_samples_split, }
    }


    /// Construct a tree of depth at most `depth`
    /// on the rows `indices`.
    /// A row may appear several times in `indices`.
    ///
    /// Nodes are grown from a work-list in depth-first order,
    /// left child first.
    pub(crate) fn grow<R: Rng>(
        &self,
        rng:     &mut R,
        indices: Vec<usize>,
        depth:   Depth,
    ) -> Tree
    {
        // Every pending node holds a placeholder until it is grown.
        let mut nodes = vec![Node::leaf(0)];
        let mut stack = vec![(ROOT, indices, depth)];

        while let Some((pos, indices, depth)) = stack.pop() {
            let node = match self.split_node(rng, indices, depth) {
                Grown::Leaf(label) => Node::leaf(label),
                Grown::Branch(rule, lindices, rindices) => {
                    let left = nodes.len();
                    let right = left + 1;
                    nodes.push(Node::leaf(0));
                    nodes.push(Node::leaf(0));

                    let depth = depth - 1;
                    stack.push((right, rindices, depth));
                    stack.push((left,  lindices, depth));
                    Node::branch(rule, left, right)
                },
            };
            nodes[pos] = node;
        }

        Tree::from_nodes(nodes)
    }


    /// Decide whether the node on `indices` is a leaf,
    /// or find its splitting rule and the rows of the children.
    fn split_node<R: Rng>(
        &self,
        rng:     &mut R,
        indices: Vec<usize>,
        depth:   Depth,
    ) -> Grown
    {
        let counts = label_counts(self.sample, &indices[..]);
        let label = majority(&counts);

        // Pure nodes, small nodes, and the deepest nodes are leaves.
        if counts.len() < 2
            || depth < 1
            || indices.len() < self.min_samples_split
        {
            return Grown::Leaf(label);
        }

        let parent_impurity = self.split_by.impurity(&counts);
        let best = self.best_split(rng, &indices[..], &counts);
        let (feature, threshold) = match best {
            Some((feature, threshold, score)) if score < parent_impurity => {
                (feature, threshold)
            },
            _ => { return Grown::Leaf(label); },
        };

        let rule = Splitter::new(feature, threshold);

        // Split the train data for left/right childrens
        let mut lindices = Vec::new();
        let mut rindices = Vec::new();
        for i in indices {
            match rule.split(self.sample, i) {
                LeftRight::Left  => { lindices.push(i); },
                LeftRight::Right => { rindices.push(i); },
            }
        }

        // If the split has no meaning, construct a leaf node.
        if lindices.is_empty() || rindices.is_empty() {
            return Grown::Leaf(label);
        }

        Grown::Branch(rule, lindices, rindices)
    }


    /// Returns `(feature, threshold, score)` minimizing the child impurity
    /// over `max_features` randomly chosen features.
    /// Ties go to the lower feature index.
    fn best_split<R: Rng>(
        &self,
        rng:     &mut R,
        indices: &[usize],
        counts:  &LabelToWeight,
    ) -> Option<(usize, f64, f64)>
    {
        let n_feature = self.sample.shape().1;
        let amount = self.max_features.min(n_feature);
        let target = self.sample.target();

        let mut features = index::sample(rng, n_feature, amount).into_vec();
        features.sort_unstable();

        features.into_iter()
            .filter_map(|feature| {
                let mut pairs = indices.iter()
                    .map(|&i| (self.sample.value(i, feature), target[i]))
                    .collect::<Vec<_>>();
                pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

                self.split_by.best_threshold(&pairs[..], counts)
                    .map(|(threshold, score)| (feature, threshold, score))
            })
            .min_by(|a, b| {
                a.2.total_cmp(&b.2)
                    .then(a.0.cmp(&b.0))
            })
    }
}


fn label_counts(sample: &Sample, indices: &[usize]) -> LabelToWeight {
    let target = sample.target();
    let mut counts = LabelToWeight::new();
    for &i in indices {
        *counts.entry(target[i]).or_insert(0f64) += 1f64;
    }
    counts
}


/// The most frequent label, the lowest one on ties.
fn majority(counts: &LabelToWeight) -> i64 {
    counts.iter()
        .fold(None, |best: Option<(i64, f64)>, (&y, &w)| {
            match best {
                Some((_, bw)) if bw.partial_cmp(&w) != Some(Ordering::Less) => best,
                _ => Some((y, w)),
            }
        })
        .map(|(y, _)| y)
        .unwrap_or_default()
}


#[cfg(test)]
mod tests {
    use super::*;

    // Toy example  (0/1 are the labels)
    //
    //  1 |  0     1
    //    |
    //  0 |  0     1
    //    +-----------
    //       0     1
    fn toy_sample() -> Sample {
        Sample::from_rows(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]])
            .unwrap()
            .with_target(vec![0, 0, 1, 1])
            .unwrap()
    }

    #[test]
    fn test_majority_tie() {
        let counts = LabelToWeight::from([(4, 2f64), (1, 2f64), (9, 1f64)]);
        assert_eq!(majority(&counts), 1);
    }

    #[test]
    fn test_grow_separable() {
        let sample = toy_sample();
        let grower = TreeGrower::new(&sample, SplitBy::Gini, 2, 2);
        let mut rng = StdRng::seed_from_u64(0);
        let tree = grower.grow(&mut rng, (0..4).collect(), Depth::from(5));

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.n_leaves(), 2);
        for row in 0..4 {
            assert_eq!(tree.predict(&sample, row), sample.target()[row]);
        }
    }

    #[test]
    fn test_grow_depth_zero_is_a_leaf() {
        let sample = toy_sample();
        let grower = TreeGrower::new(&sample, SplitBy::Entropy, 2, 2);
        let mut rng = StdRng::seed_from_u64(0);
        let tree = grower.grow(&mut rng, (0..4).collect(), Depth::from(0));

        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.predict(&sample, 3), 0);
    }
}
