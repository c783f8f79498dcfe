//! A node struct used in the decision tree algorithm.
use serde::{Serialize, Deserialize};

use crate::{
    common::tree::*,
    Sample,
};


/// Index of the root node in `Tree::nodes`.
pub(crate) const ROOT: usize = 0;


/// Children are referred to by their positions in `Tree::nodes`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub(crate) enum Node {
    Branch {
        splitter: Splitter,
        left:     usize,
        right:    usize,
    },
    Leaf {
        label: i64,
    },
}

impl Node {
    pub(crate) fn branch(splitter: Splitter, left: usize, right: usize)
        -> Self
    {
        Self::Branch { splitter, left, right, }
    }

    pub(crate) fn leaf(label: i64) -> Self {
        Self::Leaf { label, }
    }
}


/// A tree stored as a flat array of nodes.
/// The root is at `ROOT`.
/// Walking the tree never recurses, so its depth is only bounded by memory.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes, }
    }

    /// Walks down to the leaf that `row` falls in.
    pub(crate) fn predict(&self, sample: &Sample, row: usize) -> i64 {
        let mut pos = ROOT;
        loop {
            match &self.nodes[pos] {
                Node::Branch { splitter, left, right, } => {
                    pos = match splitter.split(sample, row) {
                        LeftRight::Left  => *left,
                        LeftRight::Right => *right,
                    };
                },
                Node::Leaf { label, } => { return *label; },
            }
        }
    }

    pub(crate) fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 0_usize)];
        while let Some((pos, depth)) = stack.pop() {
            match &self.nodes[pos] {
                Node::Branch { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                },
                Node::Leaf { .. } => { deepest = deepest.max(depth); },
            }
        }
        deepest
    }

    pub(crate) fn n_leaves(&self) -> usize {
        self.nodes.iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }
}
