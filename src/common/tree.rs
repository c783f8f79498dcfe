//! This file defines some tools for tree algorithms
use serde::{Serialize, Deserialize};
use std::{fmt, cmp, ops};
use crate::Sample;


/// Struct `Depth` defines the remaining depth of a tree.
/// This is just a wrapper for `usize`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Depth(usize);

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == usize::MAX {
            write!(f, "unbounded")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<usize> for Depth {
    fn from(depth: usize) -> Self {
        Self(depth)
    }
}

impl ops::Sub<usize> for Depth {
    type Output = Self;
    /// The subtraction saturates at `0`.
    #[inline]
    fn sub(self, other: usize) -> Self::Output {
        Self(self.0.saturating_sub(other))
    }
}

impl cmp::PartialEq<usize> for Depth {
    #[inline]
    fn eq(&self, rhs: &usize) -> bool {
        self.0.eq(rhs)
    }
}

impl cmp::PartialOrd<usize> for Depth {
    #[inline]
    fn partial_cmp(&self, other: &usize) -> Option<cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRight {
    Left,
    Right,
}


/// A threshold test on one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    pub feature: usize,
    pub threshold: f64,
}

impl Splitter {
    #[inline]
    pub fn new(feature: usize, threshold: f64) -> Self {
        Self { feature, threshold, }
    }

    /// Defines the splitting.
    #[inline]
    pub fn split(&self, sample: &Sample, row: usize) -> LeftRight {
        let value = sample.value(row, self.feature);

        if value < self.threshold { LeftRight::Left } else { LeftRight::Right }
    }
}
