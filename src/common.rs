//! Defines some common functions used in this library.

/// Defines some checker functions.
pub(crate) mod checker;

/// Defines the small types shared by tree algorithms.
pub(crate) mod tree;
