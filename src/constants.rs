//! Default values used by the builders in this crate.

/// Vote weight given to a batch when the caller does not pick one.
pub const DEFAULT_WEIGHT:            u32   = 1;
/// Base seed of [`IncrementalForest`](crate::IncrementalForest).
pub const DEFAULT_SEED:              u64   = 42;
/// Number of members trained per batch by default.
pub const DEFAULT_N_MEMBERS:         usize = 100;
/// A node with fewer rows than this becomes a leaf.
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;

pub(crate) const BUFFER_SIZE:        usize = 256;
