//! Strongly-typed identifiers for regions, elements, and workers.

use std::fmt;

/// Identifies a region (block) of the domain decomposition.
///
/// Regions are contiguous, non-overlapping parts of the spatial domain;
/// every element belongs to exactly one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RegionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a single element within the domain.
///
/// Element ids are dense and ordered; traversal ranges are contiguous
/// spans of element ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a worker thread in the traversal pool.
///
/// Worker ids run `0..N-1` where `N` is the pool size fixed at engine
/// creation. Per-worker state (scratch buffers, active-set views) is
/// indexed by this id and sized once, never resized concurrently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub usize);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for WorkerId {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
