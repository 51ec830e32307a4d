//! Contiguous spans of element ids.

use tessera_core::ElementId;

/// A half-open, contiguous range of element ids `[start, end)`.
///
/// Traversal tasks cover one range each; a task above the grain
/// threshold splits into two sibling halves until leaves are small
/// enough to execute directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementRange {
    start: u64,
    end: u64,
}

impl ElementRange {
    /// Create a range covering `[start, end)`. An inverted range is
    /// treated as empty.
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// First element id in the range.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// One past the last element id.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of elements covered.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the range covers no elements.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Split at the midpoint into two sibling halves.
    pub fn halves(&self) -> (Self, Self) {
        let mid = self.start + self.len() / 2;
        (Self::new(self.start, mid), Self::new(mid, self.end))
    }

    /// Element ids in range order.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> {
        (self.start..self.end).map(ElementId)
    }
}
