//! The synchronized state aggregator.

use parking_lot::Mutex;
use tessera_kernel::ElementScratch;

/// Shared global solution buffer, mutated only inside [`commit`]'s
/// critical section.
///
/// One named lock guards the whole buffer. The critical section covers
/// only the merge of already-locally-computed values — never a kernel's
/// compute step — so its cost is bounded by the entries one element
/// touches, not by the element count. Exactly one thread commits at a
/// time; the guard is released on every exit path.
///
/// [`commit`]: SharedSolution::commit
pub struct SharedSolution {
    len: usize,
    values: Mutex<Vec<f64>>,
}

impl SharedSolution {
    /// Create a zero-initialized buffer of `len` solution slots.
    pub fn zeroed(len: usize) -> Self {
        Self {
            len,
            values: Mutex::new(vec![0.0; len]),
        }
    }

    /// Number of solution slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer has zero slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Merge one element's thread-local contribution into the buffer.
    ///
    /// Entries with out-of-range slots are a caller contract violation
    /// and are dropped rather than held across an error.
    pub fn commit(&self, scratch: &ElementScratch) {
        let mut values = self.values.lock();
        for &(slot, value) in scratch.entries() {
            debug_assert!(slot < values.len(), "contribution slot {slot} out of range");
            if let Some(cell) = values.get_mut(slot) {
                *cell += value;
            }
        }
    }

    /// Copy of the current buffer contents.
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.lock().clone()
    }

    /// Consume the aggregator and return the final buffer.
    pub fn into_values(self) -> Vec<f64> {
        self.values.into_inner()
    }
}
