//! Thread-local per-element contribution buffer.

use smallvec::SmallVec;

/// Accumulates one element's locally computed contributions before the
/// synchronized commit.
///
/// Entries pair a global solution slot with a value to add. The buffer
/// is owned by a single worker, cleared between elements, and only ever
/// read by the aggregator inside its critical section — so the commit
/// cost is bounded by the entries one element touches, never by the
/// element count.
#[derive(Clone, Debug, Default)]
pub struct ElementScratch {
    entries: SmallVec<[(usize, f64); 8]>,
}

impl ElementScratch {
    /// Create an empty scratch buffer.
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Add `value` to the contribution for global `slot`.
    ///
    /// Repeated accumulation into the same slot within one element is
    /// folded locally, keeping the committed entry list minimal.
    pub fn accumulate(&mut self, slot: usize, value: f64) {
        for entry in &mut self.entries {
            if entry.0 == slot {
                entry.1 += value;
                return;
            }
        }
        self.entries.push((slot, value));
    }

    /// The accumulated `(slot, value)` pairs, in first-touch order.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of distinct slots touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no contribution has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard all accumulated entries. Called between elements.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_folds_repeated_slots() {
        let mut scratch = ElementScratch::new();
        scratch.accumulate(3, 1.0);
        scratch.accumulate(7, 2.0);
        scratch.accumulate(3, 0.5);

        assert_eq!(scratch.len(), 2);
        assert_eq!(scratch.entries(), &[(3, 1.5), (7, 2.0)]);
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut scratch = ElementScratch::new();
        scratch.accumulate(0, 1.0);
        assert!(!scratch.is_empty());
        scratch.clear();
        assert!(scratch.is_empty());
        assert_eq!(scratch.entries(), &[]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeMap;

        proptest! {
            // Folding repeated slots must not change the per-slot sums
            // (integer values, so addition order cannot matter).
            #[test]
            fn folding_preserves_per_slot_sums(
                writes in prop::collection::vec((0usize..8, -50i32..50), 0..32),
            ) {
                let mut scratch = ElementScratch::new();
                let mut reference: BTreeMap<usize, f64> = BTreeMap::new();
                for &(slot, value) in &writes {
                    scratch.accumulate(slot, f64::from(value));
                    *reference.entry(slot).or_insert(0.0) += f64::from(value);
                }

                let folded: BTreeMap<usize, f64> =
                    scratch.entries().iter().copied().collect();
                prop_assert_eq!(folded, reference);
                prop_assert!(scratch.len() <= 8);
            }
        }
    }
}
