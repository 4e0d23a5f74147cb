use pic_field::Scalar;

use crate::error::ConfigError;
use crate::yee::YeeLattice;

/// A fixed-depth ring of [`YeeLattice`] snapshots. `get(0)` is the current,
/// most-recently-completed state; `get(i)` reaches `i` steps into the past,
/// modulo the ring depth. `cycle()` advances the head by one slot; the slot
/// that falls off the back is reused by the next write rather than freed.
pub struct SnapshotRing<S> {
    slots: Vec<YeeLattice<S>>,
    head: usize,
}

impl<S: Scalar> SnapshotRing<S> {
    /// Builds a ring of the given `depth` (at least 1), allocating each slot
    /// with the same extents and ghost width.
    pub fn new(depth: usize, nx: usize, ny: usize, nz: usize, h: usize) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::NonPositiveExtents { nx, ny, nz });
        }
        let slots = (0..depth).map(|_| YeeLattice::new(nx, ny, nz, h)).collect();
        Ok(Self { slots, head: 0 })
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    fn slot_index(&self, i: usize) -> usize {
        (self.head + i) % self.slots.len()
    }

    pub fn get(&self, i: usize) -> &YeeLattice<S> {
        let idx = self.slot_index(i);
        &self.slots[idx]
    }

    pub fn get_mut(&mut self, i: usize) -> &mut YeeLattice<S> {
        let idx = self.slot_index(i);
        &mut self.slots[idx]
    }

    /// Advances the head forward by one slot, conceptually aging the
    /// current snapshot into history. The slot that now falls out of the
    /// retained window keeps its old contents until next overwritten.
    pub fn cycle(&mut self) {
        let depth = self.slots.len();
        self.head = (self.head + depth - 1) % depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_zero_is_current_head() {
        let mut ring = SnapshotRing::<f64>::new(2, 4, 4, 1, 1).unwrap();
        ring.get_mut(0).ex.set(0, 0, 0, 1.0);
        assert_eq!(ring.get(0).ex.at(0, 0, 0), 1.0);
    }

    #[test]
    fn cycle_preserves_distinctness_of_slots() {
        let mut ring = SnapshotRing::<f64>::new(2, 4, 4, 1, 1).unwrap();
        ring.get_mut(0).ex.set(0, 0, 0, 1.0);
        ring.cycle();
        ring.get_mut(0).ex.set(0, 0, 0, 2.0);
        ring.cycle();
        ring.get_mut(0).ex.set(0, 0, 0, 3.0);
        // two cycles on a depth-2 ring bring us back to the original slot,
        // which must have been overwritten, not aliased with the one step
        // back in history.
        assert_eq!(ring.get(0).ex.at(0, 0, 0), 3.0);
        assert_eq!(ring.get(1).ex.at(0, 0, 0), 2.0);
    }

    #[test]
    fn rejects_zero_depth() {
        assert!(SnapshotRing::<f64>::new(0, 4, 4, 1, 1).is_err());
    }
}
