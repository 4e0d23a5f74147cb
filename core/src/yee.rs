use pic_field::{NdArray3, Scalar};
use pic_maybe_rayon::*;

/// Twelve staggered [`NdArray3`] buffers sharing one set of extents and one
/// ghost band: the electric and magnetic field components, the live current
/// density, and a secondary current buffer used for double-buffered
/// deposition (see [`crate::tile::Tile::cycle_current`]).
///
/// Staggering (half-cell offsets relative to the cell origin `(i, j, k)`):
/// - `ex` at `(i+1/2, j, k)`, `ey` at `(i, j+1/2, k)`, `ez` at `(i, j, k+1/2)`
/// - `bx` at `(i, j+1/2, k+1/2)`, `by` at `(i+1/2, j, k+1/2)`, `bz` at `(i+1/2, j+1/2, k)`
/// - `jx, jy, jz` are co-located with `ex, ey, ez`.
pub struct YeeLattice<S> {
    pub ex: NdArray3<S>,
    pub ey: NdArray3<S>,
    pub ez: NdArray3<S>,
    pub bx: NdArray3<S>,
    pub by: NdArray3<S>,
    pub bz: NdArray3<S>,
    pub jx: NdArray3<S>,
    pub jy: NdArray3<S>,
    pub jz: NdArray3<S>,
    pub jx1: NdArray3<S>,
    pub jy1: NdArray3<S>,
    pub jz1: NdArray3<S>,
}

impl<S: Scalar> YeeLattice<S> {
    pub fn new(nx: usize, ny: usize, nz: usize, h: usize) -> Self {
        let buf = || NdArray3::new(nx, ny, nz, h);
        Self {
            ex: buf(),
            ey: buf(),
            ez: buf(),
            bx: buf(),
            by: buf(),
            bz: buf(),
            jx: buf(),
            jy: buf(),
            jz: buf(),
            jx1: buf(),
            jy1: buf(),
            jz1: buf(),
        }
    }

    pub fn nx(&self) -> usize {
        self.ex.nx()
    }

    pub fn ny(&self) -> usize {
        self.ex.ny()
    }

    pub fn nz(&self) -> usize {
        self.ex.nz()
    }

    pub fn h(&self) -> usize {
        self.ex.h()
    }

    /// Resets all twelve buffers. The buffers are independent allocations,
    /// so this fans out across them with [`pic_maybe_rayon`] rather than
    /// zeroing one at a time.
    pub fn zero(&mut self) {
        let mut bufs: [&mut NdArray3<S>; 12] = [
            &mut self.ex,
            &mut self.ey,
            &mut self.ez,
            &mut self.bx,
            &mut self.by,
            &mut self.bz,
            &mut self.jx,
            &mut self.jy,
            &mut self.jz,
            &mut self.jx1,
            &mut self.jy1,
            &mut self.jz1,
        ];
        bufs.par_iter_mut().for_each(|buf| buf.zero());
    }

    /// Swaps the live current buffer with the scratch buffer, by reference
    /// rather than by copying element-wise.
    pub fn cycle_current(&mut self) {
        std::mem::swap(&mut self.jx, &mut self.jx1);
        std::mem::swap(&mut self.jy, &mut self.jy1);
        std::mem::swap(&mut self.jz, &mut self.jz1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed_and_shares_extents() {
        let yee = YeeLattice::<f64>::new(4, 5, 6, 2);
        assert_eq!((yee.nx(), yee.ny(), yee.nz(), yee.h()), (4, 5, 6, 2));
        assert_eq!(yee.bz.at(0, 0, 0), 0.0);
    }

    #[test]
    fn cycle_current_swaps_without_touching_fields() {
        let mut yee = YeeLattice::<f64>::new(4, 4, 4, 1);
        yee.jx.set(0, 0, 0, 7.0);
        yee.jx1.set(0, 0, 0, 2.0);
        yee.ex.set(0, 0, 0, 9.0);
        yee.cycle_current();
        assert_eq!(yee.jx.at(0, 0, 0), 2.0);
        assert_eq!(yee.jx1.at(0, 0, 0), 7.0);
        assert_eq!(yee.ex.at(0, 0, 0), 9.0);
    }
}
