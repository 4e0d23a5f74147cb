use static_assertions::const_assert;

use crate::scalar::Scalar;

// flat_index's bounds checks and offset arithmetic widen `nx`/`ny`/`nz`/`h`
// from `usize` to `i64`; this only stays lossless if `usize` never exceeds
// `i64` in width.
const_assert!(std::mem::size_of::<usize>() <= std::mem::size_of::<i64>());

/// A dense rectilinear scalar buffer indexed by `(i, j, k)` with a ghost band
/// of width `H` surrounding the logical extents `(Nx, Ny, Nz)`.
///
/// Storage is row-major contiguous with `k` varying fastest, so that
/// `copy_face`/`add_face` (which fix `k`) touch contiguous memory. Indices in
/// `[-H, N+H)` along each axis are valid; anything outside that range is a
/// programmer error and panics rather than silently corrupting a neighbour's
/// memory.
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray3<S> {
    nx: usize,
    ny: usize,
    nz: usize,
    h: usize,
    data: Vec<S>,
}

impl<S: Scalar> NdArray3<S> {
    /// Allocates a zero-initialised buffer with logical extents `(nx, ny,
    /// nz)` and ghost width `h`.
    pub fn new(nx: usize, ny: usize, nz: usize, h: usize) -> Self {
        assert!(nx > 0 && ny > 0 && nz > 0, "extents must be strictly positive");
        let len = (nx + 2 * h) * (ny + 2 * h) * (nz + 2 * h);
        Self {
            nx,
            ny,
            nz,
            h,
            data: vec![S::zero(); len],
        }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn nz(&self) -> usize {
        self.nz
    }

    pub fn h(&self) -> usize {
        self.h
    }

    /// Resets every element, including the ghost band, to zero.
    pub fn zero(&mut self) {
        self.data.iter_mut().for_each(|v| *v = S::zero());
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.ny == other.ny && self.nz == other.nz && self.h == other.h
    }

    #[inline]
    fn flat_index(&self, i: i64, j: i64, k: i64) -> usize {
        let h = self.h as i64;
        assert!(
            i >= -h && i < self.nx as i64 + h,
            "i index {i} out of ghost band for Nx={} H={}",
            self.nx,
            self.h
        );
        assert!(
            j >= -h && j < self.ny as i64 + h,
            "j index {j} out of ghost band for Ny={} H={}",
            self.ny,
            self.h
        );
        assert!(
            k >= -h && k < self.nz as i64 + h,
            "k index {k} out of ghost band for Nz={} H={}",
            self.nz,
            self.h
        );

        let ii = (i + h) as usize;
        let jj = (j + h) as usize;
        let kk = (k + h) as usize;
        let stride_i = (self.ny + 2 * self.h) * (self.nz + 2 * self.h);
        let stride_j = self.nz + 2 * self.h;
        ii * stride_i + jj * stride_j + kk
    }

    /// Reads the element at `(i, j, k)`. Panics if any index falls outside
    /// `[-H, N+H)`.
    #[inline]
    pub fn at(&self, i: i64, j: i64, k: i64) -> S {
        self.data[self.flat_index(i, j, k)]
    }

    /// Writes the element at `(i, j, k)`. Panics if any index falls outside
    /// `[-H, N+H)`.
    #[inline]
    pub fn set(&mut self, i: i64, j: i64, k: i64, v: S) {
        let idx = self.flat_index(i, j, k);
        self.data[idx] = v;
    }

    #[inline]
    fn add_at(&mut self, i: i64, j: i64, k: i64, v: S) {
        let idx = self.flat_index(i, j, k);
        self.data[idx] = self.data[idx] + v;
    }

    /// Copies the `(j, k)` plane at `i = src_i` of `src` into the `i = dst_i`
    /// plane of `self`, over the full `j`/`k` range including the ghost band.
    pub fn copy_vert(&mut self, src: &Self, dst_i: i64, src_i: i64) {
        assert!(self.same_shape(src), "copy_vert requires matching Ny/Nz/H");
        let (jlo, jhi) = (-(self.h as i64), self.ny as i64 + self.h as i64);
        let (klo, khi) = (-(self.h as i64), self.nz as i64 + self.h as i64);
        for j in jlo..jhi {
            for k in klo..khi {
                let v = src.at(src_i, j, k);
                self.set(dst_i, j, k, v);
            }
        }
    }

    /// Copies the `(i, k)` plane at `j = src_j` of `src` into the `j = dst_j`
    /// plane of `self`, over the full `i`/`k` range including the ghost band.
    pub fn copy_horz(&mut self, src: &Self, dst_j: i64, src_j: i64) {
        assert!(self.same_shape(src), "copy_horz requires matching Nx/Nz/H");
        let (ilo, ihi) = (-(self.h as i64), self.nx as i64 + self.h as i64);
        let (klo, khi) = (-(self.h as i64), self.nz as i64 + self.h as i64);
        for i in ilo..ihi {
            for k in klo..khi {
                let v = src.at(i, src_j, k);
                self.set(i, dst_j, k, v);
            }
        }
    }

    /// Copies the `(i, j)` plane at `k = src_k` of `src` into the `k = dst_k`
    /// plane of `self`, over the full `i`/`j` range including the ghost band.
    pub fn copy_face(&mut self, src: &Self, dst_k: i64, src_k: i64) {
        assert!(self.same_shape(src), "copy_face requires matching Nx/Ny/H");
        let (ilo, ihi) = (-(self.h as i64), self.nx as i64 + self.h as i64);
        let (jlo, jhi) = (-(self.h as i64), self.ny as i64 + self.h as i64);
        for i in ilo..ihi {
            for j in jlo..jhi {
                let v = src.at(i, j, src_k);
                self.set(i, j, dst_k, v);
            }
        }
    }

    /// Additive variant of [`Self::copy_vert`]: `self[dst_i, j, k] +=
    /// src[src_i, j, k]`.
    pub fn add_vert(&mut self, src: &Self, dst_i: i64, src_i: i64) {
        assert!(self.same_shape(src), "add_vert requires matching Ny/Nz/H");
        let (jlo, jhi) = (-(self.h as i64), self.ny as i64 + self.h as i64);
        let (klo, khi) = (-(self.h as i64), self.nz as i64 + self.h as i64);
        for j in jlo..jhi {
            for k in klo..khi {
                let v = src.at(src_i, j, k);
                self.add_at(dst_i, j, k, v);
            }
        }
    }

    /// Additive variant of [`Self::copy_horz`].
    pub fn add_horz(&mut self, src: &Self, dst_j: i64, src_j: i64) {
        assert!(self.same_shape(src), "add_horz requires matching Nx/Nz/H");
        let (ilo, ihi) = (-(self.h as i64), self.nx as i64 + self.h as i64);
        let (klo, khi) = (-(self.h as i64), self.nz as i64 + self.h as i64);
        for i in ilo..ihi {
            for k in klo..khi {
                let v = src.at(i, src_j, k);
                self.add_at(i, dst_j, k, v);
            }
        }
    }

    /// Additive variant of [`Self::copy_face`].
    pub fn add_face(&mut self, src: &Self, dst_k: i64, src_k: i64) {
        assert!(self.same_shape(src), "add_face requires matching Nx/Ny/H");
        let (ilo, ihi) = (-(self.h as i64), self.nx as i64 + self.h as i64);
        let (jlo, jhi) = (-(self.h as i64), self.ny as i64 + self.h as i64);
        for i in ilo..ihi {
            for j in jlo..jhi {
                let v = src.at(i, j, src_k);
                self.add_at(i, j, dst_k, v);
            }
        }
    }

    /// Copies the `k`-pencil at fixed `(src_i, src_j)` of `src` into the
    /// pencil at `(dst_i, dst_j)` of `self`, over the full ghosted `k` range.
    pub fn copy_zdir_pencil(&mut self, src: &Self, dst_i: i64, dst_j: i64, src_i: i64, src_j: i64) {
        assert!(self.same_shape(src), "copy_zdir_pencil requires matching Nz/H");
        let (klo, khi) = (-(self.h as i64), self.nz as i64 + self.h as i64);
        for k in klo..khi {
            let v = src.at(src_i, src_j, k);
            self.set(dst_i, dst_j, k, v);
        }
    }

    /// Additive variant of [`Self::copy_zdir_pencil`].
    pub fn add_zdir_pencil(&mut self, src: &Self, dst_i: i64, dst_j: i64, src_i: i64, src_j: i64) {
        assert!(self.same_shape(src), "add_zdir_pencil requires matching Nz/H");
        let (klo, khi) = (-(self.h as i64), self.nz as i64 + self.h as i64);
        for k in klo..khi {
            let v = src.at(src_i, src_j, k);
            self.add_at(dst_i, dst_j, k, v);
        }
    }

    /// Copies the `i`-pencil at fixed `(src_j, src_k)` of `src` into the
    /// pencil at `(dst_j, dst_k)` of `self`, over the full ghosted `i` range.
    pub fn copy_xdir_pencil(&mut self, src: &Self, dst_j: i64, dst_k: i64, src_j: i64, src_k: i64) {
        assert!(self.same_shape(src), "copy_xdir_pencil requires matching Nx/H");
        let (ilo, ihi) = (-(self.h as i64), self.nx as i64 + self.h as i64);
        for i in ilo..ihi {
            let v = src.at(i, src_j, src_k);
            self.set(i, dst_j, dst_k, v);
        }
    }

    /// Additive variant of [`Self::copy_xdir_pencil`].
    pub fn add_xdir_pencil(&mut self, src: &Self, dst_j: i64, dst_k: i64, src_j: i64, src_k: i64) {
        assert!(self.same_shape(src), "add_xdir_pencil requires matching Nx/H");
        let (ilo, ihi) = (-(self.h as i64), self.nx as i64 + self.h as i64);
        for i in ilo..ihi {
            let v = src.at(i, src_j, src_k);
            self.add_at(i, dst_j, dst_k, v);
        }
    }

    /// Copies the `j`-pencil at fixed `(src_i, src_k)` of `src` into the
    /// pencil at `(dst_i, dst_k)` of `self`, over the full ghosted `j` range.
    pub fn copy_ydir_pencil(&mut self, src: &Self, dst_i: i64, dst_k: i64, src_i: i64, src_k: i64) {
        assert!(self.same_shape(src), "copy_ydir_pencil requires matching Ny/H");
        let (jlo, jhi) = (-(self.h as i64), self.ny as i64 + self.h as i64);
        for j in jlo..jhi {
            let v = src.at(src_i, j, src_k);
            self.set(dst_i, j, dst_k, v);
        }
    }

    /// Additive variant of [`Self::copy_ydir_pencil`].
    pub fn add_ydir_pencil(&mut self, src: &Self, dst_i: i64, dst_k: i64, src_i: i64, src_k: i64) {
        assert!(self.same_shape(src), "add_ydir_pencil requires matching Ny/H");
        let (jlo, jhi) = (-(self.h as i64), self.ny as i64 + self.h as i64);
        for j in jlo..jhi {
            let v = src.at(src_i, j, src_k);
            self.add_at(dst_i, j, dst_k, v);
        }
    }

    /// Copies the single point `(src_i, src_j, src_k)` of `src` into
    /// `(dst_i, dst_j, dst_k)` of `self`. This is the corner primitive needed
    /// when a halo direction fixes all three axes.
    pub fn copy_point(&mut self, src: &Self, dst_i: i64, dst_j: i64, dst_k: i64, src_i: i64, src_j: i64, src_k: i64) {
        let v = src.at(src_i, src_j, src_k);
        self.set(dst_i, dst_j, dst_k, v);
    }

    /// Additive variant of [`Self::copy_point`].
    pub fn add_point(&mut self, src: &Self, dst_i: i64, dst_j: i64, dst_k: i64, src_i: i64, src_j: i64, src_k: i64) {
        let v = src.at(src_i, src_j, src_k);
        self.add_at(dst_i, dst_j, dst_k, v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let a = NdArray3::<f64>::new(4, 3, 2, 1);
        for i in -1..5 {
            for j in -1..4 {
                for k in -1..3 {
                    assert_eq!(a.at(i, j, k), 0.0);
                }
            }
        }
    }

    #[test]
    fn set_and_at_roundtrip() {
        let mut a = NdArray3::<f64>::new(4, 4, 4, 2);
        a.set(-2, 3, -1, 7.5);
        assert_eq!(a.at(-2, 3, -1), 7.5);
        // unrelated cells stay zero
        assert_eq!(a.at(0, 0, 0), 0.0);
    }

    #[test]
    #[should_panic]
    fn out_of_band_read_panics() {
        let a = NdArray3::<f64>::new(4, 4, 4, 1);
        a.at(-2, 0, 0);
    }

    #[test]
    fn copy_vert_transfers_full_plane_including_ghosts() {
        let mut src = NdArray3::<f64>::new(4, 4, 4, 1);
        for j in -1..5 {
            for k in -1..5 {
                src.set(2, j, k, (j * 10 + k) as f64);
            }
        }
        let mut dst = NdArray3::<f64>::new(4, 4, 4, 1);
        dst.copy_vert(&src, -1, 3);
        for j in -1..5 {
            for k in -1..5 {
                assert_eq!(dst.at(-1, j, k), (j * 10 + k) as f64);
            }
        }
    }

    #[test]
    fn add_vert_accumulates() {
        let mut src = NdArray3::<f64>::new(4, 4, 4, 1);
        src.set(0, 0, 0, 1.0);
        let mut dst = NdArray3::<f64>::new(4, 4, 4, 1);
        dst.set(-1, 0, 0, 5.0);
        dst.add_vert(&src, -1, 0);
        assert_eq!(dst.at(-1, 0, 0), 6.0);
    }

    #[test]
    fn copy_zdir_pencil_is_restricted_to_one_column() {
        let mut src = NdArray3::<f64>::new(4, 4, 4, 1);
        for k in -1..5 {
            src.set(1, 1, k, k as f64);
        }
        let mut dst = NdArray3::<f64>::new(4, 4, 4, 1);
        dst.copy_zdir_pencil(&src, 2, 2, 1, 1);
        for k in -1..5 {
            assert_eq!(dst.at(2, 2, k), k as f64);
        }
        // neighbouring pencil untouched
        assert_eq!(dst.at(2, 3, 0), 0.0);
    }

    #[test]
    fn copy_is_idempotent() {
        let mut src = NdArray3::<f64>::new(4, 4, 4, 1);
        src.set(0, 0, 0, 3.0);
        let mut dst = NdArray3::<f64>::new(4, 4, 4, 1);
        dst.copy_face(&src, -1, 0);
        let once = dst.clone();
        dst.copy_face(&src, -1, 0);
        assert_eq!(dst, once);
    }
}
