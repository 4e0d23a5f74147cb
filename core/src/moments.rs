use pic_field::{NdArray3, Scalar};

/// Per-species velocity-moment buffers written by the external particle
/// analysis pass: number density, the three bulk-velocity components, and
/// the six independent components of the pressure tensor. The core only
/// allocates and zeroes these; it never reads or writes them itself.
pub struct PlasmaMomentLattice<S> {
    pub rho: NdArray3<S>,
    pub vx: NdArray3<S>,
    pub vy: NdArray3<S>,
    pub vz: NdArray3<S>,
    pub pxx: NdArray3<S>,
    pub pyy: NdArray3<S>,
    pub pzz: NdArray3<S>,
    pub pxy: NdArray3<S>,
    pub pxz: NdArray3<S>,
    pub pyz: NdArray3<S>,
}

impl<S: Scalar> PlasmaMomentLattice<S> {
    pub fn new(nx: usize, ny: usize, nz: usize, h: usize) -> Self {
        Self {
            rho: NdArray3::new(nx, ny, nz, h),
            vx: NdArray3::new(nx, ny, nz, h),
            vy: NdArray3::new(nx, ny, nz, h),
            vz: NdArray3::new(nx, ny, nz, h),
            pxx: NdArray3::new(nx, ny, nz, h),
            pyy: NdArray3::new(nx, ny, nz, h),
            pzz: NdArray3::new(nx, ny, nz, h),
            pxy: NdArray3::new(nx, ny, nz, h),
            pxz: NdArray3::new(nx, ny, nz, h),
            pyz: NdArray3::new(nx, ny, nz, h),
        }
    }

    pub fn zero(&mut self) {
        self.rho.zero();
        self.vx.zero();
        self.vy.zero();
        self.vz.zero();
        self.pxx.zero();
        self.pyy.zero();
        self.pzz.zero();
        self.pxy.zero();
        self.pxz.zero();
        self.pyz.zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let m = PlasmaMomentLattice::<f64>::new(4, 4, 1, 1);
        assert_eq!(m.rho.at(0, 0, 0), 0.0);
        assert_eq!(m.pxy.at(0, 0, 0), 0.0);
    }
}
