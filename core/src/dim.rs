use std::fmt;

use crate::error::ConfigError;

/// Spatial dimensionality of a tile. Chosen as a runtime enum rather than a
/// const generic so a single binary can host mixed-dimension topologies
/// (e.g. a 1D test harness alongside a 3D production mesh) and so halo
/// directions can be enumerated without per-`D` monomorphised code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dim {
    D1,
    D2,
    D3,
}

impl Dim {
    pub fn from_usize(d: usize) -> Result<Self, ConfigError> {
        match d {
            1 => Ok(Dim::D1),
            2 => Ok(Dim::D2),
            3 => Ok(Dim::D3),
            _ => Err(ConfigError::UnsupportedDimension { d }),
        }
    }

    pub const fn as_usize(self) -> usize {
        match self {
            Dim::D1 => 1,
            Dim::D2 => 2,
            Dim::D3 => 3,
        }
    }

    /// Upper bound on `cfl` for stability of the leapfrog update:
    /// `cfl <= 1 / sqrt(D)`.
    pub fn cfl_bound(self) -> f64 {
        1.0 / (self.as_usize() as f64).sqrt()
    }

    /// All `3^D - 1` nonzero direction vectors reachable in this
    /// dimensionality, each component in `{-1, 0, 1}` and padded with
    /// trailing zeros for axes this dimensionality does not use.
    pub fn directions(self) -> Vec<[i8; 3]> {
        let d = self.as_usize();
        let mut out = Vec::with_capacity(3usize.pow(d as u32) - 1);
        let range = [-1i8, 0, 1];
        for &dx in &range {
            for &dy in if d >= 2 { &range[..] } else { &[0i8][..] } {
                for &dz in if d >= 3 { &range[..] } else { &[0i8][..] } {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    out.push([dx, dy, dz]);
                }
            }
        }
        out
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.as_usize())
    }
}
