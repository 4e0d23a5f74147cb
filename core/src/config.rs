use crate::dim::Dim;
use crate::error::ConfigError;

/// Width of the ghost-band slab touched by each halo operation. Both must be
/// `<= h` of the tile's lattice; `currents` defaults vary by dimensionality
/// (1 in 1D, 3 in 2D/3D) because current deposition can spill further across
/// a tile boundary than a single-cell field stencil ever reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HaloWidths {
    pub fields: usize,
    pub currents: usize,
}

impl HaloWidths {
    pub fn default_for(dim: Dim) -> Self {
        let currents = match dim {
            Dim::D1 => 1,
            Dim::D2 | Dim::D3 => 3,
        };
        Self { fields: 1, currents }
    }

    pub fn validate(&self, h: usize) -> Result<(), ConfigError> {
        if self.fields > h {
            return Err(ConfigError::HaloWiderThanGhost {
                kind: "fields",
                halo: self.fields,
                h,
            });
        }
        if self.currents > h {
            return Err(ConfigError::HaloWiderThanGhost {
                kind: "currents",
                halo: self.currents,
                h,
            });
        }
        Ok(())
    }
}

/// Everything fixed at tile construction time: extents, ghost width,
/// dimensionality, the Courant factor, and the halo widths used by
/// [`crate::halo::HaloExchanger`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileConfig {
    pub dim: Dim,
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub h: usize,
    pub cfl: f64,
    pub halo: HaloWidths,
}

impl TileConfig {
    pub fn new(dim: Dim, nx: usize, ny: usize, nz: usize, h: usize, cfl: f64) -> Result<Self, ConfigError> {
        let cfg = Self {
            dim,
            nx,
            ny,
            nz,
            h,
            cfl,
            halo: HaloWidths::default_for(dim),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_halo(mut self, halo: HaloWidths) -> Result<Self, ConfigError> {
        self.halo = halo;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.nx == 0 || self.ny == 0 || self.nz == 0 {
            return Err(ConfigError::NonPositiveExtents {
                nx: self.nx,
                ny: self.ny,
                nz: self.nz,
            });
        }
        match self.dim {
            Dim::D1 if self.ny != 1 || self.nz != 1 => {
                return Err(ConfigError::UnsupportedDimension { d: 1 });
            }
            Dim::D2 if self.nz != 1 => {
                return Err(ConfigError::UnsupportedDimension { d: 2 });
            }
            _ => {}
        }
        let bound = self.dim.cfl_bound();
        if !(self.cfl > 0.0 && self.cfl <= bound) {
            return Err(ConfigError::CflOutOfRange {
                cfl: self.cfl,
                d: self.dim.as_usize(),
                bound,
            });
        }
        self.halo.validate(self.h)
    }
}

/// Parameters for a [`crate::conductor::ConductorInjector`], expressed in
/// tile-local index coordinates (so a sphere centred on a `64^3` tile has
/// `centre = (32.0, 32.0, 32.0)`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConductorConfig {
    pub radius: f64,
    pub period: f64,
    pub b0: f64,
    pub chi: f64,
    pub phase: f64,
    pub centre: (f64, f64, f64),
    pub delta: f64,
}

impl ConductorConfig {
    pub fn angular_velocity(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_cfl_above_bound() {
        assert!(TileConfig::new(Dim::D2, 8, 8, 1, 2, 0.9).is_err());
        assert!(TileConfig::new(Dim::D2, 8, 8, 1, 2, 0.5).is_ok());
    }

    #[test]
    fn rejects_halo_wider_than_ghost() {
        let cfg = TileConfig::new(Dim::D2, 8, 8, 1, 2, 0.5).unwrap();
        assert!(cfg.with_halo(HaloWidths { fields: 1, currents: 3 }).is_err());
    }

    #[test]
    fn rejects_degenerate_extent_mismatch() {
        assert!(TileConfig::new(Dim::D1, 8, 2, 1, 1, 0.5).is_err());
    }
}
