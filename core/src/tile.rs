use pic_field::Scalar;

use crate::config::TileConfig;
use crate::dim::Dim;
use crate::error::ConfigError;
use crate::moments::PlasmaMomentLattice;
use crate::snapshot::SnapshotRing;
use crate::yee::YeeLattice;

/// Opaque handle identifying a tile within a topology graph. The core never
/// dereferences this itself; an external topology service maps ids to tile
/// handles (see [`crate::halo`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

/// One mesh sub-volume: a snapshot ring of Yee lattices, a growing set of
/// per-species analysis buffers, and the FDTD stencil kernels for its
/// dimensionality. A tile exclusively owns its buffers; neighbour tiles are
/// reached only through the topology service an orchestrator supplies to
/// [`crate::halo::HaloExchanger`].
pub struct Tile<S> {
    id: TileId,
    config: TileConfig,
    yee: SnapshotRing<S>,
    analysis: Vec<PlasmaMomentLattice<S>>,
}

impl<S: Scalar> Tile<S> {
    pub fn new(id: TileId, config: TileConfig, snapshot_depth: usize) -> Result<Self, ConfigError> {
        let yee = SnapshotRing::new(snapshot_depth, config.nx, config.ny, config.nz, config.h)?;
        log::debug!(
            "tile {:?}: {} {}x{}x{} H={} cfl={}",
            id,
            config.dim,
            config.nx,
            config.ny,
            config.nz,
            config.h,
            config.cfl
        );
        Ok(Self {
            id,
            config,
            yee,
            analysis: Vec::new(),
        })
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn config(&self) -> TileConfig {
        self.config
    }

    pub fn dim(&self) -> Dim {
        self.config.dim
    }

    pub fn yee(&self) -> &YeeLattice<S> {
        self.yee.get(0)
    }

    pub fn yee_mut(&mut self) -> &mut YeeLattice<S> {
        self.yee.get_mut(0)
    }

    pub fn snapshot(&self, i: usize) -> &YeeLattice<S> {
        self.yee.get(i)
    }

    pub fn add_analysis_species(&mut self) -> &mut PlasmaMomentLattice<S> {
        let TileConfig { nx, ny, nz, h, .. } = self.config;
        self.analysis.push(PlasmaMomentLattice::new(nx, ny, nz, h));
        self.analysis.last_mut().unwrap()
    }

    pub fn analysis(&self, species: usize) -> &PlasmaMomentLattice<S> {
        &self.analysis[species]
    }

    pub fn analysis_mut(&mut self, species: usize) -> &mut PlasmaMomentLattice<S> {
        &mut self.analysis[species]
    }

    /// Advances the snapshot ring head. Current field/current state becomes
    /// the new "most recent past".
    pub fn cycle_yee(&mut self) {
        self.yee.cycle();
    }

    /// Swaps the live and scratch current buffers of the current snapshot.
    pub fn cycle_current(&mut self) {
        self.yee_mut().cycle_current();
    }

    /// Full electric-field step: `E += C curl(B)`, with curl terms along
    /// degenerate axes dropped per the tile's dimensionality.
    pub fn push_e(&mut self) {
        let d = self.config.dim.as_usize();
        let c = S::from(self.config.cfl).expect("cfl must be representable in S");
        let mesh = self.yee_mut();
        let (nx, ny, nz) = (mesh.nx() as i64, mesh.ny() as i64, mesh.nz() as i64);

        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let mut ex = mesh.ex.at(i, j, k);
                    let mut ey = mesh.ey.at(i, j, k);
                    let mut ez = mesh.ez.at(i, j, k);

                    if d >= 3 {
                        ex = ex + c * (mesh.by.at(i, j, k - 1) - mesh.by.at(i, j, k));
                        ey = ey + c * (-mesh.bx.at(i, j, k - 1) + mesh.bx.at(i, j, k));
                    }
                    if d >= 2 {
                        ex = ex + c * (-mesh.bz.at(i, j - 1, k) + mesh.bz.at(i, j, k));
                        ez = ez + c * (mesh.bx.at(i, j - 1, k) - mesh.bx.at(i, j, k));
                    }
                    ey = ey + c * (mesh.bz.at(i - 1, j, k) - mesh.bz.at(i, j, k));
                    ez = ez + c * (-mesh.by.at(i - 1, j, k) + mesh.by.at(i, j, k));

                    mesh.ex.set(i, j, k, ex);
                    mesh.ey.set(i, j, k, ey);
                    mesh.ez.set(i, j, k, ez);
                }
            }
        }
    }

    /// Half-step magnetic push: `B += 0.5 C curl(E)`, reading the `+1`
    /// neighbour along each active axis.
    pub fn push_half_b(&mut self) {
        let d = self.config.dim.as_usize();
        let half = S::from(0.5).unwrap();
        let c = half * S::from(self.config.cfl).expect("cfl must be representable in S");
        let mesh = self.yee_mut();
        let (nx, ny, nz) = (mesh.nx() as i64, mesh.ny() as i64, mesh.nz() as i64);

        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let mut bx = mesh.bx.at(i, j, k);
                    let mut by = mesh.by.at(i, j, k);
                    let mut bz = mesh.bz.at(i, j, k);

                    if d >= 3 {
                        bx = bx + c * (mesh.ey.at(i, j, k + 1) - mesh.ey.at(i, j, k));
                        by = by + c * (-mesh.ex.at(i, j, k + 1) + mesh.ex.at(i, j, k));
                    }
                    if d >= 2 {
                        bx = bx + c * (-mesh.ez.at(i, j + 1, k) + mesh.ez.at(i, j, k));
                        bz = bz + c * (mesh.ex.at(i, j + 1, k) - mesh.ex.at(i, j, k));
                    }
                    by = by + c * (mesh.ez.at(i + 1, j, k) - mesh.ez.at(i, j, k));
                    bz = bz + c * (-mesh.ey.at(i + 1, j, k) + mesh.ey.at(i, j, k));

                    mesh.bx.set(i, j, k, bx);
                    mesh.by.set(i, j, k, by);
                    mesh.bz.set(i, j, k, bz);
                }
            }
        }
    }

    /// `E -= J` over all logical cells. Side effect only.
    pub fn deposit_current(&mut self) {
        let mesh = self.yee_mut();
        let (nx, ny, nz) = (mesh.nx() as i64, mesh.ny() as i64, mesh.nz() as i64);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let ex = mesh.ex.at(i, j, k) - mesh.jx.at(i, j, k);
                    let ey = mesh.ey.at(i, j, k) - mesh.jy.at(i, j, k);
                    let ez = mesh.ez.at(i, j, k) - mesh.jz.at(i, j, k);
                    mesh.ex.set(i, j, k, ex);
                    mesh.ey.set(i, j, k, ey);
                    mesh.ez.set(i, j, k, ez);
                }
            }
        }
    }
}
