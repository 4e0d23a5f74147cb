use thiserror::Error;

/// Fatal configuration problems, raised at tile construction or on the first
/// halo exchange that exposes them. The core never retries; a configuration
/// error means the simulation cannot proceed correctly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ghost width {h} is smaller than requested halo width {halo} for {kind}")]
    HaloWiderThanGhost {
        kind: &'static str,
        halo: usize,
        h: usize,
    },

    #[error("dimensionality D{d} is not supported (only 1, 2, 3)")]
    UnsupportedDimension { d: usize },

    #[error("cfl {cfl} is out of range (0, 1/sqrt({d})] = (0, {bound}]")]
    CflOutOfRange { cfl: f64, d: usize, bound: f64 },

    #[error("extents must be strictly positive, got ({nx}, {ny}, {nz})")]
    NonPositiveExtents { nx: usize, ny: usize, nz: usize },
}

/// Raised when a neighbour handle returned by the topology service disagrees
/// with `self` about the shape of the shared face.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error(
        "neighbour extents ({n_nx}, {n_ny}, {n_nz}) disagree with this tile's \
         ({nx}, {ny}, {nz}) along the shared face"
    )]
    ExtentMismatch {
        nx: usize,
        ny: usize,
        nz: usize,
        n_nx: usize,
        n_ny: usize,
        n_nz: usize,
    },

    #[error("neighbour ghost width {n_h} disagrees with this tile's {h}")]
    GhostWidthMismatch { h: usize, n_h: usize },
}

/// Raised when two tiles that share a halo were built with different scalar
/// precisions. In this crate `S` is a single Rust type parameter, so this
/// can only surface if a caller mixes buffers manufactured under different
/// monomorphisations at the FFI/serialization boundary; it is modelled here
/// so the boundary has a named error to report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("precision mismatch: expected {expected}, found {found}")]
pub struct PrecisionError {
    pub expected: &'static str,
    pub found: &'static str,
}
