#![allow(clippy::too_many_arguments)]

//! Electromagnetic field core of a tiled particle-in-cell plasma
//! simulation: a staggered Yee-lattice FDTD advance, current deposition,
//! and the halo exchange that keeps tile boundaries consistent with a
//! single global grid.
//!
//! The orchestrator drives tiles through one timestep as:
//! `push_half_b` -> field halo exchange -> `push_e` -> external current
//! deposition -> `exchange_currents` -> `deposit_current` -> `push_half_b`
//! -> optional [`ConductorInjector`] pass -> `cycle_yee` / `cycle_current`.

pub mod conductor;
pub mod config;
pub mod dim;
pub mod error;
pub mod halo;
pub mod moments;
pub mod snapshot;
pub mod tile;
pub mod yee;

pub use conductor::ConductorInjector;
pub use config::{ConductorConfig, HaloWidths, TileConfig};
pub use dim::Dim;
pub use error::{ConfigError, PrecisionError, TopologyError};
pub use halo::{Direction, HaloExchanger};
pub use moments::PlasmaMomentLattice;
pub use snapshot::SnapshotRing;
pub use tile::{Tile, TileId};
pub use yee::YeeLattice;

pub use pic_field::{NdArray3, Scalar};
