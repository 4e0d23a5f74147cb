use num::Float;

/// Floating-point precision shared by every buffer on a tile.
///
/// The core is generic over this trait rather than hard-coding `f64` so that
/// a simulation can be compiled against `f32` or `f64` without touching any
/// kernel code. All twelve [`crate::NdArray3`] buffers on one
/// `YeeLattice` must be instantiated with the same `Scalar`; mixing
/// precisions across tiles that share a halo is a configuration error (see
/// `pic_core::PrecisionError`).
pub trait Scalar: Float + Default + Send + Sync + std::fmt::Debug + 'static {}

impl Scalar for f32 {}
impl Scalar for f64 {}
