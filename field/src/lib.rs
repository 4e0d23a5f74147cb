#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

mod ndarray3;
mod scalar;

pub use ndarray3::NdArray3;
pub use scalar::Scalar;
