//! Filter operations
//!
//! This module provides the correlation engine and the filters built on it.

/// Border handling policies
pub mod border;

/// The 2d kernel type
pub mod kernel;

/// Filter kernel generators
pub mod kernels;

/// Dense 2d correlation and convolution
mod convolution;
pub use convolution::*;

/// Separable filter operations
mod separable;
pub use separable::*;

/// Filter operations
mod ops;
pub use ops::*;

pub use border::BorderMode;
pub use kernel::Kernel2;
