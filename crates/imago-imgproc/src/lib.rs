#![deny(missing_docs)]
//! Image correlation, convolution and filtering operations

/// filter operations and the correlation engine.
pub mod filter;

/// execution strategy control for the filtering loops.
pub mod parallel;
