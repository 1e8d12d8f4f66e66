#![deny(missing_docs)]
//! imago top-level crate, re-exporting the workspace members.

#[doc(inline)]
pub use imago_image as image;

#[doc(inline)]
pub use imago_imgproc as imgproc;
