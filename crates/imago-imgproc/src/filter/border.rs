//! Border handling for sampling outside the image bounds.

use imago_image::ImageError;

/// How out-of-bounds sample coordinates are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Mirror the coordinate across the nearest edge.
    ///
    /// Valid only while the kernel radius is smaller than the image extent;
    /// larger offsets would require iterated reflection and are rejected as a
    /// precondition violation by the filtering entry points.
    #[default]
    Reflect,

    /// Clamp the coordinate to the nearest edge pixel.
    Repeat,
}

/// Mirror `idx` across the nearest edge of `[min, max)`.
///
/// For `idx < min` returns `min + (min - idx)`, for `idx >= max` returns
/// `2 * max - idx - 1`, otherwise `idx` unchanged. A single reflection only:
/// the caller must guarantee that offsets never exceed the extent.
#[inline]
pub fn reflect(idx: isize, min: isize, max: isize) -> isize {
    if idx < min {
        min + (min - idx)
    } else if idx >= max {
        2 * max - idx - 1
    } else {
        idx
    }
}

/// Clamp `idx` to the valid range `[min, max)`.
#[inline]
pub fn repeat(idx: isize, min: isize, max: isize) -> isize {
    if idx < min {
        min
    } else if idx >= max {
        max - 1
    } else {
        idx
    }
}

impl BorderMode {
    /// Resolve a possibly out-of-bounds coordinate into `[min, max)`.
    ///
    /// The match is exhaustive over the enum, so there is no unrecognized-tag
    /// failure path to handle at runtime.
    #[inline]
    pub fn handle(&self, idx: isize, min: isize, max: isize) -> isize {
        match self {
            BorderMode::Reflect => reflect(idx, min, max),
            BorderMode::Repeat => repeat(idx, min, max),
        }
    }

    /// Precompute resolved source indices for every virtual coordinate in
    /// `-radius..len + radius`.
    ///
    /// Entry `i` of the returned table holds the source index for virtual
    /// coordinate `i - radius`, so the correlation inner loop indexes the
    /// table instead of branching on the border mode per tap.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ZeroImageExtent`] when `len == 0`. For
    /// [`BorderMode::Reflect`], `radius >= len` would need more than one
    /// reflection and returns [`ImageError::KernelRadiusTooLarge`].
    pub fn index_map(&self, len: usize, radius: usize) -> Result<Vec<usize>, ImageError> {
        if len == 0 {
            return Err(ImageError::ZeroImageExtent(len, len));
        }

        if *self == BorderMode::Reflect && radius >= len {
            return Err(ImageError::KernelRadiusTooLarge(radius, len));
        }

        let map = (0..len + 2 * radius)
            .map(|i| {
                let idx = i as isize - radius as isize;
                self.handle(idx, 0, len as isize) as usize
            })
            .collect();

        Ok(map)
    }
}
