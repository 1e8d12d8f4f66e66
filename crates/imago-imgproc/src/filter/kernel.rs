//! The 2d kernel type consumed by the correlation engine.

use imago_image::ImageError;

/// An immutable rectangular matrix of filter weights.
///
/// Both dimensions must be odd so the kernel has a well-defined center tap.
/// Weights are stored row-major as `f32`, the accumulation type of the
/// correlation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2 {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Kernel2 {
    /// Create a new kernel from row-major weight data.
    ///
    /// # Arguments
    ///
    /// * `data` - The weights in row-major order, `rows * cols` long.
    /// * `rows` - The kernel height, must be odd.
    /// * `cols` - The kernel width, must be odd.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is even or zero, or if the data
    /// length does not match the dimensions.
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self, ImageError> {
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(ImageError::InvalidKernelShape(rows, cols));
        }

        if data.len() != rows * cols {
            return Err(ImageError::InvalidKernelData(data.len(), rows * cols));
        }

        Ok(Self { data, rows, cols })
    }

    /// The kernel height.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The kernel width.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The kernel radii as (row radius, col radius).
    pub fn half(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    /// The weights in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The weight at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// The sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// A copy of the kernel with every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            data: self.data.iter().map(|w| w * factor).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// The kernel rotated by 180 degrees.
    ///
    /// Correlation with the flipped kernel is convolution with the original.
    pub fn flipped(&self) -> Self {
        Self {
            data: self.data.iter().rev().copied().collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<const M: usize, const N: usize> From<[[f32; N]; M]> for Kernel2 {
    /// Build a kernel from a fixed-size literal.
    ///
    /// # Panics
    ///
    /// Panics if either const-generic dimension is even; kernel literals
    /// with even dimensions are a programming error. Use [`Kernel2::new`]
    /// for fallible construction from runtime data.
    fn from(weights: [[f32; N]; M]) -> Self {
        let data = weights.iter().flatten().copied().collect();
        match Self::new(data, M, N) {
            Ok(kernel) => kernel,
            Err(_) => panic!("kernel literals must have odd dimensions"),
        }
    }
}
