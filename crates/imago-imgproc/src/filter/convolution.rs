//! Dense 2d correlation and convolution.

use imago_image::{Image, ImageDtype, ImageError};
use rayon::prelude::*;

use super::border::BorderMode;
use super::kernel::Kernel2;
use crate::parallel::ExecutionStrategy;

/// A prepared 2d correlation: the kernel plus border index maps resolved for
/// a concrete image size, so the inner loop carries no border branches.
struct Correlation2<'a> {
    kernel: &'a Kernel2,
    row_map: Vec<usize>,
    col_map: Vec<usize>,
}

impl<'a> Correlation2<'a> {
    fn new(
        kernel: &'a Kernel2,
        rows: usize,
        cols: usize,
        border: BorderMode,
    ) -> Result<Self, ImageError> {
        let (half_r, half_c) = kernel.half();

        Ok(Self {
            kernel,
            row_map: border.index_map(rows, half_r)?,
            col_map: border.index_map(cols, half_c)?,
        })
    }

    /// Correlate one output row. `dst_row` is the `cols * C` slice for row `r`.
    fn apply_row<T, const C: usize>(&self, src_data: &[T], cols: usize, r: usize, dst_row: &mut [T])
    where
        T: ImageDtype,
    {
        for (c, dst_pix) in dst_row.chunks_exact_mut(C).enumerate() {
            let mut acc = [0.0f32; C];

            for kr in 0..self.kernel.rows() {
                // virtual coordinate r + kr - half_r, shifted by the map radius
                let src_row_offset = self.row_map[r + kr] * cols * C;

                for kc in 0..self.kernel.cols() {
                    let w = self.kernel.get(kr, kc);
                    let idx = src_row_offset + self.col_map[c + kc] * C;

                    for (ch, acc_val) in acc.iter_mut().enumerate() {
                        *acc_val += unsafe { src_data.get_unchecked(idx + ch) }.to_f32() * w;
                    }
                }
            }

            for (dst_val, &acc_val) in dst_pix.iter_mut().zip(acc.iter()) {
                *dst_val = T::from_f32(acc_val);
            }
        }
    }

    fn apply<T, const C: usize>(
        &self,
        src: &Image<T, C>,
        dst: &mut Image<T, C>,
        strategy: ExecutionStrategy,
    ) -> Result<(), ImageError>
    where
        T: ImageDtype,
    {
        let cols = src.cols();
        let num_pixels = src.rows() * cols;
        let src_data = src.as_slice();

        if strategy.is_parallel(num_pixels) {
            dst.as_slice_mut()
                .par_chunks_exact_mut(cols * C)
                .enumerate()
                .for_each(|(r, dst_row)| {
                    self.apply_row::<T, C>(src_data, cols, r, dst_row);
                });
        } else {
            dst.as_slice_mut()
                .chunks_exact_mut(cols * C)
                .enumerate()
                .for_each(|(r, dst_row)| {
                    self.apply_row::<T, C>(src_data, cols, r, dst_row);
                });
        }

        Ok(())
    }
}

fn check_preconditions<T, const C: usize>(
    src: &Image<T, C>,
    dst: &Image<T, C>,
) -> Result<(), ImageError> {
    if src.rows() == 0 || src.cols() == 0 {
        return Err(ImageError::ZeroImageExtent(src.cols(), src.rows()));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    Ok(())
}

/// Correlate an image with a 2d kernel, with execution strategy control.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The weight matrix, odd in both dimensions.
/// * `border` - How out-of-bounds samples are resolved.
/// * `strategy` - Execution strategy: `Auto`, `Serial`, or `Parallel`.
///
/// Accumulation happens per channel in f32; the result is narrowed back into
/// `T` through [`ImageDtype::from_f32`] (round to nearest, then clamp, for
/// integral types). All preconditions are checked before any pixel is
/// written: non-zero extent, matching sizes, and for [`BorderMode::Reflect`]
/// a kernel radius smaller than the image extent on both axes.
pub fn correlate2d_with_strategy<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel2,
    border: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    check_preconditions(src, dst)?;

    let correlation = Correlation2::new(kernel, src.rows(), src.cols(), border)?;
    correlation.apply(src, dst, strategy)
}

/// Correlate an image with a 2d kernel.
///
/// Uses [`ExecutionStrategy::Auto`]. See [`correlate2d_with_strategy`] for
/// the full contract.
pub fn correlate2d<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel2,
    border: BorderMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    correlate2d_with_strategy(src, dst, kernel, border, ExecutionStrategy::Auto)
}

/// Convolve an image with a 2d kernel, with execution strategy control.
///
/// Convolution is correlation with the kernel rotated by 180 degrees; border
/// handling and the inner loop are shared with [`correlate2d_with_strategy`].
pub fn convolve2d_with_strategy<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel2,
    border: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    correlate2d_with_strategy(src, dst, &kernel.flipped(), border, strategy)
}

/// Convolve an image with a 2d kernel.
///
/// Uses [`ExecutionStrategy::Auto`]. See [`convolve2d_with_strategy`].
pub fn convolve2d<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel2,
    border: BorderMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    convolve2d_with_strategy(src, dst, kernel, border, ExecutionStrategy::Auto)
}
