//! Derived filters built on the correlation engine.

use imago_image::{Image, ImageDtype, ImageError};

use super::border::BorderMode;
use super::convolution::correlate2d;
use super::kernels;
use super::separable::separable_filter;

/// Blur an image using a box blur filter
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `border` - How out-of-bounds samples are resolved.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn box_blur<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: (usize, usize),
    border: BorderMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    let kernel_x = kernels::box_blur_kernel_1d(kernel_size.0);
    let kernel_y = kernels::box_blur_kernel_1d(kernel_size.1);
    separable_filter(src, dst, &kernel_x, &kernel_y, border)
}

/// Blur an image using a gaussian blur filter
///
/// The kernels sum to 1, so a constant image stays constant.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel, xy-ordered.
/// * `border` - How out-of-bounds samples are resolved.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
    border: BorderMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0);
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1);
    separable_filter(src, dst, &kernel_x, &kernel_y, border)
}

/// Apply the 3x3 4-neighbour laplacian to an image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `border` - How out-of-bounds samples are resolved.
pub fn laplacian<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    border: BorderMode,
) -> Result<(), ImageError> {
    correlate2d(src, dst, &kernels::laplacian_kernel_2d(), border)
}

/// The derivative kernel family used for spatial gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientKind {
    /// Sobel: `[-1, 0, 1]` derivative with `[1, 2, 1]` smoothing.
    #[default]
    Sobel,
    /// Scharr: `[-1, 0, 1]` derivative with `[3, 10, 3]` smoothing.
    Scharr,
    /// Central difference `[-0.5, 0, 0.5]`, no cross smoothing.
    Central,
    /// Forward difference `[0, -1, 1]`, no cross smoothing.
    Forward,
    /// Backward difference `[-1, 1, 0]`, no cross smoothing.
    Backward,
}

impl GradientKind {
    /// The (derivative, smoothing) separable kernel pair.
    fn kernels_1d(&self) -> (Vec<f32>, Vec<f32>) {
        match self {
            GradientKind::Sobel => (vec![-1.0, 0.0, 1.0], vec![1.0, 2.0, 1.0]),
            GradientKind::Scharr => kernels::scharr_kernel_1d(),
            GradientKind::Central => (
                kernels::central_difference_kernel_1d(),
                kernels::identity_kernel_1d(),
            ),
            GradientKind::Forward => (
                kernels::forward_difference_kernel_1d(),
                kernels::identity_kernel_1d(),
            ),
            GradientKind::Backward => (
                kernels::backward_difference_kernel_1d(),
                kernels::identity_kernel_1d(),
            ),
        }
    }
}

/// Compute the first order image derivative in both x and y.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dx` - The x derivative, same shape as `src`.
/// * `dy` - The y derivative, same shape as `src`.
/// * `kind` - The derivative kernel family.
/// * `border` - How out-of-bounds samples are resolved.
pub fn spatial_gradient<const C: usize>(
    src: &Image<f32, C>,
    dx: &mut Image<f32, C>,
    dy: &mut Image<f32, C>,
    kind: GradientKind,
    border: BorderMode,
) -> Result<(), ImageError> {
    let (derivative, smoothing) = kind.kernels_1d();

    separable_filter(src, dx, &derivative, &smoothing, border)?;
    separable_filter(src, dy, &smoothing, &derivative, border)?;

    Ok(())
}

/// Combine two directional derivatives into a gradient magnitude.
///
/// Pointwise `sqrt(gx^2 + gy^2)` per channel, no cross-pixel coupling.
///
/// # Arguments
///
/// * `dx` - The x derivative with shape (H, W, C).
/// * `dy` - The y derivative with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
pub fn gradient_magnitude<const C: usize>(
    dx: &Image<f32, C>,
    dy: &Image<f32, C>,
    dst: &mut Image<f32, C>,
) -> Result<(), ImageError> {
    if dx.size() != dy.size() {
        return Err(ImageError::InvalidImageSize(
            dx.cols(),
            dx.rows(),
            dy.cols(),
            dy.rows(),
        ));
    }

    if dx.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dx.cols(),
            dx.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(dx.as_slice().iter())
        .zip(dy.as_slice().iter())
        .for_each(|((dst, &gx), &gy)| {
            *dst = (gx * gx + gy * gy).sqrt();
        });

    Ok(())
}

/// Compute the sobel gradient magnitude of an image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `border` - How out-of-bounds samples are resolved.
pub fn sobel<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    border: BorderMode,
) -> Result<(), ImageError> {
    let mut dx = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
    let mut dy = Image::<f32, C>::from_size_val(src.size(), 0.0)?;

    spatial_gradient(src, &mut dx, &mut dy, GradientKind::Sobel, border)?;
    gradient_magnitude(&dx, &dy, dst)
}

/// Compute the scharr gradient magnitude of an image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `border` - How out-of-bounds samples are resolved.
pub fn scharr<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    border: BorderMode,
) -> Result<(), ImageError> {
    let mut dx = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
    let mut dy = Image::<f32, C>::from_size_val(src.size(), 0.0)?;

    spatial_gradient(src, &mut dx, &mut dy, GradientKind::Scharr, border)?;
    gradient_magnitude(&dx, &dy, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use imago_image::ImageSize;

    fn ramp_x(size: ImageSize) -> Result<Image<f32, 1>, ImageError> {
        let data = (0..size.height)
            .flat_map(|_| (0..size.width).map(|c| c as f32))
            .collect();
        Image::new(size, data)
    }

    #[test]
    fn test_gaussian_blur_preserves_constant() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 5,
        };
        let img = Image::<f32, 1>::from_size_val(size, 7.0)?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        gaussian_blur(&img, &mut dst, (5, 5), (1.2, 1.2), BorderMode::Reflect)?;

        for &val in dst.as_slice() {
            assert_relative_eq!(val, 7.0, epsilon = 1e-4);
        }

        Ok(())
    }

    #[test]
    fn test_gaussian_blur_zero_kernel_size_rejected() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let img = Image::<f32, 1>::from_size_val(size, 1.0)?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        let err =
            gaussian_blur(&img, &mut dst, (0, 3), (1.0, 1.0), BorderMode::Reflect).unwrap_err();
        assert_eq!(err, ImageError::InvalidKernelLength(0, 3));

        Ok(())
    }

    #[test]
    fn test_box_blur_preserves_constant() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let img = Image::<f32, 1>::from_size_val(size, 3.0)?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        box_blur(&img, &mut dst, (3, 3), BorderMode::Repeat)?;

        for &val in dst.as_slice() {
            assert_relative_eq!(val, 3.0, epsilon = 1e-5);
        }

        Ok(())
    }

    #[test]
    fn test_laplacian_of_constant_is_zero() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let img = Image::<f32, 1>::from_size_val(size, 42.0)?;
        let mut dst = Image::from_size_val(size, 1.0)?;

        laplacian(&img, &mut dst, BorderMode::Reflect)?;

        for &val in dst.as_slice() {
            assert_relative_eq!(val, 0.0, epsilon = 1e-4);
        }

        Ok(())
    }

    #[test]
    fn test_spatial_gradient_on_ramp() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 5,
        };
        let img = ramp_x(size)?;

        // unit horizontal slope: sobel responds with 8 (derivative 2 times
        // smoothing sum 4), central difference with exactly 1
        for (kind, expected) in [(GradientKind::Sobel, 8.0), (GradientKind::Central, 1.0)] {
            let mut dx = Image::from_size_val(size, 0.0)?;
            let mut dy = Image::from_size_val(size, 0.0)?;
            spatial_gradient(&img, &mut dx, &mut dy, kind, BorderMode::Repeat)?;

            for r in 0..size.height {
                for c in 1..size.width - 1 {
                    assert_relative_eq!(
                        *dx.get([r, c, 0]).ok_or(ImageError::CastError)?,
                        expected,
                        epsilon = 1e-4
                    );
                    assert_relative_eq!(
                        *dy.get([r, c, 0]).ok_or(ImageError::CastError)?,
                        0.0,
                        epsilon = 1e-4
                    );
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_forward_backward_difference() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 1,
        };
        let img = Image::<f32, 1>::new(size, vec![0.0, 1.0, 3.0, 6.0])?;

        let mut dx = Image::from_size_val(size, 0.0)?;
        let mut dy = Image::from_size_val(size, 0.0)?;

        spatial_gradient(
            &img,
            &mut dx,
            &mut dy,
            GradientKind::Forward,
            BorderMode::Repeat,
        )?;
        assert_eq!(dx.as_slice(), &[1.0, 2.0, 3.0, 0.0]);

        spatial_gradient(
            &img,
            &mut dx,
            &mut dy,
            GradientKind::Backward,
            BorderMode::Repeat,
        )?;
        assert_eq!(dx.as_slice(), &[0.0, 1.0, 2.0, 3.0]);

        Ok(())
    }

    #[test]
    fn test_gradient_magnitude_pointwise() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let dx = Image::<f32, 1>::new(size, vec![3.0, -3.0])?;
        let dy = Image::<f32, 1>::new(size, vec![4.0, -4.0])?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        gradient_magnitude(&dx, &dy, &mut dst)?;
        assert_eq!(dst.as_slice(), &[5.0, 5.0]);

        Ok(())
    }

    #[test]
    fn test_sobel_magnitude_on_ramp() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 5,
        };
        let img = ramp_x(size)?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        sobel(&img, &mut dst, BorderMode::Repeat)?;

        assert_eq!(dst.rows(), img.rows());
        assert_eq!(dst.cols(), img.cols());
        for r in 0..size.height {
            for c in 1..size.width - 1 {
                assert_relative_eq!(
                    *dst.get([r, c, 0]).ok_or(ImageError::CastError)?,
                    8.0,
                    epsilon = 1e-4
                );
            }
        }

        Ok(())
    }

    #[test]
    fn test_scharr_magnitude_on_ramp() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 4,
        };
        let img = ramp_x(size)?;
        let mut dst = Image::from_size_val(size, 0.0)?;

        scharr(&img, &mut dst, BorderMode::Repeat)?;

        // derivative 2 times scharr smoothing sum 16
        for r in 0..size.height {
            for c in 1..size.width - 1 {
                assert_relative_eq!(
                    *dst.get([r, c, 0]).ok_or(ImageError::CastError)?,
                    32.0,
                    epsilon = 1e-3
                );
            }
        }

        Ok(())
    }
}
