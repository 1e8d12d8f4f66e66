//! Kernel generators for the derived filters.

use imago_image::ImageError;

use super::kernel::Kernel2;

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a 2d box kernel with constant `1 / (rows * cols)` weights.
///
/// # Errors
///
/// Returns an error if either dimension is even or zero.
pub fn box_kernel_2d(rows: usize, cols: usize) -> Result<Kernel2, ImageError> {
    Kernel2::new(vec![1.0 / (rows * cols) as f32; rows * cols], rows, cols)
}

/// Create a gaussian blur kernel.
///
/// The kernel is renormalized so its entries sum to exactly 1, to avoid
/// brightness drift when blurring.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    if kernel_size == 0 {
        // the filter entry points reject empty kernels
        return Vec::new();
    }

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Create a 2d gaussian kernel by sampling the density on the grid and
/// renormalizing it to sum to 1.
///
/// # Arguments
///
/// * `kernel_size` - The size of the (square) kernel, must be odd.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Errors
///
/// Returns an error if the kernel size is even or zero.
pub fn gaussian_kernel_2d(kernel_size: usize, sigma: f32) -> Result<Kernel2, ImageError> {
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelShape(kernel_size, kernel_size));
    }

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    let mut data = Vec::with_capacity(kernel_size * kernel_size);
    for r in 0..kernel_size {
        let y = r as f32 - mean;
        for c in 0..kernel_size {
            let x = c as f32 - mean;
            data.push((-(x * x + y * y) / (2.0 * sigma_sq)).exp());
        }
    }

    let norm = data.iter().sum::<f32>();
    data.iter_mut().for_each(|k| *k /= norm);

    Kernel2::new(data, kernel_size, kernel_size)
}

/// Create a sobel kernel as a separable (derivative, smoothing) pair.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel, 3 or 5.
///
/// # Errors
///
/// Returns an error for unsupported kernel sizes.
pub fn sobel_kernel_1d(kernel_size: usize) -> Result<(Vec<f32>, Vec<f32>), ImageError> {
    let (kernel_x, kernel_y) = match kernel_size {
        3 => (vec![-1.0, 0.0, 1.0], vec![1.0, 2.0, 1.0]),
        5 => (
            vec![-1.0, -2.0, 0.0, 2.0, 1.0],
            vec![1.0, 4.0, 6.0, 4.0, 1.0],
        ),
        _ => return Err(ImageError::InvalidKernelShape(kernel_size, kernel_size)),
    };
    Ok((kernel_x, kernel_y))
}

/// The 3x3 sobel kernel for the x derivative.
pub fn sobel_kernel_2d_x() -> Kernel2 {
    Kernel2::from([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
}

/// The 3x3 sobel kernel for the y derivative.
pub fn sobel_kernel_2d_y() -> Kernel2 {
    Kernel2::from([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]])
}

/// Create a scharr kernel as a separable (derivative, smoothing) pair.
pub fn scharr_kernel_1d() -> (Vec<f32>, Vec<f32>) {
    (vec![-1.0, 0.0, 1.0], vec![3.0, 10.0, 3.0])
}

/// The 3x3 scharr kernel for the x derivative.
pub fn scharr_kernel_2d_x() -> Kernel2 {
    Kernel2::from([[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]])
}

/// The 3x3 scharr kernel for the y derivative.
pub fn scharr_kernel_2d_y() -> Kernel2 {
    Kernel2::from([[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]])
}

/// The 3x3 4-neighbour laplacian kernel.
pub fn laplacian_kernel_2d() -> Kernel2 {
    Kernel2::from([[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]])
}

/// The central difference kernel, unit response to a ramp.
pub fn central_difference_kernel_1d() -> Vec<f32> {
    vec![-0.5, 0.0, 0.5]
}

/// The forward difference kernel.
pub fn forward_difference_kernel_1d() -> Vec<f32> {
    vec![0.0, -1.0, 1.0]
}

/// The backward difference kernel.
pub fn backward_difference_kernel_1d() -> Vec<f32> {
    vec![-1.0, 1.0, 0.0]
}

/// The identity smoothing kernel paired with the difference kernels.
pub fn identity_kernel_1d() -> Vec<f32> {
    vec![0.0, 1.0, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_blur_kernel_1d() {
        let kernel = box_blur_kernel_1d(5);
        assert_eq!(kernel.len(), 5);
        assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_box_kernel_2d() -> Result<(), ImageError> {
        let kernel = box_kernel_2d(3, 5)?;
        assert_eq!(kernel.rows(), 3);
        assert_eq!(kernel.cols(), 5);
        assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-6);

        Ok(())
    }

    #[test]
    fn test_sobel_kernel_1d() -> Result<(), ImageError> {
        let kernel = sobel_kernel_1d(3)?;
        assert_eq!(kernel.0, vec![-1.0, 0.0, 1.0]);
        assert_eq!(kernel.1, vec![1.0, 2.0, 1.0]);

        let kernel = sobel_kernel_1d(5)?;
        assert_eq!(kernel.0, vec![-1.0, -2.0, 0.0, 2.0, 1.0]);
        assert_eq!(kernel.1, vec![1.0, 4.0, 6.0, 4.0, 1.0]);

        assert!(sobel_kernel_1d(4).is_err());

        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = gaussian_kernel_1d(5, 0.5);

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (i, &k) in kernel.iter().enumerate() {
            assert_eq!(k, expected[i]);
        }
    }

    #[test]
    fn test_gaussian_kernel_zero_size() {
        assert!(gaussian_kernel_1d(0, 1.0).is_empty());

        let err = gaussian_kernel_2d(0, 1.0).unwrap_err();
        assert_eq!(err, ImageError::InvalidKernelShape(0, 0));
    }

    #[test]
    fn test_gaussian_kernel_2d_sums_to_one() -> Result<(), ImageError> {
        for sigma in [0.3, 0.5, 1.0, 2.5, 10.0] {
            let kernel = gaussian_kernel_2d(5, sigma)?;
            assert_relative_eq!(kernel.sum(), 1.0, epsilon = 1e-5);
        }

        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_2d_center_peak() -> Result<(), ImageError> {
        let kernel = gaussian_kernel_2d(3, 1.0)?;
        let center = kernel.get(1, 1);
        for r in 0..3 {
            for c in 0..3 {
                if (r, c) != (1, 1) {
                    assert!(center > kernel.get(r, c));
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_difference_kernels() {
        assert_eq!(central_difference_kernel_1d(), vec![-0.5, 0.0, 0.5]);
        assert_eq!(forward_difference_kernel_1d(), vec![0.0, -1.0, 1.0]);
        assert_eq!(backward_difference_kernel_1d(), vec![-1.0, 1.0, 0.0]);
        assert_eq!(identity_kernel_1d(), vec![0.0, 1.0, 0.0]);
    }
}
