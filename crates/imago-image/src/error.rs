/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes of two images do not match.
    #[error("Source size ({0}x{1}) does not match destination size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the pixel data cannot be cast to the requested type.
    #[error("Failed to cast pixel data")]
    CastError,

    /// Error when an image has zero extent in either dimension.
    #[error("Image extent must be non-zero, got ({0}x{1})")]
    ZeroImageExtent(usize, usize),

    /// Error when a 2d kernel has an even dimension.
    #[error("Kernel dimensions must be odd, got ({0}x{1})")]
    InvalidKernelShape(usize, usize),

    /// Error when the kernel weight data does not match the kernel shape.
    #[error("Kernel data length ({0}) does not match the kernel shape ({1})")]
    InvalidKernelData(usize, usize),

    /// Error when a separable kernel is empty.
    #[error("Separable kernel lengths must be non-zero, got ({0}, {1})")]
    InvalidKernelLength(usize, usize),

    /// Error when the kernel radius exceeds the image extent under reflect
    /// border handling.
    #[error("Kernel radius ({0}) must be smaller than the image extent ({1}) for reflect borders")]
    KernelRadiusTooLarge(usize, usize),
}
