/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::images::YuvImageFormat;
use crate::yuv_support::YuvStandardMatrix;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedDimensions {
    pub expected: (u32, u32),
    pub received: (u32, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum YuvError {
    /// Image is not planar YUV 4:2:0
    FormatViolation(YuvImageFormat),
    /// Planar YUV 4:2:0 requires exactly three planes
    PlaneCountMismatch(MismatchedSize),
    /// Output bitmap does not have crop rectangle dimensions
    DimensionMismatch(MismatchedDimensions),
    /// Plane `index` buffer ends before the last sample the crop rectangle addresses
    PlaneTooSmall(usize, MismatchedSize),
    /// Plane `index` declares zero row or pixel stride
    InvalidStride(usize),
    InvalidCropRect,
    InterleavedBufferOverflow(MismatchedSize),
    DestinationSizeMismatch(MismatchedSize),
    MinimumDestinationSizeMismatch(MismatchedSize),
    LumaPlaneSizeMismatch(MismatchedSize),
    ChromaPlaneSizeMismatch(MismatchedSize),
    PointerOverflow,
    ZeroBaseSize,
    UnsupportedDestination,
    /// Custom matrix `kr`, `kb` must be finite, non negative, and leave positive `kg`
    InvalidMatrix(f32, f32),
    ImageDimensionsNotMatch,
    ImagesSizesNotMatch,
}

impl Display for YuvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvError::FormatViolation(format) => f.write_fmt(format_args!(
                "Image format must be planar YUV 4:2:0, but it was {:?}",
                format
            )),
            YuvError::PlaneCountMismatch(size) => f.write_fmt(format_args!(
                "Image must have {} planes, but it has {}",
                size.expected, size.received
            )),
            YuvError::DimensionMismatch(dims) => f.write_fmt(format_args!(
                "Bitmap dimensions must be {}x{}, but it was {}x{}",
                dims.expected.0, dims.expected.1, dims.received.0, dims.received.1
            )),
            YuvError::PlaneTooSmall(index, size) => f.write_fmt(format_args!(
                "Plane {} have invalid size, it must be at least {}, but it was {}",
                index, size.expected, size.received
            )),
            YuvError::InvalidStride(index) => f.write_fmt(format_args!(
                "Plane {} row stride and pixel stride must be non zero",
                index
            )),
            YuvError::InvalidCropRect => {
                f.write_str("Crop rectangle is inverted or has empty chroma extent")
            }
            YuvError::InterleavedBufferOverflow(size) => f.write_fmt(format_args!(
                "Interleaved buffer is too small, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            YuvError::MinimumDestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination must have size at least {} but it is {}",
                size.expected, size.received
            )),
            YuvError::LumaPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Luma plane have invalid size, it must be {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::ChromaPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Chroma plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            YuvError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            YuvError::UnsupportedDestination => {
                f.write_str("Bitmap destination must have 4 channels")
            }
            YuvError::InvalidMatrix(kr, kb) => f.write_fmt(format_args!(
                "Matrix coefficients must satisfy 0 <= kr, 0 <= kb and kr + kb < 1, but it was kr={}, kb={}",
                kr, kb
            )),
            YuvError::ImageDimensionsNotMatch => f.write_str("Image dimensions does not match"),
            YuvError::ImagesSizesNotMatch => f.write_str("Image sizes does not match"),
        }
    }
}

impl Error for YuvError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, YuvError> {
    v0.checked_mul(v1).ok_or(YuvError::PointerOverflow)
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<usize, YuvError> {
    check_overflow_v2(v0, v1)?
        .checked_mul(v2)
        .ok_or(YuvError::PointerOverflow)
}

#[inline]
pub(crate) fn check_matrix(matrix: YuvStandardMatrix) -> Result<(), YuvError> {
    let bias = matrix.get_kr_kb();
    let (kr, kb) = (bias.kr, bias.kb);
    // Also rejects NaN, every comparison with it is false
    let valid = kr.is_finite() && kb.is_finite() && kr >= 0f32 && kb >= 0f32 && kr + kb < 1f32;
    if !valid {
        return Err(YuvError::InvalidMatrix(kr, kb));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_rgba_destination<V>(
    arr: &[V],
    rgba_stride: u32,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), YuvError> {
    if width == 0 || height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    let minimum = check_overflow_v3(width as usize, height as usize, channels)?;
    let total = check_overflow_v2(rgba_stride as usize, height as usize)?;
    if arr.len() != total {
        return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
            expected: total,
            received: arr.len(),
        }));
    }
    if (rgba_stride as usize) < width as usize * channels {
        return Err(YuvError::MinimumDestinationSizeMismatch(MismatchedSize {
            expected: minimum,
            received: total,
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_y8_channel<V>(
    data: &[V],
    stride: u32,
    width: u32,
    height: u32,
) -> Result<(), YuvError> {
    if width == 0 || height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    let total = check_overflow_v2(stride as usize, height as usize)?;
    if (stride as usize) < width as usize {
        return Err(YuvError::LumaPlaneSizeMismatch(MismatchedSize {
            expected: width as usize * height as usize,
            received: total,
        }));
    }
    if total != data.len() {
        return Err(YuvError::LumaPlaneSizeMismatch(MismatchedSize {
            expected: total,
            received: data.len(),
        }));
    }
    Ok(())
}

/// Checks interleaved 4:2:0 chroma plane.
///
/// The plane may hold fewer chroma pairs than `ceil(width / 2)` per row when the frame was
/// flattened from a crop with odd coordinates, readers clamp to the last pair.
#[inline]
pub(crate) fn check_interleaved_chroma_channel<V>(
    data: &[V],
    stride: u32,
    image_width: u32,
    image_height: u32,
) -> Result<(), YuvError> {
    if stride < 2 || data.is_empty() {
        return Err(YuvError::ChromaPlaneSizeMismatch(MismatchedSize {
            expected: 2,
            received: data.len(),
        }));
    }
    let chroma_min_width = (image_width as usize / 2).max(1) * 2;
    let chroma_min_height = (image_height as usize / 2).max(1);
    let minimum = check_overflow_v2(chroma_min_width, chroma_min_height)?;
    if (stride as usize) < chroma_min_width
        || data.len() % stride as usize != 0
        || data.len() / (stride as usize) < chroma_min_height
    {
        return Err(YuvError::ChromaPlaneSizeMismatch(MismatchedSize {
            expected: minimum,
            received: data.len(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_destination_accepts_padded_stride() {
        let buffer = vec![0u8; 20 * 3];
        assert!(check_rgba_destination(&buffer, 20, 4, 3, 4).is_ok());
    }

    #[test]
    fn test_rgba_destination_rejects_short_stride() {
        let buffer = vec![0u8; 12 * 3];
        assert_eq!(
            check_rgba_destination(&buffer, 12, 4, 3, 4),
            Err(YuvError::MinimumDestinationSizeMismatch(MismatchedSize {
                expected: 48,
                received: 36,
            }))
        );
    }

    #[test]
    fn test_interleaved_chroma_rejects_missing_rows() {
        let uv = vec![0u8; 4];
        assert!(check_interleaved_chroma_channel(&uv, 4, 4, 4).is_err());
        let uv = vec![0u8; 8];
        assert!(check_interleaved_chroma_channel(&uv, 4, 4, 4).is_ok());
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            check_overflow_v3(usize::MAX, 2, 1),
            Err(YuvError::PointerOverflow)
        );
    }
}
