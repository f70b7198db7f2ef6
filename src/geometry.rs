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
use crate::images::RgbaBitmapMut;
use crate::yuv_error::MismatchedDimensions;
use crate::YuvError;
use fast_transpose::{flip_rgba, flop_rgba, rotate180_rgba, TransposeError};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

/// Declares clockwise rotation mode, 90, 180, 270.
///
/// Direction matches camera sensor orientation degrees, [RotationMode::Rotate90]
/// turns `[1 2 / 3 4]` into `[3 1 / 4 2]`.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum RotationMode {
    Rotate90,
    Rotate180,
    Rotate270,
}

impl RotationMode {
    /// Maps camera reported clockwise rotation in degrees, `None` for 0 and unknown values
    pub const fn from_degrees(degrees: u32) -> Option<RotationMode> {
        match degrees % 360 {
            90 => Some(RotationMode::Rotate90),
            180 => Some(RotationMode::Rotate180),
            270 => Some(RotationMode::Rotate270),
            _ => None,
        }
    }

    /// Dimensions of `width` x `height` image after rotation
    pub const fn rotated_size(&self, width: u32, height: u32) -> (u32, u32) {
        match self {
            RotationMode::Rotate90 | RotationMode::Rotate270 => (height, width),
            RotationMode::Rotate180 => (width, height),
        }
    }
}

/// Declares mirroring mode: vertical or horizontal
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum MirrorMode {
    Vertical,
    Horizontal,
}

#[inline]
fn map_ft_result(result: Result<(), TransposeError>) -> Result<(), YuvError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) => match err {
            TransposeError::MismatchDimensions => Err(YuvError::ImageDimensionsNotMatch),
            TransposeError::InvalidArraySize => Err(YuvError::ImagesSizesNotMatch),
        },
    }
}

const RGBA_CHANNELS: usize = 4;

/// Quarter turn of a 4 channels image, `CLOCKWISE` selects 90 or 270 degrees.
fn rotate_quarter_rgba<const CLOCKWISE: bool>(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
) -> Result<(), YuvError> {
    if src_stride < width * RGBA_CHANNELS || dst_stride < height * RGBA_CHANNELS {
        return Err(YuvError::ImageDimensionsNotMatch);
    }
    if src.len() != src_stride * height || dst.len() != dst_stride * width {
        return Err(YuvError::ImagesSizesNotMatch);
    }

    // Destination row `r` is source column `r` read bottom up, or column `width - 1 - r`
    // read top down.
    let process_row = |r: usize, dst: &mut [u8]| {
        let x = if CLOCKWISE { r } else { width - 1 - r };
        for (c, dst) in dst[0..height * RGBA_CHANNELS]
            .chunks_exact_mut(RGBA_CHANNELS)
            .enumerate()
        {
            let y = if CLOCKWISE { height - 1 - c } else { c };
            let offset = y * src_stride + x * RGBA_CHANNELS;
            dst.copy_from_slice(&src[offset..offset + RGBA_CHANNELS]);
        }
    };

    if width == 0 || height == 0 {
        return Ok(());
    }

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = dst.par_chunks_exact_mut(dst_stride).enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = dst.chunks_exact_mut(dst_stride).enumerate();
    }
    iter.for_each(|(r, dst)| process_row(r, dst));
    Ok(())
}

/// Rotates RGBA 8 bit image clockwise.
///
/// This rotates any 4 channels image, channel order does not matter.
///
/// # Arguments
///
/// * `src`: Source image
/// * `src_stride`: Source image stride
/// * `dst`: Destination image, `height` x `width` for quarter turns
/// * `dst_stride`: Destination image stride
/// * `width`: Source image width
/// * `height`: Source image Height
/// * `mode`: Refer to [RotationMode] for mode info
///
/// returns: Result<(), [YuvError]>
///
pub fn rotate_rgba(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
    mode: RotationMode,
) -> Result<(), YuvError> {
    match mode {
        RotationMode::Rotate90 => {
            rotate_quarter_rgba::<true>(src, src_stride, dst, dst_stride, width, height)
        }
        RotationMode::Rotate180 => map_ft_result(rotate180_rgba(
            src, src_stride, dst, dst_stride, width, height,
        )),
        RotationMode::Rotate270 => {
            rotate_quarter_rgba::<false>(src, src_stride, dst, dst_stride, width, height)
        }
    }
}

/// Mirrors RGBA 8 bit image.
///
/// This mirrors any 4 channels image, channel order does not matter.
///
/// returns: Result<(), [YuvError]>
///
pub fn mirror_rgba(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
    mode: MirrorMode,
) -> Result<(), YuvError> {
    let rs = match mode {
        MirrorMode::Vertical => flop_rgba(src, src_stride, dst, dst_stride, width, height),
        MirrorMode::Horizontal => flip_rgba(src, src_stride, dst, dst_stride, width, height),
    };
    map_ft_result(rs)
}

/// Rotates converted camera bitmap into `dst`, which must have rotated dimensions.
pub fn rotate_bitmap(
    src: &RgbaBitmapMut,
    dst: &mut RgbaBitmapMut,
    mode: RotationMode,
) -> Result<(), YuvError> {
    src.check_constraints()?;
    dst.check_constraints()?;
    let expected = mode.rotated_size(src.width, src.height);
    if (dst.width, dst.height) != expected {
        return Err(YuvError::DimensionMismatch(MismatchedDimensions {
            expected,
            received: (dst.width, dst.height),
        }));
    }
    rotate_rgba(
        src.data.borrow(),
        src.stride as usize,
        dst.data.as_mut(),
        dst.stride as usize,
        src.width as usize,
        src.height as usize,
        mode,
    )
}

/// Mirrors converted camera bitmap into `dst` of the same dimensions, e.g. for front lens preview.
pub fn mirror_bitmap(
    src: &RgbaBitmapMut,
    dst: &mut RgbaBitmapMut,
    mode: MirrorMode,
) -> Result<(), YuvError> {
    src.check_constraints()?;
    dst.check_constraints()?;
    if (dst.width, dst.height) != (src.width, src.height) {
        return Err(YuvError::DimensionMismatch(MismatchedDimensions {
            expected: (src.width, src.height),
            received: (dst.width, dst.height),
        }));
    }
    mirror_rgba(
        src.data.borrow(),
        src.stride as usize,
        dst.data.as_mut(),
        dst.stride as usize,
        src.width as usize,
        src.height as usize,
        mode,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::BufferStoreMut;
    use rand::Rng;

    fn random_bitmap(width: u32, height: u32) -> RgbaBitmapMut<'static> {
        let mut rng = rand::rng();
        let data = (0..width as usize * height as usize * 4)
            .map(|_| rng.random())
            .collect::<Vec<u8>>();
        RgbaBitmapMut {
            data: BufferStoreMut::Owned(data),
            stride: width * 4,
            width,
            height,
        }
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(RotationMode::from_degrees(0), None);
        assert_eq!(RotationMode::from_degrees(90), Some(RotationMode::Rotate90));
        assert_eq!(RotationMode::from_degrees(450), Some(RotationMode::Rotate90));
        assert_eq!(RotationMode::from_degrees(270), Some(RotationMode::Rotate270));
        assert_eq!(RotationMode::Rotate270.rotated_size(6, 4), (4, 6));
    }

    #[test]
    fn test_rotate180_swaps_pixels() {
        let mut src_data = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let src = RgbaBitmapMut {
            data: BufferStoreMut::Borrowed(&mut src_data),
            stride: 8,
            width: 2,
            height: 1,
        };
        let mut dst = RgbaBitmapMut::alloc(2, 1);
        rotate_bitmap(&src, &mut dst, RotationMode::Rotate180).unwrap();
        assert_eq!(dst.data.borrow(), &[5, 6, 7, 8, 1, 2, 3, 4]);
    }

    #[test]
    fn test_four_quarter_turns_is_identity() {
        let original = random_bitmap(6, 4);
        let mut current = random_bitmap(6, 4);
        current.data.as_mut().copy_from_slice(original.data.borrow());
        for _ in 0..4 {
            let (width, height) =
                RotationMode::Rotate90.rotated_size(current.width, current.height);
            let mut rotated = RgbaBitmapMut::alloc(width, height);
            rotate_bitmap(&current, &mut rotated, RotationMode::Rotate90).unwrap();
            current = rotated;
        }
        assert_eq!((current.width, current.height), (6, 4));
        assert_eq!(current.data.borrow(), original.data.borrow());
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        for mode in [MirrorMode::Horizontal, MirrorMode::Vertical] {
            let original = random_bitmap(5, 3);
            let mut once = RgbaBitmapMut::alloc(5, 3);
            let mut twice = RgbaBitmapMut::alloc(5, 3);
            mirror_bitmap(&original, &mut once, mode).unwrap();
            mirror_bitmap(&once, &mut twice, mode).unwrap();
            assert_eq!(twice.data.borrow(), original.data.borrow());
        }
    }

    fn bitmap_from(values: &[u8], width: u32, height: u32) -> RgbaBitmapMut<'static> {
        let data = values
            .iter()
            .flat_map(|&v| [v, v, v, 255])
            .collect::<Vec<u8>>();
        RgbaBitmapMut {
            data: BufferStoreMut::Owned(data),
            stride: width * 4,
            width,
            height,
        }
    }

    fn red_channel(bitmap: &RgbaBitmapMut) -> Vec<u8> {
        bitmap.data.borrow().iter().step_by(4).copied().collect()
    }

    #[test]
    fn test_rotate90_is_clockwise() {
        let square = bitmap_from(&[1, 2, 3, 4], 2, 2);
        let mut rotated = RgbaBitmapMut::alloc(2, 2);
        rotate_bitmap(&square, &mut rotated, RotationMode::Rotate90).unwrap();
        assert_eq!(red_channel(&rotated), [3, 1, 4, 2]);

        rotate_bitmap(&square, &mut rotated, RotationMode::Rotate270).unwrap();
        assert_eq!(red_channel(&rotated), [2, 4, 1, 3]);

        let wide = bitmap_from(&[1, 2, 3, 4, 5, 6], 3, 2);
        let mut tall = RgbaBitmapMut::alloc(2, 3);
        rotate_bitmap(&wide, &mut tall, RotationMode::Rotate90).unwrap();
        assert_eq!(red_channel(&tall), [4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_quarter_turns_move_every_pixel() {
        for (width, height) in [(6u32, 4u32), (4, 6), (3, 5), (8, 12), (17, 9), (640, 480)] {
            let src = random_bitmap(width, height);
            let mut cw = RgbaBitmapMut::alloc(height, width);
            let mut ccw = RgbaBitmapMut::alloc(height, width);
            rotate_bitmap(&src, &mut cw, RotationMode::Rotate90).unwrap();
            rotate_bitmap(&src, &mut ccw, RotationMode::Rotate270).unwrap();
            for y in 0..height {
                for x in 0..width {
                    let px = src.pixel(x, y);
                    assert_eq!(
                        cw.pixel(height - 1 - y, x),
                        px,
                        "{}x{} at {},{}",
                        width,
                        height,
                        x,
                        y
                    );
                    assert_eq!(
                        ccw.pixel(y, width - 1 - x),
                        px,
                        "{}x{} at {},{}",
                        width,
                        height,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotate270_undoes_rotate90() {
        let src = random_bitmap(7, 3);
        let mut turned = RgbaBitmapMut::alloc(3, 7);
        let mut restored = RgbaBitmapMut::alloc(7, 3);
        rotate_bitmap(&src, &mut turned, RotationMode::Rotate90).unwrap();
        rotate_bitmap(&turned, &mut restored, RotationMode::Rotate270).unwrap();
        assert_eq!(restored.data.borrow(), src.data.borrow());
    }

    #[test]
    fn test_rotate_into_padded_destination() {
        let src = random_bitmap(5, 3);
        let mut memory = vec![7u8; 16 * 5];
        let mut dst = RgbaBitmapMut {
            data: BufferStoreMut::Borrowed(&mut memory),
            stride: 16,
            width: 3,
            height: 5,
        };
        rotate_bitmap(&src, &mut dst, RotationMode::Rotate90).unwrap();
        assert_eq!(dst.pixel(2, 0), src.pixel(0, 0));
        assert_eq!(dst.pixel(0, 4), src.pixel(4, 2));
        assert!(memory.chunks_exact(16).all(|row| row[12..] == [7, 7, 7, 7]));
    }

    #[test]
    fn test_mirror_axes() {
        let src = bitmap_from(&[1, 2, 3, 4, 5, 6], 3, 2);
        let mut dst = RgbaBitmapMut::alloc(3, 2);
        mirror_bitmap(&src, &mut dst, MirrorMode::Horizontal).unwrap();
        assert_eq!(red_channel(&dst), [3, 2, 1, 6, 5, 4]);
        mirror_bitmap(&src, &mut dst, MirrorMode::Vertical).unwrap();
        assert_eq!(red_channel(&dst), [4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_rotation_requires_swapped_dimensions() {
        let src = random_bitmap(6, 4);
        let mut dst = RgbaBitmapMut::alloc(6, 4);
        assert!(matches!(
            rotate_bitmap(&src, &mut dst, RotationMode::Rotate90),
            Err(YuvError::DimensionMismatch(_))
        ));
    }
}
