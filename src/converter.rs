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
//! Camera frame to bitmap conversion.
//!
//! [YuvToRgbConverter] keeps its scratch memory between frames, one instance is meant to be owned
//! by the single thread that receives camera frames. Conversion borrows the converter mutably so
//! concurrent use requires external locking, e.g. `Mutex<YuvToRgbConverter>`.

use crate::conversion_engine::{ColorConversionEngine, NvToRgbaEngine};
use crate::images::{CameraImage, RgbaBitmapMut, YuvBiPlanarImage, YuvImageFormat};
use crate::plane_flatten::{flatten_yuv420, PlaneCopyMode};
use crate::yuv_error::{check_overflow_v2, MismatchedDimensions, MismatchedSize};
use crate::yuv_support::{
    ChromaPlaneOrder, YuvNVOrder, YuvRange, YuvSourceChannels, YuvStandardMatrix,
};
use crate::YuvError;

const PLANES_COUNT: usize = 3;

/// What happens to frames that are not planar YUV 4:2:0
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatPolicy {
    /// Return [YuvError::FormatViolation] or [YuvError::PlaneCountMismatch]
    Strict,
    /// Log a warning and report [FrameStatus::Dropped]
    SkipFrame,
}

impl Default for FormatPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            FormatPolicy::Strict
        } else {
            FormatPolicy::SkipFrame
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ConverterOptions {
    pub format_policy: FormatPolicy,
    /// Chroma channels carried by planes 1 and 2
    pub plane_order: ChromaPlaneOrder,
    pub range: YuvRange,
    pub matrix: YuvStandardMatrix,
    /// Channel order written into the bitmap, must be 4 channels
    pub destination: YuvSourceChannels,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameStatus {
    Converted,
    /// Frame was not planar YUV 4:2:0 and [FormatPolicy::SkipFrame] is active, bitmap untouched
    Dropped,
}

/// Flattened NV21 frame, sized for one pixel count
#[derive(Debug, Default)]
struct InterleavedBuffer {
    data: Vec<u8>,
    pixel_count: usize,
}

impl InterleavedBuffer {
    /// Returns `true` when storage was reallocated
    fn ensure(&mut self, pixel_count: usize, bits_per_pixel: usize) -> Result<bool, YuvError> {
        if !self.data.is_empty() && self.pixel_count == pixel_count {
            return Ok(false);
        }
        let required = check_overflow_v2(pixel_count, bits_per_pixel)? / 8;
        self.data = vec![0u8; required];
        self.pixel_count = pixel_count;
        Ok(true)
    }
}

/// Converts camera planar YUV 4:2:0 frames into 4 channels bitmaps.
///
/// # Examples
///
/// ```
/// use yuvframe::{CameraImage, ConverterOptions, CropRect, ImagePlane, RgbaBitmapMut};
/// use yuvframe::{YuvImageFormat, YuvToRgbConverter};
///
/// let luma = [10u8, 20, 30, 40];
/// let chroma = [128u8];
/// let planes = [
///     ImagePlane { buffer: &luma, row_stride: 2, pixel_stride: 1 },
///     ImagePlane { buffer: &chroma, row_stride: 1, pixel_stride: 1 },
///     ImagePlane { buffer: &chroma, row_stride: 1, pixel_stride: 1 },
/// ];
/// let frame = CameraImage {
///     format: YuvImageFormat::Yuv420_888,
///     crop_rect: CropRect::full(2, 2),
///     planes: &planes,
/// };
/// let mut converter = YuvToRgbConverter::new(ConverterOptions::default()).unwrap();
/// let mut bitmap = RgbaBitmapMut::alloc(2, 2);
/// converter.convert(&frame, &mut bitmap).unwrap();
/// assert_eq!(bitmap.pixel(1, 0), Some([20, 20, 20, 255]));
/// ```
#[derive(Debug)]
pub struct YuvToRgbConverter<E: ColorConversionEngine = NvToRgbaEngine> {
    options: ConverterOptions,
    engine: E,
    interleaved: InterleavedBuffer,
}

impl YuvToRgbConverter<NvToRgbaEngine> {
    /// Creates converter backed by the CPU NV21 engine.
    pub fn new(options: ConverterOptions) -> Result<Self, YuvError> {
        let engine = NvToRgbaEngine::new(
            YuvNVOrder::VU,
            options.destination,
            options.range,
            options.matrix,
        )?;
        Ok(Self::with_engine(options, engine))
    }
}

impl<E: ColorConversionEngine> YuvToRgbConverter<E> {
    /// Creates converter with custom engine, engine receives NV21 frames.
    pub fn with_engine(options: ConverterOptions, engine: E) -> Self {
        YuvToRgbConverter {
            options,
            engine,
            interleaved: InterleavedBuffer::default(),
        }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Converts `image` crop region into `bitmap`.
    ///
    /// `bitmap` must have exactly crop rectangle dimensions. Source planes and bitmap are only
    /// borrowed for the duration of the call, camera image may be released right after.
    pub fn convert(
        &mut self,
        image: &CameraImage,
        bitmap: &mut RgbaBitmapMut,
    ) -> Result<FrameStatus, YuvError> {
        if let Err(err) = check_format(image) {
            return match self.options.format_policy {
                FormatPolicy::Strict => Err(err),
                FormatPolicy::SkipFrame => {
                    log::warn!("Dropping camera frame: {}", err);
                    Ok(FrameStatus::Dropped)
                }
            };
        }

        let crop = image.crop_rect;
        let chroma_crop = crop.halved();
        if !crop.is_valid() || chroma_crop.width() == 0 || chroma_crop.height() == 0 {
            return Err(YuvError::InvalidCropRect);
        }
        let (width, height) = (crop.width(), crop.height());
        if (bitmap.width, bitmap.height) != (width, height) {
            return Err(YuvError::DimensionMismatch(MismatchedDimensions {
                expected: (width, height),
                received: (bitmap.width, bitmap.height),
            }));
        }
        bitmap.check_constraints()?;

        let pixel_count = check_overflow_v2(width as usize, height as usize)?;
        let bits_per_pixel = image.format.bits_per_pixel().unwrap_or(12) as usize;
        let interleaved_len = check_overflow_v2(pixel_count, bits_per_pixel)? / 8;
        // Odd crop offsets may address more chroma samples than NV21 sizing holds
        let uv_stride = chroma_crop.width() as usize * 2;
        let uv_end = pixel_count + uv_stride * chroma_crop.height() as usize;
        if uv_end > interleaved_len {
            return Err(YuvError::InterleavedBufferOverflow(MismatchedSize {
                expected: uv_end,
                received: interleaved_len,
            }));
        }

        if self.interleaved.ensure(pixel_count, bits_per_pixel)? {
            log::debug!(
                "Allocated {} bytes interleaved buffer for {}x{} frames",
                self.interleaved.data.len(),
                width,
                height
            );
            self.engine.resize(width, height);
        }

        flatten_yuv420(
            image,
            &mut self.interleaved.data,
            self.options.plane_order,
            PlaneCopyMode::Auto,
        )?;

        let (y_plane, uv_plane) = self.interleaved.data.split_at(pixel_count);
        let source = YuvBiPlanarImage {
            y_plane,
            y_stride: width,
            uv_plane: &uv_plane[..uv_end - pixel_count],
            uv_stride: uv_stride as u32,
            width,
            height,
        };
        self.engine.convert(&source, bitmap)?;
        Ok(FrameStatus::Converted)
    }
}

fn check_format(image: &CameraImage) -> Result<(), YuvError> {
    if image.format != YuvImageFormat::Yuv420_888 {
        return Err(YuvError::FormatViolation(image.format));
    }
    if image.planes.len() != PLANES_COUNT {
        return Err(YuvError::PlaneCountMismatch(MismatchedSize {
            expected: PLANES_COUNT,
            received: image.planes.len(),
        }));
    }
    Ok(())
}
