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
use crate::images::{RgbaBitmapMut, YuvBiPlanarImage};
use crate::yuv_error::{check_matrix, check_overflow_v3, MismatchedSize};
use crate::yuv_nv_to_rgba::yuv_nv_to_rgbx_dispatch;
use crate::yuv_support::{YuvNVOrder, YuvRange, YuvSourceChannels, YuvStandardMatrix};
use crate::YuvError;

/// Converts a semi-planar YUV 4:2:0 frame into a 4 channels bitmap.
///
/// Implementations may keep staging allocations between frames, [ColorConversionEngine::resize]
/// is called before the first frame and whenever frame dimensions change.
pub trait ColorConversionEngine {
    /// Frame dimensions changed, staging must be rebuilt
    fn resize(&mut self, width: u32, height: u32);

    fn convert(
        &mut self,
        source: &YuvBiPlanarImage<u8>,
        target: &mut RgbaBitmapMut,
    ) -> Result<(), YuvError>;
}

/// CPU fixed point NV21/NV12 engine
#[derive(Debug, Clone)]
pub struct NvToRgbaEngine {
    order: YuvNVOrder,
    destination: YuvSourceChannels,
    range: YuvRange,
    matrix: YuvStandardMatrix,
    staging: Vec<u8>,
}

impl NvToRgbaEngine {
    /// Creates engine reading `order` chroma pairs into `destination` layout.
    ///
    /// Returns [YuvError::UnsupportedDestination] for layouts that are not 4 channels,
    /// and [YuvError::InvalidMatrix] for a custom matrix whose `kr`, `kb` cannot form a
    /// valid transform.
    pub fn new(
        order: YuvNVOrder,
        destination: YuvSourceChannels,
        range: YuvRange,
        matrix: YuvStandardMatrix,
    ) -> Result<Self, YuvError> {
        if destination.get_channels_count() != RgbaBitmapMut::CHANNELS {
            return Err(YuvError::UnsupportedDestination);
        }
        check_matrix(matrix)?;
        Ok(NvToRgbaEngine {
            order,
            destination,
            range,
            matrix,
            staging: Vec::new(),
        })
    }

    pub(crate) fn staging_len(&self) -> usize {
        self.staging.len()
    }
}

impl ColorConversionEngine for NvToRgbaEngine {
    fn resize(&mut self, width: u32, height: u32) {
        let required = width as usize * height as usize * RgbaBitmapMut::CHANNELS;
        self.staging = vec![0u8; required];
        log::debug!("Rebuilt conversion staging for {}x{}", width, height);
    }

    fn convert(
        &mut self,
        source: &YuvBiPlanarImage<u8>,
        target: &mut RgbaBitmapMut,
    ) -> Result<(), YuvError> {
        target.check_constraints()?;
        if (source.width, source.height) != (target.width, target.height) {
            return Err(YuvError::ImageDimensionsNotMatch);
        }
        let row_length = source.width as usize * RgbaBitmapMut::CHANNELS;
        let required = check_overflow_v3(
            source.width as usize,
            source.height as usize,
            RgbaBitmapMut::CHANNELS,
        )?;
        if self.staging.len() != required {
            return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
                expected: required,
                received: self.staging.len(),
            }));
        }

        yuv_nv_to_rgbx_dispatch(
            source,
            &mut self.staging,
            row_length as u32,
            self.order,
            self.destination,
            self.range,
            self.matrix,
        )?;

        let target_stride = target.stride as usize;
        for (dst, src) in target
            .data
            .as_mut()
            .chunks_exact_mut(target_stride)
            .zip(self.staging.chunks_exact(row_length))
        {
            dst[0..row_length].copy_from_slice(src);
        }
        Ok(())
    }
}
