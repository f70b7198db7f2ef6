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
use crate::built_coefficients::search_inverse_transform;
use crate::numerics::qrshr;
use crate::yuv_error::{check_matrix, check_rgba_destination};
use crate::yuv_support::*;
use crate::{YuvBiPlanarImage, YuvError};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

fn yuv_nv_to_rgbx<const UV_ORDER: u8, const DESTINATION_CHANNELS: u8>(
    image: &YuvBiPlanarImage<u8>,
    bgra: &mut [u8],
    bgra_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    let order: YuvNVOrder = UV_ORDER.into();
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let channels = dst_chans.get_channels_count();

    image.check_constraints()?;
    check_rgba_destination(bgra, bgra_stride, image.width, image.height, channels)?;
    check_matrix(matrix)?;

    let chroma_range = get_yuv_range(8, range);
    const PRECISION: i32 = 13;

    let inverse_transform = search_inverse_transform(PRECISION as u32, range, matrix);
    let cr_coef = inverse_transform.cr_coef;
    let cb_coef = inverse_transform.cb_coef;
    let y_coef = inverse_transform.y_coef;
    let g_coef_1 = inverse_transform.g_coeff_1;
    let g_coef_2 = inverse_transform.g_coeff_2;

    let bias_y = chroma_range.bias_y as i32;
    let bias_uv = chroma_range.bias_uv as i32;

    let width = image.width as usize;
    let y_stride = image.y_stride as usize;
    let uv_stride = image.uv_stride as usize;
    let chroma_width = image.chroma_width();
    let chroma_height = image.chroma_height();

    // Chroma pairs past the stored extent repeat the last pair, this only happens for
    // odd trailing columns and rows.
    let process_row = |y: usize, rgba: &mut [u8]| {
        let y_src = &image.y_plane[y * y_stride..y * y_stride + width];
        let uv_row = (y / 2).min(chroma_height - 1);
        let uv_src = &image.uv_plane[uv_row * uv_stride..uv_row * uv_stride + chroma_width * 2];

        for (cx, (rgba, y_src)) in rgba[0..width * channels]
            .chunks_mut(channels * 2)
            .zip(y_src.chunks(2))
            .enumerate()
        {
            let uv_src = &uv_src[cx.min(chroma_width - 1) * 2..];
            let cb_value = (uv_src[order.get_u_position()] as i32) - bias_uv;
            let cr_value = (uv_src[order.get_v_position()] as i32) - bias_uv;

            let g_built_coeff = -g_coef_1 * cr_value - g_coef_2 * cb_value;

            for (rgba, &y_vl) in rgba.chunks_exact_mut(channels).zip(y_src.iter()) {
                let y_value: i32 = (y_vl as i32 - bias_y) * y_coef;

                let r = qrshr::<PRECISION, 8>(y_value + cr_coef * cr_value);
                let b = qrshr::<PRECISION, 8>(y_value + cb_coef * cb_value);
                let g = qrshr::<PRECISION, 8>(y_value + g_built_coeff);

                rgba[dst_chans.get_b_channel_offset()] = b as u8;
                rgba[dst_chans.get_g_channel_offset()] = g as u8;
                rgba[dst_chans.get_r_channel_offset()] = r as u8;

                if dst_chans.has_alpha() {
                    rgba[dst_chans.get_a_channel_offset()] = 255;
                }
            }
        }
    };

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = bgra.par_chunks_exact_mut(bgra_stride as usize).enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = bgra.chunks_exact_mut(bgra_stride as usize).enumerate();
    }
    iter.for_each(|(y, rgba)| process_row(y, rgba));

    Ok(())
}

/// Converts Bi-Planar 4:2:0 image with given chroma order into requested interleaved layout.
pub(crate) fn yuv_nv_to_rgbx_dispatch(
    image: &YuvBiPlanarImage<u8>,
    dst: &mut [u8],
    dst_stride: u32,
    order: YuvNVOrder,
    channels: YuvSourceChannels,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    match (order, channels) {
        (YuvNVOrder::VU, YuvSourceChannels::Rgba) => {
            yuv_nv21_to_rgba(image, dst, dst_stride, range, matrix)
        }
        (YuvNVOrder::VU, YuvSourceChannels::Bgra) => {
            yuv_nv21_to_bgra(image, dst, dst_stride, range, matrix)
        }
        (YuvNVOrder::VU, YuvSourceChannels::Rgb) => {
            yuv_nv21_to_rgb(image, dst, dst_stride, range, matrix)
        }
        (YuvNVOrder::UV, YuvSourceChannels::Rgba) => {
            yuv_nv12_to_rgba(image, dst, dst_stride, range, matrix)
        }
        (YuvNVOrder::UV, YuvSourceChannels::Bgra) => {
            yuv_nv12_to_bgra(image, dst, dst_stride, range, matrix)
        }
        (YuvNVOrder::UV, YuvSourceChannels::Rgb) => {
            yuv_nv12_to_rgb(image, dst, dst_stride, range, matrix)
        }
    }
}

/// Convert YUV NV21 format to RGBA format.
///
/// This function takes YUV NV21 data with 8-bit precision,
/// and converts it to RGBA format with 8-bit per channel precision.
///
/// # Arguments
///
/// * `bi_planar_image` - Source Bi-Planar image.
/// * `rgba` - A mutable slice to store the converted RGBA data.
/// * `rgba_stride` - The stride (components per row) for the RGBA image data.
/// * `range` - The YUV range (limited or full).
/// * `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
///
/// # Errors
///
/// Returns [YuvError] if the lengths of the planes or the RGBA data are not valid based
/// on the specified width, height, and strides.
///
pub fn yuv_nv21_to_rgba(
    bi_planar_image: &YuvBiPlanarImage<u8>,
    rgba: &mut [u8],
    rgba_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuv_nv_to_rgbx::<{ YuvNVOrder::VU as u8 }, { YuvSourceChannels::Rgba as u8 }>(
        bi_planar_image,
        rgba,
        rgba_stride,
        range,
        matrix,
    )
}

/// Convert YUV NV21 format to BGRA format.
///
/// # Arguments
///
/// * `bi_planar_image` - Source Bi-Planar image.
/// * `bgra` - A mutable slice to store the converted BGRA data.
/// * `bgra_stride` - The stride (components per row) for the BGRA image data.
/// * `range` - The YUV range (limited or full).
/// * `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
///
pub fn yuv_nv21_to_bgra(
    bi_planar_image: &YuvBiPlanarImage<u8>,
    bgra: &mut [u8],
    bgra_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuv_nv_to_rgbx::<{ YuvNVOrder::VU as u8 }, { YuvSourceChannels::Bgra as u8 }>(
        bi_planar_image,
        bgra,
        bgra_stride,
        range,
        matrix,
    )
}

/// Convert YUV NV21 format to RGB format.
pub fn yuv_nv21_to_rgb(
    bi_planar_image: &YuvBiPlanarImage<u8>,
    rgb: &mut [u8],
    rgb_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuv_nv_to_rgbx::<{ YuvNVOrder::VU as u8 }, { YuvSourceChannels::Rgb as u8 }>(
        bi_planar_image,
        rgb,
        rgb_stride,
        range,
        matrix,
    )
}

/// Convert YUV NV12 format to RGBA format.
///
/// This function takes YUV NV12 data with 8-bit precision,
/// and converts it to RGBA format with 8-bit per channel precision.
///
/// # Arguments
///
/// * `bi_planar_image` - Source Bi-Planar image.
/// * `rgba` - A mutable slice to store the converted RGBA data.
/// * `rgba_stride` - The stride (components per row) for the RGBA image data.
/// * `range` - The YUV range (limited or full).
/// * `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
///
pub fn yuv_nv12_to_rgba(
    bi_planar_image: &YuvBiPlanarImage<u8>,
    rgba: &mut [u8],
    rgba_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuv_nv_to_rgbx::<{ YuvNVOrder::UV as u8 }, { YuvSourceChannels::Rgba as u8 }>(
        bi_planar_image,
        rgba,
        rgba_stride,
        range,
        matrix,
    )
}

/// Convert YUV NV12 format to BGRA format.
pub fn yuv_nv12_to_bgra(
    bi_planar_image: &YuvBiPlanarImage<u8>,
    bgra: &mut [u8],
    bgra_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuv_nv_to_rgbx::<{ YuvNVOrder::UV as u8 }, { YuvSourceChannels::Bgra as u8 }>(
        bi_planar_image,
        bgra,
        bgra_stride,
        range,
        matrix,
    )
}

/// Convert YUV NV12 format to RGB format.
pub fn yuv_nv12_to_rgb(
    bi_planar_image: &YuvBiPlanarImage<u8>,
    rgb: &mut [u8],
    rgb_stride: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuv_nv_to_rgbx::<{ YuvNVOrder::UV as u8 }, { YuvSourceChannels::Rgb as u8 }>(
        bi_planar_image,
        rgb,
        rgb_stride,
        range,
        matrix,
    )
}
