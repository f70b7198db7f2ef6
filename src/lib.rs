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
//! Camera frame to RGBA conversion.
//!
//! Accepts Android style `YUV_420_888` frames described by [CameraImage], flattens
//! the planes into a reusable NV21 buffer and converts it to a 4 channels bitmap
//! with a fixed point YUV kernel.
//!
//! Row processing can be spread over threads with the `rayon` feature,
//! `geometry` feature adds rotation and mirroring of converted bitmaps.
#![forbid(unsafe_code)]
mod built_coefficients;
mod conversion_engine;
mod converter;
#[cfg(feature = "geometry")]
mod geometry;
mod images;
mod numerics;
mod plane_flatten;
mod yuv_error;
mod yuv_nv_to_rgba;
mod yuv_support;

pub use images::BufferStoreMut;
pub use images::CameraImage;
pub use images::CropRect;
pub use images::ImagePlane;
pub use images::RgbaBitmapMut;
pub use images::YuvBiPlanarImage;
pub use images::YuvImageFormat;

pub use yuv_error::MismatchedDimensions;
pub use yuv_error::MismatchedSize;
pub use yuv_error::YuvError;

pub use yuv_support::ChromaPlaneOrder;
pub use yuv_support::YuvNVOrder;
pub use yuv_support::YuvRange;
pub use yuv_support::YuvSourceChannels;
pub use yuv_support::YuvStandardMatrix;

pub use yuv_nv_to_rgba::yuv_nv12_to_bgra;
pub use yuv_nv_to_rgba::yuv_nv12_to_rgb;
pub use yuv_nv_to_rgba::yuv_nv12_to_rgba;
pub use yuv_nv_to_rgba::yuv_nv21_to_bgra;
pub use yuv_nv_to_rgba::yuv_nv21_to_rgb;
pub use yuv_nv_to_rgba::yuv_nv21_to_rgba;

pub use conversion_engine::ColorConversionEngine;
pub use conversion_engine::NvToRgbaEngine;

pub use converter::ConverterOptions;
pub use converter::FormatPolicy;
pub use converter::FrameStatus;
pub use converter::YuvToRgbConverter;

#[cfg(feature = "geometry")]
pub use geometry::{
    mirror_bitmap, mirror_rgba, rotate_bitmap, rotate_rgba, MirrorMode, RotationMode,
};
