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
use crate::yuv_error::{check_interleaved_chroma_channel, check_rgba_destination, check_y8_channel};
use crate::YuvError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn as_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

/// Image format tag as reported by the camera
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum YuvImageFormat {
    /// Generic planar YUV 4:2:0, three planes with arbitrary row and pixel strides
    Yuv420_888,
    Nv21,
    Yv12,
    Jpeg,
    Rgba8888,
    Unknown(u32),
}

impl YuvImageFormat {
    /// Average bits per pixel, `None` for compressed or unknown formats
    pub const fn bits_per_pixel(&self) -> Option<u32> {
        match self {
            YuvImageFormat::Yuv420_888 | YuvImageFormat::Nv21 | YuvImageFormat::Yv12 => Some(12),
            YuvImageFormat::Rgba8888 => Some(32),
            YuvImageFormat::Jpeg | YuvImageFormat::Unknown(_) => None,
        }
    }
}

/// Rectangle in luma plane coordinates, `right` and `bottom` are exclusive
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        CropRect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle covering a whole `width` x `height` frame
    pub const fn full(width: u32, height: u32) -> Self {
        CropRect::new(0, 0, width, height)
    }

    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub const fn is_valid(&self) -> bool {
        self.right >= self.left && self.bottom >= self.top
    }

    /// Same rectangle at 4:2:0 chroma resolution, odd edges round down
    pub const fn halved(&self) -> Self {
        CropRect::new(self.left / 2, self.top / 2, self.right / 2, self.bottom / 2)
    }
}

/// One plane of a camera image
#[derive(Debug, Copy, Clone)]
pub struct ImagePlane<'a> {
    pub buffer: &'a [u8],
    /// Bytes between starts of consecutive rows
    pub row_stride: u32,
    /// Bytes between consecutive samples in a row
    pub pixel_stride: u32,
}

/// Camera frame as delivered by capture, borrowed for the duration of a conversion.
///
/// For [YuvImageFormat::Yuv420_888] planes are luma, then two half resolution chroma planes.
#[derive(Debug, Copy, Clone)]
pub struct CameraImage<'a> {
    pub format: YuvImageFormat,
    pub crop_rect: CropRect,
    pub planes: &'a [ImagePlane<'a>],
}

#[derive(Debug, Clone)]
/// Non-mutable representation of Bi-Planar YUV 4:2:0 image
pub struct YuvBiPlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub y_stride: u32,
    pub uv_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub uv_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvBiPlanarImage<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), YuvError> {
        check_y8_channel(self.y_plane, self.y_stride, self.width, self.height)?;
        check_interleaved_chroma_channel(self.uv_plane, self.uv_stride, self.width, self.height)?;
        Ok(())
    }

    /// Number of chroma pairs per row actually stored
    pub(crate) fn chroma_width(&self) -> usize {
        self.uv_stride as usize / 2
    }

    /// Number of chroma rows actually stored
    pub(crate) fn chroma_height(&self) -> usize {
        self.uv_plane.len() / self.uv_stride as usize
    }
}

#[derive(Debug)]
/// Mutable 4 channels 8 bit bitmap, channel order is decided by the producer
pub struct RgbaBitmapMut<'a> {
    pub data: BufferStoreMut<'a, u8>,
    /// Stride here always means Elements per row.
    pub stride: u32,
    pub width: u32,
    pub height: u32,
}

impl RgbaBitmapMut<'_> {
    pub const CHANNELS: usize = 4;

    /// Allocates tightly packed bitmap
    pub fn alloc(width: u32, height: u32) -> Self {
        let stride = width as usize * Self::CHANNELS;
        RgbaBitmapMut {
            data: BufferStoreMut::Owned(vec![0u8; stride * height as usize]),
            stride: stride as u32,
            width,
            height,
        }
    }

    pub fn check_constraints(&self) -> Result<(), YuvError> {
        check_rgba_destination(
            self.data.borrow(),
            self.stride,
            self.width,
            self.height,
            Self::CHANNELS,
        )
    }

    /// Pixel at `x`, `y`, `None` outside of bitmap
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y as usize * self.stride as usize + x as usize * Self::CHANNELS;
        let px = self.data.borrow().get(start..start + Self::CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
