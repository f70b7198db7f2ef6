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
use rand::Rng;
use yuvframe::{CameraImage, CropRect, ImagePlane, YuvImageFormat};

const ROW_PADDING: u32 = 64;

/// Owned storage laid out the way Android camera HAL hands out `YUV_420_888` frames:
/// rows padded past the image width, both chroma planes share one VU buffer
/// with pixel stride 2.
pub struct CameraFrameStore {
    pub width: u32,
    pub height: u32,
    y_stride: u32,
    chroma_stride: u32,
    luma: Vec<u8>,
    vu: Vec<u8>,
}

impl CameraFrameStore {
    /// Encodes interleaved 8 bit RGB into BT.601 full range YUV 4:2:0
    pub fn from_rgb(rgb: &[u8], width: u32, height: u32) -> CameraFrameStore {
        let y_stride = width + ROW_PADDING;
        let chroma_width = width.div_ceil(2);
        let chroma_height = height.div_ceil(2);
        let chroma_stride = chroma_width * 2 + ROW_PADDING;

        let mut luma = vec![0u8; y_stride as usize * height as usize];
        let mut vu = vec![0u8; chroma_stride as usize * chroma_height as usize];

        let rgb_stride = width as usize * 3;
        for (y, (dst, src)) in luma
            .chunks_exact_mut(y_stride as usize)
            .zip(rgb.chunks_exact(rgb_stride))
            .enumerate()
        {
            for (x, (dst, px)) in dst.iter_mut().zip(src.chunks_exact(3)).enumerate() {
                let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
                *dst = (0.299 * r + 0.587 * g + 0.114 * b).round().clamp(0., 255.) as u8;
                if y % 2 == 0 && x % 2 == 0 {
                    let cr = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.;
                    let cb = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.;
                    let offset = (y / 2) * chroma_stride as usize + x;
                    vu[offset] = cr.round().clamp(0., 255.) as u8;
                    vu[offset + 1] = cb.round().clamp(0., 255.) as u8;
                }
            }
        }

        CameraFrameStore {
            width,
            height,
            y_stride,
            chroma_stride,
            luma,
            vu,
        }
    }

    /// Noise frame, used when no input picture is given and by benches
    pub fn random(width: u32, height: u32) -> CameraFrameStore {
        let mut rng = rand::rng();
        let rgb = (0..width as usize * height as usize * 3)
            .map(|_| rng.random::<u8>())
            .collect::<Vec<u8>>();
        CameraFrameStore::from_rgb(&rgb, width, height)
    }

    /// Planes in `YUV_420_888` order: Y, U, V.
    ///
    /// U starts one byte into the shared VU buffer, exactly as camera aliases it.
    pub fn planes(&self) -> [ImagePlane<'_>; 3] {
        [
            ImagePlane {
                buffer: &self.luma,
                row_stride: self.y_stride,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &self.vu[1..],
                row_stride: self.chroma_stride,
                pixel_stride: 2,
            },
            ImagePlane {
                buffer: &self.vu,
                row_stride: self.chroma_stride,
                pixel_stride: 2,
            },
        ]
    }
}

pub fn camera_image<'a>(planes: &'a [ImagePlane<'a>], crop_rect: CropRect) -> CameraImage<'a> {
    CameraImage {
        format: YuvImageFormat::Yuv420_888,
        crop_rect,
        planes,
    }
}
