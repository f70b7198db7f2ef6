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
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yuvframe::{
    CameraImage, ChromaPlaneOrder, ConverterOptions, CropRect, FormatPolicy, FrameStatus,
    ImagePlane, RgbaBitmapMut, YuvImageFormat, YuvToRgbConverter,
};

#[derive(Arbitrary, Debug)]
struct FrameGeometry {
    width: u8,
    height: u8,
    luma_padding: u8,
    chroma_padding: u8,
    chroma_pixel_stride: u8,
    luma_pixel_stride: u8,
    crop: (u8, u8, u8, u8),
    truncate: u8,
    planes_count: u8,
    foreign_format: bool,
    skip_frames: bool,
    swap_chroma: bool,
    value: u8,
}

fuzz_target!(|geometry: FrameGeometry| {
    fuzz_camera_frame(geometry);
});

fn fuzz_camera_frame(geometry: FrameGeometry) {
    let width = geometry.width as usize;
    let height = geometry.height as usize;
    let luma_pixel_stride = (geometry.luma_pixel_stride % 3) as usize;
    let chroma_pixel_stride = (geometry.chroma_pixel_stride % 3) as usize;

    let luma_stride = width * luma_pixel_stride + geometry.luma_padding as usize;
    let chroma_stride = width.div_ceil(2) * chroma_pixel_stride + geometry.chroma_padding as usize;

    let luma_len = (luma_stride * height).saturating_sub(geometry.truncate as usize);
    let chroma_len = (chroma_stride * height.div_ceil(2)).saturating_sub(geometry.truncate as usize);

    let luma = vec![geometry.value; luma_len];
    let chroma = vec![geometry.value.wrapping_add(64); chroma_len];

    let all_planes = [
        ImagePlane {
            buffer: &luma,
            row_stride: luma_stride as u32,
            pixel_stride: luma_pixel_stride as u32,
        },
        ImagePlane {
            buffer: &chroma,
            row_stride: chroma_stride as u32,
            pixel_stride: chroma_pixel_stride as u32,
        },
        ImagePlane {
            buffer: &chroma,
            row_stride: chroma_stride as u32,
            pixel_stride: chroma_pixel_stride as u32,
        },
        ImagePlane {
            buffer: &chroma,
            row_stride: chroma_stride as u32,
            pixel_stride: chroma_pixel_stride as u32,
        },
    ];
    let planes_count = (geometry.planes_count % 5) as usize;

    let crop_rect = CropRect::new(
        geometry.crop.0 as u32,
        geometry.crop.1 as u32,
        geometry.crop.2 as u32,
        geometry.crop.3 as u32,
    );
    let image = CameraImage {
        format: if geometry.foreign_format {
            YuvImageFormat::Nv21
        } else {
            YuvImageFormat::Yuv420_888
        },
        crop_rect,
        planes: &all_planes[..planes_count],
    };

    let options = ConverterOptions {
        format_policy: if geometry.skip_frames {
            FormatPolicy::SkipFrame
        } else {
            FormatPolicy::Strict
        },
        plane_order: if geometry.swap_chroma {
            ChromaPlaneOrder::VU
        } else {
            ChromaPlaneOrder::UV
        },
        ..Default::default()
    };
    let mut converter = YuvToRgbConverter::new(options).unwrap();
    let mut bitmap = RgbaBitmapMut::alloc(crop_rect.width(), crop_rect.height());

    // Same frame twice exercises scratch reuse path
    for _ in 0..2 {
        match converter.convert(&image, &mut bitmap) {
            Ok(FrameStatus::Converted) => {
                assert!(!geometry.foreign_format);
                assert_eq!(planes_count, 3);
            }
            Ok(FrameStatus::Dropped) => assert!(geometry.skip_frames),
            Err(_) => {}
        }
    }
}
