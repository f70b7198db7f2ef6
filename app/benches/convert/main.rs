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
#[path = "../../src/support.rs"]
mod support;

use criterion::{criterion_group, criterion_main, Criterion};
use support::{camera_image, CameraFrameStore};
use yuvframe::{
    rotate_bitmap, ConverterOptions, CropRect, FormatPolicy, RgbaBitmapMut, RotationMode,
    YuvToRgbConverter,
};

pub fn criterion_benchmark(c: &mut Criterion) {
    let store = CameraFrameStore::random(1920, 1080);
    let planes = store.planes();
    let frame = camera_image(&planes, CropRect::full(store.width, store.height));
    let options = ConverterOptions {
        format_policy: FormatPolicy::Strict,
        ..Default::default()
    };

    c.bench_function("yuvframe YUV_420_888 -> RGBA 1080p", |b| {
        let mut converter = YuvToRgbConverter::new(options).unwrap();
        let mut bitmap = RgbaBitmapMut::alloc(store.width, store.height);
        b.iter(|| {
            converter.convert(&frame, &mut bitmap).unwrap();
        })
    });

    c.bench_function("yuvframe YUV_420_888 -> RGBA cropped 720p", |b| {
        let crop = CropRect::new(320, 180, 1600, 900);
        let cropped = camera_image(&planes, crop);
        let mut converter = YuvToRgbConverter::new(options).unwrap();
        let mut bitmap = RgbaBitmapMut::alloc(crop.width(), crop.height());
        b.iter(|| {
            converter.convert(&cropped, &mut bitmap).unwrap();
        })
    });

    c.bench_function("yuvframe Rotate90 RGBA 1080p", |b| {
        let mut converter = YuvToRgbConverter::new(options).unwrap();
        let mut bitmap = RgbaBitmapMut::alloc(store.width, store.height);
        converter.convert(&frame, &mut bitmap).unwrap();
        let mut rotated = RgbaBitmapMut::alloc(store.height, store.width);
        b.iter(|| {
            rotate_bitmap(&bitmap, &mut rotated, RotationMode::Rotate90).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
