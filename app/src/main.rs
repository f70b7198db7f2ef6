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
mod support;

use crate::support::{camera_image, CameraFrameStore};
use clap::Parser as ClapParser;
use image::{GenericImageView, ImageReader};
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use yuvframe::{
    mirror_bitmap, rotate_bitmap, ConverterOptions, CropRect, FormatPolicy, FrameStatus,
    MirrorMode, RgbaBitmapMut, RotationMode, YuvToRgbConverter,
};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Picture encoded into a synthetic camera frame, noise frame when omitted
    input: Option<PathBuf>,

    /// Clockwise rotation in degrees as reported by the camera
    #[arg(short, long, default_value_t = 0)]
    rotate: u32,

    /// Mirror horizontally, as front lens previews do
    #[arg(short, long)]
    mirror: bool,

    #[arg(short, long, default_value = "converted.png")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let store = match &args.input {
        Some(path) => {
            let img = ImageReader::open(path)?.decode()?;
            let dimensions = img.dimensions();
            let rgb = img.to_rgb8();
            CameraFrameStore::from_rgb(rgb.as_raw(), dimensions.0, dimensions.1)
        }
        None => CameraFrameStore::random(640, 480),
    };
    let planes = store.planes();
    let frame = camera_image(&planes, CropRect::full(store.width, store.height));

    let options = ConverterOptions {
        format_policy: FormatPolicy::Strict,
        ..Default::default()
    };
    let mut converter = YuvToRgbConverter::new(options)?;
    let mut bitmap = RgbaBitmapMut::alloc(store.width, store.height);

    // First frame pays for scratch allocation, the second shows steady state cost
    for pass in 0..2 {
        let start_time = Instant::now();
        let status = converter.convert(&frame, &mut bitmap)?;
        println!(
            "Pass {} {:?}: {}x{} in {:?}",
            pass,
            status,
            store.width,
            store.height,
            start_time.elapsed()
        );
        if status == FrameStatus::Dropped {
            return Ok(());
        }
    }

    if args.mirror {
        let mut mirrored = RgbaBitmapMut::alloc(bitmap.width, bitmap.height);
        mirror_bitmap(&bitmap, &mut mirrored, MirrorMode::Horizontal)?;
        bitmap = mirrored;
    }

    if let Some(rotation) = RotationMode::from_degrees(args.rotate) {
        let (width, height) = rotation.rotated_size(bitmap.width, bitmap.height);
        let mut rotated = RgbaBitmapMut::alloc(width, height);
        let start_time = Instant::now();
        rotate_bitmap(&bitmap, &mut rotated, rotation)?;
        println!("Rotation {:?}: {:?}", rotation, start_time.elapsed());
        bitmap = rotated;
    }

    image::save_buffer(
        &args.output,
        bitmap.data.borrow(),
        bitmap.width,
        bitmap.height,
        image::ExtendedColorType::Rgba8,
    )?;
    log::info!("Saved {}", args.output.display());
    Ok(())
}
