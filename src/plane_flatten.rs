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
//! Flattens the three planes of a camera YUV 4:2:0 frame into one NV21 buffer.
//!
//! Luma is copied row by row into `[0, pixel_count)`, chroma planes are interleaved
//! with stride 2 after it, V first then U.

use crate::images::{CameraImage, CropRect, ImagePlane};
use crate::yuv_error::{check_overflow_v2, MismatchedSize};
use crate::yuv_support::ChromaPlaneOrder;
use crate::YuvError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PlaneCopyMode {
    /// Bulk copies rows whenever source and destination are both contiguous
    Auto,
    /// Always copies sample by sample
    #[cfg_attr(not(test), allow(dead_code))]
    PerSample,
}

/// Placement of one plane inside the interleaved buffer
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct PlaneDestination {
    pub(crate) stride: usize,
    pub(crate) offset: usize,
}

/// Destinations for planes 0, 1, 2.
///
/// With [ChromaPlaneOrder::UV] plane 2 (V) lands at `pixel_count` and plane 1 (U) right after
/// it, which gives NV21 ordering.
pub(crate) fn plane_destinations(
    pixel_count: usize,
    order: ChromaPlaneOrder,
) -> [PlaneDestination; 3] {
    let (plane1_offset, plane2_offset) = match order {
        ChromaPlaneOrder::UV => (pixel_count + 1, pixel_count),
        ChromaPlaneOrder::VU => (pixel_count, pixel_count + 1),
    };
    [
        PlaneDestination {
            stride: 1,
            offset: 0,
        },
        PlaneDestination {
            stride: 2,
            offset: plane1_offset,
        },
        PlaneDestination {
            stride: 2,
            offset: plane2_offset,
        },
    ]
}

/// Copies `crop` of a single plane into `dst` at `destination`.
pub(crate) fn flatten_plane(
    index: usize,
    plane: &ImagePlane,
    crop: CropRect,
    destination: PlaneDestination,
    dst: &mut [u8],
    mode: PlaneCopyMode,
) -> Result<(), YuvError> {
    if plane.row_stride == 0 || plane.pixel_stride == 0 {
        return Err(YuvError::InvalidStride(index));
    }
    let row_stride = plane.row_stride as usize;
    let pixel_stride = plane.pixel_stride as usize;
    let crop_width = crop.width() as usize;
    let crop_height = crop.height() as usize;
    if crop_width == 0 || crop_height == 0 {
        return Err(YuvError::InvalidCropRect);
    }

    let bulk_copy = mode == PlaneCopyMode::Auto && pixel_stride == 1 && destination.stride == 1;
    let row_length = if bulk_copy {
        crop_width
    } else {
        (crop_width - 1) * pixel_stride + 1
    };

    let samples = check_overflow_v2(crop_width, crop_height)?;
    let required_dst = destination.offset + (samples - 1) * destination.stride + 1;
    if required_dst > dst.len() {
        return Err(YuvError::InterleavedBufferOverflow(MismatchedSize {
            expected: required_dst,
            received: dst.len(),
        }));
    }

    let row_start = |row: usize| -> Result<usize, YuvError> {
        let y_offset = check_overflow_v2(row + crop.top as usize, row_stride)?;
        let x_offset = check_overflow_v2(crop.left as usize, pixel_stride)?;
        Ok(y_offset + x_offset)
    };
    let required_src = row_start(crop_height - 1)? + row_length;
    if required_src > plane.buffer.len() {
        return Err(YuvError::PlaneTooSmall(
            index,
            MismatchedSize {
                expected: required_src,
                received: plane.buffer.len(),
            },
        ));
    }

    let mut output_offset = destination.offset;
    for row in 0..crop_height {
        let position = row_start(row)?;
        let src = &plane.buffer[position..position + row_length];
        if bulk_copy {
            dst[output_offset..output_offset + row_length].copy_from_slice(src);
        } else {
            for (dst, &src) in dst[output_offset..]
                .iter_mut()
                .step_by(destination.stride)
                .zip(src.iter().step_by(pixel_stride))
            {
                *dst = src;
            }
        }
        output_offset += crop_width * destination.stride;
    }
    Ok(())
}

/// Flattens luma and both chroma planes of `image` into `dst`.
///
/// Caller is responsible for format and plane count validation, `dst` must hold at least
/// `pixel_count * 3 / 2` bytes.
pub(crate) fn flatten_yuv420(
    image: &CameraImage,
    dst: &mut [u8],
    order: ChromaPlaneOrder,
    mode: PlaneCopyMode,
) -> Result<(), YuvError> {
    let crop = image.crop_rect;
    let pixel_count = check_overflow_v2(crop.width() as usize, crop.height() as usize)?;
    let destinations = plane_destinations(pixel_count, order);
    for (index, (plane, destination)) in image.planes.iter().zip(destinations).enumerate() {
        let plane_crop = if index == 0 { crop } else { crop.halved() };
        flatten_plane(index, plane, plane_crop, destination, dst, mode)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::YuvImageFormat;
    use rand::Rng;

    fn frame<'a>(planes: &'a [ImagePlane<'a>], crop_rect: CropRect) -> CameraImage<'a> {
        CameraImage {
            format: YuvImageFormat::Yuv420_888,
            crop_rect,
            planes,
        }
    }

    #[test]
    fn test_plane_offsets_4x4() {
        let luma: Vec<u8> = (0..16).collect();
        let plane1 = [101u8, 102, 103, 104];
        let plane2 = [201u8, 202, 203, 204];
        let planes = [
            ImagePlane {
                buffer: &luma,
                row_stride: 4,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &plane1,
                row_stride: 2,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &plane2,
                row_stride: 2,
                pixel_stride: 1,
            },
        ];
        let image = frame(&planes, CropRect::full(4, 4));
        let mut dst = vec![0u8; 24];
        flatten_yuv420(&image, &mut dst, ChromaPlaneOrder::UV, PlaneCopyMode::Auto).unwrap();

        assert_eq!(&dst[0..16], luma.as_slice());
        let plane2_samples: Vec<u8> = dst[16..].iter().step_by(2).copied().collect();
        let plane1_samples: Vec<u8> = dst[17..].iter().step_by(2).copied().collect();
        assert_eq!(plane2_samples, plane2);
        assert_eq!(plane1_samples, plane1);

        let mut swapped = vec![0u8; 24];
        flatten_yuv420(&image, &mut swapped, ChromaPlaneOrder::VU, PlaneCopyMode::Auto).unwrap();
        assert_eq!(&swapped[16..18], &[101, 201]);
    }

    #[test]
    fn test_fast_path_equivalence() {
        let mut rng = rand::rng();
        let width = rng.random_range(1..40usize) * 2;
        let height = rng.random_range(1..30usize) * 2;
        let row_stride = width + rng.random_range(0..16usize);
        let chroma_stride = width / 2 + rng.random_range(0..8usize);

        let luma: Vec<u8> = (0..row_stride * height).map(|_| rng.random()).collect();
        let u: Vec<u8> = (0..chroma_stride * height / 2).map(|_| rng.random()).collect();
        let v: Vec<u8> = (0..chroma_stride * height / 2).map(|_| rng.random()).collect();
        let planes = [
            ImagePlane {
                buffer: &luma,
                row_stride: row_stride as u32,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &u,
                row_stride: chroma_stride as u32,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &v,
                row_stride: chroma_stride as u32,
                pixel_stride: 1,
            },
        ];
        let image = frame(&planes, CropRect::full(width as u32, height as u32));

        let mut bulk = vec![0u8; width * height * 3 / 2];
        let mut per_sample = vec![0u8; width * height * 3 / 2];
        flatten_yuv420(&image, &mut bulk, ChromaPlaneOrder::UV, PlaneCopyMode::Auto).unwrap();
        flatten_yuv420(
            &image,
            &mut per_sample,
            ChromaPlaneOrder::UV,
            PlaneCopyMode::PerSample,
        )
        .unwrap();
        assert_eq!(bulk, per_sample);
    }

    #[test]
    fn test_semi_planar_chroma_with_padding() {
        // Chroma planes share one VU buffer with pixel stride 2, as Android delivers NV21 sensors.
        let width = 8usize;
        let height = 4usize;
        let row_stride = width + 8;
        let chroma_rows = height / 2;

        let luma: Vec<u8> = (0..row_stride * height).map(|i| i as u8).collect();
        let mut vu = vec![0u8; row_stride * (chroma_rows - 1) + width];
        let mut expected_chroma = Vec::new();
        for row in 0..chroma_rows {
            for x in 0..width / 2 {
                let v = (10 + row * 10 + x) as u8;
                let u = (100 + row * 10 + x) as u8;
                vu[row * row_stride + x * 2] = v;
                vu[row * row_stride + x * 2 + 1] = u;
                expected_chroma.push(v);
                expected_chroma.push(u);
            }
        }
        let planes = [
            ImagePlane {
                buffer: &luma,
                row_stride: row_stride as u32,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &vu[1..],
                row_stride: row_stride as u32,
                pixel_stride: 2,
            },
            ImagePlane {
                buffer: &vu[..vu.len() - 1],
                row_stride: row_stride as u32,
                pixel_stride: 2,
            },
        ];
        let image = frame(&planes, CropRect::full(width as u32, height as u32));
        let mut dst = vec![0u8; width * height * 3 / 2];
        flatten_yuv420(&image, &mut dst, ChromaPlaneOrder::UV, PlaneCopyMode::Auto).unwrap();

        for row in 0..height {
            assert_eq!(
                &dst[row * width..(row + 1) * width],
                &luma[row * row_stride..row * row_stride + width]
            );
        }
        assert_eq!(&dst[width * height..], expected_chroma.as_slice());
    }

    #[test]
    fn test_crop_selects_sub_rectangle() {
        let luma: Vec<u8> = (0..36).collect();
        let u: Vec<u8> = (100..109).collect();
        let v: Vec<u8> = (200..209).collect();
        let planes = [
            ImagePlane {
                buffer: &luma,
                row_stride: 6,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &u,
                row_stride: 3,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &v,
                row_stride: 3,
                pixel_stride: 1,
            },
        ];
        let image = frame(&planes, CropRect::new(2, 2, 6, 6));
        let mut dst = vec![0u8; 24];
        flatten_yuv420(&image, &mut dst, ChromaPlaneOrder::UV, PlaneCopyMode::Auto).unwrap();
        assert_eq!(
            &dst[0..16],
            &[14, 15, 16, 17, 20, 21, 22, 23, 26, 27, 28, 29, 32, 33, 34, 35]
        );
        assert_eq!(&dst[16..], &[204, 104, 205, 105, 207, 107, 208, 108]);
    }

    #[test]
    fn test_short_plane_is_rejected() {
        let luma = [0u8; 15];
        let chroma = [128u8; 4];
        let planes = [
            ImagePlane {
                buffer: &luma,
                row_stride: 4,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &chroma,
                row_stride: 2,
                pixel_stride: 1,
            },
            ImagePlane {
                buffer: &chroma,
                row_stride: 2,
                pixel_stride: 1,
            },
        ];
        let image = frame(&planes, CropRect::full(4, 4));
        let mut dst = vec![0u8; 24];
        assert_eq!(
            flatten_yuv420(&image, &mut dst, ChromaPlaneOrder::UV, PlaneCopyMode::Auto),
            Err(YuvError::PlaneTooSmall(
                0,
                MismatchedSize {
                    expected: 16,
                    received: 15,
                }
            ))
        );
    }

    #[test]
    fn test_zero_pixel_stride_is_rejected() {
        let luma = [0u8; 4];
        let plane = ImagePlane {
            buffer: &luma,
            row_stride: 2,
            pixel_stride: 0,
        };
        let mut dst = vec![0u8; 6];
        let destination = PlaneDestination {
            stride: 1,
            offset: 0,
        };
        assert_eq!(
            flatten_plane(
                0,
                &plane,
                CropRect::full(2, 2),
                destination,
                &mut dst,
                PlaneCopyMode::Auto
            ),
            Err(YuvError::InvalidStride(0))
        );
    }

    #[test]
    fn test_destination_overflow_is_rejected() {
        let chroma = [128u8; 4];
        let plane = ImagePlane {
            buffer: &chroma,
            row_stride: 2,
            pixel_stride: 1,
        };
        let mut dst = vec![0u8; 8];
        let destination = PlaneDestination {
            stride: 2,
            offset: 4,
        };
        assert!(matches!(
            flatten_plane(
                1,
                &plane,
                CropRect::full(2, 2),
                destination,
                &mut dst,
                PlaneCopyMode::Auto
            ),
            Err(YuvError::InterleavedBufferOverflow(_))
        ));
    }
}
