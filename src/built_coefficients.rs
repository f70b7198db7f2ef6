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
use crate::yuv_support::{get_inverse_transform, get_yuv_range, CbCrInverseTransform};
use crate::{YuvRange, YuvStandardMatrix};

static INVERSE_BT601_LIMITED_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 9538,
    cr_coef: 13074,
    cb_coef: 16525,
    g_coeff_1: 6659,
    g_coeff_2: 3209,
};

static INVERSE_BT601_FULL_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 8192,
    cr_coef: 11485,
    cb_coef: 14516,
    g_coeff_1: 5850,
    g_coeff_2: 2819,
};

static INVERSE_BT709_LIMITED_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 9538,
    cr_coef: 14686,
    cb_coef: 17304,
    g_coeff_1: 4365,
    g_coeff_2: 1746,
};

static INVERSE_BT709_FULL_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 8192,
    cr_coef: 12900,
    cb_coef: 15201,
    g_coeff_1: 3834,
    g_coeff_2: 1534,
};

static INVERSE_BT2020_LIMITED_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 9538,
    cr_coef: 13751,
    cb_coef: 17545,
    g_coeff_1: 5328,
    g_coeff_2: 1534,
};

static INVERSE_BT2020_FULL_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 8192,
    cr_coef: 12079,
    cb_coef: 15412,
    g_coeff_1: 4680,
    g_coeff_2: 1348,
};

static INVERSE_SMPTE240_LIMITED_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 9538,
    cr_coef: 14697,
    cb_coef: 17029,
    g_coeff_1: 4445,
    g_coeff_2: 2113,
};

static INVERSE_SMPTE240_FULL_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 8192,
    cr_coef: 12911,
    cb_coef: 14959,
    g_coeff_1: 3904,
    g_coeff_2: 1856,
};

static INVERSE_BT470_LIMITED_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 9538,
    cr_coef: 14510,
    cb_coef: 17321,
    g_coeff_1: 4558,
    g_coeff_2: 1747,
};

static INVERSE_BT470_FULL_8_PREC13: CbCrInverseTransform<i32> = CbCrInverseTransform {
    y_coef: 8192,
    cr_coef: 12746,
    cb_coef: 15215,
    g_coeff_1: 4004,
    g_coeff_2: 1535,
};

/// Prebuilt 8 bit inverse transforms, `None` when precision differs or matrix is custom
pub(crate) fn get_built_inverse_transform(
    prec: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Option<CbCrInverseTransform<i32>> {
    if prec != 13 {
        return None;
    }
    match (matrix, range) {
        (YuvStandardMatrix::Bt601, YuvRange::Limited) => Some(INVERSE_BT601_LIMITED_8_PREC13),
        (YuvStandardMatrix::Bt601, YuvRange::Full) => Some(INVERSE_BT601_FULL_8_PREC13),
        (YuvStandardMatrix::Bt709, YuvRange::Limited) => Some(INVERSE_BT709_LIMITED_8_PREC13),
        (YuvStandardMatrix::Bt709, YuvRange::Full) => Some(INVERSE_BT709_FULL_8_PREC13),
        (YuvStandardMatrix::Bt2020, YuvRange::Limited) => Some(INVERSE_BT2020_LIMITED_8_PREC13),
        (YuvStandardMatrix::Bt2020, YuvRange::Full) => Some(INVERSE_BT2020_FULL_8_PREC13),
        (YuvStandardMatrix::Smpte240, YuvRange::Limited) => {
            Some(INVERSE_SMPTE240_LIMITED_8_PREC13)
        }
        (YuvStandardMatrix::Smpte240, YuvRange::Full) => Some(INVERSE_SMPTE240_FULL_8_PREC13),
        (YuvStandardMatrix::Bt470_6, YuvRange::Limited) => Some(INVERSE_BT470_LIMITED_8_PREC13),
        (YuvStandardMatrix::Bt470_6, YuvRange::Full) => Some(INVERSE_BT470_FULL_8_PREC13),
        (YuvStandardMatrix::Custom(_, _), _) => None,
    }
}

/// Returns prebuilt transform if available, otherwise computes it for 8 bit depth
pub(crate) fn search_inverse_transform(
    prec: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> CbCrInverseTransform<i32> {
    if let Some(stored) = get_built_inverse_transform(prec, range, matrix) {
        return stored;
    }
    let chroma_range = get_yuv_range(8, range);
    let kr_kb = matrix.get_kr_kb();
    get_inverse_transform(
        255,
        chroma_range.range_y,
        chroma_range.range_uv,
        kr_kb.kr,
        kr_kb.kb,
    )
    .to_integers(prec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_tables_match_computed_transform() {
        let matrices = [
            YuvStandardMatrix::Bt601,
            YuvStandardMatrix::Bt709,
            YuvStandardMatrix::Bt2020,
            YuvStandardMatrix::Smpte240,
            YuvStandardMatrix::Bt470_6,
        ];
        for matrix in matrices {
            for range in [YuvRange::Full, YuvRange::Limited] {
                let built = get_built_inverse_transform(13, range, matrix).unwrap();
                let chroma_range = get_yuv_range(8, range);
                let kr_kb = matrix.get_kr_kb();
                let computed = get_inverse_transform(
                    255,
                    chroma_range.range_y,
                    chroma_range.range_uv,
                    kr_kb.kr,
                    kr_kb.kb,
                )
                .to_integers(13);
                assert!((built.y_coef - computed.y_coef).abs() <= 2, "{:?}", matrix);
                assert!((built.cr_coef - computed.cr_coef).abs() <= 2, "{:?}", matrix);
                assert!((built.cb_coef - computed.cb_coef).abs() <= 2, "{:?}", matrix);
                assert!((built.g_coeff_1 - computed.g_coeff_1).abs() <= 2, "{:?}", matrix);
                assert!((built.g_coeff_2 - computed.g_coeff_2).abs() <= 2, "{:?}", matrix);
            }
        }
    }

    #[test]
    fn test_smpte240_weights_red_above_blue() {
        let bias = YuvStandardMatrix::Smpte240.get_kr_kb();
        assert_eq!(bias.kr, 0.212f32);
        assert_eq!(bias.kb, 0.087f32);
        let transform =
            get_built_inverse_transform(13, YuvRange::Full, YuvStandardMatrix::Smpte240).unwrap();
        // Larger kr means a smaller V multiplier, as with BT.709
        assert!(transform.cr_coef < transform.cb_coef);
        assert!(transform.g_coeff_1 > transform.g_coeff_2);
    }

    #[test]
    fn test_custom_matrix_is_computed() {
        let matrix = YuvStandardMatrix::Custom(0.3, 0.1);
        assert!(get_built_inverse_transform(13, YuvRange::Full, matrix).is_none());
        let transform = search_inverse_transform(13, YuvRange::Full, matrix);
        assert_eq!(transform.y_coef, 8192);
    }
}
