/*
 * Copyright (c) the pixform contributors. All rights reserved.
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
use crate::built_coefficients::{tables_for, yuv_to_rgb32_pixel, YuvTables};
use crate::cpu::cpu_features;
use crate::dispatch::{
    select_row_kernel, KernelCandidate, LegacyFpuGuard, PlaneAccess, RequiredFeature,
};
use crate::yuv_error::{check_packed_plane, check_plane8, ConvertError};
use crate::yuv_support::Rgb32Layout;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum YToRgbBackend {
    Scalar,
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    Narrow,
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    Wide,
}

pub(crate) fn y_to_rgb32_row(tables: &YuvTables, y_row: &[u8], dst: &mut [u8], width: usize) {
    // Neutral chroma contributes nothing, so only the luma table applies.
    for x in 0..width {
        yuv_to_rgb32_pixel(tables, y_row[x], 128, 128, &mut dst[x * 4..x * 4 + 4]);
    }
}

/// Converts a luma-only plane to packed ARGB through the studio-swing
/// luma expansion. Chroma is treated as neutral gray.
///
/// # Arguments
///
/// * `src_y`: Source luma plane
/// * `src_stride_y`: Source luma plane stride in bytes
/// * `dst_argb`: Destination packed plane, 4 bytes per pixel
/// * `dst_stride_argb`: Destination stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
pub fn i400_to_argb(
    src_y: &[u8],
    src_stride_y: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let flip = height < 0;
    let height = height.unsigned_abs();
    check_plane8(src_y, src_stride_y, width, height, "source Y")?;
    check_packed_plane(dst_argb, dst_stride_argb, width, height, 4, "destination ARGB")?;

    let planes = [PlaneAccess::new(dst_argb, dst_stride_argb)];
    #[allow(unused_mut)]
    let mut candidates: Vec<KernelCandidate<YToRgbBackend>> = Vec::new();
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    {
        candidates.push(KernelCandidate {
            backend: YToRgbBackend::Wide,
            feature: RequiredFeature::Sse41,
            width_multiple: 8,
            byte_align: 16,
        });
        candidates.push(KernelCandidate {
            backend: YToRgbBackend::Narrow,
            feature: RequiredFeature::Sse2,
            width_multiple: 2,
            byte_align: 0,
        });
    }
    let backend = select_row_kernel(
        &candidates,
        YToRgbBackend::Scalar,
        cpu_features(),
        width,
        &planes,
    );

    let tables = tables_for(Rgb32Layout::Argb);
    let _fpu = LegacyFpuGuard::arm();

    let width = width as usize;
    let height = height as usize;
    let sy = src_stride_y as usize;
    let ds = dst_stride_argb as usize;
    for (y, rgb_row) in dst_argb.chunks_mut(ds).take(height).enumerate() {
        let sr = if flip { height - 1 - y } else { y };
        let y_row = &src_y[sr * sy..];
        match backend {
            YToRgbBackend::Scalar => y_to_rgb32_row(tables, y_row, rgb_row, width),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            YToRgbBackend::Narrow => unsafe {
                crate::sse::y_to_rgb32_row_narrow(tables, y_row, rgb_row, width)
            },
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            YToRgbBackend::Wide => unsafe {
                crate::sse::y_to_rgb32_row_wide(tables, y_row, rgb_row, width)
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_to_rgb::i420_to_argb;
    use rand::Rng;

    #[test]
    fn matches_i420_with_neutral_chroma() {
        let mut rng = rand::rng();
        let width = 6u32;
        let height = 4u32;
        let y: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let u = vec![128u8; 6];
        let v = vec![128u8; 6];

        let mut gray = vec![0u8; (width * height * 4) as usize];
        let mut full = vec![0u8; (width * height * 4) as usize];
        i400_to_argb(&y, width, &mut gray, width * 4, width, height as i32).unwrap();
        i420_to_argb(
            &y,
            width,
            &u,
            3,
            &v,
            3,
            &mut full,
            width * 4,
            width,
            height as i32,
        )
        .unwrap();
        assert_eq!(gray, full);
    }

    #[test]
    fn output_is_gray_with_opaque_alpha() {
        let y = [16u8, 126, 235];
        let mut dst = [0u8; 12];
        i400_to_argb(&y, 3, &mut dst, 12, 3, 1).unwrap();
        for px in dst.chunks_exact(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
        assert_eq!(dst[0], 0);
        assert!(dst[8] >= 254);
    }

    #[test]
    fn negative_height_flips_rows() {
        let y = [10u8, 200];
        let mut up = [0u8; 8];
        let mut down = [0u8; 8];
        i400_to_argb(&y, 1, &mut up, 4, 1, 2).unwrap();
        i400_to_argb(&y, 1, &mut down, 4, 1, -2).unwrap();
        assert_eq!(&up[0..4], &down[4..8]);
        assert_eq!(&up[4..8], &down[0..4]);
    }
}
