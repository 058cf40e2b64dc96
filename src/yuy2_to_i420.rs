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
use crate::cpu::cpu_features;
use crate::dispatch::{select_row_kernel, KernelCandidate, PlaneAccess, RequiredFeature};
use crate::yuv_error::{check_packed_plane, check_plane8, ConvertError};
use crate::yuv_support::{half_dimension, Packed422Order};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Packed422Backend {
    Scalar,
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    Sse2,
}

pub(crate) fn packed422_to_y_row(order: Packed422Order, src: &[u8], dst_y: &mut [u8], width: usize) {
    let y0 = order.y0_offset();
    for (x, dst) in dst_y[..width].iter_mut().enumerate() {
        *dst = src[(x / 2) * 4 + y0 + (x % 2) * 2];
    }
}

/// Averages the chroma samples of two packed rows with rounding; for the
/// last row of an odd-height image both arguments are the same row.
pub(crate) fn packed422_to_uv_rows(
    order: Packed422Order,
    row0: &[u8],
    row1: &[u8],
    dst_u: &mut [u8],
    dst_v: &mut [u8],
    width: usize,
) {
    let u_off = order.u_offset();
    let v_off = order.v_offset();
    let half_width = half_dimension(width as u32) as usize;
    for i in 0..half_width {
        let base = i * 4;
        dst_u[i] = ((row0[base + u_off] as u16 + row1[base + u_off] as u16 + 1) >> 1) as u8;
        dst_v[i] = ((row0[base + v_off] as u16 + row1[base + v_off] as u16 + 1) >> 1) as u8;
    }
}

#[allow(clippy::too_many_arguments)]
fn packed422_to_i420<const ORDER: u8>(
    src: &[u8],
    src_stride: u32,
    dst_y: &mut [u8],
    dst_stride_y: u32,
    dst_u: &mut [u8],
    dst_stride_u: u32,
    dst_v: &mut [u8],
    dst_stride_v: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let order: Packed422Order = ORDER.into();
    let flip = height < 0;
    let height = height.unsigned_abs();
    let half_width = half_dimension(width);
    let half_height = half_dimension(height);

    check_packed_plane(src, src_stride, half_width, height, 4, "source packed 4:2:2")?;
    check_plane8(dst_y, dst_stride_y, width, height, "destination Y")?;
    check_plane8(dst_u, dst_stride_u, half_width, half_height, "destination U")?;
    check_plane8(dst_v, dst_stride_v, half_width, half_height, "destination V")?;

    // The chroma destinations only need half the alignment of the packed
    // source because the kernel stores eight bytes per sixteen pixels.
    let planes = [
        PlaneAccess::new(src, src_stride),
        PlaneAccess::new(dst_y, dst_stride_y),
        PlaneAccess::chroma(dst_u, dst_stride_u),
        PlaneAccess::chroma(dst_v, dst_stride_v),
    ];
    #[allow(unused_mut)]
    let mut candidates: Vec<KernelCandidate<Packed422Backend>> = Vec::new();
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    candidates.push(KernelCandidate {
        backend: Packed422Backend::Sse2,
        feature: RequiredFeature::Sse2,
        width_multiple: 16,
        byte_align: 16,
    });
    let backend = select_row_kernel(
        &candidates,
        Packed422Backend::Scalar,
        cpu_features(),
        width,
        &planes,
    );

    let width = width as usize;
    let height = height as usize;
    let half_height = half_height as usize;
    let src_stride = src_stride as usize;
    let dy_stride = dst_stride_y as usize;
    let du_stride = dst_stride_u as usize;
    let dv_stride = dst_stride_v as usize;

    // A negative input height flips the source: destination row y reads
    // packed row height - 1 - y.
    let src_row = |r: usize| -> &[u8] {
        let r = if flip { height - 1 - r } else { r };
        &src[r * src_stride..]
    };

    for (y, y_row) in dst_y.chunks_mut(dy_stride).take(height).enumerate() {
        match backend {
            Packed422Backend::Scalar => packed422_to_y_row(order, src_row(y), y_row, width),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            Packed422Backend::Sse2 => unsafe {
                crate::sse::packed422_to_y_row_sse2::<ORDER>(src_row(y), y_row, width)
            },
        }
    }

    for i in 0..half_height {
        let r0 = 2 * i;
        let r1 = if r0 + 1 < height { r0 + 1 } else { r0 };
        let u_row = &mut dst_u[i * du_stride..];
        let v_row = &mut dst_v[i * dv_stride..];
        match backend {
            Packed422Backend::Scalar => {
                packed422_to_uv_rows(order, src_row(r0), src_row(r1), u_row, v_row, width)
            }
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            Packed422Backend::Sse2 => unsafe {
                crate::sse::packed422_to_uv_rows_sse2::<ORDER>(
                    src_row(r0),
                    src_row(r1),
                    u_row,
                    v_row,
                    width,
                )
            },
        }
    }
    Ok(())
}

/// Converts packed YUY2 (`Y0 U Y1 V`) to planar 4:2:0, averaging the
/// chroma of each row pair.
///
/// # Arguments
///
/// * `src_yuy2`: Source packed plane
/// * `src_stride_yuy2`: Source stride in bytes
/// * `dst_y`: Destination luma plane
/// * `dst_stride_y`: Destination luma plane stride in bytes
/// * `dst_u`: Destination U plane
/// * `dst_stride_u`: Destination U plane stride in bytes
/// * `dst_v`: Destination V plane
/// * `dst_stride_v`: Destination V plane stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
pub fn yuy2_to_i420(
    src_yuy2: &[u8],
    src_stride_yuy2: u32,
    dst_y: &mut [u8],
    dst_stride_y: u32,
    dst_u: &mut [u8],
    dst_stride_u: u32,
    dst_v: &mut [u8],
    dst_stride_v: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    packed422_to_i420::<{ Packed422Order::Yuyv as u8 }>(
        src_yuy2,
        src_stride_yuy2,
        dst_y,
        dst_stride_y,
        dst_u,
        dst_stride_u,
        dst_v,
        dst_stride_v,
        width,
        height,
    )
}

/// Converts packed UYVY (`U Y0 V Y1`) to planar 4:2:0, averaging the
/// chroma of each row pair.
pub fn uyvy_to_i420(
    src_uyvy: &[u8],
    src_stride_uyvy: u32,
    dst_y: &mut [u8],
    dst_stride_y: u32,
    dst_u: &mut [u8],
    dst_stride_u: u32,
    dst_v: &mut [u8],
    dst_stride_v: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    packed422_to_i420::<{ Packed422Order::Uyvy as u8 }>(
        src_uyvy,
        src_stride_uyvy,
        dst_y,
        dst_stride_y,
        dst_u,
        dst_stride_u,
        dst_v,
        dst_stride_v,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn yuy2_extracts_luma_and_averages_chroma() {
        // 2x2, YUY2 groups are Y0 U Y1 V.
        let src = [
            10u8, 100, 20, 200, //
            30, 102, 40, 204,
        ];
        let mut dy = [0u8; 4];
        let mut du = [0u8; 1];
        let mut dv = [0u8; 1];
        yuy2_to_i420(&src, 4, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, 2).unwrap();
        assert_eq!(dy, [10, 20, 30, 40]);
        assert_eq!(du, [101]);
        assert_eq!(dv, [202]);
    }

    #[test]
    fn uyvy_extracts_luma_and_averages_chroma() {
        let src = [
            100u8, 10, 200, 20, //
            102, 30, 204, 40,
        ];
        let mut dy = [0u8; 4];
        let mut du = [0u8; 1];
        let mut dv = [0u8; 1];
        uyvy_to_i420(&src, 4, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, 2).unwrap();
        assert_eq!(dy, [10, 20, 30, 40]);
        assert_eq!(du, [101]);
        assert_eq!(dv, [202]);
    }

    #[test]
    fn chroma_averaging_rounds_up() {
        let src = [
            0u8, 1, 0, 1, //
            0, 2, 0, 2,
        ];
        let mut dy = [0u8; 4];
        let mut du = [0u8; 1];
        let mut dv = [0u8; 1];
        yuy2_to_i420(&src, 4, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, 2).unwrap();
        assert_eq!(du, [2]); // (1 + 2 + 1) >> 1
    }

    #[test]
    fn odd_height_last_chroma_row_stands_alone() {
        let src = [
            10u8, 100, 20, 200, //
            30, 110, 40, 210,
            50, 120, 60, 220,
        ];
        let mut dy = [0u8; 6];
        let mut du = [0u8; 2];
        let mut dv = [0u8; 2];
        yuy2_to_i420(&src, 4, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, 3).unwrap();
        assert_eq!(dy, [10, 20, 30, 40, 50, 60]);
        assert_eq!(du, [105, 120]);
        assert_eq!(dv, [205, 220]);
    }

    #[test]
    fn flip_reads_rows_bottom_up() {
        let src = [
            10u8, 100, 20, 200, //
            30, 110, 40, 210,
        ];
        let mut dy = [0u8; 4];
        let mut du = [0u8; 1];
        let mut dv = [0u8; 1];
        yuy2_to_i420(&src, 4, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, -2).unwrap();
        assert_eq!(dy, [30, 40, 10, 20]);
        // Averaged pair is the same set of rows either way.
        assert_eq!(du, [105]);
        assert_eq!(dv, [205]);
    }

    #[test]
    fn odd_width_uses_trailing_group() {
        // Width 3: two groups per row, second group's Y1 unused.
        let src = [1u8, 100, 2, 200, 3, 101, 99, 201];
        let mut dy = [0u8; 3];
        let mut du = [0u8; 2];
        let mut dv = [0u8; 2];
        yuy2_to_i420(&src, 8, &mut dy, 3, &mut du, 2, &mut dv, 2, 3, 1).unwrap();
        assert_eq!(dy, [1, 2, 3]);
        assert_eq!(du, [100, 101]);
        assert_eq!(dv, [200, 201]);
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    #[test]
    fn sse2_rows_match_scalar() {
        if !std::arch::is_x86_feature_detected!("sse2") {
            return;
        }
        let mut rng = rand::rng();
        #[repr(align(16))]
        struct Aligned([u8; 128]);
        let width = 32usize;
        let mut row0 = Aligned([0u8; 128]);
        let mut row1 = Aligned([0u8; 128]);
        for b in row0.0.iter_mut().chain(row1.0.iter_mut()) {
            *b = rng.random();
        }

        let mut y_scalar = vec![0u8; width];
        let mut y_simd = Aligned([0u8; 128]);
        packed422_to_y_row(Packed422Order::Yuyv, &row0.0, &mut y_scalar, width);
        unsafe {
            crate::sse::packed422_to_y_row_sse2::<{ Packed422Order::Yuyv as u8 }>(
                &row0.0,
                &mut y_simd.0,
                width,
            );
        }
        assert_eq!(&y_simd.0[..width], y_scalar.as_slice());

        let mut u_scalar = vec![0u8; width / 2];
        let mut v_scalar = vec![0u8; width / 2];
        packed422_to_uv_rows(
            Packed422Order::Uyvy,
            &row0.0,
            &row1.0,
            &mut u_scalar,
            &mut v_scalar,
            width,
        );
        let mut u_simd = Aligned([0u8; 128]);
        let mut v_simd = Aligned([0u8; 128]);
        unsafe {
            crate::sse::packed422_to_uv_rows_sse2::<{ Packed422Order::Uyvy as u8 }>(
                &row0.0,
                &row1.0,
                &mut u_simd.0,
                &mut v_simd.0,
                width,
            );
        }
        assert_eq!(&u_simd.0[..width / 2], u_scalar.as_slice());
        assert_eq!(&v_simd.0[..width / 2], v_scalar.as_slice());
    }
}
