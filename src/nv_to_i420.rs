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
use crate::plane_ops::{copy_plane_interleaved_rows, split_uv_row};
use crate::yuv_error::{check_packed_plane, check_plane8, ConvertError};
use crate::yuv_support::half_dimension;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum SplitBackend {
    Scalar,
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    Sse2,
    #[cfg(target_arch = "aarch64")]
    Neon,
}

fn select_split_backend(
    half_width: u32,
    src_uv: &[u8],
    src_stride_uv: u32,
    dst_u: &[u8],
    dst_stride_u: u32,
    dst_v: &[u8],
    dst_stride_v: u32,
) -> SplitBackend {
    let planes = [
        PlaneAccess::new(src_uv, src_stride_uv),
        PlaneAccess::new(dst_u, dst_stride_u),
        PlaneAccess::new(dst_v, dst_stride_v),
    ];
    #[allow(unused_mut)]
    let mut candidates: Vec<KernelCandidate<SplitBackend>> = Vec::new();
    #[cfg(target_arch = "aarch64")]
    candidates.push(KernelCandidate {
        backend: SplitBackend::Neon,
        feature: RequiredFeature::Neon,
        width_multiple: 16,
        byte_align: 16,
    });
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    candidates.push(KernelCandidate {
        backend: SplitBackend::Sse2,
        feature: RequiredFeature::Sse2,
        width_multiple: 16,
        byte_align: 16,
    });
    select_row_kernel(
        &candidates,
        SplitBackend::Scalar,
        cpu_features(),
        half_width,
        &planes,
    )
}

/// Shared core for biplanar 4:2:0 sources: the luma rows may alternate
/// between two strides, the interleaved UV plane is split row by row.
/// A negative height flips the destination.
#[allow(clippy::too_many_arguments)]
fn x420_to_i420(
    src_y: &[u8],
    src_stride_y0: u32,
    src_stride_y1: u32,
    src_uv: &[u8],
    src_stride_uv: u32,
    dst_y: &mut [u8],
    dst_stride_y: u32,
    dst_u: &mut [u8],
    dst_stride_u: u32,
    dst_v: &mut [u8],
    dst_stride_v: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let flip = height < 0;
    let height = height.unsigned_abs();
    let half_width = half_dimension(width);
    let half_height = half_dimension(height);

    check_plane8(dst_y, dst_stride_y, width, height, "destination Y")?;
    check_plane8(dst_u, dst_stride_u, half_width, half_height, "destination U")?;
    check_plane8(dst_v, dst_stride_v, half_width, half_height, "destination V")?;

    let backend = select_split_backend(
        half_width,
        src_uv,
        src_stride_uv,
        dst_u,
        dst_stride_u,
        dst_v,
        dst_stride_v,
    );

    copy_plane_interleaved_rows(
        src_y,
        src_stride_y0 as usize,
        src_stride_y1 as usize,
        dst_y,
        dst_stride_y as usize,
        width as usize,
        height as usize,
        flip,
    );

    let half_width = half_width as usize;
    let half_height = half_height as usize;
    let uv_stride = src_stride_uv as usize;
    let du_stride = dst_stride_u as usize;
    let dv_stride = dst_stride_v as usize;
    for i in 0..half_height {
        let d = if flip { half_height - 1 - i } else { i };
        let src_row = &src_uv[i * uv_stride..];
        let u_row = &mut dst_u[d * du_stride..];
        let v_row = &mut dst_v[d * dv_stride..];
        match backend {
            SplitBackend::Scalar => split_uv_row(src_row, u_row, v_row, half_width),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            SplitBackend::Sse2 => unsafe {
                crate::sse::split_uv_row_sse2(src_row, u_row, v_row, half_width)
            },
            #[cfg(target_arch = "aarch64")]
            SplitBackend::Neon => unsafe {
                crate::neon::split_uv_row_neon(src_row, u_row, v_row, half_width)
            },
        }
    }
    Ok(())
}

/// Converts NV12 (luma plane plus interleaved UV plane) to planar 4:2:0.
///
/// # Arguments
///
/// * `src_y`: Source luma plane
/// * `src_stride_y`: Source luma plane stride in bytes
/// * `src_uv`: Source interleaved UV plane, `U, V` byte pairs
/// * `src_stride_uv`: Source UV plane stride in bytes
/// * `dst_y`: Destination luma plane
/// * `dst_stride_y`: Destination luma plane stride in bytes
/// * `dst_u`: Destination U plane
/// * `dst_stride_u`: Destination U plane stride in bytes
/// * `dst_v`: Destination V plane
/// * `dst_stride_v`: Destination V plane stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
pub fn nv12_to_i420(
    src_y: &[u8],
    src_stride_y: u32,
    src_uv: &[u8],
    src_stride_uv: u32,
    dst_y: &mut [u8],
    dst_stride_y: u32,
    dst_u: &mut [u8],
    dst_stride_u: u32,
    dst_v: &mut [u8],
    dst_stride_v: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let abs_height = height.unsigned_abs();
    let half_width = half_dimension(width);
    let half_height = half_dimension(abs_height);
    check_plane8(src_y, src_stride_y, width, abs_height, "source Y")?;
    check_packed_plane(src_uv, src_stride_uv, half_width, half_height, 2, "source UV")?;
    x420_to_i420(
        src_y,
        src_stride_y,
        src_stride_y,
        src_uv,
        src_stride_uv,
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

/// Converts M420 to planar 4:2:0. M420 is row-interleaved biplanar 4:2:0:
/// every two luma rows are followed by one interleaved UV row, all at the
/// same stride.
pub fn m420_to_i420(
    src_m420: &[u8],
    src_stride_m420: u32,
    dst_y: &mut [u8],
    dst_stride_y: u32,
    dst_u: &mut [u8],
    dst_stride_u: u32,
    dst_v: &mut [u8],
    dst_stride_v: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let abs_height = height.unsigned_abs();
    if width == 0 || abs_height == 0 {
        return Err(ConvertError::ZeroSizedImage);
    }
    let half_width = half_dimension(width) as usize;
    let half_height = half_dimension(abs_height) as usize;
    let stride = src_stride_m420 as usize;
    if stride < width as usize || stride < half_width * 2 {
        return Err(ConvertError::StrideMismatch {
            plane: "source M420",
            stride,
            row_bytes: (width as usize).max(half_width * 2),
        });
    }
    // The last group holds two luma rows and the UV row; whichever of the
    // two ends later bounds the buffer.
    let last_luma = stride
        .checked_mul(3 * ((abs_height as usize - 1) / 2) + (abs_height as usize - 1) % 2)
        .and_then(|v| v.checked_add(width as usize))
        .ok_or(ConvertError::SizeOverflow)?;
    let last_uv = stride
        .checked_mul(3 * (half_height - 1) + 2)
        .and_then(|v| v.checked_add(half_width * 2))
        .ok_or(ConvertError::SizeOverflow)?;
    let expected = last_luma.max(last_uv);
    if src_m420.len() < expected {
        return Err(ConvertError::PlaneSizeMismatch {
            plane: "source M420",
            expected,
            received: src_m420.len(),
        });
    }

    x420_to_i420(
        src_m420,
        src_stride_m420,
        src_stride_m420 * 2,
        &src_m420[stride * 2..],
        src_stride_m420 * 3,
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
    fn nv12_separates_chroma() {
        let src_y: Vec<u8> = (0..16).collect(); // 4x4
        let src_uv = [1u8, 2, 3, 4, 5, 6, 7, 8]; // 2 rows of 2 UV pairs
        let mut dy = [0u8; 16];
        let mut du = [0u8; 4];
        let mut dv = [0u8; 4];
        nv12_to_i420(
            &src_y, 4, &src_uv, 4, &mut dy, 4, &mut du, 2, &mut dv, 2, 4, 4,
        )
        .unwrap();
        assert_eq!(dy.to_vec(), src_y);
        assert_eq!(du, [1, 3, 5, 7]);
        assert_eq!(dv, [2, 4, 6, 8]);
    }

    #[test]
    fn nv12_flip_reverses_destination_planes() {
        let src_y: Vec<u8> = (0..8).collect(); // 2x4
        let src_uv = [1u8, 2, 3, 4]; // 2 chroma rows of 1 pair
        let mut dy = [0u8; 8];
        let mut du = [0u8; 2];
        let mut dv = [0u8; 2];
        nv12_to_i420(
            &src_y, 2, &src_uv, 2, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, -4,
        )
        .unwrap();
        assert_eq!(&dy[0..2], &src_y[6..8]);
        assert_eq!(&dy[6..8], &src_y[0..2]);
        assert_eq!(du, [3, 1]);
        assert_eq!(dv, [4, 2]);
    }

    #[test]
    fn m420_matches_nv12_on_same_logical_image() {
        let mut rng = rand::rng();
        let width = 8usize;
        let height = 6usize;
        let cw = width / 2;
        let ch = height / 2;
        let y: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let uv: Vec<u8> = (0..cw * 2 * ch).map(|_| rng.random()).collect();

        // Interleave into the M420 row grouping: Y row, Y row, UV row.
        let mut m420 = Vec::new();
        for g in 0..ch {
            m420.extend_from_slice(&y[2 * g * width..(2 * g + 1) * width]);
            m420.extend_from_slice(&y[(2 * g + 1) * width..(2 * g + 2) * width]);
            m420.extend_from_slice(&uv[g * cw * 2..(g + 1) * cw * 2]);
        }

        let mut ny = vec![0u8; width * height];
        let mut nu = vec![0u8; cw * ch];
        let mut nv = vec![0u8; cw * ch];
        nv12_to_i420(
            &y,
            width as u32,
            &uv,
            (cw * 2) as u32,
            &mut ny,
            width as u32,
            &mut nu,
            cw as u32,
            &mut nv,
            cw as u32,
            width as u32,
            height as i32,
        )
        .unwrap();

        let mut my = vec![0u8; width * height];
        let mut mu = vec![0u8; cw * ch];
        let mut mv = vec![0u8; cw * ch];
        m420_to_i420(
            &m420,
            width as u32,
            &mut my,
            width as u32,
            &mut mu,
            cw as u32,
            &mut mv,
            cw as u32,
            width as u32,
            height as i32,
        )
        .unwrap();

        assert_eq!(ny, my);
        assert_eq!(nu, mu);
        assert_eq!(nv, mv);
    }

    #[test]
    fn m420_rejects_undersized_buffer() {
        let m420 = vec![0u8; 4 * 5]; // one byte short of 4x4 M420
        let mut dy = [0u8; 16];
        let mut du = [0u8; 4];
        let mut dv = [0u8; 4];
        assert!(matches!(
            m420_to_i420(&m420, 4, &mut dy, 4, &mut du, 2, &mut dv, 2, 4, 4),
            Err(ConvertError::PlaneSizeMismatch { .. })
        ));
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    #[test]
    fn sse2_split_matches_scalar() {
        if !std::arch::is_x86_feature_detected!("sse2") {
            return;
        }
        let mut rng = rand::rng();
        #[repr(align(16))]
        struct Aligned([u8; 256]);
        let mut src = Aligned([0u8; 256]);
        for b in src.0.iter_mut() {
            *b = rng.random();
        }
        let half_width = 32usize;
        let mut u_scalar = vec![0u8; half_width];
        let mut v_scalar = vec![0u8; half_width];
        split_uv_row(&src.0, &mut u_scalar, &mut v_scalar, half_width);

        let mut u_simd = Aligned([0u8; 256]);
        let mut v_simd = Aligned([0u8; 256]);
        unsafe {
            crate::sse::split_uv_row_sse2(
                &src.0,
                &mut u_simd.0,
                &mut v_simd.0,
                half_width,
            );
        }
        assert_eq!(&u_simd.0[..half_width], u_scalar.as_slice());
        assert_eq!(&v_simd.0[..half_width], v_scalar.as_slice());
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn neon_split_matches_scalar() {
        if !std::arch::is_aarch64_feature_detected!("neon") {
            return;
        }
        let mut rng = rand::rng();
        let half_width = 32usize;
        let src: Vec<u8> = (0..half_width * 2).map(|_| rng.random()).collect();
        let mut u_scalar = vec![0u8; half_width];
        let mut v_scalar = vec![0u8; half_width];
        split_uv_row(&src, &mut u_scalar, &mut v_scalar, half_width);

        let mut u_simd = vec![0u8; half_width];
        let mut v_simd = vec![0u8; half_width];
        unsafe {
            crate::neon::split_uv_row_neon(&src, &mut u_simd, &mut v_simd, half_width);
        }
        assert_eq!(u_simd, u_scalar);
        assert_eq!(v_simd, v_scalar);
    }
}
