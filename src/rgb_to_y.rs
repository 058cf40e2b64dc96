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
use crate::built_coefficients::{rgb_to_u, rgb_to_v, rgb_to_y};
use crate::cpu::cpu_features;
use crate::dispatch::{select_row_kernel, KernelCandidate, PlaneAccess, RequiredFeature};
use crate::yuv_error::{check_packed_plane, check_plane8, ConvertError};
use crate::yuv_support::half_dimension;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum RgbToYBackend {
    Scalar,
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    Sse41,
}

pub(crate) fn argb_to_y_row(src_argb: &[u8], dst_y: &mut [u8], width: usize) {
    for (x, dst) in dst_y[..width].iter_mut().enumerate() {
        let px = &src_argb[x * 4..x * 4 + 4];
        *dst = rgb_to_y(px[2], px[1], px[0]);
    }
}

/// Subsamples two ARGB rows into one chroma row: each output sample is
/// the 2x2 block mean, truncated. An odd trailing column averages the
/// vertical pair only; for the last row of an odd-height image both
/// arguments are the same row.
pub(crate) fn argb_to_uv_rows(
    row0: &[u8],
    row1: &[u8],
    dst_u: &mut [u8],
    dst_v: &mut [u8],
    width: usize,
) {
    let pairs = width / 2;
    for i in 0..pairs {
        let base = i * 8;
        let b = (row0[base] as u16
            + row0[base + 4] as u16
            + row1[base] as u16
            + row1[base + 4] as u16)
            >> 2;
        let g = (row0[base + 1] as u16
            + row0[base + 5] as u16
            + row1[base + 1] as u16
            + row1[base + 5] as u16)
            >> 2;
        let r = (row0[base + 2] as u16
            + row0[base + 6] as u16
            + row1[base + 2] as u16
            + row1[base + 6] as u16)
            >> 2;
        dst_u[i] = rgb_to_u(r as u8, g as u8, b as u8);
        dst_v[i] = rgb_to_v(r as u8, g as u8, b as u8);
    }
    if width % 2 != 0 {
        let base = pairs * 8;
        let b = (row0[base] as u16 + row1[base] as u16) >> 1;
        let g = (row0[base + 1] as u16 + row1[base + 1] as u16) >> 1;
        let r = (row0[base + 2] as u16 + row1[base + 2] as u16) >> 1;
        dst_u[pairs] = rgb_to_u(r as u8, g as u8, b as u8);
        dst_v[pairs] = rgb_to_v(r as u8, g as u8, b as u8);
    }
}

fn select_y_backend(
    width: u32,
    src_argb: &[u8],
    src_stride_argb: u32,
    dst_y: &[u8],
    dst_stride_y: u32,
) -> RgbToYBackend {
    let planes = [
        PlaneAccess::new(src_argb, src_stride_argb),
        PlaneAccess::new(dst_y, dst_stride_y),
    ];
    #[allow(unused_mut)]
    let mut candidates: Vec<KernelCandidate<RgbToYBackend>> = Vec::new();
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    candidates.push(KernelCandidate {
        backend: RgbToYBackend::Sse41,
        feature: RequiredFeature::Sse41,
        width_multiple: 4,
        byte_align: 16,
    });
    select_row_kernel(
        &candidates,
        RgbToYBackend::Scalar,
        cpu_features(),
        width,
        &planes,
    )
}

fn convert_y_plane(
    src_argb: &[u8],
    src_stride: usize,
    dst_y: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
    flip: bool,
    backend: RgbToYBackend,
) {
    for (y, y_row) in dst_y.chunks_mut(dst_stride).take(height).enumerate() {
        let sr = if flip { height - 1 - y } else { y };
        let src_row = &src_argb[sr * src_stride..];
        match backend {
            RgbToYBackend::Scalar => argb_to_y_row(src_row, y_row, width),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            RgbToYBackend::Sse41 => unsafe {
                crate::sse::argb_to_y_row_sse41(src_row, y_row, width)
            },
        }
    }
}

/// Extracts the studio-swing luma plane from packed ARGB.
///
/// # Arguments
///
/// * `src_argb`: Source packed plane, 4 bytes per pixel
/// * `src_stride_argb`: Source stride in bytes
/// * `dst_y`: Destination luma plane
/// * `dst_stride_y`: Destination luma plane stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
pub fn argb_to_i400(
    src_argb: &[u8],
    src_stride_argb: u32,
    dst_y: &mut [u8],
    dst_stride_y: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let flip = height < 0;
    let height = height.unsigned_abs();
    check_packed_plane(src_argb, src_stride_argb, width, height, 4, "source ARGB")?;
    check_plane8(dst_y, dst_stride_y, width, height, "destination Y")?;

    let backend = select_y_backend(width, src_argb, src_stride_argb, dst_y, dst_stride_y);
    convert_y_plane(
        src_argb,
        src_stride_argb as usize,
        dst_y,
        dst_stride_y as usize,
        width as usize,
        height as usize,
        flip,
        backend,
    );
    Ok(())
}

/// Converts packed ARGB to planar 4:2:0 YUV. Chroma samples are the mean
/// of each 2x2 pixel block.
#[allow(clippy::too_many_arguments)]
pub fn argb_to_i420(
    src_argb: &[u8],
    src_stride_argb: u32,
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
    check_packed_plane(src_argb, src_stride_argb, width, height, 4, "source ARGB")?;
    check_plane8(dst_y, dst_stride_y, width, height, "destination Y")?;
    check_plane8(dst_u, dst_stride_u, half_width, half_height, "destination U")?;
    check_plane8(dst_v, dst_stride_v, half_width, half_height, "destination V")?;

    let backend = select_y_backend(width, src_argb, src_stride_argb, dst_y, dst_stride_y);
    convert_y_plane(
        src_argb,
        src_stride_argb as usize,
        dst_y,
        dst_stride_y as usize,
        width as usize,
        height as usize,
        flip,
        backend,
    );

    let width = width as usize;
    let height = height as usize;
    let half_height = half_height as usize;
    let src_stride = src_stride_argb as usize;
    let du_stride = dst_stride_u as usize;
    let dv_stride = dst_stride_v as usize;
    let src_row = |r: usize| -> &[u8] {
        let r = if flip { height - 1 - r } else { r };
        &src_argb[r * src_stride..]
    };
    for i in 0..half_height {
        let r0 = 2 * i;
        let r1 = if r0 + 1 < height { r0 + 1 } else { r0 };
        argb_to_uv_rows(
            src_row(r0),
            src_row(r1),
            &mut dst_u[i * du_stride..],
            &mut dst_v[i * dv_stride..],
            width,
        );
    }
    Ok(())
}
