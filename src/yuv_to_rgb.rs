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
use crate::yuv_support::{ChromaSubsampling, Rgb32Layout};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum YuvToRgbBackend {
    Scalar,
    /// Two pixels per iteration, no alignment demands.
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    Narrow,
    /// Eight pixels per iteration with aligned 128-bit stores.
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    Wide,
    #[cfg(target_arch = "aarch64")]
    Neon,
}

pub(crate) fn yuv_to_rgb32_row(
    tables: &YuvTables,
    sampling: ChromaSubsampling,
    y_row: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    dst: &mut [u8],
    width: usize,
) {
    for x in 0..width {
        let c = sampling.chroma_column(x);
        yuv_to_rgb32_pixel(
            tables,
            y_row[x],
            u_row[c],
            v_row[c],
            &mut dst[x * 4..x * 4 + 4],
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn yuv_planar_to_rgb32<const DST: u8, const SAMPLING: u8>(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let layout: Rgb32Layout = DST.into();
    let sampling: ChromaSubsampling = SAMPLING.into();
    let flip = height < 0;
    let height = height.unsigned_abs();
    let chroma_width = sampling.chroma_width(width);
    let chroma_height = sampling.chroma_height(height);

    check_plane8(src_y, src_stride_y, width, height, "source Y")?;
    check_plane8(src_u, src_stride_u, chroma_width, chroma_height, "source U")?;
    check_plane8(src_v, src_stride_v, chroma_width, chroma_height, "source V")?;
    check_packed_plane(dst, dst_stride, width, height, 4, "destination RGB")?;

    // Only the wide kernel stores aligned, and only to the destination;
    // luma and chroma are gathered per pixel.
    let planes = [PlaneAccess::new(dst, dst_stride)];
    #[allow(unused_mut)]
    let mut candidates: Vec<KernelCandidate<YuvToRgbBackend>> = Vec::new();
    #[cfg(target_arch = "aarch64")]
    candidates.push(KernelCandidate {
        backend: YuvToRgbBackend::Neon,
        feature: RequiredFeature::Neon,
        width_multiple: 8,
        byte_align: 0,
    });
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    {
        candidates.push(KernelCandidate {
            backend: YuvToRgbBackend::Wide,
            feature: RequiredFeature::Sse41,
            width_multiple: 8,
            byte_align: 16,
        });
        candidates.push(KernelCandidate {
            backend: YuvToRgbBackend::Narrow,
            feature: RequiredFeature::Sse2,
            width_multiple: 2,
            byte_align: 0,
        });
    }
    let backend = select_row_kernel(
        &candidates,
        YuvToRgbBackend::Scalar,
        cpu_features(),
        width,
        &planes,
    );

    let tables = tables_for(layout);
    let _fpu = LegacyFpuGuard::arm();

    let width = width as usize;
    let height = height as usize;
    let sy = src_stride_y as usize;
    let su = src_stride_u as usize;
    let sv = src_stride_v as usize;
    let ds = dst_stride as usize;

    // A negative input height flips the destination: destination row y is
    // rendered from source row height - 1 - y.
    let render_row = |y: usize, rgb_row: &mut [u8]| {
        let sr = if flip { height - 1 - y } else { y };
        let cr = sampling.chroma_row(sr);
        let y_row = &src_y[sr * sy..];
        let u_row = &src_u[cr * su..];
        let v_row = &src_v[cr * sv..];
        match backend {
            YuvToRgbBackend::Scalar => {
                yuv_to_rgb32_row(tables, sampling, y_row, u_row, v_row, rgb_row, width)
            }
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            YuvToRgbBackend::Narrow => unsafe {
                crate::sse::yuv_to_rgb32_row_narrow::<SAMPLING>(
                    tables, y_row, u_row, v_row, rgb_row, width,
                )
            },
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            YuvToRgbBackend::Wide => unsafe {
                crate::sse::yuv_to_rgb32_row_wide::<SAMPLING>(
                    tables, y_row, u_row, v_row, rgb_row, width,
                )
            },
            #[cfg(target_arch = "aarch64")]
            YuvToRgbBackend::Neon => unsafe {
                crate::neon::yuv_to_rgb32_row_neon::<SAMPLING>(
                    tables, y_row, u_row, v_row, rgb_row, width,
                )
            },
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        dst.par_chunks_mut(ds)
            .take(height)
            .enumerate()
            .for_each(|(y, row)| render_row(y, row));
    }
    #[cfg(not(feature = "rayon"))]
    for (y, row) in dst.chunks_mut(ds).take(height).enumerate() {
        render_row(y, row);
    }
    Ok(())
}

/// Converts planar 4:2:0 YUV to packed ARGB (`B, G, R, A` in memory) with
/// studio-swing BT.601 coefficients.
///
/// # Arguments
///
/// * `src_y`: Source luma plane
/// * `src_stride_y`: Source luma plane stride in bytes
/// * `src_u`: Source U plane, half width and half height
/// * `src_stride_u`: Source U plane stride in bytes
/// * `src_v`: Source V plane, half width and half height
/// * `src_stride_v`: Source V plane stride in bytes
/// * `dst_argb`: Destination packed plane, 4 bytes per pixel
/// * `dst_stride_argb`: Destination stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
#[allow(clippy::too_many_arguments)]
pub fn i420_to_argb(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Argb as u8 }, { ChromaSubsampling::Yuv420 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_argb,
        dst_stride_argb,
        width,
        height,
    )
}

/// Converts planar 4:2:0 YUV to packed BGRA (`A, R, G, B` in memory).
#[allow(clippy::too_many_arguments)]
pub fn i420_to_bgra(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_bgra: &mut [u8],
    dst_stride_bgra: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Bgra as u8 }, { ChromaSubsampling::Yuv420 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_bgra,
        dst_stride_bgra,
        width,
        height,
    )
}

/// Converts planar 4:2:0 YUV to packed ABGR (`R, G, B, A` in memory).
#[allow(clippy::too_many_arguments)]
pub fn i420_to_abgr(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_abgr: &mut [u8],
    dst_stride_abgr: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Abgr as u8 }, { ChromaSubsampling::Yuv420 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_abgr,
        dst_stride_abgr,
        width,
        height,
    )
}

/// Converts planar 4:2:0 YUV to packed RGBA (`A, B, G, R` in memory).
#[allow(clippy::too_many_arguments)]
pub fn i420_to_rgba(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_rgba: &mut [u8],
    dst_stride_rgba: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Rgba as u8 }, { ChromaSubsampling::Yuv420 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_rgba,
        dst_stride_rgba,
        width,
        height,
    )
}

/// Converts planar 4:2:2 YUV (chroma halved horizontally only) to packed
/// ARGB.
#[allow(clippy::too_many_arguments)]
pub fn i422_to_argb(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Argb as u8 }, { ChromaSubsampling::Yuv422 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_argb,
        dst_stride_argb,
        width,
        height,
    )
}

/// Converts planar 4:2:2 YUV to packed BGRA.
#[allow(clippy::too_many_arguments)]
pub fn i422_to_bgra(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_bgra: &mut [u8],
    dst_stride_bgra: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Bgra as u8 }, { ChromaSubsampling::Yuv422 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_bgra,
        dst_stride_bgra,
        width,
        height,
    )
}

/// Converts planar 4:2:2 YUV to packed ABGR.
#[allow(clippy::too_many_arguments)]
pub fn i422_to_abgr(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_abgr: &mut [u8],
    dst_stride_abgr: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Abgr as u8 }, { ChromaSubsampling::Yuv422 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_abgr,
        dst_stride_abgr,
        width,
        height,
    )
}

/// Converts planar 4:2:2 YUV to packed RGBA.
#[allow(clippy::too_many_arguments)]
pub fn i422_to_rgba(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_rgba: &mut [u8],
    dst_stride_rgba: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Rgba as u8 }, { ChromaSubsampling::Yuv422 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_rgba,
        dst_stride_rgba,
        width,
        height,
    )
}

/// Converts planar 4:4:4 YUV (full-resolution chroma) to packed ARGB.
#[allow(clippy::too_many_arguments)]
pub fn i444_to_argb(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Argb as u8 }, { ChromaSubsampling::Yuv444 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_argb,
        dst_stride_argb,
        width,
        height,
    )
}

/// Converts planar 4:4:4 YUV to packed BGRA.
#[allow(clippy::too_many_arguments)]
pub fn i444_to_bgra(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_bgra: &mut [u8],
    dst_stride_bgra: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Bgra as u8 }, { ChromaSubsampling::Yuv444 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_bgra,
        dst_stride_bgra,
        width,
        height,
    )
}

/// Converts planar 4:4:4 YUV to packed ABGR.
#[allow(clippy::too_many_arguments)]
pub fn i444_to_abgr(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_abgr: &mut [u8],
    dst_stride_abgr: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Abgr as u8 }, { ChromaSubsampling::Yuv444 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_abgr,
        dst_stride_abgr,
        width,
        height,
    )
}

/// Converts planar 4:4:4 YUV to packed RGBA.
#[allow(clippy::too_many_arguments)]
pub fn i444_to_rgba(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_rgba: &mut [u8],
    dst_stride_rgba: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    yuv_planar_to_rgb32::<{ Rgb32Layout::Rgba as u8 }, { ChromaSubsampling::Yuv444 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_rgba,
        dst_stride_rgba,
        width,
        height,
    )
}
