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
use crate::yuv_error::{check_packed_plane, ConvertError};
use crate::yuv_support::{Rgb24Layout, Rgb32Layout};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ShuffleBackend {
    Scalar,
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    Sse41,
}

pub(crate) fn shuffle_rgb32_row(src_layout: Rgb32Layout, src: &[u8], dst: &mut [u8], width: usize) {
    for x in 0..width {
        let s = &src[x * 4..x * 4 + 4];
        let d = &mut dst[x * 4..x * 4 + 4];
        d[0] = s[src_layout.b_offset()];
        d[1] = s[src_layout.g_offset()];
        d[2] = s[src_layout.r_offset()];
        d[3] = s[src_layout.a_offset()];
    }
}

/// Reorders a packed 32-bit image into ARGB memory order. Source and
/// destination must be distinct buffers.
fn rgb32_to_argb<const SRC: u8>(
    src: &[u8],
    src_stride: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let layout: Rgb32Layout = SRC.into();
    let flip = height < 0;
    let height = height.unsigned_abs();
    check_packed_plane(src, src_stride, width, height, 4, "source RGB")?;
    check_packed_plane(dst_argb, dst_stride_argb, width, height, 4, "destination ARGB")?;

    let planes = [
        PlaneAccess::new(src, src_stride),
        PlaneAccess::new(dst_argb, dst_stride_argb),
    ];
    #[allow(unused_mut)]
    let mut candidates: Vec<KernelCandidate<ShuffleBackend>> = Vec::new();
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    candidates.push(KernelCandidate {
        backend: ShuffleBackend::Sse41,
        feature: RequiredFeature::Sse41,
        width_multiple: 4,
        byte_align: 16,
    });
    let backend = select_row_kernel(
        &candidates,
        ShuffleBackend::Scalar,
        cpu_features(),
        width,
        &planes,
    );

    let width = width as usize;
    let height = height as usize;
    let ss = src_stride as usize;
    let ds = dst_stride_argb as usize;
    for (y, dst_row) in dst_argb.chunks_mut(ds).take(height).enumerate() {
        let sr = if flip { height - 1 - y } else { y };
        let src_row = &src[sr * ss..];
        match backend {
            ShuffleBackend::Scalar => shuffle_rgb32_row(layout, src_row, dst_row, width),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            ShuffleBackend::Sse41 => unsafe {
                crate::sse::shuffle_rgb32_row_sse41::<SRC>(src_row, dst_row, width)
            },
        }
    }
    Ok(())
}

/// Converts packed ABGR (`R, G, B, A` in memory) to ARGB.
///
/// # Arguments
///
/// * `src_abgr`: Source packed plane, 4 bytes per pixel
/// * `src_stride_abgr`: Source stride in bytes
/// * `dst_argb`: Destination packed plane, 4 bytes per pixel
/// * `dst_stride_argb`: Destination stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
pub fn abgr_to_argb(
    src_abgr: &[u8],
    src_stride_abgr: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    rgb32_to_argb::<{ Rgb32Layout::Abgr as u8 }>(
        src_abgr,
        src_stride_abgr,
        dst_argb,
        dst_stride_argb,
        width,
        height,
    )
}

/// Converts packed BGRA (`A, R, G, B` in memory) to ARGB.
pub fn bgra_to_argb(
    src_bgra: &[u8],
    src_stride_bgra: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    rgb32_to_argb::<{ Rgb32Layout::Bgra as u8 }>(
        src_bgra,
        src_stride_bgra,
        dst_argb,
        dst_stride_argb,
        width,
        height,
    )
}

/// Converts packed RGBA (`A, B, G, R` in memory) to ARGB.
pub fn rgba_to_argb(
    src_rgba: &[u8],
    src_stride_rgba: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    rgb32_to_argb::<{ Rgb32Layout::Rgba as u8 }>(
        src_rgba,
        src_stride_rgba,
        dst_argb,
        dst_stride_argb,
        width,
        height,
    )
}

fn rgb24_to_argb_core<const SRC: u8>(
    src: &[u8],
    src_stride: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let layout: Rgb24Layout = SRC.into();
    let flip = height < 0;
    let height = height.unsigned_abs();
    check_packed_plane(src, src_stride, width, height, 3, "source RGB")?;
    check_packed_plane(dst_argb, dst_stride_argb, width, height, 4, "destination ARGB")?;

    let width = width as usize;
    let height = height as usize;
    let ss = src_stride as usize;
    let ds = dst_stride_argb as usize;
    for (y, dst_row) in dst_argb.chunks_mut(ds).take(height).enumerate() {
        let sr = if flip { height - 1 - y } else { y };
        let src_row = &src[sr * ss..];
        for x in 0..width {
            let s = &src_row[x * 3..x * 3 + 3];
            let d = &mut dst_row[x * 4..x * 4 + 4];
            d[0] = s[layout.b_offset()];
            d[1] = s[layout.g_offset()];
            d[2] = s[layout.r_offset()];
            d[3] = 255;
        }
    }
    Ok(())
}

/// Widens packed 24-bit RGB (`B, G, R` in memory) to ARGB with opaque
/// alpha.
pub fn rgb24_to_argb(
    src_rgb24: &[u8],
    src_stride_rgb24: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    rgb24_to_argb_core::<{ Rgb24Layout::Rgb24 as u8 }>(
        src_rgb24,
        src_stride_rgb24,
        dst_argb,
        dst_stride_argb,
        width,
        height,
    )
}

/// Widens packed 24-bit RAW (`R, G, B` in memory) to ARGB with opaque
/// alpha.
pub fn raw_to_argb(
    src_raw: &[u8],
    src_stride_raw: u32,
    dst_argb: &mut [u8],
    dst_stride_argb: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    rgb24_to_argb_core::<{ Rgb24Layout::Raw as u8 }>(
        src_raw,
        src_stride_raw,
        dst_argb,
        dst_stride_argb,
        width,
        height,
    )
}

fn argb_to_rgb24_core<const DST: u8>(
    src_argb: &[u8],
    src_stride_argb: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let layout: Rgb24Layout = DST.into();
    let flip = height < 0;
    let height = height.unsigned_abs();
    check_packed_plane(src_argb, src_stride_argb, width, height, 4, "source ARGB")?;
    check_packed_plane(dst, dst_stride, width, height, 3, "destination RGB")?;

    let width = width as usize;
    let height = height as usize;
    let ss = src_stride_argb as usize;
    let ds = dst_stride as usize;
    for (y, dst_row) in dst.chunks_mut(ds).take(height).enumerate() {
        let sr = if flip { height - 1 - y } else { y };
        let src_row = &src_argb[sr * ss..];
        for x in 0..width {
            let s = &src_row[x * 4..x * 4 + 4];
            let d = &mut dst_row[x * 3..x * 3 + 3];
            d[layout.b_offset()] = s[0];
            d[layout.g_offset()] = s[1];
            d[layout.r_offset()] = s[2];
        }
    }
    Ok(())
}

/// Narrows packed ARGB to 24-bit RGB (`B, G, R` in memory), dropping
/// alpha.
pub fn argb_to_rgb24(
    src_argb: &[u8],
    src_stride_argb: u32,
    dst_rgb24: &mut [u8],
    dst_stride_rgb24: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    argb_to_rgb24_core::<{ Rgb24Layout::Rgb24 as u8 }>(
        src_argb,
        src_stride_argb,
        dst_rgb24,
        dst_stride_rgb24,
        width,
        height,
    )
}

/// Narrows packed ARGB to 24-bit RAW (`R, G, B` in memory), dropping
/// alpha.
pub fn argb_to_raw(
    src_argb: &[u8],
    src_stride_argb: u32,
    dst_raw: &mut [u8],
    dst_stride_raw: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    argb_to_rgb24_core::<{ Rgb24Layout::Raw as u8 }>(
        src_argb,
        src_stride_argb,
        dst_raw,
        dst_stride_raw,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn abgr_reorder_swaps_red_and_blue() {
        let src = [1u8, 2, 3, 4]; // R,G,B,A
        let mut dst = [0u8; 4];
        abgr_to_argb(&src, 4, &mut dst, 4, 1, 1).unwrap();
        assert_eq!(dst, [3, 2, 1, 4]); // B,G,R,A
    }

    #[test]
    fn bgra_reorder_rotates_alpha() {
        let src = [1u8, 2, 3, 4]; // A,R,G,B
        let mut dst = [0u8; 4];
        bgra_to_argb(&src, 4, &mut dst, 4, 1, 1).unwrap();
        assert_eq!(dst, [4, 3, 2, 1]);
    }

    #[test]
    fn rgba_reorder_rotates_alpha() {
        let src = [1u8, 2, 3, 4]; // A,B,G,R
        let mut dst = [0u8; 4];
        rgba_to_argb(&src, 4, &mut dst, 4, 1, 1).unwrap();
        assert_eq!(dst, [2, 3, 4, 1]);
    }

    #[test]
    fn reorders_round_trip_through_abgr() {
        // ABGR -> ARGB is an involution on the pixel bytes.
        let mut rng = rand::rng();
        let src: Vec<u8> = (0..64).map(|_| rng.random()).collect();
        let mut once = vec![0u8; 64];
        let mut twice = vec![0u8; 64];
        abgr_to_argb(&src, 16, &mut once, 16, 4, 4).unwrap();
        abgr_to_argb(&once, 16, &mut twice, 16, 4, 4).unwrap();
        assert_eq!(src, twice);
    }

    #[test]
    fn rgb24_widen_sets_opaque_alpha() {
        let src = [1u8, 2, 3, 4, 5, 6]; // two B,G,R pixels
        let mut dst = [0u8; 8];
        rgb24_to_argb(&src, 6, &mut dst, 8, 2, 1).unwrap();
        assert_eq!(dst, [1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn raw_widen_swaps_to_argb_order() {
        let src = [1u8, 2, 3]; // R,G,B
        let mut dst = [0u8; 4];
        raw_to_argb(&src, 3, &mut dst, 4, 1, 1).unwrap();
        assert_eq!(dst, [3, 2, 1, 255]);
    }

    #[test]
    fn narrow_then_widen_preserves_color() {
        let mut rng = rand::rng();
        let mut src: Vec<u8> = (0..64).map(|_| rng.random()).collect();
        for px in src.chunks_exact_mut(4) {
            px[3] = 255;
        }
        let mut rgb24 = vec![0u8; 48];
        let mut back = vec![0u8; 64];
        argb_to_rgb24(&src, 16, &mut rgb24, 12, 4, 4).unwrap();
        rgb24_to_argb(&rgb24, 12, &mut back, 16, 4, 4).unwrap();
        assert_eq!(src, back);
    }

    #[test]
    fn flip_reorders_rows() {
        let src = [
            1u8, 2, 3, 4, //
            5, 6, 7, 8,
        ]; // 1x2 ABGR
        let mut dst = [0u8; 8];
        abgr_to_argb(&src, 4, &mut dst, 4, 1, -2).unwrap();
        assert_eq!(dst, [7, 6, 5, 8, 3, 2, 1, 4]);
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    #[test]
    fn sse41_shuffle_matches_scalar() {
        if !std::arch::is_x86_feature_detected!("sse4.1") {
            return;
        }
        let mut rng = rand::rng();
        #[repr(align(16))]
        struct Aligned([u8; 64]);
        let mut src = Aligned([0u8; 64]);
        for b in src.0.iter_mut() {
            *b = rng.random();
        }
        let width = 16usize;
        for layout in [Rgb32Layout::Bgra, Rgb32Layout::Abgr, Rgb32Layout::Rgba] {
            let mut scalar = vec![0u8; 64];
            shuffle_rgb32_row(layout, &src.0, &mut scalar, width);
            let mut simd = Aligned([0u8; 64]);
            unsafe {
                match layout {
                    Rgb32Layout::Bgra => crate::sse::shuffle_rgb32_row_sse41::<
                        { Rgb32Layout::Bgra as u8 },
                    >(&src.0, &mut simd.0, width),
                    Rgb32Layout::Abgr => crate::sse::shuffle_rgb32_row_sse41::<
                        { Rgb32Layout::Abgr as u8 },
                    >(&src.0, &mut simd.0, width),
                    Rgb32Layout::Rgba => crate::sse::shuffle_rgb32_row_sse41::<
                        { Rgb32Layout::Rgba as u8 },
                    >(&src.0, &mut simd.0, width),
                    Rgb32Layout::Argb => unreachable!(),
                }
            }
            assert_eq!(&simd.0[..], scalar.as_slice());
        }
    }
}
