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
use crate::built_coefficients::tables_for;
use crate::dispatch::LegacyFpuGuard;
use crate::yuv_error::{check_packed_plane, check_plane8, ConvertError};
use crate::yuv_support::{ChromaSubsampling, Rgb32Layout};
use crate::yuv_to_rgb::yuv_to_rgb32_row;

/// 16-bit packed destinations. Channels are narrowed by truncation, as a
/// plain right shift of each 8-bit value.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PackedRgb16 {
    /// `RRRRRGGG GGGBBBBB`
    Rgb565 = 0,
    /// `ARRRRRGG GGGBBBBB`
    Argb1555 = 1,
    /// `AAAARRRR GGGGBBBB`
    Argb4444 = 2,
}

impl From<u8> for PackedRgb16 {
    fn from(value: u8) -> Self {
        match value {
            0 => PackedRgb16::Rgb565,
            1 => PackedRgb16::Argb1555,
            2 => PackedRgb16::Argb4444,
            _ => unimplemented!("unknown 16-bit RGB format {}", value),
        }
    }
}

impl PackedRgb16 {
    #[inline(always)]
    pub(crate) const fn pack(self, b: u8, g: u8, r: u8, a: u8) -> u16 {
        match self {
            PackedRgb16::Rgb565 => {
                ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
            }
            PackedRgb16::Argb1555 => {
                ((a as u16 >> 7) << 15)
                    | ((r as u16 >> 3) << 10)
                    | ((g as u16 >> 3) << 5)
                    | (b as u16 >> 3)
            }
            PackedRgb16::Argb4444 => {
                ((a as u16 >> 4) << 12)
                    | ((r as u16 >> 4) << 8)
                    | ((g as u16 >> 4) << 4)
                    | (b as u16 >> 4)
            }
        }
    }
}

/// Packs one row of ARGB pixels into little-endian 16-bit words.
pub(crate) fn pack_rgb16_row(format: PackedRgb16, src_argb: &[u8], dst: &mut [u8], width: usize) {
    for x in 0..width {
        let px = &src_argb[x * 4..x * 4 + 4];
        let packed = format.pack(px[0], px[1], px[2], px[3]);
        dst[x * 2..x * 2 + 2].copy_from_slice(&packed.to_le_bytes());
    }
}

fn argb_to_rgb16<const FORMAT: u8>(
    src_argb: &[u8],
    src_stride_argb: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let format: PackedRgb16 = FORMAT.into();
    let flip = height < 0;
    let height = height.unsigned_abs();
    check_packed_plane(src_argb, src_stride_argb, width, height, 4, "source ARGB")?;
    check_packed_plane(dst, dst_stride, width, height, 2, "destination RGB")?;

    let width = width as usize;
    let height = height as usize;
    let ss = src_stride_argb as usize;
    let ds = dst_stride as usize;
    for (y, dst_row) in dst.chunks_mut(ds).take(height).enumerate() {
        let sr = if flip { height - 1 - y } else { y };
        pack_rgb16_row(format, &src_argb[sr * ss..], dst_row, width);
    }
    Ok(())
}

/// Packs ARGB into RGB565, truncating each channel.
///
/// # Arguments
///
/// * `src_argb`: Source packed plane, 4 bytes per pixel
/// * `src_stride_argb`: Source stride in bytes
/// * `dst_rgb565`: Destination plane of little-endian 16-bit pixels
/// * `dst_stride_rgb565`: Destination stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
pub fn argb_to_rgb565(
    src_argb: &[u8],
    src_stride_argb: u32,
    dst_rgb565: &mut [u8],
    dst_stride_rgb565: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    argb_to_rgb16::<{ PackedRgb16::Rgb565 as u8 }>(
        src_argb,
        src_stride_argb,
        dst_rgb565,
        dst_stride_rgb565,
        width,
        height,
    )
}

/// Packs ARGB into ARGB1555, truncating color channels and keeping the
/// top alpha bit.
pub fn argb_to_argb1555(
    src_argb: &[u8],
    src_stride_argb: u32,
    dst_argb1555: &mut [u8],
    dst_stride_argb1555: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    argb_to_rgb16::<{ PackedRgb16::Argb1555 as u8 }>(
        src_argb,
        src_stride_argb,
        dst_argb1555,
        dst_stride_argb1555,
        width,
        height,
    )
}

/// Packs ARGB into ARGB4444, truncating every channel to four bits.
pub fn argb_to_argb4444(
    src_argb: &[u8],
    src_stride_argb: u32,
    dst_argb4444: &mut [u8],
    dst_stride_argb4444: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    argb_to_rgb16::<{ PackedRgb16::Argb4444 as u8 }>(
        src_argb,
        src_stride_argb,
        dst_argb4444,
        dst_stride_argb4444,
        width,
        height,
    )
}

/// Shared core for 4:2:0 to 16-bit destinations: each row is rendered to
/// an ARGB scratch row, then packed.
#[allow(clippy::too_many_arguments)]
fn i420_to_rgb16<const FORMAT: u8>(
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
    let format: PackedRgb16 = FORMAT.into();
    let sampling = ChromaSubsampling::Yuv420;
    let flip = height < 0;
    let height = height.unsigned_abs();
    let chroma_width = sampling.chroma_width(width);
    let chroma_height = sampling.chroma_height(height);
    check_plane8(src_y, src_stride_y, width, height, "source Y")?;
    check_plane8(src_u, src_stride_u, chroma_width, chroma_height, "source U")?;
    check_plane8(src_v, src_stride_v, chroma_width, chroma_height, "source V")?;
    check_packed_plane(dst, dst_stride, width, height, 2, "destination RGB")?;

    let tables = tables_for(Rgb32Layout::Argb);
    let _fpu = LegacyFpuGuard::arm();

    let width = width as usize;
    let height = height as usize;
    let sy = src_stride_y as usize;
    let su = src_stride_u as usize;
    let sv = src_stride_v as usize;
    let ds = dst_stride as usize;
    let mut scratch = vec![0u8; width * 4];
    for (y, dst_row) in dst.chunks_mut(ds).take(height).enumerate() {
        let sr = if flip { height - 1 - y } else { y };
        let cr = sampling.chroma_row(sr);
        yuv_to_rgb32_row(
            tables,
            sampling,
            &src_y[sr * sy..],
            &src_u[cr * su..],
            &src_v[cr * sv..],
            &mut scratch,
            width,
        );
        pack_rgb16_row(format, &scratch, dst_row, width);
    }
    Ok(())
}

/// Converts planar 4:2:0 YUV to RGB565.
#[allow(clippy::too_many_arguments)]
pub fn i420_to_rgb565(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_rgb565: &mut [u8],
    dst_stride_rgb565: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    i420_to_rgb16::<{ PackedRgb16::Rgb565 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_rgb565,
        dst_stride_rgb565,
        width,
        height,
    )
}

/// Converts planar 4:2:0 YUV to ARGB1555 with opaque alpha.
#[allow(clippy::too_many_arguments)]
pub fn i420_to_argb1555(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_argb1555: &mut [u8],
    dst_stride_argb1555: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    i420_to_rgb16::<{ PackedRgb16::Argb1555 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_argb1555,
        dst_stride_argb1555,
        width,
        height,
    )
}

/// Converts planar 4:2:0 YUV to ARGB4444 with opaque alpha.
#[allow(clippy::too_many_arguments)]
pub fn i420_to_argb4444(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_argb4444: &mut [u8],
    dst_stride_argb4444: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    i420_to_rgb16::<{ PackedRgb16::Argb4444 as u8 }>(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        dst_argb4444,
        dst_stride_argb4444,
        width,
        height,
    )
}
