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
use crate::built_coefficients::YuvTables;
use crate::yuv_support::ChromaSubsampling;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// The table entries are eight bytes each, loaded with a 64-bit move into
// the low lanes. Sums use saturating 16-bit adds; the arithmetic shift and
// unsigned pack afterwards reproduce the scalar clamp exactly.

#[inline(always)]
unsafe fn load_entry(entry: &[i16; 4]) -> __m128i {
    _mm_loadl_epi64(entry.as_ptr() as *const __m128i)
}

#[inline(always)]
unsafe fn pixel_pair(
    tables: &YuvTables,
    y0: u8,
    y1: u8,
    u0: u8,
    v0: u8,
    u1: u8,
    v1: u8,
) -> __m128i {
    let uv0 = _mm_adds_epi16(
        load_entry(&tables.u[u0 as usize]),
        load_entry(&tables.v[v0 as usize]),
    );
    let uv1 = _mm_adds_epi16(
        load_entry(&tables.u[u1 as usize]),
        load_entry(&tables.v[v1 as usize]),
    );
    let px0 = _mm_adds_epi16(load_entry(&tables.y[y0 as usize]), uv0);
    let px1 = _mm_adds_epi16(load_entry(&tables.y[y1 as usize]), uv1);
    _mm_srai_epi16::<6>(_mm_unpacklo_epi64(px0, px1))
}

/// Two pixels per iteration, unaligned stores. Requires an even width.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn yuv_to_rgb32_row_narrow<const SAMPLING: u8>(
    tables: &YuvTables,
    y_row: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    dst: &mut [u8],
    width: usize,
) {
    let sampling: ChromaSubsampling = SAMPLING.into();
    let mut x = 0usize;
    while x < width {
        let c0 = sampling.chroma_column(x);
        let c1 = sampling.chroma_column(x + 1);
        let pair = pixel_pair(
            tables,
            *y_row.get_unchecked(x),
            *y_row.get_unchecked(x + 1),
            *u_row.get_unchecked(c0),
            *v_row.get_unchecked(c0),
            *u_row.get_unchecked(c1),
            *v_row.get_unchecked(c1),
        );
        let packed = _mm_packus_epi16(pair, pair);
        _mm_storel_epi64(dst.as_mut_ptr().add(x * 4) as *mut __m128i, packed);
        x += 2;
    }
}

/// Eight pixels per iteration with aligned 16-byte stores. Requires
/// `width % 8 == 0` and a 16-byte aligned destination row.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn yuv_to_rgb32_row_wide<const SAMPLING: u8>(
    tables: &YuvTables,
    y_row: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    dst: &mut [u8],
    width: usize,
) {
    let sampling: ChromaSubsampling = SAMPLING.into();
    let mut x = 0usize;
    while x < width {
        let mut quads = [_mm_setzero_si128(); 2];
        for (q, quad) in quads.iter_mut().enumerate() {
            let base = x + q * 4;
            let c0 = sampling.chroma_column(base);
            let c1 = sampling.chroma_column(base + 1);
            let c2 = sampling.chroma_column(base + 2);
            let c3 = sampling.chroma_column(base + 3);
            let pair01 = pixel_pair(
                tables,
                *y_row.get_unchecked(base),
                *y_row.get_unchecked(base + 1),
                *u_row.get_unchecked(c0),
                *v_row.get_unchecked(c0),
                *u_row.get_unchecked(c1),
                *v_row.get_unchecked(c1),
            );
            let pair23 = pixel_pair(
                tables,
                *y_row.get_unchecked(base + 2),
                *y_row.get_unchecked(base + 3),
                *u_row.get_unchecked(c2),
                *v_row.get_unchecked(c2),
                *u_row.get_unchecked(c3),
                *v_row.get_unchecked(c3),
            );
            *quad = _mm_packus_epi16(pair01, pair23);
        }
        _mm_store_si128(dst.as_mut_ptr().add(x * 4) as *mut __m128i, quads[0]);
        _mm_store_si128(dst.as_mut_ptr().add(x * 4 + 16) as *mut __m128i, quads[1]);
        x += 8;
    }
}

/// Grayscale expansion with neutral chroma: only the luma table
/// contributes. Two pixels per iteration, even width required.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn y_to_rgb32_row_narrow(
    tables: &YuvTables,
    y_row: &[u8],
    dst: &mut [u8],
    width: usize,
) {
    let mut x = 0usize;
    while x < width {
        let px0 = load_entry(&tables.y[*y_row.get_unchecked(x) as usize]);
        let px1 = load_entry(&tables.y[*y_row.get_unchecked(x + 1) as usize]);
        let pair = _mm_srai_epi16::<6>(_mm_unpacklo_epi64(px0, px1));
        let packed = _mm_packus_epi16(pair, pair);
        _mm_storel_epi64(dst.as_mut_ptr().add(x * 4) as *mut __m128i, packed);
        x += 2;
    }
}

/// Grayscale expansion, eight pixels per iteration, aligned stores.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn y_to_rgb32_row_wide(
    tables: &YuvTables,
    y_row: &[u8],
    dst: &mut [u8],
    width: usize,
) {
    let mut x = 0usize;
    while x < width {
        let mut quads = [_mm_setzero_si128(); 2];
        for (q, quad) in quads.iter_mut().enumerate() {
            let base = x + q * 4;
            let pair01 = _mm_srai_epi16::<6>(_mm_unpacklo_epi64(
                load_entry(&tables.y[*y_row.get_unchecked(base) as usize]),
                load_entry(&tables.y[*y_row.get_unchecked(base + 1) as usize]),
            ));
            let pair23 = _mm_srai_epi16::<6>(_mm_unpacklo_epi64(
                load_entry(&tables.y[*y_row.get_unchecked(base + 2) as usize]),
                load_entry(&tables.y[*y_row.get_unchecked(base + 3) as usize]),
            ));
            *quad = _mm_packus_epi16(pair01, pair23);
        }
        _mm_store_si128(dst.as_mut_ptr().add(x * 4) as *mut __m128i, quads[0]);
        _mm_store_si128(dst.as_mut_ptr().add(x * 4 + 16) as *mut __m128i, quads[1]);
        x += 8;
    }
}
