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
use crate::yuv_support::Packed422Order;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// In a 16-bit lane view of the packed stream, luma sits in the low byte
// for YUYV and the high byte for UYVY; chroma is the opposite half.

/// Extracts 16 luma samples per iteration. Requires `width % 16 == 0`,
/// 16-byte aligned source and luma destination.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn packed422_to_y_row_sse2<const ORDER: u8>(
    src: &[u8],
    dst_y: &mut [u8],
    width: usize,
) {
    let order: Packed422Order = ORDER.into();
    let mask = _mm_set1_epi16(0x00FF);
    let mut x = 0usize;
    while x < width {
        let a = _mm_load_si128(src.as_ptr().add(x * 2) as *const __m128i);
        let b = _mm_load_si128(src.as_ptr().add(x * 2 + 16) as *const __m128i);
        let (ya, yb) = match order {
            Packed422Order::Yuyv => (_mm_and_si128(a, mask), _mm_and_si128(b, mask)),
            Packed422Order::Uyvy => (_mm_srli_epi16::<8>(a), _mm_srli_epi16::<8>(b)),
        };
        _mm_store_si128(
            dst_y.as_mut_ptr().add(x) as *mut __m128i,
            _mm_packus_epi16(ya, yb),
        );
        x += 16;
    }
}

/// Box-filters the chroma of two packed rows into planar U and V,
/// 8 chroma samples per iteration. Requires `width % 16 == 0`, a 16-byte
/// aligned source and 8-byte aligned chroma destinations.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn packed422_to_uv_rows_sse2<const ORDER: u8>(
    row0: &[u8],
    row1: &[u8],
    dst_u: &mut [u8],
    dst_v: &mut [u8],
    width: usize,
) {
    let order: Packed422Order = ORDER.into();
    let mask = _mm_set1_epi16(0x00FF);
    let mut x = 0usize;
    while x < width {
        let a = _mm_avg_epu8(
            _mm_load_si128(row0.as_ptr().add(x * 2) as *const __m128i),
            _mm_loadu_si128(row1.as_ptr().add(x * 2) as *const __m128i),
        );
        let b = _mm_avg_epu8(
            _mm_load_si128(row0.as_ptr().add(x * 2 + 16) as *const __m128i),
            _mm_loadu_si128(row1.as_ptr().add(x * 2 + 16) as *const __m128i),
        );
        // Alternating U, V bytes once luma is stripped.
        let (ca, cb) = match order {
            Packed422Order::Yuyv => (_mm_srli_epi16::<8>(a), _mm_srli_epi16::<8>(b)),
            Packed422Order::Uyvy => (_mm_and_si128(a, mask), _mm_and_si128(b, mask)),
        };
        let chroma = _mm_packus_epi16(ca, cb);
        let u = _mm_packus_epi16(_mm_and_si128(chroma, mask), _mm_and_si128(chroma, mask));
        let v = _mm_packus_epi16(_mm_srli_epi16::<8>(chroma), _mm_srli_epi16::<8>(chroma));
        _mm_storel_epi64(dst_u.as_mut_ptr().add(x / 2) as *mut __m128i, u);
        _mm_storel_epi64(dst_v.as_mut_ptr().add(x / 2) as *mut __m128i, v);
        x += 16;
    }
}
