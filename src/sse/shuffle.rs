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
use crate::yuv_support::Rgb32Layout;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Reorders four 32-bit pixels per iteration into ARGB memory order.
/// Requires `width % 4 == 0` and 16-byte aligned source and destination.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn shuffle_rgb32_row_sse41<const SRC: u8>(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
) {
    let layout: Rgb32Layout = SRC.into();
    let b = layout.b_offset() as i8;
    let g = layout.g_offset() as i8;
    let r = layout.r_offset() as i8;
    let a = layout.a_offset() as i8;
    let mask = _mm_setr_epi8(
        b,
        g,
        r,
        a,
        b + 4,
        g + 4,
        r + 4,
        a + 4,
        b + 8,
        g + 8,
        r + 8,
        a + 8,
        b + 12,
        g + 12,
        r + 12,
        a + 12,
    );
    let mut x = 0usize;
    while x < width {
        let px = _mm_load_si128(src.as_ptr().add(x * 4) as *const __m128i);
        _mm_store_si128(
            dst.as_mut_ptr().add(x * 4) as *mut __m128i,
            _mm_shuffle_epi8(px, mask),
        );
        x += 4;
    }
}
