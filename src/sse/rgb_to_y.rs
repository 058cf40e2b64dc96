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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Forward luma for an ARGB row, four pixels per iteration:
/// `((66R + 129G + 25B + 128) >> 8) + 16`, computed exactly with widened
/// 16-bit lanes and 32-bit sums. Requires `width % 4 == 0` and 16-byte
/// aligned source.
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn argb_to_y_row_sse41(src_argb: &[u8], dst_y: &mut [u8], width: usize) {
    let zero = _mm_setzero_si128();
    // Memory order B,G,R,A; madd pairs (B,G) and (R,A).
    let coeff = _mm_setr_epi16(25, 129, 66, 0, 25, 129, 66, 0);
    let round = _mm_set1_epi32(128);
    let bias = _mm_set1_epi32(16);
    let mut x = 0usize;
    while x < width {
        let px = _mm_load_si128(src_argb.as_ptr().add(x * 4) as *const __m128i);
        let lo = _mm_madd_epi16(_mm_unpacklo_epi8(px, zero), coeff);
        let hi = _mm_madd_epi16(_mm_unpackhi_epi8(px, zero), coeff);
        // One 32-bit weighted sum per pixel after the horizontal add.
        let sums = _mm_hadd_epi32(lo, hi);
        let y = _mm_add_epi32(_mm_srai_epi32::<8>(_mm_add_epi32(sums, round)), bias);
        let packed = _mm_packus_epi16(_mm_packs_epi32(y, y), zero);
        std::ptr::write_unaligned(
            dst_y.as_mut_ptr().add(x) as *mut u32,
            _mm_cvtsi128_si32(packed) as u32,
        );
        x += 4;
    }
}
