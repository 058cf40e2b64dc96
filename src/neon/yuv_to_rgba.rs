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
use std::arch::aarch64::*;

/// Two pixels per iteration via 64-bit table loads, saturating 16-bit
/// adds and an arithmetic shift before the unsigned narrow. Requires an
/// even width.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn yuv_to_rgb32_row_neon<const SAMPLING: u8>(
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
        let uv0 = vqadd_s16(
            vld1_s16(tables.u[*u_row.get_unchecked(c0) as usize].as_ptr()),
            vld1_s16(tables.v[*v_row.get_unchecked(c0) as usize].as_ptr()),
        );
        let uv1 = vqadd_s16(
            vld1_s16(tables.u[*u_row.get_unchecked(c1) as usize].as_ptr()),
            vld1_s16(tables.v[*v_row.get_unchecked(c1) as usize].as_ptr()),
        );
        let px0 = vqadd_s16(
            vld1_s16(tables.y[*y_row.get_unchecked(x) as usize].as_ptr()),
            uv0,
        );
        let px1 = vqadd_s16(
            vld1_s16(tables.y[*y_row.get_unchecked(x + 1) as usize].as_ptr()),
            uv1,
        );
        let pair = vshrq_n_s16::<6>(vcombine_s16(px0, px1));
        vst1_u8(dst.as_mut_ptr().add(x * 4), vqmovun_s16(pair));
        x += 2;
    }
}
