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

//! Fixed-point BT.601 coefficient tables.
//!
//! YUV to RGB is decomposed into three 256-entry lookup tables of signed
//! 16-bit per-channel contributions in Q6. A destination channel is
//! `saturate8((y_tab[y] + u_tab[u] + v_tab[v]) >> 6)`. Because the
//! decomposition is a pure table sum, every backend computing it yields the
//! same bytes; the tables below are permuted per output layout so vector
//! kernels can pack pixels without a post-shuffle.

use crate::yuv_support::Rgb32Layout;

/// Per-layout lookup tables. Each entry holds four lanes in the layout's
/// memory order.
pub(crate) struct YuvTables {
    pub(crate) y: [[i16; 4]; 256],
    pub(crate) u: [[i16; 4]; 256],
    pub(crate) v: [[i16; 4]; 256],
}

// BT.601 studio-swing coefficients in thousandths.
const Y_SCALE: i32 = 1164;
const U_BLUE: i32 = 2018;
const U_GREEN: i32 = -391;
const V_GREEN: i32 = -813;
const V_RED: i32 = 1596;

// Opaque alpha, pre-shifted to Q6.
const ALPHA_Q6: i16 = 255 * 64;

/// `round(coeff * v * 64 / 1000)` with sign-aware integer rounding.
const fn fixed_q6(coeff_thousandths: i32, v: i32) -> i16 {
    let num = coeff_thousandths * v * 64;
    let rounded = if num >= 0 {
        (num + 500) / 1000
    } else {
        (num - 500) / 1000
    };
    rounded as i16
}

/// Rearranges canonical `[B, G, R, A]` lanes into the layout's memory order.
const fn place(layout: Rgb32Layout, px: [i16; 4]) -> [i16; 4] {
    let mut out = [0i16; 4];
    out[layout.b_offset()] = px[0];
    out[layout.g_offset()] = px[1];
    out[layout.r_offset()] = px[2];
    out[layout.a_offset()] = px[3];
    out
}

const fn build_tables(layout: Rgb32Layout) -> YuvTables {
    let mut tables = YuvTables {
        y: [[0; 4]; 256],
        u: [[0; 4]; 256],
        v: [[0; 4]; 256],
    };
    let mut i = 0usize;
    while i < 256 {
        let y = fixed_q6(Y_SCALE, i as i32 - 16);
        tables.y[i] = place(layout, [y, y, y, ALPHA_Q6]);
        tables.u[i] = place(
            layout,
            [
                fixed_q6(U_BLUE, i as i32 - 128),
                fixed_q6(U_GREEN, i as i32 - 128),
                0,
                0,
            ],
        );
        tables.v[i] = place(
            layout,
            [
                0,
                fixed_q6(V_GREEN, i as i32 - 128),
                fixed_q6(V_RED, i as i32 - 128),
                0,
            ],
        );
        i += 1;
    }
    tables
}

static TABLES_ARGB: YuvTables = build_tables(Rgb32Layout::Argb);
static TABLES_BGRA: YuvTables = build_tables(Rgb32Layout::Bgra);
static TABLES_ABGR: YuvTables = build_tables(Rgb32Layout::Abgr);
static TABLES_RGBA: YuvTables = build_tables(Rgb32Layout::Rgba);

pub(crate) fn tables_for(layout: Rgb32Layout) -> &'static YuvTables {
    match layout {
        Rgb32Layout::Argb => &TABLES_ARGB,
        Rgb32Layout::Bgra => &TABLES_BGRA,
        Rgb32Layout::Abgr => &TABLES_ABGR,
        Rgb32Layout::Rgba => &TABLES_RGBA,
    }
}

/// Scalar reference for one pixel: table sum, arithmetic shift, clamp.
/// The vector kernels use 16-bit saturating adds instead of a plain 32-bit
/// sum; the only lane that can exceed i16 range is blue at maximum positive
/// contribution, and both paths clamp it to 255 after the shift.
#[inline(always)]
pub(crate) fn yuv_to_rgb32_pixel(tables: &YuvTables, y: u8, u: u8, v: u8, dst: &mut [u8]) {
    let y_tab = &tables.y[y as usize];
    let u_tab = &tables.u[u as usize];
    let v_tab = &tables.v[v as usize];
    for c in 0..4 {
        let sum = y_tab[c] as i32 + u_tab[c] as i32 + v_tab[c] as i32;
        dst[c] = (sum >> 6).clamp(0, 255) as u8;
    }
}

/// Forward luma: `((66R + 129G + 25B + 128) >> 8) + 16`. The result is
/// always in [16, 235], no clamp needed.
#[inline(always)]
pub(crate) fn rgb_to_y(r: u8, g: u8, b: u8) -> u8 {
    (((66 * r as i32 + 129 * g as i32 + 25 * b as i32 + 128) >> 8) + 16) as u8
}

/// Forward Cb: `((-38R - 74G + 112B + 128) >> 8) + 128`, range [16, 240].
#[inline(always)]
pub(crate) fn rgb_to_u(r: u8, g: u8, b: u8) -> u8 {
    (((-38 * r as i32 - 74 * g as i32 + 112 * b as i32 + 128) >> 8) + 128) as u8
}

/// Forward Cr: `((112R - 94G - 18B + 128) >> 8) + 128`, range [16, 240].
#[inline(always)]
pub(crate) fn rgb_to_v(r: u8, g: u8, b: u8) -> u8 {
    (((112 * r as i32 - 94 * g as i32 - 18 * b as i32 + 128) >> 8) + 128) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_black_fixed_point() {
        let mut px = [0u8; 4];
        yuv_to_rgb32_pixel(tables_for(Rgb32Layout::Argb), 16, 128, 128, &mut px);
        assert_eq!(px, [0, 0, 0, 255]);
    }

    #[test]
    fn neutral_white_fixed_point() {
        let mut px = [0u8; 4];
        yuv_to_rgb32_pixel(tables_for(Rgb32Layout::Argb), 235, 128, 128, &mut px);
        // What the table produces for full-range white, not assumed 255.
        let expected = (TABLES_ARGB.y[235][0] as i32 >> 6).clamp(0, 255) as u8;
        assert_eq!(px, [expected, expected, expected, 255]);
        assert!(expected >= 254);
    }

    #[test]
    fn neutral_chroma_has_no_color_cast() {
        let tables = tables_for(Rgb32Layout::Argb);
        for y in 0..=255u8 {
            let mut px = [0u8; 4];
            yuv_to_rgb32_pixel(tables, y, 128, 128, &mut px);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn layout_tables_are_permutations() {
        for i in 0..256 {
            let argb = TABLES_ARGB.y[i];
            let bgra = TABLES_BGRA.y[i];
            // ARGB memory order is B,G,R,A; BGRA memory order is A,R,G,B.
            assert_eq!(argb[0], bgra[3]);
            assert_eq!(argb[1], bgra[2]);
            assert_eq!(argb[2], bgra[1]);
            assert_eq!(argb[3], bgra[0]);
        }
    }

    #[test]
    fn alpha_lane_is_opaque_for_every_luma() {
        for i in 0..256 {
            assert_eq!(TABLES_ARGB.y[i][3], ALPHA_Q6);
            assert_eq!(TABLES_ARGB.u[i][3], 0);
            assert_eq!(TABLES_ARGB.v[i][3], 0);
        }
    }

    #[test]
    fn forward_luma_range() {
        assert_eq!(rgb_to_y(0, 0, 0), 16);
        assert_eq!(rgb_to_y(255, 255, 255), 235);
        assert_eq!(rgb_to_u(128, 128, 128), 128);
        assert_eq!(rgb_to_v(128, 128, 128), 128);
    }

    #[test]
    fn forward_chroma_extremes_stay_in_range() {
        for (r, g, b) in [
            (255u8, 0u8, 0u8),
            (0, 255, 0),
            (0, 0, 255),
            (255, 255, 0),
            (0, 255, 255),
            (255, 0, 255),
        ] {
            for v in [rgb_to_u(r, g, b), rgb_to_v(r, g, b)] {
                assert!((16..=240).contains(&v));
            }
        }
    }
}
