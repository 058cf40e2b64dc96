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
#![forbid(unsafe_code)]

//! Byte-level row operations shared by the converters. These know nothing
//! about color semantics; callers have already validated sizes and
//! resolved the flip orientation.

/// Row-wise copy, stride to stride. `flip` reverses the source row order.
pub(crate) fn copy_plane(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
    flip: bool,
) {
    let dst_rows = dst.chunks_mut(dst_stride).take(height);
    let src_rows = src.chunks(src_stride).take(height);
    if flip {
        for (dst_row, src_row) in dst_rows.zip(src_rows.rev()) {
            dst_row[..width].copy_from_slice(&src_row[..width]);
        }
    } else {
        for (dst_row, src_row) in dst_rows.zip(src_rows) {
            dst_row[..width].copy_from_slice(&src_row[..width]);
        }
    }
}

/// Copies a luma plane whose physical rows alternate between two source
/// strides (biplanar layouts interleaving a chroma row after every luma
/// row pair). `stride_0` advances after even rows, `stride_1` after odd
/// rows. `flip` reverses the destination row order.
pub(crate) fn copy_plane_interleaved_rows(
    src: &[u8],
    src_stride_0: usize,
    src_stride_1: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
    flip: bool,
) {
    let mut src_offset = 0usize;
    for y in 0..height {
        let dst_row = if flip { height - 1 - y } else { y };
        dst[dst_row * dst_stride..][..width].copy_from_slice(&src[src_offset..][..width]);
        src_offset += if y & 1 == 0 { src_stride_0 } else { src_stride_1 };
    }
}

/// Fills a `width` x `height` region at offset (`x`, `y`) with one value.
pub(crate) fn set_plane_rect(
    dst: &mut [u8],
    stride: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    value: u8,
) {
    for row in dst.chunks_mut(stride).skip(y).take(height) {
        row[x..x + width].fill(value);
    }
}

/// Per-row horizontal reversal: `out[i] = in[width - 1 - i]`.
pub(crate) fn mirror_plane(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
) {
    for (dst_row, src_row) in dst
        .chunks_mut(dst_stride)
        .zip(src.chunks(src_stride))
        .take(height)
    {
        for (i, out) in dst_row[..width].iter_mut().enumerate() {
            *out = src_row[width - 1 - i];
        }
    }
}

/// De-interleaves `width` byte pairs into two streams.
pub(crate) fn split_uv_row(src_uv: &[u8], dst_u: &mut [u8], dst_v: &mut [u8], width: usize) {
    for ((pair, u), v) in src_uv
        .chunks_exact(2)
        .zip(dst_u.iter_mut())
        .zip(dst_v.iter_mut())
        .take(width)
    {
        *u = pair[0];
        *v = pair[1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn split_two_pairs() {
        let src = [1u8, 2, 3, 4];
        let mut u = [0u8; 2];
        let mut v = [0u8; 2];
        split_uv_row(&src, &mut u, &mut v, 2);
        assert_eq!(u, [1, 3]);
        assert_eq!(v, [2, 4]);
    }

    #[test]
    fn mirror_is_involutive_even_width() {
        let mut rng = rand::rng();
        let width = 16;
        let src: Vec<u8> = (0..width * 4).map(|_| rng.random()).collect();
        let mut once = vec![0u8; src.len()];
        let mut twice = vec![0u8; src.len()];
        mirror_plane(&src, width, &mut once, width, width, 4);
        mirror_plane(&once, width, &mut twice, width, width, 4);
        assert_eq!(src, twice);
    }

    #[test]
    fn mirror_keeps_center_sample_odd_width() {
        let src = [1u8, 2, 3, 4, 5];
        let mut dst = [0u8; 5];
        mirror_plane(&src, 5, &mut dst, 5, 5, 1);
        assert_eq!(dst, [5, 4, 3, 2, 1]);
        assert_eq!(dst[2], src[2]);
    }

    #[test]
    fn set_rect_leaves_surroundings() {
        let mut plane = vec![9u8; 8 * 8];
        set_plane_rect(&mut plane, 8, 2, 1, 3, 2, 0);
        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..5).contains(&x) && (1..3).contains(&y);
                assert_eq!(plane[y * 8 + x], if inside { 0 } else { 9 });
            }
        }
    }

    #[test]
    fn set_rect_is_idempotent() {
        let mut once = vec![0u8; 6 * 4];
        set_plane_rect(&mut once, 6, 0, 0, 6, 4, 77);
        let mut twice = once.clone();
        set_plane_rect(&mut twice, 6, 0, 0, 6, 4, 77);
        assert_eq!(once, twice);
    }

    #[test]
    fn copy_plane_flip_reverses_rows() {
        let src: Vec<u8> = (0..12).collect();
        let mut dst = vec![0u8; 12];
        copy_plane(&src, 4, &mut dst, 4, 4, 3, true);
        assert_eq!(&dst[0..4], &src[8..12]);
        assert_eq!(&dst[4..8], &src[4..8]);
        assert_eq!(&dst[8..12], &src[0..4]);
    }

    #[test]
    fn interleaved_copy_skips_chroma_rows() {
        // Two luma rows of 4 bytes, then one forbidden row, repeated.
        let width = 4usize;
        let stride = 4usize;
        let mut src = Vec::new();
        for group in 0..2u8 {
            src.extend_from_slice(&[group * 10 + 1; 4]);
            src.extend_from_slice(&[group * 10 + 2; 4]);
            src.extend_from_slice(&[0xEE; 4]);
        }
        let mut dst = vec![0u8; 4 * width];
        copy_plane_interleaved_rows(&src, stride, 2 * stride, &mut dst, width, width, 4, false);
        assert_eq!(&dst[0..4], &[1; 4]);
        assert_eq!(&dst[4..8], &[2; 4]);
        assert_eq!(&dst[8..12], &[11; 4]);
        assert_eq!(&dst[12..16], &[12; 4]);
    }
}
