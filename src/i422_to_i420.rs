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
use crate::plane_ops::copy_plane;
use crate::yuv_error::{check_plane8, ConvertError};
use crate::yuv_support::half_dimension;

/// Averages vertically adjacent source chroma rows into one destination
/// row with round-half-up. The last source row is replicated when the
/// source height is odd.
fn subsample_chroma_vertical(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    src_height: usize,
    flip: bool,
) {
    let src_row = |j: usize| {
        let j = if flip { src_height - 1 - j } else { j };
        &src[j * src_stride..]
    };
    let dst_height = src_height.div_ceil(2);
    for i in 0..dst_height {
        let row_a = src_row(2 * i);
        let row_b = src_row((2 * i + 1).min(src_height - 1));
        let dst_row = &mut dst[i * dst_stride..];
        for x in 0..width {
            dst_row[x] = ((row_a[x] as u16 + row_b[x] as u16 + 1) >> 1) as u8;
        }
    }
}

/// Converts planar 4:2:2 to planar 4:2:0. Luma is copied; chroma rows are
/// box-filtered vertically with `(a + b + 1) >> 1`.
///
/// # Arguments
///
/// * `src_y`: Source luma plane
/// * `src_stride_y`: Source luma plane stride in bytes
/// * `src_u`: Source U plane, half width, full height
/// * `src_stride_u`: Source U plane stride in bytes
/// * `src_v`: Source V plane, half width, full height
/// * `src_stride_v`: Source V plane stride in bytes
/// * `dst_y`: Destination luma plane
/// * `dst_stride_y`: Destination luma plane stride in bytes
/// * `dst_u`: Destination U plane, half width, half height
/// * `dst_stride_u`: Destination U plane stride in bytes
/// * `dst_v`: Destination V plane, half width, half height
/// * `dst_stride_v`: Destination V plane stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
pub fn i422_to_i420(
    src_y: &[u8],
    src_stride_y: u32,
    src_u: &[u8],
    src_stride_u: u32,
    src_v: &[u8],
    src_stride_v: u32,
    dst_y: &mut [u8],
    dst_stride_y: u32,
    dst_u: &mut [u8],
    dst_stride_u: u32,
    dst_v: &mut [u8],
    dst_stride_v: u32,
    width: u32,
    height: i32,
) -> Result<(), ConvertError> {
    let flip = height < 0;
    let height = height.unsigned_abs();
    let half_width = half_dimension(width);
    let half_height = half_dimension(height);

    check_plane8(src_y, src_stride_y, width, height, "source Y")?;
    check_plane8(src_u, src_stride_u, half_width, height, "source U")?;
    check_plane8(src_v, src_stride_v, half_width, height, "source V")?;
    check_plane8(dst_y, dst_stride_y, width, height, "destination Y")?;
    check_plane8(dst_u, dst_stride_u, half_width, half_height, "destination U")?;
    check_plane8(dst_v, dst_stride_v, half_width, half_height, "destination V")?;

    copy_plane(
        src_y,
        src_stride_y as usize,
        dst_y,
        dst_stride_y as usize,
        width as usize,
        height as usize,
        flip,
    );
    subsample_chroma_vertical(
        src_u,
        src_stride_u as usize,
        dst_u,
        dst_stride_u as usize,
        half_width as usize,
        height as usize,
        flip,
    );
    subsample_chroma_vertical(
        src_v,
        src_stride_v as usize,
        dst_v,
        dst_stride_v as usize,
        half_width as usize,
        height as usize,
        flip,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chroma_rows_average_round_half_up() {
        // 2x2 luma, chroma width 1, two chroma rows 10 and 20.
        let y = [0u8; 4];
        let u = [10u8, 20];
        let v = [20u8, 10];
        let mut dy = [0u8; 4];
        let mut du = [0u8; 1];
        let mut dv = [0u8; 1];
        i422_to_i420(&y, 2, &u, 1, &v, 1, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, 2).unwrap();
        assert_eq!(du[0], 15);
        assert_eq!(dv[0], 15);
    }

    #[test]
    fn odd_height_replicates_last_chroma_row() {
        let y = [7u8; 2 * 3];
        let u = [10u8, 20, 40];
        let v = [0u8, 0, 100];
        let mut dy = [0u8; 6];
        let mut du = [0u8; 2];
        let mut dv = [0u8; 2];
        i422_to_i420(&y, 2, &u, 1, &v, 1, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, 3).unwrap();
        assert_eq!(du, [15, 40]);
        assert_eq!(dv, [0, 100]);
        assert_eq!(dy, y);
    }

    #[test]
    fn flip_reverses_luma_and_pairs_chroma_from_bottom() {
        let y: Vec<u8> = (0..8).collect(); // 2x4
        let u = [1u8, 3, 5, 7];
        let v = [2u8, 4, 6, 8];
        let mut dy = [0u8; 8];
        let mut du = [0u8; 2];
        let mut dv = [0u8; 2];
        i422_to_i420(&y, 2, &u, 1, &v, 1, &mut dy, 2, &mut du, 1, &mut dv, 1, 2, -4).unwrap();
        assert_eq!(&dy[0..2], &y[6..8]);
        assert_eq!(&dy[6..8], &y[0..2]);
        // Bottom-up pairs: (7,5) then (3,1).
        assert_eq!(du, [(7 + 5 + 1) >> 1, (3 + 1 + 1) >> 1]);
        assert_eq!(dv, [(8 + 6 + 1) >> 1, (4 + 2 + 1) >> 1]);
    }
}
