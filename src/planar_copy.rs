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
use crate::plane_ops::{copy_plane, mirror_plane, set_plane_rect};
use crate::yuv_error::{check_plane8, ConvertError};
use crate::yuv_support::half_dimension;

/// Copies a planar 4:2:0 image.
///
/// # Arguments
///
/// * `src_y`: Source luma plane
/// * `src_stride_y`: Source luma plane stride in bytes
/// * `src_u`: Source U chroma plane
/// * `src_stride_u`: Source U chroma plane stride in bytes
/// * `src_v`: Source V chroma plane
/// * `src_stride_v`: Source V chroma plane stride in bytes
/// * `dst_y`: Destination luma plane
/// * `dst_stride_y`: Destination luma plane stride in bytes
/// * `dst_u`: Destination U chroma plane
/// * `dst_stride_u`: Destination U chroma plane stride in bytes
/// * `dst_v`: Destination V chroma plane
/// * `dst_stride_v`: Destination V chroma plane stride in bytes
/// * `width`: Image width in pixels
/// * `height`: Image height; negative flips the image vertically
pub fn i420_copy(
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
    check_plane8(src_u, src_stride_u, half_width, half_height, "source U")?;
    check_plane8(src_v, src_stride_v, half_width, half_height, "source V")?;
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
    copy_plane(
        src_u,
        src_stride_u as usize,
        dst_u,
        dst_stride_u as usize,
        half_width as usize,
        half_height as usize,
        flip,
    );
    copy_plane(
        src_v,
        src_stride_v as usize,
        dst_v,
        dst_stride_v as usize,
        half_width as usize,
        half_height as usize,
        flip,
    );
    Ok(())
}

/// Horizontally mirrors a planar 4:2:0 image. Chroma planes are mirrored
/// across the chroma (half) width. Only accepts positive dimensions; a
/// negative `height` is rejected rather than treated as a flip.
pub fn i420_mirror(
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
    if height < 0 {
        return Err(ConvertError::InvalidDimensions);
    }
    let height = height as u32;
    let half_width = half_dimension(width);
    let half_height = half_dimension(height);

    check_plane8(src_y, src_stride_y, width, height, "source Y")?;
    check_plane8(src_u, src_stride_u, half_width, half_height, "source U")?;
    check_plane8(src_v, src_stride_v, half_width, half_height, "source V")?;
    check_plane8(dst_y, dst_stride_y, width, height, "destination Y")?;
    check_plane8(dst_u, dst_stride_u, half_width, half_height, "destination U")?;
    check_plane8(dst_v, dst_stride_v, half_width, half_height, "destination V")?;

    mirror_plane(
        src_y,
        src_stride_y as usize,
        dst_y,
        dst_stride_y as usize,
        width as usize,
        height as usize,
    );
    mirror_plane(
        src_u,
        src_stride_u as usize,
        dst_u,
        dst_stride_u as usize,
        half_width as usize,
        half_height as usize,
    );
    mirror_plane(
        src_v,
        src_stride_v as usize,
        dst_v,
        dst_stride_v as usize,
        half_width as usize,
        half_height as usize,
    );
    Ok(())
}

/// Fills a rectangle of a planar 4:2:0 image with constant Y, U and V
/// values. `x` and `y` position the rectangle's top-left corner; the
/// chroma rectangle starts at (`x / 2`, `y / 2`) and spans the half
/// dimensions. A negative `height` is only accepted at `y == 0`, where a
/// vertical flip of a uniform fill covers the same rows.
pub fn i420_rect(
    dst_y: &mut [u8],
    dst_stride_y: u32,
    dst_u: &mut [u8],
    dst_stride_u: u32,
    dst_v: &mut [u8],
    dst_stride_v: u32,
    x: u32,
    y: u32,
    width: u32,
    height: i32,
    value_y: u8,
    value_u: u8,
    value_v: u8,
) -> Result<(), ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::ZeroSizedImage);
    }
    let flip = height < 0;
    if flip && y != 0 {
        return Err(ConvertError::InvalidDimensions);
    }
    let height = height.unsigned_abs();
    let half_width = half_dimension(width);
    let half_height = half_dimension(height);
    // The plane checks see the rectangle's far edge, not the image size.
    let right = x.checked_add(width).ok_or(ConvertError::SizeOverflow)?;
    let bottom = y.checked_add(height).ok_or(ConvertError::SizeOverflow)?;

    check_plane8(dst_y, dst_stride_y, right, bottom, "destination Y")?;
    check_plane8(
        dst_u,
        dst_stride_u,
        x / 2 + half_width,
        y / 2 + half_height,
        "destination U",
    )?;
    check_plane8(
        dst_v,
        dst_stride_v,
        x / 2 + half_width,
        y / 2 + half_height,
        "destination V",
    )?;

    set_plane_rect(
        dst_y,
        dst_stride_y as usize,
        x as usize,
        y as usize,
        width as usize,
        height as usize,
        value_y,
    );
    set_plane_rect(
        dst_u,
        dst_stride_u as usize,
        (x / 2) as usize,
        (y / 2) as usize,
        half_width as usize,
        half_height as usize,
        value_u,
    );
    set_plane_rect(
        dst_v,
        dst_stride_v as usize,
        (x / 2) as usize,
        (y / 2) as usize,
        half_width as usize,
        half_height as usize,
        value_v,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_i420(width: usize, height: usize) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        let mut rng = rand::rng();
        let cw = width.div_ceil(2);
        let ch = height.div_ceil(2);
        let y: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let u: Vec<u8> = (0..cw * ch).map(|_| rng.random()).collect();
        let v: Vec<u8> = (0..cw * ch).map(|_| rng.random()).collect();
        (y, u, v)
    }

    #[test]
    fn copy_roundtrip() {
        let (y, u, v) = random_i420(8, 6);
        let mut dy = vec![0u8; y.len()];
        let mut du = vec![0u8; u.len()];
        let mut dv = vec![0u8; v.len()];
        i420_copy(
            &y, 8, &u, 4, &v, 4, &mut dy, 8, &mut du, 4, &mut dv, 4, 8, 6,
        )
        .unwrap();
        assert_eq!(y, dy);
        assert_eq!(u, du);
        assert_eq!(v, dv);
    }

    #[test]
    fn copy_negative_height_flips_all_planes() {
        let (y, u, v) = random_i420(4, 4);
        let mut dy = vec![0u8; y.len()];
        let mut du = vec![0u8; u.len()];
        let mut dv = vec![0u8; v.len()];
        i420_copy(
            &y, 4, &u, 2, &v, 2, &mut dy, 4, &mut du, 2, &mut dv, 2, 4, -4,
        )
        .unwrap();
        assert_eq!(&dy[0..4], &y[12..16]);
        assert_eq!(&dy[12..16], &y[0..4]);
        assert_eq!(&du[0..2], &u[2..4]);
        assert_eq!(&dv[2..4], &v[0..2]);
    }

    #[test]
    fn mirror_rejects_negative_height() {
        let (y, u, v) = random_i420(4, 4);
        let mut dy = vec![0u8; y.len()];
        let mut du = vec![0u8; u.len()];
        let mut dv = vec![0u8; v.len()];
        assert_eq!(
            i420_mirror(&y, 4, &u, 2, &v, 2, &mut dy, 4, &mut du, 2, &mut dv, 2, 4, -4),
            Err(ConvertError::InvalidDimensions)
        );
    }

    #[test]
    fn mirror_twice_restores_even_width() {
        let (y, u, v) = random_i420(8, 4);
        let mut my = vec![0u8; y.len()];
        let mut mu = vec![0u8; u.len()];
        let mut mv = vec![0u8; v.len()];
        i420_mirror(&y, 8, &u, 4, &v, 4, &mut my, 8, &mut mu, 4, &mut mv, 4, 8, 4).unwrap();
        let mut ry = vec![0u8; y.len()];
        let mut ru = vec![0u8; u.len()];
        let mut rv = vec![0u8; v.len()];
        i420_mirror(
            &my, 8, &mu, 4, &mv, 4, &mut ry, 8, &mut ru, 4, &mut rv, 4, 8, 4,
        )
        .unwrap();
        assert_eq!(y, ry);
        assert_eq!(u, ru);
        assert_eq!(v, rv);
    }

    #[test]
    fn rect_fills_requested_region_only() {
        let mut dy = vec![1u8; 8 * 8];
        let mut du = vec![2u8; 4 * 4];
        let mut dv = vec![3u8; 4 * 4];
        i420_rect(
            &mut dy, 8, &mut du, 4, &mut dv, 4, 2, 2, 4, 4, 50, 60, 70,
        )
        .unwrap();
        assert_eq!(dy[2 * 8 + 2], 50);
        assert_eq!(dy[5 * 8 + 5], 50);
        assert_eq!(dy[0], 1);
        assert_eq!(du[4 + 1], 60);
        assert_eq!(dv[4 + 2], 70);
        assert_eq!(du[0], 2);
    }

    #[test]
    fn rect_rejects_zero_dimensions_at_any_origin() {
        let mut dy = vec![0u8; 4 * 4];
        let mut du = vec![0u8; 2 * 2];
        let mut dv = vec![0u8; 2 * 2];
        // An even row origin must not mask the zero height.
        assert_eq!(
            i420_rect(&mut dy, 4, &mut du, 2, &mut dv, 2, 0, 2, 4, 0, 9, 9, 9),
            Err(ConvertError::ZeroSizedImage)
        );
        assert_eq!(
            i420_rect(&mut dy, 4, &mut du, 2, &mut dv, 2, 2, 0, 0, 4, 9, 9, 9),
            Err(ConvertError::ZeroSizedImage)
        );
        assert!(dy.iter().all(|&b| b == 0));
    }

    #[test]
    fn rect_edge_overflow_is_reported() {
        let mut dy = vec![0u8; 4 * 4];
        let mut du = vec![0u8; 2 * 2];
        let mut dv = vec![0u8; 2 * 2];
        assert_eq!(
            i420_rect(&mut dy, 4, &mut du, 2, &mut dv, 2, u32::MAX, 0, 4, 4, 9, 9, 9),
            Err(ConvertError::SizeOverflow)
        );
    }

    #[test]
    fn rect_flip_only_at_origin_row() {
        let mut dy = vec![0u8; 4 * 4];
        let mut du = vec![0u8; 2 * 2];
        let mut dv = vec![0u8; 2 * 2];
        assert!(i420_rect(&mut dy, 4, &mut du, 2, &mut dv, 2, 0, 0, 4, -4, 9, 9, 9).is_ok());
        assert!(dy.iter().all(|&b| b == 9));
        assert_eq!(
            i420_rect(&mut dy, 4, &mut du, 2, &mut dv, 2, 0, 1, 4, -2, 9, 9, 9),
            Err(ConvertError::InvalidDimensions)
        );
    }
}
