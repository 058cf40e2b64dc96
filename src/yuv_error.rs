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

/// Conversion failure. Every failure is detected before any destination
/// byte is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("image width and height must not be zero")]
    ZeroSizedImage,
    #[error("negative dimensions are not accepted by this operation")]
    InvalidDimensions,
    #[error("{plane} plane is too small: expected at least {expected} bytes, received {received}")]
    PlaneSizeMismatch {
        plane: &'static str,
        expected: usize,
        received: usize,
    },
    #[error("{plane} plane stride {stride} does not cover a row of {row_bytes} bytes")]
    StrideMismatch {
        plane: &'static str,
        stride: usize,
        row_bytes: usize,
    },
    #[error("plane size computation overflows usize")]
    SizeOverflow,
}

/// Validates a plane of single byte samples: `width` columns, `height` rows
/// at `stride` bytes per row. The last row only has to hold `width` bytes.
pub(crate) fn check_plane8(
    data: &[u8],
    stride: u32,
    width: u32,
    height: u32,
    plane: &'static str,
) -> Result<(), ConvertError> {
    check_packed_plane(data, stride, width, height, 1, plane)
}

/// Validates a packed plane with `sample_size` bytes per sample.
pub(crate) fn check_packed_plane(
    data: &[u8],
    stride: u32,
    width: u32,
    height: u32,
    sample_size: u32,
    plane: &'static str,
) -> Result<(), ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::ZeroSizedImage);
    }
    let row_bytes = (width as usize)
        .checked_mul(sample_size as usize)
        .ok_or(ConvertError::SizeOverflow)?;
    let stride = stride as usize;
    if stride < row_bytes {
        return Err(ConvertError::StrideMismatch {
            plane,
            stride,
            row_bytes,
        });
    }
    let expected = stride
        .checked_mul(height as usize - 1)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(ConvertError::SizeOverflow)?;
    if data.len() < expected {
        return Err(ConvertError::PlaneSizeMismatch {
            plane,
            expected,
            received: data.len(),
        });
    }
    Ok(())
}
