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

//! Raw pixel format conversion between planar YUV, biplanar and packed
//! 4:2:2 sources, and packed RGB in its common byte orders.
//!
//! All converters share one signature shape: plane slices with byte
//! strides, a width in pixels, and a signed height. A negative height
//! processes the image bottom-up, which is how video frames with inverted
//! row order are handled without copying. YUV conversions use
//! studio-swing BT.601 coefficients in fixed point; SIMD row kernels are
//! selected per call from the detected CPU features, with scalar
//! fallbacks that produce byte-identical output.
//!
//! ```
//! use pixform::i420_to_argb;
//!
//! let y = vec![126u8; 64 * 64];
//! let u = vec![128u8; 32 * 32];
//! let v = vec![128u8; 32 * 32];
//! let mut argb = vec![0u8; 64 * 64 * 4];
//! i420_to_argb(&y, 64, &u, 32, &v, 32, &mut argb, 64 * 4, 64, 64).unwrap();
//! ```

#![allow(clippy::too_many_arguments)]

mod built_coefficients;
mod cpu;
mod dispatch;
mod i422_to_i420;
#[cfg(target_arch = "aarch64")]
mod neon;
mod nv_to_i420;
mod pack_rgb;
mod plane_ops;
mod planar_copy;
mod rgb_to_y;
mod shuffle;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
mod sse;
mod y_to_rgb;
mod yuv_error;
mod yuv_support;
mod yuv_to_rgb;
mod yuy2_to_i420;

pub use i422_to_i420::i422_to_i420;
pub use nv_to_i420::{m420_to_i420, nv12_to_i420};
pub use pack_rgb::{
    argb_to_argb1555, argb_to_argb4444, argb_to_rgb565, i420_to_argb1555, i420_to_argb4444,
    i420_to_rgb565,
};
pub use planar_copy::{i420_copy, i420_mirror, i420_rect};
pub use rgb_to_y::{argb_to_i400, argb_to_i420};
pub use shuffle::{
    abgr_to_argb, argb_to_raw, argb_to_rgb24, bgra_to_argb, raw_to_argb, rgb24_to_argb,
    rgba_to_argb,
};
pub use y_to_rgb::i400_to_argb;
pub use yuv_error::ConvertError;
pub use yuv_to_rgb::{
    i420_to_abgr, i420_to_argb, i420_to_bgra, i420_to_rgba, i422_to_abgr, i422_to_argb,
    i422_to_bgra, i422_to_rgba, i444_to_abgr, i444_to_argb, i444_to_bgra, i444_to_rgba,
};
pub use yuy2_to_i420::{uyvy_to_i420, yuy2_to_i420};
