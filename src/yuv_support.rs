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

/// Memory order of a packed 32-bit RGB pixel, named by its FOURCC. The
/// offsets below are byte positions within the 4-byte little-endian word,
/// so `Argb` stores `B, G, R, A` in increasing addresses.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Rgb32Layout {
    Argb = 0,
    Bgra = 1,
    Abgr = 2,
    Rgba = 3,
}

impl From<u8> for Rgb32Layout {
    fn from(value: u8) -> Self {
        match value {
            0 => Rgb32Layout::Argb,
            1 => Rgb32Layout::Bgra,
            2 => Rgb32Layout::Abgr,
            3 => Rgb32Layout::Rgba,
            _ => unimplemented!("unknown 32-bit RGB layout {}", value),
        }
    }
}

impl Rgb32Layout {
    pub(crate) const fn b_offset(self) -> usize {
        match self {
            Rgb32Layout::Argb => 0,
            Rgb32Layout::Bgra => 3,
            Rgb32Layout::Abgr => 2,
            Rgb32Layout::Rgba => 1,
        }
    }

    pub(crate) const fn g_offset(self) -> usize {
        match self {
            Rgb32Layout::Argb => 1,
            Rgb32Layout::Bgra => 2,
            Rgb32Layout::Abgr => 1,
            Rgb32Layout::Rgba => 2,
        }
    }

    pub(crate) const fn r_offset(self) -> usize {
        match self {
            Rgb32Layout::Argb => 2,
            Rgb32Layout::Bgra => 1,
            Rgb32Layout::Abgr => 0,
            Rgb32Layout::Rgba => 3,
        }
    }

    pub(crate) const fn a_offset(self) -> usize {
        match self {
            Rgb32Layout::Argb => 3,
            Rgb32Layout::Bgra => 0,
            Rgb32Layout::Abgr => 3,
            Rgb32Layout::Rgba => 0,
        }
    }
}

/// Memory order of a packed 24-bit RGB pixel.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Rgb24Layout {
    /// `B, G, R` in increasing addresses (FOURCC 24BG).
    Rgb24 = 0,
    /// `R, G, B` in increasing addresses (FOURCC RAW).
    Raw = 1,
}

impl From<u8> for Rgb24Layout {
    fn from(value: u8) -> Self {
        match value {
            0 => Rgb24Layout::Rgb24,
            1 => Rgb24Layout::Raw,
            _ => unimplemented!("unknown 24-bit RGB layout {}", value),
        }
    }
}

impl Rgb24Layout {
    pub(crate) const fn b_offset(self) -> usize {
        match self {
            Rgb24Layout::Rgb24 => 0,
            Rgb24Layout::Raw => 2,
        }
    }

    pub(crate) const fn g_offset(self) -> usize {
        1
    }

    pub(crate) const fn r_offset(self) -> usize {
        match self {
            Rgb24Layout::Rgb24 => 2,
            Rgb24Layout::Raw => 0,
        }
    }
}

/// Chroma resolution of a planar YUV image relative to luma.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ChromaSubsampling {
    Yuv420 = 0,
    Yuv422 = 1,
    Yuv444 = 2,
}

impl From<u8> for ChromaSubsampling {
    fn from(value: u8) -> Self {
        match value {
            0 => ChromaSubsampling::Yuv420,
            1 => ChromaSubsampling::Yuv422,
            2 => ChromaSubsampling::Yuv444,
            _ => unimplemented!("unknown chroma subsampling {}", value),
        }
    }
}

impl ChromaSubsampling {
    pub(crate) const fn chroma_width(self, width: u32) -> u32 {
        match self {
            ChromaSubsampling::Yuv444 => width,
            _ => (width + 1) / 2,
        }
    }

    pub(crate) const fn chroma_height(self, height: u32) -> u32 {
        match self {
            ChromaSubsampling::Yuv420 => (height + 1) / 2,
            _ => height,
        }
    }

    #[inline(always)]
    pub(crate) const fn chroma_row(self, luma_row: usize) -> usize {
        match self {
            ChromaSubsampling::Yuv420 => luma_row >> 1,
            _ => luma_row,
        }
    }

    #[inline(always)]
    pub(crate) const fn chroma_column(self, x: usize) -> usize {
        match self {
            ChromaSubsampling::Yuv444 => x,
            _ => x >> 1,
        }
    }
}

/// Byte order of a packed 4:2:2 stream. Each 4-byte group carries two luma
/// samples and one chroma pair.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Packed422Order {
    /// `Y0, U, Y1, V`
    Yuyv = 0,
    /// `U, Y0, V, Y1`
    Uyvy = 1,
}

impl From<u8> for Packed422Order {
    fn from(value: u8) -> Self {
        match value {
            0 => Packed422Order::Yuyv,
            1 => Packed422Order::Uyvy,
            _ => unimplemented!("unknown packed 4:2:2 order {}", value),
        }
    }
}

impl Packed422Order {
    pub(crate) const fn y0_offset(self) -> usize {
        match self {
            Packed422Order::Yuyv => 0,
            Packed422Order::Uyvy => 1,
        }
    }

    pub(crate) const fn u_offset(self) -> usize {
        match self {
            Packed422Order::Yuyv => 1,
            Packed422Order::Uyvy => 0,
        }
    }

    pub(crate) const fn v_offset(self) -> usize {
        self.u_offset() + 2
    }
}

/// Half dimension of a 4:2:0 chroma plane, rounding up.
#[inline(always)]
pub(crate) const fn half_dimension(v: u32) -> u32 {
    (v + 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb32_offsets_cover_all_lanes() {
        for layout in [
            Rgb32Layout::Argb,
            Rgb32Layout::Bgra,
            Rgb32Layout::Abgr,
            Rgb32Layout::Rgba,
        ] {
            let mut seen = [false; 4];
            for off in [
                layout.b_offset(),
                layout.g_offset(),
                layout.r_offset(),
                layout.a_offset(),
            ] {
                assert!(!seen[off]);
                seen[off] = true;
            }
        }
    }

    #[test]
    fn chroma_dimensions_round_up() {
        assert_eq!(ChromaSubsampling::Yuv420.chroma_width(5), 3);
        assert_eq!(ChromaSubsampling::Yuv420.chroma_height(5), 3);
        assert_eq!(ChromaSubsampling::Yuv422.chroma_height(5), 5);
        assert_eq!(ChromaSubsampling::Yuv444.chroma_width(5), 5);
        assert_eq!(half_dimension(1), 1);
    }

    #[test]
    fn packed422_component_positions() {
        assert_eq!(Packed422Order::Yuyv.y0_offset(), 0);
        assert_eq!(Packed422Order::Yuyv.u_offset(), 1);
        assert_eq!(Packed422Order::Yuyv.v_offset(), 3);
        assert_eq!(Packed422Order::Uyvy.y0_offset(), 1);
        assert_eq!(Packed422Order::Uyvy.u_offset(), 0);
        assert_eq!(Packed422Order::Uyvy.v_offset(), 2);
    }
}
