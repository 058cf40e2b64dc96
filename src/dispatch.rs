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

//! Per-call row kernel selection.
//!
//! Each conversion family lists its accelerated candidates most specialized
//! first. A candidate applies when its CPU feature is present, the image
//! width is a multiple of its vector width, and every relevant plane
//! pointer and stride meets its byte alignment. Dimensions and pointers are
//! invariant across rows, so selection runs once per top-level call and
//! falls back to the scalar kernel when nothing matches.

use crate::cpu::CpuFeatures;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RequiredFeature {
    Sse2,
    Sse41,
    Neon,
}

pub(crate) struct KernelCandidate<B: Copy> {
    pub(crate) backend: B,
    pub(crate) feature: RequiredFeature,
    /// Width must be an exact multiple; the kernel handles no remainder.
    pub(crate) width_multiple: u32,
    /// Required alignment of plane pointers and strides; 0 = none.
    pub(crate) byte_align: usize,
}

/// Address and stride of one plane, as seen by the alignment predicate.
/// Chroma planes of subsampled destinations get half the packed
/// requirement, matching their half width.
#[derive(Copy, Clone)]
pub(crate) struct PlaneAccess {
    addr: usize,
    stride: usize,
    halved: bool,
}

impl PlaneAccess {
    pub(crate) fn new(data: &[u8], stride: u32) -> Self {
        PlaneAccess {
            addr: data.as_ptr() as usize,
            stride: stride as usize,
            halved: false,
        }
    }

    pub(crate) fn chroma(data: &[u8], stride: u32) -> Self {
        PlaneAccess {
            addr: data.as_ptr() as usize,
            stride: stride as usize,
            halved: true,
        }
    }

    fn satisfies(&self, byte_align: usize) -> bool {
        if byte_align == 0 {
            return true;
        }
        let align = if self.halved {
            (byte_align / 2).max(1)
        } else {
            byte_align
        };
        self.addr % align == 0 && self.stride % align == 0
    }
}

pub(crate) fn select_row_kernel<B: Copy>(
    candidates: &[KernelCandidate<B>],
    scalar: B,
    features: CpuFeatures,
    width: u32,
    planes: &[PlaneAccess],
) -> B {
    for candidate in candidates {
        let available = match candidate.feature {
            RequiredFeature::Sse2 => features.sse2,
            RequiredFeature::Sse41 => features.sse41,
            RequiredFeature::Neon => features.neon,
        };
        if !available {
            continue;
        }
        if candidate.width_multiple != 0 && width % candidate.width_multiple != 0 {
            continue;
        }
        if !planes.iter().all(|p| p.satisfies(candidate.byte_align)) {
            continue;
        }
        return candidate.backend;
    }
    scalar
}

/// Resets the legacy 64-bit vector register file that aliases the x87
/// stack. Conversion families descended from 64-bit-lane kernels arm this
/// once per call after validation and rely on `Drop` running on every exit
/// path, whichever backend was selected.
pub(crate) struct LegacyFpuGuard {
    _private: (),
}

impl LegacyFpuGuard {
    pub(crate) fn arm() -> Self {
        LegacyFpuGuard { _private: () }
    }
}

impl Drop for LegacyFpuGuard {
    fn drop(&mut self) {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        unsafe {
            std::arch::asm!("emms", options(nomem, nostack));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Fake {
        Scalar,
        Vector,
        WideVector,
    }

    fn all_features() -> CpuFeatures {
        CpuFeatures {
            sse2: true,
            sse41: true,
            neon: true,
        }
    }

    #[test]
    fn falls_back_to_scalar_without_feature() {
        let candidates = [KernelCandidate {
            backend: Fake::Vector,
            feature: RequiredFeature::Sse2,
            width_multiple: 2,
            byte_align: 0,
        }];
        let selected = select_row_kernel(
            &candidates,
            Fake::Scalar,
            CpuFeatures::default(),
            64,
            &[],
        );
        assert_eq!(selected, Fake::Scalar);
    }

    #[test]
    fn width_multiple_is_exact() {
        let candidates = [KernelCandidate {
            backend: Fake::Vector,
            feature: RequiredFeature::Sse2,
            width_multiple: 16,
            byte_align: 0,
        }];
        assert_eq!(
            select_row_kernel(&candidates, Fake::Scalar, all_features(), 48, &[]),
            Fake::Vector
        );
        assert_eq!(
            select_row_kernel(&candidates, Fake::Scalar, all_features(), 50, &[]),
            Fake::Scalar
        );
    }

    #[test]
    fn first_applicable_candidate_wins() {
        let candidates = [
            KernelCandidate {
                backend: Fake::WideVector,
                feature: RequiredFeature::Sse41,
                width_multiple: 8,
                byte_align: 0,
            },
            KernelCandidate {
                backend: Fake::Vector,
                feature: RequiredFeature::Sse2,
                width_multiple: 2,
                byte_align: 0,
            },
        ];
        assert_eq!(
            select_row_kernel(&candidates, Fake::Scalar, all_features(), 16, &[]),
            Fake::WideVector
        );
        assert_eq!(
            select_row_kernel(&candidates, Fake::Scalar, all_features(), 6, &[]),
            Fake::Vector
        );
    }

    #[test]
    fn alignment_covers_pointer_and_stride() {
        let buf = vec![0u8; 256];
        let base = buf.as_ptr() as usize;
        let off = (16 - base % 16) % 16;
        let aligned = &buf[off..];
        let misaligned = &buf[off + 1..];

        let candidates = [KernelCandidate {
            backend: Fake::Vector,
            feature: RequiredFeature::Sse2,
            width_multiple: 0,
            byte_align: 16,
        }];
        assert_eq!(
            select_row_kernel(
                &candidates,
                Fake::Scalar,
                all_features(),
                16,
                &[PlaneAccess::new(aligned, 32)],
            ),
            Fake::Vector
        );
        assert_eq!(
            select_row_kernel(
                &candidates,
                Fake::Scalar,
                all_features(),
                16,
                &[PlaneAccess::new(misaligned, 32)],
            ),
            Fake::Scalar
        );
        assert_eq!(
            select_row_kernel(
                &candidates,
                Fake::Scalar,
                all_features(),
                16,
                &[PlaneAccess::new(aligned, 24)],
            ),
            Fake::Scalar
        );
    }

    #[test]
    fn chroma_planes_need_half_alignment() {
        let buf = vec![0u8; 256];
        let base = buf.as_ptr() as usize;
        let off = (16 - base % 16) % 16;
        // 8-aligned but not 16-aligned.
        let half_aligned = &buf[off + 8..];

        let candidates = [KernelCandidate {
            backend: Fake::Vector,
            feature: RequiredFeature::Sse2,
            width_multiple: 0,
            byte_align: 16,
        }];
        assert_eq!(
            select_row_kernel(
                &candidates,
                Fake::Scalar,
                all_features(),
                16,
                &[PlaneAccess::chroma(half_aligned, 8)],
            ),
            Fake::Vector
        );
        assert_eq!(
            select_row_kernel(
                &candidates,
                Fake::Scalar,
                all_features(),
                16,
                &[PlaneAccess::new(half_aligned, 8)],
            ),
            Fake::Scalar
        );
    }
}
