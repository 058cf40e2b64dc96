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
use std::sync::OnceLock;

/// Vector capabilities of the running CPU. Probed once per process,
/// immutable afterwards; converters read this at most once per call.
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct CpuFeatures {
    pub(crate) sse2: bool,
    pub(crate) sse41: bool,
    pub(crate) neon: bool,
}

static FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

pub(crate) fn cpu_features() -> CpuFeatures {
    *FEATURES.get_or_init(probe)
}

#[allow(unreachable_code)]
fn probe() -> CpuFeatures {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    return CpuFeatures {
        sse2: std::arch::is_x86_feature_detected!("sse2"),
        sse41: std::arch::is_x86_feature_detected!("sse4.1"),
        neon: false,
    };
    #[cfg(target_arch = "aarch64")]
    return CpuFeatures {
        sse2: false,
        sse41: false,
        neon: std::arch::is_aarch64_feature_detected!("neon"),
    };
    CpuFeatures::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_is_stable() {
        assert_eq!(cpu_features().sse2, cpu_features().sse2);
        assert_eq!(cpu_features().sse41, cpu_features().sse41);
        assert_eq!(cpu_features().neon, cpu_features().neon);
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    #[test]
    fn sse41_implies_sse2() {
        let f = cpu_features();
        if f.sse41 {
            assert!(f.sse2);
        }
    }
}
