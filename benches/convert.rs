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
use criterion::{criterion_group, criterion_main, Criterion};
use pixform::{argb_to_i420, i420_to_argb, yuy2_to_i420};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn bench_convert(c: &mut Criterion) {
    let luma_len = (WIDTH * HEIGHT) as usize;
    let chroma_len = ((WIDTH / 2) * (HEIGHT / 2)) as usize;

    let y = vec![126u8; luma_len];
    let u = vec![100u8; chroma_len];
    let v = vec![150u8; chroma_len];
    let mut argb = vec![0u8; luma_len * 4];
    c.bench_function("i420_to_argb 1080p", |b| {
        b.iter(|| {
            i420_to_argb(
                &y,
                WIDTH,
                &u,
                WIDTH / 2,
                &v,
                WIDTH / 2,
                &mut argb,
                WIDTH * 4,
                WIDTH,
                HEIGHT as i32,
            )
            .unwrap()
        })
    });

    let mut dy = vec![0u8; luma_len];
    let mut du = vec![0u8; chroma_len];
    let mut dv = vec![0u8; chroma_len];
    c.bench_function("argb_to_i420 1080p", |b| {
        b.iter(|| {
            argb_to_i420(
                &argb,
                WIDTH * 4,
                &mut dy,
                WIDTH,
                &mut du,
                WIDTH / 2,
                &mut dv,
                WIDTH / 2,
                WIDTH,
                HEIGHT as i32,
            )
            .unwrap()
        })
    });

    let yuy2 = vec![0x80u8; luma_len * 2];
    c.bench_function("yuy2_to_i420 1080p", |b| {
        b.iter(|| {
            yuy2_to_i420(
                &yuy2,
                WIDTH * 2,
                &mut dy,
                WIDTH,
                &mut du,
                WIDTH / 2,
                &mut dv,
                WIDTH / 2,
                WIDTH,
                HEIGHT as i32,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
