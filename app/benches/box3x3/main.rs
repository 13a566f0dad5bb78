/*
 * // Copyright (c) Radzivon Bartoshyk 10/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */

use criterion::{criterion_group, criterion_main, Criterion};
use tileblur::{BlurImage, BlurImageMut, ThreadingPolicy};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn make_source() -> Vec<u16> {
    let src_width = (WIDTH + 2) as usize;
    let src_height = (HEIGHT + 2) as usize;
    (0..src_width * src_height)
        .map(|i| ((i % src_width) * 31 + (i / src_width) * 17) as u16)
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let src = make_source();
    let src_image = BlurImage::borrow(&src, WIDTH + 2, HEIGHT + 2);
    let mut dst_image = BlurImageMut::alloc(WIDTH, HEIGHT);

    c.bench_function(
        &format!("tileblur: box 3x3 {:?}, Single", tileblur::kernel_variant()),
        |b| {
            b.iter(|| {
                tileblur::box_blur_3x3(&src_image, &mut dst_image, ThreadingPolicy::Single)
                    .unwrap();
            })
        },
    );

    c.bench_function(
        &format!("tileblur: box 3x3 {:?}, Adaptive", tileblur::kernel_variant()),
        |b| {
            b.iter(|| {
                tileblur::box_blur_3x3(&src_image, &mut dst_image, ThreadingPolicy::Adaptive)
                    .unwrap();
            })
        },
    );

    c.bench_function("tileblur: box 3x3 reference", |b| {
        b.iter(|| {
            tileblur::box_blur_3x3_reference(&src_image, &mut dst_image).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
