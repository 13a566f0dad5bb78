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

use std::time::Instant;
use tileblur::{
    box_blur_3x3, box_blur_3x3_reference, kernel_variant, BlurImage, BlurImageMut,
    ThreadingPolicy,
};

const DEFAULT_WIDTH: u32 = 6400;
const DEFAULT_HEIGHT: u32 = 4800;

/// Runs `f` until the best time settles within `accuracy` or `max_iterations` is reached.
///
/// Returns best time in seconds.
fn benchmark<F: FnMut()>(
    min_iterations: usize,
    max_iterations: usize,
    accuracy: f64,
    mut f: F,
) -> f64 {
    let mut best = f64::INFINITY;
    for iteration in 0..max_iterations {
        let start = Instant::now();
        f();
        let elapsed = start.elapsed().as_secs_f64();
        let previous_best = best;
        best = best.min(elapsed);
        if iteration + 1 >= min_iterations && (previous_best - best) <= best * accuracy {
            break;
        }
    }
    best
}

fn make_source() -> (Vec<u16>, u32, u32) {
    if let Some(path) = std::env::args().nth(1) {
        let img = image::open(&path).unwrap().to_luma16();
        let (width, height) = img.dimensions();
        println!("Loaded {path}, {width}x{height} including halo");
        return (img.into_raw(), width, height);
    }
    let width = DEFAULT_WIDTH + 2;
    let height = DEFAULT_HEIGHT + 2;
    let mut state = 0x2545_F491u32;
    let data = (0..width as usize * height as usize)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 8) as u16
        })
        .collect();
    (data, width, height)
}

fn main() {
    let (src, width, height) = make_source();
    let src_image = BlurImage::borrow(&src, width, height);

    let mut reference = BlurImageMut::default();
    let reference_time = benchmark(3, 10, 0.001, || {
        box_blur_3x3_reference(&src_image, &mut reference).unwrap();
    });

    let mut tiled = BlurImageMut::default();
    let single_time = benchmark(10, 100, 0.001, || {
        box_blur_3x3(&src_image, &mut tiled, ThreadingPolicy::Single).unwrap();
    });
    assert_eq!(
        tiled.data.borrow(),
        reference.data.borrow(),
        "Tiled output differs from reference"
    );

    let mut threaded = BlurImageMut::default();
    let threaded_time = benchmark(10, 100, 0.001, || {
        box_blur_3x3(&src_image, &mut threaded, ThreadingPolicy::Adaptive).unwrap();
    });
    assert_eq!(
        threaded.data.borrow(),
        reference.data.borrow(),
        "Threaded output differs from reference"
    );

    println!(
        "Output {}x{}, kernel {:?}",
        tiled.width,
        tiled.height,
        kernel_variant()
    );
    println!("reference: {:.3} ms", reference_time * 1e3);
    println!(
        "tiled single: {:.3} ms, {:.2}x",
        single_time * 1e3,
        reference_time / single_time
    );
    println!(
        "tiled adaptive ({} threads): {:.3} ms, {:.2}x",
        ThreadingPolicy::Adaptive.thread_count(tiled.width, tiled.height),
        threaded_time * 1e3,
        reference_time / threaded_time
    );
}
