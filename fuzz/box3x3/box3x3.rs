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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::num::NonZeroUsize;
use tileblur::{BlurImage, BlurImageMut, ThreadingPolicy};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub dst_width: u16,
    pub dst_height: u16,
    pub stride_pad: u8,
    pub seed: u32,
    pub threads: u8,
}

fuzz_target!(|data: SrcImage| {
    if data.dst_width > 700 || data.dst_height > 300 {
        return;
    }
    fuzz_box3x3(
        data.dst_width as usize,
        data.dst_height as usize,
        data.stride_pad as usize,
        data.seed,
        data.threads,
    );
});

fn fuzz_box3x3(width: usize, height: usize, stride_pad: usize, seed: u32, threads: u8) {
    let src_width = width + 2;
    let src_height = height + 2;
    let src_stride = src_width + stride_pad;

    let mut state = seed | 1;
    let src = (0..src_stride * src_height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 8) as u16
        })
        .collect::<Vec<u16>>();
    let src_image = BlurImage::borrow_with_stride(
        &src,
        src_width as u32,
        src_height as u32,
        src_stride as u32,
    );

    let policy = match NonZeroUsize::new(threads as usize % 9) {
        Some(count) => ThreadingPolicy::Fixed(count),
        None => ThreadingPolicy::Adaptive,
    };

    let mut dst_image = BlurImageMut::default();
    let tiled = tileblur::box_blur_3x3(&src_image, &mut dst_image, policy);
    let mut reference_image = BlurImageMut::default();
    let reference = tileblur::box_blur_3x3_reference(&src_image, &mut reference_image);

    if width == 0 || height == 0 {
        assert!(tiled.is_err());
        assert!(reference.is_err());
        return;
    }
    tiled.unwrap();
    reference.unwrap();
    assert_eq!(
        dst_image.data.borrow(),
        reference_image.data.borrow(),
        "{:?} kernel diverged for {}x{}",
        tileblur::kernel_variant(),
        width,
        height
    );
}
