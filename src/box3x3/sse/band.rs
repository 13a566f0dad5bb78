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

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::box3x3::scalar::{horizontal_mean3_tail, vertical_mean3_tail};
use crate::box3x3::scratch::TileScratch;
use crate::box3x3::{TILE_HEIGHT, TILE_WIDTH};
use crate::sse::_mm_mean3_epu16;

#[cfg_attr(
    all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"),
    allow(dead_code)
)]
pub(crate) fn box_blur_3x3_band_sse(
    src: &[u16],
    src_stride: usize,
    dst: &mut [u16],
    dst_stride: usize,
    width: usize,
    rows: usize,
) {
    debug_assert!(rows > 0 && rows <= TILE_HEIGHT);
    debug_assert!(src.len() >= (rows + 1) * src_stride + width + 2);
    debug_assert!(dst.len() >= (rows - 1) * dst_stride + width);
    unsafe {
        box_blur_3x3_band_sse_impl(src, src_stride, dst, dst_stride, width, rows);
    }
}

#[target_feature(enable = "sse2")]
unsafe fn box_blur_3x3_band_sse_impl(
    src: &[u16],
    src_stride: usize,
    dst: &mut [u16],
    dst_stride: usize,
    width: usize,
    rows: usize,
) {
    const LANES: usize = 8;

    let mut scratch = TileScratch::default();

    for x_tile in (0..width).step_by(TILE_WIDTH) {
        let tile_width = (width - x_tile).min(TILE_WIDTH);
        let vector_width = tile_width - tile_width % LANES;

        for y in 0..rows + 2 {
            let src_row = src.get_unchecked(y * src_stride + x_tile..);
            let tmp_row = scratch.row_mut(y);

            let mut x = 0usize;
            while x < vector_width {
                let s_ptr = src_row.as_ptr().add(x);
                let a = _mm_loadu_si128(s_ptr as *const __m128i);
                let b = _mm_loadu_si128(s_ptr.add(1) as *const __m128i);
                let c = _mm_loadu_si128(s_ptr.add(2) as *const __m128i);
                _mm_store_si128(
                    tmp_row.as_mut_ptr().add(x) as *mut __m128i,
                    _mm_mean3_epu16(a, b, c),
                );
                x += LANES;
            }

            horizontal_mean3_tail(src_row, tmp_row, vector_width, tile_width);
        }

        for y in 0..rows {
            let row0 = scratch.row(y);
            let row1 = scratch.row(y + 1);
            let row2 = scratch.row(y + 2);
            let dst_row = dst.get_unchecked_mut(y * dst_stride + x_tile..);

            let mut x = 0usize;
            while x < vector_width {
                let a = _mm_load_si128(row0.as_ptr().add(x) as *const __m128i);
                let b = _mm_load_si128(row1.as_ptr().add(x) as *const __m128i);
                let c = _mm_load_si128(row2.as_ptr().add(x) as *const __m128i);
                _mm_storeu_si128(
                    dst_row.as_mut_ptr().add(x) as *mut __m128i,
                    _mm_mean3_epu16(a, b, c),
                );
                x += LANES;
            }

            vertical_mean3_tail(row0, row1, row2, dst_row, vector_width, tile_width);
        }
    }
}
