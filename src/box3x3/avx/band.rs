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

use crate::avx::_mm256_mean3_epu16;
use crate::box3x3::scalar::{horizontal_mean3_tail, vertical_mean3_tail};
use crate::box3x3::scratch::TileScratch;
use crate::box3x3::{TILE_HEIGHT, TILE_WIDTH};

const LANES: usize = 16;

pub(crate) fn box_blur_3x3_band_avx(
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
        box_blur_3x3_band_avx_impl(src, src_stride, dst, dst_stride, width, rows);
    }
}

#[inline(always)]
unsafe fn horizontal_step(src: *const u16, dst: *mut u16) {
    let a = _mm256_loadu_si256(src as *const __m256i);
    let b = _mm256_loadu_si256(src.add(1) as *const __m256i);
    let c = _mm256_loadu_si256(src.add(2) as *const __m256i);
    _mm256_storeu_si256(dst as *mut __m256i, _mm256_mean3_epu16(a, b, c));
}

#[inline(always)]
unsafe fn vertical_step(row0: *const u16, row1: *const u16, row2: *const u16, dst: *mut u16) {
    let a = _mm256_loadu_si256(row0 as *const __m256i);
    let b = _mm256_loadu_si256(row1 as *const __m256i);
    let c = _mm256_loadu_si256(row2 as *const __m256i);
    _mm256_storeu_si256(dst as *mut __m256i, _mm256_mean3_epu16(a, b, c));
}

/// Tiles narrower than a vector go through scalar code, wider ones finish with
/// one vector ending exactly at the tile edge, recomputing a few columns.
#[target_feature(enable = "avx2")]
unsafe fn box_blur_3x3_band_avx_impl(
    src: &[u16],
    src_stride: usize,
    dst: &mut [u16],
    dst_stride: usize,
    width: usize,
    rows: usize,
) {
    let mut scratch = TileScratch::default();

    for x_tile in (0..width).step_by(TILE_WIDTH) {
        let tile_width = (width - x_tile).min(TILE_WIDTH);

        for y in 0..rows + 2 {
            let src_row = src.get_unchecked(y * src_stride + x_tile..);
            let tmp_row = scratch.row_mut(y);
            let s_ptr = src_row.as_ptr();
            let t_ptr = tmp_row.as_mut_ptr();

            let mut x = 0usize;
            while x + LANES <= tile_width {
                horizontal_step(s_ptr.add(x), t_ptr.add(x));
                x += LANES;
            }

            if x < tile_width {
                if tile_width >= LANES {
                    let last = tile_width - LANES;
                    horizontal_step(s_ptr.add(last), t_ptr.add(last));
                } else {
                    horizontal_mean3_tail(src_row, tmp_row, x, tile_width);
                }
            }
        }

        for y in 0..rows {
            let row0 = scratch.row(y);
            let row1 = scratch.row(y + 1);
            let row2 = scratch.row(y + 2);
            let dst_row = dst.get_unchecked_mut(y * dst_stride + x_tile..);
            let (p0, p1, p2) = (row0.as_ptr(), row1.as_ptr(), row2.as_ptr());
            let d_ptr = dst_row.as_mut_ptr();

            let mut x = 0usize;
            while x + LANES <= tile_width {
                vertical_step(p0.add(x), p1.add(x), p2.add(x), d_ptr.add(x));
                x += LANES;
            }

            if x < tile_width {
                if tile_width >= LANES {
                    let last = tile_width - LANES;
                    vertical_step(p0.add(last), p1.add(last), p2.add(last), d_ptr.add(last));
                } else {
                    vertical_mean3_tail(row0, row1, row2, dst_row, x, tile_width);
                }
            }
        }
    }
}
