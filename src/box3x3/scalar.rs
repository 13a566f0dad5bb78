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
use crate::fast_divide::mean3;

/// Direct two pass 3x3 mean over `rows` output rows, exact integer division, no tiling.
///
/// `src` starts at the source row of the first output row and must hold `rows + 2`
/// rows of `width + 2` items; `dst` holds `rows` rows of `width` items.
pub(crate) fn box_blur_3x3_band_scalar(
    src: &[u16],
    src_stride: usize,
    dst: &mut [u16],
    dst_stride: usize,
    width: usize,
    rows: usize,
) {
    for (y, dst_row) in dst.chunks_mut(dst_stride).take(rows).enumerate() {
        let row0 = &src[y * src_stride..];
        let row1 = &src[(y + 1) * src_stride..];
        let row2 = &src[(y + 2) * src_stride..];
        for (x, dst) in dst_row[..width].iter_mut().enumerate() {
            let h0 = (row0[x] as u32 + row0[x + 1] as u32 + row0[x + 2] as u32) / 3;
            let h1 = (row1[x] as u32 + row1[x + 1] as u32 + row1[x + 2] as u32) / 3;
            let h2 = (row2[x] as u32 + row2[x + 1] as u32 + row2[x + 2] as u32) / 3;
            *dst = ((h0 + h1 + h2) / 3) as u16;
        }
    }
}

/// Finishes the horizontal pass for the columns `from..to` a vector kernel left over.
#[inline(always)]
pub(crate) fn horizontal_mean3_tail(src_row: &[u16], dst_row: &mut [u16], from: usize, to: usize) {
    for (dst, window) in dst_row[from..to]
        .iter_mut()
        .zip(src_row[from..to + 2].windows(3))
    {
        *dst = mean3(window[0], window[1], window[2]);
    }
}

/// Finishes the vertical pass for the columns `from..to` a vector kernel left over.
#[inline(always)]
pub(crate) fn vertical_mean3_tail(
    row0: &[u16],
    row1: &[u16],
    row2: &[u16],
    dst_row: &mut [u16],
    from: usize,
    to: usize,
) {
    for (((dst, &a), &b), &c) in dst_row[from..to]
        .iter_mut()
        .zip(row0[from..to].iter())
        .zip(row1[from..to].iter())
        .zip(row2[from..to].iter())
    {
        *dst = mean3(a, b, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_band_small() {
        // 3x3 output from a 5x5 source
        let src: Vec<u16> = (0..25u16).map(|v| v * 1000).collect();
        let mut dst = vec![0u16; 9];
        box_blur_3x3_band_scalar(&src, 5, &mut dst, 3, 3, 3);
        // linear source, every mean lands on the window center
        for y in 0..3 {
            for x in 0..3 {
                let center = ((y + 1) * 5 + x + 1) as u16 * 1000;
                assert_eq!(dst[y * 3 + x], center);
            }
        }
    }

    #[test]
    fn test_scalar_band_truncates_each_pass() {
        // rows of [1, 1, 0] give a horizontal mean of 0, so the result is 0, not 2/3 rounded
        let src = vec![1u16, 1, 0, 1, 1, 0, 1, 1, 0];
        let mut dst = vec![9u16; 1];
        box_blur_3x3_band_scalar(&src, 3, &mut dst, 1, 1, 1);
        assert_eq!(dst[0], 0);
    }

    #[test]
    fn test_tails() {
        let src_row: Vec<u16> = vec![3, 6, 9, 12, 15, 18];
        let mut dst_row = vec![0u16; 4];
        horizontal_mean3_tail(&src_row, &mut dst_row, 1, 4);
        assert_eq!(dst_row, vec![0, 9, 12, 15]);

        let row0 = vec![0u16, 3, 65535];
        let row1 = vec![0u16, 3, 65535];
        let row2 = vec![0u16, 4, 65534];
        let mut dst_row = vec![1u16; 3];
        vertical_mean3_tail(&row0, &row1, &row2, &mut dst_row, 0, 3);
        assert_eq!(dst_row, vec![0, 3, 65534]);
    }
}
