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
use crate::box3x3::{TILE_HEIGHT, TILE_WIDTH};

/// Horizontal pass of one tile plus the two halo rows the vertical pass reads.
///
/// Rows are `TILE_WIDTH` apart and the storage is 32 byte aligned, so every
/// row start and every multiple of the vector width is aligned for 128 and 256-bit loads.
#[repr(C, align(32))]
pub(crate) struct TileScratch([u16; TILE_WIDTH * (TILE_HEIGHT + 2)]);

impl Default for TileScratch {
    fn default() -> Self {
        TileScratch([0; TILE_WIDTH * (TILE_HEIGHT + 2)])
    }
}

impl TileScratch {
    #[inline(always)]
    pub(crate) fn row(&self, y: usize) -> &[u16] {
        &self.0[y * TILE_WIDTH..(y + 1) * TILE_WIDTH]
    }

    #[inline(always)]
    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u16] {
        &mut self.0[y * TILE_WIDTH..(y + 1) * TILE_WIDTH]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_rows_are_aligned() {
        let mut scratch = TileScratch::default();
        for y in 0..TILE_HEIGHT + 2 {
            assert_eq!(scratch.row(y).as_ptr() as usize % 32, 0);
            assert_eq!(scratch.row_mut(y).len(), TILE_WIDTH);
        }
    }
}
