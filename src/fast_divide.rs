/*
 * // Copyright (c) Radzivon Bartoshyk 2/2025. All rights reserved.
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

//! Division by 3 through reciprocal multiplication.
//!
//! The kernels sum three 16-bit samples, so a dividend spans `[0, 3 * 65535]`,
//! which does not fit a 16-bit lane. Sums are kept in 32-bit lanes and divided
//! with a Q19 reciprocal: `3 * 174763 = 2^19 + 1`, so the error term is `s / (3 * 2^19)`,
//! which stays below `1/3` for every `s < 2^19`. The widened product needs 36 bits.

/// `(2^19 + 1) / 3`
pub(crate) const DIV3_RECIPROCAL_Q19: u32 = 174763;
pub(crate) const DIV3_SHIFT_Q19: u32 = 19;

/// Largest dividend the kernels ever produce.
pub(crate) const MAX_SUM3: u32 = 3 * u16::MAX as u32;

/// Truncating `s / 3` for `s <= 3 * 65535`.
#[inline(always)]
pub(crate) fn div3_q19(s: u32) -> u32 {
    debug_assert!(s <= MAX_SUM3);
    ((s as u64 * DIV3_RECIPROCAL_Q19 as u64) >> DIV3_SHIFT_Q19) as u32
}

/// Truncating mean of three samples.
#[inline(always)]
pub(crate) fn mean3(a: u16, b: u16, c: u16) -> u16 {
    div3_q19(a as u32 + b as u32 + c as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q19_reciprocal_is_exact_over_whole_range() {
        for s in 0..=MAX_SUM3 {
            assert_eq!(div3_q19(s), s / 3, "Reciprocal division diverged at {s}");
        }
    }

    #[test]
    fn test_q16_reciprocal_is_exact_only_below_half_range() {
        // round(2^16 / 3) with a 16-bit shift, the classic mulhi idiom
        let q16 = |s: u32| ((s as u64 * 21846) >> 16) as u32;
        for s in 0..32768u32 {
            assert_eq!(q16(s), s / 3, "Q16 reciprocal diverged at {s}");
        }
        assert_ne!(q16(32768), 32768 / 3);
        let mismatches = (0..=MAX_SUM3).filter(|&s| q16(s) != s / 3).count();
        assert_eq!(mismatches, 131071);
    }

    #[test]
    fn test_mean3() {
        assert_eq!(mean3(0, 0, 0), 0);
        assert_eq!(mean3(1, 1, 0), 0);
        assert_eq!(mean3(1, 1, 1), 1);
        assert_eq!(mean3(65535, 65535, 65535), 65535);
        assert_eq!(mean3(65535, 65535, 65534), 65534);
        assert_eq!(mean3(65535, 0, 0), 21845);
    }
}
