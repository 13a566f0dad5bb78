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

use crate::fast_divide::{DIV3_RECIPROCAL_Q19, DIV3_SHIFT_Q19};

/// Truncating division by 3 of four unsigned 32-bit lanes holding at most `3 * 65535`.
///
/// `_mm_mul_epu32` only multiplies even lanes, odd lanes are shifted down and
/// multiplied separately, then both halves are merged back.
#[inline(always)]
pub(crate) unsafe fn _mm_div3_epu32(v: __m128i) -> __m128i {
    let reciprocal = _mm_set1_epi32(DIV3_RECIPROCAL_Q19 as i32);
    let even = _mm_mul_epu32(v, reciprocal);
    let odd = _mm_mul_epu32(_mm_srli_epi64::<32>(v), reciprocal);
    let q_even = _mm_srli_epi64::<{ DIV3_SHIFT_Q19 as i32 }>(even);
    let q_odd = _mm_srli_epi64::<{ DIV3_SHIFT_Q19 as i32 }>(odd);
    _mm_or_si128(q_even, _mm_slli_epi64::<32>(q_odd))
}

/// Packs two vectors of 32-bit lanes in `[0, 65535]` into 16-bit lanes.
///
/// SSE2 has only signed saturation, so lanes are sign extended from their low
/// half first, which keeps the bit pattern through `_mm_packs_epi32`.
#[inline(always)]
pub(crate) unsafe fn _mm_packus_epi32_sse2(lo: __m128i, hi: __m128i) -> __m128i {
    let lo = _mm_srai_epi32::<16>(_mm_slli_epi32::<16>(lo));
    let hi = _mm_srai_epi32::<16>(_mm_slli_epi32::<16>(hi));
    _mm_packs_epi32(lo, hi)
}

/// Lane-wise truncating mean of three vectors of eight `u16`.
#[inline(always)]
pub(crate) unsafe fn _mm_mean3_epu16(a: __m128i, b: __m128i, c: __m128i) -> __m128i {
    let zeros = _mm_setzero_si128();
    let sum_lo = _mm_add_epi32(
        _mm_add_epi32(_mm_unpacklo_epi16(a, zeros), _mm_unpacklo_epi16(b, zeros)),
        _mm_unpacklo_epi16(c, zeros),
    );
    let sum_hi = _mm_add_epi32(
        _mm_add_epi32(_mm_unpackhi_epi16(a, zeros), _mm_unpackhi_epi16(b, zeros)),
        _mm_unpackhi_epi16(c, zeros),
    );
    _mm_packus_epi32_sse2(_mm_div3_epu32(sum_lo), _mm_div3_epu32(sum_hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean3_epu16_matches_integer_division() {
        let samples: [u16; 8] = [0, 1, 2, 3, 21845, 32768, 65534, 65535];
        unsafe {
            for &a in samples.iter() {
                for &b in samples.iter() {
                    let va = _mm_set1_epi16(a as i16);
                    let vb = _mm_set1_epi16(b as i16);
                    let vc = _mm_loadu_si128(samples.as_ptr() as *const __m128i);
                    let mut out = [0u16; 8];
                    _mm_storeu_si128(
                        out.as_mut_ptr() as *mut __m128i,
                        _mm_mean3_epu16(va, vb, vc),
                    );
                    for (&c, &q) in samples.iter().zip(out.iter()) {
                        let expected = ((a as u32 + b as u32 + c as u32) / 3) as u16;
                        assert_eq!(q, expected, "Mean of {a}, {b}, {c} expected {expected}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_div3_epu32_full_range() {
        let mut s = 0u32;
        while s <= 3 * 65535 {
            let lanes = [s, (s + 1).min(196605), (s + 2).min(196605), (s + 3).min(196605)];
            unsafe {
                let v = _mm_loadu_si128(lanes.as_ptr() as *const __m128i);
                let mut out = [0u32; 4];
                _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, _mm_div3_epu32(v));
                for (&x, &q) in lanes.iter().zip(out.iter()) {
                    assert_eq!(q, x / 3, "Division of {x} diverged");
                }
            }
            s += 4;
        }
    }
}
