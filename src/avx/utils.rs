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

/// Truncating division by 3 of eight unsigned 32-bit lanes holding at most `3 * 65535`.
#[inline(always)]
pub(crate) unsafe fn _mm256_div3_epu32(v: __m256i) -> __m256i {
    let reciprocal = _mm256_set1_epi32(DIV3_RECIPROCAL_Q19 as i32);
    let even = _mm256_mul_epu32(v, reciprocal);
    let odd = _mm256_mul_epu32(_mm256_srli_epi64::<32>(v), reciprocal);
    let q_even = _mm256_srli_epi64::<{ DIV3_SHIFT_Q19 as i32 }>(even);
    let q_odd = _mm256_srli_epi64::<{ DIV3_SHIFT_Q19 as i32 }>(odd);
    _mm256_or_si256(q_even, _mm256_slli_epi64::<32>(q_odd))
}

/// Lane-wise truncating mean of three vectors of sixteen `u16`.
///
/// Unpack and pack both work inside 128-bit halves, so lane order survives
/// without a cross-lane permute.
#[inline(always)]
pub(crate) unsafe fn _mm256_mean3_epu16(a: __m256i, b: __m256i, c: __m256i) -> __m256i {
    let zeros = _mm256_setzero_si256();
    let sum_lo = _mm256_add_epi32(
        _mm256_add_epi32(
            _mm256_unpacklo_epi16(a, zeros),
            _mm256_unpacklo_epi16(b, zeros),
        ),
        _mm256_unpacklo_epi16(c, zeros),
    );
    let sum_hi = _mm256_add_epi32(
        _mm256_add_epi32(
            _mm256_unpackhi_epi16(a, zeros),
            _mm256_unpackhi_epi16(b, zeros),
        ),
        _mm256_unpackhi_epi16(c, zeros),
    );
    _mm256_packus_epi32(_mm256_div3_epu32(sum_lo), _mm256_div3_epu32(sum_hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean3_epu16_keeps_lane_order() {
        let a: [u16; 16] = std::array::from_fn(|i| (i as u16) * 4099);
        let b: [u16; 16] = std::array::from_fn(|i| 65535 - (i as u16) * 17);
        let c: [u16; 16] = std::array::from_fn(|i| (i as u16) * 3 + 1);
        let mut out = [0u16; 16];
        unsafe {
            let va = _mm256_loadu_si256(a.as_ptr() as *const __m256i);
            let vb = _mm256_loadu_si256(b.as_ptr() as *const __m256i);
            let vc = _mm256_loadu_si256(c.as_ptr() as *const __m256i);
            _mm256_storeu_si256(
                out.as_mut_ptr() as *mut __m256i,
                _mm256_mean3_epu16(va, vb, vc),
            );
        }
        for i in 0..16 {
            let expected = ((a[i] as u32 + b[i] as u32 + c[i] as u32) / 3) as u16;
            assert_eq!(out[i], expected, "Lane {i} expected {expected}");
        }
    }
}
