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

use crate::fast_divide::{DIV3_RECIPROCAL_Q19, DIV3_SHIFT_Q19};
use std::arch::aarch64::*;

/// Truncating division by 3 of four unsigned 32-bit lanes holding at most `3 * 65535`,
/// narrowed to 32 bits.
#[inline(always)]
pub(crate) unsafe fn vdiv3q_u32(v: uint32x4_t) -> uint32x4_t {
    let reciprocal = vdupq_n_u32(DIV3_RECIPROCAL_Q19);
    let lo = vmull_u32(vget_low_u32(v), vget_low_u32(reciprocal));
    let hi = vmull_high_u32(v, reciprocal);
    vshrn_high_n_u64::<{ DIV3_SHIFT_Q19 as i32 }>(
        vshrn_n_u64::<{ DIV3_SHIFT_Q19 as i32 }>(lo),
        hi,
    )
}

/// Lane-wise truncating mean of three vectors of eight `u16`.
#[inline(always)]
pub(crate) unsafe fn vmean3q_u16(a: uint16x8_t, b: uint16x8_t, c: uint16x8_t) -> uint16x8_t {
    let sum_lo = vaddw_u16(vaddl_u16(vget_low_u16(a), vget_low_u16(b)), vget_low_u16(c));
    let sum_hi = vaddw_high_u16(vaddl_high_u16(a, b), c);
    vmovn_high_u32(vmovn_u32(vdiv3q_u32(sum_lo)), vdiv3q_u32(sum_hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div3q_u32_full_range() {
        let mut s = 0u32;
        while s <= 3 * 65535 {
            let lanes = [s, (s + 1).min(196605), (s + 2).min(196605), (s + 3).min(196605)];
            let mut out = [0u32; 4];
            unsafe {
                vst1q_u32(out.as_mut_ptr(), vdiv3q_u32(vld1q_u32(lanes.as_ptr())));
            }
            for (&x, &q) in lanes.iter().zip(out.iter()) {
                assert_eq!(q, x / 3, "Division of {x} diverged");
            }
            s += 4;
        }
    }

    #[test]
    fn test_mean3q_u16_saturated() {
        let a = [65535u16; 8];
        let b: [u16; 8] = [65535, 65534, 0, 1, 2, 3, 32768, 21845];
        let mut out = [0u16; 8];
        unsafe {
            let va = vld1q_u16(a.as_ptr());
            let vb = vld1q_u16(b.as_ptr());
            vst1q_u16(out.as_mut_ptr(), vmean3q_u16(va, vb, va));
        }
        for i in 0..8 {
            let expected = ((2 * 65535u32 + b[i] as u32) / 3) as u16;
            assert_eq!(out[i], expected);
        }
    }
}
