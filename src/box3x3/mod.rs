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
#[cfg(all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"))]
mod avx;
mod box_blur_3x3;
#[cfg(all(target_arch = "aarch64", target_feature = "neon", feature = "neon"))]
mod neon;
mod scalar;
mod scratch;
#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    target_feature = "sse2",
    feature = "sse"
))]
mod sse;

pub use box_blur_3x3::{box_blur_3x3, box_blur_3x3_reference, kernel_variant, KernelVariant};

/// Columns per tile
pub(crate) const TILE_WIDTH: usize = 128;
/// Output rows per tile, also the height of one band of parallel work
pub(crate) const TILE_HEIGHT: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlurError, BlurImage, BlurImageMut, MismatchedSize, ThreadingPolicy};
    use std::num::NonZeroUsize;

    struct XorShift(u32);

    impl XorShift {
        fn next_u16(&mut self) -> u16 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            (x >> 8) as u16
        }
    }

    /// Source for a `width x height` output, with halo and `pad` extra items per row.
    fn random_source(width: usize, height: usize, pad: usize, seed: u32) -> (Vec<u16>, usize) {
        let stride = width + 2 + pad;
        let mut rng = XorShift(seed);
        let data = (0..stride * (height + 2))
            .map(|_| rng.next_u16())
            .collect::<Vec<u16>>();
        (data, stride)
    }

    fn blur_pair(
        src: &[u16],
        src_stride: usize,
        width: usize,
        height: usize,
        threading_policy: ThreadingPolicy,
    ) -> (Vec<u16>, Vec<u16>) {
        let image = BlurImage::borrow_with_stride(
            src,
            width as u32 + 2,
            height as u32 + 2,
            src_stride as u32,
        );
        let mut tiled = BlurImageMut::default();
        box_blur_3x3(&image, &mut tiled, threading_policy).unwrap();
        let mut reference = BlurImageMut::default();
        box_blur_3x3_reference(&image, &mut reference).unwrap();
        assert_eq!(tiled.width as usize, width);
        assert_eq!(tiled.height as usize, height);
        (
            tiled.data.borrow().to_vec(),
            reference.data.borrow().to_vec(),
        )
    }

    fn assert_same(tiled: &[u16], reference: &[u16], width: usize) {
        for (i, (&t, &r)) in tiled.iter().zip(reference.iter()).enumerate() {
            assert_eq!(
                t,
                r,
                "Kernel {:?} diverged from reference at x={}, y={}",
                kernel_variant(),
                i % width,
                i / width
            );
        }
    }

    #[test]
    fn test_matches_reference_on_assorted_sizes() {
        let sizes = [
            (1usize, 1usize),
            (7, 3),
            (8, 1),
            (16, 2),
            (17, 5),
            (127, 31),
            (128, 32),
            (129, 33),
            (130, 33),
            (257, 70),
        ];
        for (i, &(width, height)) in sizes.iter().enumerate() {
            let (src, stride) = random_source(width, height, i % 3, 0x9E37_79B9 + i as u32);
            for policy in [
                ThreadingPolicy::Single,
                ThreadingPolicy::Fixed(NonZeroUsize::new(3).unwrap()),
            ] {
                let (tiled, reference) = blur_pair(&src, stride, width, height, policy);
                assert_same(&tiled, &reference, width);
            }
        }
    }

    #[test]
    fn test_saturated_input_stays_saturated() {
        let (width, height) = (200usize, 40usize);
        let src = vec![u16::MAX; (width + 2) * (height + 2)];
        let (tiled, reference) =
            blur_pair(&src, width + 2, width, height, ThreadingPolicy::Single);
        assert!(tiled.iter().all(|&v| v == u16::MAX));
        assert_same(&tiled, &reference, width);
    }

    fn blur_single_hot_pixel(px: usize, py: usize) -> Vec<u16> {
        let (width, height) = (TILE_WIDTH, TILE_HEIGHT);
        let src_stride = width + 2;
        let mut src = vec![0u16; src_stride * (height + 2)];
        src[py * src_stride + px] = u16::MAX;
        let image = BlurImage::borrow(&src, src_stride as u32, height as u32 + 2);
        let mut dst = BlurImageMut::alloc(width as u32, height as u32);
        box_blur_3x3(&image, &mut dst, ThreadingPolicy::Single).unwrap();
        dst.data.borrow().to_vec()
    }

    #[test]
    fn test_single_hot_pixel_spreads_into_3x3() {
        let dst = blur_single_hot_pixel(60, 10);
        for y in 0..TILE_HEIGHT {
            for x in 0..TILE_WIDTH {
                let expected = if (58..=60).contains(&x) && (8..=10).contains(&y) {
                    // 65535 / 3 / 3 with truncation in both passes
                    7281
                } else {
                    0
                };
                assert_eq!(dst[y * TILE_WIDTH + x], expected, "at x={x}, y={y}");
            }
        }
    }

    #[test]
    fn test_hot_pixel_on_tile_corners() {
        let dst = blur_single_hot_pixel(0, 0);
        assert_eq!(dst[0], 7281);
        assert_eq!(dst.iter().filter(|&&v| v != 0).count(), 1);

        // bottom right halo corner only reaches the last output pixel
        let dst = blur_single_hot_pixel(TILE_WIDTH + 1, TILE_HEIGHT + 1);
        assert_eq!(dst[TILE_WIDTH * TILE_HEIGHT - 1], 7281);
        assert_eq!(dst.iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn test_ramp_has_no_seams_between_tiles() {
        let (width, height) = (2 * TILE_WIDTH, 2 * TILE_HEIGHT);
        let src_stride = width + 2;
        let src = (0..src_stride * (height + 2))
            .map(|i| ((i % src_stride + i / src_stride) % 65536) as u16)
            .collect::<Vec<u16>>();
        let image = BlurImage::borrow(&src, src_stride as u32, height as u32 + 2);
        for policy in [
            ThreadingPolicy::Single,
            ThreadingPolicy::Fixed(NonZeroUsize::new(2).unwrap()),
        ] {
            let mut dst = BlurImageMut::default();
            box_blur_3x3(&image, &mut dst, policy).unwrap();
            let dst = dst.data.borrow();
            for y in 0..height {
                for x in 0..width {
                    assert_eq!(dst[y * width + x] as usize, x + y + 2, "at x={x}, y={y}");
                }
            }
        }
    }

    #[test]
    fn test_partial_tiles_respect_strides() {
        let (width, height) = (130usize, 33usize);
        let (src, src_stride) = random_source(width, height, 10, 77);
        let image = BlurImage::borrow_with_stride(
            &src,
            width as u32 + 2,
            height as u32 + 2,
            src_stride as u32,
        );

        const SENTINEL: u16 = 0xBEEF;
        let dst_stride = width + 6;
        let mut storage = vec![SENTINEL; dst_stride * height];
        let mut dst = BlurImageMut::borrow_with_stride(
            &mut storage,
            width as u32,
            height as u32,
            dst_stride as u32,
        );
        box_blur_3x3(&image, &mut dst, ThreadingPolicy::Single).unwrap();

        let mut reference = BlurImageMut::default();
        box_blur_3x3_reference(&image, &mut reference).unwrap();
        let reference = reference.data.borrow();

        for (y, row) in storage.chunks_exact(dst_stride).enumerate() {
            assert_same(&row[..width], &reference[y * width..(y + 1) * width], width);
            assert!(
                row[width..].iter().all(|&v| v == SENTINEL),
                "Row {y} padding was overwritten"
            );
        }
    }

    #[test]
    fn test_thread_count_does_not_change_output() {
        let (width, height) = (300usize, 200usize);
        let (src, stride) = random_source(width, height, 0, 5);
        let (single, reference) = blur_pair(&src, stride, width, height, ThreadingPolicy::Single);
        assert_same(&single, &reference, width);
        for policy in [
            ThreadingPolicy::Adaptive,
            ThreadingPolicy::Fixed(NonZeroUsize::new(7).unwrap()),
            ThreadingPolicy::AdaptiveReserve(NonZeroUsize::new(1).unwrap()),
        ] {
            let (multi, _) = blur_pair(&src, stride, width, height, policy);
            assert_eq!(single, multi, "Output differs under {policy:?}");
        }
    }

    #[test]
    fn test_rejects_missing_halo() {
        let src = vec![0u16; 130 * 34];
        let image = BlurImage::borrow(&src, 130, 34);
        let mut storage = vec![0u16; 129 * 32];
        let mut dst = BlurImageMut::borrow(&mut storage, 129, 32);
        assert_eq!(
            box_blur_3x3(&image, &mut dst, ThreadingPolicy::Single),
            Err(BlurError::InsufficientHaloWidth(MismatchedSize {
                expected: 131,
                received: 130,
            }))
        );
        let mut storage = vec![0u16; 128 * 33];
        let mut dst = BlurImageMut::borrow(&mut storage, 128, 33);
        assert_eq!(
            box_blur_3x3_reference(&image, &mut dst),
            Err(BlurError::InsufficientHaloHeight(MismatchedSize {
                expected: 35,
                received: 34,
            }))
        );
    }

    #[test]
    fn test_rejects_bad_layouts() {
        let src = vec![0u16; 100];
        let image = BlurImage::borrow(&src, 20, 20);
        let mut dst = BlurImageMut::default();
        assert!(matches!(
            box_blur_3x3(&image, &mut dst, ThreadingPolicy::Single),
            Err(BlurError::MinimumSliceSizeMismatch(_))
        ));

        let src = vec![0u16; 2 * 10];
        let image = BlurImage::borrow(&src, 2, 10);
        let mut dst = BlurImageMut::default();
        assert_eq!(
            box_blur_3x3(&image, &mut dst, ThreadingPolicy::Single),
            Err(BlurError::ZeroBaseSize)
        );
    }

    #[test]
    fn test_smallest_image() {
        let src = vec![3u16, 6, 9, 300, 600, 900, 30000, 60000, 65535];
        let image = BlurImage::borrow(&src, 3, 3);
        let mut dst = BlurImageMut::default();
        box_blur_3x3(&image, &mut dst, ThreadingPolicy::Adaptive).unwrap();
        // (6 + 600 + 51845) / 3
        assert_eq!(dst.data.borrow(), &[17483]);
    }

    #[test]
    fn test_band_executors_agree_with_scalar() {
        #[allow(unused_mut)]
        let mut executors: Vec<(&str, box_blur_3x3::BandExecutor)> = Vec::new();
        #[cfg(all(
            any(target_arch = "x86_64", target_arch = "x86"),
            target_feature = "sse2",
            feature = "sse"
        ))]
        executors.push(("sse", sse::box_blur_3x3_band_sse));
        #[cfg(all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"))]
        executors.push(("avx", avx::box_blur_3x3_band_avx));
        #[cfg(all(target_arch = "aarch64", target_feature = "neon", feature = "neon"))]
        executors.push(("neon", neon::box_blur_3x3_band_neon));

        for (name, executor) in executors {
            for width in [1usize, 8, 15, 16, 24, 31, 127, 128, 143, 144, 300] {
                for rows in [1usize, 2, 17, TILE_HEIGHT] {
                    let (src, stride) = random_source(width, rows, 1, (width * 31 + rows) as u32);
                    let mut expected = vec![0u16; width * rows];
                    scalar::box_blur_3x3_band_scalar(&src, stride, &mut expected, width, width, rows);
                    let mut actual = vec![0u16; width * rows];
                    executor(&src, stride, &mut actual, width, width, rows);
                    assert_eq!(
                        actual, expected,
                        "{name} band differs for width {width} and {rows} rows"
                    );
                }
            }
        }
    }

    #[test]
    fn test_kernel_variant_matches_build() {
        let variant = kernel_variant();
        #[cfg(all(target_arch = "aarch64", target_feature = "neon", feature = "neon"))]
        assert_eq!(variant, KernelVariant::Neon);
        #[cfg(all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"))]
        assert_eq!(variant, KernelVariant::Avx2);
        #[cfg(all(
            any(target_arch = "x86_64", target_arch = "x86"),
            target_feature = "sse2",
            feature = "sse",
            not(all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"))
        ))]
        assert_eq!(variant, KernelVariant::Sse2);
        let _ = variant;
    }
}
