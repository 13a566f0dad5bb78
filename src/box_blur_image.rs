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
use crate::{box_blur_3x3, BlurImage, BlurImageMut, ThreadingPolicy};
use image::{DynamicImage, ImageBuffer, Luma};

/// Performs 3x3 box blur on the image
///
/// The image is converted to 16-bit luma first. Border pixels serve as the halo, so the
/// result is the valid region only, two pixels narrower and two pixels shorter than the input.
/// Returns `None` if the image is smaller than 3x3.
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `threading_policy` - Threads usage policy.
///
#[must_use]
pub fn box_blur_3x3_image(
    image: DynamicImage,
    threading_policy: ThreadingPolicy,
) -> Option<DynamicImage> {
    if image.width() < 3 || image.height() < 3 {
        return None;
    }
    let luma = image.to_luma16();
    let source = BlurImage::borrow(luma.as_raw().as_slice(), luma.width(), luma.height());
    let mut blurred = BlurImageMut::default();
    box_blur_3x3(&source, &mut blurred, threading_policy).ok()?;

    let new_image = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(
        blurred.width,
        blurred.height,
        blurred.data.borrow().to_vec(),
    )?;
    Some(DynamicImage::ImageLuma16(new_image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_blur_shrinks_by_halo() {
        let gray = ImageBuffer::from_fn(40, 20, |x, y| Luma([(x * 1000 + y * 10) as u16]));
        let blurred =
            box_blur_3x3_image(DynamicImage::ImageLuma16(gray), ThreadingPolicy::Single).unwrap();
        assert_eq!(blurred.width(), 38);
        assert_eq!(blurred.height(), 18);
        let blurred = blurred.to_luma16();
        // linear ramp, mean lands on the window center
        assert_eq!(blurred.get_pixel(0, 0).0[0], 1010);
        assert_eq!(blurred.get_pixel(37, 17).0[0], 38 * 1000 + 18 * 10);
    }

    #[test]
    fn test_image_too_small() {
        let gray = ImageBuffer::<Luma<u16>, Vec<u16>>::new(2, 10);
        assert!(box_blur_3x3_image(DynamicImage::ImageLuma16(gray), ThreadingPolicy::Single)
            .is_none());
    }
}
