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
use crate::box3x3::scalar::box_blur_3x3_band_scalar;
use crate::box3x3::TILE_HEIGHT;
use crate::util::check_halo;
use crate::{BlurError, BlurImage, BlurImageMut, ThreadingPolicy};
use novtb::{ParallelZonedIterator, TbSliceMut};

/// Blurs `rows` output rows of `width` items.
///
/// `src` starts at the source row matching the first output row, `dst` at the first output row.
pub(crate) type BandExecutor = fn(
    src: &[u16],
    src_stride: usize,
    dst: &mut [u16],
    dst_stride: usize,
    width: usize,
    rows: usize,
);

/// Kernel flavour chosen when the crate was compiled.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum KernelVariant {
    /// Direct nested loop, no tiling
    Scalar,
    /// 128x32 tiles, 8 lanes
    Sse2,
    /// 128x32 tiles, 16 lanes
    Avx2,
    /// 128x32 tiles, 8 lanes
    Neon,
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon", feature = "neon"))]
const SELECTED_VARIANT: KernelVariant = KernelVariant::Neon;
#[cfg(all(target_arch = "aarch64", target_feature = "neon", feature = "neon"))]
const SELECTED_BAND: BandExecutor = crate::box3x3::neon::box_blur_3x3_band_neon;

#[cfg(all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"))]
const SELECTED_VARIANT: KernelVariant = KernelVariant::Avx2;
#[cfg(all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"))]
const SELECTED_BAND: BandExecutor = crate::box3x3::avx::box_blur_3x3_band_avx;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    feature = "sse",
    not(all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"))
))]
const SELECTED_VARIANT: KernelVariant = KernelVariant::Sse2;
#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2",
    feature = "sse",
    not(all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"))
))]
const SELECTED_BAND: BandExecutor = crate::box3x3::sse::box_blur_3x3_band_sse;

#[cfg(not(any(
    all(target_arch = "aarch64", target_feature = "neon", feature = "neon"),
    all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"),
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2",
        feature = "sse"
    )
)))]
const SELECTED_VARIANT: KernelVariant = KernelVariant::Scalar;
#[cfg(not(any(
    all(target_arch = "aarch64", target_feature = "neon", feature = "neon"),
    all(target_arch = "x86_64", target_feature = "avx2", feature = "avx"),
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2",
        feature = "sse"
    )
)))]
const SELECTED_BAND: BandExecutor = box_blur_3x3_band_scalar;

/// Returns the kernel flavour [box_blur_3x3] runs in this build.
///
/// The choice is made by target architecture, enabled target features and crate
/// features at compile time, AVX2 requires building with `-C target-feature=+avx2`.
pub const fn kernel_variant() -> KernelVariant {
    SELECTED_VARIANT
}

fn box_blur_3x3_impl(
    src: &[u16],
    src_stride: usize,
    dst: &mut [u16],
    dst_stride: usize,
    width: usize,
    height: usize,
    executor: BandExecutor,
    thread_count: usize,
) {
    let dst = &mut dst[..dst_stride * (height - 1) + width];
    let band_stride = dst_stride * TILE_HEIGHT;

    if thread_count > 1 {
        let pool = novtb::ThreadPool::new(thread_count);
        dst.tb_par_chunks_mut(band_stride)
            .for_each_enumerated(&pool, |band, dst_band| {
                let start_y = band * TILE_HEIGHT;
                let rows = TILE_HEIGHT.min(height - start_y);
                executor(
                    &src[start_y * src_stride..],
                    src_stride,
                    dst_band,
                    dst_stride,
                    width,
                    rows,
                );
            });
    } else {
        for (band, dst_band) in dst.chunks_mut(band_stride).enumerate() {
            let start_y = band * TILE_HEIGHT;
            let rows = TILE_HEIGHT.min(height - start_y);
            executor(
                &src[start_y * src_stride..],
                src_stride,
                dst_band,
                dst_stride,
                width,
                rows,
            );
        }
    }
}

/// Validates both images and returns the output extent.
fn check_images(
    image: &BlurImage<u16>,
    dst_image: &mut BlurImageMut<u16>,
) -> Result<(usize, usize), BlurError> {
    image.check_layout()?;
    dst_image.check_layout(Some(image))?;
    check_halo(
        image.width as usize,
        image.height as usize,
        dst_image.width as usize,
        dst_image.height as usize,
    )?;
    Ok((dst_image.width as usize, dst_image.height as usize))
}

/// Performs 3x3 box blur on a 16-bit plane.
///
/// Each output pixel is the truncated mean of three truncated horizontal means:
///
/// ```text
/// h(x, y)   = (src(x, y) + src(x + 1, y) + src(x + 2, y)) / 3
/// dst(x, y) = (h(x, y) + h(x, y + 1) + h(x, y + 2)) / 3
/// ```
///
/// There is no edge handling, the source must carry two extra columns and two extra rows,
/// so for destination `width x height` the source must be at least `(width + 2) x (height + 2)`.
/// An owned destination, e.g. [BlurImageMut::default], is resized to exactly that
/// area of the source.
///
/// The image is processed in tiles of 128x32, see [kernel_variant] for which
/// instruction set this build uses. Output is bit-identical to [box_blur_3x3_reference].
///
/// # Arguments
///
/// * `image` - Source immutable image including the halo, see [BlurImage] for more info.
/// * `dst_image` - Destination mutable image, see [BlurImageMut] for more info.
/// * `threading_policy` - Threads usage policy, bands of 32 rows are the unit of work.
pub fn box_blur_3x3(
    image: &BlurImage<u16>,
    dst_image: &mut BlurImageMut<u16>,
    threading_policy: ThreadingPolicy,
) -> Result<(), BlurError> {
    let (width, height) = check_images(image, dst_image)?;
    let thread_count = threading_policy.thread_count(width as u32, height as u32);
    let dst_stride = dst_image.row_stride() as usize;
    box_blur_3x3_impl(
        image.data.as_ref(),
        image.row_stride() as usize,
        dst_image.data.borrow_mut(),
        dst_stride,
        width,
        height,
        SELECTED_BAND,
        thread_count,
    );
    Ok(())
}

/// Performs 3x3 box blur with a plain nested loop and exact integer division.
///
/// Single threaded, no tiling, no SIMD. Same contract as [box_blur_3x3], meant
/// as a portable fallback and as an oracle for the vectorized kernels.
pub fn box_blur_3x3_reference(
    image: &BlurImage<u16>,
    dst_image: &mut BlurImageMut<u16>,
) -> Result<(), BlurError> {
    let (width, height) = check_images(image, dst_image)?;
    let dst_stride = dst_image.row_stride() as usize;
    box_blur_3x3_band_scalar(
        image.data.as_ref(),
        image.row_stride() as usize,
        dst_image.data.borrow_mut(),
        dst_stride,
        width,
        height,
    );
    Ok(())
}
