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
use crate::util::check_slice_size;
use crate::BlurError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub(crate) fn resize(&mut self, new_size: usize, value: T) {
        match self {
            Self::Borrowed(_) => {}
            Self::Owned(vec) => vec.resize(new_size, value),
        }
    }
}

/// Immutable single plane image store.
///
/// When used as a blur source, `width` and `height` include the right and bottom halo.
pub struct BlurImage<'a, T: Clone + Copy + Default + Debug> {
    pub data: std::borrow::Cow<'a, [T]>,
    pub width: u32,
    pub height: u32,
    /// Image stride, items per row, might be 0
    pub stride: u32,
}

/// Mutable single plane image store
/// If it owns vector it does auto resizing on methods that working out-of-place.
pub struct BlurImageMut<'a, T: Clone + Copy + Default + Debug> {
    pub data: BufferStore<'a, T>,
    pub width: u32,
    pub height: u32,
    /// Image stride, items per row, might be 0
    pub stride: u32,
}

impl<T: Clone + Copy + Default + Debug> Default for BlurImageMut<'_, T> {
    fn default() -> Self {
        BlurImageMut {
            data: BufferStore::Owned(Vec::new()),
            width: 0,
            height: 0,
            stride: 0,
        }
    }
}

impl<'a, T: Clone + Copy + Default + Debug> BlurImage<'a, T> {
    /// Allocates tightly packed plane filled with `T::default()`
    pub fn alloc(width: u32, height: u32) -> Self {
        Self {
            data: std::borrow::Cow::Owned(vec![T::default(); width as usize * height as usize]),
            width,
            height,
            stride: width,
        }
    }

    /// Borrows existing data
    /// Stride will be default `width`
    pub fn borrow(arr: &'a [T], width: u32, height: u32) -> Self {
        Self {
            data: std::borrow::Cow::Borrowed(arr),
            width,
            height,
            stride: width,
        }
    }

    /// Borrows existing data with explicit row pitch
    pub fn borrow_with_stride(arr: &'a [T], width: u32, height: u32, stride: u32) -> Self {
        Self {
            data: std::borrow::Cow::Borrowed(arr),
            width,
            height,
            stride,
        }
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> u32 {
        if self.stride == 0 {
            self.width
        } else {
            self.stride
        }
    }

    #[inline]
    pub fn check_layout(&self) -> Result<(), BlurError> {
        check_slice_size(
            self.data.as_ref(),
            self.row_stride() as usize,
            self.width as usize,
            self.height as usize,
        )
    }
}

impl<'a, T: Clone + Copy + Default + Debug> BlurImageMut<'a, T> {
    /// Allocates tightly packed plane filled with `T::default()`
    pub fn alloc(width: u32, height: u32) -> Self {
        Self {
            data: BufferStore::Owned(vec![T::default(); width as usize * height as usize]),
            width,
            height,
            stride: width,
        }
    }

    /// Mutable borrows existing data
    /// Stride will be default `width`
    pub fn borrow(arr: &'a mut [T], width: u32, height: u32) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride: width,
        }
    }

    /// Mutable borrows existing data with explicit row pitch
    pub fn borrow_with_stride(arr: &'a mut [T], width: u32, height: u32, stride: u32) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride,
        }
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> u32 {
        if self.stride == 0 {
            self.width
        } else {
            self.stride
        }
    }

    /// Checks if layout matches necessary requirements.
    ///
    /// When `source` is given and this image owns its storage, it is resized to
    /// the area a 3x3 window can cover in `source`, that is two columns and two rows less.
    #[inline]
    pub fn check_layout(&mut self, source: Option<&BlurImage<'_, T>>) -> Result<(), BlurError> {
        if let Some(source) = source {
            if matches!(self.data, BufferStore::Owned(_)) {
                self.resize(source.width.saturating_sub(2), source.height.saturating_sub(2));
            }
        }
        check_slice_size(
            self.data.borrow(),
            self.row_stride() as usize,
            self.width as usize,
            self.height as usize,
        )
    }

    #[inline]
    pub fn to_immutable_ref(&self) -> BlurImage<'_, T> {
        BlurImage {
            data: std::borrow::Cow::Borrowed(self.data.borrow()),
            stride: self.row_stride(),
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.height = height;
        self.width = width;
        self.stride = width;
        self.data
            .resize(width as usize * height as usize, T::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_destination_follows_source_halo() {
        let src = BlurImage::<u16>::alloc(130, 35);
        let mut dst = BlurImageMut::<u16>::default();
        dst.check_layout(Some(&src)).unwrap();
        assert_eq!(dst.width, 128);
        assert_eq!(dst.height, 33);
        assert_eq!(dst.row_stride(), 128);
        assert_eq!(dst.data.borrow().len(), 128 * 33);
    }

    #[test]
    fn test_borrowed_destination_is_not_resized() {
        let src = BlurImage::<u16>::alloc(130, 35);
        let mut storage = vec![0u16; 64 * 8];
        let mut dst = BlurImageMut::borrow(&mut storage, 64, 8);
        dst.check_layout(Some(&src)).unwrap();
        assert_eq!(dst.width, 64);
        assert_eq!(dst.height, 8);
    }

    #[test]
    fn test_tiny_source_gives_zero_sized_destination() {
        let src = BlurImage::<u16>::alloc(2, 40);
        let mut dst = BlurImageMut::<u16>::default();
        assert_eq!(dst.check_layout(Some(&src)), Err(BlurError::ZeroBaseSize));
    }

    #[test]
    fn test_zero_stride_means_packed() {
        let data = vec![0u16; 12];
        let image = BlurImage::borrow_with_stride(&data, 4, 3, 0);
        assert_eq!(image.row_stride(), 4);
        assert!(image.check_layout().is_ok());
    }

    #[test]
    fn test_short_stride_is_rejected() {
        let data = vec![0u16; 100];
        let image = BlurImage::borrow_with_stride(&data, 10, 3, 8);
        assert!(matches!(
            image.check_layout(),
            Err(BlurError::MinimumStrideSizeMismatch(_))
        ));
    }

    #[test]
    fn test_immutable_ref_keeps_stride() {
        let mut storage = vec![7u16; 20 * 4];
        let image = BlurImageMut::borrow_with_stride(&mut storage, 16, 4, 20);
        let view = image.to_immutable_ref();
        assert_eq!(view.row_stride(), 20);
        assert_eq!(view.width, 16);
        assert!(view.check_layout().is_ok());
    }
}
