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
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlurError {
    ZeroBaseSize,
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    /// Source must be at least two columns wider than the destination
    InsufficientHaloWidth(MismatchedSize),
    /// Source must be at least two rows taller than the destination
    InsufficientHaloHeight(MismatchedSize),
}

impl Error for BlurError {}

impl std::fmt::Display for BlurError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlurError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            BlurError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            BlurError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            BlurError::InsufficientHaloWidth(size) => f.write_fmt(format_args!(
                "Source width must be at least {} to cover the 3x3 halo, but it is {}",
                size.expected, size.received
            )),
            BlurError::InsufficientHaloHeight(size) => f.write_fmt(format_args!(
                "Source height must be at least {} to cover the 3x3 halo, but it is {}",
                size.expected, size.received
            )),
        }
    }
}

/// Checks that `arr` can hold `height` rows of `width` items laid out with `stride`.
pub(crate) fn check_slice_size<T>(
    arr: &[T],
    stride: usize,
    width: usize,
    height: usize,
) -> Result<(), BlurError> {
    if width == 0 || height == 0 {
        return Err(BlurError::ZeroBaseSize);
    }
    if stride < width {
        return Err(BlurError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: width,
            received: stride,
        }));
    }
    if arr.len() < stride * (height - 1) + width {
        return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: stride * height,
            received: arr.len(),
        }));
    }
    Ok(())
}

/// Checks that a source of `src_width` x `src_height` carries the right and bottom
/// halo a 3x3 window needs for a destination of `dst_width` x `dst_height`.
pub(crate) fn check_halo(
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
) -> Result<(), BlurError> {
    if src_width < dst_width + 2 {
        return Err(BlurError::InsufficientHaloWidth(MismatchedSize {
            expected: dst_width + 2,
            received: src_width,
        }));
    }
    if src_height < dst_height + 2 {
        return Err(BlurError::InsufficientHaloHeight(MismatchedSize {
            expected: dst_height + 2,
            received: src_height,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_slice_size() {
        let data = vec![0u16; 10 * 3];
        assert!(check_slice_size(&data, 10, 10, 3).is_ok());
        // last row may be shorter than the stride
        assert!(check_slice_size(&data[..25], 10, 5, 3).is_ok());
        assert_eq!(
            check_slice_size(&data, 10, 0, 3),
            Err(BlurError::ZeroBaseSize)
        );
        assert_eq!(
            check_slice_size(&data, 4, 5, 3),
            Err(BlurError::MinimumStrideSizeMismatch(MismatchedSize {
                expected: 5,
                received: 4,
            }))
        );
        assert_eq!(
            check_slice_size(&data, 10, 10, 4),
            Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 40,
                received: 30,
            }))
        );
    }

    #[test]
    fn test_check_halo() {
        assert!(check_halo(12, 7, 10, 5).is_ok());
        assert!(check_halo(20, 20, 10, 5).is_ok());
        assert_eq!(
            check_halo(11, 7, 10, 5),
            Err(BlurError::InsufficientHaloWidth(MismatchedSize {
                expected: 12,
                received: 11,
            }))
        );
        assert_eq!(
            check_halo(12, 6, 10, 5),
            Err(BlurError::InsufficientHaloHeight(MismatchedSize {
                expected: 7,
                received: 6,
            }))
        );
    }

    #[test]
    fn test_error_display() {
        let message = BlurError::InsufficientHaloWidth(MismatchedSize {
            expected: 12,
            received: 11,
        })
        .to_string();
        assert!(message.contains("12"));
        assert!(message.contains("11"));
    }
}
