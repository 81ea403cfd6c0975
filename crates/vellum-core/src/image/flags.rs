// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Options controlling how an image source is realized.
//!
//! Command lists realize to a finalized recording and ignore every option.

/// Options passed to [`CanvasImage::get_native_image`].
///
/// Multiple options can be combined using [`union`](GetImageFlags::union).
///
/// [`CanvasImage::get_native_image`]: super::CanvasImage::get_native_image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GetImageFlags {
    bits: u32,
}

impl GetImageFlags {
    /// No options.
    pub const NONE: Self = Self { bits: 0 };
    /// Use the DPI of the device context instead of the caller-supplied one.
    pub const READ_DPI_FROM_DEVICE_CONTEXT: Self = Self { bits: 1 << 0 };
    /// Always wrap DPI-dependent sources in a DPI compensation step.
    pub const ALWAYS_INSERT_DPI_COMPENSATION: Self = Self { bits: 1 << 1 };
    /// Never wrap DPI-dependent sources in a DPI compensation step.
    pub const NEVER_INSERT_DPI_COMPENSATION: Self = Self { bits: 1 << 2 };
    /// Do only the work needed to obtain a handle; skip refreshing inputs.
    pub const MINIMAL_REALIZATION: Self = Self { bits: 1 << 3 };
    /// Tolerate effect graphs with missing inputs.
    pub const ALLOW_NULL_EFFECT_INPUTS: Self = Self { bits: 1 << 4 };
    /// Roll back partial realization when it fails.
    pub const UNREALIZE_ON_FAILURE: Self = Self { bits: 1 << 5 };

    /// Creates a set of flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks if every option in `other` is set in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no option is set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for GetImageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_contains() {
        let flags = GetImageFlags::READ_DPI_FROM_DEVICE_CONTEXT | GetImageFlags::MINIMAL_REALIZATION;
        assert!(flags.contains(GetImageFlags::READ_DPI_FROM_DEVICE_CONTEXT));
        assert!(flags.contains(GetImageFlags::MINIMAL_REALIZATION));
        assert!(!flags.contains(GetImageFlags::UNREALIZE_ON_FAILURE));
        assert_eq!(flags.bits(), 0b1001);
    }

    #[test]
    fn test_none_is_empty() {
        assert!(GetImageFlags::NONE.is_empty());
        assert_eq!(GetImageFlags::default(), GetImageFlags::NONE);
        assert!(GetImageFlags::from_bits(4).contains(GetImageFlags::NEVER_INSERT_DPI_COMPENSATION));
    }
}
