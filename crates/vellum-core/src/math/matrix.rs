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

//! Defines the 2D affine transform used by drawing sessions and bounds queries.

use serde::{Deserialize, Serialize};

use super::Vec2;
use std::ops::Mul;

/// A 3x2 matrix representing a 2D affine transformation.
///
/// The layout matches the usual drawing-API convention: the first two rows
/// hold the linear part and the third row (`m31`, `m32`) holds the translation.
/// A point is transformed as a row vector:
///
/// ```text
/// x' = x * m11 + y * m21 + m31
/// y' = x * m12 + y * m22 + m32
/// ```
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Matrix3x2 {
    /// Row 1, column 1.
    pub m11: f32,
    /// Row 1, column 2.
    pub m12: f32,
    /// Row 2, column 1.
    pub m21: f32,
    /// Row 2, column 2.
    pub m22: f32,
    /// Row 3, column 1 (x translation).
    pub m31: f32,
    /// Row 3, column 2 (y translation).
    pub m32: f32,
}

impl Matrix3x2 {
    /// The identity transform, which results in no change.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a matrix from its six elements, in row-major order.
    #[inline]
    pub const fn new(m11: f32, m12: f32, m21: f32, m22: f32, m31: f32, m32: f32) -> Self {
        Self {
            m11,
            m12,
            m21,
            m22,
            m31,
            m32,
        }
    }

    /// Creates a translation transform.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vellum_core::math::{Matrix3x2, Vec2};
    ///
    /// let t = Matrix3x2::from_translation(Vec2::new(10.0, 5.0));
    /// assert_eq!(t.transform_point(Vec2::ZERO), Vec2::new(10.0, 5.0));
    /// ```
    #[inline]
    pub const fn from_translation(v: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, v.x, v.y)
    }

    /// Creates a non-uniform scale transform around the origin.
    #[inline]
    pub const fn from_scale(scale: Vec2) -> Self {
        Self::new(scale.x, 0.0, 0.0, scale.y, 0.0, 0.0)
    }

    /// Creates a rotation transform around the origin.
    ///
    /// Positive angles rotate clockwise on a y-down drawing surface.
    #[inline]
    pub fn from_rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.m11 + p.y * self.m21 + self.m31,
            p.x * self.m12 + p.y * self.m22 + self.m32,
        )
    }

    /// Checks whether this is the identity transform.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Matrix3x2 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3x2 {
    type Output = Self;

    /// Composes two transforms: `self` is applied first, then `rhs`.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(
            self.m11 * rhs.m11 + self.m12 * rhs.m21,
            self.m11 * rhs.m12 + self.m12 * rhs.m22,
            self.m21 * rhs.m11 + self.m22 * rhs.m21,
            self.m21 * rhs.m12 + self.m22 * rhs.m22,
            self.m31 * rhs.m11 + self.m32 * rhs.m21 + rhs.m31,
            self.m31 * rhs.m12 + self.m32 * rhs.m22 + rhs.m32,
        )
    }
}
