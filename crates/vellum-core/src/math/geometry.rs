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

//! Provides the axis-aligned rectangle used for image bounds.

use serde::{Deserialize, Serialize};

use super::{Matrix3x2, Vec2};

/// An axis-aligned rectangle defined by its minimum and maximum corners.
///
/// Bounds queries return a `Rect` in the coordinate space implied by the
/// transform they were given. `x`/`y`/`width`/`height` accessors are provided
/// for callers that think in origin-and-size terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Rect {
    /// The top-left corner (smallest coordinates).
    pub min: Vec2,
    /// The bottom-right corner (largest coordinates).
    pub max: Vec2,
}

impl Rect {
    /// A zero-sized rectangle at the origin. This is the bounds of an empty recording.
    pub const ZERO: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    /// An invalid `Rect` where `min` is positive infinity and `max` negative infinity.
    ///
    /// Useful as a neutral starting point for unions: the union of any valid
    /// rectangle with `INVALID` is that rectangle.
    pub const INVALID: Self = Self {
        min: Vec2::new(f32::INFINITY, f32::INFINITY),
        max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Creates a new `Rect` from two corner points, in any order.
    #[inline]
    pub fn from_min_max(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a new `Rect` from an origin and a size. Negative sizes are normalized.
    #[inline]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_min_max(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    /// Creates the tightest `Rect` enclosing the given points.
    ///
    /// Returns `None` if the slice is empty.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            rect.min = rect.min.min(*p);
            rect.max = rect.max.max(*p);
        }
        Some(rect)
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Checks if the `Rect` is valid (`min <= max` on both axes).
    /// Degenerate rectangles are considered valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Returns the smallest `Rect` enclosing both rectangles.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns this rectangle moved by `offset`.
    #[inline]
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Returns this rectangle grown by `amount` on every side.
    #[inline]
    pub fn inflate(&self, amount: f32) -> Self {
        let d = Vec2::new(amount, amount);
        Self {
            min: self.min - d,
            max: self.max + d,
        }
    }

    /// Transforms the rectangle and returns the axis-aligned bounds of the result.
    ///
    /// All four corners are transformed, so rotations produce the enclosing box.
    pub fn transform(&self, m: &Matrix3x2) -> Self {
        if !self.is_valid() {
            return *self;
        }
        let corners = [
            m.transform_point(self.min),
            m.transform_point(Vec2::new(self.max.x, self.min.y)),
            m.transform_point(self.max),
            m.transform_point(Vec2::new(self.min.x, self.max.y)),
        ];
        // Four corners are always present.
        Self::from_points(&corners).unwrap_or(*self)
    }

    /// Checks whether two rectangles are equal within the default epsilon.
    #[inline]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.min.approx_eq(other.min) && self.max.approx_eq(other.max)
    }
}

impl Default for Rect {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}
