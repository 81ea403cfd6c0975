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

use super::{ImageId, NativeCommandList, NativeImage};
use crate::error::PlatformError;
use crate::math::{LinearRgba, Matrix3x2, Rect, Vec2};
use std::fmt::Debug;
use std::sync::Arc;

/// A short-lived object binding a device to a render target.
///
/// Drawing operations are only valid between [`begin_draw`] and [`end_draw`].
/// Failures of individual operations are deferred and reported by `end_draw`,
/// which matches how immediate-mode native APIs batch their errors.
///
/// [`begin_draw`]: NativeDeviceContext::begin_draw
/// [`end_draw`]: NativeDeviceContext::end_draw
pub trait NativeDeviceContext: Send + Debug {
    /// Directs subsequent drawing operations to `target`.
    fn set_target(&mut self, target: Arc<dyn NativeCommandList>);

    /// Returns the identifier of the current target, if any.
    fn target_id(&self) -> Option<ImageId>;

    /// The DPI used to interpret drawing coordinates.
    fn dpi(&self) -> f32;

    /// Sets the DPI used to interpret drawing coordinates.
    fn set_dpi(&mut self, dpi: f32);

    /// The transform applied to subsequent drawing operations.
    fn transform(&self) -> Matrix3x2;

    /// Sets the transform applied to subsequent drawing operations.
    fn set_transform(&mut self, transform: Matrix3x2);

    /// Starts a batch of drawing operations.
    fn begin_draw(&mut self);

    /// Ends the current batch and reports the first deferred failure, if any.
    fn end_draw(&mut self) -> Result<(), PlatformError>;

    /// Clears the target to a solid color.
    fn clear(&mut self, color: LinearRgba);

    /// Fills an axis-aligned rectangle.
    fn fill_rectangle(&mut self, rect: Rect, color: LinearRgba);

    /// Strokes a line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: LinearRgba, stroke_width: f32);

    /// Draws an image with its origin at `offset`.
    fn draw_image(&mut self, image: Arc<dyn NativeImage>, offset: Vec2);

    /// Computes the bounds of `image` after applying `transform`.
    ///
    /// This never finalizes a recording; an open recording reports the
    /// content recorded so far.
    fn image_world_bounds(
        &self,
        image: &dyn NativeImage,
        transform: &Matrix3x2,
    ) -> Result<Rect, PlatformError>;
}
