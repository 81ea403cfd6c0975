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

//! The drawable-image contract shared by every image source.
//!
//! Anything that can be drawn or composited implements [`CanvasImage`]. A
//! consumer (typically a drawing session) asks the source for a native image
//! through [`CanvasImage::get_native_image`]; this is the point where lazy
//! sources realize themselves, and where a command list finalizes its
//! recording.

mod bounds;
mod flags;

pub use self::bounds::image_bounds;
pub use self::flags::GetImageFlags;

use crate::device::{CanvasDevice, ResourceCreator};
use crate::error::CanvasResult;
use crate::native::{NativeDeviceContext, NativeImage};
use std::sync::Arc;

/// The result of realizing an image source.
#[derive(Debug, Clone)]
pub struct RealizedImage {
    /// The native image to draw.
    pub image: Arc<dyn NativeImage>,
    /// The DPI the image was realized at. `0.0` means the image has no
    /// intrinsic resolution.
    pub realized_dpi: f32,
}

/// A source that can be drawn as an image.
pub trait CanvasImage: ResourceCreator {
    /// Produces a native image suitable for drawing through `context`.
    ///
    /// ## Arguments
    /// * `device` - The device of the consumer.
    /// * `context` - The device context the image will be drawn with.
    /// * `flags` - Realization options.
    /// * `target_dpi` - The DPI the consumer draws at.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidState` - If the source has been closed.
    /// * `CanvasError::Platform` - If the backend failed to realize the image.
    fn get_native_image(
        &self,
        device: &CanvasDevice,
        context: &dyn NativeDeviceContext,
        flags: GetImageFlags,
        target_dpi: f32,
    ) -> CanvasResult<RealizedImage>;

    /// Returns the native image without realizing it.
    ///
    /// Used by bounds queries, which must not change the source's state.
    fn peek_native_image(&self) -> CanvasResult<Arc<dyn NativeImage>>;
}
