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

use super::CanvasImage;
use crate::error::CanvasResult;
use crate::math::{Matrix3x2, Rect};
use crate::session::DrawingSession;

/// Computes the world bounds of an image source.
///
/// The bounds are measured through a device context: the one belonging to
/// `session` when given, otherwise a fresh context from the image's device.
/// `transform` defaults to identity. The source is never realized, so an open
/// recording reports the content recorded so far.
///
/// ## Errors
/// * `CanvasError::InvalidState` - If the image, the session or the device
///   has been closed.
/// * `CanvasError::Platform` - If the backend cannot measure the image.
pub fn image_bounds(
    image: &dyn CanvasImage,
    session: Option<&DrawingSession>,
    transform: Option<&Matrix3x2>,
) -> CanvasResult<Rect> {
    let native = image.peek_native_image()?;
    let transform = transform.copied().unwrap_or(Matrix3x2::IDENTITY);

    let bounds = match session {
        Some(session) => session
            .native_context()?
            .image_world_bounds(native.as_ref(), &transform)?,
        None => {
            let device = image.device()?;
            let context = device.create_device_context_for_drawing_session()?;
            context.image_world_bounds(native.as_ref(), &transform)?
        }
    };

    Ok(bounds)
}
