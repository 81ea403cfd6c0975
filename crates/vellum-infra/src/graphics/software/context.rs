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

use std::sync::Arc;

use vellum_core::math::{LinearRgba, Matrix3x2, Rect, Vec2};
use vellum_core::native::{ImageId, NativeCommandList, NativeDeviceContext, NativeImage};
use vellum_core::{CanvasSettings, DebugLevel, PlatformError};

use super::recording::{RecordedOp, SoftwareCommandList};

/// A device context that appends operations to a [`SoftwareCommandList`].
///
/// Failures are deferred until [`end_draw`](NativeDeviceContext::end_draw),
/// which reports the first one.
#[derive(Debug)]
pub struct SoftwareDeviceContext {
    target: Option<Arc<dyn NativeCommandList>>,
    transform: Matrix3x2,
    dpi: f32,
    drawing: bool,
    deferred_error: Option<PlatformError>,
    settings: CanvasSettings,
}

impl SoftwareDeviceContext {
    pub(crate) fn new(settings: CanvasSettings) -> Self {
        Self {
            target: None,
            transform: Matrix3x2::IDENTITY,
            dpi: settings.default_dpi,
            drawing: false,
            deferred_error: None,
            settings,
        }
    }

    /// Returns `true` between `begin_draw` and `end_draw`.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    fn record_into_target(&self, op: RecordedOp) -> Result<(), PlatformError> {
        if !self.drawing {
            return Err(PlatformError::WrongState);
        }
        let target = self.target.as_ref().ok_or(PlatformError::WrongState)?;
        // A recording can only be drawn once it is closed. This also rules out
        // drawing a recording into itself, directly or through another one.
        if let RecordedOp::DrawImage { image, .. } = &op {
            let open_source = image
                .as_any()
                .downcast_ref::<SoftwareCommandList>()
                .is_some_and(|source| !source.is_closed());
            if open_source {
                return Err(PlatformError::WrongState);
            }
        }
        let recording = target
            .as_any()
            .downcast_ref::<SoftwareCommandList>()
            .ok_or_else(|| {
                PlatformError::Backend("target was not created by the software backend".into())
            })?;
        recording.record(op)
    }

    fn issue(&mut self, op: RecordedOp) {
        if let Err(err) = self.record_into_target(op) {
            if self.settings.reports(DebugLevel::Error) {
                log::error!(
                    "SoftwareDeviceContext: operation on target {:?} failed: {err}",
                    self.target_id()
                );
            }
            self.deferred_error.get_or_insert(err);
        }
    }
}

impl NativeDeviceContext for SoftwareDeviceContext {
    fn set_target(&mut self, target: Arc<dyn NativeCommandList>) {
        if self.drawing && self.settings.reports(DebugLevel::Warning) {
            log::warn!("SoftwareDeviceContext: target changed while drawing");
        }
        self.target = Some(target);
    }

    fn target_id(&self) -> Option<ImageId> {
        self.target.as_ref().map(|target| target.id())
    }

    fn dpi(&self) -> f32 {
        self.dpi
    }

    fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
    }

    fn transform(&self) -> Matrix3x2 {
        self.transform
    }

    fn set_transform(&mut self, transform: Matrix3x2) {
        self.transform = transform;
    }

    fn begin_draw(&mut self) {
        if self.drawing && self.settings.reports(DebugLevel::Warning) {
            log::warn!("SoftwareDeviceContext: begin_draw called twice");
        }
        self.drawing = true;
        self.deferred_error = None;
    }

    fn end_draw(&mut self) -> Result<(), PlatformError> {
        if !self.drawing {
            return Err(PlatformError::WrongState);
        }
        self.drawing = false;
        match self.deferred_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn clear(&mut self, color: LinearRgba) {
        self.issue(RecordedOp::Clear { color });
    }

    fn fill_rectangle(&mut self, rect: Rect, color: LinearRgba) {
        let transform = self.transform;
        self.issue(RecordedOp::FillRectangle {
            rect,
            color,
            transform,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: LinearRgba, stroke_width: f32) {
        let transform = self.transform;
        self.issue(RecordedOp::DrawLine {
            from,
            to,
            color,
            stroke_width,
            transform,
        });
    }

    fn draw_image(&mut self, image: Arc<dyn NativeImage>, offset: Vec2) {
        let transform = self.transform;
        self.issue(RecordedOp::DrawImage {
            image,
            offset,
            transform,
        });
    }

    fn image_world_bounds(
        &self,
        image: &dyn NativeImage,
        transform: &Matrix3x2,
    ) -> Result<Rect, PlatformError> {
        let recording = image
            .as_any()
            .downcast_ref::<SoftwareCommandList>()
            .ok_or_else(|| {
                PlatformError::Backend(format!(
                    "image {:?} was not created by the software backend",
                    image.id()
                ))
            })?;
        Ok(recording.content_bounds().transform(transform))
    }
}
