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

//! Drawing sessions: the objects through which drawing operations are issued.

mod adapter;

pub use self::adapter::{DrawingSessionAdapter, SimpleDrawingSessionAdapter};

use crate::device::{CanvasDevice, ResourceCreator};
use crate::error::{CanvasError, CanvasResult};
use crate::image::{CanvasImage, GetImageFlags};
use crate::math::{LinearRgba, Matrix3x2, Rect, Vec2};
use crate::native::NativeDeviceContext;

/// Issues drawing operations against one target through a device context.
///
/// A session owns its device context until it is closed. Closing hands the
/// context back to the adapter, which ends the drawing batch; dropping an
/// open session closes it.
///
/// Sessions do not serialize their operations with other sessions targeting
/// the same recording. Callers that interleave several sessions are
/// responsible for the resulting order.
#[derive(Debug)]
pub struct DrawingSession {
    context: Option<Box<dyn NativeDeviceContext>>,
    adapter: Box<dyn DrawingSessionAdapter>,
    device: CanvasDevice,
}

impl DrawingSession {
    /// Creates a session over an already-targeted device context.
    pub fn create_new(
        context: Box<dyn NativeDeviceContext>,
        adapter: Box<dyn DrawingSessionAdapter>,
        device: CanvasDevice,
    ) -> Self {
        Self {
            context: Some(context),
            adapter,
            device,
        }
    }

    /// Returns the device context this session draws with.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidState` - If the session has been closed.
    pub fn native_context(&self) -> CanvasResult<&dyn NativeDeviceContext> {
        self.context
            .as_deref()
            .ok_or_else(|| CanvasError::closed("DrawingSession"))
    }

    fn context_mut(&mut self) -> CanvasResult<&mut (dyn NativeDeviceContext + 'static)> {
        self.context
            .as_deref_mut()
            .ok_or_else(|| CanvasError::closed("DrawingSession"))
    }

    /// The DPI drawing coordinates are interpreted at.
    pub fn dpi(&self) -> CanvasResult<f32> {
        Ok(self.native_context()?.dpi())
    }

    /// The transform applied to subsequent operations.
    pub fn transform(&self) -> CanvasResult<Matrix3x2> {
        Ok(self.native_context()?.transform())
    }

    /// Sets the transform applied to subsequent operations.
    pub fn set_transform(&mut self, transform: Matrix3x2) -> CanvasResult<()> {
        self.context_mut()?.set_transform(transform);
        Ok(())
    }

    /// Clears the target to `color`.
    pub fn clear(&mut self, color: LinearRgba) -> CanvasResult<()> {
        self.context_mut()?.clear(color);
        Ok(())
    }

    /// Fills `rect` with `color`.
    pub fn fill_rectangle(&mut self, rect: Rect, color: LinearRgba) -> CanvasResult<()> {
        self.context_mut()?.fill_rectangle(rect, color);
        Ok(())
    }

    /// Strokes a line from `from` to `to`.
    pub fn draw_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        color: LinearRgba,
        stroke_width: f32,
    ) -> CanvasResult<()> {
        if stroke_width.is_nan() || stroke_width < 0.0 {
            return Err(CanvasError::InvalidArgument(format!(
                "stroke_width must be a non-negative number, got {stroke_width}"
            )));
        }
        self.context_mut()?.draw_line(from, to, color, stroke_width);
        Ok(())
    }

    /// Draws `image` with its origin at `offset`.
    ///
    /// The image is realized through this session's context first, which is
    /// what finalizes a command list that is drawn for the first time.
    pub fn draw_image(&mut self, image: &dyn CanvasImage, offset: Vec2) -> CanvasResult<()> {
        let context = self
            .context
            .as_deref_mut()
            .ok_or_else(|| CanvasError::closed("DrawingSession"))?;
        let realized = image.get_native_image(
            &self.device,
            &*context,
            GetImageFlags::READ_DPI_FROM_DEVICE_CONTEXT,
            context.dpi(),
        )?;
        context.draw_image(realized.image, offset);
        Ok(())
    }

    /// Ends drawing and releases the device context.
    ///
    /// Deferred failures of earlier operations are reported here. Closing an
    /// already closed session succeeds without doing anything.
    pub fn close(&mut self) -> CanvasResult<()> {
        match self.context.take() {
            Some(mut context) => self.adapter.end_draw(&mut *context),
            None => Ok(()),
        }
    }

    /// Returns `true` once the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.context.is_none()
    }
}

impl ResourceCreator for DrawingSession {
    fn device(&self) -> CanvasResult<CanvasDevice> {
        self.native_context()?;
        self.device.device()
    }
}

impl Drop for DrawingSession {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            log::warn!("DrawingSession: error while ending draw on drop: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::command_list::CommandList;
    use crate::device::ResourceCreator;
    use crate::math::{LinearRgba, Matrix3x2, Rect, Vec2};
    use crate::testing::scripted_device;

    #[test]
    fn test_transform_round_trips_through_context() {
        let (_, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();
        let mut session = list.create_drawing_session().unwrap();
        assert!(session.transform().unwrap().is_identity());

        let shift = Matrix3x2::from_translation(Vec2::new(4.0, -2.0));
        session.set_transform(shift).unwrap();

        assert_eq!(session.transform().unwrap(), shift);
    }

    #[test]
    fn test_draw_line_rejects_invalid_stroke_width() {
        let (_, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();
        let mut session = list.create_drawing_session().unwrap();

        for width in [-1.0, f32::NAN] {
            let err = session
                .draw_line(Vec2::ZERO, Vec2::ONE, LinearRgba::WHITE, width)
                .unwrap_err();
            assert!(err.is_invalid_argument());
        }
        assert!(session
            .draw_line(Vec2::ZERO, Vec2::ONE, LinearRgba::WHITE, 0.0)
            .is_ok());
    }

    #[test]
    fn test_closed_session_rejects_operations() {
        let (_, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();
        let mut session = list.create_drawing_session().unwrap();
        assert!(session.device().unwrap().ptr_eq(&device));

        session.close().unwrap();
        session.close().unwrap();

        assert!(session.is_closed());
        assert!(session.native_context().unwrap_err().is_invalid_state());
        assert!(session.dpi().unwrap_err().is_invalid_state());
        assert!(session
            .fill_rectangle(Rect::from_xywh(0.0, 0.0, 1.0, 1.0), LinearRgba::RED)
            .unwrap_err()
            .is_invalid_state());
        assert!(session
            .draw_image(&list, Vec2::ZERO)
            .unwrap_err()
            .is_invalid_state());
        assert!(!list.is_finalized());
    }
}
