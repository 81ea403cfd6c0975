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

//! A recordable, replayable drawing surface.
//!
//! A [`CommandList`] records the operations issued through drawing sessions
//! created against it. The first time it is consumed as an image it finalizes
//! its native recording, after which it can be drawn any number of times but
//! never drawn into again.
//!
//! ```text
//!            get_native_image              close
//!   Open ---------------------> Finalized -------> Closed
//!     |                                              ^
//!     +----------------------------------------------+
//!                          close
//! ```
//!
//! Sessions may only be created while `Open`. Bounds queries work in `Open`
//! and `Finalized`. Everything except a repeated `close` fails once `Closed`.

use crate::device::{CanvasDevice, ResourceCreator};
use crate::error::{CanvasError, CanvasResult, PlatformError};
use crate::image::{image_bounds, CanvasImage, GetImageFlags, RealizedImage};
use crate::math::{Matrix3x2, Rect};
use crate::native::{NativeCommandList, NativeDeviceContext, NativeImage};
use crate::resource::{ClosableDeviceRef, ResourceWrapper};
use crate::session::{DrawingSession, SimpleDrawingSessionAdapter};
use std::cell::{Cell, RefCell};
use std::sync::Arc;

/// Whether, and by whom, the native recording has been finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeState {
    /// The recording still accepts drawing sessions.
    Open,
    /// This command list finalized the recording.
    FinalizedBySelf,
    /// The recording had already been finalized by someone else when this
    /// command list first tried to finalize it.
    FinalizedExternally,
}

impl FinalizeState {
    /// Returns `true` for both finalized states.
    pub fn is_finalized(self) -> bool {
        !matches!(self, FinalizeState::Open)
    }
}

/// A recording of drawing operations that can be composited as an image.
///
/// `CommandList` uses interior mutability without locking: it is `Send` but
/// not `Sync`, and is meant to be used from one thread at a time.
#[derive(Debug)]
pub struct CommandList {
    resource: RefCell<ResourceWrapper<Arc<dyn NativeCommandList>>>,
    device: RefCell<ClosableDeviceRef>,
    finalize_state: Cell<FinalizeState>,
}

impl CommandList {
    /// Creates a command list on the device of `resource_creator`.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidArgument` - If `resource_creator` is `None`.
    ///   Nothing is allocated in that case.
    /// * `CanvasError::InvalidState` - If the creator or its device is closed.
    /// * `CanvasError::Platform` - If the device cannot allocate a recording.
    pub fn create(resource_creator: Option<&dyn ResourceCreator>) -> CanvasResult<Self> {
        let resource_creator = resource_creator
            .ok_or_else(|| CanvasError::InvalidArgument("resource_creator".to_string()))?;
        let device = resource_creator.device()?;
        Self::create_new(&device)
    }

    /// Creates a command list bound to `device`, allocating a new recording.
    pub fn create_new(device: &CanvasDevice) -> CanvasResult<Self> {
        let native = device.create_command_list()?;
        Ok(Self::from_native(device.clone(), native))
    }

    /// Wraps a recording that was created outside this crate.
    ///
    /// The recording may already be finalized. In that case the command list
    /// notices the first time it is realized, and from then on behaves as if
    /// it had finalized the recording itself.
    pub fn from_native(device: CanvasDevice, native: Arc<dyn NativeCommandList>) -> Self {
        log::debug!("CommandList: wrapping recording {:?}", native.id());
        Self {
            resource: RefCell::new(ResourceWrapper::new(native, "CommandList")),
            device: RefCell::new(ClosableDeviceRef::new(device)),
            finalize_state: Cell::new(FinalizeState::Open),
        }
    }

    /// Returns the native recording.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidState` - If the command list has been closed.
    pub fn native_resource(&self) -> CanvasResult<Arc<dyn NativeCommandList>> {
        self.resource.borrow().resource().map(Arc::clone)
    }

    /// Creates a drawing session that records into this command list.
    ///
    /// Each call creates an independent session with its own device context;
    /// several may be open at the same time.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidState` - If the command list or its device has
    ///   been closed.
    /// * `CanvasError::CommandListConsumed` - If the command list has already
    ///   been used as an image.
    /// * `CanvasError::Platform` - If the device cannot create a context.
    pub fn create_drawing_session(&self) -> CanvasResult<DrawingSession> {
        let native = self.native_resource()?;

        if self.finalize_state.get().is_finalized() {
            return Err(CanvasError::CommandListConsumed);
        }

        let device = self.device.borrow().ensure_not_closed()?;

        let mut context = device.create_device_context_for_drawing_session()?;
        context.set_target(native);

        let adapter = SimpleDrawingSessionAdapter::begin(&mut *context);

        Ok(DrawingSession::create_new(context, Box::new(adapter), device))
    }

    /// Releases the device reference and the native recording.
    ///
    /// Closing an already closed command list does nothing.
    pub fn close(&self) {
        self.device.borrow_mut().close();
        if let Some(native) = self.resource.borrow_mut().close() {
            log::debug!("CommandList: released recording {:?}", native.id());
        }
    }

    /// Returns `true` once the command list has been closed.
    pub fn is_closed(&self) -> bool {
        self.resource.borrow().is_closed()
    }

    /// Returns the current finalize state.
    pub fn finalize_state(&self) -> FinalizeState {
        self.finalize_state.get()
    }

    /// Returns `true` once the command list has been used as an image.
    pub fn is_finalized(&self) -> bool {
        self.finalize_state.get().is_finalized()
    }

    /// Returns the bounds of the recorded content.
    ///
    /// `session` supplies the device context used for the measurement; without
    /// it a fresh context is created. The command list is not finalized.
    pub fn bounds(&self, session: Option<&DrawingSession>) -> CanvasResult<Rect> {
        image_bounds(self, session, None)
    }

    /// Returns the bounds of the recorded content after applying `transform`.
    pub fn bounds_with_transform(
        &self,
        session: Option<&DrawingSession>,
        transform: Matrix3x2,
    ) -> CanvasResult<Rect> {
        image_bounds(self, session, Some(&transform))
    }

    fn finalize(&self, native: &dyn NativeCommandList) -> CanvasResult<()> {
        let state = match native.close() {
            Ok(()) => FinalizeState::FinalizedBySelf,
            // Recordings handed in from outside may have been closed already.
            Err(PlatformError::WrongState) => FinalizeState::FinalizedExternally,
            Err(err) => {
                log::warn!(
                    "CommandList: failed to finalize recording {:?}: {err}",
                    native.id()
                );
                return Err(err.into());
            }
        };

        log::debug!(
            "CommandList: recording {:?} finalized ({state:?})",
            native.id()
        );
        self.finalize_state.set(state);
        Ok(())
    }
}

impl ResourceCreator for CommandList {
    /// Returns the device this command list is bound to.
    fn device(&self) -> CanvasResult<CanvasDevice> {
        self.native_resource()?;
        self.device.borrow().ensure_not_closed()
    }
}

impl CanvasImage for CommandList {
    fn get_native_image(
        &self,
        _device: &CanvasDevice,
        _context: &dyn NativeDeviceContext,
        _flags: GetImageFlags,
        _target_dpi: f32,
    ) -> CanvasResult<RealizedImage> {
        let native = self.native_resource()?;

        if !self.finalize_state.get().is_finalized() {
            self.finalize(native.as_ref())?;
        }

        Ok(RealizedImage {
            image: native.into_image(),
            realized_dpi: 0.0,
        })
    }

    fn peek_native_image(&self) -> CanvasResult<Arc<dyn NativeImage>> {
        Ok(self.native_resource()?.into_image())
    }
}

impl Drop for CommandList {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::native::ImageId;
    use crate::testing::{scripted_device, ScriptedCommandList, ScriptedContext, SCRIPTED_BOUNDS};
    use std::sync::atomic::Ordering;

    fn realize(list: &CommandList, device: &CanvasDevice) -> CanvasResult<RealizedImage> {
        let context = ScriptedContext::default();
        list.get_native_image(device, &context, GetImageFlags::NONE, 96.0)
    }

    #[test]
    fn test_new_command_list_is_open() {
        let (_, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();
        assert_eq!(list.finalize_state(), FinalizeState::Open);
        assert!(!list.is_closed());
        assert!(list.device().unwrap().ptr_eq(&device));
    }

    #[test]
    fn test_create_without_resource_creator_allocates_nothing() {
        let (native, _device) = scripted_device();
        let err = CommandList::create(None).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(native.allocations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_create_from_resource_creator() {
        let (native, device) = scripted_device();
        let list = CommandList::create(Some(&device as &dyn ResourceCreator)).unwrap();
        assert_eq!(native.allocations.load(Ordering::SeqCst), 1);

        // Any resource creator works, including another command list.
        let sibling = CommandList::create(Some(&list as &dyn ResourceCreator)).unwrap();
        assert!(sibling.device().unwrap().ptr_eq(&device));
    }

    #[test]
    fn test_allocation_failure_is_propagated() {
        let (native, device) = scripted_device();
        native.fail_next_allocation(PlatformError::OutOfMemory);
        let err = CommandList::create_new(&device).unwrap_err();
        assert_eq!(err, CanvasError::Platform(PlatformError::OutOfMemory));
    }

    #[test]
    fn test_create_on_closed_device_fails() {
        let (native, device) = scripted_device();
        device.close();
        assert!(CommandList::create_new(&device).unwrap_err().is_invalid_state());
        assert_eq!(native.allocations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_sessions_allowed_until_first_realization() {
        let (native, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();

        let first = list.create_drawing_session().unwrap();
        let second = list.create_drawing_session().unwrap();
        let third = list.create_drawing_session().unwrap();
        assert_eq!(native.contexts_created.load(Ordering::SeqCst), 3);
        assert_eq!(
            first.native_context().unwrap().target_id(),
            Some(list.native_resource().unwrap().id())
        );
        drop((first, second, third));

        realize(&list, &device).unwrap();

        assert_eq!(
            list.create_drawing_session().unwrap_err(),
            CanvasError::CommandListConsumed
        );
        assert_eq!(native.contexts_created.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_session_uses_device_dpi() {
        let (_, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();
        let session = list.create_drawing_session().unwrap();
        assert_eq!(session.dpi().unwrap(), 96.0);
    }

    #[test]
    fn test_realization_finalizes_exactly_once() {
        let (_, device) = scripted_device();
        let native = ScriptedCommandList::new(7);
        let list = CommandList::from_native(device.clone(), native.clone());

        let first = realize(&list, &device).unwrap();
        let second = realize(&list, &device).unwrap();

        assert_eq!(first.image.id(), ImageId(7));
        assert_eq!(first.image.id(), second.image.id());
        assert_eq!(first.realized_dpi, 0.0);
        assert_eq!(second.realized_dpi, 0.0);
        assert_eq!(native.close_calls(), 1);
        assert!(native.is_closed());
        assert_eq!(list.finalize_state(), FinalizeState::FinalizedBySelf);
    }

    #[test]
    fn test_realized_image_is_drawn_by_recording_id() {
        let (_, device) = scripted_device();
        let native = ScriptedCommandList::new(11);
        let list = CommandList::from_native(device.clone(), native.clone());
        let mut context = ScriptedContext::default();

        let realized = list
            .get_native_image(&device, &context, GetImageFlags::NONE, 96.0)
            .unwrap();
        context.draw_image(realized.image, Vec2::ZERO);

        assert_eq!(context.drawn_images, vec![ImageId(11)]);
        assert!(native.is_closed());
    }

    #[test]
    fn test_externally_finalized_recording_is_accepted() {
        let (_, device) = scripted_device();
        let native = ScriptedCommandList::already_closed(3);
        let list = CommandList::from_native(device.clone(), native.clone());

        // Not yet observed: the wrapper still believes it is open.
        assert_eq!(list.finalize_state(), FinalizeState::Open);

        realize(&list, &device).unwrap();
        assert_eq!(list.finalize_state(), FinalizeState::FinalizedExternally);
        assert!(list.is_finalized());

        realize(&list, &device).unwrap();
        assert_eq!(native.close_calls(), 1);
        assert_eq!(
            list.create_drawing_session().unwrap_err(),
            CanvasError::CommandListConsumed
        );
    }

    #[test]
    fn test_finalize_failure_is_surfaced_and_retried() {
        let (_, device) = scripted_device();
        let native = ScriptedCommandList::new(1);
        native.fail_next_close(PlatformError::DeviceRemoved);
        let list = CommandList::from_native(device.clone(), native.clone());

        let err = realize(&list, &device).unwrap_err();
        assert_eq!(err, CanvasError::Platform(PlatformError::DeviceRemoved));
        assert_eq!(list.finalize_state(), FinalizeState::Open);
        // Still open, so recording may continue.
        assert!(list.create_drawing_session().is_ok());

        realize(&list, &device).unwrap();
        assert_eq!(native.close_calls(), 2);
        assert_eq!(list.finalize_state(), FinalizeState::FinalizedBySelf);
    }

    #[test]
    fn test_everything_fails_after_close() {
        let (_, device) = scripted_device();
        let native = ScriptedCommandList::new(9);
        let list = CommandList::from_native(device.clone(), native.clone());
        assert_eq!(Arc::strong_count(&native), 2);

        list.close();
        assert!(list.is_closed());
        assert_eq!(Arc::strong_count(&native), 1);

        assert!(list.device().unwrap_err().is_invalid_state());
        assert!(list.bounds(None).unwrap_err().is_invalid_state());
        assert!(list
            .bounds_with_transform(None, Matrix3x2::IDENTITY)
            .unwrap_err()
            .is_invalid_state());
        assert!(list.create_drawing_session().unwrap_err().is_invalid_state());
        assert!(realize(&list, &device).unwrap_err().is_invalid_state());
        assert!(list.native_resource().unwrap_err().is_invalid_state());
        assert_eq!(native.close_calls(), 0);

        list.close();
        assert!(list.is_closed());
    }

    #[test]
    fn test_closed_takes_precedence_over_consumed() {
        let (_, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();
        realize(&list, &device).unwrap();
        list.close();
        assert!(list.create_drawing_session().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_closed_device_is_detected() {
        let (_, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();
        device.close();
        assert!(list.device().unwrap_err().is_invalid_state());
        assert!(list.create_drawing_session().unwrap_err().is_invalid_state());
        assert!(list.bounds(None).unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_bounds_do_not_finalize() {
        let (native, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();

        assert_eq!(list.bounds(None).unwrap(), SCRIPTED_BOUNDS);
        assert!(!list.is_finalized());
        assert_eq!(native.contexts_created.load(Ordering::SeqCst), 1);

        let shift = Matrix3x2::from_translation(Vec2::new(5.0, -5.0));
        assert_eq!(
            list.bounds_with_transform(None, shift).unwrap(),
            SCRIPTED_BOUNDS.translate(Vec2::new(5.0, -5.0))
        );

        realize(&list, &device).unwrap();
        assert_eq!(list.bounds(None).unwrap(), SCRIPTED_BOUNDS);
    }

    #[test]
    fn test_bounds_use_session_context() {
        let (native, device) = scripted_device();
        let list = CommandList::create_new(&device).unwrap();
        let other = CommandList::create_new(&device).unwrap();
        let session = other.create_drawing_session().unwrap();
        let before = native.contexts_created.load(Ordering::SeqCst);

        assert_eq!(list.bounds(Some(&session)).unwrap(), SCRIPTED_BOUNDS);
        assert_eq!(native.contexts_created.load(Ordering::SeqCst), before);
    }

    #[test]
    fn test_drawing_into_another_session_finalizes() {
        let (_, device) = scripted_device();
        let source = CommandList::create_new(&device).unwrap();
        let destination = CommandList::create_new(&device).unwrap();

        let mut session = destination.create_drawing_session().unwrap();
        session.draw_image(&source, Vec2::new(1.0, 2.0)).unwrap();
        session.close().unwrap();

        assert!(source.is_finalized());
        assert!(!destination.is_finalized());
        assert_eq!(
            source.create_drawing_session().unwrap_err(),
            CanvasError::CommandListConsumed
        );
    }
}
