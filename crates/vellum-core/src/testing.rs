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

//! Scripted native doubles used by unit tests.

use crate::device::CanvasDevice;
use crate::error::PlatformError;
use crate::math::{LinearRgba, Matrix3x2, Rect, Vec2};
use crate::native::{ImageId, NativeCommandList, NativeDevice, NativeDeviceContext, NativeImage};
use crate::settings::CanvasSettings;
use std::any::Any;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Every scripted recording reports these local bounds.
pub(crate) const SCRIPTED_BOUNDS: Rect = Rect {
    min: Vec2::new(0.0, 0.0),
    max: Vec2::new(10.0, 20.0),
};

#[derive(Debug)]
pub(crate) struct ScriptedCommandList {
    id: ImageId,
    closed: AtomicBool,
    close_calls: AtomicUsize,
    close_failures: Mutex<VecDeque<PlatformError>>,
}

impl ScriptedCommandList {
    pub(crate) fn new(id: u64) -> Arc<Self> {
        Arc::new(Self {
            id: ImageId(id),
            closed: AtomicBool::new(false),
            close_calls: AtomicUsize::new(0),
            close_failures: Mutex::new(VecDeque::new()),
        })
    }

    pub(crate) fn already_closed(id: u64) -> Arc<Self> {
        let list = Self::new(id);
        list.closed.store(true, Ordering::SeqCst);
        list
    }

    pub(crate) fn fail_next_close(&self, err: PlatformError) {
        self.close_failures.lock().unwrap().push_back(err);
    }

    pub(crate) fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl NativeImage for ScriptedCommandList {
    fn id(&self) -> ImageId {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl NativeCommandList for ScriptedCommandList {
    fn close(&self) -> Result<(), PlatformError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.close_failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        if self.closed.swap(true, Ordering::SeqCst) {
            Err(PlatformError::WrongState)
        } else {
            Ok(())
        }
    }

    fn into_image(self: Arc<Self>) -> Arc<dyn NativeImage> {
        self
    }
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedContext {
    target: Option<ImageId>,
    transform: Matrix3x2,
    dpi: f32,
    pub(crate) drawing: bool,
    pub(crate) drawn_images: Vec<ImageId>,
}

impl NativeDeviceContext for ScriptedContext {
    fn set_target(&mut self, target: Arc<dyn NativeCommandList>) {
        self.target = Some(target.id());
    }

    fn target_id(&self) -> Option<ImageId> {
        self.target
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
        self.drawing = true;
    }

    fn end_draw(&mut self) -> Result<(), PlatformError> {
        self.drawing = false;
        Ok(())
    }

    fn clear(&mut self, _color: LinearRgba) {}

    fn fill_rectangle(&mut self, _rect: Rect, _color: LinearRgba) {}

    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: LinearRgba, _stroke_width: f32) {}

    fn draw_image(&mut self, image: Arc<dyn NativeImage>, _offset: Vec2) {
        self.drawn_images.push(image.id());
    }

    fn image_world_bounds(
        &self,
        _image: &dyn NativeImage,
        transform: &Matrix3x2,
    ) -> Result<Rect, PlatformError> {
        Ok(SCRIPTED_BOUNDS.transform(transform))
    }
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedDevice {
    next_id: AtomicU64,
    pub(crate) allocations: AtomicUsize,
    pub(crate) contexts_created: AtomicUsize,
    allocation_failure: Mutex<Option<PlatformError>>,
}

impl ScriptedDevice {
    pub(crate) fn fail_next_allocation(&self, err: PlatformError) {
        *self.allocation_failure.lock().unwrap() = Some(err);
    }
}

impl NativeDevice for ScriptedDevice {
    fn create_command_list(&self) -> Result<Arc<dyn NativeCommandList>, PlatformError> {
        if let Some(err) = self.allocation_failure.lock().unwrap().take() {
            return Err(err);
        }
        self.allocations.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ScriptedCommandList::new(id))
    }

    fn create_device_context(&self) -> Result<Box<dyn NativeDeviceContext>, PlatformError> {
        self.contexts_created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedContext::default()))
    }

    fn backend_name(&self) -> &str {
        "scripted"
    }
}

pub(crate) fn scripted_device() -> (Arc<ScriptedDevice>, CanvasDevice) {
    let native = Arc::new(ScriptedDevice::default());
    let device = CanvasDevice::new(native.clone(), CanvasSettings::default());
    (native, device)
}

pub(crate) fn null_device() -> CanvasDevice {
    scripted_device().1
}
