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

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use vellum_core::native::{ImageId, NativeCommandList, NativeDevice, NativeDeviceContext};
use vellum_core::{CanvasDevice, CanvasSettings, PlatformError};

use super::context::SoftwareDeviceContext;
use super::recording::SoftwareCommandList;

/// A device that allocates in-memory recordings and contexts.
#[derive(Debug)]
pub struct SoftwareDevice {
    settings: CanvasSettings,
    next_image_id: AtomicU64,
    recordings_created: AtomicUsize,
    contexts_created: AtomicUsize,
}

impl SoftwareDevice {
    /// Creates a new software device.
    pub fn new(settings: CanvasSettings) -> Self {
        Self {
            settings,
            next_image_id: AtomicU64::new(1),
            recordings_created: AtomicUsize::new(0),
            contexts_created: AtomicUsize::new(0),
        }
    }

    /// Creates a software device and the `CanvasDevice` handle wrapping it.
    ///
    /// The returned `Arc` gives access to backend statistics and to
    /// [`create_recording`](Self::create_recording) for interop scenarios.
    pub fn create_canvas_device(settings: CanvasSettings) -> (Arc<SoftwareDevice>, CanvasDevice) {
        let native = Arc::new(SoftwareDevice::new(settings.clone()));
        let device = CanvasDevice::new(native.clone(), settings);
        (native, device)
    }

    /// Allocates a recording and returns it with its concrete type.
    pub fn create_recording(&self) -> Arc<SoftwareCommandList> {
        let id = ImageId(self.next_image_id.fetch_add(1, Ordering::Relaxed));
        self.recordings_created.fetch_add(1, Ordering::Relaxed);
        log::debug!("SoftwareDevice: created recording {id:?}");
        Arc::new(SoftwareCommandList::new(id))
    }

    /// The number of recordings allocated so far.
    pub fn recordings_created(&self) -> usize {
        self.recordings_created.load(Ordering::Relaxed)
    }

    /// The number of device contexts created so far.
    pub fn contexts_created(&self) -> usize {
        self.contexts_created.load(Ordering::Relaxed)
    }
}

impl Default for SoftwareDevice {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}

impl NativeDevice for SoftwareDevice {
    fn create_command_list(&self) -> Result<Arc<dyn NativeCommandList>, PlatformError> {
        Ok(self.create_recording())
    }

    fn create_device_context(&self) -> Result<Box<dyn NativeDeviceContext>, PlatformError> {
        self.contexts_created.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(SoftwareDeviceContext::new(self.settings.clone())))
    }

    fn backend_name(&self) -> &str {
        "software"
    }
}
