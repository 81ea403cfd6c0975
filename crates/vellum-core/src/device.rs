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

//! The device handle shared by every canvas resource.

use crate::error::{CanvasError, CanvasResult};
use crate::native::{NativeCommandList, NativeDevice, NativeDeviceContext};
use crate::settings::CanvasSettings;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Anything that can hand out the device new resources should be created on.
///
/// Devices, drawing sessions and device-bound resources all implement this, so
/// factories can accept whichever of them the caller has at hand.
pub trait ResourceCreator {
    /// Returns the device resources created from `self` should be bound to.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidState` - If `self` or its device has been closed.
    fn device(&self) -> CanvasResult<CanvasDevice>;
}

struct DeviceShared {
    native: Arc<dyn NativeDevice>,
    settings: CanvasSettings,
    closed: AtomicBool,
}

/// A cheap, clonable handle to a graphics device.
///
/// Clones refer to the same device. Closing any clone closes the device for
/// all of them; resources bound to it observe the closure the next time they
/// need the device.
#[derive(Clone)]
pub struct CanvasDevice {
    shared: Arc<DeviceShared>,
}

impl CanvasDevice {
    /// Wraps a native device.
    pub fn new(native: Arc<dyn NativeDevice>, settings: CanvasSettings) -> Self {
        log::info!(
            "CanvasDevice: created on backend '{}' (dpi {}, debug level {:?})",
            native.backend_name(),
            settings.default_dpi,
            settings.debug_level
        );
        Self {
            shared: Arc::new(DeviceShared {
                native,
                settings,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the native device.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidState` - If the device has been closed.
    pub fn native(&self) -> CanvasResult<&Arc<dyn NativeDevice>> {
        if self.is_closed() {
            return Err(CanvasError::closed("CanvasDevice"));
        }
        Ok(&self.shared.native)
    }

    /// The settings this device was created with.
    pub fn settings(&self) -> &CanvasSettings {
        &self.shared.settings
    }

    /// Closes the device. Closing twice has no further effect.
    pub fn close(&self) {
        if !self.shared.closed.swap(true, Ordering::AcqRel) {
            log::debug!("CanvasDevice: closed");
        }
    }

    /// Returns `true` once the device has been closed.
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    /// Returns `true` if both handles refer to the same device.
    pub fn ptr_eq(&self, other: &CanvasDevice) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Allocates a new native recording on this device.
    pub fn create_command_list(&self) -> CanvasResult<Arc<dyn NativeCommandList>> {
        Ok(self.native()?.create_command_list()?)
    }

    /// Creates a device context configured for a drawing session.
    ///
    /// The context has no target and uses the device's default DPI.
    pub fn create_device_context_for_drawing_session(
        &self,
    ) -> CanvasResult<Box<dyn NativeDeviceContext>> {
        let mut context = self.native()?.create_device_context()?;
        context.set_dpi(self.shared.settings.default_dpi);
        Ok(context)
    }
}

impl ResourceCreator for CanvasDevice {
    fn device(&self) -> CanvasResult<CanvasDevice> {
        self.native()?;
        Ok(self.clone())
    }
}

impl fmt::Debug for CanvasDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasDevice")
            .field("backend", &self.shared.native.backend_name())
            .field("closed", &self.is_closed())
            .finish()
    }
}
