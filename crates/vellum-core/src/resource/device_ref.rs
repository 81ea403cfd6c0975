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

use crate::device::CanvasDevice;
use crate::error::{CanvasError, CanvasResult};

/// A reference to the device that owns a resource.
///
/// The resource does not control the device's lifetime: the application may
/// close the device at any time. Every operation that needs the device calls
/// [`ensure_not_closed`] first, which checks both this reference and the
/// device itself.
///
/// [`ensure_not_closed`]: ClosableDeviceRef::ensure_not_closed
#[derive(Debug)]
pub struct ClosableDeviceRef {
    device: Option<CanvasDevice>,
}

impl ClosableDeviceRef {
    /// Creates a reference to `device`.
    pub fn new(device: CanvasDevice) -> Self {
        Self {
            device: Some(device),
        }
    }

    /// Returns a handle to the device, valid for the rest of the caller's operation.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidState` - If this reference was closed or the
    ///   device has been closed.
    pub fn ensure_not_closed(&self) -> CanvasResult<CanvasDevice> {
        match &self.device {
            Some(device) if !device.is_closed() => Ok(device.clone()),
            Some(_) => Err(CanvasError::closed("CanvasDevice")),
            None => Err(CanvasError::closed("Device reference")),
        }
    }

    /// Releases the reference. Closing twice has no further effect.
    pub fn close(&mut self) {
        self.device = None;
    }

    /// Returns `true` once the reference has been released.
    pub fn is_closed(&self) -> bool {
        self.device.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::null_device;

    #[test]
    fn test_live_device_is_returned() {
        let device = null_device();
        let reference = ClosableDeviceRef::new(device.clone());
        let resolved = reference.ensure_not_closed().unwrap();
        assert!(resolved.ptr_eq(&device));
    }

    #[test]
    fn test_closing_the_device_is_observed() {
        let device = null_device();
        let reference = ClosableDeviceRef::new(device.clone());
        device.close();
        assert!(reference.ensure_not_closed().unwrap_err().is_invalid_state());
        assert!(!reference.is_closed());
    }

    #[test]
    fn test_closed_reference_fails() {
        let mut reference = ClosableDeviceRef::new(null_device());
        reference.close();
        reference.close();
        assert!(reference.is_closed());
        assert!(reference.ensure_not_closed().unwrap_err().is_invalid_state());
    }
}
