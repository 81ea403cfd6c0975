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

use crate::error::PlatformError;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// An opaque identifier for a native image, unique within its device.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// A native object that can be drawn as an image.
pub trait NativeImage: Send + Sync + Debug {
    /// Returns the identifier of this image.
    fn id(&self) -> ImageId;

    /// Returns the underlying object as `Any`, so a backend can recover its own type.
    fn as_any(&self) -> &dyn Any;
}

/// A native recording of drawing operations.
///
/// While open, a recording can be the target of device contexts. Once closed
/// it stops recording and becomes a static, replayable image.
pub trait NativeCommandList: NativeImage {
    /// Finalizes the recording.
    ///
    /// ## Errors
    /// * `PlatformError::WrongState` - If the recording was already closed,
    ///   possibly by a party other than the current caller.
    /// * Any other `PlatformError` - If the backend failed to finalize it.
    fn close(&self) -> Result<(), PlatformError>;

    /// Returns this recording viewed as a drawable image.
    fn into_image(self: Arc<Self>) -> Arc<dyn NativeImage>;
}
