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

use super::{NativeCommandList, NativeDeviceContext};
use crate::error::PlatformError;
use std::fmt::Debug;
use std::sync::Arc;

/// A native graphics device able to allocate drawing resources.
///
/// A device is shared between every resource bound to it, so implementations
/// must be usable from any thread.
pub trait NativeDevice: Send + Sync + Debug + 'static {
    /// Allocates a new, empty recording.
    ///
    /// ## Errors
    /// * `PlatformError` - If the backend cannot allocate the recording.
    fn create_command_list(&self) -> Result<Arc<dyn NativeCommandList>, PlatformError>;

    /// Creates a fresh device context with no target set.
    ///
    /// The returned context starts with an identity transform.
    ///
    /// ## Errors
    /// * `PlatformError` - If the backend cannot create the context.
    fn create_device_context(&self) -> Result<Box<dyn NativeDeviceContext>, PlatformError>;

    /// A human-readable name for the backend, used in log output.
    fn backend_name(&self) -> &str;
}
