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

use crate::error::{CanvasError, CanvasResult};

#[derive(Debug)]
enum ResourceState<T> {
    Open(T),
    Closed,
}

/// Owns a native resource until it is explicitly released.
///
/// Every entry point of a wrapping type goes through [`resource`], which fails
/// with `InvalidState` once [`close`] has been called. Closing is idempotent.
///
/// [`resource`]: ResourceWrapper::resource
/// [`close`]: ResourceWrapper::close
#[derive(Debug)]
pub struct ResourceWrapper<T> {
    state: ResourceState<T>,
    type_name: &'static str,
}

impl<T> ResourceWrapper<T> {
    /// Takes ownership of `resource`. `type_name` is used in error messages.
    pub fn new(resource: T, type_name: &'static str) -> Self {
        Self {
            state: ResourceState::Open(resource),
            type_name,
        }
    }

    /// Returns the wrapped resource.
    ///
    /// ## Errors
    /// * `CanvasError::InvalidState` - If the wrapper has been closed.
    pub fn resource(&self) -> CanvasResult<&T> {
        match &self.state {
            ResourceState::Open(resource) => Ok(resource),
            ResourceState::Closed => Err(CanvasError::closed(self.type_name)),
        }
    }

    /// Returns `true` once the wrapper has been closed.
    pub fn is_closed(&self) -> bool {
        matches!(self.state, ResourceState::Closed)
    }

    /// Releases the resource and returns it. Subsequent calls return `None`.
    pub fn close(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, ResourceState::Closed) {
            ResourceState::Open(resource) => Some(resource),
            ResourceState::Closed => None,
        }
    }
}
