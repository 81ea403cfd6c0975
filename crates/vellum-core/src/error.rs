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

//! Defines the error types surfaced by drawing resources and their backends.

use std::fmt;

/// Message attached to [`CanvasError::CommandListConsumed`].
pub const COMMAND_LIST_CONSUMED_MESSAGE: &str =
    "Cannot draw into a command list after it has been used";

/// A status reported by a native graphics backend.
///
/// These mirror the failure codes a platform drawing API can return. Wrappers
/// decide which of them are expected outcomes and which are surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The object is not in a state that allows the operation.
    ///
    /// Closing an already-closed recording reports this status.
    WrongState,
    /// The backend could not allocate the requested object.
    OutOfMemory,
    /// The device backing the object was removed or reset.
    DeviceRemoved,
    /// Any other backend-specific failure.
    Backend(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::WrongState => {
                write!(f, "The object was not in the correct state to process the method.")
            }
            PlatformError::OutOfMemory => write!(f, "The backend ran out of memory."),
            PlatformError::DeviceRemoved => {
                write!(f, "The graphics device was removed and must be recreated.")
            }
            PlatformError::Backend(msg) => write!(f, "Backend-specific error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// A high-level error returned by canvas resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// A required argument was missing or malformed.
    InvalidArgument(String),
    /// The operation was attempted on a closed object, or on an object whose
    /// device has been closed.
    InvalidState(String),
    /// A drawing session was requested from a command list that has already
    /// been consumed as an image.
    CommandListConsumed,
    /// A native backend call failed.
    Platform(PlatformError),
}

impl CanvasError {
    /// Builds the invalid-state error reported when a closed object is used.
    pub fn closed(what: &str) -> Self {
        CanvasError::InvalidState(format!("{what} has been closed"))
    }

    /// Returns `true` for [`CanvasError::InvalidState`].
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, CanvasError::InvalidState(_))
    }

    /// Returns `true` for [`CanvasError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CanvasError::InvalidArgument(_))
    }
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            CanvasError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
            CanvasError::CommandListConsumed => write!(f, "{COMMAND_LIST_CONSUMED_MESSAGE}"),
            CanvasError::Platform(err) => write!(f, "Platform operation failed: {err}"),
        }
    }
}

impl std::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CanvasError::Platform(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PlatformError> for CanvasError {
    fn from(err: PlatformError) -> Self {
        CanvasError::Platform(err)
    }
}

/// A specialized `Result` for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn canvas_error_display() {
        assert_eq!(
            CanvasError::closed("CommandList").to_string(),
            "Invalid state: CommandList has been closed"
        );
        assert_eq!(
            CanvasError::CommandListConsumed.to_string(),
            COMMAND_LIST_CONSUMED_MESSAGE
        );
        assert_eq!(
            CanvasError::InvalidArgument("resource_creator".to_string()).to_string(),
            "Invalid argument: resource_creator"
        );
    }

    #[test]
    fn platform_error_is_source() {
        let err: CanvasError = PlatformError::DeviceRemoved.into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("removed"));
        assert!(CanvasError::CommandListConsumed.source().is_none());
    }

    #[test]
    fn consumed_is_distinct_from_invalid_state() {
        assert!(!CanvasError::CommandListConsumed.is_invalid_state());
        assert!(CanvasError::closed("x").is_invalid_state());
        assert!(CanvasError::InvalidArgument(String::new()).is_invalid_argument());
    }
}
