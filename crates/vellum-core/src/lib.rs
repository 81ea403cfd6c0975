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

//! # Vellum Core
//!
//! Recordable drawing surfaces and the contracts they are built on.
//!
//! The central type is [`CommandList`]: drawing sessions record into it, and
//! the first time it is consumed as an image it finalizes its recording. The
//! native graphics API sits behind the traits in [`native`], implemented by a
//! backend crate.

#![warn(missing_docs)]

pub mod command_list;
pub mod device;
pub mod error;
pub mod image;
pub mod math;
pub mod native;
pub mod resource;
pub mod session;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use command_list::{CommandList, FinalizeState};
pub use device::{CanvasDevice, ResourceCreator};
pub use error::{CanvasError, CanvasResult, PlatformError};
pub use image::{CanvasImage, GetImageFlags, RealizedImage};
pub use session::DrawingSession;
pub use settings::{CanvasSettings, DebugLevel};
