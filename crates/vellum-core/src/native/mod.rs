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

//! Backend seam between canvas resources and a native drawing API.
//!
//! Canvas resources never talk to a platform API directly. They hold the
//! objects defined here, which a backend crate implements. The traits mirror
//! the small subset of a native 2D API that recording surfaces need: a device
//! that allocates recordings and device contexts, a recording that can be
//! finalized once, and a device context that issues drawing operations
//! against a target.

mod context;
mod device;
mod recording;

pub use self::context::*;
pub use self::device::*;
pub use self::recording::*;
