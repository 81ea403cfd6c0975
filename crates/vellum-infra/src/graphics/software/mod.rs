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

//! A CPU-only backend that keeps recordings in memory.
//!
//! Nothing is rasterized. Recordings store the operations issued into them,
//! which is enough to measure bounds, replay nested recordings and observe the
//! finalization protocol. Native close semantics are enforced: closing a
//! recording twice reports `PlatformError::WrongState`. Drawing into a closed
//! recording, or drawing a recording that is still open, fails when the
//! drawing batch ends.

mod context;
mod device;
mod recording;

pub use self::context::SoftwareDeviceContext;
pub use self::device::SoftwareDevice;
pub use self::recording::{RecordedOp, SoftwareCommandList};
