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

use crate::error::CanvasResult;
use crate::native::NativeDeviceContext;
use std::fmt::Debug;

/// Target-specific bookkeeping performed around a drawing session.
///
/// Window-backed targets need to present a swap chain when drawing ends; an
/// offscreen target such as a recording only needs the batch closed.
pub trait DrawingSessionAdapter: Send + Debug {
    /// Called once when the session is closed, with the session's context.
    fn end_draw(&mut self, context: &mut dyn NativeDeviceContext) -> CanvasResult<()>;
}

/// An adapter that begins drawing on creation and ends it on close, and does
/// nothing else.
#[derive(Debug, Default)]
pub struct SimpleDrawingSessionAdapter {
    _private: (),
}

impl SimpleDrawingSessionAdapter {
    /// Begins a drawing batch on `context` and returns the adapter that will end it.
    pub fn begin(context: &mut dyn NativeDeviceContext) -> Self {
        context.begin_draw();
        Self { _private: () }
    }
}

impl DrawingSessionAdapter for SimpleDrawingSessionAdapter {
    fn end_draw(&mut self, context: &mut dyn NativeDeviceContext) -> CanvasResult<()> {
        Ok(context.end_draw()?)
    }
}
