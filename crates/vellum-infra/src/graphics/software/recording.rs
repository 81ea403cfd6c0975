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

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vellum_core::math::{LinearRgba, Matrix3x2, Rect, Vec2};
use vellum_core::native::{ImageId, NativeCommandList, NativeImage};
use vellum_core::PlatformError;

/// A single operation stored in a [`SoftwareCommandList`].
///
/// Geometry is stored untransformed, together with the transform that was
/// active when the operation was issued.
#[derive(Debug, Clone)]
pub enum RecordedOp {
    /// Clears the whole target. Has no extent of its own.
    Clear {
        /// The clear color.
        color: LinearRgba,
    },
    /// Fills a rectangle.
    FillRectangle {
        /// The rectangle, in the coordinate space of `transform`.
        rect: Rect,
        /// The fill color.
        color: LinearRgba,
        /// The transform active when the operation was issued.
        transform: Matrix3x2,
    },
    /// Strokes a line segment.
    DrawLine {
        /// The start point.
        from: Vec2,
        /// The end point.
        to: Vec2,
        /// The stroke color.
        color: LinearRgba,
        /// The stroke width.
        stroke_width: f32,
        /// The transform active when the operation was issued.
        transform: Matrix3x2,
    },
    /// Draws another image.
    DrawImage {
        /// The image that was drawn.
        image: Arc<dyn NativeImage>,
        /// Where the image origin was placed.
        offset: Vec2,
        /// The transform active when the operation was issued.
        transform: Matrix3x2,
    },
}

impl RecordedOp {
    /// Returns the bounds this operation covers, or `None` if it has no extent.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            RecordedOp::Clear { .. } => None,
            RecordedOp::FillRectangle {
                rect, transform, ..
            } => Some(rect.transform(transform)),
            RecordedOp::DrawLine {
                from,
                to,
                stroke_width,
                transform,
                ..
            } => Some(
                Rect::from_min_max(*from, *to)
                    .inflate(stroke_width * 0.5)
                    .transform(transform),
            ),
            RecordedOp::DrawImage {
                image,
                offset,
                transform,
            } => match image.as_any().downcast_ref::<SoftwareCommandList>() {
                Some(recording) => Some(
                    recording
                        .content_bounds()
                        .translate(*offset)
                        .transform(transform),
                ),
                None => {
                    log::warn!(
                        "SoftwareCommandList: image {:?} has no known bounds; ignoring it.",
                        image.id()
                    );
                    None
                }
            },
        }
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    closed: bool,
    ops: Vec<RecordedOp>,
}

/// An in-memory recording of drawing operations.
#[derive(Debug)]
pub struct SoftwareCommandList {
    id: ImageId,
    state: Mutex<RecordingState>,
    close_calls: AtomicUsize,
}

impl SoftwareCommandList {
    pub(crate) fn new(id: ImageId) -> Self {
        Self {
            id,
            state: Mutex::new(RecordingState::default()),
            close_calls: AtomicUsize::new(0),
        }
    }

    // A panic while holding the lock cannot leave the op list half-written.
    fn state(&self) -> MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `op` to the recording.
    ///
    /// ## Errors
    /// * `PlatformError::WrongState` - If the recording has been closed.
    pub(crate) fn record(&self, op: RecordedOp) -> Result<(), PlatformError> {
        let mut state = self.state();
        if state.closed {
            return Err(PlatformError::WrongState);
        }
        state.ops.push(op);
        Ok(())
    }

    /// Returns `true` once the recording has been closed.
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    /// Returns a copy of the recorded operations.
    pub fn ops(&self) -> Vec<RecordedOp> {
        self.state().ops.clone()
    }

    /// Returns the number of recorded operations.
    pub fn op_count(&self) -> usize {
        self.state().ops.len()
    }

    /// Returns how many times [`close`](NativeCommandList::close) has been called,
    /// including calls that failed.
    pub fn close_call_count(&self) -> usize {
        self.close_calls.load(Ordering::Acquire)
    }

    /// Returns the union of the bounds of every recorded operation.
    ///
    /// A recording with no measurable content reports [`Rect::ZERO`].
    pub fn content_bounds(&self) -> Rect {
        let ops = self.ops();
        let bounds = ops
            .iter()
            .filter_map(RecordedOp::bounds)
            .fold(Rect::INVALID, |acc, r| acc.union(&r));
        if bounds.is_valid() {
            bounds
        } else {
            Rect::ZERO
        }
    }
}

impl NativeImage for SoftwareCommandList {
    fn id(&self) -> ImageId {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl NativeCommandList for SoftwareCommandList {
    fn close(&self) -> Result<(), PlatformError> {
        self.close_calls.fetch_add(1, Ordering::AcqRel);
        let mut state = self.state();
        if state.closed {
            return Err(PlatformError::WrongState);
        }
        state.closed = true;
        log::debug!(
            "SoftwareCommandList: closed recording {:?} with {} operations",
            self.id,
            state.ops.len()
        );
        Ok(())
    }

    fn into_image(self: Arc<Self>) -> Arc<dyn NativeImage> {
        self
    }
}
