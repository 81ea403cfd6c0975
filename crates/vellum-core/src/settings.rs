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

//! Settings shared by a device and the resources created from it.

use serde::{Deserialize, Serialize};

/// How much validation output a backend should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugLevel {
    /// No validation output.
    #[default]
    None,
    /// Only misuse that makes an operation fail.
    Error,
    /// Misuse that is tolerated but probably unintended.
    Warning,
    /// Everything, including routine lifecycle events.
    Information,
}

/// A collection of settings applied by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// The DPI assigned to device contexts created for drawing sessions.
    pub default_dpi: f32,
    /// The validation level requested from the backend.
    pub debug_level: DebugLevel,
}

impl CanvasSettings {
    /// The DPI at which one device-independent pixel equals one physical pixel.
    pub const DEFAULT_DPI: f32 = 96.0;

    /// Parses settings from a JSON document. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Returns `true` if messages at `level` should be emitted.
    pub fn reports(&self, level: DebugLevel) -> bool {
        level != DebugLevel::None && level <= self.debug_level
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            default_dpi: Self::DEFAULT_DPI,
            debug_level: DebugLevel::None,
        }
    }
}
