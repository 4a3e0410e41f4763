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

//! Frame timing samples and the metrics derived from them.

use crate::perf::tier::PerformanceTier;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A single frame's timing measurement.
///
/// Samples live only inside the governor's bounded window; they are
/// never persisted or shared outside the tick that derived them.
#[derive(Debug, Clone, Copy)]
pub struct FrameSample {
    /// Monotonic capture time.
    pub at: Instant,
    /// Elapsed time since the previous accepted sample.
    pub delta_ms: f32,
}

/// Summary statistics derived from the current sample window.
///
/// Always recomputed from the window, never mutated in place; deriving
/// twice from the same window yields the same values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    /// Reciprocal of the average frame delta, capped at the nominal maximum.
    pub effective_fps: f32,
    /// Samples in the window whose delta exceeded the stall threshold.
    pub dropped_frames: usize,
    /// Mean frame delta across the window.
    pub average_frame_time_ms: f32,
    /// Number of samples the statistics were derived from.
    pub sample_count: usize,
}

impl FrameMetrics {
    /// The neutral value reported before any samples exist.
    ///
    /// An empty window is not a fault; it reads as "nominal" so the
    /// classifier has no reason to downgrade during warm-up.
    pub fn neutral(nominal_max_fps: f32) -> Self {
        Self {
            effective_fps: nominal_max_fps,
            dropped_frames: 0,
            average_frame_time_ms: 1000.0 / nominal_max_fps,
            sample_count: 0,
        }
    }
}

/// Operator-facing snapshot of the governor's current state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Effective frames per second over the current window.
    pub fps: f32,
    /// Dropped-frame count over the current window.
    pub dropped_frames: usize,
    /// Average frame time over the current window.
    pub average_frame_time_ms: f32,
    /// The active tier at snapshot time.
    pub tier: PerformanceTier,
}

impl MetricsSnapshot {
    /// Combines derived metrics with the active tier.
    pub fn new(metrics: &FrameMetrics, tier: PerformanceTier) -> Self {
        Self {
            fps: metrics.effective_fps,
            dropped_frames: metrics.dropped_frames,
            average_frame_time_ms: metrics.average_frame_time_ms,
            tier,
        }
    }
}
