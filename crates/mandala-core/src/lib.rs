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

//! # Mandala Core
//!
//! Foundational crate containing the shared types and contracts of the
//! mandala renderer: performance tiers, the closed visual-feature set,
//! feature policies, frame metrics, the scene vocabulary, and the event
//! plumbing the governor and its consumers communicate through.

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod motion;
pub mod perf;
pub mod scene;
pub mod time;

pub use error::{GovernorError, GovernorResult};
pub use event::GovernorEvent;
pub use motion::AnimationKind;
pub use perf::{
    FeaturePolicy, FrameMetrics, FrameSample, MetricsSnapshot, PerformanceTier, VisualFeature,
};
pub use scene::{LayerKind, Priority, ZoomLevel};
pub use time::{MonotonicClock, Stopwatch, TickClock};
