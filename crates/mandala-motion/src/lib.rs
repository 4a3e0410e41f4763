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

//! # Mandala Motion
//!
//! The governor's direct consumers: the layer culling gate, the
//! animation resolver, and the motion scheduler with its stagger
//! orchestration. Everything here is either a pure predicate over the
//! active policy or a bounded queue the render loop drains; nothing in
//! this crate mutates governor state.

#![warn(missing_docs)]

pub mod culling;
pub mod request;
pub mod resolve;
pub mod scheduler;
pub mod stagger;

pub use culling::should_render_layer;
pub use request::MotionRequest;
pub use resolve::{resolve, MotionDecision};
pub use scheduler::{MotionCallback, MotionScheduler, RequestId, SchedulerConfig, SchedulerStats};
pub use stagger::{stagger_delays, submit_staggered};
