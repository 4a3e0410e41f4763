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

//! The animation request type shared by resolver and scheduler.

use mandala_core::motion::AnimationKind;
use mandala_core::scene::Priority;
use std::time::Duration;

/// A consumer's request to animate an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionRequest {
    /// The kind of motion requested.
    pub kind: AnimationKind,
    /// Scheduling priority of the request.
    pub priority: Priority,
    /// The duration the animation would run at full fidelity.
    pub nominal_duration: Duration,
}

impl MotionRequest {
    /// Convenience constructor.
    pub fn new(kind: AnimationKind, priority: Priority, nominal_duration: Duration) -> Self {
        Self {
            kind,
            priority,
            nominal_duration,
        }
    }
}
