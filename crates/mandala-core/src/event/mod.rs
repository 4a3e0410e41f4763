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

//! Governor event types and the fan-out hub they travel over.

pub mod hub;

pub use hub::EventHub;

use crate::perf::metrics::MetricsSnapshot;
use crate::perf::tier::PerformanceTier;

/// A state transition announced by the governor.
///
/// Consumers subscribe instead of re-polling every tick; a status
/// indicator only needs to react when one of these arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum GovernorEvent {
    /// The active tier changed as a result of classification.
    TierChanged {
        /// Tier before the transition.
        previous: PerformanceTier,
        /// Tier after the transition.
        current: PerformanceTier,
        /// Metrics that drove the transition.
        snapshot: MetricsSnapshot,
    },
    /// An operator pinned the tier; classification is suspended.
    OverridePinned {
        /// The pinned tier.
        tier: PerformanceTier,
    },
    /// The operator pin was released; classification resumed.
    OverrideReleased {
        /// The tier classification resumed at.
        resumed: PerformanceTier,
    },
}
