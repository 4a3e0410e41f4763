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

//! The immutable per-tier feature policy bundle.

use crate::perf::feature::VisualFeature;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The configuration bundle a tier grants to the rendering layer.
///
/// Policies are static data: the governor only moves its *active tier*
/// pointer between them, it never mutates a policy at runtime. The flag
/// storage is indexed by [`VisualFeature::index`], so a policy is total
/// over the feature set by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePolicy {
    enabled: [bool; VisualFeature::COUNT],
    /// Multiplier applied to a requested animation's nominal duration.
    pub animation_duration_scale: f64,
    /// Multiplier applied to a requested polling/refresh interval.
    ///
    /// Values above 1.0 stretch the interval (fewer refreshes), which is
    /// why this scale grows as tiers degrade while the duration scale
    /// shrinks.
    pub throttle_interval_scale: f64,
    /// Target frame time for this tier.
    pub frame_budget_ms: f64,
}

impl FeaturePolicy {
    /// Builds a policy, deriving every flag from `enabled_for`.
    ///
    /// The closure is invoked once per [`VisualFeature`], so a caller
    /// cannot produce a partial policy.
    pub fn new(
        enabled_for: impl Fn(VisualFeature) -> bool,
        animation_duration_scale: f64,
        throttle_interval_scale: f64,
        frame_budget_ms: f64,
    ) -> Self {
        let mut enabled = [false; VisualFeature::COUNT];
        for feature in VisualFeature::ALL {
            enabled[feature.index()] = enabled_for(feature);
        }
        Self {
            enabled,
            animation_duration_scale,
            throttle_interval_scale,
            frame_budget_ms,
        }
    }

    /// Whether the given feature is enabled under this policy.
    pub fn is_enabled(&self, feature: VisualFeature) -> bool {
        self.enabled[feature.index()]
    }

    /// Number of enabled features.
    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|&&on| on).count()
    }

    /// Scales a nominal animation duration by this policy.
    pub fn scale_duration(&self, nominal: Duration) -> Duration {
        scale(nominal, self.animation_duration_scale)
    }

    /// Scales a nominal polling/refresh interval by this policy.
    pub fn scale_interval(&self, nominal: Duration) -> Duration {
        scale(nominal, self.throttle_interval_scale)
    }
}

/// Multiplies a duration in whole-nanosecond space.
///
/// Rounding to the nearest nanosecond keeps exact inputs exact (half an
/// 800ms animation is 400ms, not 400ms ± 1ns of float noise).
fn scale(nominal: Duration, factor: f64) -> Duration {
    Duration::from_nanos((nominal.as_nanos() as f64 * factor).round() as u64)
}
