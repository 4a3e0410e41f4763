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

//! The closed set of governable visual features.

use crate::error::GovernorError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A visual effect category the governor can enable or disable.
///
/// This is a closed enumeration: adding a feature is a compile-time
/// change that every policy must account for, which is what keeps the
/// policy table total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualFeature {
    /// Slow radial expansion/contraction of the whole mandala.
    BreathingAnimation,
    /// Continuous rotation of the ring layers.
    RotationAnimation,
    /// Drifting particle fields between rings.
    ParticleEffects,
    /// Soft glow filters on ring segments.
    GlowEffects,
    /// Tooltip popups on segment hover.
    HoverTooltips,
    /// Pulsing of the cosmic backdrop.
    BackgroundPulse,
    /// Full-resolution segment geometry instead of simplified arcs.
    DetailedGeometry,
    /// Blend-mode compositing between overlapping layers.
    LayerBlending,
    /// Drop shadows under raised ring segments.
    ShadowEffects,
}

impl VisualFeature {
    /// Number of features in the closed set.
    pub const COUNT: usize = Self::ALL.len();

    /// Every feature, in declaration order.
    pub const ALL: [VisualFeature; 9] = [
        VisualFeature::BreathingAnimation,
        VisualFeature::RotationAnimation,
        VisualFeature::ParticleEffects,
        VisualFeature::GlowEffects,
        VisualFeature::HoverTooltips,
        VisualFeature::BackgroundPulse,
        VisualFeature::DetailedGeometry,
        VisualFeature::LayerBlending,
        VisualFeature::ShadowEffects,
    ];

    /// Dense index used by [`FeaturePolicy`](crate::perf::FeaturePolicy)
    /// for its flag storage.
    pub fn index(self) -> usize {
        match self {
            VisualFeature::BreathingAnimation => 0,
            VisualFeature::RotationAnimation => 1,
            VisualFeature::ParticleEffects => 2,
            VisualFeature::GlowEffects => 3,
            VisualFeature::HoverTooltips => 4,
            VisualFeature::BackgroundPulse => 5,
            VisualFeature::DetailedGeometry => 6,
            VisualFeature::LayerBlending => 7,
            VisualFeature::ShadowEffects => 8,
        }
    }

    /// The stable kebab-case name used at the control boundary.
    pub fn name(self) -> &'static str {
        match self {
            VisualFeature::BreathingAnimation => "breathing-animation",
            VisualFeature::RotationAnimation => "rotation-animation",
            VisualFeature::ParticleEffects => "particle-effects",
            VisualFeature::GlowEffects => "glow-effects",
            VisualFeature::HoverTooltips => "hover-tooltips",
            VisualFeature::BackgroundPulse => "background-pulse",
            VisualFeature::DetailedGeometry => "detailed-geometry",
            VisualFeature::LayerBlending => "layer-blending",
            VisualFeature::ShadowEffects => "shadow-effects",
        }
    }
}

impl Display for VisualFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for VisualFeature {
    type Err = GovernorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisualFeature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| GovernorError::UnknownFeature(s.to_string()))
    }
}
