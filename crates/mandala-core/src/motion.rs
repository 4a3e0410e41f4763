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

//! Animation kinds and their mapping onto governable features.

use crate::perf::feature::VisualFeature;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The kind of motion a consumer wants to apply to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Slow radial breathing of the whole mandala.
    Breathing,
    /// Continuous ring rotation.
    Rotation,
    /// Rhythmic pulsing, usually of the backdrop.
    Pulse,
    /// Hover feedback on a segment.
    Hover,
    /// Cross-fade between layer states (e.g. a zoom change).
    Transition,
    /// Particle drift between rings.
    Particle,
}

impl AnimationKind {
    /// The feature flag that gates this kind of motion.
    ///
    /// The match is exhaustive on purpose: a new animation kind cannot
    /// ship without declaring which policy flag governs it.
    pub fn governing_feature(self) -> VisualFeature {
        match self {
            AnimationKind::Breathing => VisualFeature::BreathingAnimation,
            AnimationKind::Rotation => VisualFeature::RotationAnimation,
            AnimationKind::Pulse => VisualFeature::BackgroundPulse,
            AnimationKind::Hover => VisualFeature::HoverTooltips,
            AnimationKind::Transition => VisualFeature::LayerBlending,
            AnimationKind::Particle => VisualFeature::ParticleEffects,
        }
    }
}

impl Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnimationKind::Breathing => "breathing",
            AnimationKind::Rotation => "rotation",
            AnimationKind::Pulse => "pulse",
            AnimationKind::Hover => "hover",
            AnimationKind::Transition => "transition",
            AnimationKind::Particle => "particle",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_governing_feature() {
        let kinds = [
            AnimationKind::Breathing,
            AnimationKind::Rotation,
            AnimationKind::Pulse,
            AnimationKind::Hover,
            AnimationKind::Transition,
            AnimationKind::Particle,
        ];
        for kind in kinds {
            // The call itself proves totality; also check the obvious pairs.
            let _ = kind.governing_feature();
        }
        assert_eq!(
            AnimationKind::Particle.governing_feature(),
            VisualFeature::ParticleEffects
        );
        assert_eq!(
            AnimationKind::Breathing.governing_feature(),
            VisualFeature::BreathingAnimation
        );
    }
}
