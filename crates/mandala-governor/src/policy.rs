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

//! The static tier-to-policy table.

use mandala_core::perf::feature::VisualFeature;
use mandala_core::perf::policy::FeaturePolicy;
use mandala_core::perf::tier::PerformanceTier;

/// Total mapping from tier to its [`FeaturePolicy`].
///
/// Built once per governor from one exhaustive match, so every (tier,
/// feature) pair is decided at compile time; the table itself never
/// changes, only the governor's active-tier pointer into it.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    policies: [FeaturePolicy; PerformanceTier::ALL.len()],
}

impl PolicyTable {
    /// Builds the standard table.
    pub fn standard() -> Self {
        let build = |tier: PerformanceTier| {
            FeaturePolicy::new(
                move |feature| feature_enabled(tier, feature),
                duration_scale(tier),
                interval_scale(tier),
                frame_budget_ms(tier),
            )
        };
        Self {
            policies: PerformanceTier::ALL.map(build),
        }
    }

    /// The policy for a tier.
    pub fn policy(&self, tier: PerformanceTier) -> &FeaturePolicy {
        &self.policies[tier_index(tier)]
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn tier_index(tier: PerformanceTier) -> usize {
    match tier {
        PerformanceTier::Emergency => 0,
        PerformanceTier::Low => 1,
        PerformanceTier::Medium => 2,
        PerformanceTier::High => 3,
        PerformanceTier::Ultra => 4,
    }
}

/// Whether `feature` is enabled at `tier`.
///
/// Both matches are exhaustive: adding a tier or a feature will not
/// compile until this table accounts for it.
fn feature_enabled(tier: PerformanceTier, feature: VisualFeature) -> bool {
    match tier {
        // Everything non-essential is off; the rings render as flat
        // static geometry.
        PerformanceTier::Emergency => match feature {
            VisualFeature::BreathingAnimation
            | VisualFeature::RotationAnimation
            | VisualFeature::ParticleEffects
            | VisualFeature::GlowEffects
            | VisualFeature::HoverTooltips
            | VisualFeature::BackgroundPulse
            | VisualFeature::DetailedGeometry
            | VisualFeature::LayerBlending
            | VisualFeature::ShadowEffects => false,
        },
        // Decorative motion suppressed; hover feedback survives because
        // the cursor still needs to communicate interactivity.
        PerformanceTier::Low => matches!(feature, VisualFeature::HoverTooltips),
        PerformanceTier::Medium => match feature {
            VisualFeature::BreathingAnimation
            | VisualFeature::RotationAnimation
            | VisualFeature::HoverTooltips
            | VisualFeature::DetailedGeometry => true,
            VisualFeature::ParticleEffects
            | VisualFeature::GlowEffects
            | VisualFeature::BackgroundPulse
            | VisualFeature::LayerBlending
            | VisualFeature::ShadowEffects => false,
        },
        // Particles are the single most expensive effect; they are the
        // only thing High gives up.
        PerformanceTier::High => !matches!(feature, VisualFeature::ParticleEffects),
        PerformanceTier::Ultra => match feature {
            VisualFeature::BreathingAnimation
            | VisualFeature::RotationAnimation
            | VisualFeature::ParticleEffects
            | VisualFeature::GlowEffects
            | VisualFeature::HoverTooltips
            | VisualFeature::BackgroundPulse
            | VisualFeature::DetailedGeometry
            | VisualFeature::LayerBlending
            | VisualFeature::ShadowEffects => true,
        },
    }
}

fn duration_scale(tier: PerformanceTier) -> f64 {
    match tier {
        PerformanceTier::Emergency => 0.25,
        PerformanceTier::Low => 0.4,
        PerformanceTier::Medium => 0.6,
        PerformanceTier::High => 0.85,
        PerformanceTier::Ultra => 1.0,
    }
}

fn interval_scale(tier: PerformanceTier) -> f64 {
    match tier {
        PerformanceTier::Emergency => 4.0,
        PerformanceTier::Low => 3.0,
        PerformanceTier::Medium => 2.0,
        PerformanceTier::High => 1.25,
        PerformanceTier::Ultra => 1.0,
    }
}

fn frame_budget_ms(tier: PerformanceTier) -> f64 {
    match tier {
        PerformanceTier::Emergency => 66.67,
        PerformanceTier::Low => 40.0,
        PerformanceTier::Medium => 28.57,
        PerformanceTier::High => 20.0,
        PerformanceTier::Ultra => 16.67,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_every_tier_defines_every_flag() {
        let table = PolicyTable::standard();
        for tier in PerformanceTier::ALL {
            let policy = table.policy(tier);
            for feature in VisualFeature::ALL {
                // is_enabled is total; the call itself is the assertion.
                let _ = policy.is_enabled(feature);
            }
        }
    }

    #[test]
    fn test_emergency_disables_everything() {
        let table = PolicyTable::standard();
        let policy = table.policy(PerformanceTier::Emergency);
        assert_eq!(policy.enabled_count(), 0);
    }

    #[test]
    fn test_ultra_enables_everything() {
        let table = PolicyTable::standard();
        let policy = table.policy(PerformanceTier::Ultra);
        assert_eq!(policy.enabled_count(), VisualFeature::COUNT);
    }

    #[test]
    fn test_enabled_count_grows_with_tier() {
        let table = PolicyTable::standard();
        for pair in PerformanceTier::ALL.windows(2) {
            assert!(
                table.policy(pair[0]).enabled_count() <= table.policy(pair[1]).enabled_count(),
                "{} enables more features than {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_duration_never_scales_up() {
        let table = PolicyTable::standard();
        let nominal = Duration::from_millis(800);
        for tier in PerformanceTier::ALL {
            let scaled = table.policy(tier).scale_duration(nominal);
            assert!(scaled <= nominal, "{tier} stretched an animation");
        }
        assert_eq!(
            table.policy(PerformanceTier::Ultra).scale_duration(nominal),
            nominal
        );
    }

    #[test]
    fn test_intervals_stretch_as_tiers_degrade() {
        let table = PolicyTable::standard();
        for pair in PerformanceTier::ALL.windows(2) {
            assert!(
                table.policy(pair[0]).throttle_interval_scale
                    >= table.policy(pair[1]).throttle_interval_scale
            );
        }
        assert_eq!(table.policy(PerformanceTier::Ultra).throttle_interval_scale, 1.0);
    }

    #[test]
    fn test_frame_budgets_tighten_as_tiers_improve() {
        let table = PolicyTable::standard();
        for pair in PerformanceTier::ALL.windows(2) {
            assert!(table.policy(pair[0]).frame_budget_ms >= table.policy(pair[1]).frame_budget_ms);
        }
    }

    #[test]
    fn test_high_only_gives_up_particles() {
        let table = PolicyTable::standard();
        let policy = table.policy(PerformanceTier::High);
        assert!(!policy.is_enabled(VisualFeature::ParticleEffects));
        assert_eq!(policy.enabled_count(), VisualFeature::COUNT - 1);
    }
}
