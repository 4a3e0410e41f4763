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

//! The animation resolver: whether to animate, and for how long.

use crate::request::MotionRequest;
use mandala_core::perf::policy::FeaturePolicy;
use std::time::Duration;

/// How a requested animation should be rendered.
///
/// `Static` never means "omit the element": the wrapped content still
/// renders, it simply does not move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionDecision {
    /// Animate with the policy-scaled duration.
    Animate {
        /// The effective duration after scaling.
        duration: Duration,
    },
    /// Render the content without motion.
    Static,
}

impl MotionDecision {
    /// Whether the element will actually move.
    pub fn is_animated(&self) -> bool {
        matches!(self, MotionDecision::Animate { .. })
    }
}

/// Resolves a motion request against the active policy.
///
/// Precedence, strongest veto first: the user's reduced-motion
/// preference, then an explicit caller-supplied render condition, then
/// the policy flag for the kind's governing feature. None of the vetoes
/// is an error; they all resolve to the static path.
pub fn resolve(
    request: &MotionRequest,
    policy: &FeaturePolicy,
    prefers_reduced_motion: bool,
    render_condition: bool,
) -> MotionDecision {
    if prefers_reduced_motion || !render_condition {
        return MotionDecision::Static;
    }
    if !policy.is_enabled(request.kind.governing_feature()) {
        return MotionDecision::Static;
    }
    MotionDecision::Animate {
        duration: policy.scale_duration(request.nominal_duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandala_core::motion::AnimationKind;
    use mandala_core::perf::tier::PerformanceTier;
    use mandala_core::scene::Priority;
    use mandala_governor::PolicyTable;

    fn request(kind: AnimationKind) -> MotionRequest {
        MotionRequest::new(kind, Priority::Low, Duration::from_millis(800))
    }

    #[test]
    fn test_disabled_feature_resolves_static_not_absent() {
        let table = PolicyTable::standard();
        let policy = table.policy(PerformanceTier::Emergency);
        let decision = resolve(&request(AnimationKind::Particle), policy, false, true);
        // Static is still a render decision; the content stays.
        assert_eq!(decision, MotionDecision::Static);
    }

    #[test]
    fn test_enabled_feature_animates_with_scaled_duration() {
        let table = PolicyTable::standard();
        let policy = table.policy(PerformanceTier::Medium);
        let decision = resolve(&request(AnimationKind::Breathing), policy, false, true);
        match decision {
            MotionDecision::Animate { duration } => {
                assert_eq!(duration, policy.scale_duration(Duration::from_millis(800)));
                assert!(duration < Duration::from_millis(800));
            }
            MotionDecision::Static => panic!("breathing is enabled at medium"),
        }
    }

    #[test]
    fn test_ultra_animates_at_nominal_duration() {
        let table = PolicyTable::standard();
        let policy = table.policy(PerformanceTier::Ultra);
        let decision = resolve(&request(AnimationKind::Rotation), policy, false, true);
        assert_eq!(
            decision,
            MotionDecision::Animate {
                duration: Duration::from_millis(800)
            }
        );
    }

    #[test]
    fn test_reduced_motion_overrides_any_tier() {
        let table = PolicyTable::standard();
        let policy = table.policy(PerformanceTier::Ultra);
        let decision = resolve(&request(AnimationKind::Breathing), policy, true, true);
        assert_eq!(decision, MotionDecision::Static);
    }

    #[test]
    fn test_caller_condition_vetoes_independently() {
        let table = PolicyTable::standard();
        let policy = table.policy(PerformanceTier::Ultra);
        let decision = resolve(&request(AnimationKind::Pulse), policy, false, false);
        assert_eq!(decision, MotionDecision::Static);
    }
}
