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

//! The ordered performance-tier enumeration.

use crate::error::GovernorError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A discrete rendering-quality level assigned by the governor.
///
/// Variants are declared worst-first so the derived [`Ord`] gives the
/// total order `Emergency < Low < Medium < High < Ultra`. The governor
/// only ever moves along this order; consumers may rely on comparisons
/// like `tier >= PerformanceTier::Medium`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PerformanceTier {
    /// Rendering is barely keeping up. Everything non-essential is off.
    Emergency,
    /// Degraded: decorative motion suppressed, geometry simplified.
    Low,
    /// Reduced effects, shortened animations.
    Medium,
    /// Near-nominal rendering with minor trimming.
    High,
    /// Full visual fidelity, no throttling.
    Ultra,
}

impl PerformanceTier {
    /// All tiers in ascending order (worst first).
    pub const ALL: [PerformanceTier; 5] = [
        PerformanceTier::Emergency,
        PerformanceTier::Low,
        PerformanceTier::Medium,
        PerformanceTier::High,
        PerformanceTier::Ultra,
    ];

    /// The stable lowercase name used at the control boundary.
    pub fn name(self) -> &'static str {
        match self {
            PerformanceTier::Emergency => "emergency",
            PerformanceTier::Low => "low",
            PerformanceTier::Medium => "medium",
            PerformanceTier::High => "high",
            PerformanceTier::Ultra => "ultra",
        }
    }
}

impl Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PerformanceTier {
    type Err = GovernorError;

    /// Parses an operator-supplied tier name, case-insensitively.
    ///
    /// Unknown names are rejected with [`GovernorError::UnknownTier`] so
    /// an invalid pin request never reaches the governor state machine.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "emergency" => Ok(PerformanceTier::Emergency),
            "low" => Ok(PerformanceTier::Low),
            "medium" => Ok(PerformanceTier::Medium),
            "high" => Ok(PerformanceTier::High),
            "ultra" => Ok(PerformanceTier::Ultra),
            other => Err(GovernorError::UnknownTier(other.to_string())),
        }
    }
}
