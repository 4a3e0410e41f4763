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

//! Banded tier classification with asymmetric hysteresis.

use mandala_core::perf::metrics::FrameMetrics;
use mandala_core::perf::tier::PerformanceTier;
use serde::{Deserialize, Serialize};

/// One classification band: the entry requirements for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    /// The tier this band admits into.
    pub tier: PerformanceTier,
    /// Minimum effective FPS required.
    pub min_fps: f32,
    /// Dropped-frame count must stay strictly below this.
    pub max_dropped: usize,
}

/// The ordered band table, best tier first.
///
/// Classification walks the table top-down and admits the first band
/// whose requirements the metrics satisfy; metrics that satisfy no band
/// classify as [`PerformanceTier::Emergency`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBands {
    bands: Vec<TierBand>,
}

impl TierBands {
    /// Builds a band table from a best-first band list.
    pub fn new(bands: Vec<TierBand>) -> Self {
        Self { bands }
    }

    /// The default bands.
    pub fn standard() -> Self {
        Self::new(vec![
            TierBand {
                tier: PerformanceTier::Ultra,
                min_fps: 55.0,
                max_dropped: 5,
            },
            TierBand {
                tier: PerformanceTier::High,
                min_fps: 45.0,
                max_dropped: 10,
            },
            TierBand {
                tier: PerformanceTier::Medium,
                min_fps: 35.0,
                max_dropped: 20,
            },
            TierBand {
                tier: PerformanceTier::Low,
                min_fps: 25.0,
                max_dropped: usize::MAX,
            },
        ])
    }

    /// Maps metrics to the tier they currently merit.
    pub fn classify(&self, metrics: &FrameMetrics) -> PerformanceTier {
        for band in &self.bands {
            if metrics.effective_fps >= band.min_fps && metrics.dropped_frames < band.max_dropped {
                return band.tier;
            }
        }
        PerformanceTier::Emergency
    }
}

impl Default for TierBands {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// The band table.
    pub bands: TierBands,
    /// Consecutive confirming evaluations required before an upgrade is
    /// applied. Downgrades are always immediate.
    pub upgrade_confirm_ticks: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            bands: TierBands::standard(),
            // ~0.5s at 60Hz: long enough to ride out band-boundary noise,
            // short enough that recovery is visible.
            upgrade_confirm_ticks: 30,
        }
    }
}

/// Decides the next tier from metrics and the current tier.
///
/// Degradation is applied the moment metrics merit it (the governor's
/// job is resilience), while an upgrade must be observed for
/// [`ClassifierConfig::upgrade_confirm_ticks`] consecutive evaluations
/// so the tier does not oscillate at a band boundary. Either direction
/// may skip levels once it applies.
#[derive(Debug, Clone)]
pub struct TierClassifier {
    config: ClassifierConfig,
    pending_upgrade: Option<(PerformanceTier, u32)>,
}

impl TierClassifier {
    /// Creates a classifier with the given configuration.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            pending_upgrade: None,
        }
    }

    /// The classifier configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Evaluates one tick: returns the tier to be active from now on.
    pub fn evaluate(
        &mut self,
        metrics: &FrameMetrics,
        current: PerformanceTier,
    ) -> PerformanceTier {
        let merited = self.config.bands.classify(metrics);

        if merited < current {
            self.pending_upgrade = None;
            return merited;
        }
        if merited == current {
            self.pending_upgrade = None;
            return current;
        }

        // Upgrade candidate: count consecutive confirmations. A change
        // of candidate restarts the streak.
        let streak = match self.pending_upgrade {
            Some((candidate, n)) if candidate == merited => n + 1,
            _ => 1,
        };

        if streak >= self.config.upgrade_confirm_ticks {
            self.pending_upgrade = None;
            merited
        } else {
            self.pending_upgrade = Some((merited, streak));
            current
        }
    }

    /// Drops any in-progress upgrade streak.
    ///
    /// Called when classification was suspended (manual override) so a
    /// stale streak cannot carry over.
    pub fn reset(&mut self) {
        self.pending_upgrade = None;
    }
}

impl Default for TierClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
