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

//! The governor: one closed control loop per rendering session.

use crate::aggregator::{AggregatorConfig, MetricsAggregator};
use crate::classifier::{ClassifierConfig, TierClassifier};
use crate::policy::PolicyTable;
use crate::sampler::FrameSampler;
use crossbeam_channel::{Receiver, Sender};
use mandala_core::error::{GovernorError, GovernorResult};
use mandala_core::event::{EventHub, GovernorEvent};
use mandala_core::perf::feature::VisualFeature;
use mandala_core::perf::metrics::{FrameMetrics, MetricsSnapshot};
use mandala_core::perf::policy::FeaturePolicy;
use mandala_core::perf::tier::PerformanceTier;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Configuration for a governor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Aggregation thresholds.
    pub aggregator: AggregatorConfig,
    /// Classification bands and hysteresis.
    pub classifier: ClassifierConfig,
    /// Tier assumed before the first measurement window fills.
    pub initial_tier: PerformanceTier,
    /// Capacity of the operator command channel. Commands past this
    /// are rejected at the sender rather than buffered without bound.
    pub control_buffer_size: usize,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            aggregator: AggregatorConfig::default(),
            classifier: ClassifierConfig::default(),
            initial_tier: PerformanceTier::High,
            control_buffer_size: 32,
        }
    }
}

impl GovernorConfig {
    /// Loads a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Saves this configuration to a JSON file.
    pub fn to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// A command from the operator-facing control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlCommand {
    Pin(PerformanceTier),
    Release,
}

/// Cloneable handle for submitting operator commands to a governor.
///
/// Commands are buffered and applied at the governor's next tick
/// boundary, so a toggle on another thread never races the render loop.
#[derive(Debug, Clone)]
pub struct GovernorHandle {
    tx: Sender<ControlCommand>,
}

impl GovernorHandle {
    /// Requests that the tier be pinned.
    pub fn pin(&self, tier: PerformanceTier) -> GovernorResult<()> {
        self.send(ControlCommand::Pin(tier))
    }

    /// Requests a pin by tier name, validating the name first.
    ///
    /// An unknown name is rejected here, before anything is enqueued;
    /// the governor's state is untouched.
    pub fn pin_by_name(&self, name: &str) -> GovernorResult<()> {
        self.pin(name.parse()?)
    }

    /// Requests that any pin be released.
    pub fn release(&self) -> GovernorResult<()> {
        self.send(ControlCommand::Release)
    }

    fn send(&self, command: ControlCommand) -> GovernorResult<()> {
        self.tx.try_send(command).map_err(|e| match e {
            crossbeam_channel::TrySendError::Full(_) => GovernorError::ControlBacklogFull,
            crossbeam_channel::TrySendError::Disconnected(_) => {
                GovernorError::ControlChannelClosed
            }
        })
    }
}

/// Whether classification is live or suspended behind a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Auto,
    Pinned(PerformanceTier),
}

/// The adaptive performance governor.
///
/// Owns the sample window and the active-tier state machine. Exactly
/// one instance exists per rendering session; consumers hold `&Governor`
/// (or a [`GovernorHandle`] for control) and never mutate shared state
/// directly. All mutation happens inside [`tick`](Self::tick), which the
/// host's per-frame callback drives, so within one tick sampling always
/// precedes classification and classification precedes any consumer
/// read.
#[derive(Debug)]
pub struct Governor {
    sampler: FrameSampler,
    aggregator: MetricsAggregator,
    classifier: TierClassifier,
    policies: PolicyTable,
    mode: Mode,
    /// Last tier produced by classification (the tier `release` resumes at).
    auto_tier: PerformanceTier,
    last_metrics: FrameMetrics,
    events: EventHub<GovernorEvent>,
    control_rx: Receiver<ControlCommand>,
    control_tx: Sender<ControlCommand>,
}

impl Governor {
    /// Creates a governor for a new rendering session.
    pub fn new(config: GovernorConfig) -> Self {
        let (control_tx, control_rx) = crossbeam_channel::bounded(config.control_buffer_size);
        let initial_metrics = FrameMetrics::neutral(config.aggregator.nominal_max_fps);
        log::info!(
            "Governor: session started at tier '{}' pending first window.",
            config.initial_tier
        );
        Self {
            sampler: FrameSampler::new(),
            aggregator: MetricsAggregator::new(config.aggregator),
            classifier: TierClassifier::new(config.classifier),
            policies: PolicyTable::standard(),
            mode: Mode::Auto,
            auto_tier: config.initial_tier,
            last_metrics: initial_metrics,
            events: EventHub::new(),
            control_rx,
            control_tx,
        }
    }

    /// Returns a cloneable control handle for operator toggles.
    pub fn handle(&self) -> GovernorHandle {
        GovernorHandle {
            tx: self.control_tx.clone(),
        }
    }

    /// Subscribes to governor events.
    pub fn subscribe(&mut self) -> flume::Receiver<GovernorEvent> {
        self.events.subscribe()
    }

    /// Runs one tick of the control loop.
    ///
    /// Order within the tick: drain operator commands, sample, derive
    /// metrics, classify (skipped entirely while pinned), publish a
    /// [`GovernorEvent::TierChanged`] if the tier moved. The active tier
    /// is stable for the remainder of the frame.
    pub fn tick(&mut self, now: Instant) {
        self.drain_control();

        self.sampler.record(now);
        self.last_metrics = self.aggregator.aggregate(self.sampler.window());

        if self.mode != Mode::Auto {
            // Pinned: the operator's tier is authoritative. Sampling
            // continues so release resumes on fresh data.
            return;
        }

        let next = self.classifier.evaluate(&self.last_metrics, self.auto_tier);
        if next != self.auto_tier {
            let previous = self.auto_tier;
            self.auto_tier = next;
            if next < previous {
                log::warn!(
                    "Governor: degraded '{previous}' → '{next}' ({:.1} fps, {} drops).",
                    self.last_metrics.effective_fps,
                    self.last_metrics.dropped_frames
                );
            } else {
                log::info!(
                    "Governor: recovered '{previous}' → '{next}' ({:.1} fps).",
                    self.last_metrics.effective_fps
                );
            }
            let snapshot = MetricsSnapshot::new(&self.last_metrics, next);
            self.events.publish(GovernorEvent::TierChanged {
                previous,
                current: next,
                snapshot,
            });
        }
    }

    fn drain_control(&mut self) {
        while let Ok(command) = self.control_rx.try_recv() {
            match command {
                ControlCommand::Pin(tier) => self.pin_tier(tier),
                ControlCommand::Release => self.release_pin(),
            }
        }
    }

    /// Pins the active tier, bypassing classification.
    ///
    /// Re-pinning the already-pinned tier is a no-op.
    pub fn pin_tier(&mut self, tier: PerformanceTier) {
        if self.mode == Mode::Pinned(tier) {
            return;
        }
        log::info!("Governor: tier pinned to '{tier}'.");
        self.mode = Mode::Pinned(tier);
        self.events.publish(GovernorEvent::OverridePinned { tier });
    }

    /// Pins by tier name, rejecting unknown names with prior state retained.
    pub fn pin_tier_by_name(&mut self, name: &str) -> GovernorResult<()> {
        let tier = name.parse()?;
        self.pin_tier(tier);
        Ok(())
    }

    /// Releases a pin, resuming at the last auto-classified tier.
    ///
    /// A no-op when nothing is pinned.
    pub fn release_pin(&mut self) {
        if let Mode::Pinned(tier) = self.mode {
            self.mode = Mode::Auto;
            // Any pre-pin upgrade streak is stale by now.
            self.classifier.reset();
            log::info!(
                "Governor: pin '{tier}' released, resuming at '{}'.",
                self.auto_tier
            );
            self.events.publish(GovernorEvent::OverrideReleased {
                resumed: self.auto_tier,
            });
        }
    }

    /// Whether an operator pin is active.
    pub fn is_pinned(&self) -> bool {
        matches!(self.mode, Mode::Pinned(_))
    }

    /// The tier currently governing rendering.
    pub fn active_tier(&self) -> PerformanceTier {
        match self.mode {
            Mode::Pinned(tier) => tier,
            Mode::Auto => self.auto_tier,
        }
    }

    /// The feature policy of the active tier.
    pub fn policy(&self) -> &FeaturePolicy {
        self.policies.policy(self.active_tier())
    }

    /// Whether a feature is enabled under the active policy.
    pub fn is_feature_enabled(&self, feature: VisualFeature) -> bool {
        self.policy().is_enabled(feature)
    }

    /// Scales an animation duration by the active policy.
    pub fn scale_duration(&self, nominal: Duration) -> Duration {
        self.policy().scale_duration(nominal)
    }

    /// Scales a polling/refresh interval by the active policy.
    pub fn scale_interval(&self, nominal: Duration) -> Duration {
        self.policy().scale_interval(nominal)
    }

    /// The most recently derived metrics.
    pub fn last_metrics(&self) -> &FrameMetrics {
        &self.last_metrics
    }

    /// Operator-facing snapshot of fps, drops, and the active tier.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::new(&self.last_metrics, self.active_tier())
    }
}

impl Default for Governor {
    fn default() -> Self {
        Self::new(GovernorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives `ticks` frames with a constant per-frame delta.
    fn drive(governor: &mut Governor, base: Instant, ticks: u32, delta: Duration) {
        for i in 0..ticks {
            governor.tick(base + delta * i);
        }
    }

    fn config_with_confirm(ticks: u32) -> GovernorConfig {
        GovernorConfig {
            classifier: ClassifierConfig {
                upgrade_confirm_ticks: ticks,
                ..ClassifierConfig::default()
            },
            ..GovernorConfig::default()
        }
    }

    // ── Scenario A: smooth 60fps reaches Ultra ───────────────────────

    #[test]
    fn test_smooth_session_reaches_ultra() {
        let mut governor = Governor::new(GovernorConfig::default());
        let base = Instant::now();
        drive(&mut governor, base, 61, Duration::from_micros(16_670));
        assert_eq!(governor.active_tier(), PerformanceTier::Ultra);
        assert_eq!(governor.last_metrics().dropped_frames, 0);
    }

    // ── Scenario B: sustained 40ms frames degrade ────────────────────

    #[test]
    fn test_stalled_session_degrades_to_low() {
        let mut governor = Governor::new(GovernorConfig::default());
        let base = Instant::now();
        drive(&mut governor, base, 61, Duration::from_millis(40));
        assert_eq!(governor.active_tier(), PerformanceTier::Low);
    }

    #[test]
    fn test_collapse_goes_to_emergency() {
        let mut governor = Governor::new(GovernorConfig::default());
        let base = Instant::now();
        drive(&mut governor, base, 61, Duration::from_millis(80));
        assert_eq!(governor.active_tier(), PerformanceTier::Emergency);
    }

    // ── Scenario C: override supremacy ───────────────────────────────

    #[test]
    fn test_pinned_tier_ignores_metrics() {
        let mut governor = Governor::new(GovernorConfig::default());
        governor.pin_tier(PerformanceTier::Emergency);

        let base = Instant::now();
        drive(&mut governor, base, 120, Duration::from_micros(16_670));

        assert_eq!(governor.active_tier(), PerformanceTier::Emergency);
        assert!(governor.is_pinned());
        // The snapshot still reports truthful measurements.
        assert!(governor.metrics_snapshot().fps > 55.0);
    }

    #[test]
    fn test_release_resumes_last_classified_tier() {
        let mut governor = Governor::new(GovernorConfig::default());
        let base = Instant::now();

        // Degrade to Low first, then pin Ultra.
        drive(&mut governor, base, 61, Duration::from_millis(40));
        assert_eq!(governor.active_tier(), PerformanceTier::Low);
        governor.pin_tier(PerformanceTier::Ultra);
        assert_eq!(governor.active_tier(), PerformanceTier::Ultra);

        governor.release_pin();
        assert_eq!(governor.active_tier(), PerformanceTier::Low);
    }

    #[test]
    fn test_pin_is_idempotent() {
        let mut governor = Governor::new(GovernorConfig::default());
        let rx = governor.subscribe();
        governor.pin_tier(PerformanceTier::Medium);
        governor.pin_tier(PerformanceTier::Medium);

        assert_eq!(rx.try_recv().unwrap(), GovernorEvent::OverridePinned {
            tier: PerformanceTier::Medium
        });
        assert!(rx.try_recv().is_err(), "re-pin must not publish again");
    }

    #[test]
    fn test_release_without_pin_is_noop() {
        let mut governor = Governor::new(GovernorConfig::default());
        let rx = governor.subscribe();
        governor.release_pin();
        assert!(!governor.is_pinned());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_repin_moves_pinned_tier() {
        let mut governor = Governor::new(GovernorConfig::default());
        governor.pin_tier(PerformanceTier::Low);
        governor.pin_tier(PerformanceTier::Ultra);
        assert_eq!(governor.active_tier(), PerformanceTier::Ultra);
        assert!(governor.is_pinned());
    }

    #[test]
    fn test_invalid_pin_name_retains_state() {
        let mut governor = Governor::new(GovernorConfig::default());
        let before = governor.active_tier();
        let err = governor.pin_tier_by_name("warp-speed").unwrap_err();
        assert!(matches!(err, GovernorError::UnknownTier(_)));
        assert_eq!(governor.active_tier(), before);
        assert!(!governor.is_pinned());
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn test_tier_change_publishes_event() {
        let mut governor = Governor::new(GovernorConfig::default());
        let rx = governor.subscribe();
        let base = Instant::now();
        drive(&mut governor, base, 10, Duration::from_millis(80));

        match rx.try_recv().unwrap() {
            GovernorEvent::TierChanged {
                previous,
                current,
                snapshot,
            } => {
                assert_eq!(previous, PerformanceTier::High);
                assert_eq!(current, PerformanceTier::Emergency);
                assert_eq!(snapshot.tier, PerformanceTier::Emergency);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_stable_tier_publishes_nothing() {
        let mut governor = Governor::new(config_with_confirm(1000));
        let rx = governor.subscribe();
        let base = Instant::now();
        // Smooth frames, but with a huge confirmation requirement the
        // tier stays High: no events.
        drive(&mut governor, base, 50, Duration::from_micros(16_670));
        assert!(rx.try_recv().is_err());
    }

    // ── Control handle ───────────────────────────────────────────────

    #[test]
    fn test_handle_commands_apply_at_tick_boundary() {
        let mut governor = Governor::new(GovernorConfig::default());
        let handle = governor.handle();

        handle.pin(PerformanceTier::Emergency).unwrap();
        // Not applied until the next tick.
        assert!(!governor.is_pinned());

        governor.tick(Instant::now());
        assert_eq!(governor.active_tier(), PerformanceTier::Emergency);

        handle.release().unwrap();
        governor.tick(Instant::now() + Duration::from_millis(16));
        assert!(!governor.is_pinned());
    }

    #[test]
    fn test_handle_rejects_unknown_tier_name() {
        let governor = Governor::new(GovernorConfig::default());
        let handle = governor.handle();
        assert!(matches!(
            handle.pin_by_name("cosmic"),
            Err(GovernorError::UnknownTier(_))
        ));
        assert!(handle.pin_by_name("emergency").is_ok());
    }

    // ── Query API ────────────────────────────────────────────────────

    #[test]
    fn test_query_api_tracks_active_tier() {
        let mut governor = Governor::new(GovernorConfig::default());
        governor.pin_tier(PerformanceTier::Emergency);

        assert!(!governor.is_feature_enabled(VisualFeature::ParticleEffects));
        assert!(governor.scale_duration(Duration::from_millis(400)) < Duration::from_millis(400));
        assert!(governor.scale_interval(Duration::from_secs(1)) > Duration::from_secs(1));

        governor.pin_tier(PerformanceTier::Ultra);
        assert!(governor.is_feature_enabled(VisualFeature::ParticleEffects));
        assert_eq!(
            governor.scale_duration(Duration::from_millis(400)),
            Duration::from_millis(400)
        );
    }

    #[test]
    fn test_initial_state_before_any_samples() {
        let governor = Governor::new(GovernorConfig::default());
        assert_eq!(governor.active_tier(), PerformanceTier::High);
        let snapshot = governor.metrics_snapshot();
        assert_eq!(snapshot.fps, 60.0);
        assert_eq!(snapshot.dropped_frames, 0);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = GovernorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = GovernorConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }
}
