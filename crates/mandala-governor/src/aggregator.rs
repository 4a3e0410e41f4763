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

//! Derivation of summary metrics from the sample window.

use crate::sampler::SampleWindow;
use mandala_core::perf::metrics::FrameMetrics;
use serde::{Deserialize, Serialize};

/// Aggregation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Cap applied to the derived FPS value (display refresh ceiling).
    pub nominal_max_fps: f32,
    /// Deltas above this count as dropped frames.
    pub stall_threshold_ms: f32,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            nominal_max_fps: 60.0,
            stall_threshold_ms: 20.0,
        }
    }
}

/// Derives [`FrameMetrics`] from a sample window.
///
/// A pure function of the window contents: no hidden state, and
/// aggregating the same window twice yields identical metrics.
#[derive(Debug, Clone, Copy)]
pub struct MetricsAggregator {
    config: AggregatorConfig,
}

impl MetricsAggregator {
    /// Creates an aggregator with the given thresholds.
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// The configured thresholds.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Computes metrics over the window.
    ///
    /// An empty window yields the neutral default rather than dividing
    /// by zero; warm-up reads as nominal performance.
    pub fn aggregate<const N: usize>(&self, window: &SampleWindow<N>) -> FrameMetrics {
        if window.is_empty() {
            return FrameMetrics::neutral(self.config.nominal_max_fps);
        }

        let count = window.len();
        let mut total_ms = 0.0f32;
        let mut dropped = 0usize;
        for sample in window.iter() {
            total_ms += sample.delta_ms;
            if sample.delta_ms > self.config.stall_threshold_ms {
                dropped += 1;
            }
        }

        let average_frame_time_ms = total_ms / count as f32;
        let effective_fps = (1000.0 / average_frame_time_ms).min(self.config.nominal_max_fps);

        FrameMetrics {
            effective_fps,
            dropped_frames: dropped,
            average_frame_time_ms,
            sample_count: count,
        }
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(AggregatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mandala_core::perf::metrics::FrameSample;
    use std::time::{Duration, Instant};

    fn window_of(deltas: &[f32]) -> SampleWindow<120> {
        let base = Instant::now();
        let mut window = SampleWindow::new();
        for (i, &delta_ms) in deltas.iter().enumerate() {
            window.push(FrameSample {
                at: base + Duration::from_millis(16 * i as u64),
                delta_ms,
            });
        }
        window
    }

    #[test]
    fn test_empty_window_yields_neutral_default() {
        let aggregator = MetricsAggregator::default();
        let metrics = aggregator.aggregate(&SampleWindow::<120>::new());
        assert_eq!(metrics.effective_fps, 60.0);
        assert_eq!(metrics.dropped_frames, 0);
        assert_eq!(metrics.sample_count, 0);
    }

    #[test]
    fn test_single_sample_window() {
        let aggregator = MetricsAggregator::default();
        let metrics = aggregator.aggregate(&window_of(&[16.67]));
        assert_eq!(metrics.sample_count, 1);
        assert_relative_eq!(metrics.effective_fps, 59.99, epsilon = 0.05);
    }

    #[test]
    fn test_smooth_sixty_fps_window() {
        let aggregator = MetricsAggregator::default();
        let deltas = vec![16.67; 60];
        let metrics = aggregator.aggregate(&window_of(&deltas));
        assert_relative_eq!(metrics.average_frame_time_ms, 16.67, epsilon = 0.01);
        assert_relative_eq!(metrics.effective_fps, 59.99, epsilon = 0.05);
        assert_eq!(metrics.dropped_frames, 0);
    }

    #[test]
    fn test_stalled_window_counts_drops() {
        let aggregator = MetricsAggregator::default();
        let deltas = vec![40.0; 60];
        let metrics = aggregator.aggregate(&window_of(&deltas));
        assert_relative_eq!(metrics.effective_fps, 25.0, epsilon = 0.01);
        assert_eq!(metrics.dropped_frames, 60);
    }

    #[test]
    fn test_mixed_window_counts_only_stalls() {
        let aggregator = MetricsAggregator::default();
        let metrics = aggregator.aggregate(&window_of(&[16.0, 16.0, 25.0, 16.0, 33.0]));
        assert_eq!(metrics.dropped_frames, 2);
        assert_eq!(metrics.sample_count, 5);
    }

    #[test]
    fn test_fps_is_capped_at_nominal() {
        let aggregator = MetricsAggregator::default();
        // 4ms frames would read as 250 FPS; the cap keeps it at 60.
        let metrics = aggregator.aggregate(&window_of(&[4.0; 30]));
        assert_eq!(metrics.effective_fps, 60.0);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let aggregator = MetricsAggregator::default();
        let window = window_of(&[16.0, 22.0, 18.0]);
        assert_eq!(aggregator.aggregate(&window), aggregator.aggregate(&window));
    }

    #[test]
    fn test_custom_thresholds() {
        let aggregator = MetricsAggregator::new(AggregatorConfig {
            nominal_max_fps: 30.0,
            stall_threshold_ms: 50.0,
        });
        let metrics = aggregator.aggregate(&window_of(&[40.0; 10]));
        assert_eq!(metrics.dropped_frames, 0); // 40ms < 50ms threshold
        assert_relative_eq!(metrics.effective_fps, 25.0, epsilon = 0.01);
    }
}
