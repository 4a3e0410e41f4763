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

//! Frame-delta capture into a bounded rolling window.

use mandala_core::perf::metrics::FrameSample;
use std::time::{Duration, Instant};

/// Default window capacity: ~2 seconds of samples at 60 Hz.
pub const WINDOW_CAPACITY: usize = 120;

/// Deltas beyond this are clock artifacts (tab suspended, machine
/// asleep), not frames the renderer produced; they are discarded so a
/// single resume does not poison two seconds of statistics.
const MAX_PLAUSIBLE_DELTA_MS: f32 = 1000.0;

/// A fixed-capacity circular buffer of frame samples.
///
/// Pushing beyond capacity overwrites the oldest sample; iteration is
/// always chronological.
#[derive(Debug, Clone)]
pub struct SampleWindow<const N: usize> {
    samples: Vec<FrameSample>,
    /// Next write position once the buffer is full.
    next: usize,
}

impl<const N: usize> SampleWindow<N> {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self {
            samples: Vec::with_capacity(N),
            next: 0,
        }
    }

    /// Pushes a sample, evicting the oldest if the window is full.
    pub fn push(&mut self, sample: FrameSample) {
        if self.samples.len() < N {
            self.samples.push(sample);
        } else {
            self.samples[self.next] = sample;
        }
        self.next = (self.next + 1) % N;
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates samples in chronological order (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &FrameSample> {
        let pivot = if self.samples.len() < N { 0 } else { self.next };
        self.samples[pivot..].iter().chain(self.samples[..pivot].iter())
    }

    /// Discards all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.next = 0;
    }
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Records the wall-clock delta between successive render ticks.
///
/// The sampler is fed by the driving loop once per animation-frame
/// callback and does O(1) work per tick. Measurement anomalies — a
/// first tick with no predecessor, a non-positive delta from a clock
/// glitch, or an implausibly long gap — are counted and discarded
/// without touching the window.
#[derive(Debug)]
pub struct FrameSampler {
    window: SampleWindow<WINDOW_CAPACITY>,
    last_tick: Option<Instant>,
    discarded: u64,
}

impl FrameSampler {
    /// Creates a sampler with an empty window.
    pub fn new() -> Self {
        Self {
            window: SampleWindow::new(),
            last_tick: None,
            discarded: 0,
        }
    }

    /// Records one render tick at `now`.
    ///
    /// The first call only primes the reference point; subsequent calls
    /// push one sample each unless the delta is anomalous.
    pub fn record(&mut self, now: Instant) {
        let Some(previous) = self.last_tick.replace(now) else {
            return;
        };

        let Some(delta) = now.checked_duration_since(previous) else {
            // Clock went backwards relative to the stored reference.
            self.discarded += 1;
            log::trace!("FrameSampler: discarded non-monotonic tick.");
            return;
        };

        if delta == Duration::ZERO {
            self.discarded += 1;
            log::trace!("FrameSampler: discarded zero-length frame delta.");
            return;
        }

        let delta_ms = delta.as_secs_f32() * 1000.0;
        if delta_ms > MAX_PLAUSIBLE_DELTA_MS {
            self.discarded += 1;
            log::debug!(
                "FrameSampler: discarded implausible {delta_ms:.0}ms delta (suspend/resume?)."
            );
            return;
        }

        self.window.push(FrameSample { at: now, delta_ms });
    }

    /// The current sample window.
    pub fn window(&self) -> &SampleWindow<WINDOW_CAPACITY> {
        &self.window
    }

    /// Count of samples discarded as measurement anomalies.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Clears the window and the tick reference point.
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_tick = None;
    }
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new()
    }
}
