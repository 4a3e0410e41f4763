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

//! Batch submission with staggered start offsets.
//!
//! A ring redraw wants its segments to animate as a cascading wave, not
//! a thundering herd hitting the scheduler in the same tick. Staggering
//! assigns each batch member an increasing start offset, scaled by the
//! active policy so degraded tiers compress the wave along with the
//! animations themselves.

use crate::request::MotionRequest;
use crate::scheduler::{MotionCallback, MotionScheduler, RequestId};
use mandala_core::perf::policy::FeaturePolicy;
use std::time::{Duration, Instant};

/// Computes the start offsets for a batch of `count` elements.
///
/// Offsets are evenly spaced multiples of `step`, scaled by the
/// policy's duration scale; element 0 starts immediately.
pub fn stagger_delays(count: usize, step: Duration, policy: &FeaturePolicy) -> Vec<Duration> {
    (0..count)
        .map(|i| policy.scale_duration(step * i as u32))
        .collect()
}

/// Submits a batch with staggered start offsets.
///
/// Returns the ids in submission order so the caller can cancel the
/// tail of the wave (e.g. on unmount) before it dispatches.
pub fn submit_staggered(
    scheduler: &mut MotionScheduler,
    batch: Vec<(MotionRequest, MotionCallback)>,
    step: Duration,
    policy: &FeaturePolicy,
    now: Instant,
) -> Vec<RequestId> {
    let delays = stagger_delays(batch.len(), step, policy);
    batch
        .into_iter()
        .zip(delays)
        .map(|((request, callback), delay)| scheduler.submit_delayed(request, now, delay, callback))
        .collect()
}
