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

//! Bounded, priority-aware scheduling of animation starts.

use crate::request::MotionRequest;
use mandala_core::motion::AnimationKind;
use mandala_core::scene::Priority;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Callback invoked when a queued animation is dispatched.
///
/// Fire-and-forget: once invoked, the scheduler's only remaining
/// involvement is the active-slot bookkeeping released by
/// [`MotionScheduler::complete`].
pub type MotionCallback = Box<dyn FnOnce() + Send>;

/// Identifier of a submitted request, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Scheduler limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Animations allowed to run concurrently before requests queue.
    pub max_concurrent: usize,
    /// Total pending entries held before the oldest low-priority entry
    /// is evicted.
    pub max_pending: usize,
    /// A pending entry that has waited this long is dispatched even if
    /// the concurrency cap is still exceeded.
    pub max_queue_delay_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 6,
            max_pending: 64,
            max_queue_delay_ms: 2000,
        }
    }
}

/// Dispatch and shedding counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Requests whose callback has been invoked.
    pub dispatched: u64,
    /// Of those, requests dispatched past the cap after the capped delay.
    pub forced: u64,
    /// Pending requests evicted on queue overflow.
    pub dropped: u64,
    /// Pending requests withdrawn by their submitter.
    pub cancelled: u64,
}

struct PendingEntry {
    id: RequestId,
    request: MotionRequest,
    submitted_at: Instant,
    ready_at: Instant,
    callback: MotionCallback,
}

/// Admission control for animation starts.
///
/// Requests queue per priority (FIFO within a priority) and dispatch in
/// priority order while the concurrency cap allows. The queue is
/// bounded: overflow evicts the oldest entry of the lowest populated
/// priority. Waiting is bounded too: an entry older than the capped
/// delay dispatches regardless of the cap, so nothing starves.
///
/// The scheduler is owned by the render loop and mutated only from it;
/// consumers interact through `submit`/`cancel`/`complete`.
pub struct MotionScheduler {
    config: SchedulerConfig,
    /// Pending queues indexed by [`Priority::DISPATCH_ORDER`] position.
    pending: [VecDeque<PendingEntry>; 4],
    /// Dispatched animations still holding a slot.
    active: HashMap<RequestId, MotionRequest>,
    next_id: u64,
    stats: SchedulerStats,
}

fn queue_index(priority: Priority) -> usize {
    match priority {
        Priority::Critical => 0,
        Priority::High => 1,
        Priority::Medium => 2,
        Priority::Low => 3,
    }
}

impl MotionScheduler {
    /// Creates a scheduler with the given limits.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            pending: [
                VecDeque::new(),
                VecDeque::new(),
                VecDeque::new(),
                VecDeque::new(),
            ],
            active: HashMap::new(),
            next_id: 0,
            stats: SchedulerStats::default(),
        }
    }

    /// Submits a request that is ready to start immediately.
    pub fn submit(
        &mut self,
        request: MotionRequest,
        now: Instant,
        callback: MotionCallback,
    ) -> RequestId {
        self.submit_delayed(request, now, Duration::ZERO, callback)
    }

    /// Submits a request that becomes dispatchable after `delay`.
    ///
    /// Stagger orchestration uses this to turn a batch into a cascade.
    pub fn submit_delayed(
        &mut self,
        request: MotionRequest,
        now: Instant,
        delay: Duration,
        callback: MotionCallback,
    ) -> RequestId {
        if self.pending_len() >= self.config.max_pending {
            self.evict_one();
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.pending[queue_index(request.priority)].push_back(PendingEntry {
            id,
            request,
            submitted_at: now,
            ready_at: now + delay,
            callback,
        });
        log::trace!(
            "MotionScheduler: queued {} '{}' as {:?}.",
            request.priority,
            request.kind,
            id
        );
        id
    }

    /// Withdraws a pending request.
    ///
    /// Returns `false` if the id is unknown or already dispatched;
    /// dispatched callbacks cannot be recalled.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        for queue in &mut self.pending {
            if let Some(pos) = queue.iter().position(|e| e.id == id) {
                queue.remove(pos);
                self.stats.cancelled += 1;
                log::trace!("MotionScheduler: cancelled {id:?}.");
                return true;
            }
        }
        false
    }

    /// Marks a dispatched animation as finished, freeing its slot.
    pub fn complete(&mut self, id: RequestId) -> bool {
        self.active.remove(&id).is_some()
    }

    /// Dispatches ready work; called once per render tick.
    ///
    /// Overdue entries (waited past the capped delay) go first and
    /// ignore the concurrency cap; the rest dispatch in priority order,
    /// FIFO within a priority, until the cap is reached.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut dispatched = 0;
        let max_delay = Duration::from_millis(self.config.max_queue_delay_ms);

        for idx in 0..self.pending.len() {
            while let Some(pos) = self.pending[idx].iter().position(|e| {
                now >= e.ready_at && now.duration_since(e.submitted_at) >= max_delay
            }) {
                let entry = self.pending[idx].remove(pos).expect("position just found");
                log::debug!(
                    "MotionScheduler: capped delay exceeded, force-dispatching {:?}.",
                    entry.id
                );
                self.stats.forced += 1;
                self.dispatch(entry);
                dispatched += 1;
            }
        }

        'priorities: for idx in 0..self.pending.len() {
            loop {
                if self.active.len() >= self.config.max_concurrent {
                    break 'priorities;
                }
                let Some(pos) = self.pending[idx].iter().position(|e| now >= e.ready_at) else {
                    break;
                };
                let entry = self.pending[idx].remove(pos).expect("position just found");
                self.dispatch(entry);
                dispatched += 1;
            }
        }

        dispatched
    }

    fn dispatch(&mut self, entry: PendingEntry) {
        let PendingEntry {
            id,
            request,
            callback,
            ..
        } = entry;
        self.active.insert(id, request);
        self.stats.dispatched += 1;
        callback();
    }

    /// Evicts the oldest entry of the lowest populated priority.
    fn evict_one(&mut self) {
        for idx in (0..self.pending.len()).rev() {
            if let Some(entry) = self.pending[idx].pop_front() {
                log::warn!(
                    "MotionScheduler: queue full, shedding {} '{}' request {:?}.",
                    entry.request.priority,
                    entry.request.kind,
                    entry.id
                );
                self.stats.dropped += 1;
                return;
            }
        }
    }

    /// Total pending entries across all priorities.
    pub fn pending_len(&self) -> usize {
        self.pending.iter().map(VecDeque::len).sum()
    }

    /// Animations currently holding an active slot.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Active animations of one kind.
    ///
    /// Lets a consumer hold back further submissions of a kind that is
    /// already saturating the screen (particle bursts, typically).
    pub fn active_of_kind(&self, kind: AnimationKind) -> usize {
        self.active.values().filter(|r| r.kind == kind).count()
    }

    /// Dispatch and shedding counters.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// The configured limits.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

impl Default for MotionScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandala_core::motion::AnimationKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn request(priority: Priority) -> MotionRequest {
        MotionRequest::new(priority_kind(priority), priority, Duration::from_millis(500))
    }

    fn priority_kind(priority: Priority) -> AnimationKind {
        match priority {
            Priority::Critical => AnimationKind::Transition,
            Priority::High => AnimationKind::Pulse,
            Priority::Medium => AnimationKind::Rotation,
            Priority::Low => AnimationKind::Particle,
        }
    }

    fn counting_callback(counter: &Arc<AtomicUsize>) -> MotionCallback {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_cap_limits_immediate_dispatch() {
        let mut scheduler = MotionScheduler::default();
        let fired = Arc::new(AtomicUsize::new(0));
        let now = Instant::now();

        for _ in 0..10 {
            scheduler.submit(request(Priority::Medium), now, counting_callback(&fired));
        }
        let dispatched = scheduler.tick(now);

        assert_eq!(dispatched, 6);
        assert_eq!(fired.load(Ordering::SeqCst), 6);
        assert_eq!(scheduler.active_len(), 6);
        assert_eq!(scheduler.pending_len(), 4);
    }

    #[test]
    fn test_completion_frees_slots_for_queued_work() {
        let mut scheduler = MotionScheduler::default();
        let fired = Arc::new(AtomicUsize::new(0));
        let now = Instant::now();

        let ids: Vec<RequestId> = (0..10)
            .map(|_| scheduler.submit(request(Priority::Medium), now, counting_callback(&fired)))
            .collect();
        scheduler.tick(now);

        scheduler.complete(ids[0]);
        scheduler.complete(ids[1]);
        let later = now + Duration::from_millis(16);
        assert_eq!(scheduler.tick(later), 2);
        assert_eq!(fired.load(Ordering::SeqCst), 8);
        assert_eq!(scheduler.pending_len(), 2);
    }

    #[test]
    fn test_capped_delay_forces_dispatch_past_the_cap() {
        let mut scheduler = MotionScheduler::default();
        let fired = Arc::new(AtomicUsize::new(0));
        let now = Instant::now();

        for _ in 0..10 {
            scheduler.submit(request(Priority::Medium), now, counting_callback(&fired));
        }
        scheduler.tick(now);
        assert_eq!(fired.load(Ordering::SeqCst), 6);

        // Nothing completes, but the queued four must not starve.
        let much_later = now + Duration::from_millis(2100);
        let dispatched = scheduler.tick(much_later);
        assert_eq!(dispatched, 4);
        assert_eq!(fired.load(Ordering::SeqCst), 10);
        assert_eq!(scheduler.stats().forced, 4);
        assert!(scheduler.active_len() > scheduler.config().max_concurrent);
    }

    #[test]
    fn test_priority_order_wins_under_contention() {
        let mut scheduler = MotionScheduler::new(SchedulerConfig {
            max_concurrent: 1,
            ..SchedulerConfig::default()
        });
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let now = Instant::now();

        for priority in [Priority::Low, Priority::Medium, Priority::Critical] {
            let order = Arc::clone(&order);
            scheduler.submit(
                request(priority),
                now,
                Box::new(move || order.lock().unwrap().push(priority)),
            );
        }

        // One slot per tick, freed between ticks.
        for i in 0..3 {
            let tick_now = now + Duration::from_millis(16 * (i + 1));
            scheduler.tick(tick_now);
            let active: Vec<RequestId> = {
                let mut ids: Vec<_> = scheduler.active.keys().copied().collect();
                ids.sort();
                ids
            };
            for id in active {
                scheduler.complete(id);
            }
        }

        assert_eq!(
            *order.lock().unwrap(),
            vec![Priority::Critical, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn test_cancel_withdraws_pending_only() {
        let mut scheduler = MotionScheduler::default();
        let fired = Arc::new(AtomicUsize::new(0));
        let now = Instant::now();

        let id = scheduler.submit(request(Priority::Low), now, counting_callback(&fired));
        assert!(scheduler.cancel(id));
        assert_eq!(scheduler.tick(now), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        // Once dispatched, cancellation is refused.
        let id2 = scheduler.submit(request(Priority::Low), now, counting_callback(&fired));
        scheduler.tick(now);
        assert!(!scheduler.cancel(id2));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_overflow_evicts_oldest_lowest_priority() {
        let mut scheduler = MotionScheduler::new(SchedulerConfig {
            max_concurrent: 0,
            max_pending: 3,
            max_queue_delay_ms: 60_000,
        });
        let fired = Arc::new(AtomicUsize::new(0));
        let now = Instant::now();

        let low_old = scheduler.submit(request(Priority::Low), now, counting_callback(&fired));
        scheduler.submit(request(Priority::Low), now, counting_callback(&fired));
        scheduler.submit(request(Priority::High), now, counting_callback(&fired));
        // Queue is at capacity; this submission evicts the oldest Low.
        scheduler.submit(request(Priority::High), now, counting_callback(&fired));

        assert_eq!(scheduler.pending_len(), 3);
        assert_eq!(scheduler.stats().dropped, 1);
        assert!(!scheduler.cancel(low_old), "the evicted entry is gone");
    }

    #[test]
    fn test_delayed_entry_waits_for_ready_at() {
        let mut scheduler = MotionScheduler::default();
        let fired = Arc::new(AtomicUsize::new(0));
        let now = Instant::now();

        scheduler.submit_delayed(
            request(Priority::Medium),
            now,
            Duration::from_millis(100),
            counting_callback(&fired),
        );

        assert_eq!(scheduler.tick(now), 0);
        assert_eq!(scheduler.tick(now + Duration::from_millis(50)), 0);
        assert_eq!(scheduler.tick(now + Duration::from_millis(100)), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let mut scheduler = MotionScheduler::default();
        let now = Instant::now();
        let a = scheduler.submit(request(Priority::Low), now, Box::new(|| {}));
        let b = scheduler.submit(request(Priority::High), now, Box::new(|| {}));
        assert!(b > a);
    }

    #[test]
    fn test_config_serializes_round_trip() {
        let config = SchedulerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SchedulerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
