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

//! Drives the governor through a synthetic rendering session.
//!
//! The data sources of the visualization are mock generators, and so is
//! this driver: it replays a scripted load profile (smooth → degrading
//! → stalled → recovery) by advancing timestamps manually, so a full
//! session takes milliseconds instead of minutes. Run with
//! `RUST_LOG=info` to watch the tier transitions.

use anyhow::Result;
use mandala_core::event::GovernorEvent;
use mandala_core::motion::AnimationKind;
use mandala_core::perf::tier::PerformanceTier;
use mandala_core::scene::{LayerKind, Priority, ZoomLevel};
use mandala_core::time::{MonotonicClock, Stopwatch, TickClock};
use mandala_governor::{Governor, GovernorConfig};
use mandala_motion::{
    resolve, should_render_layer, submit_staggered, MotionCallback, MotionDecision, MotionRequest,
    MotionScheduler, RequestId, SchedulerConfig,
};
use std::time::{Duration, Instant};

/// One segment of the scripted load profile.
struct LoadPhase {
    label: &'static str,
    ticks: u32,
    frame_delta: Duration,
}

/// The standard session script.
///
/// Mirrors the load curve the visualization sees in practice: idle
/// browsing, then the month-view redraw storm, then recovery.
fn session_phases() -> Vec<LoadPhase> {
    vec![
        LoadPhase {
            label: "smooth",
            ticks: 180,
            frame_delta: Duration::from_micros(16_670),
        },
        LoadPhase {
            label: "degrading",
            ticks: 120,
            frame_delta: Duration::from_millis(25),
        },
        LoadPhase {
            label: "stalled",
            ticks: 180,
            frame_delta: Duration::from_millis(45),
        },
        LoadPhase {
            label: "recovery",
            ticks: 240,
            frame_delta: Duration::from_micros(16_000),
        },
    ]
}

/// Layers that survive culling at the given tier and zoom.
fn visible_layers(tier: PerformanceTier, zoom: ZoomLevel) -> Vec<LayerKind> {
    LayerKind::ALL
        .into_iter()
        .filter(|layer| should_render_layer(*layer, layer.default_priority(), zoom, tier))
        .collect()
}

/// Submits the ring-segment rotation wave a fresh mount plays.
fn submit_intro_wave(
    scheduler: &mut MotionScheduler,
    governor: &Governor,
    now: Instant,
) -> Vec<RequestId> {
    let batch: Vec<(MotionRequest, MotionCallback)> = (0..8)
        .map(|segment| {
            let callback: MotionCallback = Box::new(move || {
                log::debug!("Intro wave: segment {segment} started rotating.");
            });
            (
                MotionRequest::new(
                    AnimationKind::Rotation,
                    Priority::Medium,
                    Duration::from_millis(900),
                ),
                callback,
            )
        })
        .collect();
    submit_staggered(
        scheduler,
        batch,
        Duration::from_millis(40),
        governor.policy(),
        now,
    )
}

fn drain_events(events: &flume::Receiver<GovernorEvent>, zoom: ZoomLevel) {
    while let Ok(event) = events.try_recv() {
        match event {
            GovernorEvent::TierChanged {
                previous,
                current,
                snapshot,
            } => {
                let layers = visible_layers(current, zoom);
                log::info!(
                    "Tier '{previous}' → '{current}' at {:.1} fps ({} drops); {} of {} layers visible.",
                    snapshot.fps,
                    snapshot.dropped_frames,
                    layers.len(),
                    LayerKind::ALL.len(),
                );
            }
            GovernorEvent::OverridePinned { tier } => {
                log::info!("Operator pinned tier '{tier}'.");
            }
            GovernorEvent::OverrideReleased { resumed } => {
                log::info!("Operator pin released; auto classification resumed at '{resumed}'.");
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut governor = Governor::new(GovernorConfig::default());
    let events = governor.subscribe();
    let handle = governor.handle();
    let mut scheduler = MotionScheduler::new(SchedulerConfig::default());
    let zoom = ZoomLevel::Day;

    let clock = MonotonicClock;
    let replay_watch = Stopwatch::new();
    let mut now = clock.now();

    let mut wave = submit_intro_wave(&mut scheduler, &governor, now);

    for phase in session_phases() {
        log::info!(
            "Session phase '{}': {} ticks at {:.1}ms.",
            phase.label,
            phase.ticks,
            phase.frame_delta.as_secs_f64() * 1000.0
        );
        for _ in 0..phase.ticks {
            now += phase.frame_delta;
            governor.tick(now);
            scheduler.tick(now);
            drain_events(&events, zoom);
        }

        // Phase boundary: the previous wave's animations have long
        // since finished; release their slots (or withdraw stragglers
        // still queued) and show how the policy reshapes the next wave.
        for id in wave.drain(..) {
            if !scheduler.complete(id) {
                scheduler.cancel(id);
            }
        }
        let breathing = MotionRequest::new(
            AnimationKind::Breathing,
            Priority::High,
            Duration::from_millis(1200),
        );
        match resolve(&breathing, governor.policy(), false, true) {
            MotionDecision::Animate { duration } => log::info!(
                "Breathing animation under '{}': {:.0}ms.",
                governor.active_tier(),
                duration.as_secs_f64() * 1000.0
            ),
            MotionDecision::Static => log::info!(
                "Breathing animation under '{}': rendered static.",
                governor.active_tier()
            ),
        }
        wave = submit_intro_wave(&mut scheduler, &governor, now);
    }

    // Operator round: pin to emergency, observe supremacy, release.
    handle.pin(PerformanceTier::Emergency)?;
    for _ in 0..30 {
        now += Duration::from_micros(16_670);
        governor.tick(now);
        scheduler.tick(now);
        drain_events(&events, zoom);
    }
    log::info!(
        "While pinned: tier '{}' despite {:.1} measured fps.",
        governor.active_tier(),
        governor.metrics_snapshot().fps
    );
    handle.release()?;
    now += Duration::from_micros(16_670);
    governor.tick(now);
    drain_events(&events, zoom);

    let snapshot = governor.metrics_snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    let stats = scheduler.stats();
    log::info!(
        "Scheduler: {} dispatched ({} forced), {} dropped, {} cancelled.",
        stats.dispatched,
        stats.forced,
        stats.dropped,
        stats.cancelled
    );
    log::info!(
        "Replay finished in {:.1}ms of wall time.",
        replay_watch.elapsed_secs_f64() * 1000.0
    );

    Ok(())
}
