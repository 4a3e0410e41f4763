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

//! The layer culling gate.

use mandala_core::perf::tier::PerformanceTier;
use mandala_core::scene::{LayerKind, Priority, ZoomLevel};

/// Decides whether a layer renders this pass.
///
/// Two independent predicates are AND-combined: a performance gate on
/// `(priority, tier)` and the zoom allow-list, which is a content
/// decision the governor does not own. `Critical` layers bypass both —
/// the mood ring renders under every tier and every zoom. Pure; no side
/// effects, evaluated per layer per render pass.
pub fn should_render_layer(
    layer: LayerKind,
    priority: Priority,
    zoom: ZoomLevel,
    tier: PerformanceTier,
) -> bool {
    if priority == Priority::Critical {
        return true;
    }

    let performance_admits = match tier {
        PerformanceTier::Emergency => priority >= Priority::High,
        PerformanceTier::Low => priority > Priority::Low,
        PerformanceTier::Medium | PerformanceTier::High | PerformanceTier::Ultra => true,
    };

    performance_admits && zoom.permits(layer)
}
