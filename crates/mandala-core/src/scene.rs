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

//! Scene vocabulary: layer kinds, render priorities, and zoom levels.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Render priority of a layer or animation request.
///
/// Declared worst-first so the derived [`Ord`] gives
/// `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    /// Purely decorative; first to be shed under pressure.
    Low,
    /// Secondary decoration.
    Medium,
    /// Primary data presentation.
    High,
    /// Must always render, irrespective of tier or zoom.
    Critical,
}

impl Priority {
    /// All priorities in dispatch order (most important first).
    pub const DISPATCH_ORDER: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

/// A visual layer of the mandala.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// The central mood ring.
    MoodRing,
    /// The sleep-cycle ring.
    SleepRing,
    /// The weather-sunburst ring.
    WeatherRing,
    /// The walking/mobility ring.
    MobilityRing,
    /// Markers anchoring textual insights to ring segments.
    InsightMarkers,
    /// The star-field backdrop behind the rings.
    CosmicBackdrop,
    /// The "now" hand sweeping over the rings.
    NowIndicator,
}

impl LayerKind {
    /// Every layer, centre outwards.
    pub const ALL: [LayerKind; 7] = [
        LayerKind::MoodRing,
        LayerKind::SleepRing,
        LayerKind::WeatherRing,
        LayerKind::MobilityRing,
        LayerKind::InsightMarkers,
        LayerKind::CosmicBackdrop,
        LayerKind::NowIndicator,
    ];

    /// The priority this layer declares when registered with the renderer.
    ///
    /// The mood ring is the reason the visualization exists, so it is
    /// the one layer that must survive every degradation.
    pub fn default_priority(self) -> Priority {
        match self {
            LayerKind::MoodRing => Priority::Critical,
            LayerKind::SleepRing => Priority::High,
            LayerKind::NowIndicator => Priority::High,
            LayerKind::WeatherRing => Priority::Medium,
            LayerKind::MobilityRing => Priority::Medium,
            LayerKind::InsightMarkers => Priority::Low,
            LayerKind::CosmicBackdrop => Priority::Low,
        }
    }
}

/// The temporal zoom the mandala is currently rendered at.
///
/// Zoom decides *content relevance*, not performance: a layer excluded
/// by the zoom allow-list is skipped no matter how idle the renderer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomLevel {
    /// 24-hour view.
    Day,
    /// 7-day view.
    Week,
    /// Calendar-month view.
    Month,
    /// 12-month view.
    Year,
}

impl ZoomLevel {
    /// Whether a layer kind is relevant at this zoom.
    ///
    /// The "now" hand only makes sense inside a single day, and insight
    /// markers become unreadable clutter beyond the week view.
    pub fn permits(self, layer: LayerKind) -> bool {
        match self {
            ZoomLevel::Day => true,
            ZoomLevel::Week => !matches!(layer, LayerKind::NowIndicator),
            ZoomLevel::Month | ZoomLevel::Year => {
                !matches!(layer, LayerKind::NowIndicator | LayerKind::InsightMarkers)
            }
        }
    }
}
