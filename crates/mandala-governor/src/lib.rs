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

//! # Mandala Governor
//!
//! The adaptive animation performance governor: a closed feedback loop
//! that samples frame timing, classifies load into discrete tiers, and
//! exposes the per-tier feature policy the rendering layer consults.
//!
//! All governor work happens synchronously inside [`Governor::tick`],
//! driven by the host's per-frame callback; there is one governor per
//! rendering session and consumers only ever read derived state.

#![warn(missing_docs)]

pub mod aggregator;
pub mod classifier;
pub mod governor;
pub mod policy;
pub mod sampler;

pub use aggregator::{AggregatorConfig, MetricsAggregator};
pub use classifier::{ClassifierConfig, TierBand, TierBands, TierClassifier};
pub use governor::{Governor, GovernorConfig, GovernorHandle};
pub use policy::PolicyTable;
pub use sampler::{FrameSampler, SampleWindow, WINDOW_CAPACITY};
