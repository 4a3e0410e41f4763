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

//! A generic multi-subscriber event hub.

use log;

/// Fans events out to any number of independent subscribers.
///
/// The hub is generic over the event type `T` so this crate stays
/// decoupled from the concrete events higher-level crates define. Each
/// subscriber gets its own channel; a slow subscriber never blocks the
/// publisher, and a dropped subscriber is pruned on the next publish.
#[derive(Debug)]
pub struct EventHub<T: Clone + Send + 'static> {
    subscribers: Vec<flume::Sender<T>>,
}

impl<T: Clone + Send + 'static> EventHub<T> {
    /// Creates a hub with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Registers a new subscriber and returns its receiving end.
    ///
    /// Dropping the receiver unsubscribes; the stale sender is removed
    /// on the next [`publish`](Self::publish).
    pub fn subscribe(&mut self) -> flume::Receiver<T> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        log::trace!("EventHub: subscriber added ({} total).", self.subscribers.len());
        rx
    }

    /// Delivers a clone of `event` to every live subscriber.
    ///
    /// Subscribers whose receiver has been dropped are pruned here.
    pub fn publish(&mut self, event: T) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of currently registered subscribers.
    ///
    /// May count subscribers that dropped their receiver since the last
    /// publish; pruning happens lazily.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone + Send + 'static> Default for EventHub<T> {
    fn default() -> Self {
        Self::new()
    }
}
