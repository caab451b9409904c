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

/// A generic, unbounded event queue.
///
/// The bus is generic over the event type `T` so that `tessera-core` stays
/// decoupled from the event enums defined in higher-level crates. The owner
/// queues with [`publish`](EventBus::publish) and drains everything queued so
/// far with [`drain`](EventBus::drain), both from the thread that owns it.
#[derive(Debug)]
pub struct EventBus<T: 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::trace!("EventBus initialized.");
        Self { sender, receiver }
    }

    /// Queues an event, logging an error if the receiving end is gone.
    ///
    /// ## Arguments
    /// * `event` - The event to queue.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to queue event: {e}. Receiver likely disconnected.");
        }
    }

    /// Removes and returns every event queued so far, in publication order.
    ///
    /// Events published while the returned vector is being processed stay in
    /// the bus for the next drain.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of events waiting in the queue.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Spawned(u32),
        Despawned(u32),
        Flush,
    }

    #[test]
    fn new_bus_is_empty() {
        let bus = EventBus::<TestEvent>::new();
        assert!(bus.is_empty());
        assert_eq!(bus.len(), 0);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn drain_preserves_publication_order() {
        let bus = EventBus::<TestEvent>::new();
        bus.publish(TestEvent::Spawned(1));
        bus.publish(TestEvent::Despawned(1));
        bus.publish(TestEvent::Flush);
        assert_eq!(bus.len(), 3);

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                TestEvent::Spawned(1),
                TestEvent::Despawned(1),
                TestEvent::Flush
            ]
        );
        assert!(bus.is_empty(), "Draining should empty the queue");
    }

    #[test]
    fn events_published_after_drain_wait_for_the_next_one() {
        let bus = EventBus::<TestEvent>::new();
        bus.publish(TestEvent::Spawned(1));
        let first = bus.drain();
        bus.publish(TestEvent::Spawned(2));

        assert_eq!(first, vec![TestEvent::Spawned(1)]);
        assert_eq!(bus.drain(), vec![TestEvent::Spawned(2)]);
    }
}
