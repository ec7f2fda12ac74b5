//! Event mailbox for the synchronization session.
//!
//! Provides deterministic FIFO ordering with an explicit capacity limit.

use channel_types::MessagePayload;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Queue error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    Full,
}

/// One unit of work for the session to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEvent {
    /// A message arrived on the inbound host channel
    RemoteMessage(MessagePayload),
    /// The surface reported that it is mounted
    SurfaceMounted,
    /// The user edited text on the surface
    LocalEdit(String),
}

/// Bounded FIFO queue of synchronization events.
#[derive(Debug, Clone)]
pub struct EventQueue {
    capacity: usize,
    events: VecDeque<SyncEvent>,
}

impl EventQueue {
    /// Creates a queue with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            events: VecDeque::new(),
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of queued events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns remaining capacity.
    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.events.len())
    }

    /// Pushes an event onto the queue.
    pub fn push(&mut self, event: SyncEvent) -> Result<(), QueueError> {
        if self.events.len() >= self.capacity {
            return Err(QueueError::Full);
        }
        self.events.push_back(event);
        Ok(())
    }

    /// Pops the next event.
    pub fn pop(&mut self) -> Option<SyncEvent> {
        self.events.pop_front()
    }
}
