//! Passive, order-preserving event bus.
//!
//! The board only appends. The interpreter running the simulated program
//! drains records at its own pace; nothing here schedules or wakes anyone.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One `(source, event, value)` triple awaiting the interpreter.
///
/// Fields are as wide as the transport's integers so any number a page
/// raises is queued unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Device id that raised the event.
    pub source_id: i64,
    /// Device-specific event code.
    pub event_id: i64,
    /// Event payload.
    pub value: i64,
}

impl EventRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(
        source_id: impl Into<i64>,
        event_id: impl Into<i64>,
        value: impl Into<i64>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            event_id: event_id.into(),
            value: value.into(),
        }
    }
}

/// FIFO of pending [`EventRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBus {
    pending: VecDeque<EventRecord>,
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Appends a record after every record already queued.
    pub fn queue(
        &mut self,
        source_id: impl Into<i64>,
        event_id: impl Into<i64>,
        value: impl Into<i64>,
    ) {
        self.pending
            .push_back(EventRecord::new(source_id, event_id, value));
    }

    /// Number of records waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` when nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Oldest waiting record, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&EventRecord> {
        self.pending.front()
    }

    /// Consumes the oldest waiting record.
    pub fn pop(&mut self) -> Option<EventRecord> {
        self.pending.pop_front()
    }

    /// Consumes every waiting record in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = EventRecord> + '_ {
        self.pending.drain(..)
    }

    /// Iterates waiting records in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.pending.iter()
    }
}
