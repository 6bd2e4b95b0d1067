//! Reveal lifecycle events.
//!
//! The registry pushes events while it evaluates triggers and advances
//! transitions; callers poll them after each frame.
//!
//! ```ignore
//! registry.frame(16.0, &mut doc);
//! for event in registry.drain_events() {
//!     if let RevealEvent::Completed { element, .. } = event {
//!         log::debug!("{element} revealed");
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::geometry::ElementId;
use crate::registry::RegistrationHandle;

/// Which way a reveal is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealDirection {
    /// Toward the descriptor's `to` state.
    Forward,
    /// Back toward the `from` state.
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealEvent {
    /// Interpolation began (after any stagger delay).
    Started {
        handle: RegistrationHandle,
        element: ElementId,
        direction: RevealDirection,
        at_ms: f64,
    },
    /// A forward animation reached its `to` state.
    Completed {
        handle: RegistrationHandle,
        element: ElementId,
        at_ms: f64,
    },
    /// A reverse animation reached its `from` state.
    Reversed {
        handle: RegistrationHandle,
        element: ElementId,
        at_ms: f64,
    },
    /// An in-flight animation was overridden by one in the other direction.
    Interrupted {
        handle: RegistrationHandle,
        element: ElementId,
        /// Direction of the animation that replaced it.
        direction: RevealDirection,
        at_ms: f64,
    },
    /// The registration was cancelled while this element was animating or
    /// waiting on its stagger delay.
    Cancelled {
        handle: RegistrationHandle,
        element: ElementId,
        at_ms: f64,
    },
    /// Intersection detection is unavailable, so the element was put in its
    /// final state directly.
    ShownWithoutAnimation {
        handle: RegistrationHandle,
        element: ElementId,
        at_ms: f64,
    },
}

impl RevealEvent {
    pub fn handle(&self) -> RegistrationHandle {
        match self {
            Self::Started { handle, .. }
            | Self::Completed { handle, .. }
            | Self::Reversed { handle, .. }
            | Self::Interrupted { handle, .. }
            | Self::Cancelled { handle, .. }
            | Self::ShownWithoutAnimation { handle, .. } => *handle,
        }
    }

    pub fn element(&self) -> ElementId {
        match self {
            Self::Started { element, .. }
            | Self::Completed { element, .. }
            | Self::Reversed { element, .. }
            | Self::Interrupted { element, .. }
            | Self::Cancelled { element, .. }
            | Self::ShownWithoutAnimation { element, .. } => *element,
        }
    }

    /// Registry clock time at which the event happened.
    pub fn at_ms(&self) -> f64 {
        match self {
            Self::Started { at_ms, .. }
            | Self::Completed { at_ms, .. }
            | Self::Reversed { at_ms, .. }
            | Self::Interrupted { at_ms, .. }
            | Self::Cancelled { at_ms, .. }
            | Self::ShownWithoutAnimation { at_ms, .. } => *at_ms,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    pub fn is_forward_start(&self) -> bool {
        matches!(
            self,
            Self::Started {
                direction: RevealDirection::Forward,
                ..
            }
        )
    }
}

/// Events kept when nobody drains the queue.
pub const DEFAULT_EVENT_LIMIT: usize = 512;

/// Queue for collecting reveal events during frames.
///
/// Bounded: once `limit` events are waiting, each push drops the oldest.
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<RevealEvent>,
    limit: usize,
    dropped: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_limit(DEFAULT_EVENT_LIMIT)
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: VecDeque::new(),
            limit: limit.max(1),
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: RevealEvent) {
        if self.events.len() >= self.limit {
            self.events.pop_front();
            self.dropped += 1;
            if self.dropped == 1 || self.dropped % self.limit as u64 == 0 {
                log::debug!(
                    "reveal event queue full ({} events), {} dropped so far",
                    self.limit,
                    self.dropped
                );
            }
        }
        self.events.push_back(event);
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Events discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<RevealEvent> {
        self.events.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = RevealEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events concerning one element, oldest first.
    pub fn events_for_element(&self, element: ElementId) -> Vec<&RevealEvent> {
        self.events.iter().filter(|e| e.element() == element).collect()
    }
}
