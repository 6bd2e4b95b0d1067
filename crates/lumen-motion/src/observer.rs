//! Viewport visibility tracking.
//!
//! `ViewportObserver` holds a set of watches (element + activation rule)
//! and, when polled once per frame, reports the watches whose visibility
//! flipped since the previous poll. Every watch starts out not visible, so
//! an element that is already on screen reports `Entering` on the first
//! poll after it is observed.
//!
//! There is no hysteresis: an element sitting exactly on its threshold
//! will flip on every poll the scroll position crosses it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::document::Document;
use crate::error::{RevealError, Result};
use crate::geometry::{Axis, ElementId, Rect};

/// When a watched element counts as visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Activation {
    /// At least this fraction of the element's area is in the viewport.
    /// `0.0` means any intersection at all.
    Ratio(f32),
    /// The element's leading edge has crossed the line at this fraction of
    /// the viewport, measured from the viewport's leading edge. Scrolling
    /// the element back below the line makes it invisible again.
    ViewportLine(f32),
    /// Visible from the start; never observed.
    Immediate,
}

impl Activation {
    /// Decide visibility for an element rect against the viewport rect.
    pub fn is_visible(&self, rect: &Rect, viewport: &Rect, axis: Axis) -> bool {
        match *self {
            Self::Ratio(ratio) => {
                let fraction = rect.visible_fraction(viewport);
                if ratio <= 0.0 {
                    fraction > 0.0
                } else {
                    fraction >= ratio.min(1.0)
                }
            }
            Self::ViewportLine(at) => {
                let extent = match axis {
                    Axis::Vertical => viewport.height,
                    Axis::Horizontal => viewport.width,
                };
                let line = viewport.start(axis) + extent * at.clamp(0.0, 1.0);
                rect.start(axis) <= line
            }
            Self::Immediate => true,
        }
    }
}

impl Default for Activation {
    fn default() -> Self {
        Self::Ratio(0.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WatchId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Entering,
    Leaving,
}

/// A visibility change for one watch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilitySignal {
    pub watch: WatchId,
    pub element: ElementId,
    pub visible: bool,
    pub direction: SignalDirection,
    /// Fraction of the element inside the viewport when the change was seen.
    pub ratio: f32,
}

#[derive(Debug, Clone)]
struct Watch {
    element: ElementId,
    activation: Activation,
    visible: bool,
}

#[derive(Debug)]
pub struct ViewportObserver {
    axis: Axis,
    watches: BTreeMap<WatchId, Watch>,
    next_id: u64,
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new(Axis::Vertical)
    }
}

impl ViewportObserver {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            watches: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Start watching `element`.
    ///
    /// Fails with `ObserverUnavailable` when the host cannot detect
    /// intersections. The element does not have to be mounted yet; an
    /// unmounted element simply never becomes visible.
    pub fn observe<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        element: ElementId,
        activation: Activation,
    ) -> Result<WatchId> {
        if !doc.supports_intersection() {
            return Err(RevealError::ObserverUnavailable);
        }
        let id = WatchId(self.next_id);
        self.next_id += 1;
        self.watches.insert(
            id,
            Watch {
                element,
                activation,
                visible: false,
            },
        );
        log::trace!("observing {element} as {id:?} ({activation:?})");
        Ok(id)
    }

    /// Release a watch. Returns false if it was already gone.
    pub fn unobserve(&mut self, watch: WatchId) -> bool {
        self.watches.remove(&watch).is_some()
    }

    /// Release every watch on `element`, returning how many were removed.
    pub fn unobserve_element(&mut self, element: ElementId) -> usize {
        let before = self.watches.len();
        self.watches.retain(|_, w| w.element != element);
        before - self.watches.len()
    }

    pub fn is_observing(&self, watch: WatchId) -> bool {
        self.watches.contains_key(&watch)
    }

    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }

    /// Current visibility of a watch as of the last poll.
    pub fn is_visible(&self, watch: WatchId) -> Option<bool> {
        self.watches.get(&watch).map(|w| w.visible)
    }

    /// Re-evaluate every watch and report those whose visibility changed.
    pub fn poll<D: Document + ?Sized>(&mut self, doc: &D) -> Vec<VisibilitySignal> {
        let viewport = doc.viewport_rect();
        let mut signals = Vec::new();

        for (id, watch) in self.watches.iter_mut() {
            let (visible, ratio) = match doc.element_rect(watch.element) {
                Some(rect) => (
                    watch.activation.is_visible(&rect, &viewport, self.axis),
                    rect.visible_fraction(&viewport),
                ),
                None => (false, 0.0),
            };
            if visible == watch.visible {
                continue;
            }
            watch.visible = visible;
            signals.push(VisibilitySignal {
                watch: *id,
                element: watch.element,
                visible,
                direction: if visible {
                    SignalDirection::Entering
                } else {
                    SignalDirection::Leaving
                },
                ratio,
            });
        }

        signals
    }
}
