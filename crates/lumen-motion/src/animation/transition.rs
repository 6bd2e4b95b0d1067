//! Runtime state for a single in-flight reveal transition.
//!
//! A `RevealTransition` interpolates one element between two `StyleValues`
//! states. It starts `Pending` while its stagger delay runs, then `Running`
//! until the duration elapses, and ends `Finished` or `Cancelled`.
//!
//! # Example
//!
//! ```
//! use lumen_motion::animation::{EasingFunction, RevealTransition, StyleValues};
//! use lumen_motion::ElementId;
//!
//! let mut fade = RevealTransition::new(
//!     ElementId(1),
//!     StyleValues::new().opacity(0.0),
//!     StyleValues::new().opacity(1.0),
//!     400.0,
//!     0.0,
//!     EasingFunction::Linear,
//! );
//! fade.update(200.0);
//! assert_eq!(fade.current_value().get(lumen_motion::animation::StyleProperty::Opacity), Some(0.5));
//! ```

use super::easing::EasingFunction;
use super::interpolate::Interpolate;
use super::types::{AnimationId, AnimationState, StyleValues};
use crate::geometry::ElementId;

#[derive(Debug, Clone)]
pub struct RevealTransition {
    pub id: AnimationId,
    /// The element this transition writes to.
    pub element: ElementId,
    pub from_value: StyleValues,
    pub to_value: StyleValues,
    pub duration_ms: f32,
    /// Time before interpolation begins (stagger offset plus descriptor delay).
    pub delay_ms: f32,
    /// Time elapsed since creation, delay included.
    pub elapsed_ms: f32,
    pub easing: EasingFunction,
    pub state: AnimationState,
}

impl RevealTransition {
    pub fn new(
        element: ElementId,
        from_value: StyleValues,
        to_value: StyleValues,
        duration_ms: f32,
        delay_ms: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            id: AnimationId::new(),
            element,
            from_value,
            to_value,
            duration_ms: duration_ms.max(0.0),
            delay_ms: delay_ms.max(0.0),
            elapsed_ms: 0.0,
            easing,
            state: if delay_ms > 0.0 {
                AnimationState::Pending
            } else {
                AnimationState::Running
            },
        }
    }

    /// Get the current interpolated value of the transition.
    pub fn current_value(&self) -> StyleValues {
        match self.state {
            AnimationState::Pending => self.from_value.clone(),
            AnimationState::Finished => self.to_value.clone(),
            AnimationState::Cancelled | AnimationState::Running => {
                let eased = self.easing.evaluate(self.progress());
                self.from_value.interpolate(&self.to_value, eased)
            }
        }
    }

    /// Advance time by `delta_ms`.
    ///
    /// Returns `true` while the transition is still pending or running.
    pub fn update(&mut self, delta_ms: f32) -> bool {
        match self.state {
            AnimationState::Finished | AnimationState::Cancelled => false,
            AnimationState::Pending => {
                self.elapsed_ms += delta_ms;
                if self.elapsed_ms >= self.delay_ms {
                    self.state = AnimationState::Running;
                    if self.elapsed_ms - self.delay_ms >= self.duration_ms {
                        self.state = AnimationState::Finished;
                        return false;
                    }
                }
                true
            }
            AnimationState::Running => {
                self.elapsed_ms += delta_ms;
                if self.elapsed_ms - self.delay_ms >= self.duration_ms {
                    self.state = AnimationState::Finished;
                    false
                } else {
                    true
                }
            }
        }
    }

    /// Stop the transition where it is; `current_value` keeps reporting the
    /// value reached at cancellation.
    pub fn cancel(&mut self) {
        if self.state == AnimationState::Pending {
            self.elapsed_ms = self.delay_ms;
        }
        self.state = AnimationState::Cancelled;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, AnimationState::Pending | AnimationState::Running)
    }

    pub fn is_pending(&self) -> bool {
        self.state == AnimationState::Pending
    }

    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// Linear time progress (0.0 to 1.0), excluding the delay.
    pub fn progress(&self) -> f32 {
        if self.state == AnimationState::Finished {
            return 1.0;
        }
        let active_elapsed = (self.elapsed_ms - self.delay_ms).max(0.0);
        if self.duration_ms > 0.0 {
            (active_elapsed / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Continue from the current interpolated value toward a new destination.
    pub fn retarget(&mut self, new_to_value: StyleValues, duration_ms: f32, easing: EasingFunction) {
        self.from_value = self.current_value();
        self.to_value = new_to_value;
        self.duration_ms = duration_ms.max(0.0);
        self.delay_ms = 0.0;
        self.elapsed_ms = 0.0;
        self.easing = easing;
        self.state = AnimationState::Running;
    }
}
