//! Smooth scroll engine.
//!
//! Raw wheel and touch deltas move a *target* offset; the document's actual
//! scroll offset chases that target once per animation frame, either along
//! an eased curve of fixed duration or with frame-rate independent
//! exponential damping (`lerp` mode). A new target while a previous one is
//! still being approached restarts the curve from the current offset, so
//! the rendered position never jumps.
//!
//! The engine is the only writer of the document's scroll offset while it
//! is running. Offsets are always clamped to `[0, limit]`.

use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;
use crate::document::Document;
use crate::error::{RevealError, Result};
use crate::frame::{FrameRequestId, FrameScheduler, FrameTask};
use crate::geometry::{Axis, ElementId};

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollConfig {
    /// Seconds taken to reach a new target in duration mode.
    pub duration: f32,
    pub easing: EasingFunction,
    /// Damping factor per 60 Hz frame. When set it replaces duration/easing.
    pub lerp: Option<f32>,
    pub orientation: Axis,
    pub smooth_wheel: bool,
    pub smooth_touch: bool,
    pub wheel_multiplier: f32,
    pub touch_multiplier: f32,
    /// Distance in pixels under which the offset snaps onto the target.
    pub epsilon: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration: 1.2,
            easing: EasingFunction::ExpoOut,
            lerp: None,
            orientation: Axis::Vertical,
            smooth_wheel: true,
            smooth_touch: false,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            epsilon: 0.5,
        }
    }
}

/// Raw scroll input, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollInput {
    Wheel { delta_x: f32, delta_y: f32 },
    /// Finger movement along the scroll axis.
    Touch { delta: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTarget {
    Offset(f32),
    /// The element's leading edge.
    Element(ElementId),
    Top,
    Bottom,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollToOptions {
    /// Added to the resolved target offset (e.g. to clear a fixed header).
    pub offset: f32,
    /// Jump without animating.
    pub immediate: bool,
    /// Overrides the configured duration, in seconds.
    pub duration: Option<f32>,
    pub easing: Option<EasingFunction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    #[default]
    Idle,
    Forward,
    Backward,
}

/// Snapshot of the engine after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub offset: f32,
    pub target: f32,
    /// Pixels per second over the last frame.
    pub velocity: f32,
    pub limit: f32,
    pub is_smoothing: bool,
    pub direction: ScrollDirection,
}

#[derive(Debug, Clone)]
enum Motion {
    Eased {
        from: f32,
        duration_ms: f32,
        elapsed_ms: f32,
        easing: EasingFunction,
    },
    Damped {
        lerp: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped,
    Destroyed,
}

#[derive(Debug)]
pub struct SmoothScroll {
    config: ScrollConfig,
    offset: f32,
    target: f32,
    limit: f32,
    velocity: f32,
    direction: ScrollDirection,
    motion: Option<Motion>,
    smooth_delta: f32,
    native_delta: f32,
    lifecycle: Lifecycle,
    frame: Option<FrameRequestId>,
    last_frame_ms: Option<f64>,
}

impl SmoothScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            offset: 0.0,
            target: 0.0,
            limit: 0.0,
            velocity: 0.0,
            direction: ScrollDirection::Idle,
            motion: None,
            smooth_delta: 0.0,
            native_delta: 0.0,
            lifecycle: Lifecycle::Idle,
            frame: None,
            last_frame_ms: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Begin (or resume) intercepting input and request the first frame.
    ///
    /// Does nothing once the engine has been destroyed.
    pub fn start<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        frames: &mut FrameScheduler<FrameTask>,
    ) {
        match self.lifecycle {
            Lifecycle::Running | Lifecycle::Destroyed => return,
            Lifecycle::Idle | Lifecycle::Stopped => {}
        }
        let axis = self.config.orientation;
        self.limit = doc.max_scroll(axis);
        self.offset = doc.scroll_offset(axis).clamp(0.0, self.limit);
        self.target = self.offset;
        self.last_frame_ms = None;
        self.lifecycle = Lifecycle::Running;
        self.frame = Some(frames.request(FrameTask::SmoothScroll));
        log::info!(
            "smooth scroll started at {:.1}px (limit {:.1}px)",
            self.offset,
            self.limit
        );
    }

    /// Pause: the in-flight motion halts where it is and input is ignored
    /// until `start` is called again.
    pub fn stop(&mut self, frames: &mut FrameScheduler<FrameTask>) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        self.halt(frames);
        self.lifecycle = Lifecycle::Stopped;
        log::info!("smooth scroll stopped at {:.1}px", self.offset);
    }

    /// Release the frame request and hand scrolling back to the host.
    pub fn destroy(&mut self, frames: &mut FrameScheduler<FrameTask>) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.halt(frames);
        self.lifecycle = Lifecycle::Destroyed;
        log::info!("smooth scroll destroyed");
    }

    fn halt(&mut self, frames: &mut FrameScheduler<FrameTask>) {
        if let Some(id) = self.frame.take() {
            frames.cancel(id);
        }
        self.motion = None;
        self.target = self.offset;
        self.velocity = 0.0;
        self.direction = ScrollDirection::Idle;
        self.smooth_delta = 0.0;
        self.native_delta = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.lifecycle == Lifecycle::Stopped
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Feed raw input. It is consumed on the next frame.
    ///
    /// Returns false when the engine is not running and the input was
    /// ignored.
    pub fn input(&mut self, input: ScrollInput) -> bool {
        if !self.is_running() {
            return false;
        }
        match input {
            ScrollInput::Wheel { delta_x, delta_y } => {
                let delta = match self.config.orientation {
                    Axis::Vertical => delta_y,
                    Axis::Horizontal => delta_x,
                } * self.config.wheel_multiplier;
                if self.config.smooth_wheel {
                    self.smooth_delta += delta;
                } else {
                    self.native_delta += delta;
                }
            }
            ScrollInput::Touch { delta } => {
                let delta = delta * self.config.touch_multiplier;
                if self.config.smooth_touch {
                    self.smooth_delta += delta;
                } else {
                    self.native_delta += delta;
                }
            }
        }
        true
    }

    /// Animate (or jump) to a target.
    ///
    /// Ignored while the engine is not running. An element target that is
    /// not mounted fails with `TargetNotFound`.
    pub fn scroll_to<D: Document + ?Sized>(
        &mut self,
        target: ScrollTarget,
        options: &ScrollToOptions,
        doc: &mut D,
    ) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        let axis = self.config.orientation;
        self.limit = doc.max_scroll(axis);
        let base = match target {
            ScrollTarget::Offset(value) => value,
            ScrollTarget::Element(element) => doc
                .element_rect(element)
                .map(|rect| rect.start(axis))
                .ok_or(RevealError::TargetNotFound(element))?,
            ScrollTarget::Top => 0.0,
            ScrollTarget::Bottom => self.limit,
        };
        let destination = (base + options.offset).clamp(0.0, self.limit);

        if options.immediate {
            self.motion = None;
            self.velocity = 0.0;
            self.update_direction(destination - self.offset);
            self.offset = destination;
            self.target = destination;
            doc.set_scroll_offset(axis, destination);
            return Ok(());
        }

        let motion = match (options.duration, self.config.lerp) {
            (None, Some(lerp)) => Motion::Damped { lerp },
            (duration, _) => Motion::Eased {
                from: self.offset,
                duration_ms: duration.unwrap_or(self.config.duration).max(0.0) * 1000.0,
                elapsed_ms: 0.0,
                easing: options.easing.unwrap_or(self.config.easing),
            },
        };
        self.retarget(destination, motion);
        Ok(())
    }

    /// Recompute the scroll limit after a layout change and clamp into it.
    pub fn resize<D: Document + ?Sized>(&mut self, doc: &mut D) {
        let axis = self.config.orientation;
        self.limit = doc.max_scroll(axis);
        self.target = self.target.clamp(0.0, self.limit);
        let clamped = self.offset.clamp(0.0, self.limit);
        if clamped != self.offset {
            self.offset = clamped;
            if self.is_running() {
                doc.set_scroll_offset(axis, clamped);
            }
        }
    }

    /// Per-frame step. Consumes buffered input, advances the motion, writes
    /// the offset and re-requests the next frame.
    pub fn raf<D: Document + ?Sized>(
        &mut self,
        now_ms: f64,
        doc: &mut D,
        frames: &mut FrameScheduler<FrameTask>,
    ) -> ScrollState {
        if !self.is_running() {
            return self.state();
        }
        let axis = self.config.orientation;
        let delta_ms = self
            .last_frame_ms
            .map(|last| (now_ms - last).max(0.0) as f32)
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now_ms);
        self.limit = doc.max_scroll(axis);

        // Someone else moved the document (keyboard, anchor jump) while idle.
        if self.motion.is_none() {
            let host = doc.scroll_offset(axis).clamp(0.0, self.limit);
            if (host - self.offset).abs() > f32::EPSILON {
                self.offset = host;
                self.target = host;
            }
        }

        let previous = self.offset;

        if self.native_delta != 0.0 {
            let destination = (self.offset + self.native_delta).clamp(0.0, self.limit);
            self.native_delta = 0.0;
            self.motion = None;
            self.offset = destination;
            self.target = destination;
        }

        if self.smooth_delta != 0.0 {
            let destination = (self.target + self.smooth_delta).clamp(0.0, self.limit);
            self.smooth_delta = 0.0;
            let motion = match self.config.lerp {
                Some(lerp) => Motion::Damped { lerp },
                None => Motion::Eased {
                    from: self.offset,
                    duration_ms: self.config.duration * 1000.0,
                    elapsed_ms: 0.0,
                    easing: self.config.easing,
                },
            };
            self.retarget(destination, motion);
        }

        self.advance(delta_ms);
        self.offset = self.offset.clamp(0.0, self.limit);

        let moved = self.offset - previous;
        self.velocity = if delta_ms > 0.0 {
            moved / (delta_ms / 1000.0)
        } else {
            0.0
        };
        if moved != 0.0 {
            self.update_direction(moved);
        }
        doc.set_scroll_offset(axis, self.offset);

        self.frame = Some(frames.request(FrameTask::SmoothScroll));
        self.state()
    }

    fn retarget(&mut self, destination: f32, motion: Motion) {
        self.target = destination;
        if (destination - self.offset).abs() <= f32::EPSILON {
            self.motion = None;
            return;
        }
        self.motion = Some(motion);
    }

    fn advance(&mut self, delta_ms: f32) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        let done = match motion {
            Motion::Eased {
                from,
                duration_ms,
                elapsed_ms,
                easing,
            } => {
                *elapsed_ms += delta_ms;
                let progress = if *duration_ms > 0.0 {
                    (*elapsed_ms / *duration_ms).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                let eased = easing.evaluate(progress);
                self.offset = *from + (self.target - *from) * eased;
                progress >= 1.0
            }
            Motion::Damped { lerp } => {
                // 1 - (1 - lerp)^(frames elapsed at 60 Hz), written as an exp
                let lambda = *lerp * 60.0;
                let blend = 1.0 - (-lambda * delta_ms / 1000.0).exp();
                self.offset += (self.target - self.offset) * blend;
                false
            }
        };
        if done || (self.target - self.offset).abs() < self.config.epsilon {
            self.offset = self.target;
            self.motion = None;
        }
    }

    fn update_direction(&mut self, moved: f32) {
        self.direction = if moved > 0.0 {
            ScrollDirection::Forward
        } else if moved < 0.0 {
            ScrollDirection::Backward
        } else {
            self.direction
        };
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            offset: self.offset,
            target: self.target,
            velocity: self.velocity,
            limit: self.limit,
            is_smoothing: self.motion.is_some(),
            direction: self.direction,
        }
    }
}
