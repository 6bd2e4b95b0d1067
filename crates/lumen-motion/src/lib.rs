//! Scroll-synchronized reveal animations.
//!
//! The crate is frame-driven and single-threaded: the host calls into it
//! once per animation frame and it never blocks or spawns.
//!
//! - [`observer`]: per-element visibility signals with activation rules
//! - [`scroll`]: the smooth scroll engine
//! - [`registry`]: target → descriptor registrations and their play state
//! - [`section`]: mount/teardown of a page section's registrations
//! - [`animation`]: easing, interpolation, transitions and events
//! - [`document`]: the host document trait and an in-memory implementation

pub mod animation;
pub mod document;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod observer;
pub mod registry;
pub mod scroll;
pub mod section;

pub use animation::{
    DEFAULT_EVENT_LIMIT, EasingFunction, EventQueue, PlayState, PowerMode, RevealDirection,
    RevealEvent, StyleProperty, StyleValues,
};
pub use document::{Document, SimDocument};
pub use error::{Result, RevealError};
pub use frame::{FrameRequestId, FrameScheduler, FrameTask};
pub use geometry::{Axis, ElementId, Rect, Size};
pub use observer::{Activation, SignalDirection, ViewportObserver, VisibilitySignal, WatchId};
pub use registry::{
    AnimationDescriptor, DescriptorId, RegistrationHandle, ReplayPolicy, RevealRegistry,
    RevealTarget, TriggerSpec,
};
pub use scroll::{
    ScrollConfig, ScrollDirection, ScrollInput, ScrollState, ScrollTarget, ScrollToOptions,
    SmoothScroll,
};
pub use section::{SectionId, SectionMount, mount_section};
