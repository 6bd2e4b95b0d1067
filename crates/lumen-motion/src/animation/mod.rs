//! Animation primitives shared by the reveal registry and the smooth scroll
//! engine.
//!
//! - **Easing Functions**: CSS timing functions plus the power/back/expo curves
//! - **Interpolation**: blending between two style states
//! - **Transitions**: per-element runtime state with delay and retargeting
//! - **Events**: lifecycle notifications polled after each frame

pub mod easing;
pub mod events;
pub mod interpolate;
pub mod transition;
pub mod types;

pub use easing::{EasingFunction, PowerMode, StepPosition};
pub use events::{DEFAULT_EVENT_LIMIT, EventQueue, RevealDirection, RevealEvent};
pub use interpolate::Interpolate;
pub use transition::RevealTransition;
pub use types::{AnimationId, AnimationState, PlayState, StyleProperty, StyleValues};
