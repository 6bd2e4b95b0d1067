//! Core animation types and data structures.
//!
//! - `StyleProperty`: the style channels a reveal can drive
//! - `StyleValues`: a partial property → value map (one reveal state)
//! - `AnimationId`: unique identifier for running transitions
//! - `AnimationState`: lifecycle of a single transition
//! - `PlayState`: reveal state of a registered target

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Generate a new unique animation ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Current state of a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Created but still inside its start delay.
    Pending,
    /// Actively interpolating.
    Running,
    /// Reached its end value.
    Finished,
    /// Stopped before completion.
    Cancelled,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::Pending
    }
}

/// Reveal state of one animatable target.
///
/// `Unplayed -> Playing -> Played` on entry; with the reverse replay policy
/// `Played -> Reversing -> Unplayed` on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Unplayed,
    Playing,
    Played,
    Reversing,
}

impl Default for PlayState {
    fn default() -> Self {
        Self::Unplayed
    }
}

/// Style channels a reveal animation can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProperty {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    /// Blur radius in pixels.
    Blur,
}

impl StyleProperty {
    /// Value the property has when no style is applied.
    pub fn identity(&self) -> f64 {
        match self {
            Self::Opacity | Self::Scale => 1.0,
            Self::TranslateX | Self::TranslateY | Self::Blur => 0.0,
        }
    }

    /// CSS unit the value is expressed in.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Opacity | Self::Scale => "",
            Self::TranslateX | Self::TranslateY | Self::Blur => "px",
        }
    }
}

/// A partial set of style values, ordered by property.
///
/// Reveal descriptors only mention the properties they animate (a fade
/// touches opacity alone), so absent properties are left to the element's
/// own styling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleValues {
    values: BTreeMap<StyleProperty, f64>,
}

impl StyleValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, property: StyleProperty, value: f64) -> Self {
        self.values.insert(property, value);
        self
    }

    pub fn opacity(self, value: f64) -> Self {
        self.with(StyleProperty::Opacity, value)
    }

    pub fn x(self, value: f64) -> Self {
        self.with(StyleProperty::TranslateX, value)
    }

    pub fn y(self, value: f64) -> Self {
        self.with(StyleProperty::TranslateY, value)
    }

    pub fn scale(self, value: f64) -> Self {
        self.with(StyleProperty::Scale, value)
    }

    pub fn blur(self, value: f64) -> Self {
        self.with(StyleProperty::Blur, value)
    }

    pub fn set(&mut self, property: StyleProperty, value: f64) {
        self.values.insert(property, value);
    }

    pub fn get(&self, property: StyleProperty) -> Option<f64> {
        self.values.get(&property).copied()
    }

    /// Value of a property, falling back to its identity value.
    pub fn resolved(&self, property: StyleProperty) -> f64 {
        self.get(property).unwrap_or_else(|| property.identity())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, f64)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }

    /// Largest per-property distance to another state, with missing
    /// properties resolved to their identity value.
    pub fn distance(&self, other: &Self) -> f64 {
        self.values
            .keys()
            .chain(other.values.keys())
            .map(|p| (self.resolved(*p) - other.resolved(*p)).abs())
            .fold(0.0, f64::max)
    }
}
