//! Reveal animation registry.
//!
//! The `RevealRegistry` maps each registered target (one element, or a
//! keyed group of elements) to an `AnimationDescriptor` and drives its
//! per-member `PlayState` from viewport signals:
//!
//! - `Unplayed -> Playing -> Played` when the watched element becomes visible
//! - with `PlayAndReverseOnExit`, `Played -> Reversing -> Unplayed` when it
//!   leaves, and back to `Playing` on re-entry
//!
//! A signal in the opposite direction of an in-flight animation interrupts
//! it: the running transition is retargeted from its current interpolated
//! value, never queued behind it.
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = RevealRegistry::new();
//! let handle = registry.register(
//!     RevealTarget::group("skills", skill_items),
//!     AnimationDescriptor::new(
//!         StyleValues::new().opacity(0.0).y(30.0),
//!         StyleValues::new().opacity(1.0).y(0.0),
//!         TriggerSpec::line(skills_list, 0.8),
//!     )
//!     .with_stagger_ms(80.0),
//!     &mut doc,
//! )?;
//!
//! // Each frame
//! registry.frame(16.0, &mut doc);
//!
//! // On unmount
//! registry.cancel(handle, &mut doc)?;
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::animation::{
    EasingFunction, EventQueue, PlayState, PowerMode, RevealDirection, RevealEvent,
    RevealTransition, StyleValues,
};
use crate::document::Document;
use crate::error::{RevealError, Result};
use crate::geometry::{Axis, ElementId};
use crate::observer::{Activation, ViewportObserver, WatchId};

/// Handle returned by `RevealRegistry::register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistrationHandle(pub u64);

impl fmt::Display for RegistrationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registration#{}", self.0)
    }
}

/// Identity of a descriptor. Clones share it; every `AnimationDescriptor::new`
/// gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescriptorId(u64);

impl DescriptorId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayPolicy {
    /// Play the first time the target becomes visible, never again.
    #[default]
    PlayOnce,
    /// Play on entry, reverse back to the `from` state on exit.
    PlayAndReverseOnExit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSpec {
    pub watched: ElementId,
    pub activation: Activation,
    pub replay: ReplayPolicy,
}

impl TriggerSpec {
    /// Fire once `ratio` of `watched` is inside the viewport.
    pub fn ratio(watched: ElementId, ratio: f32) -> Self {
        Self {
            watched,
            activation: Activation::Ratio(ratio),
            replay: ReplayPolicy::PlayOnce,
        }
    }

    /// Fire once the top of `watched` crosses `at` of the viewport height.
    pub fn line(watched: ElementId, at: f32) -> Self {
        Self {
            watched,
            activation: Activation::ViewportLine(at),
            replay: ReplayPolicy::PlayOnce,
        }
    }

    /// Fire on registration, without observing anything.
    pub fn immediate(watched: ElementId) -> Self {
        Self {
            watched,
            activation: Activation::Immediate,
            replay: ReplayPolicy::PlayOnce,
        }
    }

    pub fn reverse_on_exit(mut self) -> Self {
        self.replay = ReplayPolicy::PlayAndReverseOnExit;
        self
    }
}

/// What to animate and when. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDescriptor {
    id: DescriptorId,
    from: StyleValues,
    to: StyleValues,
    duration_ms: f32,
    easing: EasingFunction,
    stagger_ms: f32,
    delay_ms: f32,
    trigger: TriggerSpec,
}

impl AnimationDescriptor {
    pub const DEFAULT_DURATION_MS: f32 = 1000.0;

    pub fn new(from: StyleValues, to: StyleValues, trigger: TriggerSpec) -> Self {
        Self {
            id: DescriptorId::next(),
            from,
            to,
            duration_ms: Self::DEFAULT_DURATION_MS,
            easing: EasingFunction::Power {
                power: 3,
                mode: PowerMode::Out,
            },
            stagger_ms: 0.0,
            delay_ms: 0.0,
            trigger,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Delay added per member index within a group.
    pub fn with_stagger_ms(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms.max(0.0);
        self
    }

    /// Delay before the first member starts.
    pub fn with_delay_ms(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn id(&self) -> DescriptorId {
        self.id
    }

    pub fn from(&self) -> &StyleValues {
        &self.from
    }

    pub fn to(&self) -> &StyleValues {
        &self.to
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    pub fn stagger_ms(&self) -> f32 {
        self.stagger_ms
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    pub fn trigger(&self) -> &TriggerSpec {
        &self.trigger
    }

    /// Start delay for the member at `index`.
    pub fn start_delay_ms(&self, index: usize) -> f32 {
        self.delay_ms + index as f32 * self.stagger_ms
    }
}

/// One element, or a named group of elements animated with a stagger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealTarget {
    Element(ElementId),
    Group { key: String, members: Vec<ElementId> },
}

impl RevealTarget {
    pub fn group(key: impl Into<String>, members: Vec<ElementId>) -> Self {
        Self::Group {
            key: key.into(),
            members,
        }
    }

    pub fn members(&self) -> &[ElementId] {
        match self {
            Self::Element(element) => std::slice::from_ref(element),
            Self::Group { members, .. } => members,
        }
    }

    fn key(&self) -> TargetKey {
        match self {
            Self::Element(element) => TargetKey::Element(*element),
            Self::Group { key, .. } => TargetKey::Group(key.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TargetKey {
    Element(ElementId),
    Group(String),
}

#[derive(Debug, Clone)]
struct Member {
    element: ElementId,
    state: PlayState,
    transition: Option<RevealTransition>,
    /// Share of the forward journey already covered when the current
    /// transition began.
    base: f32,
}

impl Member {
    fn new(element: ElementId) -> Self {
        Self {
            element,
            state: PlayState::Unplayed,
            transition: None,
            base: 0.0,
        }
    }

    /// Share of the way from `from` to `to` the member currently sits at,
    /// in time rather than eased value.
    fn covered(&self) -> f32 {
        match (self.state, &self.transition) {
            (PlayState::Unplayed, _) => 0.0,
            (PlayState::Played, _) => 1.0,
            (PlayState::Playing, Some(t)) => self.base + (1.0 - self.base) * t.progress(),
            (PlayState::Reversing, Some(t)) => self.base * (1.0 - t.progress()),
            (_, None) => self.base,
        }
    }
}

#[derive(Debug)]
struct Registration {
    key: TargetKey,
    descriptor: AnimationDescriptor,
    members: Vec<Member>,
    watch: Option<WatchId>,
}

/// Owns every reveal registration for one page.
///
/// Thread safety: `Send`, so a page can be built on one thread and driven
/// from another.
#[derive(Debug)]
pub struct RevealRegistry {
    observer: ViewportObserver,
    registrations: BTreeMap<RegistrationHandle, Registration>,
    /// At most one registration per target.
    target_index: HashMap<TargetKey, RegistrationHandle>,
    watch_index: HashMap<WatchId, RegistrationHandle>,
    event_queue: EventQueue,
    clock_ms: f64,
    next_handle: u64,
}

impl Default for RevealRegistry {
    fn default() -> Self {
        Self::with_axis(Axis::Vertical)
    }
}

impl RevealRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(axis: Axis) -> Self {
        Self {
            observer: ViewportObserver::new(axis),
            registrations: BTreeMap::new(),
            target_index: HashMap::new(),
            watch_index: HashMap::new(),
            event_queue: EventQueue::new(),
            clock_ms: 0.0,
            next_handle: 1,
        }
    }

    /// Register `target` to animate per `descriptor`.
    ///
    /// Re-registering the same target with the same descriptor is a no-op
    /// that returns the existing handle; a different descriptor replaces
    /// the old registration. The `from` state is applied immediately.
    ///
    /// Fails with `TargetNotFound` if the watched element or any member is
    /// not mounted. When the host cannot detect intersections the members
    /// are put straight into their `to` state and the registration still
    /// succeeds.
    pub fn register<D: Document + ?Sized>(
        &mut self,
        target: RevealTarget,
        descriptor: AnimationDescriptor,
        doc: &mut D,
    ) -> Result<RegistrationHandle> {
        let trigger = *descriptor.trigger();
        if trigger.activation != Activation::Immediate && !doc.contains(trigger.watched) {
            return Err(RevealError::TargetNotFound(trigger.watched));
        }
        if let Some(missing) = target.members().iter().find(|m| !doc.contains(**m)) {
            return Err(RevealError::TargetNotFound(*missing));
        }

        let key = target.key();
        if let Some(&existing) = self.target_index.get(&key) {
            let same = self
                .registrations
                .get(&existing)
                .is_some_and(|r| r.descriptor.id() == descriptor.id());
            if same {
                log::debug!("{existing} already registered for {key:?}");
                return Ok(existing);
            }
            log::debug!("replacing {existing} for {key:?}");
            self.cancel(existing, doc)?;
        }

        let handle = RegistrationHandle(self.next_handle);
        self.next_handle += 1;

        let members: Vec<Member> = target.members().iter().map(|e| Member::new(*e)).collect();
        for member in &members {
            doc.apply_style(member.element, descriptor.from());
        }

        let mut registration = Registration {
            key: key.clone(),
            descriptor,
            members,
            watch: None,
        };

        let immediate = trigger.activation == Activation::Immediate;
        if !immediate {
            match self.observer.observe(&*doc, trigger.watched, trigger.activation) {
                Ok(watch) => {
                    registration.watch = Some(watch);
                    self.watch_index.insert(watch, handle);
                }
                Err(RevealError::ObserverUnavailable) => {
                    log::warn!("intersection detection unavailable; showing {key:?} without animation");
                    for member in registration.members.iter_mut() {
                        member.state = PlayState::Played;
                        member.base = 1.0;
                        doc.apply_style(member.element, registration.descriptor.to());
                        self.event_queue.push(RevealEvent::ShownWithoutAnimation {
                            handle,
                            element: member.element,
                            at_ms: self.clock_ms,
                        });
                    }
                }
                Err(other) => return Err(other),
            }
        }

        log::debug!(
            "registered {handle} for {key:?} ({} member(s))",
            registration.members.len()
        );
        self.registrations.insert(handle, registration);
        self.target_index.insert(key, handle);

        if immediate {
            self.enter(handle);
        }
        Ok(handle)
    }

    /// Cancel a registration: stop pending and in-flight transitions, drop
    /// the animated styles, and release the observer binding.
    pub fn cancel<D: Document + ?Sized>(
        &mut self,
        handle: RegistrationHandle,
        doc: &mut D,
    ) -> Result<()> {
        let mut registration = self
            .registrations
            .remove(&handle)
            .ok_or(RevealError::UnknownRegistration(handle))?;

        for member in registration.members.iter_mut() {
            if let Some(transition) = member.transition.as_mut() {
                if transition.is_active() {
                    transition.cancel();
                    self.event_queue.push(RevealEvent::Cancelled {
                        handle,
                        element: member.element,
                        at_ms: self.clock_ms,
                    });
                }
            }
            member.transition = None;
            doc.clear_style(member.element);
        }

        if let Some(watch) = registration.watch {
            self.observer.unobserve(watch);
            self.watch_index.remove(&watch);
        }
        if self.target_index.get(&registration.key) == Some(&handle) {
            self.target_index.remove(&registration.key);
        }
        log::debug!("cancelled {handle}");
        Ok(())
    }

    /// Poll viewport signals, then advance every transition by `delta_ms`
    /// and write the resulting styles.
    pub fn frame<D: Document + ?Sized>(&mut self, delta_ms: f32, doc: &mut D) {
        self.poll_visibility(&*doc);
        self.advance(delta_ms, doc);
    }

    /// Apply visibility changes reported by the observer since the last poll.
    pub fn poll_visibility<D: Document + ?Sized>(&mut self, doc: &D) {
        let signals = self.observer.poll(doc);
        for signal in signals {
            let Some(&handle) = self.watch_index.get(&signal.watch) else {
                continue;
            };
            if signal.visible {
                self.enter(handle);
            } else {
                self.leave(handle);
            }
        }
    }

    /// Advance the clock and all transitions, then write styles.
    pub fn advance<D: Document + ?Sized>(&mut self, delta_ms: f32, doc: &mut D) {
        self.clock_ms += delta_ms as f64;
        let now = self.clock_ms;

        for (handle, registration) in self.registrations.iter_mut() {
            for member in registration.members.iter_mut() {
                let Some(transition) = member.transition.as_mut() else {
                    continue;
                };
                let was_pending = transition.is_pending();
                transition.update(delta_ms);
                if was_pending && !transition.is_pending() {
                    self.event_queue.push(RevealEvent::Started {
                        handle: *handle,
                        element: member.element,
                        direction: RevealDirection::Forward,
                        at_ms: now,
                    });
                }
                doc.apply_style(member.element, &transition.current_value());

                if transition.is_finished() {
                    member.transition = None;
                    match member.state {
                        PlayState::Playing => {
                            member.state = PlayState::Played;
                            member.base = 1.0;
                            self.event_queue.push(RevealEvent::Completed {
                                handle: *handle,
                                element: member.element,
                                at_ms: now,
                            });
                        }
                        PlayState::Reversing => {
                            member.state = PlayState::Unplayed;
                            member.base = 0.0;
                            self.event_queue.push(RevealEvent::Reversed {
                                handle: *handle,
                                element: member.element,
                                at_ms: now,
                            });
                        }
                        PlayState::Unplayed | PlayState::Played => {}
                    }
                }
            }
        }
    }

    fn enter(&mut self, handle: RegistrationHandle) {
        let Some(registration) = self.registrations.get_mut(&handle) else {
            return;
        };
        let now = self.clock_ms;
        let descriptor = &registration.descriptor;

        for (index, member) in registration.members.iter_mut().enumerate() {
            match member.state {
                PlayState::Unplayed => {
                    let delay = descriptor.start_delay_ms(index);
                    member.transition = Some(RevealTransition::new(
                        member.element,
                        descriptor.from().clone(),
                        descriptor.to().clone(),
                        descriptor.duration_ms(),
                        delay,
                        descriptor.easing(),
                    ));
                    member.base = 0.0;
                    member.state = PlayState::Playing;
                    if delay <= 0.0 {
                        self.event_queue.push(RevealEvent::Started {
                            handle,
                            element: member.element,
                            direction: RevealDirection::Forward,
                            at_ms: now,
                        });
                    }
                }
                PlayState::Reversing => {
                    let covered = member.covered();
                    log::debug!("{} re-entered while reversing", member.element);
                    self.event_queue.push(RevealEvent::Interrupted {
                        handle,
                        element: member.element,
                        direction: RevealDirection::Forward,
                        at_ms: now,
                    });
                    if let Some(transition) = member.transition.as_mut() {
                        transition.retarget(
                            descriptor.to().clone(),
                            descriptor.duration_ms() * (1.0 - covered),
                            descriptor.easing(),
                        );
                    }
                    member.base = covered;
                    member.state = PlayState::Playing;
                    self.event_queue.push(RevealEvent::Started {
                        handle,
                        element: member.element,
                        direction: RevealDirection::Forward,
                        at_ms: now,
                    });
                }
                PlayState::Playing | PlayState::Played => {}
            }
        }
    }

    fn leave(&mut self, handle: RegistrationHandle) {
        let Some(registration) = self.registrations.get_mut(&handle) else {
            return;
        };
        let descriptor = &registration.descriptor;
        if descriptor.trigger().replay == ReplayPolicy::PlayOnce {
            return;
        }
        let now = self.clock_ms;

        for member in registration.members.iter_mut() {
            let pending = member
                .transition
                .as_ref()
                .is_some_and(RevealTransition::is_pending);
            match member.state {
                // Still waiting on its stagger delay: it never moved.
                PlayState::Playing if pending => {
                    member.transition = None;
                    member.state = PlayState::Unplayed;
                    member.base = 0.0;
                }
                PlayState::Playing => {
                    let covered = member.covered();
                    log::debug!("{} left while playing", member.element);
                    self.event_queue.push(RevealEvent::Interrupted {
                        handle,
                        element: member.element,
                        direction: RevealDirection::Reverse,
                        at_ms: now,
                    });
                    if let Some(transition) = member.transition.as_mut() {
                        transition.retarget(
                            descriptor.from().clone(),
                            descriptor.duration_ms() * covered,
                            descriptor.easing(),
                        );
                    }
                    member.base = covered;
                    member.state = PlayState::Reversing;
                    self.event_queue.push(RevealEvent::Started {
                        handle,
                        element: member.element,
                        direction: RevealDirection::Reverse,
                        at_ms: now,
                    });
                }
                PlayState::Played => {
                    member.transition = Some(RevealTransition::new(
                        member.element,
                        descriptor.to().clone(),
                        descriptor.from().clone(),
                        descriptor.duration_ms(),
                        0.0,
                        descriptor.easing(),
                    ));
                    member.base = 1.0;
                    member.state = PlayState::Reversing;
                    self.event_queue.push(RevealEvent::Started {
                        handle,
                        element: member.element,
                        direction: RevealDirection::Reverse,
                        at_ms: now,
                    });
                }
                PlayState::Unplayed | PlayState::Reversing => {}
            }
        }
    }

    pub fn is_registered(&self, handle: RegistrationHandle) -> bool {
        self.registrations.contains_key(&handle)
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    /// Number of live observer bindings.
    pub fn binding_count(&self) -> usize {
        self.observer.watch_count()
    }

    pub fn play_state(&self, handle: RegistrationHandle, element: ElementId) -> Option<PlayState> {
        self.registrations
            .get(&handle)?
            .members
            .iter()
            .find(|m| m.element == element)
            .map(|m| m.state)
    }

    /// Play state of every member, in member order.
    pub fn play_states(&self, handle: RegistrationHandle) -> Vec<(ElementId, PlayState)> {
        self.registrations
            .get(&handle)
            .map(|r| r.members.iter().map(|m| (m.element, m.state)).collect())
            .unwrap_or_default()
    }

    /// True if any transition is pending or running.
    pub fn has_active_transitions(&self) -> bool {
        self.registrations
            .values()
            .flat_map(|r| r.members.iter())
            .any(|m| m.transition.is_some())
    }

    /// Registry clock in milliseconds since creation.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn events(&self) -> &EventQueue {
        &self.event_queue
    }

    pub fn drain_events(&mut self) -> Vec<RevealEvent> {
        self.event_queue.drain().collect()
    }

    /// Drop undelivered events.
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }
}

static_assertions::assert_impl_all!(RevealRegistry: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::StyleProperty;
    use crate::document::SimDocument;
    use crate::geometry::{Rect, Size};

    fn page() -> SimDocument {
        let mut doc = SimDocument::new(Size::new(1000.0, 1000.0));
        doc.set_content_size(Size::new(1000.0, 6000.0));
        doc
    }

    fn fade(trigger: TriggerSpec) -> AnimationDescriptor {
        AnimationDescriptor::new(
            StyleValues::new().opacity(0.0),
            StyleValues::new().opacity(1.0),
            trigger,
        )
        .with_duration_ms(100.0)
        .with_easing(EasingFunction::Linear)
    }

    fn opacity(doc: &SimDocument, element: ElementId) -> Option<f64> {
        doc.style(element).and_then(|s| s.get(StyleProperty::Opacity))
    }

    #[test]
    fn test_register_applies_from_state() -> Result<()> {
        let mut doc = page();
        let el = doc.add_element(Rect::new(0.0, 2000.0, 1000.0, 400.0));
        let mut registry = RevealRegistry::new();

        let handle = registry.register(RevealTarget::Element(el), fade(TriggerSpec::ratio(el, 0.2)), &mut doc)?;
        assert_eq!(opacity(&doc, el), Some(0.0));
        assert_eq!(registry.play_state(handle, el), Some(PlayState::Unplayed));
        assert_eq!(registry.binding_count(), 1);
        Ok(())
    }

    #[test]
    fn test_target_not_found() {
        let mut doc = page();
        let mut registry = RevealRegistry::new();
        let ghost = ElementId(404);
        let result = registry.register(RevealTarget::Element(ghost), fade(TriggerSpec::ratio(ghost, 0.2)), &mut doc);
        assert_eq!(result, Err(RevealError::TargetNotFound(ghost)));
        assert_eq!(registry.registration_count(), 0);
        assert_eq!(registry.binding_count(), 0);
    }

    #[test]
    fn test_missing_group_member_is_reported() {
        let mut doc = page();
        let list = doc.add_element(Rect::new(0.0, 0.0, 1000.0, 400.0));
        let item = doc.add_element(Rect::new(0.0, 0.0, 1000.0, 100.0));
        let ghost = ElementId(999);
        let mut registry = RevealRegistry::new();
        let result = registry.register(
            RevealTarget::group("list", vec![item, ghost]),
            fade(TriggerSpec::ratio(list, 0.2)),
            &mut doc,
        );
        assert_eq!(result, Err(RevealError::TargetNotFound(ghost)));
        assert_eq!(opacity(&doc, item), None);
    }

    #[test]
    fn test_plays_on_entry_and_completes() -> Result<()> {
        let mut doc = page();
        let el = doc.add_element(Rect::new(0.0, 200.0, 1000.0, 400.0));
        let mut registry = RevealRegistry::new();
        let handle = registry.register(RevealTarget::Element(el), fade(TriggerSpec::ratio(el, 0.2)), &mut doc)?;

        registry.frame(50.0, &mut doc);
        assert_eq!(registry.play_state(handle, el), Some(PlayState::Playing));
        assert!((opacity(&doc, el).unwrap_or_default() - 0.5).abs() < 1e-6);

        registry.frame(50.0, &mut doc);
        assert_eq!(registry.play_state(handle, el), Some(PlayState::Played));
        assert_eq!(opacity(&doc, el), Some(1.0));

        let events = registry.drain_events();
        assert!(events[0].is_forward_start());
        assert!(matches!(events[1], RevealEvent::Completed { at_ms, .. } if at_ms == 100.0));
        assert!(!registry.has_active_transitions());
        Ok(())
    }

    #[test]
    fn test_immediate_plays_without_binding() -> Result<()> {
        let mut doc = page();
        let el = doc.add_element(Rect::new(0.0, 5000.0, 1000.0, 400.0));
        let mut registry = RevealRegistry::new();
        let handle = registry.register(
            RevealTarget::Element(el),
            fade(TriggerSpec::immediate(el)).with_delay_ms(500.0),
            &mut doc,
        )?;
        assert_eq!(registry.binding_count(), 0);
        assert_eq!(registry.play_state(handle, el), Some(PlayState::Playing));

        registry.frame(400.0, &mut doc);
        assert_eq!(opacity(&doc, el), Some(0.0));
        registry.frame(200.0, &mut doc);
        assert_eq!(registry.play_state(handle, el), Some(PlayState::Played));
        Ok(())
    }

    #[test]
    fn test_observer_unavailable_shows_content() -> Result<()> {
        let mut doc = page().without_intersection();
        let el = doc.add_element(Rect::new(0.0, 3000.0, 1000.0, 400.0));
        let mut registry = RevealRegistry::new();
        let handle = registry.register(RevealTarget::Element(el), fade(TriggerSpec::ratio(el, 0.2)), &mut doc)?;

        assert_eq!(opacity(&doc, el), Some(1.0));
        assert_eq!(registry.play_state(handle, el), Some(PlayState::Played));
        assert_eq!(registry.binding_count(), 0);
        let events = registry.drain_events();
        assert!(matches!(events[..], [RevealEvent::ShownWithoutAnimation { .. }]));
        Ok(())
    }

    #[test]
    fn test_new_descriptor_replaces_registration() -> Result<()> {
        let mut doc = page();
        let el = doc.add_element(Rect::new(0.0, 3000.0, 1000.0, 400.0));
        let mut registry = RevealRegistry::new();
        let first = registry.register(RevealTarget::Element(el), fade(TriggerSpec::ratio(el, 0.2)), &mut doc)?;
        let second = registry.register(RevealTarget::Element(el), fade(TriggerSpec::ratio(el, 0.5)), &mut doc)?;

        assert_ne!(first, second);
        assert!(!registry.is_registered(first));
        assert_eq!(registry.registration_count(), 1);
        assert_eq!(registry.binding_count(), 1);
        Ok(())
    }

    #[test]
    fn test_cancel_reverts_and_detaches() -> Result<()> {
        let mut doc = page();
        let el = doc.add_element(Rect::new(0.0, 0.0, 1000.0, 400.0));
        let mut registry = RevealRegistry::new();
        let handle = registry.register(RevealTarget::Element(el), fade(TriggerSpec::ratio(el, 0.2)), &mut doc)?;
        registry.frame(30.0, &mut doc);
        registry.drain_events();

        registry.cancel(handle, &mut doc)?;
        assert_eq!(doc.style(el), None);
        assert_eq!(registry.registration_count(), 0);
        assert_eq!(registry.binding_count(), 0);
        assert!(matches!(registry.drain_events()[..], [RevealEvent::Cancelled { .. }]));

        assert_eq!(
            registry.cancel(handle, &mut doc),
            Err(RevealError::UnknownRegistration(handle))
        );
        Ok(())
    }

    #[test]
    fn test_leave_while_pending_resets_member() -> Result<()> {
        let mut doc = page();
        let list = doc.add_element(Rect::new(0.0, 0.0, 1000.0, 400.0));
        let a = doc.add_element(Rect::new(0.0, 0.0, 1000.0, 100.0));
        let b = doc.add_element(Rect::new(0.0, 100.0, 1000.0, 100.0));
        let mut registry = RevealRegistry::new();
        let handle = registry.register(
            RevealTarget::group("rows", vec![a, b]),
            fade(TriggerSpec::ratio(list, 0.5).reverse_on_exit()).with_stagger_ms(200.0),
            &mut doc,
        )?;

        registry.frame(50.0, &mut doc);
        doc.set_scroll_offset(Axis::Vertical, 2000.0);
        registry.frame(16.0, &mut doc);

        assert_eq!(registry.play_state(handle, a), Some(PlayState::Reversing));
        assert_eq!(registry.play_state(handle, b), Some(PlayState::Unplayed));
        assert_eq!(opacity(&doc, b), Some(0.0));
        Ok(())
    }
}
