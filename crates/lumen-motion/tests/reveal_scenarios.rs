use anyhow::Result;
use lumen_motion::{
    AnimationDescriptor, Axis, Document, EasingFunction, ElementId, PlayState, Rect,
    RevealDirection, RevealEvent, RevealRegistry, RevealTarget, SimDocument, Size,
    StyleProperty, StyleValues, TriggerSpec,
};

const FRAME_MS: f32 = 10.0;

fn page() -> SimDocument {
    let mut doc = SimDocument::new(Size::new(1000.0, 1000.0));
    doc.set_content_size(Size::new(1000.0, 8000.0));
    doc
}

fn fade(trigger: TriggerSpec, duration_ms: f32) -> AnimationDescriptor {
    AnimationDescriptor::new(
        StyleValues::new().opacity(0.0).y(40.0),
        StyleValues::new().opacity(1.0).y(0.0),
        trigger,
    )
    .with_duration_ms(duration_ms)
    .with_easing(EasingFunction::Linear)
}

fn opacity(doc: &SimDocument, element: ElementId) -> f64 {
    doc.style(element)
        .and_then(|s| s.get(StyleProperty::Opacity))
        .unwrap_or(f64::NAN)
}

fn run(registry: &mut RevealRegistry, doc: &mut SimDocument, frames: usize) {
    for _ in 0..frames {
        registry.frame(FRAME_MS, doc);
    }
}

#[test]
fn play_once_ignores_later_visibility_toggles() -> Result<()> {
    let mut doc = page();
    let card = doc.add_element(Rect::new(0.0, 1500.0, 1000.0, 400.0));
    let mut registry = RevealRegistry::new();
    let handle = registry.register(
        RevealTarget::Element(card),
        fade(TriggerSpec::ratio(card, 0.2), 300.0),
        &mut doc,
    )?;

    doc.set_scroll_offset(Axis::Vertical, 1200.0);
    run(&mut registry, &mut doc, 40);
    assert_eq!(registry.play_state(handle, card), Some(PlayState::Played));

    let settled = doc.style(card).cloned();
    let writes = doc.style_write_count();
    registry.drain_events();

    for offset in [0.0, 1400.0, 0.0, 1500.0, 3000.0, 1200.0] {
        doc.set_scroll_offset(Axis::Vertical, offset);
        run(&mut registry, &mut doc, 5);
        assert_eq!(registry.play_state(handle, card), Some(PlayState::Played));
    }

    assert_eq!(doc.style(card).cloned(), settled);
    assert_eq!(doc.style_write_count(), writes);
    assert!(registry.drain_events().is_empty());
    Ok(())
}

#[test]
fn ratio_point_eight_plays_forward_and_never_reverses() -> Result<()> {
    let mut doc = page();
    // 400px tall, top at 1500
    let panel = doc.add_element(Rect::new(0.0, 1500.0, 1000.0, 400.0));
    let mut registry = RevealRegistry::new();
    let handle = registry.register(
        RevealTarget::Element(panel),
        fade(TriggerSpec::ratio(panel, 0.8), 500.0),
        &mut doc,
    )?;

    // 50% visible: below the threshold
    doc.set_scroll_offset(Axis::Vertical, 700.0);
    run(&mut registry, &mut doc, 3);
    assert_eq!(registry.play_state(handle, panel), Some(PlayState::Unplayed));
    assert_eq!(opacity(&doc, panel), 0.0);

    // 85% visible
    doc.set_scroll_offset(Axis::Vertical, 840.0);
    let mut last = 0.0;
    for _ in 0..50 {
        registry.frame(FRAME_MS, &mut doc);
        let now = opacity(&doc, panel);
        assert!(now >= last, "opacity went backwards: {last} -> {now}");
        last = now;
    }
    assert_eq!(opacity(&doc, panel), 1.0);
    assert_eq!(registry.play_state(handle, panel), Some(PlayState::Played));

    // Back to 0% visible
    doc.set_scroll_offset(Axis::Vertical, 0.0);
    run(&mut registry, &mut doc, 60);
    assert_eq!(opacity(&doc, panel), 1.0);
    assert_eq!(registry.play_state(handle, panel), Some(PlayState::Played));
    assert!(
        registry
            .drain_events()
            .iter()
            .all(|e| !matches!(e, RevealEvent::Reversed { .. } | RevealEvent::Interrupted { .. }))
    );
    Ok(())
}

#[test]
fn group_members_start_no_earlier_than_their_stagger_offset() -> Result<()> {
    let mut doc = page();
    let list = doc.add_element(Rect::new(0.0, 2000.0, 1000.0, 500.0));
    let items: Vec<ElementId> = (0..5)
        .map(|i| doc.add_element(Rect::new(0.0, 2000.0 + i as f32 * 100.0, 1000.0, 100.0)))
        .collect();
    let stagger_ms = 80.0;

    let mut registry = RevealRegistry::new();
    let handle = registry.register(
        RevealTarget::group("skills", items.clone()),
        fade(TriggerSpec::line(list, 0.8), 200.0).with_stagger_ms(stagger_ms),
        &mut doc,
    )?;

    run(&mut registry, &mut doc, 3);
    doc.set_scroll_offset(Axis::Vertical, 1500.0);
    let triggered_at = registry.clock_ms();
    run(&mut registry, &mut doc, 100);

    let events = registry.drain_events();
    for (k, item) in items.iter().enumerate() {
        let started = events
            .iter()
            .find(|e| e.is_forward_start() && e.element() == *item)
            .map(|e| e.at_ms())
            .ok_or_else(|| anyhow::anyhow!("member {k} never started"))?;
        assert!(
            started - triggered_at >= k as f64 * stagger_ms as f64,
            "member {k} started {}ms after the trigger",
            started - triggered_at
        );
        assert_eq!(registry.play_state(handle, *item), Some(PlayState::Played));
    }
    Ok(())
}

#[test]
fn cancelling_a_group_stops_members_that_have_not_started() -> Result<()> {
    let mut doc = page();
    let list = doc.add_element(Rect::new(0.0, 0.0, 1000.0, 500.0));
    let items: Vec<ElementId> = (0..5)
        .map(|i| doc.add_element(Rect::new(0.0, i as f32 * 100.0, 1000.0, 100.0)))
        .collect();

    let mut registry = RevealRegistry::new();
    let handle = registry.register(
        RevealTarget::group("projects", items.clone()),
        fade(TriggerSpec::ratio(list, 0.2), 50.0).with_stagger_ms(100.0),
        &mut doc,
    )?;

    // Trigger at t = 0; members start at 0, 100, 200, 300, 400.
    run(&mut registry, &mut doc, 25);
    let cancelled_at = registry.clock_ms();
    registry.cancel(handle, &mut doc)?;
    run(&mut registry, &mut doc, 50);

    let events = registry.drain_events();
    let started: Vec<ElementId> = events
        .iter()
        .filter(|e| e.is_started())
        .map(|e| e.element())
        .collect();
    assert_eq!(started, items[..3].to_vec());
    assert!(events.iter().filter(|e| e.is_started()).all(|e| e.at_ms() <= cancelled_at));

    for late in &items[3..] {
        assert!(
            events
                .iter()
                .any(|e| matches!(e, RevealEvent::Cancelled { element, .. } if element == late))
        );
        assert!(doc.style(*late).is_none());
    }
    assert_eq!(registry.registration_count(), 0);
    assert!(!registry.has_active_transitions());
    Ok(())
}

#[test]
fn registering_the_same_pair_twice_keeps_one_registration() -> Result<()> {
    let mut doc = page();
    let hero = doc.add_element(Rect::new(0.0, 0.0, 1000.0, 800.0));
    let descriptor = fade(TriggerSpec::ratio(hero, 0.2), 300.0);
    let mut registry = RevealRegistry::new();

    let first = registry.register(RevealTarget::Element(hero), descriptor.clone(), &mut doc)?;
    let second = registry.register(RevealTarget::Element(hero), descriptor, &mut doc)?;

    assert_eq!(first, second);
    assert_eq!(registry.registration_count(), 1);
    assert_eq!(registry.binding_count(), 1);

    run(&mut registry, &mut doc, 40);
    let starts = registry
        .drain_events()
        .into_iter()
        .filter(RevealEvent::is_forward_start)
        .count();
    assert_eq!(starts, 1);
    Ok(())
}

#[test]
fn reverse_on_exit_starts_from_the_interpolated_value() -> Result<()> {
    let mut doc = page();
    let banner = doc.add_element(Rect::new(0.0, 1500.0, 1000.0, 400.0));
    let mut registry = RevealRegistry::new();
    let handle = registry.register(
        RevealTarget::Element(banner),
        AnimationDescriptor::new(
            StyleValues::new().opacity(0.0),
            StyleValues::new().opacity(1.0),
            TriggerSpec::ratio(banner, 0.2).reverse_on_exit(),
        )
        .with_duration_ms(1000.0)
        .with_easing(EasingFunction::Linear),
        &mut doc,
    )?;

    doc.set_scroll_offset(Axis::Vertical, 1200.0);
    run(&mut registry, &mut doc, 40);
    let at_exit = opacity(&doc, banner);
    assert!((at_exit - 0.4).abs() < 1e-4);

    doc.set_scroll_offset(Axis::Vertical, 0.0);
    registry.frame(FRAME_MS, &mut doc);
    let after = opacity(&doc, banner);
    assert!(after < at_exit && after > at_exit - 0.05, "jumped to {after}");
    assert_eq!(registry.play_state(handle, banner), Some(PlayState::Reversing));

    let events = registry.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        RevealEvent::Interrupted { direction: RevealDirection::Reverse, .. }
    )));

    run(&mut registry, &mut doc, 40);
    assert_eq!(opacity(&doc, banner), 0.0);
    assert_eq!(registry.play_state(handle, banner), Some(PlayState::Unplayed));
    assert!(
        registry
            .drain_events()
            .iter()
            .any(|e| matches!(e, RevealEvent::Reversed { .. }))
    );

    // Re-entry plays again
    doc.set_scroll_offset(Axis::Vertical, 1200.0);
    run(&mut registry, &mut doc, 101);
    assert_eq!(registry.play_state(handle, banner), Some(PlayState::Played));
    assert_eq!(opacity(&doc, banner), 1.0);
    Ok(())
}

#[test]
fn re_entry_while_reversing_interrupts_toward_the_end_state() -> Result<()> {
    let mut doc = page();
    let card = doc.add_element(Rect::new(0.0, 1500.0, 1000.0, 400.0));
    let mut registry = RevealRegistry::new();
    let handle = registry.register(
        RevealTarget::Element(card),
        fade(TriggerSpec::ratio(card, 0.2).reverse_on_exit(), 400.0),
        &mut doc,
    )?;

    doc.set_scroll_offset(Axis::Vertical, 1200.0);
    run(&mut registry, &mut doc, 50);
    assert_eq!(registry.play_state(handle, card), Some(PlayState::Played));

    doc.set_scroll_offset(Axis::Vertical, 0.0);
    run(&mut registry, &mut doc, 10);
    let mid = opacity(&doc, card);
    assert!(mid < 1.0 && mid > 0.0);
    assert_eq!(registry.play_state(handle, card), Some(PlayState::Reversing));
    registry.drain_events();

    doc.set_scroll_offset(Axis::Vertical, 1200.0);
    registry.frame(FRAME_MS, &mut doc);
    let resumed = opacity(&doc, card);
    assert!(resumed > mid && resumed < mid + 0.05);
    assert_eq!(registry.play_state(handle, card), Some(PlayState::Playing));

    let events = registry.drain_events();
    assert!(matches!(
        events[0],
        RevealEvent::Interrupted { direction: RevealDirection::Forward, .. }
    ));
    assert!(events[1].is_forward_start());

    run(&mut registry, &mut doc, 50);
    assert_eq!(opacity(&doc, card), 1.0);
    Ok(())
}

#[test]
fn growing_the_viewport_brings_an_element_into_view() -> Result<()> {
    let mut doc = page();
    let banner = doc.add_element(Rect::new(0.0, 1100.0, 1000.0, 200.0));
    let mut registry = RevealRegistry::new();
    let handle = registry.register(
        RevealTarget::Element(banner),
        fade(TriggerSpec::ratio(banner, 0.5), 200.0),
        &mut doc,
    )?;

    run(&mut registry, &mut doc, 5);
    assert_eq!(registry.play_state(handle, banner), Some(PlayState::Unplayed));

    doc.resize_viewport(Size::new(1000.0, 1300.0));
    run(&mut registry, &mut doc, 1);
    assert_eq!(registry.play_state(handle, banner), Some(PlayState::Playing));
    run(&mut registry, &mut doc, 30);
    assert_eq!(opacity(&doc, banner), 1.0);
    Ok(())
}

#[test]
fn moving_an_element_into_view_plays_every_group_member() -> Result<()> {
    let mut doc = page();
    let row = doc.add_element(Rect::new(0.0, 3000.0, 1000.0, 300.0));
    let cards: Vec<ElementId> = (0..3)
        .map(|i| doc.add_element(Rect::new(i as f32 * 300.0, 3000.0, 280.0, 300.0)))
        .collect();
    let mut registry = RevealRegistry::new();
    let handle = registry.register(
        RevealTarget::group("cards", cards.clone()),
        fade(TriggerSpec::line(row, 0.8), 100.0).with_stagger_ms(50.0),
        &mut doc,
    )?;

    run(&mut registry, &mut doc, 3);
    assert!(registry
        .play_states(handle)
        .iter()
        .all(|(_, state)| *state == PlayState::Unplayed));

    assert!(doc.move_element(row, Rect::new(0.0, 300.0, 1000.0, 300.0)));
    run(&mut registry, &mut doc, 40);
    let states = registry.play_states(handle);
    assert_eq!(
        states.iter().map(|(element, _)| *element).collect::<Vec<_>>(),
        cards
    );
    assert!(states.iter().all(|(_, state)| *state == PlayState::Played));
    assert!(!doc.move_element(ElementId(999), Rect::new(0.0, 0.0, 1.0, 1.0)));
    Ok(())
}

#[test]
fn registration_succeeds_once_a_missing_element_is_restored() -> Result<()> {
    let mut doc = page();
    let quote = doc.add_element(Rect::new(0.0, 200.0, 1000.0, 200.0));
    let rect = doc.remove_element(quote).unwrap_or_default();
    let mut registry = RevealRegistry::new();
    let descriptor = fade(TriggerSpec::ratio(quote, 0.5), 100.0);

    assert!(registry
        .register(RevealTarget::Element(quote), descriptor.clone(), &mut doc)
        .is_err());
    assert_eq!(registry.registration_count(), 0);

    doc.restore_element(quote, rect);
    let handle = registry.register(RevealTarget::Element(quote), descriptor, &mut doc)?;
    run(&mut registry, &mut doc, 20);
    assert_eq!(registry.play_state(handle, quote), Some(PlayState::Played));
    assert_eq!(opacity(&doc, quote), 1.0);
    Ok(())
}
