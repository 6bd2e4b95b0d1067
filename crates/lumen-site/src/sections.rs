//! Reveal tables for each page section.
//!
//! Each builder turns a section's element handles into the
//! `(target, descriptor)` list handed to `mount_section`. Times are
//! written in seconds, as they are authored, and scaled through
//! `RevealTiming`.

use lumen_config::RevealSettings;
use lumen_motion::{
    AnimationDescriptor, EasingFunction, ElementId, PowerMode, RevealTarget, SectionId, StyleValues,
    TriggerSpec,
};

use crate::layout::{
    AboutLayout, CardSectionLayout, CertificatesLayout, ContactLayout, HeroLayout, PageLayout,
    ProjectsLayout, ServicesLayout,
};

pub type RevealTable = Vec<(RevealTarget, AnimationDescriptor)>;

pub const HERO: SectionId = SectionId("hero");
pub const ABOUT: SectionId = SectionId("about");
pub const SERVICES: SectionId = SectionId("services");
pub const PROJECTS: SectionId = SectionId("projects");
pub const CERTIFICATES: SectionId = SectionId("certificates");
pub const CTA: SectionId = SectionId("cta");
pub const DOWNLOAD_CV: SectionId = SectionId("download-cv");
pub const CONTACT: SectionId = SectionId("contact");
pub const FOOTER: SectionId = SectionId("footer");

/// Easing fallback and global time scale applied to every reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTiming {
    pub default_easing: EasingFunction,
    pub scale: f32,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            default_easing: EasingFunction::power(1, PowerMode::Out),
            scale: 1.0,
        }
    }
}

impl RevealTiming {
    pub fn from_settings(settings: &RevealSettings) -> Self {
        let default_easing = EasingFunction::from_name(&settings.default_easing).unwrap_or_else(|| {
            log::warn!(
                "unknown reveal easing '{}', using power1.out",
                settings.default_easing
            );
            EasingFunction::power(1, PowerMode::Out)
        });
        Self {
            default_easing,
            scale: settings.duration_scale.max(0.0),
        }
    }

    /// Seconds to scaled milliseconds.
    pub fn ms(&self, seconds: f32) -> f32 {
        seconds * 1000.0 * self.scale
    }

    /// A descriptor with the default easing and the scaled duration.
    pub fn reveal(
        &self,
        from: StyleValues,
        to: StyleValues,
        trigger: TriggerSpec,
        seconds: f32,
    ) -> AnimationDescriptor {
        AnimationDescriptor::new(from, to, trigger)
            .with_duration_ms(self.ms(seconds))
            .with_easing(self.default_easing)
    }
}

fn power(power: u8, mode: PowerMode) -> EasingFunction {
    EasingFunction::power(power, mode)
}

fn back_out() -> EasingFunction {
    EasingFunction::BackOut { overshoot: 1.7 }
}

/// Title treatment shared by several sections: rise 50px out of a blur.
fn title_rise(timing: &RevealTiming, trigger: TriggerSpec) -> AnimationDescriptor {
    timing
        .reveal(
            StyleValues::new().opacity(0.0).y(50.0).blur(10.0),
            StyleValues::new().opacity(1.0).y(0.0).blur(0.0),
            trigger,
            1.0,
        )
        .with_easing(power(3, PowerMode::Out))
}

/// Hero timeline: plays on mount, headline then subtitle then buttons.
pub fn hero(layout: &HeroLayout, timing: &RevealTiming) -> RevealTable {
    let trigger = TriggerSpec::immediate(layout.section);
    vec![
        (
            RevealTarget::Element(layout.headline),
            title_rise(timing, trigger).with_delay_ms(timing.ms(0.5)),
        ),
        (
            RevealTarget::Element(layout.subtitle),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).y(30.0),
                    StyleValues::new().opacity(1.0).y(0.0),
                    trigger,
                    0.8,
                )
                .with_easing(power(2, PowerMode::Out))
                .with_delay_ms(timing.ms(1.0)),
        ),
        (
            RevealTarget::group("hero-cta", layout.cta_buttons.clone()),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).y(20.0),
                    StyleValues::new().opacity(1.0).y(0.0),
                    trigger,
                    0.6,
                )
                .with_easing(power(2, PowerMode::Out))
                .with_stagger_ms(timing.ms(0.15))
                .with_delay_ms(timing.ms(1.4)),
        ),
    ]
}

/// About: replays in reverse when scrolled back above the trigger line.
pub fn about(layout: &AboutLayout, timing: &RevealTiming) -> RevealTable {
    let section_line = TriggerSpec::line(layout.section, 0.7).reverse_on_exit();
    vec![
        (
            RevealTarget::Element(layout.section),
            timing.reveal(
                StyleValues::new().opacity(0.0),
                StyleValues::new().opacity(1.0),
                TriggerSpec::line(layout.section, 0.8).reverse_on_exit(),
                1.0,
            ),
        ),
        (
            RevealTarget::Element(layout.image),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).x(-80.0).blur(10.0),
                    StyleValues::new().opacity(1.0).x(0.0).blur(0.0),
                    section_line,
                    1.0,
                )
                .with_easing(power(3, PowerMode::Out)),
        ),
        (
            RevealTarget::Element(layout.content),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).x(50.0),
                    StyleValues::new().opacity(1.0).x(0.0),
                    section_line,
                    1.0,
                )
                .with_easing(power(3, PowerMode::Out)),
        ),
        (
            RevealTarget::group("about-skills", layout.skills.clone()),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).y(30.0).scale(0.9),
                    StyleValues::new().opacity(1.0).y(0.0).scale(1.0),
                    TriggerSpec::line(layout.skills_grid, 0.8).reverse_on_exit(),
                    0.5,
                )
                .with_easing(back_out())
                .with_stagger_ms(timing.ms(0.08)),
        ),
    ]
}

pub fn services(layout: &ServicesLayout, timing: &RevealTiming) -> RevealTable {
    let section_line = TriggerSpec::line(layout.section, 0.8);
    vec![
        (
            RevealTarget::Element(layout.title),
            title_rise(timing, section_line),
        ),
        (
            RevealTarget::Element(layout.description),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).y(30.0),
                    StyleValues::new().opacity(1.0).y(0.0),
                    section_line,
                    0.8,
                )
                .with_easing(power(2, PowerMode::Out)),
        ),
        (
            RevealTarget::group("service-cards", layout.cards.clone()),
            card_rise(timing, TriggerSpec::line(layout.grid, 0.8), 0.2),
        ),
    ]
}

/// Cards rising 60px while scaling up from 95%.
fn card_rise(timing: &RevealTiming, trigger: TriggerSpec, stagger: f32) -> AnimationDescriptor {
    timing
        .reveal(
            StyleValues::new().opacity(0.0).y(60.0).scale(0.95),
            StyleValues::new().opacity(1.0).y(0.0).scale(1.0),
            trigger,
            0.8,
        )
        .with_easing(power(3, PowerMode::Out))
        .with_stagger_ms(timing.ms(stagger))
}

pub fn projects(layout: &ProjectsLayout, timing: &RevealTiming) -> RevealTable {
    vec![
        (
            RevealTarget::Element(layout.title),
            title_rise(timing, TriggerSpec::line(layout.section, 0.8)),
        ),
        (
            RevealTarget::group("project-cards", layout.cards.clone()),
            card_rise(timing, TriggerSpec::line(layout.grid, 0.8), 0.15),
        ),
    ]
}

pub fn certificates(layout: &CertificatesLayout, timing: &RevealTiming) -> RevealTable {
    vec![
        (
            RevealTarget::Element(layout.title),
            title_rise(timing, TriggerSpec::line(layout.section, 0.8)),
        ),
        (
            RevealTarget::group("certificate-cards", layout.cards.clone()),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).y(40.0).scale(0.97),
                    StyleValues::new().opacity(1.0).y(0.0).scale(1.0),
                    TriggerSpec::line(layout.cards_container, 0.85),
                    0.7,
                )
                .with_easing(power(3, PowerMode::Out))
                .with_stagger_ms(timing.ms(0.12)),
        ),
    ]
}

pub fn cta(layout: &CardSectionLayout, timing: &RevealTiming) -> RevealTable {
    vec![(
        RevealTarget::Element(layout.card),
        timing
            .reveal(
                StyleValues::new().opacity(0.0).y(50.0).scale(0.95),
                StyleValues::new().opacity(1.0).y(0.0).scale(1.0),
                TriggerSpec::line(layout.section, 0.8),
                0.8,
            )
            .with_easing(power(3, PowerMode::Out)),
    )]
}

pub fn download_cv(layout: &CardSectionLayout, timing: &RevealTiming) -> RevealTable {
    vec![(
        RevealTarget::Element(layout.card),
        title_rise(timing, TriggerSpec::line(layout.section, 0.8)),
    )]
}

pub fn contact(layout: &ContactLayout, timing: &RevealTiming) -> RevealTable {
    vec![
        (
            RevealTarget::Element(layout.title),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).y(50.0),
                    StyleValues::new().opacity(1.0).y(0.0),
                    TriggerSpec::line(layout.section, 0.8),
                    1.0,
                )
                .with_easing(power(3, PowerMode::Out)),
        ),
        (
            RevealTarget::group("contact-fields", layout.fields.clone()),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).x(-40.0),
                    StyleValues::new().opacity(1.0).x(0.0),
                    TriggerSpec::line(layout.form, 0.8),
                    0.8,
                )
                .with_easing(power(3, PowerMode::Out))
                .with_stagger_ms(timing.ms(0.15)),
        ),
        (
            RevealTarget::group("contact-social", layout.social_icons.clone()),
            timing
                .reveal(
                    StyleValues::new().opacity(0.0).scale(0.8),
                    StyleValues::new().opacity(1.0).scale(1.0),
                    TriggerSpec::line(layout.social_row, 0.9),
                    0.5,
                )
                .with_easing(back_out())
                .with_stagger_ms(timing.ms(0.1)),
        ),
    ]
}

pub fn footer(footer: ElementId, timing: &RevealTiming) -> RevealTable {
    vec![(
        RevealTarget::Element(footer),
        timing
            .reveal(
                StyleValues::new().opacity(0.0).y(40.0),
                StyleValues::new().opacity(1.0).y(0.0),
                TriggerSpec::line(footer, 0.95),
                0.8,
            )
            .with_easing(power(3, PowerMode::Out)),
    )]
}

/// Every section's table, in page order.
pub fn page_tables(layout: &PageLayout, timing: &RevealTiming) -> Vec<(SectionId, RevealTable)> {
    vec![
        (HERO, hero(&layout.hero, timing)),
        (ABOUT, about(&layout.about, timing)),
        (SERVICES, services(&layout.services, timing)),
        (PROJECTS, projects(&layout.projects, timing)),
        (CERTIFICATES, certificates(&layout.certificates, timing)),
        (CTA, cta(&layout.cta, timing)),
        (DOWNLOAD_CV, download_cv(&layout.download_cv, timing)),
        (CONTACT, contact(&layout.contact, timing)),
        (FOOTER, footer(layout.footer, timing)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;
    use lumen_motion::{Activation, ReplayPolicy, SimDocument, Size};

    fn tables(timing: &RevealTiming) -> Vec<(SectionId, RevealTable)> {
        let mut doc = SimDocument::new(Size::new(1280.0, 800.0));
        let layout = PageLayout::simulate(&mut doc, &SiteContent::portfolio().unwrap());
        page_tables(&layout, timing)
    }

    #[test]
    fn test_hero_timeline_offsets() {
        let tables = tables(&RevealTiming::default());
        let (id, hero) = &tables[0];
        assert_eq!(*id, HERO);
        let delays: Vec<f32> = hero.iter().map(|(_, d)| d.delay_ms()).collect();
        assert_eq!(delays, vec![500.0, 1000.0, 1400.0]);
        assert!(hero
            .iter()
            .all(|(_, d)| d.trigger().activation == Activation::Immediate));
        assert_eq!(hero[2].1.start_delay_ms(1), 1550.0);
    }

    #[test]
    fn test_only_about_reverses_on_exit() {
        for (id, table) in tables(&RevealTiming::default()) {
            let expected = if id == ABOUT {
                ReplayPolicy::PlayAndReverseOnExit
            } else {
                ReplayPolicy::PlayOnce
            };
            assert!(table.iter().all(|(_, d)| d.trigger().replay == expected), "{id}");
        }
    }

    #[test]
    fn test_default_easing_fills_unnamed_curves() {
        let timing = RevealTiming::from_settings(&RevealSettings {
            default_easing: "linear".to_string(),
            duration_scale: 1.0,
        });
        let tables = tables(&timing);
        let (_, about) = &tables[1];
        assert_eq!(about[0].1.easing(), EasingFunction::Linear);
        assert_eq!(about[1].1.easing(), EasingFunction::power(3, PowerMode::Out));
    }

    #[test]
    fn test_duration_scale() {
        let timing = RevealTiming::from_settings(&RevealSettings {
            default_easing: "nonsense".to_string(),
            duration_scale: 0.5,
        });
        assert_eq!(timing.default_easing, EasingFunction::power(1, PowerMode::Out));
        let tables = tables(&timing);
        let (_, projects) = &tables[3];
        assert_eq!(projects[1].1.duration_ms(), 400.0);
        assert_eq!(projects[1].1.stagger_ms(), 75.0);

        let instant = self::tables(&RevealTiming { scale: 0.0, ..RevealTiming::default() });
        assert!(instant
            .iter()
            .flat_map(|(_, t)| t.iter())
            .all(|(_, d)| d.duration_ms() == 0.0 && d.delay_ms() == 0.0));
    }
}
