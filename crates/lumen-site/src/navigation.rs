//! Navigation bar state: condensed style, mobile menu and anchor links.

use lumen_config::NavigationSettings;
use lumen_motion::{
    AnimationDescriptor, Axis, Document, EasingFunction, ElementId, PowerMode, RegistrationHandle,
    Result, RevealRegistry, RevealTarget, ScrollTarget, ScrollToOptions, SmoothScroll,
    StyleValues, TriggerSpec,
};

use crate::layout::{NavigationLayout, PageLayout};
use crate::sections::RevealTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
}

pub const NAV_LINKS: [NavLink; 6] = [
    NavLink { name: "Home", href: "#hero" },
    NavLink { name: "About", href: "#about" },
    NavLink { name: "Services", href: "#services" },
    NavLink { name: "Projects", href: "#projects" },
    NavLink { name: "Achievements", href: "#certificates" },
    NavLink { name: "Contact", href: "#contact" },
];

#[derive(Debug)]
pub struct NavigationBar {
    condensed_after: f32,
    condensed: bool,
    menu_open: bool,
    layout: NavigationLayout,
    timing: RevealTiming,
    menu_reveal: Option<RegistrationHandle>,
}

impl NavigationBar {
    pub fn new(settings: &NavigationSettings, layout: NavigationLayout, timing: RevealTiming) -> Self {
        Self {
            condensed_after: settings.condensed_after,
            condensed: false,
            menu_open: false,
            layout,
            timing,
            menu_reveal: None,
        }
    }

    pub fn is_condensed(&self) -> bool {
        self.condensed
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Track the scroll offset. Returns true when the condensed style toggled.
    pub fn on_scroll(&mut self, offset: f32) -> bool {
        let condensed = offset > self.condensed_after;
        if condensed == self.condensed {
            return false;
        }
        self.condensed = condensed;
        log::debug!("navigation bar condensed: {condensed}");
        true
    }

    /// Open or close the mobile menu, returning whether it is now open.
    pub fn toggle_menu<D: Document + ?Sized>(
        &mut self,
        registry: &mut RevealRegistry,
        doc: &mut D,
    ) -> Result<bool> {
        if self.menu_open {
            self.close_menu(registry, doc)?;
        } else {
            self.open_menu(registry, doc)?;
        }
        Ok(self.menu_open)
    }

    /// Open the mobile menu and replay its link reveal from the start.
    pub fn open_menu<D: Document + ?Sized>(
        &mut self,
        registry: &mut RevealRegistry,
        doc: &mut D,
    ) -> Result<()> {
        if self.menu_open {
            return Ok(());
        }
        self.release_reveal(registry, doc)?;
        let descriptor = AnimationDescriptor::new(
            StyleValues::new().opacity(0.0).x(-30.0),
            StyleValues::new().opacity(1.0).x(0.0),
            TriggerSpec::immediate(self.layout.bar),
        )
        .with_duration_ms(self.timing.ms(0.4))
        .with_easing(EasingFunction::power(2, PowerMode::Out))
        .with_stagger_ms(self.timing.ms(0.1));
        let target = RevealTarget::group("mobile-nav-links", self.layout.mobile_links.clone());
        self.menu_reveal = Some(registry.register(target, descriptor, doc)?);
        self.menu_open = true;
        Ok(())
    }

    pub fn close_menu<D: Document + ?Sized>(
        &mut self,
        registry: &mut RevealRegistry,
        doc: &mut D,
    ) -> Result<()> {
        self.menu_open = false;
        self.release_reveal(registry, doc)
    }

    fn release_reveal<D: Document + ?Sized>(
        &mut self,
        registry: &mut RevealRegistry,
        doc: &mut D,
    ) -> Result<()> {
        match self.menu_reveal.take() {
            Some(handle) if registry.is_registered(handle) => registry.cancel(handle, doc),
            _ => Ok(()),
        }
    }

    /// Follow an anchor link: close the menu and scroll to the section.
    ///
    /// Scrolls smoothly while the engine runs and jumps natively otherwise.
    /// Returns false when the anchor names no section.
    pub fn follow<D: Document + ?Sized>(
        &mut self,
        anchor: &str,
        page: &PageLayout,
        registry: &mut RevealRegistry,
        scroll: &mut SmoothScroll,
        doc: &mut D,
    ) -> Result<bool> {
        self.close_menu(registry, doc)?;
        let Some(element) = page.anchor(anchor) else {
            log::warn!("navigation anchor {anchor} matches no section");
            return Ok(false);
        };
        if scroll.is_running() {
            scroll.scroll_to(ScrollTarget::Element(element), &ScrollToOptions::default(), doc)?;
        } else {
            jump_to(element, scroll.config().orientation, doc);
        }
        Ok(true)
    }
}

fn jump_to<D: Document + ?Sized>(element: ElementId, axis: Axis, doc: &mut D) {
    if let Some(rect) = doc.element_rect(element) {
        let offset = rect.start(axis).clamp(0.0, doc.max_scroll(axis));
        doc.set_scroll_offset(axis, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContent;
    use lumen_motion::{PlayState, ScrollConfig, SimDocument, Size};

    fn setup() -> (NavigationBar, PageLayout, RevealRegistry, SimDocument) {
        let mut doc = SimDocument::new(Size::new(390.0, 844.0));
        let page = PageLayout::simulate(&mut doc, &SiteContent::portfolio().unwrap());
        let nav = NavigationBar::new(
            &NavigationSettings::default(),
            page.navigation.clone(),
            RevealTiming::default(),
        );
        (nav, page, RevealRegistry::new(), doc)
    }

    #[test]
    fn test_condensed_after_threshold() {
        let (mut nav, ..) = setup();
        assert!(!nav.on_scroll(50.0));
        assert!(!nav.is_condensed());
        assert!(nav.on_scroll(50.5));
        assert!(nav.is_condensed());
        assert!(!nav.on_scroll(400.0));
        assert!(nav.on_scroll(0.0));
    }

    #[test]
    fn test_menu_reveal_replays_on_each_open() {
        let (mut nav, page, mut registry, mut doc) = setup();
        let links = page.navigation.mobile_links.clone();

        assert!(nav.toggle_menu(&mut registry, &mut doc).unwrap());
        registry.frame(1000.0, &mut doc);
        let first = registry.drain_events();
        assert_eq!(first.iter().filter(|e| e.is_forward_start()).count(), links.len());

        assert!(!nav.toggle_menu(&mut registry, &mut doc).unwrap());
        assert_eq!(registry.registration_count(), 0);
        assert!(doc.style(links[0]).is_none());

        assert!(nav.toggle_menu(&mut registry, &mut doc).unwrap());
        assert_eq!(registry.registration_count(), 1);
        let handle = nav.menu_reveal.unwrap();
        // Later links wait out their stagger holding the `from` state.
        assert_eq!(registry.play_state(handle, links[0]), Some(PlayState::Playing));
        registry.frame(50.0, &mut doc);
        assert_eq!(registry.play_state(handle, links[1]), Some(PlayState::Playing));
        assert_eq!(
            doc.style(links[1]).unwrap().get(lumen_motion::StyleProperty::Opacity),
            Some(0.0)
        );
    }

    #[test]
    fn test_follow_closes_menu_and_scrolls() {
        let (mut nav, page, mut registry, mut doc) = setup();
        let mut scroll = SmoothScroll::new(ScrollConfig::default());
        nav.open_menu(&mut registry, &mut doc).unwrap();

        // Engine not started yet: native jump.
        assert!(nav.follow("#projects", &page, &mut registry, &mut scroll, &mut doc).unwrap());
        assert!(!nav.is_menu_open());
        let projects_top = doc.element_rect(page.projects.section).unwrap().y;
        assert_eq!(doc.scroll_offset(Axis::Vertical), projects_top);

        assert!(!nav.follow("#blog", &page, &mut registry, &mut scroll, &mut doc).unwrap());
    }
}
