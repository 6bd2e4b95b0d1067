//! Element handles for every animated part of the page.
//!
//! Sections receive typed handles collected here instead of looking
//! elements up by selector. `PageLayout::simulate` lays the page out on a
//! `SimDocument` as a vertical stack of sections sized from the content.

use lumen_motion::{Document, ElementId, Rect, SimDocument};

use crate::content::SiteContent;
use crate::navigation::NAV_LINKS;
use crate::preloader::GateElements;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationLayout {
    pub bar: ElementId,
    /// Links in the mobile menu, in `NAV_LINKS` order, followed by the
    /// menu's contact button.
    pub mobile_links: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroLayout {
    pub section: ElementId,
    pub headline: ElementId,
    pub subtitle: ElementId,
    pub cta_buttons: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutLayout {
    pub section: ElementId,
    pub image: ElementId,
    pub content: ElementId,
    pub skills_grid: ElementId,
    pub skills: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesLayout {
    pub section: ElementId,
    pub title: ElementId,
    pub description: ElementId,
    pub grid: ElementId,
    pub cards: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectsLayout {
    pub section: ElementId,
    pub title: ElementId,
    pub grid: ElementId,
    pub cards: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificatesLayout {
    pub section: ElementId,
    pub title: ElementId,
    pub cards_container: ElementId,
    pub cards: Vec<ElementId>,
}

/// A section whose only animated part is a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSectionLayout {
    pub section: ElementId,
    pub card: ElementId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLayout {
    pub section: ElementId,
    pub title: ElementId,
    pub form: ElementId,
    pub fields: Vec<ElementId>,
    pub social_row: ElementId,
    pub social_icons: Vec<ElementId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub preloader: GateElements,
    pub navigation: NavigationLayout,
    pub hero: HeroLayout,
    pub about: AboutLayout,
    pub services: ServicesLayout,
    pub projects: ProjectsLayout,
    pub certificates: CertificatesLayout,
    pub cta: CardSectionLayout,
    pub download_cv: CardSectionLayout,
    pub contact: ContactLayout,
    pub footer: ElementId,
}

const CONTACT_FIELDS: usize = 3;
const SOCIAL_LINKS: usize = 3;
const CTA_BUTTONS: usize = 2;

/// Places sections top to bottom, each child relative to its section.
struct Stack<'a> {
    doc: &'a mut SimDocument,
    width: f32,
    top: f32,
}

impl Stack<'_> {
    fn section(&mut self, height: f32) -> ElementId {
        let id = self.doc.add_element(Rect::new(0.0, self.top, self.width, height));
        self.top += height;
        id
    }

    /// Child of the section that starts at `section_top`.
    fn child(&mut self, section_top: f32, dy: f32, x: f32, width: f32, height: f32) -> ElementId {
        self.doc
            .add_element(Rect::new(x, section_top + dy, width, height))
    }

    /// `count` equal cells in rows of `columns`, starting `dy` below the section top.
    fn grid(&mut self, section_top: f32, dy: f32, count: usize, columns: usize, cell: (f32, f32)) -> Vec<ElementId> {
        let columns = columns.max(1);
        let gap = 24.0;
        (0..count)
            .map(|i| {
                let (row, col) = (i / columns, i % columns);
                self.child(
                    section_top,
                    dy + row as f32 * (cell.1 + gap),
                    col as f32 * (cell.0 + gap),
                    cell.0,
                    cell.1,
                )
            })
            .collect()
    }
}

fn rows(count: usize, columns: usize) -> f32 {
    count.div_ceil(columns.max(1)) as f32
}

impl PageLayout {
    /// Lay the portfolio out on an in-memory document.
    pub fn simulate(doc: &mut SimDocument, content: &SiteContent) -> Self {
        let viewport = doc.viewport_size();
        let (width, height) = (viewport.width, viewport.height);

        let preloader = GateElements {
            overlay: doc.add_element(Rect::new(0.0, 0.0, width, height)),
            text: doc.add_element(Rect::new(width / 2.0 - 100.0, height / 2.0 - 40.0, 200.0, 80.0)),
        };
        let bar = doc.add_element(Rect::new(0.0, 0.0, width, 80.0));
        let mobile_links = (0..=NAV_LINKS.len())
            .map(|i| doc.add_element(Rect::new(24.0, 96.0 + i as f32 * 56.0, width - 48.0, 48.0)))
            .collect();

        let mut stack = Stack { doc, width, top: 0.0 };

        let top = stack.top;
        let hero = HeroLayout {
            section: stack.section(height),
            headline: stack.child(top, height * 0.3, 0.0, width, 160.0),
            subtitle: stack.child(top, height * 0.3 + 180.0, 0.0, width, 60.0),
            cta_buttons: (0..CTA_BUTTONS)
                .map(|i| stack.child(top, height * 0.3 + 280.0, i as f32 * 220.0, 200.0, 56.0))
                .collect(),
        };

        let skill_rows = rows(content.skills.len(), 4);
        let top = stack.top;
        let about = AboutLayout {
            section: stack.section(height.max(700.0 + skill_rows * 112.0)),
            image: stack.child(top, 128.0, 0.0, 320.0, 320.0),
            content: stack.child(top, 128.0, width / 2.0, width / 2.0, 400.0),
            skills_grid: stack.child(top, 560.0, width / 2.0, width / 2.0, skill_rows * 112.0),
            skills: stack.grid(top, 560.0, content.skills.len(), 4, (88.0, 88.0)),
        };

        let top = stack.top;
        let service_rows = rows(content.services.len(), 3);
        let services = ServicesLayout {
            section: stack.section(400.0 + service_rows * 484.0),
            title: stack.child(top, 128.0, 0.0, width, 72.0),
            description: stack.child(top, 216.0, 0.0, width, 48.0),
            grid: stack.child(top, 320.0, 0.0, width, service_rows * 484.0),
            cards: stack.grid(top, 320.0, content.services.len(), 3, (360.0, 460.0)),
        };

        let top = stack.top;
        let project_rows = rows(content.projects.len(), 3);
        let projects = ProjectsLayout {
            section: stack.section(320.0 + project_rows * 444.0),
            title: stack.child(top, 128.0, 0.0, width, 72.0),
            grid: stack.child(top, 240.0, 0.0, width, project_rows * 444.0),
            cards: stack.grid(top, 240.0, content.projects.len(), 3, (360.0, 420.0)),
        };

        let top = stack.top;
        let certificate_rows = rows(content.certificates.len(), 3);
        let certificates = CertificatesLayout {
            section: stack.section(560.0 + certificate_rows * 244.0),
            title: stack.child(top, 128.0, 0.0, width, 72.0),
            cards_container: stack.child(top, 480.0, 0.0, width, certificate_rows * 244.0),
            cards: stack.grid(top, 480.0, content.certificates.len(), 3, (360.0, 220.0)),
        };

        let top = stack.top;
        let cta = CardSectionLayout {
            section: stack.section(520.0),
            card: stack.child(top, 128.0, 0.0, width, 280.0),
        };

        let top = stack.top;
        let download_cv = CardSectionLayout {
            section: stack.section(480.0),
            card: stack.child(top, 128.0, 0.0, width, 240.0),
        };

        let top = stack.top;
        let contact = ContactLayout {
            section: stack.section(1100.0),
            title: stack.child(top, 128.0, 0.0, width, 72.0),
            form: stack.child(top, 320.0, 0.0, width / 2.0, 560.0),
            fields: (0..CONTACT_FIELDS)
                .map(|i| stack.child(top, 352.0 + i as f32 * 120.0, 32.0, width / 2.0 - 64.0, 96.0))
                .collect(),
            social_row: stack.child(top, 720.0, width / 2.0, width / 2.0, 56.0),
            social_icons: (0..SOCIAL_LINKS)
                .map(|i| stack.child(top, 720.0, width / 2.0 + i as f32 * 72.0, 56.0, 56.0))
                .collect(),
        };

        let footer = stack.section(240.0);

        log::debug!(
            "simulated page layout: {:.0}px tall, {} elements",
            stack.top,
            stack.doc.element_count()
        );

        Self {
            preloader,
            navigation: NavigationLayout { bar, mobile_links },
            hero,
            about,
            services,
            projects,
            certificates,
            cta,
            download_cv,
            contact,
            footer,
        }
    }

    /// Resolve a navigation anchor (`#about`, with or without the `#`).
    pub fn anchor(&self, anchor: &str) -> Option<ElementId> {
        match anchor.trim_start_matches('#') {
            "hero" => Some(self.hero.section),
            "about" => Some(self.about.section),
            "services" => Some(self.services.section),
            "projects" => Some(self.projects.section),
            "certificates" => Some(self.certificates.section),
            "cta" => Some(self.cta.section),
            "download-cv" => Some(self.download_cv.section),
            "contact" => Some(self.contact.section),
            "footer" => Some(self.footer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_motion::{Axis, Size};

    fn layout() -> (SimDocument, PageLayout) {
        let mut doc = SimDocument::new(Size::new(1280.0, 800.0));
        let content = SiteContent::portfolio().unwrap();
        let layout = PageLayout::simulate(&mut doc, &content);
        (doc, layout)
    }

    #[test]
    fn test_sections_stack_in_page_order() {
        let (doc, layout) = layout();
        let order = [
            layout.hero.section,
            layout.about.section,
            layout.services.section,
            layout.projects.section,
            layout.certificates.section,
            layout.cta.section,
            layout.download_cv.section,
            layout.contact.section,
            layout.footer,
        ];
        let tops: Vec<f32> = order
            .iter()
            .map(|id| doc.element_rect(*id).unwrap().y)
            .collect();
        assert_eq!(tops[0], 0.0);
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
        assert!(doc.max_scroll(Axis::Vertical) > 5000.0);
    }

    #[test]
    fn test_groups_follow_content() {
        let (_, layout) = layout();
        assert_eq!(layout.about.skills.len(), 8);
        assert_eq!(layout.services.cards.len(), 3);
        assert_eq!(layout.projects.cards.len(), 6);
        assert_eq!(layout.certificates.cards.len(), 5);
        assert_eq!(layout.contact.fields.len(), 3);
        assert_eq!(layout.navigation.mobile_links.len(), NAV_LINKS.len() + 1);
    }

    #[test]
    fn test_anchor_lookup() {
        let (_, layout) = layout();
        assert_eq!(layout.anchor("#about"), Some(layout.about.section));
        assert_eq!(layout.anchor("contact"), Some(layout.contact.section));
        assert_eq!(layout.anchor("#nowhere"), None);
    }
}
