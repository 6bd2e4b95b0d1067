//! The host document the reveal system runs against.
//!
//! `Document` is the narrow surface the core needs from a page: layout
//! queries, the scroll position, and a place to write animated styles.
//! `SimDocument` is an in-memory implementation used by the headless
//! driver and the tests.

use std::collections::HashMap;

use crate::animation::StyleValues;
use crate::geometry::{Axis, ElementId, Rect, Size};

pub trait Document {
    fn viewport_size(&self) -> Size;

    /// Full scrollable content size.
    fn content_size(&self) -> Size;

    /// Element bounds in document coordinates, `None` when not mounted.
    fn element_rect(&self, element: ElementId) -> Option<Rect>;

    fn scroll_offset(&self, axis: Axis) -> f32;

    fn set_scroll_offset(&mut self, axis: Axis, offset: f32);

    fn apply_style(&mut self, element: ElementId, style: &StyleValues);

    /// Drop any animated style so the element renders as authored.
    fn clear_style(&mut self, element: ElementId);

    /// Whether intersection detection is available.
    fn supports_intersection(&self) -> bool {
        true
    }

    fn contains(&self, element: ElementId) -> bool {
        self.element_rect(element).is_some()
    }

    /// Largest valid scroll offset along an axis.
    fn max_scroll(&self, axis: Axis) -> f32 {
        (self.content_size().along(axis) - self.viewport_size().along(axis)).max(0.0)
    }

    /// The visible region in document coordinates.
    fn viewport_rect(&self) -> Rect {
        let size = self.viewport_size();
        Rect::new(
            self.scroll_offset(Axis::Horizontal),
            self.scroll_offset(Axis::Vertical),
            size.width,
            size.height,
        )
    }
}

/// In-memory document.
#[derive(Debug, Clone)]
pub struct SimDocument {
    viewport: Size,
    content_override: Option<Size>,
    scroll_x: f32,
    scroll_y: f32,
    elements: HashMap<ElementId, Rect>,
    styles: HashMap<ElementId, StyleValues>,
    style_writes: usize,
    intersection: bool,
    next_id: u64,
}

impl SimDocument {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            content_override: None,
            scroll_x: 0.0,
            scroll_y: 0.0,
            elements: HashMap::new(),
            styles: HashMap::new(),
            style_writes: 0,
            intersection: true,
            next_id: 1,
        }
    }

    /// A document whose host lacks intersection detection.
    pub fn without_intersection(mut self) -> Self {
        self.intersection = false;
        self
    }

    /// Mount a new element and return its handle.
    pub fn add_element(&mut self, rect: Rect) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, rect);
        id
    }

    /// Unmount an element; its style record goes with it.
    pub fn remove_element(&mut self, element: ElementId) -> Option<Rect> {
        self.styles.remove(&element);
        self.elements.remove(&element)
    }

    /// Re-mount a previously removed element under the same handle.
    pub fn restore_element(&mut self, element: ElementId, rect: Rect) {
        self.next_id = self.next_id.max(element.0 + 1);
        self.elements.insert(element, rect);
    }

    pub fn move_element(&mut self, element: ElementId, rect: Rect) -> bool {
        match self.elements.get_mut(&element) {
            Some(slot) => {
                *slot = rect;
                true
            }
            None => false,
        }
    }

    pub fn resize_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Pin the content size instead of deriving it from element bounds.
    pub fn set_content_size(&mut self, size: Size) {
        self.content_override = Some(size);
    }

    /// Last style written for an element, `None` when unstyled.
    pub fn style(&self, element: ElementId) -> Option<&StyleValues> {
        self.styles.get(&element)
    }

    pub fn style_write_count(&self) -> usize {
        self.style_writes
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

impl Document for SimDocument {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn content_size(&self) -> Size {
        if let Some(size) = self.content_override {
            return size;
        }
        let (w, h) = self
            .elements
            .values()
            .fold((self.viewport.width, self.viewport.height), |(w, h), r| {
                (w.max(r.right()), h.max(r.bottom()))
            });
        Size::new(w, h)
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.elements.get(&element).copied()
    }

    fn scroll_offset(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.scroll_y,
            Axis::Horizontal => self.scroll_x,
        }
    }

    fn set_scroll_offset(&mut self, axis: Axis, offset: f32) {
        match axis {
            Axis::Vertical => self.scroll_y = offset,
            Axis::Horizontal => self.scroll_x = offset,
        }
    }

    fn apply_style(&mut self, element: ElementId, style: &StyleValues) {
        if self.elements.contains_key(&element) {
            self.styles.insert(element, style.clone());
            self.style_writes += 1;
        }
    }

    fn clear_style(&mut self, element: ElementId) {
        self.styles.remove(&element);
    }

    fn supports_intersection(&self) -> bool {
        self.intersection
    }
}
