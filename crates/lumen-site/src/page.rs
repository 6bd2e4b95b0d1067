//! The page composition root.
//!
//! `Page` owns the reveal registry, the smooth scroll engine, the loading
//! gate and the frame scheduler. Each frame runs the gate, then the scroll
//! engine, then viewport polling and reveal updates, in that order.

use lumen_config::{LumenConfig, ScrollSettings};
use lumen_motion::{
    Axis, Document, EasingFunction, FrameRequestId, FrameScheduler, FrameTask, Result,
    RevealEvent, RevealRegistry, ScrollConfig, ScrollInput, ScrollState, SectionMount,
    SmoothScroll, mount_section,
};

use crate::contact::ContactForm;
use crate::content::SiteContent;
use crate::layout::PageLayout;
use crate::navigation::NavigationBar;
use crate::preloader::LoadingGate;
use crate::sections::{RevealTiming, page_tables};

/// Build the scroll engine configuration, falling back to defaults for
/// names that do not parse.
pub fn scroll_config(settings: &ScrollSettings) -> ScrollConfig {
    let defaults = ScrollConfig::default();
    let easing = EasingFunction::from_name(&settings.easing).unwrap_or_else(|| {
        log::warn!("unknown scroll easing '{}', using expo_out", settings.easing);
        defaults.easing
    });
    let orientation = Axis::from_name(&settings.orientation).unwrap_or_else(|| {
        log::warn!(
            "unknown scroll orientation '{}', using vertical",
            settings.orientation
        );
        defaults.orientation
    });
    ScrollConfig {
        duration: settings.duration.max(0.0),
        easing,
        lerp: settings.lerp.and_then(|lerp| {
            if lerp > 0.0 {
                Some(lerp.min(1.0))
            } else {
                log::warn!("scroll lerp {lerp} never reaches its target, using duration mode");
                None
            }
        }),
        orientation,
        smooth_wheel: settings.smooth_wheel,
        smooth_touch: settings.smooth_touch,
        wheel_multiplier: settings.wheel_multiplier,
        touch_multiplier: settings.touch_multiplier,
        epsilon: settings.epsilon.max(0.0),
    }
}

/// A mounted page: layout handles plus everything created at mount time.
#[derive(Debug)]
struct Mounted {
    layout: PageLayout,
    navigation: NavigationBar,
    sections: Vec<SectionMount>,
    gate_frame: Option<FrameRequestId>,
    reveals_frame: Option<FrameRequestId>,
}

#[derive(Debug)]
pub struct Page {
    config: LumenConfig,
    content: SiteContent,
    timing: RevealTiming,
    registry: RevealRegistry,
    scroll: SmoothScroll,
    frames: FrameScheduler<FrameTask>,
    gate: LoadingGate,
    contact: ContactForm,
    mounted: Option<Mounted>,
    last_frame_ms: Option<f64>,
}

impl Page {
    pub fn new(config: LumenConfig, content: SiteContent) -> Self {
        let scroll = SmoothScroll::new(scroll_config(&config.scroll));
        let axis = scroll.config().orientation;
        Self {
            timing: RevealTiming::from_settings(&config.reveal),
            registry: RevealRegistry::with_axis(axis),
            scroll,
            frames: FrameScheduler::new(),
            gate: LoadingGate::new(&config.preloader),
            contact: ContactForm::new(config.contact.clone()),
            mounted: None,
            last_frame_ms: None,
            config,
            content,
        }
    }

    /// Register every section's reveals in page order and start the frame
    /// loop. The scroll engine starts when the loading gate opens, or right
    /// away on a remount after the gate has already opened.
    ///
    /// A failing section unmounts the sections already registered before
    /// the error is returned.
    pub fn mount<D: Document + ?Sized>(&mut self, doc: &mut D, layout: PageLayout) -> Result<()> {
        if self.mounted.is_some() {
            log::warn!("page mounted twice; tearing down the previous mount");
            self.unmount(doc);
        }
        if self.scroll.is_destroyed() {
            self.scroll = SmoothScroll::new(self.scroll.config().clone());
        }

        let mut sections: Vec<SectionMount> = Vec::new();
        for (id, table) in page_tables(&layout, &self.timing) {
            match mount_section(&mut self.registry, doc, id, &table) {
                Ok(mount) => sections.push(mount),
                Err(err) => {
                    log::warn!("mounting section {id} failed: {err}");
                    while let Some(mount) = sections.pop() {
                        mount.dispose(&mut self.registry, doc);
                    }
                    return Err(err);
                }
            }
        }

        self.gate.attach(layout.preloader);
        let navigation = NavigationBar::new(
            &self.config.navigation,
            layout.navigation.clone(),
            self.timing,
        );
        self.last_frame_ms = None;
        let gate_frame = (!self.gate.is_open()).then(|| self.frames.request(FrameTask::LoadingGate));
        let reveals_frame = Some(self.frames.request(FrameTask::Reveals));
        if self.gate.is_open() {
            self.scroll.start(&*doc, &mut self.frames);
        }

        log::info!(
            "page mounted: {} section(s), {} registration(s)",
            sections.len(),
            self.registry.registration_count()
        );
        self.mounted = Some(Mounted {
            layout,
            navigation,
            sections,
            gate_frame,
            reveals_frame,
        });
        Ok(())
    }

    /// Run one frame at host time `now_ms`.
    pub fn frame<D: Document + ?Sized>(&mut self, now_ms: f64, doc: &mut D) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        let delta_ms = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0) as f32);
        self.last_frame_ms = Some(now_ms);

        let mut due = self.frames.take_due();
        due.sort_by_key(|(_, task)| *task);

        for (_, task) in due {
            match task {
                FrameTask::LoadingGate => {
                    mounted.gate_frame = None;
                    if self.gate.advance(delta_ms, doc) {
                        self.scroll.start(&*doc, &mut self.frames);
                    } else if !self.gate.is_open() {
                        mounted.gate_frame = Some(self.frames.request(FrameTask::LoadingGate));
                    }
                }
                FrameTask::SmoothScroll => {
                    self.scroll.raf(now_ms, doc, &mut self.frames);
                }
                FrameTask::Reveals => {
                    self.registry.frame(delta_ms, doc);
                    let offset = doc.scroll_offset(self.scroll.config().orientation);
                    mounted.navigation.on_scroll(offset);
                    mounted.reveals_frame = Some(self.frames.request(FrameTask::Reveals));
                }
            }
        }
    }

    /// Forward raw input to the scroll engine; ignored until the gate opens.
    pub fn scroll_input(&mut self, input: ScrollInput) -> bool {
        self.scroll.input(input)
    }

    /// Recompute scroll limits after the viewport or content changed size.
    pub fn resize<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.scroll.resize(doc);
    }

    /// Follow a navigation anchor such as `#about`.
    pub fn follow<D: Document + ?Sized>(&mut self, anchor: &str, doc: &mut D) -> Result<bool> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(false);
        };
        mounted.navigation.follow(
            anchor,
            &mounted.layout,
            &mut self.registry,
            &mut self.scroll,
            doc,
        )
    }

    /// Toggle the mobile menu, returning whether it is now open.
    pub fn toggle_menu<D: Document + ?Sized>(&mut self, doc: &mut D) -> Result<bool> {
        match self.mounted.as_mut() {
            Some(mounted) => mounted.navigation.toggle_menu(&mut self.registry, doc),
            None => Ok(false),
        }
    }

    /// Tear the page down: close the menu, dispose sections last-mounted
    /// first, then destroy the scroll engine. Leaves no registration,
    /// observer binding, frame request or undelivered event behind. Returns how many section
    /// registrations were cancelled.
    pub fn unmount<D: Document + ?Sized>(&mut self, doc: &mut D) -> usize {
        let Some(mut mounted) = self.mounted.take() else {
            return 0;
        };
        if let Err(err) = mounted.navigation.close_menu(&mut self.registry, doc) {
            log::warn!("closing the menu during unmount failed: {err}");
        }
        let mut cancelled = 0;
        while let Some(section) = mounted.sections.pop() {
            cancelled += section.dispose(&mut self.registry, doc);
        }
        for request in [mounted.gate_frame, mounted.reveals_frame].into_iter().flatten() {
            self.frames.cancel(request);
        }
        self.scroll.destroy(&mut self.frames);
        self.registry.clear_events();
        log::info!("page unmounted ({cancelled} registration(s) cancelled)");
        cancelled
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn layout(&self) -> Option<&PageLayout> {
        self.mounted.as_ref().map(|m| &m.layout)
    }

    pub fn navigation(&self) -> Option<&NavigationBar> {
        self.mounted.as_ref().map(|m| &m.navigation)
    }

    pub fn config(&self) -> &LumenConfig {
        &self.config
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn contact_form(&self) -> &ContactForm {
        &self.contact
    }

    pub fn gate(&self) -> &LoadingGate {
        &self.gate
    }

    pub fn registry(&self) -> &RevealRegistry {
        &self.registry
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    pub fn is_scrolling_enabled(&self) -> bool {
        self.scroll.is_running()
    }

    /// Frame requests not yet serviced.
    pub fn outstanding_frames(&self) -> usize {
        self.frames.outstanding()
    }

    pub fn drain_events(&mut self) -> Vec<RevealEvent> {
        self.registry.drain_events()
    }
}
