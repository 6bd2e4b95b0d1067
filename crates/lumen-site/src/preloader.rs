//! Loading gate shown before the page becomes interactive.
//!
//! The counter climbs from 0 to 100, the counter text fades up and out,
//! then the overlay fades away (overlapping the text fade by 300 ms).
//! The gate opens when the overlay fade finishes.

use lumen_config::PreloaderSettings;
use lumen_motion::animation::RevealTransition;
use lumen_motion::{Document, EasingFunction, ElementId, PowerMode, StyleValues};

const TEXT_FADE_MS: f32 = 500.0;
const FADE_OVERLAP_MS: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Counting,
    Fading,
    Open,
}

/// The preloader's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateElements {
    pub overlay: ElementId,
    pub text: ElementId,
}

#[derive(Debug)]
pub struct LoadingGate {
    duration_ms: f32,
    fade_ms: f32,
    skip: bool,
    elapsed_ms: f32,
    phase: GatePhase,
    elements: Option<GateElements>,
    text_fade: Option<RevealTransition>,
    overlay_fade: Option<RevealTransition>,
}

impl LoadingGate {
    pub fn new(settings: &PreloaderSettings) -> Self {
        Self {
            duration_ms: settings.duration_ms.max(0.0),
            fade_ms: settings.fade_ms.max(0.0),
            skip: settings.skip,
            elapsed_ms: 0.0,
            phase: GatePhase::Counting,
            elements: None,
            text_fade: None,
            overlay_fade: None,
        }
    }

    /// Bind the gate to its overlay and counter text.
    pub fn attach(&mut self, elements: GateElements) {
        self.elements = Some(elements);
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == GatePhase::Open
    }

    /// Counter value shown to the user, 0 to 100.
    pub fn progress(&self) -> u8 {
        if self.phase != GatePhase::Counting {
            return 100;
        }
        if self.duration_ms <= 0.0 {
            return 100;
        }
        let t = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        let eased = EasingFunction::power(2, PowerMode::Out).evaluate(t);
        (eased * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Advance the gate's timeline. Returns true on the frame the gate opens.
    pub fn advance<D: Document + ?Sized>(&mut self, delta_ms: f32, doc: &mut D) -> bool {
        match self.phase {
            GatePhase::Open => false,
            GatePhase::Counting if self.skip => {
                self.open(doc);
                true
            }
            GatePhase::Counting => {
                self.elapsed_ms += delta_ms;
                if self.elapsed_ms < self.duration_ms {
                    return false;
                }
                let carry = self.elapsed_ms - self.duration_ms;
                self.begin_fade();
                self.step_fade(carry, doc)
            }
            GatePhase::Fading => self.step_fade(delta_ms, doc),
        }
    }

    fn begin_fade(&mut self) {
        self.phase = GatePhase::Fading;
        let Some(elements) = self.elements else {
            return;
        };
        self.text_fade = Some(RevealTransition::new(
            elements.text,
            StyleValues::new().opacity(1.0).y(0.0),
            StyleValues::new().opacity(0.0).y(-20.0),
            TEXT_FADE_MS,
            0.0,
            EasingFunction::power(2, PowerMode::In),
        ));
        self.overlay_fade = Some(RevealTransition::new(
            elements.overlay,
            StyleValues::new().opacity(1.0).scale(1.0),
            StyleValues::new().opacity(0.0).scale(0.95),
            self.fade_ms,
            TEXT_FADE_MS - FADE_OVERLAP_MS,
            EasingFunction::power(3, PowerMode::InOut),
        ));
        log::debug!("loading gate counter finished, fading out");
    }

    fn step_fade<D: Document + ?Sized>(&mut self, delta_ms: f32, doc: &mut D) -> bool {
        let mut running = false;
        for fade in [&mut self.text_fade, &mut self.overlay_fade].into_iter().flatten() {
            running |= fade.update(delta_ms);
            doc.apply_style(fade.element, &fade.current_value());
        }
        if running {
            return false;
        }
        self.phase = GatePhase::Open;
        log::info!("loading gate open");
        true
    }

    fn open<D: Document + ?Sized>(&mut self, doc: &mut D) {
        if let Some(elements) = self.elements {
            doc.apply_style(elements.text, &StyleValues::new().opacity(0.0).y(-20.0));
            doc.apply_style(elements.overlay, &StyleValues::new().opacity(0.0).scale(0.95));
        }
        self.phase = GatePhase::Open;
        log::info!("loading gate skipped");
    }
}
