use anyhow::Result;
use lumen_config::LumenConfig;
use lumen_motion::{Axis, Document, RevealEvent, ScrollInput, SimDocument, Size};
use lumen_site::{Page, PageLayout, SiteContent};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// One step of the scripted session.
enum Step {
    /// Let frames run for this long.
    Wait(f64),
    Wheel(f32),
    Follow(&'static str),
    ToggleMenu,
}

fn session() -> Vec<Step> {
    vec![
        Step::Wait(4000.0),
        Step::Wheel(600.0),
        Step::Wait(1500.0),
        Step::Wheel(900.0),
        Step::Wait(1500.0),
        Step::Follow("#projects"),
        Step::Wait(2500.0),
        Step::Follow("#contact"),
        Step::Wait(2500.0),
        Step::Follow("#about"),
        Step::Wait(2500.0),
        Step::ToggleMenu,
        Step::Wait(1000.0),
        Step::Follow("#hero"),
        Step::Wait(2500.0),
    ]
}

fn log_event(event: &RevealEvent) {
    match event {
        RevealEvent::Started {
            handle,
            element,
            direction,
            at_ms,
        } => log::info!("{at_ms:>8.0}ms  {handle} {element} started {direction:?}"),
        other => log::info!("{:>8.0}ms  {other:?}", other.at_ms()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = LumenConfig::load();
    let content = match std::env::args().find_map(|a| a.strip_prefix("--content=").map(str::to_owned)) {
        Some(path) => SiteContent::load(path)?,
        None => SiteContent::portfolio()?,
    };
    let viewport = if std::env::args().any(|a| a == "--mobile") {
        Size::new(390.0, 844.0)
    } else {
        Size::new(1440.0, 900.0)
    };

    let mut doc = SimDocument::new(viewport);
    let layout = PageLayout::simulate(&mut doc, &content);
    log::info!(
        "simulated {}x{} viewport, {:.0}px scrollable",
        viewport.width,
        viewport.height,
        doc.max_scroll(Axis::Vertical)
    );

    let mut page = Page::new(config, content);
    page.mount(&mut doc, layout)?;

    let mut now = 0.0;
    for step in session() {
        match step {
            Step::Wait(ms) => {
                let until = now + ms;
                while now < until {
                    page.frame(now, &mut doc);
                    for event in page.drain_events() {
                        log_event(&event);
                    }
                    now += FRAME_MS;
                }
                let state = page.scroll_state();
                log::info!(
                    "{now:>8.0}ms  scroll {:.1}/{:.1}px, gate {}%",
                    state.offset,
                    state.limit,
                    page.gate().progress()
                );
            }
            Step::Wheel(delta_y) => {
                if !page.scroll_input(ScrollInput::Wheel {
                    delta_x: 0.0,
                    delta_y,
                }) {
                    log::warn!("wheel input ignored, scrolling not enabled yet");
                }
            }
            Step::Follow(anchor) => {
                page.follow(anchor, &mut doc)?;
            }
            Step::ToggleMenu => {
                let open = page.toggle_menu(&mut doc)?;
                log::info!("mobile menu open: {open}");
            }
        }
    }

    let cancelled = page.unmount(&mut doc);
    log::info!(
        "done: {cancelled} registration(s) cancelled, {} frame request(s) left",
        page.outstanding_frames()
    );
    Ok(())
}
