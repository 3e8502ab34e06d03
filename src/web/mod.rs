//! Browser glue: builds the DOM, wires events, drives the animation-frame loop.
//!
//! One page at a time lives in `PAGE`. Every event handler and the frame loop
//! reach it through [`with_page`]; [`stop`] takes it out and tears it down.

mod audio;
mod dom;
mod stage;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, MouseEvent, window};

use crate::config::ProposalConfig;
use crate::error::Error;
use crate::geometry::{Point, Size};
use crate::motion::Target;
use crate::proposal::{Proposal, ProposalView, Trigger};
use crate::random::FastRandom;
use crate::recipient::RecipientName;

use audio::WebAudio;
use dom::Dom;
use stage::Stage;

type BrowserProposal = Proposal<FastRandom, Stage, WebAudio>;

pub(crate) fn performance_now() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

fn viewport() -> Size {
    let Some(w) = window() else { return Size::new(0.0, 0.0) };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(width, height)
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn remove(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<i32>>,
}

impl FrameLoop {
    fn cancel(self) {
        if let Some(w) = window() {
            let _ = w.cancel_animation_frame(self.handle.get());
        }
        // drops the closure and with it the Rc cycle
        self.callback.borrow_mut().take();
    }
}

struct Page {
    proposal: BrowserProposal,
    dom: Dom,
    listeners: Vec<Listener>,
    frame: Option<FrameLoop>,
    last_view: Option<ProposalView>,
}

impl Page {
    fn frame(&mut self, now: f64) {
        self.proposal.tick(now);
        self.proposal.animator_mut().draw(now);
        self.sync();
    }

    /// Re-render the overlay if anything visible changed.
    fn sync(&mut self) {
        let view = self.proposal.view();
        if self.last_view.as_ref() != Some(&view) {
            self.dom.render(&view);
            self.last_view = Some(view);
        }
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Run `f` against the live page, if there is one and nobody else holds it.
fn with_page<T>(f: impl FnOnce(&mut Page) -> T) -> Option<T> {
    PAGE.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

/// A page is mounted (a borrow in progress counts as mounted).
fn is_running() -> bool {
    PAGE.with(|cell| cell.try_borrow().map(|g| g.is_some()).unwrap_or(true))
}

pub fn start(config: ProposalConfig) -> Result<(), JsValue> {
    stop();
    let win = window().ok_or(Error::NoWindow)?;
    let doc = win.document().ok_or(Error::NoDocument)?;
    let mut dom = Dom::build(&doc)?;

    let query = win.location().search().unwrap_or_default();
    let recipient = RecipientName::from_query(&query, &config.default_recipient);

    let mut stage = Stage::new(dom.canvas.clone(), dom.ctx.clone(), &config.backgrounds);
    stage.bind(Target::NoButton, dom.no.clone());
    stage.bind(Target::Card, dom.card.clone());
    stage.bind(Target::Badge, dom.badge.clone());
    stage.bind(Target::Envelope, dom.envelope.clone());

    let sound = if config.effects.sound { WebAudio::load(&config.audio) } else { WebAudio::muted() };
    let proposal = Proposal::mount(
        config,
        recipient,
        viewport(),
        performance_now(),
        FastRandom::from_entropy(),
        stage,
        sound,
    );
    let view = proposal.view();
    dom.render(&view);

    let listeners = match wire_events(&win, &doc, &dom) {
        Ok(listeners) => listeners,
        Err(err) => {
            dom.remove();
            return Err(err);
        }
    };
    PAGE.with(|cell| {
        *cell.borrow_mut() =
            Some(Page { proposal, dom, listeners, frame: None, last_view: Some(view) });
    });
    let frame = start_frame_loop();
    with_page(|page| page.frame = Some(frame));
    Ok(())
}

/// Unmount the current page. Does nothing if none is running.
pub fn stop() {
    let Some(mut page) = PAGE.with(|cell| cell.try_borrow_mut().ok().and_then(|mut g| g.take())) else {
        return;
    };
    if let Some(frame) = page.frame.take() {
        frame.cancel();
    }
    for listener in page.listeners.drain(..) {
        listener.remove();
    }
    page.proposal.unmount();
    page.proposal.animator_mut().clear();
    page.dom.remove();
}

fn listen(
    target: &EventTarget,
    kind: &'static str,
    passive: Option<bool>,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    match passive {
        Some(passive) => {
            let options = AddEventListenerOptions::new();
            options.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        }
        None => target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?,
    }
    Ok(Listener { target: target.clone(), kind, callback })
}

fn evade_on(trigger: Trigger) -> impl FnMut(Event) + 'static {
    move |evt: Event| {
        if trigger.suppresses_default() {
            evt.prevent_default();
        }
        with_page(|page| {
            if page.proposal.evade(trigger, viewport()).is_some() {
                page.sync();
            }
        });
    }
}

fn wire_events(
    win: &web_sys::Window,
    doc: &web_sys::Document,
    dom: &Dom,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();
    let no: &EventTarget = dom.no.as_ref();
    listeners.push(listen(no, "mouseenter", None, evade_on(Trigger::Hover))?);
    listeners.push(listen(no, "click", None, evade_on(Trigger::Click))?);
    // non-passive so preventDefault can stop the synthetic click
    listeners.push(listen(no, "touchstart", Some(false), evade_on(Trigger::TouchStart))?);

    listeners.push(listen(dom.yes.as_ref(), "click", None, |_evt| {
        with_page(|page| {
            if page.proposal.submit_yes(performance_now()) {
                page.sync();
            }
        });
    })?);
    listeners.push(listen(dom.envelope.as_ref(), "click", None, |_evt| {
        with_page(|page| {
            if page.proposal.open_reveal(performance_now()) {
                page.sync();
            }
        });
    })?);
    listeners.push(listen(dom.date_button.as_ref(), "click", None, |_evt| {
        with_page(|page| {
            if page.proposal.pick_date_idea().is_some() {
                page.sync();
            }
        });
    })?);
    listeners.push(listen(doc.as_ref(), "click", None, |evt: Event| {
        let Some(mouse) = evt.dyn_ref::<MouseEvent>() else { return };
        if mouse.button() != 0 {
            return;
        }
        let at = Point::new(mouse.client_x() as f64, mouse.client_y() as f64);
        with_page(|page| page.proposal.click(at, performance_now()));
    })?);
    listeners.push(listen(win.as_ref(), "resize", None, |_evt| {
        with_page(|page| page.proposal.resize(viewport()));
    })?);
    Ok(listeners)
}

fn start_frame_loop() -> FrameLoop {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let handle = Rc::new(Cell::new(0));
    let next = handle.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_page(|page| page.frame(ts));
        if !is_running() {
            return;
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                next.set(id);
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            handle.set(id);
        }
    }
    FrameLoop { callback: g, handle }
}
