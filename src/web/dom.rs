//! DOM overlay: the card with question, buttons, envelope, letter and scrapbook.
//! Nodes are created once (or reused by id) and then only updated from a
//! [`ProposalView`]. All text goes through `textContent`.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::error::{Error, Result};
use crate::proposal::{InteractionState, Placement, ProposalView, ScrapbookEntry};

const ROOT_STYLE: &str = "position:fixed; inset:0; display:flex; align-items:center; justify-content:center; \
background:#0f0101; overflow:hidden; font-family:Georgia, serif; color:#f5e6d3;";
const CANVAS_STYLE: &str = "position:fixed; inset:0; width:100%; height:100%; pointer-events:none; z-index:1;";
const CARD_STYLE: &str = "position:relative; z-index:10; text-align:center; padding:0 16px; max-width:640px;";
const YES_STYLE: &str = "position:relative; z-index:60; padding:16px 48px; margin:12px; border-radius:999px; \
border:1px solid rgba(239,68,68,0.3); background:#c41e3a; color:#f5e6d3; font-size:20px; letter-spacing:0.2em; \
text-transform:uppercase; cursor:pointer;";
const NO_STYLE: &str = "position:relative; z-index:50; padding:16px 48px; margin:12px; border-radius:999px; \
border:1px solid rgba(160,138,112,0.3); background:transparent; color:#a08a70; font-size:20px; \
letter-spacing:0.2em; text-transform:uppercase; white-space:nowrap; touch-action:none; cursor:pointer;";
const SMALL_BUTTON_STYLE: &str = "padding:10px 28px; margin:10px; border-radius:999px; border:1px solid #d4af37; \
background:transparent; color:#d4af37; font-size:16px; cursor:pointer;";

pub struct Dom {
    pub root: HtmlElement,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub card: HtmlElement,
    pub badge: HtmlElement,
    pub heading: HtmlElement,
    pub asking: HtmlElement,
    pub yes: HtmlElement,
    pub no: HtmlElement,
    pub accepted: HtmlElement,
    pub envelope: HtmlElement,
    pub date_button: HtmlElement,
    pub date_idea: HtmlElement,
    pub letter: HtmlElement,
    pub letter_text: HtmlElement,
    pub gallery: HtmlElement,
    document: Document,
    gallery_len: usize,
}

fn element(doc: &Document, parent: &HtmlElement, tag: &str, id: &str, style: &str) -> Result<HtmlElement> {
    if let Some(existing) = doc.get_element_by_id(id) {
        return existing.dyn_into::<HtmlElement>().map_err(|_| Error::Dom(format!("#{id} is not an HTML element")));
    }
    let el: HtmlElement = doc
        .create_element(tag)?
        .dyn_into()
        .map_err(|_| Error::Dom(format!("<{tag}> is not an HTML element")))?;
    el.set_id(id);
    el.set_attribute("style", style)?;
    parent.append_child(&el)?;
    Ok(el)
}

fn text(doc: &Document, parent: &HtmlElement, tag: &str, id: &str, style: &str, content: &str) -> Result<HtmlElement> {
    let el = element(doc, parent, tag, id, style)?;
    el.set_text_content(Some(content));
    Ok(el)
}

impl Dom {
    pub fn build(doc: &Document) -> Result<Self> {
        let body = doc.body().ok_or(Error::NoBody)?;
        let root = element(doc, &body, "div", "vp-root", ROOT_STYLE)?;

        let canvas: HtmlCanvasElement = element(doc, &root, "canvas", "vp-canvas", CANVAS_STYLE)?
            .dyn_into()
            .map_err(|_| Error::Canvas("#vp-canvas is not a canvas".into()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| Error::Canvas("2d context unavailable".into()))?
            .dyn_into()
            .map_err(|_| Error::Canvas("unexpected context type".into()))?;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        let card = element(doc, &root, "div", "vp-card", CARD_STYLE)?;
        let badge = text(doc, &card, "div", "vp-badge", "font-size:64px; margin-bottom:24px; display:inline-block;", "❤️")?;
        let heading = element(doc, &card, "h1", "vp-heading", "font-size:44px; font-weight:400; letter-spacing:0.05em; margin:0 0 16px;")?;

        let asking = element(doc, &card, "div", "vp-asking", "")?;
        text(doc, &asking, "p", "vp-quote", "color:#a08a70; font-style:italic; margin:0 auto 48px; max-width:28rem;", crate::QUOTE)?;
        let buttons = element(doc, &asking, "div", "vp-buttons", "display:flex; flex-wrap:wrap; align-items:center; justify-content:center; min-height:100px;")?;
        let yes = text(doc, &buttons, "button", "vp-yes", YES_STYLE, "Yes")?;
        let no = text(doc, &buttons, "button", "vp-no", NO_STYLE, crate::NO_MESSAGES.first().copied().unwrap_or("No"))?;

        let accepted = element(doc, &card, "div", "vp-accepted", "display:none;")?;
        text(doc, &accepted, "h2", "vp-yay", "font-size:56px; font-style:italic; margin:0 0 16px;", crate::ACCEPTED_TITLE)?;
        text(doc, &accepted, "p", "vp-accepted-text", "color:#a08a70; font-size:20px; margin:0 auto 32px; max-width:28rem;", crate::ACCEPTED_TEXT)?;
        let envelope = text(doc, &accepted, "button", "vp-envelope", "font-size:56px; background:none; border:none; cursor:pointer; display:inline-block;", "💌")?;
        let date_row = element(doc, &accepted, "div", "vp-date-row", "margin-top:24px;")?;
        let date_button = text(doc, &date_row, "button", "vp-date", SMALL_BUTTON_STYLE, "Pick our date 🎲")?;
        let date_idea = element(doc, &date_row, "p", "vp-date-idea", "font-size:20px; min-height:28px; color:#f5e6d3;")?;

        let letter = element(doc, &card, "div", "vp-letter", "display:none; margin-top:24px;")?;
        let letter_text = element(doc, &letter, "p", "vp-letter-text", "white-space:pre-wrap; font-size:20px; line-height:1.6; min-height:6em; color:#f5e6d3;")?;
        let gallery = element(doc, &letter, "div", "vp-gallery", "display:flex; flex-wrap:wrap; justify-content:center; gap:16px; margin-top:24px;")?;

        Ok(Self {
            root,
            canvas,
            ctx,
            card,
            badge,
            heading,
            asking,
            yes,
            no,
            accepted,
            envelope,
            date_button,
            date_idea,
            letter,
            letter_text,
            gallery,
            document: doc.clone(),
            gallery_len: 0,
        })
    }

    /// Bring the overlay in line with `view`.
    pub fn render(&mut self, view: &ProposalView) {
        self.heading.set_text_content(Some(&view.heading));
        show(&self.asking, view.state == InteractionState::Asking);
        show(&self.accepted, view.state != InteractionState::Asking);
        show(&self.envelope, view.envelope_visible);
        show(&self.letter, view.state == InteractionState::Revealed);

        self.no.set_text_content(Some(view.no_label));
        if let Placement::Fixed(p) = view.no_placement {
            // stays inside the card: above its content, below "Yes". The card is at rest
            // by now (no transform), so `fixed` is relative to the viewport.
            let style = self.no.style();
            style.set_property("position", "fixed").ok();
            style.set_property("margin", "0").ok();
            // the stage animates left/top from here on; seed them so the first frame is right
            if style.get_property_value("left").map(|v| v.is_empty()).unwrap_or(true) {
                style.set_property("left", &format!("{:.1}px", p.x)).ok();
                style.set_property("top", &format!("{:.1}px", p.y)).ok();
            }
        }

        self.date_idea.set_text_content(view.date_idea);
        self.letter_text.set_text_content(Some(&view.letter));
        if view.scrapbook.len() != self.gallery_len {
            if let Err(err) = self.fill_gallery(&view.scrapbook) {
                log::warn!("scrapbook not rendered: {err}");
            }
        }
    }

    fn fill_gallery(&mut self, entries: &[ScrapbookEntry]) -> Result<()> {
        self.gallery.set_text_content(None);
        for (i, entry) in entries.iter().enumerate() {
            let figure = element(&self.document, &self.gallery, "figure", &format!("vp-photo-{i}"), &polaroid_style(entry.tilt_deg))?;
            let img = self.document.create_element("img")?;
            img.set_attribute("src", entry.image)?;
            img.set_attribute("alt", entry.caption)?;
            img.set_attribute("style", "width:160px; height:160px; object-fit:cover; display:block;")?;
            figure.append_child(&img)?;
            text(&self.document, &figure, "figcaption", &format!("vp-caption-{i}"), "margin-top:8px; color:#3b2f2f; font-size:14px;", entry.caption)?;
        }
        self.gallery_len = entries.len();
        Ok(())
    }

    pub fn remove(&self) {
        self.root.remove();
    }
}

fn show(el: &HtmlElement, visible: bool) {
    el.style().set_property("display", if visible { "" } else { "none" }).ok();
}

/// Scrapbook card tilted by `tilt_deg`.
pub fn polaroid_style(tilt_deg: f64) -> String {
    format!(
        "margin:0; padding:10px 10px 14px; background:#fffaf0; box-shadow:0 6px 18px rgba(0,0,0,0.35); \
transform:rotate({tilt_deg:.1}deg);"
    )
}
