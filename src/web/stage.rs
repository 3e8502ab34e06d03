//! Canvas stage: the browser implementation of [`Animator`].
//!
//! Every running motion is sampled once per animation frame. Particles, confetti and
//! click hearts are painted on one full-window canvas; slides are painted underneath
//! them; bound DOM elements (the "No" button, card, badge, envelope) get the sampled
//! pose written to their inline style.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlImageElement, window};

use crate::motion::{Animator, Motion, Pose, Target};

struct Running {
    target: Target,
    motion: Motion,
    started_ms: f64,
}

struct Backdrop {
    image: HtmlImageElement,
    warned: bool,
}

pub struct Stage {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    backdrops: Vec<Backdrop>,
    bound: Vec<(Target, HtmlElement)>,
    running: Vec<Running>,
}

const CONFETTI_COLORS: [&str; 5] = ["#c41e3a", "#d4af37", "#f5e6d3", "#ff8fab", "#e05780"];

impl Stage {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, backgrounds: &[String]) -> Self {
        let backdrops = backgrounds
            .iter()
            .filter_map(|src| match HtmlImageElement::new() {
                Ok(image) => {
                    image.set_src(src);
                    Some(Backdrop { image, warned: false })
                }
                Err(err) => {
                    log::warn!("could not create image for {src}: {err:?}");
                    None
                }
            })
            .collect();
        Self { canvas, ctx, backdrops, bound: Vec::new(), running: Vec::new() }
    }

    /// Route motions for `target` to a DOM element instead of the canvas.
    pub fn bind(&mut self, target: Target, element: HtmlElement) {
        self.bound.retain(|(t, _)| *t != target);
        self.bound.push((target, element));
    }

    /// Paint one frame at `now` (animation-frame timestamp).
    pub fn draw(&mut self, now: f64) {
        self.fit_to_window();
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        let mut settled = Vec::new();
        for r in &self.running {
            let elapsed = now - r.started_ms;
            let pose = r.motion.sample(elapsed);
            match r.target {
                Target::Backdrop(i) => {
                    if let Some(b) = self.backdrops.get_mut(i) {
                        draw_backdrop(&self.ctx, b, &pose, w, h);
                    }
                }
                Target::Sparkle(_) => {
                    self.sprite(&pose, w, Sprite::Dot("rgba(212,175,55,0.6)")).ok();
                }
                Target::Petal(_) => {
                    self.sprite(&pose, w, Sprite::Glyph("🌸", 22.0)).ok();
                }
                Target::FloatingHeart(_) => {
                    self.sprite(&pose, w, Sprite::Glyph("❤️", 28.0)).ok();
                }
                Target::Confetti(i) => {
                    let color = CONFETTI_COLORS[i as usize % CONFETTI_COLORS.len()];
                    self.sprite(&pose, w, Sprite::Chip(color)).ok();
                }
                Target::ClickHeart(_) => {
                    // pixel coordinates, not percentages
                    self.sprite(&Pose { x: pose.x / w * 100.0, ..pose }, w, Sprite::Glyph("💖", 24.0)).ok();
                }
                Target::NoButton | Target::Card | Target::Badge | Target::Envelope => {
                    if let Some((_, el)) = self.bound.iter().find(|(t, _)| *t == r.target) {
                        apply_style(el, r.target, &pose);
                    }
                    if r.motion.is_finished(elapsed) && r.motion.last() == Pose::default() {
                        settled.push(r.target);
                    }
                }
            }
        }
        self.ctx.set_global_alpha(1.0);
        for target in settled {
            self.stop(target);
        }
    }

    /// Drop inline transform/opacity so the element is back in its plain layout.
    fn release_style(&self, target: Target) {
        if target == Target::NoButton {
            return;
        }
        if let Some((_, el)) = self.bound.iter().find(|(t, _)| *t == target) {
            let style = el.style();
            style.remove_property("transform").ok();
            style.remove_property("opacity").ok();
        }
    }

    fn fit_to_window(&self) {
        let Some(win) = window() else { return };
        let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        if w > 0 && h > 0 && (self.canvas.width() != w || self.canvas.height() != h) {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.ctx.set_text_align("center");
            self.ctx.set_text_baseline("middle");
        }
    }

    fn sprite(&self, pose: &Pose, width: f64, sprite: Sprite) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(pose.x / 100.0 * width, pose.y)?;
        ctx.rotate(pose.rotate_deg.to_radians())?;
        ctx.scale(pose.scale, pose.scale)?;
        ctx.set_global_alpha(pose.opacity);
        match sprite {
            Sprite::Dot(color) => {
                ctx.set_fill_style(&JsValue::from_str(color));
                ctx.begin_path();
                ctx.arc(0.0, 0.0, 2.0, 0.0, std::f64::consts::TAU)?;
                ctx.fill();
            }
            Sprite::Glyph(glyph, px) => {
                ctx.set_font(&format!("{px}px serif"));
                ctx.fill_text(glyph, 0.0, 0.0)?;
            }
            Sprite::Chip(color) => {
                ctx.set_fill_style(&JsValue::from_str(color));
                ctx.fill_rect(-4.0, -7.0, 8.0, 14.0);
            }
        }
        ctx.restore();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.running.clear();
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }
}

enum Sprite {
    Dot(&'static str),
    Glyph(&'static str, f64),
    Chip(&'static str),
}

/// Cover-fit the slide; a slide that failed to load is left blank.
fn draw_backdrop(ctx: &CanvasRenderingContext2d, b: &mut Backdrop, pose: &Pose, w: f64, h: f64) {
    let img = &b.image;
    if !img.complete() {
        return;
    }
    let (iw, ih) = (img.natural_width() as f64, img.natural_height() as f64);
    if iw <= 0.0 || ih <= 0.0 {
        if !b.warned {
            log::warn!("background {} failed to load", img.src());
            b.warned = true;
        }
        return;
    }
    let scale = (w / iw).max(h / ih);
    let (dw, dh) = (iw * scale, ih * scale);
    ctx.set_global_alpha(pose.opacity);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, (w - dw) / 2.0, (h - dh) / 2.0, dw, dh)
        .ok();
}

fn apply_style(el: &HtmlElement, target: Target, pose: &Pose) {
    let style = el.style();
    if target == Target::NoButton {
        style.set_property("left", &format!("{:.1}px", pose.x)).ok();
        style.set_property("top", &format!("{:.1}px", pose.y)).ok();
    } else {
        style.set_property("transform", &pose_transform(pose)).ok();
    }
    style.set_property("opacity", &format!("{:.3}", pose.opacity)).ok();
}

/// CSS transform for a DOM-bound pose (`y` is an offset from the resting place).
pub fn pose_transform(pose: &Pose) -> String {
    format!(
        "translate({:.1}px, {:.1}px) scale({:.3}) rotate({:.1}deg)",
        pose.x, pose.y, pose.scale, pose.rotate_deg
    )
}

fn now_ms() -> f64 {
    super::performance_now()
}

impl Animator for Stage {
    fn animate(&mut self, target: Target, motion: Motion) {
        let started_ms = now_ms();
        match self.running.iter_mut().find(|r| r.target == target) {
            Some(r) => {
                r.motion = motion;
                r.started_ms = started_ms;
            }
            None => self.running.push(Running { target, motion, started_ms }),
        }
        // slides paint bottom-up, DOM targets last
        self.running.sort_by_key(|r| layer(r.target));
    }

    fn stop(&mut self, target: Target) {
        self.running.retain(|r| r.target != target);
        self.release_style(target);
    }

    fn stop_all(&mut self) {
        self.running.clear();
        for (target, _) in &self.bound {
            self.release_style(*target);
        }
    }

    fn active(&self) -> usize {
        self.running.len()
    }
}

fn layer(target: Target) -> u8 {
    match target {
        Target::Backdrop(_) => 0,
        Target::Sparkle(_) | Target::Petal(_) => 1,
        Target::FloatingHeart(_) | Target::Confetti(_) => 2,
        Target::ClickHeart(_) => 3,
        Target::NoButton | Target::Card | Target::Badge | Target::Envelope => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_formats_pose() {
        let pose = Pose::at(0.0, -10.0).with_scale(0.9);
        assert_eq!(pose_transform(&pose), "translate(0.0px, -10.0px) scale(0.900) rotate(0.0deg)");
    }

    #[test]
    fn slides_sort_below_everything() {
        let mut targets = vec![Target::NoButton, Target::ClickHeart(1), Target::Petal(0), Target::Backdrop(2)];
        targets.sort_by_key(|t| layer(*t));
        assert_eq!(targets, vec![Target::Backdrop(2), Target::Petal(0), Target::ClickHeart(1), Target::NoButton]);
    }
}
