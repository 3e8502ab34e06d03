//! `<audio>`-backed sound cues, loaded once per mount.

use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::audio::{AudioCue, AudioError, AudioSink, PlayRequest};
use crate::config::AudioAssets;

pub struct WebAudio {
    clips: Vec<(AudioCue, HtmlAudioElement)>,
    // catches the rejected play() promise (autoplay policy) so it is not reported as unhandled;
    // leaked on release because pausing a pending play() rejects after we are gone
    on_reject: Option<Closure<dyn FnMut(JsValue)>>,
}

impl WebAudio {
    pub fn load(assets: &AudioAssets) -> Self {
        let clips = AudioCue::ALL
            .iter()
            .filter_map(|&cue| {
                let src = match cue {
                    AudioCue::Accept => &assets.accept,
                    AudioCue::Reveal => &assets.reveal,
                    AudioCue::Pick => &assets.pick,
                };
                match HtmlAudioElement::new_with_src(src) {
                    Ok(el) => Some((cue, el)),
                    Err(err) => {
                        log::warn!("audio for {cue:?} unavailable: {err:?}");
                        None
                    }
                }
            })
            .collect();
        Self { clips, on_reject: Some(rejection_handler()) }
    }

    /// No clips at all; every play reports `Unavailable`.
    pub fn muted() -> Self {
        Self { clips: Vec::new(), on_reject: Some(rejection_handler()) }
    }
}

fn rejection_handler() -> Closure<dyn FnMut(JsValue)> {
    Closure::wrap(Box::new(|reason: JsValue| {
        log::debug!("audio playback rejected: {reason:?}");
    }) as Box<dyn FnMut(JsValue)>)
}

impl AudioSink for WebAudio {
    fn play(&mut self, request: PlayRequest) -> Result<(), AudioError> {
        let (_, el) = self
            .clips
            .iter()
            .find(|(cue, _)| *cue == request.cue)
            .ok_or(AudioError::Unavailable(request.cue))?;
        el.set_volume(request.volume);
        el.set_loop(request.looped);
        el.set_current_time(0.0);
        let promise: js_sys::Promise = el
            .play()
            .map_err(|e| AudioError::Blocked(e.as_string().unwrap_or_else(|| format!("{e:?}"))))?;
        if let Some(handler) = &self.on_reject {
            let _ = promise.catch(handler);
        }
        Ok(())
    }

    fn release(&mut self) {
        for (_, el) in self.clips.drain(..) {
            el.pause().ok();
            el.set_src("");
        }
        if let Some(handler) = self.on_reject.take() {
            handler.forget();
        }
    }
}
