//! Sound cues. Playback is always fire-and-forget: nothing in the page waits on it
//! and a failure (autoplay policy, missing file) is only logged.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// "Yes" was pressed.
    Accept,
    /// The envelope was opened.
    Reveal,
    /// A date idea was drawn.
    Pick,
}

impl AudioCue {
    pub const ALL: [AudioCue; 3] = [AudioCue::Accept, AudioCue::Reveal, AudioCue::Pick];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayRequest {
    pub cue: AudioCue,
    /// 0.0 ..= 1.0
    pub volume: f64,
    pub looped: bool,
}

impl PlayRequest {
    pub fn once(cue: AudioCue, volume: f64) -> Self {
        Self { cue, volume: volume.clamp(0.0, 1.0), looped: false }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    /// Browser refused playback (usually autoplay policy).
    #[error("playback blocked: {0}")]
    Blocked(String),
    /// No element was loaded for this cue.
    #[error("no audio loaded for {0:?}")]
    Unavailable(AudioCue),
}

/// Audio capability owned by the page for its whole lifetime.
pub trait AudioSink {
    fn play(&mut self, request: PlayRequest) -> Result<(), AudioError>;
    /// Stop everything and drop loaded media. Called once on teardown.
    fn release(&mut self);
}

/// Request playback and swallow any failure.
pub fn fire_and_forget(sink: &mut dyn AudioSink, request: PlayRequest) {
    if let Err(err) = sink.play(request) {
        log::debug!("ignoring audio failure for {:?}: {err}", request.cue);
    }
}

/// Sink that plays nothing; used when sound is disabled.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _request: PlayRequest) -> Result<(), AudioError> {
        Ok(())
    }

    fn release(&mut self) {}
}

/// Records requests; can be told to fail every call to mimic a blocked autoplay.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<PlayRequest>,
    pub released: bool,
    pub fail_with: Option<AudioError>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocked() -> Self {
        Self { fail_with: Some(AudioError::Blocked("NotAllowedError".into())), ..Self::default() }
    }

    pub fn cues(&self) -> Vec<AudioCue> {
        self.played.iter().map(|r| r.cue).collect()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, request: PlayRequest) -> Result<(), AudioError> {
        self.played.push(request);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_and_forget_swallows_blocked_playback() {
        let mut sink = RecordingAudio::blocked();
        fire_and_forget(&mut sink, PlayRequest::once(AudioCue::Accept, 0.6));
        assert_eq!(sink.cues(), vec![AudioCue::Accept]);
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(PlayRequest::once(AudioCue::Pick, 3.0).volume, 1.0);
        assert_eq!(PlayRequest::once(AudioCue::Pick, -1.0).volume, 0.0);
    }
}
