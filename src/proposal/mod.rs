//! The proposal page as a state machine: `Asking -> Accepted -> Revealed`.
//!
//! `Proposal` owns every component and every resource (random source, animator,
//! audio, timers) for the lifetime of one mount. Hosts feed it discrete events
//! (pointer/touch, frame ticks, teardown) one at a time; nothing here blocks.

mod click_feedback;
mod date_ideas;
mod evasive;
mod particles;
mod scrapbook;
mod slideshow;
mod state;
mod typewriter;

pub use click_feedback::{ClickFeedbackLayer, TransientArtifact};
pub use date_ideas::DateIdeaPicker;
pub use evasive::{EvasiveChoiceControl, Placement, Trigger};
pub use particles::{AmbientParticleField, Particle, ParticleKind};
pub use scrapbook::{MAX_TILT_DEG, Scrapbook, ScrapbookEntry};
pub use slideshow::BackgroundRotator;
pub use state::InteractionState;
pub use typewriter::Typewriter;

use crate::audio::{self, AudioCue, AudioSink, PlayRequest};
use crate::config::ProposalConfig;
use crate::geometry::{Point, Size};
use crate::motion::{Animator, Easing, Motion, Pose, Target, Timing};
use crate::random::RandomSource;
use crate::recipient::RecipientName;
use crate::timers::{TimerId, TimerQueue};

const ENVELOPE_OPEN_MS: f64 = 700.0;

/// Result of a successful evasion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evasion {
    pub position: Point,
    pub label: &'static str,
    pub evasions: u32,
}

/// Immutable snapshot for rendering. Always reflects exactly one state.
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalView {
    pub state: InteractionState,
    pub mounted: bool,
    pub recipient: String,
    pub heading: String,
    pub no_label: &'static str,
    pub no_placement: Placement,
    pub evasions: u32,
    pub background: Option<String>,
    pub background_index: usize,
    pub date_idea: Option<&'static str>,
    /// Envelope is offered while accepted and shown until it has finished opening.
    pub envelope_visible: bool,
    pub letter: String,
    pub letter_complete: bool,
    pub scrapbook: Vec<ScrapbookEntry>,
    pub click_hearts: usize,
    pub active_timers: usize,
}

pub struct Proposal<R, A, S> {
    config: ProposalConfig,
    recipient: RecipientName,
    viewport: Size,
    state: InteractionState,
    mounted: bool,
    rng: R,
    animator: A,
    audio: S,
    timers: TimerQueue,
    no_button: EvasiveChoiceControl,
    sparkles: Option<AmbientParticleField>,
    petals: Option<AmbientParticleField>,
    hearts: Option<AmbientParticleField>,
    confetti: Option<(AmbientParticleField, TimerId)>,
    // envelope stays on screen until its opening motion has played
    envelope_opening: Option<TimerId>,
    slideshow: Option<BackgroundRotator>,
    clicks: ClickFeedbackLayer,
    date_ideas: DateIdeaPicker,
    letter: Typewriter,
    scrapbook: Option<Scrapbook>,
}

impl<R, A, S> Proposal<R, A, S>
where
    R: RandomSource + 'static,
    A: Animator + 'static,
    S: AudioSink + 'static,
{
    /// Build the page in `Asking` and start the ambient effects enabled in `config`.
    pub fn mount(
        config: ProposalConfig,
        recipient: RecipientName,
        viewport: Size,
        now_ms: f64,
        rng: R,
        animator: A,
        audio: S,
    ) -> Self {
        let effects = config.effects;
        let mut page = Self {
            no_button: EvasiveChoiceControl::new(crate::NO_MESSAGES, config.button_footprint()),
            clicks: ClickFeedbackLayer::new(config.click_heart_lifetime_ms),
            date_ideas: DateIdeaPicker::new(crate::DATE_IDEAS),
            letter: Typewriter::new(crate::LOVE_LETTER, config.typewriter_char_ms),
            slideshow: None,
            sparkles: None,
            petals: None,
            hearts: None,
            confetti: None,
            envelope_opening: None,
            scrapbook: None,
            timers: TimerQueue::new(now_ms),
            state: InteractionState::Asking,
            mounted: true,
            config,
            recipient,
            viewport,
            rng,
            animator,
            audio,
        };

        page.animator.animate(
            Target::Card,
            Motion::between(
                Pose::default().with_opacity(0.0).with_scale(0.9),
                Pose::default(),
                Timing::once(800.0, Easing::EaseOut),
            ),
        );
        page.animator.animate(
            Target::Badge,
            Motion::through(
                vec![Pose::at(0.0, 0.0), Pose::at(0.0, -10.0), Pose::at(0.0, 0.0)],
                Timing::forever(4_000.0, Easing::EaseInOut),
            ),
        );
        if effects.sparkles {
            page.sparkles = Some(page.ambient(ParticleKind::Sparkle, page.config.sparkle_count));
        }
        if effects.petals {
            page.petals = Some(page.ambient(ParticleKind::Petal, page.config.petal_count));
        }
        if effects.slideshow && !page.config.backgrounds.is_empty() {
            let mut rotator = BackgroundRotator::new(
                page.config.backgrounds.clone(),
                page.config.slideshow_period_ms,
                page.config.slideshow_fade_ms,
            );
            rotator.start(&mut page.timers, &mut page.animator);
            page.slideshow = Some(rotator);
        }
        log::info!(
            "proposal mounted for {:?} ({}x{})",
            page.recipient.as_str(),
            viewport.width,
            viewport.height
        );
        page
    }

    fn ambient(&mut self, kind: ParticleKind, count: u32) -> AmbientParticleField {
        let mut field = AmbientParticleField::generate(kind, count, &mut self.rng);
        field.start(&mut self.animator, self.viewport);
        field
    }

    fn play(&mut self, cue: AudioCue) {
        if self.config.effects.sound {
            audio::fire_and_forget(&mut self.audio, PlayRequest::once(cue, self.config.volume));
        }
    }

    /// "Yes": `Asking -> Accepted`. Returns whether the transition happened.
    pub fn submit_yes(&mut self, now_ms: f64) -> bool {
        if !self.mounted {
            return false;
        }
        self.tick(now_ms);
        if !self.state.accept() {
            return false;
        }
        self.animator.stop(Target::NoButton);
        self.animator.animate(
            Target::Card,
            Motion::between(Pose::default().with_opacity(0.0), Pose::default(), Timing::once(600.0, Easing::EaseOut)),
        );
        self.animator.animate(
            Target::Envelope,
            Motion::between(
                Pose::default().with_scale(0.0),
                Pose::default(),
                Timing::once(900.0, Easing::Spring { damping: 12.0, stiffness: 100.0 }).delayed(500.0),
            ),
        );
        self.hearts = Some(self.ambient(ParticleKind::FloatingHeart, self.config.floating_heart_count));
        if self.config.effects.confetti {
            let mut burst =
                AmbientParticleField::generate(ParticleKind::Confetti, self.config.confetti_count, &mut self.rng);
            burst.start(&mut self.animator, self.viewport);
            let timer = self.timers.set_timeout(self.config.confetti_lifetime_ms);
            self.confetti = Some((burst, timer));
        }
        self.play(AudioCue::Accept);
        log::info!("accepted after {} evasions", self.no_button.evasions());
        true
    }

    /// Open the envelope: `Accepted -> Revealed`. Returns whether the transition happened.
    pub fn open_reveal(&mut self, now_ms: f64) -> bool {
        if !self.mounted {
            return false;
        }
        self.tick(now_ms);
        if !self.state.reveal() {
            return false;
        }
        self.animator.animate(
            Target::Envelope,
            Motion::through(
                vec![
                    Pose::default(),
                    Pose::default().with_scale(1.15),
                    Pose::default().with_scale(0.0).with_opacity(0.0),
                ],
                Timing::once(ENVELOPE_OPEN_MS, Easing::EaseInOut),
            ),
        );
        self.envelope_opening = Some(self.timers.set_timeout(ENVELOPE_OPEN_MS));
        if self.config.effects.typewriter {
            self.letter.start(&mut self.timers);
        } else {
            self.letter.finish(&mut self.timers);
        }
        if self.config.effects.gallery {
            self.scrapbook = Some(Scrapbook::lay_out(crate::SCRAPBOOK, &mut self.rng));
        }
        self.play(AudioCue::Reveal);
        log::info!("letter revealed");
        true
    }

    /// The "No" button was hovered, clicked or touched. Only meaningful while asking.
    pub fn evade(&mut self, trigger: Trigger, viewport: Size) -> Option<Evasion> {
        if !self.mounted || !self.state.is_asking() {
            return None;
        }
        self.viewport = viewport;
        let from = self.no_button.position();
        if from.is_none() {
            // the button leaves the card's flow; the card must be at rest from here on
            self.animator.stop(Target::Card);
        }
        let to = self.no_button.relocate(viewport, &mut self.rng);
        self.animator.animate(Target::NoButton, self.no_button.motion(from, to));
        log::debug!(
            "no-button evaded via {trigger:?} #{} -> ({:.0}, {:.0})",
            self.no_button.evasions(),
            to.x,
            to.y
        );
        Some(Evasion { position: to, label: self.no_button.message(), evasions: self.no_button.evasions() })
    }

    /// Pointer click anywhere on the page. Returns the spawned heart's id.
    pub fn click(&mut self, at: Point, now_ms: f64) -> Option<u64> {
        if !self.mounted || !self.config.effects.click_feedback {
            return None;
        }
        self.tick(now_ms);
        Some(self.clicks.spawn(at, &mut self.timers, &mut self.animator))
    }

    /// Draw a date idea. Offered only after "Yes".
    pub fn pick_date_idea(&mut self) -> Option<&'static str> {
        if !self.mounted || self.state.is_asking() {
            return None;
        }
        let idea = self.date_ideas.pick(&mut self.rng);
        self.play(AudioCue::Pick);
        idea
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Advance the clock and run whatever timers fell due. Returns true if any fired.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.mounted {
            return false;
        }
        let mut fired = false;
        while let Some(id) = self.timers.next_due(now_ms) {
            self.dispatch(id);
            fired = true;
        }
        fired
    }

    fn dispatch(&mut self, id: TimerId) {
        if let Some(rotator) = self.slideshow.as_mut().filter(|r| r.owns(id)) {
            rotator.advance(&mut self.animator);
            return;
        }
        if self.letter.owns(id) {
            self.letter.step(&mut self.timers);
            return;
        }
        if self.envelope_opening == Some(id) {
            self.envelope_opening = None;
            self.animator.stop(Target::Envelope);
            return;
        }
        if self.confetti.as_ref().is_some_and(|(_, t)| *t == id) {
            if let Some((mut burst, _)) = self.confetti.take() {
                burst.stop(&mut self.animator);
            }
            return;
        }
        self.clicks.expire(id, &mut self.animator);
    }

    /// Tear everything down: timers, motions, audio. Safe to call twice.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        if let Some(rotator) = self.slideshow.as_mut() {
            rotator.stop(&mut self.timers, &mut self.animator);
        }
        self.clicks.clear(&mut self.timers, &mut self.animator);
        self.letter.stop(&mut self.timers);
        for field in [&mut self.sparkles, &mut self.petals, &mut self.hearts].into_iter().flatten() {
            field.stop(&mut self.animator);
        }
        if let Some((mut burst, timer)) = self.confetti.take() {
            self.timers.cancel(timer);
            burst.stop(&mut self.animator);
        }
        self.envelope_opening = None;
        self.timers.clear();
        self.animator.stop_all();
        self.audio.release();
        self.mounted = false;
        log::info!("proposal unmounted");
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn recipient(&self) -> &RecipientName {
        &self.recipient
    }

    pub fn config(&self) -> &ProposalConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active_count()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn audio(&self) -> &S {
        &self.audio
    }

    pub fn click_hearts(&self) -> impl Iterator<Item = &TransientArtifact> {
        self.clicks.artifacts()
    }

    pub fn view(&self) -> ProposalView {
        ProposalView {
            state: self.state,
            mounted: self.mounted,
            recipient: self.recipient.as_str().to_string(),
            heading: self.recipient.heading(),
            no_label: self.no_button.message(),
            no_placement: self.no_button.placement(),
            evasions: self.no_button.evasions(),
            background: self.slideshow.as_ref().and_then(|r| r.current()).map(str::to_string),
            background_index: self.slideshow.as_ref().map_or(0, BackgroundRotator::index),
            date_idea: self.date_ideas.current(),
            envelope_visible: self.state == InteractionState::Accepted || self.envelope_opening.is_some(),
            letter: match self.state {
                InteractionState::Revealed => self.letter.visible().to_string(),
                _ => String::new(),
            },
            letter_complete: self.state == InteractionState::Revealed && self.letter.is_complete(),
            scrapbook: self.scrapbook.as_ref().map(|b| b.entries().to_vec()).unwrap_or_default(),
            click_hearts: self.clicks.len(),
            active_timers: self.timers.active_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::config::Effects;
    use crate::motion::RecordingAnimator;
    use crate::random::SequenceRandom;

    type TestPage = Proposal<SequenceRandom, RecordingAnimator, RecordingAudio>;

    fn page(config: ProposalConfig) -> TestPage {
        Proposal::mount(
            config,
            RecipientName::new("Sam"),
            Size::new(800.0, 600.0),
            0.0,
            SequenceRandom::new(vec![0.25, 0.5, 0.75]),
            RecordingAnimator::new(),
            RecordingAudio::new(),
        )
    }

    #[test]
    fn mount_starts_enabled_effects_only() {
        let p = page(ProposalConfig::classic());
        assert_eq!(p.animator().count_where(|t| matches!(t, Target::Sparkle(_))), 15);
        assert_eq!(p.animator().count_where(|t| matches!(t, Target::Petal(_))), 0);
        assert_eq!(p.active_timers(), 0);

        let p = page(ProposalConfig::garden());
        assert_eq!(p.animator().count_where(|t| matches!(t, Target::Petal(_))), 20);
        assert_eq!(p.active_timers(), 1);
    }

    #[test]
    fn dispatch_routes_timers_to_owners() {
        let mut p = page(ProposalConfig::default());
        p.click(Point::new(5.0, 5.0), 100.0);
        p.tick(3_500.0);
        let v = p.view();
        assert_eq!(v.background_index, 1);
        assert_eq!(v.click_hearts, 0);
    }

    #[test]
    fn confetti_clears_after_its_lifetime() {
        let mut p = page(ProposalConfig { effects: Effects { confetti: true, ..Effects::NONE }, ..Default::default() });
        assert!(p.submit_yes(10.0));
        assert_eq!(p.animator().count_where(|t| matches!(t, Target::Confetti(_))), 40);
        p.tick(10.0 + 3_600.0);
        assert_eq!(p.animator().count_where(|t| matches!(t, Target::Confetti(_))), 0);
        assert_eq!(p.active_timers(), 0);
    }

    #[test]
    fn reveal_without_typewriter_shows_full_letter() {
        let mut p = page(ProposalConfig { effects: Effects::NONE, ..Default::default() });
        p.submit_yes(0.0);
        assert!(p.view().envelope_visible);
        p.open_reveal(0.0);
        let v = p.view();
        assert_eq!(v.letter, crate::LOVE_LETTER);
        assert!(v.letter_complete);
        assert!(v.scrapbook.is_empty());
    }

    #[test]
    fn envelope_stays_until_it_has_opened() {
        let mut p = page(ProposalConfig { effects: Effects::NONE, ..Default::default() });
        p.submit_yes(0.0);
        p.open_reveal(100.0);
        assert!(p.view().envelope_visible);
        assert!(p.animator().motion_for(Target::Envelope).is_some());
        p.tick(100.0 + ENVELOPE_OPEN_MS - 1.0);
        assert!(p.view().envelope_visible);
        p.tick(100.0 + ENVELOPE_OPEN_MS);
        assert!(!p.view().envelope_visible);
        assert!(p.animator().motion_for(Target::Envelope).is_none());
        assert_eq!(p.active_timers(), 0);
    }

    #[test]
    fn first_evasion_settles_the_card() {
        let mut p = page(ProposalConfig::classic());
        assert!(p.animator().motion_for(Target::Card).is_some());
        p.evade(Trigger::Hover, Size::new(800.0, 600.0));
        assert!(p.animator().motion_for(Target::Card).is_none());
        assert!(p.animator().stopped.contains(&Target::Card));
    }

    #[test]
    fn finished_typewriter_leaves_no_backlog() {
        let mut p = page(ProposalConfig { effects: Effects { typewriter: true, ..Effects::NONE }, ..Default::default() });
        p.submit_yes(0.0);
        p.open_reveal(0.0);
        // far past the end of the letter: the interval is cancelled mid-drain
        assert!(p.tick(3_600_000.0));
        let v = p.view();
        assert!(v.letter_complete);
        assert_eq!(v.active_timers, 0);
        assert!(!p.tick(3_600_001.0));
    }

    #[test]
    fn sound_flag_gates_audio() {
        let mut p = page(ProposalConfig { effects: Effects::NONE, ..Default::default() });
        p.submit_yes(0.0);
        p.pick_date_idea();
        assert!(p.audio().played.is_empty());
    }

    #[test]
    fn no_button_stops_after_yes() {
        let mut p = page(ProposalConfig::classic());
        assert!(p.evade(Trigger::Hover, Size::new(800.0, 600.0)).is_some());
        assert!(p.animator().motion_for(Target::NoButton).is_some());
        p.submit_yes(0.0);
        assert!(p.animator().motion_for(Target::NoButton).is_none());
        assert!(p.evade(Trigger::Click, Size::new(800.0, 600.0)).is_none());
        assert_eq!(p.view().evasions, 1);
    }
}
