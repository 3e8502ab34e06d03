// Integration tests (native) for the `valentine-proposal` crate.
// They drive `Proposal` through its public API with deterministic doubles for
// randomness, animation and audio, so they run under plain `cargo test`.

use pretty_assertions::assert_eq;

use valentine_proposal::audio::{AudioCue, RecordingAudio};
use valentine_proposal::geometry::{Point, Size};
use valentine_proposal::motion::{RecordingAnimator, Target};
use valentine_proposal::proposal::Placement;
use valentine_proposal::random::{FastRandom, RandomSource, SequenceRandom};
use valentine_proposal::recipient::RecipientName;
use valentine_proposal::{Effects, InteractionState, Proposal, ProposalConfig, Trigger};

const VIEW: Size = Size { width: 800.0, height: 600.0 };

fn mount<R: RandomSource + 'static>(
    config: ProposalConfig,
    rng: R,
    audio: RecordingAudio,
) -> Proposal<R, RecordingAnimator, RecordingAudio> {
    Proposal::mount(config, RecipientName::new("Sam"), VIEW, 0.0, rng, RecordingAnimator::new(), audio)
}

fn mount_default() -> Proposal<SequenceRandom, RecordingAnimator, RecordingAudio> {
    mount(ProposalConfig::default(), SequenceRandom::new(vec![0.1, 0.9, 0.4, 0.6]), RecordingAudio::new())
}

#[test]
fn first_evasion_on_800_by_600() {
    let mut p = mount_default();
    assert_eq!(p.view().no_placement, Placement::Flow);

    let ev = p.evade(Trigger::Hover, VIEW).expect("asking page evades");
    assert!((0.0..=650.0).contains(&ev.position.x), "x out of range: {}", ev.position.x);
    assert!((0.0..=540.0).contains(&ev.position.y), "y out of range: {}", ev.position.y);
    assert_eq!(ev.evasions, 1);
    assert_eq!(ev.label, "Wait... 🥺");
    assert_eq!(p.view().no_placement, Placement::Fixed(ev.position));
}

#[test]
fn relocation_stays_inside_viewport() {
    let mut p = mount(ProposalConfig::default(), FastRandom::seeded(7), RecordingAudio::new());
    for trigger in [Trigger::Hover, Trigger::Click, Trigger::TouchStart].into_iter().cycle().take(300) {
        let ev = p.evade(trigger, VIEW).expect("still asking");
        assert!(ev.position.x >= 0.0 && ev.position.x + 150.0 <= 800.0, "{:?}", ev.position);
        assert!(ev.position.y >= 0.0 && ev.position.y + 60.0 <= 600.0, "{:?}", ev.position);
    }
}

#[test]
fn tiny_viewport_pins_button_to_origin() {
    let mut p = mount_default();
    let ev = p.evade(Trigger::Click, Size::new(100.0, 40.0)).expect("evades");
    assert_eq!(ev.position, Point::new(0.0, 0.0));
}

#[test]
fn label_sticks_on_last_message() {
    let mut p = mount_default();
    for _ in 0..10 {
        p.evade(Trigger::Hover, VIEW);
    }
    let msgs = valentine_proposal::NO_MESSAGES;
    assert_eq!(p.view().no_label, msgs[msgs.len() - 1]);
    assert_eq!(p.view().evasions, 10);
}

#[test]
fn transitions_only_move_forward() {
    let mut p = mount_default();
    assert!(!p.open_reveal(0.0), "cannot reveal before yes");
    assert_eq!(p.state(), InteractionState::Asking);
    assert_eq!(p.pick_date_idea(), None);

    assert!(p.submit_yes(10.0));
    assert_eq!(p.state(), InteractionState::Accepted);
    assert!(!p.submit_yes(20.0), "second yes is a no-op");
    assert!(p.evade(Trigger::Hover, VIEW).is_none());
    assert!(p.pick_date_idea().is_some());

    assert!(p.open_reveal(30.0));
    assert_eq!(p.state(), InteractionState::Revealed);
    assert!(!p.open_reveal(40.0));
    assert!(!p.submit_yes(50.0));
    assert_eq!(p.state(), InteractionState::Revealed);
}

#[test]
fn background_wraps_after_seven_periods() {
    let mut p = mount_default();
    let period = p.config().slideshow_period_ms;
    for i in 1..=7 {
        p.tick(period * i as f64);
    }
    let v = p.view();
    assert_eq!(v.background_index, 1);
    assert_eq!(v.background.as_deref(), Some(valentine_proposal::BACKGROUNDS[1]));
}

#[test]
fn click_heart_expires_after_lifetime() {
    let mut p = mount_default();
    let lifetime = p.config().click_heart_lifetime_ms;
    let id = p.click(Point::new(120.0, 80.0), 1_000.0).expect("click feedback enabled");
    assert!(p.click_hearts().any(|h| h.id == id));
    assert!(p.animator().motion_for(Target::ClickHeart(id)).is_some());

    p.tick(1_000.0 + lifetime - 1.0);
    assert_eq!(p.view().click_hearts, 1);
    p.tick(1_000.0 + lifetime + 1.0);
    assert!(p.click_hearts().all(|h| h.id != id));
    assert!(p.animator().motion_for(Target::ClickHeart(id)).is_none());
}

#[test]
fn click_feedback_can_be_disabled() {
    let config = ProposalConfig { effects: Effects { click_feedback: false, ..Effects::ALL }, ..Default::default() };
    let mut p = mount(config, SequenceRandom::constant(0.5), RecordingAudio::new());
    assert_eq!(p.click(Point::new(1.0, 1.0), 5.0), None);
}

#[test]
fn unmount_releases_everything() {
    let mut p = mount_default();
    p.click(Point::new(10.0, 10.0), 100.0);
    p.submit_yes(200.0);
    p.open_reveal(300.0);
    assert!(p.active_timers() > 0);

    p.unmount();
    assert!(!p.is_mounted());
    assert_eq!(p.active_timers(), 0);
    assert_eq!(p.animator().running.len(), 0);
    assert!(p.audio().released);

    // late events after teardown do nothing
    p.unmount();
    assert!(!p.tick(100_000.0));
    assert_eq!(p.click(Point::new(1.0, 1.0), 100_001.0), None);
    assert_eq!(p.active_timers(), 0);
}

#[test]
fn heading_uses_recipient_from_query() {
    let sam = RecipientName::from_query("?to=Sam", valentine_proposal::DEFAULT_RECIPIENT);
    assert!(sam.heading().contains("Sam"));

    let fallback = RecipientName::from_query("?from=Alex", valentine_proposal::DEFAULT_RECIPIENT);
    assert!(fallback.heading().contains(valentine_proposal::DEFAULT_RECIPIENT));

    let markup = RecipientName::from_query("?to=%3Cb%3EKim%3C%2Fb%3E", "x");
    assert_eq!(markup.as_str(), "<b>Kim</b>");
}

#[test]
fn blocked_audio_does_not_stop_the_page() {
    let mut p = mount(ProposalConfig::default(), SequenceRandom::constant(0.3), RecordingAudio::blocked());
    assert!(p.submit_yes(0.0));
    assert!(p.open_reveal(10.0));
    assert_eq!(p.state(), InteractionState::Revealed);
    assert_eq!(p.audio().cues(), vec![AudioCue::Accept, AudioCue::Reveal]);
}

#[test]
fn typewriter_reveals_letter_over_time() {
    let mut p = mount_default();
    p.submit_yes(0.0);
    p.open_reveal(0.0);
    assert_eq!(p.view().letter, "");
    let char_ms = p.config().typewriter_char_ms;
    p.tick(char_ms * 3.0);
    assert_eq!(p.view().letter.chars().count(), 3);

    let total = valentine_proposal::LOVE_LETTER.chars().count() as f64;
    p.tick(char_ms * (total + 1.0));
    let v = p.view();
    assert_eq!(v.letter, valentine_proposal::LOVE_LETTER);
    assert!(v.letter_complete);
    assert_eq!(v.scrapbook.len(), valentine_proposal::SCRAPBOOK.len());
}
