//! Page configuration.
//!
//! The page grew through three versions (sparkles only; then petals, slideshow and
//! click hearts; then confetti, typewriter letter and scrapbook). They are one design
//! here, with each optional effect switched by [`Effects`].

use crate::geometry::Size;

/// Optional effects. Everything else (question, evasive button, reveal) is always on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Effects {
    pub sparkles: bool,
    pub petals: bool,
    pub slideshow: bool,
    pub click_feedback: bool,
    pub typewriter: bool,
    pub confetti: bool,
    pub gallery: bool,
    pub sound: bool,
}

impl Effects {
    pub const ALL: Effects = Effects {
        sparkles: true,
        petals: true,
        slideshow: true,
        click_feedback: true,
        typewriter: true,
        confetti: true,
        gallery: true,
        sound: true,
    };

    pub const NONE: Effects = Effects {
        sparkles: false,
        petals: false,
        slideshow: false,
        click_feedback: false,
        typewriter: false,
        confetti: false,
        gallery: false,
        sound: false,
    };
}

impl Default for Effects {
    fn default() -> Self {
        Effects::ALL
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AudioAssets {
    pub accept: String,
    pub reveal: String,
    pub pick: String,
}

impl Default for AudioAssets {
    fn default() -> Self {
        Self {
            accept: "assets/audio/yay.mp3".into(),
            reveal: "assets/audio/envelope.mp3".into(),
            pick: "assets/audio/pop.mp3".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProposalConfig {
    pub effects: Effects,
    pub sparkle_count: u32,
    pub petal_count: u32,
    pub floating_heart_count: u32,
    pub confetti_count: u32,
    /// Confetti pieces are dropped this long after the burst starts.
    pub confetti_lifetime_ms: f64,
    pub button_width: f64,
    pub button_height: f64,
    pub slideshow_period_ms: f64,
    pub slideshow_fade_ms: f64,
    pub click_heart_lifetime_ms: f64,
    pub typewriter_char_ms: f64,
    pub volume: f64,
    pub default_recipient: String,
    pub backgrounds: Vec<String>,
    pub audio: AudioAssets,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            effects: Effects::ALL,
            sparkle_count: 15,
            petal_count: 20,
            floating_heart_count: 20,
            confetti_count: 40,
            confetti_lifetime_ms: 3_600.0,
            button_width: 150.0,
            button_height: 60.0,
            slideshow_period_ms: 3_500.0,
            slideshow_fade_ms: 1_200.0,
            click_heart_lifetime_ms: 1_000.0,
            typewriter_char_ms: 45.0,
            volume: 0.6,
            default_recipient: crate::DEFAULT_RECIPIENT.to_string(),
            backgrounds: crate::BACKGROUNDS.iter().map(|s| s.to_string()).collect(),
            audio: AudioAssets::default(),
        }
    }
}

impl ProposalConfig {
    /// First version: gold sparkles behind the question, nothing else.
    pub fn classic() -> Self {
        Self { effects: Effects { sparkles: true, ..Effects::NONE }, ..Self::default() }
    }

    /// Second version: petals, background slideshow, click hearts and sound.
    pub fn garden() -> Self {
        Self {
            effects: Effects {
                sparkles: true,
                petals: true,
                slideshow: true,
                click_feedback: true,
                sound: true,
                ..Effects::NONE
            },
            ..Self::default()
        }
    }

    /// Latest version with every effect; same as `Default`.
    pub fn scrapbook() -> Self {
        Self::default()
    }

    pub fn button_footprint(&self) -> Size {
        Size::new(self.button_width, self.button_height)
    }

    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::error::Error::Config(e.to_string()))
    }
}
