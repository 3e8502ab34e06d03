//! Valentine proposal page core crate.
//!
//! One design covering all three versions of the page: a question with a "No"
//! button that refuses to be pressed, ambient petals / sparkles / slideshow, and on
//! "Yes" a confetti burst, envelope, typewriter letter and scrapbook. Interaction
//! logic lives in [`proposal`] and runs natively; [`web`] is the browser glue.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod motion;
pub mod proposal;
pub mod random;
pub mod recipient;
pub mod timers;
mod web;

pub use config::{Effects, ProposalConfig};
pub use proposal::{InteractionState, Proposal, ProposalView, Trigger};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Page content
// -----------------------------------------------------------------------------

/// Shown when the `to` query parameter is missing.
pub const DEFAULT_RECIPIENT: &str = "My Love";

pub const QUOTE: &str = "\"In all the world, there is no heart for me like yours. \
In all the world, there is no love for you like mine.\"";

/// "No" button labels, indexed by evasion count and clamped to the last entry.
pub const NO_MESSAGES: &[&str] = &[
    "No",
    "Wait... 🥺",
    "Are you sure? 😢",
    "Think again! 💭",
    "Pretty please? 🥹",
    "Try Harder 😉",
];

pub const ACCEPTED_TITLE: &str = "Yay! ❤️";

pub const ACCEPTED_TEXT: &str =
    "You've made me the happiest person alive. I can't wait to spend this day with you.";

pub const DATE_IDEAS: &[&str] = &[
    "Candlelit dinner at home 🕯️",
    "Picnic in the park 🧺",
    "Stargazing with hot cocoa 🌌",
    "Cook a new recipe together 🍝",
    "Sunset walk on the beach 🌅",
    "Movie marathon in a blanket fort 🎬",
    "Visit a museum or gallery 🖼️",
    "Dance class for two 💃",
    "Breakfast in bed 🥞",
    "Write each other love letters ✉️",
];

pub const BACKGROUNDS: &[&str] = &[
    "assets/img/bg1.jpg",
    "assets/img/bg2.jpg",
    "assets/img/bg3.jpg",
    "assets/img/bg4.jpg",
    "assets/img/bg5.jpg",
    "assets/img/bg6.jpg",
];

pub const LOVE_LETTER: &str = "Every day with you feels like the first page of my favorite story. \
You make ordinary moments glow, and I can't imagine a Valentine's Day with anyone else. \
Thank you for saying yes. Forever yours. 💌";

/// `(image, caption)` pairs for the scrapbook.
pub const SCRAPBOOK: &[(&str, &str)] = &[
    ("assets/img/us1.jpg", "Our first date"),
    ("assets/img/us2.jpg", "That rainy afternoon"),
    ("assets/img/us3.jpg", "Road trip!"),
    ("assets/img/us4.jpg", "Your birthday surprise"),
    ("assets/img/us5.jpg", "Lazy Sundays"),
    ("assets/img/us6.jpg", "Next adventure?"),
];

// -----------------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_proposal() -> Result<(), JsValue> {
    web::start(ProposalConfig::default())
}

/// Start one of the named versions: `classic`, `garden` or `scrapbook`.
/// Unknown names get the full page.
#[wasm_bindgen]
pub fn start_proposal_preset(name: &str) -> Result<(), JsValue> {
    web::start(preset(name))
}

/// Start with a JSON config; fields left out keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_proposal_with_config(json: &str) -> Result<(), JsValue> {
    let config = ProposalConfig::from_json(json).unwrap_or_else(|err| {
        log::warn!("{err}; using defaults");
        ProposalConfig::default()
    });
    web::start(config)
}

/// Tear the page down: timers, frame loop, listeners, audio and DOM.
#[wasm_bindgen]
pub fn stop_proposal() {
    web::stop();
}

pub fn preset(name: &str) -> ProposalConfig {
    match name {
        "classic" => ProposalConfig::classic(),
        "garden" => ProposalConfig::garden(),
        _ => ProposalConfig::scrapbook(),
    }
}
