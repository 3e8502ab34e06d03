use crate::random::{RandomEffects, RandomSource};

/// Largest tilt, either way, of a scrapbook photo.
pub const MAX_TILT_DEG: f64 = 6.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScrapbookEntry {
    pub image: &'static str,
    pub caption: &'static str,
    pub tilt_deg: f64,
}

/// Photo gallery shown with the letter. Tilts are drawn once, at layout.
#[derive(Clone, Debug, Default)]
pub struct Scrapbook {
    entries: Vec<ScrapbookEntry>,
}

impl Scrapbook {
    pub fn lay_out(items: &[(&'static str, &'static str)], rng: &mut dyn RandomSource) -> Self {
        let entries = items
            .iter()
            .map(|&(image, caption)| ScrapbookEntry {
                image,
                caption,
                tilt_deg: rng.between(-MAX_TILT_DEG, MAX_TILT_DEG),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ScrapbookEntry] {
        &self.entries
    }
}
