use crate::random::{RandomEffects, RandomSource};

/// Draws a date suggestion. Each draw replaces the last; repeats are allowed.
#[derive(Debug)]
pub struct DateIdeaPicker {
    ideas: &'static [&'static str],
    current: Option<&'static str>,
}

impl DateIdeaPicker {
    pub fn new(ideas: &'static [&'static str]) -> Self {
        Self { ideas, current: None }
    }

    pub fn pick(&mut self, rng: &mut dyn RandomSource) -> Option<&'static str> {
        if let Some(idea) = rng.pick(self.ideas) {
            self.current = Some(*idea);
        }
        self.current
    }

    pub fn current(&self) -> Option<&'static str> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    const IDEAS: &[&str] = &["picnic", "stargazing", "cooking", "museum"];

    #[test]
    fn pick_overwrites_and_allows_repeats() {
        let mut picker = DateIdeaPicker::new(IDEAS);
        assert_eq!(picker.current(), None);
        let mut rng = SequenceRandom::new(vec![0.3, 0.3, 0.9]);
        assert_eq!(picker.pick(&mut rng), Some("stargazing"));
        assert_eq!(picker.pick(&mut rng), Some("stargazing"));
        assert_eq!(picker.pick(&mut rng), Some("museum"));
        assert_eq!(picker.current(), Some("museum"));
    }

    #[test]
    fn empty_list_picks_nothing() {
        let mut picker = DateIdeaPicker::new(&[]);
        assert_eq!(picker.pick(&mut SequenceRandom::constant(0.5)), None);
    }
}
