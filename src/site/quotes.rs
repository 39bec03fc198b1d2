//! Rotating educational quotes for the landing page hero.

use std::time::Duration;

use serde::Serialize;

pub const EDUCATIONAL_QUOTES: [&str; 6] = [
    "Overconsumption of salt can kill you!",
    "Hidden chemicals in cosmetics affect hormones",
    "Natural doesn't always mean safer",
    "Your skin absorbs 60% of what you apply",
    "Parabens may disrupt your endocrine system",
    "Some fragrances contain toxic compounds",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub index: usize,
    pub text: &'static str,
}

/// Cycles through the quotes, one per interval, wrapping at the end.
#[derive(Debug, Clone, Copy)]
pub struct QuoteRotator {
    interval: Duration,
}

impl QuoteRotator {
    /// A zero interval is bumped to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// The quote showing `elapsed` after the page loaded.
    pub fn quote_at(&self, elapsed: Duration) -> Quote {
        let ticks = elapsed.as_millis() / self.interval.as_millis();
        let index = (ticks % EDUCATIONAL_QUOTES.len() as u128) as usize;
        Quote {
            index,
            text: EDUCATIONAL_QUOTES[index],
        }
    }
}
