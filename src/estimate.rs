// Mock travel estimator
// Combines mode-specific base time/price constants with a per-destination
// distance factor into a rounded display estimate. All mock numbers.

use std::fmt;

use crate::catalog::Catalog;

pub const PROMPT_MSG: &str = "Pick a destination first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Flight,
    Train,
    Ground,
}

impl TransportMode {
    // Anything that is not flight or train counts as ground travel.
    pub fn parse(value: &str) -> Self {
        match value {
            "flight" => TransportMode::Flight,
            "train" => TransportMode::Train,
            _ => TransportMode::Ground,
        }
    }

    // (base hours, base price) scaled by the destination's distance factor.
    fn base(self) -> (f64, f64) {
        match self {
            TransportMode::Flight => (1.5, 120.0),
            TransportMode::Train => (3.5, 60.0),
            TransportMode::Ground => (5.0, 40.0),
        }
    }
}

// Unknown ids fall back to a factor of 2.
fn distance_factor(city_id: &str) -> f64 {
    match city_id {
        "nyc" => 1.0,
        "gc" => 2.8,
        "sf" => 2.5,
        "ys" => 3.0,
        "miami" => 2.2,
        _ => 2.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub hours: u32,
    pub price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateOutcome {
    // No destination selected yet.
    Prompt,
    Quote(Estimate),
}

impl fmt::Display for EstimateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateOutcome::Prompt => f.write_str(PROMPT_MSG),
            EstimateOutcome::Quote(e) => write!(
                f,
                "Estimate: approx {}h, from ${} per passenger (mock).",
                e.hours, e.price
            ),
        }
    }
}

// Rounded time/price estimate for traveling to `city_id` by `mode`. Rounding
// is half-up (`f64::round`); inputs are always positive.
pub fn estimate(catalog: &Catalog, city_id: Option<&str>, mode: TransportMode) -> EstimateOutcome {
    let Some(dest) = city_id.and_then(|id| catalog.find(id)) else {
        return EstimateOutcome::Prompt;
    };

    let factor = distance_factor(&dest.id);
    let (base_hours, base_price) = mode.base();

    EstimateOutcome::Quote(Estimate {
        hours: (base_hours * factor).round() as u32,
        price: (base_price * factor).round() as u32,
    })
}
