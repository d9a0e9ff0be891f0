use std::collections::BTreeMap;

use serde::Serialize;

use crate::tts::Quality;

/// Estimated cost of one request, per quality tier.
pub type CostEstimate = BTreeMap<Quality, f64>;

/// Price per 1000 characters for each tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceTable {
    pub standard: f64,
    pub hd: f64,
}

impl PriceTable {
    pub fn rate(&self, quality: Quality) -> f64 {
        match quality {
            Quality::Standard => self.standard,
            Quality::Hd => self.hd,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            standard: 0.015,
            hd: 0.030,
        }
    }
}

/// `(chars / 1000) * rate` for every tier, rounded to three decimals.
pub fn calculate_costs(char_count: usize, prices: &PriceTable) -> CostEstimate {
    Quality::ALL
        .into_iter()
        .map(|quality| {
            let cost = char_count as f64 / 1000.0 * prices.rate(quality);
            (quality, round3(cost))
        })
        .collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
