use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single most recent successfully fetched price. Each new sample
/// replaces the previous one; nothing is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PriceSample {
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

impl PriceSample {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            fetched_at: Utc::now(),
        }
    }
}

/// Display state of the tracker: no sample yet, or the latest sample.
/// Failed fetches never transition this state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceState {
    Loading,
    Loaded(PriceSample),
}

impl PriceState {
    pub fn sample(&self) -> Option<PriceSample> {
        match self {
            PriceState::Loading => None,
            PriceState::Loaded(sample) => Some(*sample),
        }
    }
}
