//! Mispricing classification.
//!
//! Compares each outcome's prediction-market ask against the consensus fair
//! probability. A positive spread means the market sells the outcome for
//! less than the consensus says it is worth.

use crate::consensus::ConsensusProbabilities;
use crate::types::{round4, MispricingResult, OutcomeSet, Signal};

/// Minimum absolute spread for a non-`Fair` signal. Comparison is strict.
pub const MISPRICING_THRESHOLD: f64 = 0.02;

impl Signal {
    /// Classifies a spread against [`MISPRICING_THRESHOLD`].
    #[must_use]
    pub fn from_spread(spread: f64) -> Self {
        if spread > MISPRICING_THRESHOLD {
            Self::Undervalued
        } else if spread < -MISPRICING_THRESHOLD {
            Self::Overvalued
        } else {
            Self::Fair
        }
    }
}

/// Produces mispricing rows for a grouped event.
#[derive(Debug, Clone, Copy, Default)]
pub struct MispricingEngine;

impl MispricingEngine {
    /// Analyzes every outcome of `set` against `fair`.
    ///
    /// Outcomes without a label, or whose label has no exact entry in the
    /// consensus, produce no row.
    #[must_use]
    pub fn analyze_match(
        set: &OutcomeSet,
        fair: &ConsensusProbabilities,
    ) -> Vec<MispricingResult> {
        set.outcomes
            .iter()
            .filter_map(|quote| {
                let outcome = quote.outcome.as_deref()?;
                let fair_probability = fair.get(outcome)?;

                let spread = round4(fair_probability - quote.implied_ask_prob);
                let expected_value = round4(fair_probability - quote.ask_price());

                Some(MispricingResult {
                    outcome: outcome.to_string(),
                    ask_probability: quote.implied_ask_prob,
                    fair_probability: round4(fair_probability),
                    spread,
                    expected_value,
                    signal: Signal::from_spread(spread),
                })
            })
            .collect()
    }
}
