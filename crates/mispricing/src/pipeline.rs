//! End-to-end mispricing pipeline.
//!
//! Chains the four pure stages over a complete snapshot of both sources:
//! group quotes by event, match each event to a sportsbook event by title,
//! build the consensus, and classify every outcome. Events that cannot be
//! carried through a stage are dropped, never errored.

use crate::consensus::ConsensusFairModel;
use crate::engine::MispricingEngine;
use crate::grouper::OutcomeGrouper;
use crate::matcher::EventMatcher;
use crate::types::{EventReport, OutcomeSet, RawQuote};
use mispricing_odds::Event;
use tracing::debug;

/// Runs grouping, matching, consensus, and classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct MispricingPipeline;

impl MispricingPipeline {
    /// Produces one report per event that parses, matches, and has a consensus.
    ///
    /// Reports keep the first-seen order of events in `quotes`.
    #[must_use]
    pub fn run(quotes: &[RawQuote], events: &[Event]) -> Vec<EventReport> {
        OutcomeGrouper::group(quotes)
            .iter()
            .filter_map(|set| Self::analyze_set(set, events))
            .collect()
    }

    /// Analyzes a single grouped event.
    #[must_use]
    pub fn analyze_set(set: &OutcomeSet, events: &[Event]) -> Option<EventReport> {
        let Some(title) = set.title.as_deref() else {
            debug!(event = %set.event_id, "Skipping event without title");
            return None;
        };

        let Some(matchup) = EventMatcher::parse_matchup(title) else {
            debug!(event = %set.event_id, title, "Skipping unparseable title");
            return None;
        };

        let event = EventMatcher::find_event(events, &matchup.home, &matchup.away);
        if event.is_none() {
            debug!(
                event = %set.event_id,
                home = %matchup.home,
                away = %matchup.away,
                "No sportsbook event matched"
            );
            return None;
        }

        let Some(fair) = ConsensusFairModel::fair_probabilities(event) else {
            debug!(event = %set.event_id, "No eligible bookmaker quotes");
            return None;
        };

        let analysis = MispricingEngine::analyze_match(set, &fair);

        debug!(
            event = %set.event_id,
            bookmakers = fair.bookmaker_count(),
            rows = analysis.len(),
            "Analyzed event"
        );

        Some(EventReport {
            event_id: set.event_id.clone(),
            title: title.to_string(),
            analysis,
        })
    }
}
