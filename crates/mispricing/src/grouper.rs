//! Groups flat contract quotes into per-event outcome sets.

use crate::types::{OutcomeQuote, OutcomeSet, RawQuote};
use std::collections::HashMap;

/// Groups raw quotes by event identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeGrouper;

impl OutcomeGrouper {
    /// Groups quotes into one `OutcomeSet` per event, in first-seen order.
    ///
    /// The title kept for an event is the one carried by its first quote.
    /// Missing prices contribute 0 to the implied probabilities.
    #[must_use]
    pub fn group(quotes: &[RawQuote]) -> Vec<OutcomeSet> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&RawQuote, Vec<OutcomeQuote>)> = Vec::new();

        for quote in quotes {
            let slot = *index.entry(quote.event_id.as_str()).or_insert_with(|| {
                groups.push((quote, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(OutcomeQuote::from_raw(quote));
        }

        groups
            .into_iter()
            .map(|(first, outcomes)| {
                OutcomeSet::new(first.event_id.clone(), first.event_title.clone(), outcomes)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(event: &str, title: &str, outcome: &str, bid: u32, ask: u32) -> RawQuote {
        RawQuote::new(event)
            .with_title(title)
            .with_outcome(outcome)
            .with_prices(Some(bid), Some(ask))
    }

    #[test]
    fn test_groups_by_event_in_first_seen_order() {
        let quotes = vec![
            quote("E2", "Brazil vs Japan Winner?", "Brazil", 60, 62),
            quote("E1", "France vs Spain Winner?", "France", 45, 48),
            quote("E2", "Brazil vs Japan Winner?", "Japan", 15, 17),
            quote("E1", "France vs Spain Winner?", "Spain", 25, 27),
        ];

        let sets = OutcomeGrouper::group(&quotes);

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].event_id, "E2");
        assert_eq!(sets[1].event_id, "E1");
        assert_eq!(sets[0].outcomes.len(), 2);
        assert_eq!(sets[1].outcomes[1].outcome.as_deref(), Some("Spain"));
    }

    #[test]
    fn test_keeps_first_seen_title() {
        let quotes = vec![
            RawQuote::new("E1").with_outcome("France"),
            quote("E1", "France vs Spain Winner?", "Spain", 25, 27),
            quote("E1", "Other title", "Tie", 20, 22),
        ];

        let sets = OutcomeGrouper::group(&quotes);
        assert!(sets[0].title.is_none());

        let quotes = vec![
            quote("E1", "France vs Spain Winner?", "France", 45, 48),
            quote("E1", "Other title", "Tie", 20, 22),
        ];

        let sets = OutcomeGrouper::group(&quotes);
        assert_eq!(sets[0].title.as_deref(), Some("France vs Spain Winner?"));
    }

    #[test]
    fn test_duplicate_labels_not_deduplicated() {
        let quotes = vec![
            quote("E1", "France vs Spain Winner?", "France", 45, 48),
            quote("E1", "France vs Spain Winner?", "France", 44, 49),
        ];

        let sets = OutcomeGrouper::group(&quotes);

        assert_eq!(sets[0].outcomes.len(), 2);
        assert_eq!(sets[0].total_ask_prob, 0.97);
    }

    #[test]
    fn test_missing_prices_degrade_to_zero() {
        let quotes = vec![
            RawQuote::new("E1").with_outcome("France"),
            RawQuote::new("E1")
                .with_outcome("Spain")
                .with_prices(None, Some(30)),
        ];

        let sets = OutcomeGrouper::group(&quotes);
        let set = &sets[0];

        assert_eq!(set.outcomes[0].implied_bid_prob, 0.0);
        assert_eq!(set.outcomes[0].implied_ask_prob, 0.0);
        assert_eq!(set.total_bid_prob, 0.0);
        assert_eq!(set.total_ask_prob, 0.3);
        assert_eq!(set.overround_bid, -1.0);
        assert_eq!(set.overround_ask, -0.7);
    }

    #[test]
    fn test_three_way_overround() {
        let quotes = vec![
            quote("E1", "France vs Spain Winner?", "France", 45, 48),
            quote("E1", "France vs Spain Winner?", "Spain", 25, 27),
            quote("E1", "France vs Spain Winner?", "Tie", 26, 28),
        ];

        let sets = OutcomeGrouper::group(&quotes);

        assert_eq!(sets[0].total_bid_prob, 0.96);
        assert_eq!(sets[0].total_ask_prob, 1.03);
        assert_eq!(sets[0].overround_ask, 0.03);
    }

    #[test]
    fn test_empty_input() {
        assert!(OutcomeGrouper::group(&[]).is_empty());
    }
}
