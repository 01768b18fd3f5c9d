//! Consensus fair probabilities from sportsbook odds.
//!
//! Each bookmaker's three-way moneyline is converted to implied
//! probabilities (`1 / decimal odds`), normalized to sum to 1 to remove the
//! bookmaker's margin, and then averaged per outcome name across all
//! eligible bookmakers. Averaging independently normalized vectors does not
//! preserve the sum-to-1 property, so the consensus may be off by a few
//! basis points in total.

use crate::types::round4;
use mispricing_odds::{Bookmaker, Event};
use std::collections::{BTreeMap, HashMap};

/// Number of outcomes a bookmaker must quote to contribute.
pub const THREE_WAY_OUTCOMES: usize = 3;

// =============================================================================
// Consensus Probabilities
// =============================================================================

/// Vig-free cross-bookmaker probability per outcome name, rounded to 4 dp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsensusProbabilities {
    probabilities: BTreeMap<String, f64>,
    bookmakers: usize,
}

impl ConsensusProbabilities {
    /// Returns the fair probability for an exact outcome name.
    #[must_use]
    pub fn get(&self, outcome: &str) -> Option<f64> {
        self.probabilities.get(outcome).copied()
    }

    /// Number of outcome names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Number of bookmakers that contributed.
    #[must_use]
    pub fn bookmaker_count(&self) -> usize {
        self.bookmakers
    }

    /// Iterates outcome names and probabilities in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ConsensusProbabilities {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            probabilities: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            bookmakers: 0,
        }
    }
}

// =============================================================================
// Consensus Model
// =============================================================================

/// Derives consensus fair probabilities from one sportsbook event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsensusFairModel;

impl ConsensusFairModel {
    /// Computes the consensus for `event`.
    ///
    /// Returns `None` when there is no event or when no bookmaker is
    /// eligible. Ineligible bookmakers are skipped silently.
    #[must_use]
    pub fn fair_probabilities(event: Option<&Event>) -> Option<ConsensusProbabilities> {
        let event = event?;

        let mut samples: HashMap<&str, Vec<f64>> = HashMap::new();
        let mut bookmakers = 0;

        for bookmaker in &event.bookmakers {
            let Some(normalized) = Self::normalize(bookmaker) else {
                continue;
            };

            bookmakers += 1;
            for (name, probability) in normalized {
                samples.entry(name).or_default().push(probability);
            }
        }

        if samples.is_empty() {
            return None;
        }

        let probabilities = samples
            .into_iter()
            .map(|(name, values)| {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                (name.to_string(), round4(mean))
            })
            .collect();

        Some(ConsensusProbabilities {
            probabilities,
            bookmakers,
        })
    }

    /// Returns one bookmaker's vig-free probabilities, or `None` if the
    /// bookmaker is ineligible.
    ///
    /// Only the bookmaker's first market is considered. It must be the
    /// three-way moneyline with exactly three outcomes and finite positive
    /// odds. A repeated outcome name keeps its last value.
    fn normalize(bookmaker: &Bookmaker) -> Option<HashMap<&str, f64>> {
        let market = bookmaker.primary_market()?;

        if !market.is_three_way_moneyline() || market.outcomes.len() != THREE_WAY_OUTCOMES {
            return None;
        }

        if market
            .outcomes
            .iter()
            .any(|o| !o.price.is_finite() || o.price <= 0.0)
        {
            return None;
        }

        let implied: Vec<(&str, f64)> = market
            .outcomes
            .iter()
            .map(|o| (o.name.as_str(), 1.0 / o.price))
            .collect();

        let total: f64 = implied.iter().map(|(_, p)| p).sum();
        if total == 0.0 {
            return None;
        }

        Some(implied.into_iter().map(|(name, p)| (name, p / total)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mispricing_odds::BookmakerMarket;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn event_with(books: Vec<Bookmaker>) -> Event {
        books
            .into_iter()
            .fold(Event::new("Team A", "Team B"), Event::with_bookmaker)
    }

    // ==================== Eligibility Tests ====================

    #[test]
    fn test_no_event_is_none() {
        assert!(ConsensusFairModel::fair_probabilities(None).is_none());
    }

    #[test]
    fn test_no_bookmakers_is_none() {
        let event = Event::new("A", "B");
        assert!(ConsensusFairModel::fair_probabilities(Some(&event)).is_none());
    }

    #[test]
    fn test_wrong_market_key_is_none() {
        let book = Bookmaker {
            key: "book".to_string(),
            title: "Book".to_string(),
            markets: vec![BookmakerMarket::new(
                "spreads",
                &[("A", 2.0), ("B", 4.0), ("Draw", 4.0)],
            )],
        };

        assert!(ConsensusFairModel::fair_probabilities(Some(&event_with(vec![book]))).is_none());
    }

    #[test]
    fn test_wrong_outcome_count_is_none() {
        let two_way = Bookmaker::three_way("two", &[("A", 1.5), ("B", 2.5)]);
        let four_way = Bookmaker::three_way(
            "four",
            &[("A", 3.0), ("B", 3.0), ("C", 5.0), ("Draw", 5.0)],
        );

        let event = event_with(vec![two_way, four_way]);
        assert!(ConsensusFairModel::fair_probabilities(Some(&event)).is_none());
    }

    #[test]
    fn test_non_positive_odds_is_none() {
        let zero = Bookmaker::three_way("zero", &[("A", 0.0), ("B", 4.0), ("Draw", 4.0)]);
        let negative = Bookmaker::three_way("neg", &[("A", -2.0), ("B", 4.0), ("Draw", 4.0)]);
        let infinite = Bookmaker::three_way(
            "inf",
            &[("A", f64::INFINITY), ("B", 4.0), ("Draw", 4.0)],
        );

        let event = event_with(vec![zero, negative, infinite]);
        assert!(ConsensusFairModel::fair_probabilities(Some(&event)).is_none());
    }

    #[test]
    fn test_only_first_market_considered() {
        let book = Bookmaker {
            key: "book".to_string(),
            title: "Book".to_string(),
            markets: vec![
                BookmakerMarket::new("totals", &[("Over", 1.9), ("Under", 1.9)]),
                BookmakerMarket::new("h2h", &[("A", 2.0), ("B", 4.0), ("Draw", 4.0)]),
            ],
        };

        assert!(ConsensusFairModel::fair_probabilities(Some(&event_with(vec![book]))).is_none());
    }

    #[test]
    fn test_ineligible_bookmaker_skipped() {
        let good = Bookmaker::three_way("good", &[("A", 2.0), ("B", 4.0), ("Draw", 4.0)]);
        let bad = Bookmaker::three_way("bad", &[("A", 1.5), ("B", 2.5)]);

        let consensus =
            ConsensusFairModel::fair_probabilities(Some(&event_with(vec![bad, good]))).unwrap();

        assert_eq!(consensus.bookmaker_count(), 1);
        assert_eq!(consensus.get("A"), Some(0.5));
    }

    // ==================== Normalization Tests ====================

    #[test]
    fn test_single_bookmaker_sums_to_one() {
        let book = Bookmaker::three_way("book", &[("A", 1.8), ("B", 4.2), ("Draw", 3.6)]);
        let consensus =
            ConsensusFairModel::fair_probabilities(Some(&event_with(vec![book]))).unwrap();

        let total: f64 = consensus.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() <= 0.0002, "total={total}");
    }

    #[test]
    fn test_vig_removed() {
        // Implied 0.5 + 0.25 + 0.3333 = 1.0833
        let book = Bookmaker::three_way("book", &[("A", 2.0), ("B", 4.0), ("Draw", 3.0)]);
        let consensus =
            ConsensusFairModel::fair_probabilities(Some(&event_with(vec![book]))).unwrap();

        assert!(close(consensus.get("A").unwrap(), 0.4615));
        assert!(close(consensus.get("B").unwrap(), 0.2308));
        assert!(close(consensus.get("Draw").unwrap(), 0.3077));
    }

    #[test]
    fn test_two_bookmaker_average() {
        let book1 = Bookmaker::three_way("book1", &[("A", 2.0), ("B", 4.0), ("Draw", 4.0)]);
        let book2 = Bookmaker::three_way("book2", &[("A", 1.9), ("B", 4.5), ("Draw", 4.0)]);

        let consensus =
            ConsensusFairModel::fair_probabilities(Some(&event_with(vec![book1, book2]))).unwrap();

        assert_eq!(consensus.bookmaker_count(), 2);
        assert_eq!(consensus.len(), 3);
        assert!(close(consensus.get("A").unwrap(), 0.5135));
        assert!(close(consensus.get("B").unwrap(), 0.2363));
        assert!(close(consensus.get("Draw").unwrap(), 0.2502));
    }

    #[test]
    fn test_outcome_names_matched_exactly() {
        let book1 = Bookmaker::three_way("book1", &[("A", 2.0), ("B", 4.0), ("Draw", 4.0)]);
        let book2 = Bookmaker::three_way("book2", &[("A", 2.0), ("B", 4.0), ("Tie", 4.0)]);

        let consensus =
            ConsensusFairModel::fair_probabilities(Some(&event_with(vec![book1, book2]))).unwrap();

        assert_eq!(consensus.len(), 4);
        assert_eq!(consensus.get("Draw"), Some(0.25));
        assert_eq!(consensus.get("Tie"), Some(0.25));
        assert_eq!(consensus.get("draw"), None);
    }

    #[test]
    fn test_from_iterator() {
        let consensus: ConsensusProbabilities = [("A", 0.5), ("B", 0.3)].into_iter().collect();
        assert_eq!(consensus.get("B"), Some(0.3));
        assert_eq!(consensus.bookmaker_count(), 0);
        assert!(!consensus.is_empty());
    }
}
