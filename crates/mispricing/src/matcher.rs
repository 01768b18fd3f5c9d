//! Event matching between prediction-market events and sportsbook events.
//!
//! Identity is resolved by team names only. A prediction-market title such
//! as `"France vs Spain Winner?"` yields the pair `("France", "Spain")`,
//! and a sportsbook event matches when each name is a case-insensitive
//! substring of the corresponding side. This is a heuristic: partial name
//! overlaps (e.g. "Korea" in both "Korea Republic" and "Korea DPR") can
//! pick the wrong event, and the first candidate in input order wins.

use mispricing_odds::Event;

/// Trailing token on prediction-market match titles.
pub const TITLE_SUFFIX: &str = " Winner?";

/// Separator between the two team names in a match title.
pub const TEAM_SEPARATOR: &str = " vs ";

/// Home/away team names parsed from a match title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub home: String,
    pub away: String,
}

/// Resolves prediction-market events to sportsbook events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventMatcher;

impl EventMatcher {
    /// Parses `"<home> vs <away> Winner?"` into a `Matchup`.
    ///
    /// The suffix is optional. Returns `None` unless the title holds exactly
    /// one separator with a non-empty name on each side.
    #[must_use]
    pub fn parse_matchup(title: &str) -> Option<Matchup> {
        let trimmed = title.trim();
        let stem = trimmed.strip_suffix(TITLE_SUFFIX).unwrap_or(trimmed).trim();

        let mut parts = stem.split(TEAM_SEPARATOR);
        let home = parts.next()?.trim();
        let away = parts.next()?.trim();

        if parts.next().is_some() || home.is_empty() || away.is_empty() {
            return None;
        }

        Some(Matchup {
            home: home.to_string(),
            away: away.to_string(),
        })
    }

    /// Returns the first event whose home and away names contain `home` and
    /// `away` respectively, ignoring case.
    #[must_use]
    pub fn find_event<'a>(events: &'a [Event], home: &str, away: &str) -> Option<&'a Event> {
        let home = home.to_lowercase();
        let away = away.to_lowercase();

        events.iter().find(|event| {
            event.home_team.to_lowercase().contains(&home)
                && event.away_team.to_lowercase().contains(&away)
        })
    }

    /// Parses `title` and finds its sportsbook event.
    #[must_use]
    pub fn match_title<'a>(events: &'a [Event], title: &str) -> Option<&'a Event> {
        let matchup = Self::parse_matchup(title)?;
        Self::find_event(events, &matchup.home, &matchup.away)
    }
}
