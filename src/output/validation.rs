//! Soft checks on generated text
//!
//! Nothing here rejects a reply. Mismatches are reported and logged, and the
//! only rewrite is prepending a missing budget title.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

static DAY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*##\s*Day\s+(\d+)\b").expect("day header pattern is valid")
});

const BUDGET_TITLE: &str = "Budget Estimate";

/// Day sections found in an itinerary against the number requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCoverage {
    pub expected: u32,
    pub found: u32,
}

impl DayCoverage {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.found >= self.expected
    }
}

/// Distinct `## Day N` headings in the text
#[must_use]
pub fn count_day_headers(itinerary: &str) -> u32 {
    let days: BTreeSet<u32> = DAY_HEADER
        .captures_iter(itinerary)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect();
    u32::try_from(days.len()).unwrap_or(u32::MAX)
}

/// Compare headings with the expected day count, warning on undercount
#[must_use]
pub fn check_day_coverage(itinerary: &str, expected: u32) -> DayCoverage {
    let coverage = DayCoverage {
        expected,
        found: count_day_headers(itinerary),
    };

    if coverage.is_complete() {
        debug!(found = coverage.found, expected, "Itinerary covers every day");
    } else {
        warn!(
            found = coverage.found,
            expected, "Itinerary has fewer day sections than requested"
        );
    }
    coverage
}

/// Prepend a budget title when a non-empty reply lacks one
#[must_use]
pub fn ensure_budget_title(budget: String, destination: &str) -> String {
    if budget.trim().is_empty() || budget.contains(BUDGET_TITLE) {
        return budget;
    }
    debug!(destination, "Adding missing budget title");
    format!("### {BUDGET_TITLE} for {destination}\n\n{budget}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn itinerary(days: u32) -> String {
        (1..=days)
            .map(|d| format!("## Day {d}\nMorning: walk\n"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_full_coverage() {
        let coverage = check_day_coverage(&itinerary(5), 5);
        assert_eq!(coverage, DayCoverage { expected: 5, found: 5 });
        assert!(coverage.is_complete());
    }

    #[test]
    fn test_undercount_is_reported() {
        let coverage = check_day_coverage(&itinerary(3), 5);
        assert_eq!(coverage.found, 3);
        assert!(!coverage.is_complete());
    }

    #[rstest]
    #[case::indented("  ## Day 1\n", 1)]
    #[case::no_space("##Day 2\n", 1)]
    #[case::repeated("## Day 1\n## Day 1\n", 1)]
    #[case::wrong_level("### Day 1\n# Day 2\n", 0)]
    #[case::inline("See ## Day 1 below", 0)]
    #[case::bold("## **Day 1**", 0)]
    fn test_header_format(#[case] text: &str, #[case] expected: u32) {
        assert_eq!(count_day_headers(text), expected);
    }

    #[test]
    fn test_budget_title_added_once() {
        let repaired = ensure_budget_title("Hotels: $100".to_string(), "Rome");
        assert_eq!(repaired, "### Budget Estimate for Rome\n\nHotels: $100");
        assert_eq!(ensure_budget_title(repaired.clone(), "Rome"), repaired);
    }

    #[test]
    fn test_empty_budget_untouched() {
        assert_eq!(ensure_budget_title("  ".to_string(), "Rome"), "  ");
    }
}
