//! Generated plan artifacts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar window of the generated trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDetails {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
    /// Day index (1-based) to calendar date
    pub daily_dates: BTreeMap<u32, NaiveDate>,
}

/// Everything produced for one planning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub itinerary: String,
    pub packing_list: String,
    pub estimated_budget: String,
    /// Absent only when the whole pipeline failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_details: Option<TripDetails>,
}

impl Output {
    /// Whether every text artifact carries content
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.itinerary, &self.packing_list, &self.estimated_budget]
            .iter()
            .all(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_details_serialization() {
        let start = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        let details = TripDetails {
            destination: "Kyoto".to_string(),
            start_date: start,
            end_date: NaiveDate::from_ymd_opt(2026, 11, 4).unwrap(),
            duration_days: 2,
            daily_dates: BTreeMap::from([
                (1, start),
                (2, NaiveDate::from_ymd_opt(2026, 11, 3).unwrap()),
            ]),
        };

        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["start_date"], "2026-11-02");
        assert_eq!(value["daily_dates"]["2"], "2026-11-03");
    }

    #[test]
    fn test_output_without_trip_details_omits_key() {
        let output = Output {
            itinerary: "a".to_string(),
            packing_list: "b".to_string(),
            estimated_budget: " ".to_string(),
            trip_details: None,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert!(value.get("trip_details").is_none());
        assert!(!output.is_complete());
    }
}
