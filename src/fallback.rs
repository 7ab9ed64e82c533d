//! Fixed texts used when generation is unavailable

use crate::models::Output;

pub const FAILED_ITINERARY: &str =
    "I apologize, but I couldn't generate a travel plan due to an error. \
     Please try again with more specific details about your destination, \
     dates, and preferences.";
pub const FAILED_PACKING_LIST: &str = "Unable to generate packing list due to an error.";
pub const FAILED_BUDGET: &str = "Unable to generate budget estimate due to an error.";

#[must_use]
pub fn itinerary(destination: &str) -> String {
    format!(
        "# Travel Itinerary for {destination}

## Overview
Explore {destination} at your own pace, combining its best-known sights \
with time to discover local neighbourhoods.

## Daily Plan
- Morning: Visit a major landmark or museum.
- Afternoon: Walk through the historic centre and local markets.
- Evening: Try a well-reviewed restaurant serving regional dishes.

## Accommodation
Choose a hotel or guesthouse close to the city centre or public transport.

## Transportation
Use public transport or walk between nearby attractions.

## Tips
Check opening hours in advance and book popular attractions early."
    )
}

#[must_use]
pub fn packing_list(destination: &str) -> String {
    format!(
        "# Packing Essentials for {destination}

## Essentials
- Passport or ID and travel documents
- Payment cards and some local currency
- Travel insurance details

## Clothing
- Comfortable walking shoes
- Layers suitable for the season
- Light rain jacket

## Toiletries
- Toothbrush, toothpaste and personal care items
- Sunscreen

## Electronics
- Phone and charger
- Power adapter"
    )
}

#[must_use]
pub fn budget(destination: &str) -> String {
    format!(
        "### Budget Estimate for {destination}

- Accommodation: $80 - $250 per night
- Food: $30 - $100 per day
- Transportation: $10 - $40 per day
- Activities: $20 - $80 per day
- Miscellaneous: $10 - $50 per day

Prices vary by season and travel style."
    )
}

/// The output returned when the whole pipeline failed
#[must_use]
pub fn failure_output() -> Output {
    Output {
        itinerary: FAILED_ITINERARY.to_string(),
        packing_list: FAILED_PACKING_LIST.to_string(),
        estimated_budget: FAILED_BUDGET.to_string(),
        trip_details: None,
    }
}
