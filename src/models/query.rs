//! Search query model

use serde::{Deserialize, Serialize};

/// One search to run for a single feature of the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Which feature this query covers (destination, cuisine_preference, ...)
    pub feature_type: String,
    /// The feature value the query was built from
    pub feature_value: String,
    /// Query text sent to the search collaborator
    #[serde(alias = "search_query")]
    pub query: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(
        feature_type: impl Into<String>,
        feature_value: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            feature_type: feature_type.into(),
            feature_value: feature_value.into(),
            query: query.into(),
        }
    }

    /// A record is usable when it names its feature and carries query text
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.feature_type.trim().is_empty() && !self.query.trim().is_empty()
    }
}
