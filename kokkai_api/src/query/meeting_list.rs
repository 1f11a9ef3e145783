use serde_json::Value;

use crate::{Endpoint, Error};

use super::common::{Query, SearchConditions};

/// Meeting-level summary search (`/meeting_list`), page size 1..100.
#[derive(Clone, Debug, PartialEq)]
pub struct MeetingListQuery {
    conditions: SearchConditions,
}

impl MeetingListQuery {
    /// Validates `conditions` for this endpoint.
    pub fn new(conditions: SearchConditions) -> Result<Self, Error> {
        conditions.validate_for(Self::ENDPOINT)?;
        Ok(Self { conditions })
    }

    /// Builds a query from a named-field mapping, rejecting unknown names.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        Self::new(SearchConditions::from_value(value)?)
    }
}

impl Query for MeetingListQuery {
    const ENDPOINT: Endpoint = Endpoint::MeetingList;

    fn conditions(&self) -> &SearchConditions {
        &self.conditions
    }
}
