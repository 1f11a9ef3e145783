use serde_json::Value;

use crate::{Endpoint, Error};

use super::common::{Query, SearchConditions};

/// Meeting search with full speech text (`/meeting`), page size 1..10.
#[derive(Clone, Debug, PartialEq)]
pub struct MeetingQuery {
    conditions: SearchConditions,
}

impl MeetingQuery {
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

impl Query for MeetingQuery {
    const ENDPOINT: Endpoint = Endpoint::Meeting;

    fn conditions(&self) -> &SearchConditions {
        &self.conditions
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{MeetingQuery, Query, SearchConditions};

    #[test]
    fn test_meeting_query_ceiling() {
        let conditions = SearchConditions::default().with_any("予算");
        assert!(MeetingQuery::new(conditions.clone().with_maximum_records(10)).is_ok());

        let err = MeetingQuery::new(conditions.with_maximum_records(11)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "meeting maximum_records must be 1..10, got 11"
        );
    }

    #[test]
    fn test_meeting_query_url() {
        let url = Url::parse("https://example.com/api/meeting").unwrap();
        let query = MeetingQuery::new(
            SearchConditions::default()
                .with_name_of_meeting("予算委員会")
                .with_session_from(208)
                .with_maximum_records(5),
        )
        .unwrap();
        let url = query.add_to_url(&url);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("maximumRecords".to_string(), "5".to_string()),
                ("nameOfMeeting".to_string(), "予算委員会".to_string()),
                ("recordPacking".to_string(), "json".to_string()),
                ("sessionFrom".to_string(), "208".to_string()),
            ]
        );
    }
}
