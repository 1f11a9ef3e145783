use serde_json::Value;

use crate::{Endpoint, Error};

use super::common::{Query, SearchConditions};

/// Speech-level search (`/speech`), page size 1..100.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeechQuery {
    conditions: SearchConditions,
}

impl SpeechQuery {
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

impl Query for SpeechQuery {
    const ENDPOINT: Endpoint = Endpoint::Speech;

    fn conditions(&self) -> &SearchConditions {
        &self.conditions
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::query::{Query, SearchConditions, SpeechQuery};

    #[test]
    fn test_speech_query_params() {
        let query = SpeechQuery::new(
            SearchConditions::default()
                .with_speaker("岸田文雄")
                .with_since(2022)
                .with_speaker_role("証人"),
        )
        .unwrap();
        let params = query.to_params();
        assert_eq!(params["speaker"], json!("岸田文雄"));
        assert_eq!(params["from"], json!("2022-01-01"));
        assert_eq!(params["speakerRole"], json!("証人"));
        assert!(!params.contains_key("until"));
    }

    #[test]
    fn test_speech_query_rejects_bad_date() {
        let err = SpeechQuery::new(SearchConditions::default().with_until_date("2022/12/31"))
            .unwrap_err();
        assert!(matches!(err, crate::Error::Validation(_)));
    }
}
