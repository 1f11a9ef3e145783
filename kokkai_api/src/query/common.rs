//! Shared query infrastructure: the [`Query`] trait, the [`SearchConditions`]
//! field set, and the flat wire parameter mapping.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::{Endpoint, Error};

/// Flat key/value mapping sent as the HTTP query string, keyed by the
/// service's own parameter names. Sorted, so serialization is stable.
pub type WireParams = BTreeMap<String, Value>;

/// Wire name of the page position parameter.
pub const START_RECORD: &str = "startRecord";
/// Wire name of the page size parameter.
pub const MAXIMUM_RECORDS: &str = "maximumRecords";

/// Wire names of the fields that count as a search condition. At least one
/// of them must carry a non-empty value.
pub const CONDITION_KEYS: &[&str] = &[
    "nameOfHouse",
    "nameOfMeeting",
    "any",
    "speaker",
    "from",
    "until",
    "speechNumber",
    "speakerPosition",
    "speakerGroup",
    "speakerRole",
    "speechID",
    "issueID",
    "sessionFrom",
    "sessionTo",
    "issueFrom",
    "issueTo",
];

/// Response body format requested from the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPacking {
    #[default]
    Json,
    Xml,
}

impl std::fmt::Display for RecordPacking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecordPacking::Json => "json",
                RecordPacking::Xml => "xml",
            }
        )
    }
}

/// Trait implemented by the per-endpoint query types. A value of an
/// implementing type has already passed validation for its endpoint.
pub trait Query {
    /// The endpoint this query type targets.
    const ENDPOINT: Endpoint;

    /// The validated fields.
    fn conditions(&self) -> &SearchConditions;

    /// Converts the query to the wire parameter mapping.
    fn to_params(&self) -> WireParams {
        self.conditions().to_params()
    }

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (key, value) in self.to_params() {
            url.query_pairs_mut().append_pair(&key, &param_to_string(&value));
        }
        url
    }
}

/// Every field a search may carry. Unset fields are omitted from the wire.
///
/// Build one with the `with_*` setters (or [`SearchConditions::from_value`])
/// and hand it to one of the per-endpoint query constructors, which validate it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConditions {
    // paging
    #[serde(default, alias = "startRecord")]
    pub start_record: Option<i64>,
    #[serde(default, alias = "maximumRecords")]
    pub maximum_records: Option<i64>,
    #[serde(default, alias = "recordPacking")]
    pub record_packing: Option<RecordPacking>,

    // conditions
    #[serde(default, alias = "nameOfHouse")]
    pub name_of_house: Option<String>,
    #[serde(default, alias = "nameOfMeeting")]
    pub name_of_meeting: Option<String>,
    #[serde(default)]
    pub any: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default, alias = "from")]
    pub from_date: Option<String>,
    #[serde(default, alias = "until")]
    pub until_date: Option<String>,

    // flags and range
    #[serde(default, alias = "supplementAndAppendix")]
    pub supplement_and_appendix: Option<bool>,
    #[serde(default, alias = "contentsAndIndex")]
    pub contents_and_index: Option<bool>,
    #[serde(default, alias = "searchRange")]
    pub search_range: Option<String>,
    #[serde(default)]
    pub closing: Option<bool>,

    // speech and meeting identifiers
    #[serde(default, alias = "speechNumber")]
    pub speech_number: Option<i64>,
    #[serde(default, alias = "speakerPosition")]
    pub speaker_position: Option<String>,
    #[serde(default, alias = "speakerGroup")]
    pub speaker_group: Option<String>,
    #[serde(default, alias = "speakerRole")]
    pub speaker_role: Option<String>,
    #[serde(default, alias = "speechID")]
    pub speech_id: Option<String>,
    #[serde(default, alias = "issueID")]
    pub issue_id: Option<String>,
    #[serde(default, alias = "sessionFrom")]
    pub session_from: Option<i64>,
    #[serde(default, alias = "sessionTo")]
    pub session_to: Option<i64>,
    #[serde(default, alias = "issueFrom")]
    pub issue_from: Option<i64>,
    #[serde(default, alias = "issueTo")]
    pub issue_to: Option<i64>,
}

impl SearchConditions {
    /// Builds conditions from a named-field mapping. Accepts both the Rust
    /// field names and the wire names; any other name is rejected.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| Error::Validation(e.to_string()))
    }

    pub fn with_start_record(mut self, start_record: i64) -> Self {
        self.start_record = Some(start_record);
        self
    }
    pub fn with_maximum_records(mut self, maximum_records: i64) -> Self {
        self.maximum_records = Some(maximum_records);
        self
    }
    pub fn with_record_packing(mut self, record_packing: RecordPacking) -> Self {
        self.record_packing = Some(record_packing);
        self
    }

    pub fn with_name_of_house(mut self, name_of_house: &str) -> Self {
        self.name_of_house = Some(name_of_house.to_string());
        self
    }
    pub fn with_name_of_meeting(mut self, name_of_meeting: &str) -> Self {
        self.name_of_meeting = Some(name_of_meeting.to_string());
        self
    }
    pub fn with_any(mut self, any: &str) -> Self {
        self.any = Some(any.to_string());
        self
    }
    pub fn with_speaker(mut self, speaker: &str) -> Self {
        self.speaker = Some(speaker.to_string());
        self
    }
    /// Sets the start of the date range (`YYYY-MM-DD`).
    pub fn with_from_date(mut self, from_date: &str) -> Self {
        self.from_date = Some(from_date.to_string());
        self
    }
    /// Sets the end of the date range (`YYYY-MM-DD`).
    pub fn with_until_date(mut self, until_date: &str) -> Self {
        self.until_date = Some(until_date.to_string());
        self
    }
    /// Shortcut for `with_from_date("YYYY-01-01")`.
    pub fn with_since(self, year: i32) -> Self {
        self.with_from_date(&format!("{:04}-01-01", year))
    }

    pub fn with_supplement_and_appendix(mut self, value: bool) -> Self {
        self.supplement_and_appendix = Some(value);
        self
    }
    pub fn with_contents_and_index(mut self, value: bool) -> Self {
        self.contents_and_index = Some(value);
        self
    }
    pub fn with_search_range(mut self, search_range: &str) -> Self {
        self.search_range = Some(search_range.to_string());
        self
    }
    pub fn with_closing(mut self, closing: bool) -> Self {
        self.closing = Some(closing);
        self
    }

    pub fn with_speech_number(mut self, speech_number: i64) -> Self {
        self.speech_number = Some(speech_number);
        self
    }
    pub fn with_speaker_position(mut self, speaker_position: &str) -> Self {
        self.speaker_position = Some(speaker_position.to_string());
        self
    }
    pub fn with_speaker_group(mut self, speaker_group: &str) -> Self {
        self.speaker_group = Some(speaker_group.to_string());
        self
    }
    pub fn with_speaker_role(mut self, speaker_role: &str) -> Self {
        self.speaker_role = Some(speaker_role.to_string());
        self
    }
    pub fn with_speech_id(mut self, speech_id: &str) -> Self {
        self.speech_id = Some(speech_id.to_string());
        self
    }
    pub fn with_issue_id(mut self, issue_id: &str) -> Self {
        self.issue_id = Some(issue_id.to_string());
        self
    }
    pub fn with_session_from(mut self, session_from: i64) -> Self {
        self.session_from = Some(session_from);
        self
    }
    pub fn with_session_to(mut self, session_to: i64) -> Self {
        self.session_to = Some(session_to);
        self
    }
    pub fn with_issue_from(mut self, issue_from: i64) -> Self {
        self.issue_from = Some(issue_from);
        self
    }
    pub fn with_issue_to(mut self, issue_to: i64) -> Self {
        self.issue_to = Some(issue_to);
        self
    }

    /// Checks every field against the rules of `endpoint`, then checks that
    /// at least one search condition is set.
    pub fn validate_for(&self, endpoint: Endpoint) -> Result<(), Error> {
        if let Some(start_record) = self.start_record {
            if start_record < 1 {
                return Err(Error::Validation(format!(
                    "start_record must be >= 1, got {}",
                    start_record
                )));
            }
        }
        if let Some(maximum_records) = self.maximum_records {
            let ceiling = endpoint.max_records();
            if !(1..=ceiling).contains(&maximum_records) {
                return Err(Error::Validation(format!(
                    "{} maximum_records must be 1..{}, got {}",
                    endpoint, ceiling, maximum_records
                )));
            }
        }
        validate_date("from_date", self.from_date.as_deref())?;
        validate_date("until_date", self.until_date.as_deref())?;

        if !self.has_condition() {
            return Err(Error::Validation(
                "At least one search condition is required.".to_string(),
            ));
        }
        Ok(())
    }

    /// True when at least one condition field holds a non-empty value.
    pub fn has_condition(&self) -> bool {
        let text = [
            &self.name_of_house,
            &self.name_of_meeting,
            &self.any,
            &self.speaker,
            &self.from_date,
            &self.until_date,
            &self.speaker_position,
            &self.speaker_group,
            &self.speaker_role,
            &self.speech_id,
            &self.issue_id,
        ];
        let numbers = [
            self.speech_number,
            self.session_from,
            self.session_to,
            self.issue_from,
            self.issue_to,
        ];
        text.iter().any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
            || numbers.iter().any(Option::is_some)
    }

    /// Renames every set field to its wire name. Unset fields are omitted;
    /// `recordPacking` is always present and defaults to `json`.
    pub fn to_params(&self) -> WireParams {
        let mut params = WireParams::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                params.insert(key.to_string(), value);
            }
        };
        put(START_RECORD, self.start_record.map(Value::from));
        put(MAXIMUM_RECORDS, self.maximum_records.map(Value::from));
        put(
            "recordPacking",
            Some(Value::from(
                self.record_packing.unwrap_or_default().to_string(),
            )),
        );
        put("nameOfHouse", self.name_of_house.clone().map(Value::from));
        put("nameOfMeeting", self.name_of_meeting.clone().map(Value::from));
        put("any", self.any.clone().map(Value::from));
        put("speaker", self.speaker.clone().map(Value::from));
        put("from", self.from_date.clone().map(Value::from));
        put("until", self.until_date.clone().map(Value::from));
        put(
            "supplementAndAppendix",
            self.supplement_and_appendix.map(Value::from),
        );
        put("contentsAndIndex", self.contents_and_index.map(Value::from));
        put("searchRange", self.search_range.clone().map(Value::from));
        put("closing", self.closing.map(Value::from));
        put("speechNumber", self.speech_number.map(Value::from));
        put("speakerPosition", self.speaker_position.clone().map(Value::from));
        put("speakerGroup", self.speaker_group.clone().map(Value::from));
        put("speakerRole", self.speaker_role.clone().map(Value::from));
        put("speechID", self.speech_id.clone().map(Value::from));
        put("issueID", self.issue_id.clone().map(Value::from));
        put("sessionFrom", self.session_from.map(Value::from));
        put("sessionTo", self.session_to.map(Value::from));
        put("issueFrom", self.issue_from.map(Value::from));
        put("issueTo", self.issue_to.map(Value::from));
        params
    }
}

fn validate_date(field: &str, value: Option<&str>) -> Result<(), Error> {
    match value {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| {
                Error::Validation(format!("{} must be YYYY-MM-DD, got '{}'", field, s))
            }),
        _ => Ok(()),
    }
}

/// True when `params` carries a non-empty value for any of [`CONDITION_KEYS`].
pub fn has_condition_param(params: &WireParams) -> bool {
    CONDITION_KEYS.iter().any(|key| match params.get(*key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    })
}

/// Renders a wire value the way it appears in a query string.
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
