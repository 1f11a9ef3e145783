//! Aggregated outcome of a paginated search.

use kokkai_api::{Error, WireParams};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A record as received, before it is read into a domain type. Elements
/// that were not JSON objects arrive wrapped as `{"value": <element>}`.
pub type RawRecord = Map<String, Value>;

/// Records gathered across all pages of one search, with provenance.
///
/// Serializes to `{endpoint, params, totalRecords, retrievedRecords, pages,
/// records, truncated}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    /// Full URL of the endpoint searched.
    pub endpoint: String,
    /// Wire parameters as supplied by the caller, before page seeding.
    pub params: WireParams,
    /// Record count reported by the first page.
    pub total_records: Option<i64>,
    /// Number of entries in `records`.
    pub retrieved_records: usize,
    /// Number of pages fetched (cache hits included).
    pub pages: u32,
    pub records: Vec<T>,
    /// True when the search stopped because `limit_total` was reached.
    pub truncated: bool,
}

impl<T> SearchResult<T> {
    pub(crate) fn new(
        endpoint: String,
        params: WireParams,
        total_records: Option<i64>,
        records: Vec<T>,
        pages: u32,
        truncated: bool,
    ) -> Self {
        Self {
            endpoint,
            params,
            total_records,
            retrieved_records: records.len(),
            pages,
            records,
            truncated,
        }
    }
}

impl SearchResult<RawRecord> {
    /// Reads every record into `U`, keeping the provenance fields.
    /// A record that does not fit `U` is an [`Error::Parse`].
    pub fn into_records<U: DeserializeOwned>(self) -> Result<SearchResult<U>, Error> {
        let records = self
            .records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value(Value::Object(record)).map_err(|e| {
                    Error::Parse(format!("Invalid record at index {}: {}", index, e))
                })
            })
            .collect::<Result<Vec<U>, Error>>()?;
        Ok(SearchResult::new(
            self.endpoint,
            self.params,
            self.total_records,
            records,
            self.pages,
            self.truncated,
        ))
    }
}
