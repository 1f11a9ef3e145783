//! Caching, paginating wrapper around the API client.

use std::time::Duration;

use kokkai_api::query::{has_condition_param, MAXIMUM_RECORDS, START_RECORD};
use kokkai_api::types::{MeetingRecord, SpeechRecord, NEXT_RECORD_POSITION, NUMBER_OF_RECORDS};
use kokkai_api::{
    Client, Endpoint, Error, MeetingListQuery, MeetingQuery, SpeechQuery, WireParams,
};
use serde_json::{Map, Value};

use crate::cache::FileCache;
use crate::config::ClientConfig;
use crate::endpoints::{MeetingEndpoint, MeetingListEndpoint, SpeechEndpoint};
use crate::result::{RawRecord, SearchResult};

/// API client that turns one logical search into a sequence of page fetches.
///
/// Pages are fetched strictly one after another, following the
/// `nextRecordPosition` cursor, with the configured pause in between. Every
/// page is looked up in the [`FileCache`] first; only successful network
/// responses are written to it. Nothing is retried: the first failing page
/// aborts the search and the records gathered so far are dropped.
pub struct DietClient {
    inner: Client,
    cache: FileCache,
    sleep: Duration,
    max_pages: Option<u32>,
}

impl DietClient {
    /// Creates a client with the default configuration (production API, no cache).
    pub fn new() -> Result<Self, Error> {
        Self::from_config(ClientConfig::default())
    }

    /// Creates a client with a custom base URL and otherwise default settings.
    /// Used for testing.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::from_config(ClientConfig::default().with_base_url(base_url))
    }

    /// Creates a client from `config`, building its own connection pool.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let inner = Client::with_options(&config.base_url, &config.user_agent, config.timeout)?;
        Ok(Self::assemble(inner, &config))
    }

    /// Creates a client from `config` that sends its requests through `http`.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        let inner =
            Client::with_http_client(&config.base_url, &config.user_agent, config.timeout, http);
        Self::assemble(inner, &config)
    }

    fn assemble(inner: Client, config: &ClientConfig) -> Self {
        let cache = match &config.cache_dir {
            Some(dir) => FileCache::new(dir.clone()),
            None => FileCache::disabled(),
        };
        Self {
            inner,
            cache,
            sleep: config.sleep,
            max_pages: config.max_pages,
        }
    }

    /// The page cache used by this client.
    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Full URL of `endpoint` for this client.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        self.inner.endpoint_url(endpoint)
    }

    /// Meeting-level summary search.
    pub fn meeting_list(&self) -> MeetingListEndpoint<'_> {
        MeetingListEndpoint::new(self)
    }

    /// Meeting search with full speech text.
    pub fn meeting(&self) -> MeetingEndpoint<'_> {
        MeetingEndpoint::new(self)
    }

    /// Speech-level search.
    pub fn speech(&self) -> SpeechEndpoint<'_> {
        SpeechEndpoint::new(self)
    }

    /// Fetches one page, returning the cached copy when one exists.
    pub async fn fetch_page(&self, endpoint_url: &str, params: &WireParams) -> Result<Value, Error> {
        if let Some(cached) = self.cache.get(endpoint_url, params).await {
            tracing::debug!("Cache hit for {}", endpoint_url);
            return Ok(cached);
        }

        let data = self.inner.fetch(endpoint_url, params).await?;
        // Cache writes are best-effort; a failed write is dropped.
        let _ = self.cache.put(endpoint_url, params, &data).await;
        Ok(data)
    }

    /// Runs a paginated search on `endpoint` with raw wire parameters and
    /// returns the records as received.
    ///
    /// `params` must carry at least one search condition. `limit_total`,
    /// when given, must be positive; the search stops as soon as that many
    /// records are gathered and marks the result as truncated. `startRecord`
    /// defaults to 1 and `maximumRecords` to the endpoint's page size.
    pub async fn search_records(
        &self,
        endpoint: Endpoint,
        params: &WireParams,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<RawRecord>, Error> {
        if !has_condition_param(params) {
            return Err(Error::Validation(
                "At least one search condition is required.".to_string(),
            ));
        }
        let limit = sanitize_limit(limit_total)?;

        let endpoint_url = self.inner.endpoint_url(endpoint);
        let record_key = endpoint.record_key();

        // Work on a copy; only the page position changes between pages.
        let mut cur_params = params.clone();
        cur_params
            .entry(START_RECORD.to_string())
            .or_insert_with(|| Value::from(1));
        cur_params
            .entry(MAXIMUM_RECORDS.to_string())
            .or_insert_with(|| Value::from(endpoint.default_records()));

        let mut records: Vec<RawRecord> = Vec::new();
        let mut pages: u32 = 0;
        let mut total_records = None;

        loop {
            if let Some(max_pages) = self.max_pages {
                if pages >= max_pages {
                    return Err(Error::Request(format!(
                        "Search exceeded max_pages ({}) for {}",
                        max_pages, endpoint_url
                    )));
                }
            }

            pages += 1;
            let mut data = self.fetch_page(&endpoint_url, &cur_params).await?;
            if pages == 1 {
                total_records = data.get(NUMBER_OF_RECORDS).and_then(as_count);
            }
            let next = data
                .get(NEXT_RECORD_POSITION)
                .filter(|cursor| is_truthy(cursor))
                .cloned();

            for item in take_records(&mut data, record_key)? {
                records.push(into_record(item));

                if let Some(limit) = limit {
                    if records.len() >= limit {
                        records.truncate(limit);
                        tracing::debug!(
                            "Reached limit_total {} after {} page(s) of {}",
                            limit,
                            pages,
                            endpoint_url
                        );
                        return Ok(SearchResult::new(
                            endpoint_url,
                            params.clone(),
                            total_records,
                            records,
                            pages,
                            true,
                        ));
                    }
                }
            }

            let Some(next) = next else {
                break;
            };
            tracing::debug!(
                "Page {} of {} done ({} records so far), next position {}",
                pages,
                endpoint_url,
                records.len(),
                next
            );
            cur_params.insert(START_RECORD.to_string(), next);

            if !self.sleep.is_zero() {
                tokio::time::sleep(self.sleep).await;
            }
        }

        Ok(SearchResult::new(
            endpoint_url,
            params.clone(),
            total_records,
            records,
            pages,
            false,
        ))
    }

    /// Meeting-list search from a named-field mapping; unknown names are rejected.
    pub async fn search_meeting_list_value(
        &self,
        fields: Value,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<MeetingRecord>, Error> {
        let query = MeetingListQuery::from_value(fields)?;
        self.meeting_list().search(&query, limit_total).await
    }

    /// Meeting search from a named-field mapping; unknown names are rejected.
    pub async fn search_meeting_value(
        &self,
        fields: Value,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<MeetingRecord>, Error> {
        let query = MeetingQuery::from_value(fields)?;
        self.meeting().search(&query, limit_total).await
    }

    /// Speech search from a named-field mapping; unknown names are rejected.
    pub async fn search_speech_value(
        &self,
        fields: Value,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<SpeechRecord>, Error> {
        let query = SpeechQuery::from_value(fields)?;
        self.speech().search(&query, limit_total).await
    }
}

/// `None` means unbounded. Zero and negative limits are rejected rather
/// than read as "no limit".
fn sanitize_limit(limit_total: Option<i64>) -> Result<Option<usize>, Error> {
    match limit_total {
        None => Ok(None),
        Some(value) if value <= 0 => Err(Error::Request(format!(
            "limit_total must be positive: {}",
            value
        ))),
        Some(value) => usize::try_from(value)
            .map(Some)
            .map_err(|_| Error::Request(format!("limit_total out of range: {}", value))),
    }
}

/// Removes the record list from a page. A missing or null list is empty;
/// anything other than an array is an error.
fn take_records(data: &mut Value, record_key: &str) -> Result<Vec<Value>, Error> {
    match data.get_mut(record_key).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(Error::Request(format!(
            "Unexpected '{}' shape: {}",
            record_key,
            kind_of(&other)
        ))),
    }
}

fn into_record(item: Value) -> RawRecord {
    match item {
        Value::Object(record) => record,
        other => {
            let mut wrapped = Map::new();
            wrapped.insert("value".to_string(), other);
            wrapped
        }
    }
}

fn as_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Absent, null, false, zero and empty cursors all mean "no more pages".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
