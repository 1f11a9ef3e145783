//! Per-endpoint search entry points.
//!
//! Each facade fixes the endpoint (and with it the URL suffix, record key and
//! page size) and reads the gathered records into the matching domain type.

use kokkai_api::types::{MeetingRecord, SpeechRecord};
use kokkai_api::{
    Endpoint, Error, MeetingListQuery, MeetingQuery, Query, SearchConditions, SpeechQuery,
};
use serde::de::DeserializeOwned;

use crate::client::DietClient;
use crate::result::SearchResult;

async fn search_typed<Q, T>(
    client: &DietClient,
    query: &Q,
    limit_total: Option<i64>,
) -> Result<SearchResult<T>, Error>
where
    Q: Query,
    T: DeserializeOwned,
{
    client
        .search_records(Q::ENDPOINT, &query.to_params(), limit_total)
        .await?
        .into_records()
}

fn any_text(text: &str, endpoint: Endpoint) -> SearchConditions {
    SearchConditions::default()
        .with_any(text)
        .with_maximum_records(endpoint.max_records())
}

/// `/meeting_list`: meetings with speech headers only.
pub struct MeetingListEndpoint<'a> {
    client: &'a DietClient,
}

impl<'a> MeetingListEndpoint<'a> {
    pub(crate) fn new(client: &'a DietClient) -> Self {
        Self { client }
    }

    pub async fn search(
        &self,
        query: &MeetingListQuery,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<MeetingRecord>, Error> {
        search_typed(self.client, query, limit_total).await
    }

    /// Free-text search with the largest page size.
    pub async fn search_any(
        &self,
        text: &str,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<MeetingRecord>, Error> {
        let query = MeetingListQuery::new(any_text(text, Endpoint::MeetingList))?;
        self.search(&query, limit_total).await
    }
}

/// `/meeting`: meetings with the full text of every speech.
pub struct MeetingEndpoint<'a> {
    client: &'a DietClient,
}

impl<'a> MeetingEndpoint<'a> {
    pub(crate) fn new(client: &'a DietClient) -> Self {
        Self { client }
    }

    pub async fn search(
        &self,
        query: &MeetingQuery,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<MeetingRecord>, Error> {
        search_typed(self.client, query, limit_total).await
    }

    /// Free-text search with the largest page size.
    pub async fn search_any(
        &self,
        text: &str,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<MeetingRecord>, Error> {
        let query = MeetingQuery::new(any_text(text, Endpoint::Meeting))?;
        self.search(&query, limit_total).await
    }
}

/// `/speech`: individual speeches.
pub struct SpeechEndpoint<'a> {
    client: &'a DietClient,
}

impl<'a> SpeechEndpoint<'a> {
    pub(crate) fn new(client: &'a DietClient) -> Self {
        Self { client }
    }

    pub async fn search(
        &self,
        query: &SpeechQuery,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<SpeechRecord>, Error> {
        search_typed(self.client, query, limit_total).await
    }

    /// Free-text search with the largest page size.
    pub async fn search_any(
        &self,
        text: &str,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<SpeechRecord>, Error> {
        let query = SpeechQuery::new(any_text(text, Endpoint::Speech))?;
        self.search(&query, limit_total).await
    }

    /// Speeches by `speaker`, optionally within a `YYYY-MM-DD` date range.
    pub async fn search_by_speaker(
        &self,
        speaker: &str,
        from_date: Option<&str>,
        until_date: Option<&str>,
        limit_total: Option<i64>,
    ) -> Result<SearchResult<SpeechRecord>, Error> {
        let mut conditions = SearchConditions::default()
            .with_speaker(speaker)
            .with_maximum_records(Endpoint::Speech.max_records());
        if let Some(from_date) = from_date {
            conditions = conditions.with_from_date(from_date);
        }
        if let Some(until_date) = until_date {
            conditions = conditions.with_until_date(until_date);
        }
        let query = SpeechQuery::new(conditions)?;
        self.search(&query, limit_total).await
    }
}
