//! Library layer for Diet record search: on-disk page cache, paginated
//! aggregation across pages, and one facade per search endpoint.
//!
//! Wraps the `kokkai_api` crate, whose query, record and error types are
//! re-exported here.

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod result;

pub use kokkai_api;
pub use kokkai_api::types;
pub use kokkai_api::{
    Endpoint, Error, MeetingListQuery, MeetingQuery, Query, RecordPacking, SearchConditions,
    SpeechQuery, WireParams,
};

pub use cache::FileCache;
pub use client::DietClient;
pub use config::ClientConfig;
pub use endpoints::{MeetingEndpoint, MeetingListEndpoint, SpeechEndpoint};
pub use error::CacheError;
pub use result::{RawRecord, SearchResult};
