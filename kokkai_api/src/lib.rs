//! Low-level client for the National Diet Library's Diet record search API
//! (国会会議録検索システム): endpoint table, validated queries, record types,
//! and a single-request HTTP client.

mod client;
mod endpoint;
mod errors;
pub mod query;
pub mod types;
mod user_agent;
pub use self::client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::endpoint::Endpoint;
pub use self::errors::{Error, MAX_DETAIL_CHARS};
pub use self::query::{
    MeetingListQuery, MeetingQuery, Query, RecordPacking, SearchConditions, SpeechQuery,
    WireParams,
};
pub use self::user_agent::default_user_agent;
