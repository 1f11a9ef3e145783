use serde::{Deserialize, Serialize};

/// Wire name of the server-reported total record count.
pub const NUMBER_OF_RECORDS: &str = "numberOfRecords";
/// Wire name of the cursor pointing at the next page.
pub const NEXT_RECORD_POSITION: &str = "nextRecordPosition";

/// A value the API returns either as an integer or as a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for NumberLike {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberLike::Int(n) => write!(f, "{}", n),
            NumberLike::Text(s) => write!(f, "{}", s),
        }
    }
}
