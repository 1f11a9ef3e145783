mod common;
pub use self::common::{
    has_condition_param, param_to_string, Query, RecordPacking, SearchConditions, WireParams,
    CONDITION_KEYS, MAXIMUM_RECORDS, START_RECORD,
};

mod meeting_list;
pub use self::meeting_list::MeetingListQuery;

mod meeting;
pub use self::meeting::MeetingQuery;

mod speech;
pub use self::speech::SpeechQuery;
