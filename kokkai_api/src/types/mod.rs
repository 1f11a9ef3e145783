mod meta;
pub use self::meta::{NumberLike, NEXT_RECORD_POSITION, NUMBER_OF_RECORDS};

mod speech;
pub use self::speech::SpeechRecord;

mod meeting;
pub use self::meeting::MeetingRecord;
