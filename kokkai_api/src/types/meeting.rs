use serde::{Deserialize, Serialize};

use super::{NumberLike, SpeechRecord};

/// A meeting, returned by `/meeting_list` and `/meeting`.
///
/// `/meeting_list` fills `speech_records` with speech headers only (no
/// text); `/meeting` includes the full text of every speech.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    #[serde(rename = "issueID")]
    pub issue_id: String,
    #[serde(default)]
    pub image_kind: Option<String>,
    #[serde(default)]
    pub search_object: Option<NumberLike>,
    #[serde(default)]
    pub session: Option<NumberLike>,
    #[serde(default)]
    pub name_of_house: Option<String>,
    #[serde(default)]
    pub name_of_meeting: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub closing: Option<String>,
    #[serde(rename = "speechRecord", default)]
    pub speech_records: Vec<SpeechRecord>,
    #[serde(rename = "meetingURL", default)]
    pub meeting_url: Option<String>,
    #[serde(rename = "pdfURL", default)]
    pub pdf_url: Option<String>,
}
