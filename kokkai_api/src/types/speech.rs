use serde::{Deserialize, Serialize};

use super::NumberLike;

/// A single speech, returned by `/speech` and nested in meeting records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRecord {
    #[serde(rename = "speechID")]
    pub speech_id: String,
    #[serde(rename = "issueID", default)]
    pub issue_id: Option<String>,
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
    #[serde(default)]
    pub speech_order: Option<i64>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub speaker_yomi: Option<String>,
    #[serde(default)]
    pub speaker_group: Option<String>,
    #[serde(default)]
    pub speaker_position: Option<String>,
    #[serde(default)]
    pub speaker_role: Option<String>,
    /// Full text of the speech.
    #[serde(default)]
    pub speech: Option<String>,
    #[serde(default)]
    pub start_page: Option<i64>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(rename = "speechURL", default)]
    pub speech_url: Option<String>,
    #[serde(rename = "meetingURL", default)]
    pub meeting_url: Option<String>,
    #[serde(rename = "pdfURL", default)]
    pub pdf_url: Option<String>,
}
