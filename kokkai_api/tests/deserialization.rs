use kokkai_api::types::{MeetingRecord, NumberLike, SpeechRecord};
use serde_json::Value;

fn load_fixture(name: &str) -> Value {
    let raw = std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn records<T: serde::de::DeserializeOwned>(page: &Value, key: &str) -> Vec<T> {
    serde_json::from_value(page[key].clone()).unwrap()
}

#[test]
fn deserialize_speech_records() {
    let page = load_fixture("speech.json");
    assert_eq!(page["numberOfRecords"], 1523);

    let speeches: Vec<SpeechRecord> = records(&page, "speechRecord");
    assert_eq!(speeches.len(), 2);

    let first = &speeches[0];
    assert_eq!(first.speech_id, "121104024X00320230315_001");
    assert_eq!(first.issue_id.as_deref(), Some("121104024X00320230315"));
    assert_eq!(first.session, Some(NumberLike::Int(211)));
    assert_eq!(first.speaker.as_deref(), Some("高橋克法"));
    assert_eq!(first.speaker_position.as_deref(), Some("委員長"));
    assert_eq!(first.speaker_role, None);
    assert_eq!(first.closing, None);
    assert_eq!(first.start_page, Some(1));
    assert_eq!(
        first.speech_url.as_deref(),
        Some("https://kokkai.ndl.go.jp/txt/121104024X00320230315/1")
    );
    assert_eq!(first.pdf_url, None);
}

#[test]
fn deserialize_number_like_as_text() {
    let page = load_fixture("speech.json");
    let speeches: Vec<SpeechRecord> = records(&page, "speechRecord");

    let second = &speeches[1];
    assert_eq!(second.session, Some(NumberLike::Text("211".to_string())));
    assert_eq!(second.search_object.as_ref().map(|s| s.to_string()), Some("2".to_string()));
    assert_eq!(second.create_time, None);
}

#[test]
fn deserialize_meeting_list_records() {
    let page = load_fixture("meeting_list.json");
    let meetings: Vec<MeetingRecord> = records(&page, "meetingRecord");
    assert_eq!(meetings.len(), 1);

    let meeting = &meetings[0];
    assert_eq!(meeting.issue_id, "121105254X00520230418");
    assert_eq!(meeting.name_of_house.as_deref(), Some("衆議院"));
    assert_eq!(meeting.speech_records.len(), 2);
    assert_eq!(meeting.speech_records[1].speaker.as_deref(), Some("盛山正仁"));
    assert_eq!(meeting.speech_records[1].speech, None);
    assert_eq!(
        meeting.pdf_url.as_deref(),
        Some("https://kokkai.ndl.go.jp/img/121105254X00520230418")
    );
}

#[test]
fn deserialize_meeting_records_with_text() {
    let page = load_fixture("meeting.json");
    assert!(page.get("nextRecordPosition").is_none());

    let meetings: Vec<MeetingRecord> = records(&page, "meetingRecord");
    let speech = &meetings[0].speech_records[0];
    assert_eq!(speech.speaker_yomi.as_deref(), Some("みやうちひでき"));
    assert!(speech.speech.as_deref().unwrap().starts_with("○宮内委員長"));
}

#[test]
fn meeting_record_requires_issue_id() {
    let result = serde_json::from_value::<MeetingRecord>(serde_json::json!({"value": 3}));
    assert!(result.is_err());
}

#[test]
fn records_round_trip_through_wire_names() {
    let page = load_fixture("meeting_list.json");
    let meetings: Vec<MeetingRecord> = records(&page, "meetingRecord");
    let value = serde_json::to_value(&meetings[0]).unwrap();
    assert_eq!(value["issueID"], "121105254X00520230418");
    assert_eq!(value["meetingURL"], "https://kokkai.ndl.go.jp/txt/121105254X00520230418/0");
    assert!(value["speechRecord"].is_array());
}
