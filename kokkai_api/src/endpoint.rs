//! The three search endpoints and their fixed properties.

/// One of the search operations offered by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Meeting-level summary search (`/meeting_list`).
    MeetingList,
    /// Meeting-level search with full speech text (`/meeting`).
    Meeting,
    /// Speech-level search (`/speech`).
    Speech,
}

impl Endpoint {
    /// URL suffix appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::MeetingList => "/meeting_list",
            Endpoint::Meeting => "/meeting",
            Endpoint::Speech => "/speech",
        }
    }

    /// Key under which a page response carries its records.
    pub fn record_key(&self) -> &'static str {
        match self {
            Endpoint::MeetingList | Endpoint::Meeting => "meetingRecord",
            Endpoint::Speech => "speechRecord",
        }
    }

    /// Largest `maximumRecords` the service accepts for this endpoint.
    pub fn max_records(&self) -> i64 {
        match self {
            Endpoint::Meeting => 10,
            Endpoint::MeetingList | Endpoint::Speech => 100,
        }
    }

    /// Page size used when a request does not set one.
    pub fn default_records(&self) -> i64 {
        self.max_records()
    }

    /// Short name used in validation messages.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::MeetingList => "meeting_list",
            Endpoint::Meeting => "meeting",
            Endpoint::Speech => "speech",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
