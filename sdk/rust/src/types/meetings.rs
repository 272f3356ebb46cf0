//! Meeting-related request models.
//!
//! Field names follow the vendor JSON schema. Unset optional fields are left
//! out of the request body; `extra` carries fields the SDK does not model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::InstanceId;
use super::live::LiveConfig;
use crate::error::Error;

/// Meeting type: scheduled meeting.
pub const MEETING_KIND_SCHEDULED: u8 = 0;
/// Meeting type: quick meeting.
pub const MEETING_KIND_QUICK: u8 = 1;

/// Meeting options for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingConfig {
    /// Calling user; defaults to the session user on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    /// Calling device; defaults to the session device on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instanceid: Option<InstanceId>,
    /// Meeting subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// 0 scheduled, 1 quick
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
    /// Host user ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    /// Invited user ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitees: Option<Vec<String>>,
    /// Unix seconds, as a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Unix seconds, as a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Invitees that are not registered users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_non_registered: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<MeetingSettings>,
    /// 0 one-off, 1 recurring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_rule: Option<RecurringRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_live: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_config: Option<LiveConfig>,
    /// Additional vendor fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MeetingConfig {
    /// A scheduled meeting with the fields the API requires.
    pub fn scheduled(
        subject: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self::with_kind(MEETING_KIND_SCHEDULED, subject.into(), start_time.into(), end_time.into())
    }

    /// A quick meeting, started right away.
    pub fn quick(
        subject: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self::with_kind(MEETING_KIND_QUICK, subject.into(), start_time.into(), end_time.into())
    }

    fn with_kind(kind: u8, subject: String, start_time: String, end_time: String) -> Self {
        Self {
            subject: Some(subject),
            kind: Some(kind),
            start_time: Some(start_time),
            end_time: Some(end_time),
            ..Self::default()
        }
    }

    /// Whether no option is set at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the fields required to create a meeting.
    pub(crate) fn validate_for_create(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::validation("missing meeting config"));
        }
        let required = [
            ("subject", &self.subject),
            ("start_time", &self.start_time),
            ("end_time", &self.end_time),
        ];
        for (name, value) in required {
            if value.as_deref().map_or(true, str::is_empty) {
                return Err(Error::validation(format!("missing meeting {name}")));
            }
        }
        Ok(())
    }
}

/// In-meeting settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute_enable_join: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_unmute_self: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_ivr_on_leave: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_ivr_on_join: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_in_before_host: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_in_waiting_room: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_screen_shared_watermark: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_enterprise_user_allowed: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recurrence of a recurring meeting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringRule {
    /// 0 daily, 1 weekdays, 2 weekly, 3 biweekly, 4 monthly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_type: Option<u8>,
    /// 0 ends on `until_date`, 1 ends after `until_count` occurrences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_count: Option<u32>,
    /// Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_date: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reason given when cancelling or dismissing a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelReason {
    /// Caller-defined reason code
    pub reason_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_detail: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CancelReason {
    /// A reason with only a code.
    #[must_use]
    pub fn new(reason_code: i32) -> Self {
        Self {
            reason_code,
            reason_detail: None,
            extra: Map::new(),
        }
    }

    /// Attach a human-readable detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.reason_detail = Some(detail.into());
        self
    }
}

/// Paging and time window for participant listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantsQuery {
    /// Paging cursor
    pub pos: Option<u64>,
    /// Page size
    pub size: Option<u32>,
    /// Unix seconds
    pub start_time: Option<i64>,
    /// Unix seconds
    pub end_time: Option<i64>,
}

impl ParticipantsQuery {
    /// Query parameters for the fields that are set, in API order.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(size) = self.size {
            query.push(("size", size.to_string()));
        }
        if let Some(pos) = self.pos {
            query.push(("pos", pos.to_string()));
        }
        if let Some(start_time) = self.start_time {
            query.push(("start_time", start_time.to_string()));
        }
        if let Some(end_time) = self.end_time {
            query.push(("end_time", end_time.to_string()));
        }
        query
    }
}
