//! Meetings resource client.

use serde_json::Value;

use crate::client::{WeMeetingClient, MEETINGS_PATH};
use crate::error::Error;
use crate::transport::HttpMethod;
use crate::types::{CancelReason, MeetingConfig, MeetingLocator, ParticipantsQuery, MEETING_KIND_SCHEDULED};
use crate::uri::{segment, with_query};

/// Client for meeting lifecycle operations.
#[derive(Debug, Clone, Copy)]
pub struct MeetingsClient<'a> {
    client: &'a WeMeetingClient,
}

impl<'a> MeetingsClient<'a> {
    /// Create a new meetings client.
    pub fn new(client: &'a WeMeetingClient) -> Self {
        Self { client }
    }

    /// Create a meeting.
    ///
    /// `userid` and `instanceid` default to the session values and the
    /// meeting type defaults to a scheduled meeting when the config leaves
    /// them unset.
    ///
    /// # Returns
    ///
    /// Decoded response with `meeting_number` and `meeting_info_list`
    ///
    /// # Errors
    ///
    /// Returns a validation error if subject, start or end time is missing.
    pub fn create(&self, mut config: MeetingConfig) -> Result<Option<Value>, Error> {
        config.validate_for_create()?;
        let instance_id = self.client.require_instance_id()?;

        if config.userid.is_none() {
            config.userid = Some(self.client.user_id().to_string());
        }
        config.instanceid.get_or_insert(instance_id);
        config.kind.get_or_insert(MEETING_KIND_SCHEDULED);

        let body = serde_json::to_value(&config)?;
        self.client.execute(HttpMethod::Post, MEETINGS_PATH, Some(&body))
    }

    /// Query a meeting by id or by meeting code.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the id or code is empty.
    pub fn get(&self, locator: &MeetingLocator) -> Result<Option<Value>, Error> {
        locator.validate()?;
        let session = self.client.session_query()?;

        let uri = match locator {
            MeetingLocator::Id(meeting_id) => {
                let meeting_id = meeting_segment(meeting_id)?;
                with_query(&format!("{MEETINGS_PATH}/{meeting_id}"), &session)
            }
            MeetingLocator::Code(meeting_code) => {
                let mut query = vec![("meeting_code", meeting_code.clone())];
                query.extend(session);
                with_query(MEETINGS_PATH, &query)
            }
        };

        self.client.execute(HttpMethod::Get, &uri, None)
    }

    /// List the session user's meetings.
    ///
    /// Only registered users have a meeting list; other users get an empty one.
    ///
    /// # Arguments
    ///
    /// * `pos` - Paging cursor from a previous response; `0` starts from the beginning
    pub fn list(&self, pos: u64) -> Result<Option<Value>, Error> {
        let mut query = self.client.session_query()?;
        if pos > 0 {
            query.push(("pos", pos.to_string()));
        }

        self.client
            .execute(HttpMethod::Get, &with_query(MEETINGS_PATH, &query), None)
    }

    /// Update a meeting.
    ///
    /// `userid` and `instanceid` are always taken from the session, also
    /// when the config carries them in `extra`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the meeting id is invalid or the config sets nothing.
    pub fn update(&self, meeting_id: &str, mut config: MeetingConfig) -> Result<Option<Value>, Error> {
        let meeting_id = meeting_segment(meeting_id)?;
        if config.is_empty() {
            return Err(Error::validation("missing meeting config"));
        }
        let instance_id = self.client.require_instance_id()?;

        config.userid = Some(self.client.user_id().to_string());
        config.instanceid = Some(instance_id);
        config.extra.remove("userid");
        config.extra.remove("instanceid");

        let uri = format!("{MEETINGS_PATH}/{meeting_id}");
        let body = serde_json::to_value(&config)?;
        self.client.execute(HttpMethod::Put, &uri, Some(&body))
    }

    /// Cancel a meeting. For a recurring meeting this cancels the next occurrence.
    ///
    /// # Returns
    ///
    /// Empty on success, the vendor error otherwise
    pub fn cancel(&self, meeting_id: &str, reason: &CancelReason) -> Result<Option<Value>, Error> {
        self.end_meeting(meeting_id, reason, "cancel")
    }

    /// End a meeting that is in progress.
    pub fn dismiss(&self, meeting_id: &str, reason: &CancelReason) -> Result<Option<Value>, Error> {
        self.end_meeting(meeting_id, reason, "dismiss")
    }

    fn end_meeting(
        &self,
        meeting_id: &str,
        reason: &CancelReason,
        action: &str,
    ) -> Result<Option<Value>, Error> {
        let meeting_id = meeting_segment(meeting_id)?;
        let instance_id = self.client.require_instance_id()?;

        let mut body = serde_json::json!({
            "userid": self.client.user_id(),
            "instanceid": instance_id,
        });
        if let (Value::Object(target), Value::Object(fields)) = (&mut body, serde_json::to_value(reason)?) {
            target.extend(fields);
        }

        let uri = format!("{MEETINGS_PATH}/{meeting_id}/{action}");
        self.client.execute(HttpMethod::Post, &uri, Some(&body))
    }

    /// List the members who actually joined a meeting.
    ///
    /// # Arguments
    ///
    /// * `meeting_id` - The meeting identifier
    /// * `query` - Optional paging (`pos`, `size`) and time window
    pub fn participants(
        &self,
        meeting_id: &str,
        query: &ParticipantsQuery,
    ) -> Result<Option<Value>, Error> {
        let meeting_id = meeting_segment(meeting_id)?;
        self.client.require_instance_id()?;

        let mut params = vec![("userid", self.client.user_id().to_string())];
        params.extend(query.to_query());

        let uri = with_query(
            &format!("{MEETINGS_PATH}/{meeting_id}/participants"),
            &params,
        );
        self.client.execute(HttpMethod::Get, &uri, None)
    }
}

/// The meeting id encoded as a path segment.
pub(crate) fn meeting_segment(meeting_id: &str) -> Result<String, Error> {
    segment(meeting_id, "meeting id")
}
