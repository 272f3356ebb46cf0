//! Live-stream resource client.

use serde_json::{json, Value};

use super::meetings::meeting_segment;
use crate::client::{WeMeetingClient, MEETINGS_PATH};
use crate::error::Error;
use crate::transport::HttpMethod;
use crate::types::{LiveConfig, MeetingLocator};
use crate::uri::{segment, with_query};

/// Client for meeting live-stream operations.
#[derive(Debug, Clone, Copy)]
pub struct LiveClient<'a> {
    client: &'a WeMeetingClient,
}

impl<'a> LiveClient<'a> {
    /// Create a new live client.
    pub fn new(client: &'a WeMeetingClient) -> Self {
        Self { client }
    }

    /// Change the live-stream configuration of a meeting.
    ///
    /// When the meeting is located by code, the code travels in the body
    /// and the URI carries no meeting id.
    ///
    /// # Returns
    ///
    /// Empty on success, the vendor error otherwise
    ///
    /// # Errors
    ///
    /// Returns a validation error if the locator is empty or the config sets nothing.
    pub fn update_config(
        &self,
        locator: &MeetingLocator,
        live_config: &LiveConfig,
    ) -> Result<Option<Value>, Error> {
        locator.validate()?;
        if live_config.is_empty() {
            return Err(Error::validation("missing live config"));
        }
        let instance_id = self.client.require_instance_id()?;

        let mut body = json!({
            "userid": self.client.user_id(),
            "instanceid": instance_id,
            "live_config": live_config,
        });

        let uri = match locator {
            MeetingLocator::Id(meeting_id) => {
                format!("{MEETINGS_PATH}/{}/live_play/config", meeting_segment(meeting_id)?)
            }
            MeetingLocator::Code(meeting_code) => {
                body["meeting_code"] = Value::String(meeting_code.clone());
                format!("{MEETINGS_PATH}/live_play/config")
            }
        };

        self.client.execute(HttpMethod::Put, &uri, Some(&body))
    }

    /// Get the live replay addresses of a meeting.
    ///
    /// Replays exist only when live recording was enabled.
    pub fn replays(&self, locator: &MeetingLocator) -> Result<Option<Value>, Error> {
        locator.validate()?;
        let mut query = self.client.session_query()?;

        let path = match locator {
            MeetingLocator::Id(meeting_id) => {
                format!("{MEETINGS_PATH}/{}/live_play/replays", meeting_segment(meeting_id)?)
            }
            MeetingLocator::Code(meeting_code) => {
                query.push(("meeting_code", meeting_code.clone()));
                format!("{MEETINGS_PATH}/live_play/replays")
            }
        };

        self.client
            .execute(HttpMethod::Get, &with_query(&path, &query), None)
    }

    /// Delete the replay files of a live room.
    ///
    /// # Arguments
    ///
    /// * `meeting_id` - The meeting identifier
    /// * `live_room_id` - Live room id, as returned by [`LiveClient::replays`]
    pub fn delete_replays(&self, meeting_id: &str, live_room_id: &str) -> Result<Option<Value>, Error> {
        let meeting_id = meeting_segment(meeting_id)?;
        let live_room_id = segment(live_room_id, "live room id")?;
        let query = self.client.session_query()?;

        let path = format!("{MEETINGS_PATH}/{meeting_id}/live_play/{live_room_id}/replays");
        self.client
            .execute(HttpMethod::Delete, &with_query(&path, &query), None)
    }
}
