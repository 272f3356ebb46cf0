//! Live-stream request models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Live-stream options of a meeting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_live_password: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_password: Option<String>,
    /// Allow chat in the live room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_live_im: Option<bool>,
    /// Keep a replay after the stream ends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_live_replay: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LiveConfig {
    /// Whether no option is set at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
