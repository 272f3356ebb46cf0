//! Session-level value types shared by all resource clients.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Device platform of the calling user session (`instanceid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum InstanceId {
    Pc = 1,
    Mac = 2,
    Android = 3,
    Ios = 4,
    Web = 5,
    Ipad = 6,
    AndroidPad = 7,
    MiniProgram = 8,
}

impl InstanceId {
    /// Numeric value sent to the API.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<InstanceId> for u8 {
    fn from(id: InstanceId) -> Self {
        id.as_u8()
    }
}

impl TryFrom<u8> for InstanceId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Pc),
            2 => Ok(Self::Mac),
            3 => Ok(Self::Android),
            4 => Ok(Self::Ios),
            5 => Ok(Self::Web),
            6 => Ok(Self::Ipad),
            7 => Ok(Self::AndroidPad),
            8 => Ok(Self::MiniProgram),
            other => Err(Error::validation(format!(
                "instance id must be between 1 and 8, got {other}"
            ))),
        }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Identifies a meeting either by its id or by its meeting code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingLocator {
    /// Meeting id returned on creation
    Id(String),
    /// Nine-digit meeting code users dial in with
    Code(String),
}

impl MeetingLocator {
    /// Locate a meeting by id.
    pub fn id(meeting_id: impl Into<String>) -> Self {
        Self::Id(meeting_id.into())
    }

    /// Locate a meeting by meeting code.
    pub fn code(meeting_code: impl Into<String>) -> Self {
        Self::Code(meeting_code.into())
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        let value = match self {
            Self::Id(v) | Self::Code(v) => v,
        };
        if value.is_empty() {
            return Err(Error::validation("missing meeting id or meeting code"));
        }
        Ok(())
    }
}
