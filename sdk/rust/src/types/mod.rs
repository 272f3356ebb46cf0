//! Request models for WeMeeting SDK.

pub mod common;
pub mod live;
pub mod meetings;
pub mod users;

// Re-exports
pub use common::{InstanceId, MeetingLocator};
pub use live::LiveConfig;
pub use meetings::{
    CancelReason, MeetingConfig, MeetingSettings, ParticipantsQuery, RecurringRule,
    MEETING_KIND_QUICK, MEETING_KIND_SCHEDULED,
};
pub use users::{NewUser, UserUpdate, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
