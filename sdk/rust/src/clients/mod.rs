//! Resource clients for WeMeeting SDK.

pub mod live;
pub mod meetings;
pub mod users;

// Re-exports
pub use live::LiveClient;
pub use meetings::MeetingsClient;
pub use users::UsersClient;
