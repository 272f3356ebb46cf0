//! Testing utilities for WeMeeting SDK.
//!
//! Provides a mock transport for testing applications that use the SDK
//! without reaching the vendor API.

mod mock;

pub use mock::{MockCall, MockResponse, MockTransport};
