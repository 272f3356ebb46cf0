//! Users resource client.

use serde_json::Value;
use tracing::warn;

use crate::client::{WeMeetingClient, USERS_PATH};
use crate::error::Error;
use crate::transport::HttpMethod;
use crate::types::{NewUser, UserUpdate, MAX_PAGE_SIZE};
use crate::uri::{segment, with_query};

/// Client for enterprise user management.
#[derive(Debug, Clone, Copy)]
pub struct UsersClient<'a> {
    client: &'a WeMeetingClient,
}

impl<'a> UsersClient<'a> {
    /// Create a new users client.
    pub fn new(client: &'a WeMeetingClient) -> Self {
        Self { client }
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any of userid, email, phone or username is empty.
    pub fn create(&self, user: &NewUser) -> Result<Option<Value>, Error> {
        user.validate()?;

        let body = serde_json::to_value(user)?;
        self.client.execute(HttpMethod::Post, USERS_PATH, Some(&body))
    }

    /// Update a user's email and/or username.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `userid` is empty or the update changes nothing.
    pub fn update(&self, userid: &str, update: &UserUpdate) -> Result<Option<Value>, Error> {
        let path = user_path(userid)?;
        let update = update.normalized()?;

        let body = serde_json::to_value(&update)?;
        self.client.execute(HttpMethod::Put, &path, Some(&body))
    }

    /// Get user details.
    pub fn get(&self, userid: &str) -> Result<Option<Value>, Error> {
        self.client.execute(HttpMethod::Get, &user_path(userid)?, None)
    }

    /// List registered and unregistered users, one page at a time.
    ///
    /// # Arguments
    ///
    /// * `page` - Page number, starting at 1
    /// * `page_size` - Users per page; the API serves at most 20
    ///
    /// # Errors
    ///
    /// Returns a validation error if `page` or `page_size` is zero.
    pub fn list(&self, page: u32, page_size: u32) -> Result<Option<Value>, Error> {
        if page == 0 || page_size == 0 {
            return Err(Error::validation("page and page_size must be positive"));
        }
        if page_size > MAX_PAGE_SIZE {
            warn!(page_size, max = MAX_PAGE_SIZE, "page_size exceeds the API maximum");
        }

        let uri = with_query(
            &format!("{USERS_PATH}/list"),
            &[("page", page.to_string()), ("page_size", page_size.to_string())],
        );
        self.client.execute(HttpMethod::Get, &uri, None)
    }

    /// Delete a user.
    pub fn delete(&self, userid: &str) -> Result<Option<Value>, Error> {
        self.client
            .execute(HttpMethod::Delete, &user_path(userid)?, None)
    }
}

fn user_path(userid: &str) -> Result<String, Error> {
    Ok(format!("{USERS_PATH}/{}", segment(userid, "userid")?))
}
