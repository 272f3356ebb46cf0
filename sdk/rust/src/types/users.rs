//! User management request models.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default page of the user list.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size of the user list.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page size the API serves.
pub const MAX_PAGE_SIZE: u32 = 20;

/// A user to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Caller-assigned unique user id
    pub userid: String,
    pub email: String,
    /// Must not collide with an existing user
    pub phone: String,
    /// Display name
    pub username: String,
}

impl NewUser {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("userid", &self.userid),
            ("email", &self.email),
            ("phone", &self.phone),
            ("username", &self.username),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(Error::validation(format!("missing user {name}")));
            }
        }
        Ok(())
    }
}

/// Fields to change on an existing user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl UserUpdate {
    /// Drop empty strings and reject an update that changes nothing.
    pub(crate) fn normalized(&self) -> Result<Self, Error> {
        let keep = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        let update = Self {
            email: keep(&self.email),
            username: keep(&self.username),
        };
        if update.email.is_none() && update.username.is_none() {
            return Err(Error::validation("missing user fields to update"));
        }
        Ok(update)
    }
}
