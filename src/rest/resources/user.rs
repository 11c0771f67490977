//! The authenticated user.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Sys};

/// A Contentful user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// System metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// URL of the profile picture.
    pub avatar_url: String,
    /// Email address.
    pub email: String,
    /// Whether the account is activated.
    pub activated: bool,
    /// Number of sign-ins.
    pub sign_in_count: u64,
    /// Whether the email address is confirmed.
    pub confirmed: bool,
    /// Whether two-factor authentication is on.
    #[serde(rename = "2faEnabled")]
    pub two_factor_enabled: bool,
}

resource!(User, "user");

/// Operations on `/users`.
#[derive(Clone, Copy, Debug)]
pub struct UserService<'a> {
    client: &'a Client,
}

impl<'a> UserService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches the user that owns the access token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::AccessTokenInvalid`] if the token is not a
    /// personal access token.
    pub async fn me(&self, ctx: &Context) -> Result<User, HttpError> {
        resource::fetch(self.client.http(), "/users/me".to_string(), ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Versioned;

    #[test]
    fn test_two_factor_flag_decodes() {
        let user: User = serde_json::from_str(
            r#"{
                "sys": {"id": "7BslKh9TdKGOK41VmLDjFZ", "type": "User"},
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "signInCount": 12,
                "2faEnabled": true
            }"#,
        )
        .unwrap();

        assert_eq!(user.id(), Some("7BslKh9TdKGOK41VmLDjFZ"));
        assert_eq!(user.sign_in_count, 12);
        assert!(user.two_factor_enabled);
        assert!(!user.activated);
    }
}
