//! Login form.

use serde::{Deserialize, Serialize};

use super::{Form, FormErrors, NON_FIELD_ERRORS, require};

pub const INVALID_LOGIN_MESSAGE: &str = "Please enter a correct username and password. Note that both fields may be case-sensitive.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Where to go after logging in.
    pub next: Option<String>,
}

impl LoginForm {
    /// Errors reported when the credentials do not match an active account.
    #[must_use]
    pub fn invalid_login() -> FormErrors {
        FormErrors::single(NON_FIELD_ERRORS, INVALID_LOGIN_MESSAGE)
    }
}

impl Form for LoginForm {
    const NAME: &'static str = "AuthenticationForm";

    type Cleaned = (String, String);

    fn clean(&self) -> Result<Self::Cleaned, FormErrors> {
        let mut errors = FormErrors::new();
        let username = self.username.trim().to_string();
        require(&mut errors, "username", &username);
        require(&mut errors, "password", &self.password);

        errors.into_result((username, self.password.clone()))
    }
}
