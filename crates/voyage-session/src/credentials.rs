//! Login credentials
//!
//! Checked locally with the same rules the server applies, so an obviously
//! bad form never costs a round trip.

use serde::{Deserialize, Serialize};
use voyage_http::ErrorDetail;

#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let email: String = email.into();
        Self {
            email: email.trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ErrorDetail> {
        let mut field_errors = Vec::new();

        if self.email.trim().is_empty() {
            field_errors.push("Email is required".to_string());
        } else if !is_valid_email(self.email.trim()) {
            field_errors.push("Please enter a valid email address".to_string());
        }

        if self.password.is_empty() {
            field_errors.push("Password is required".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ErrorDetail::validation(
                "Please correct the highlighted fields",
                field_errors,
            ))
        }
    }
}

// Never log the password
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
