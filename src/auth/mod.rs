use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::store::FieldErrors;

// Shape check only: local@domain.tld with no whitespace.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email regex is valid")
});

/// Identity held in the session. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Format-only check shared by login and signup.
    ///
    /// The password is never compared against anything stored: any well-formed
    /// pair is accepted.
    pub fn validate(&self, password_min_length: usize) -> Result<User, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.email.is_empty() {
            errors.insert("email".to_string(), "Email is required".to_string());
        } else if !EMAIL_RE.is_match(&self.email) {
            errors.insert("email".to_string(), "Email is invalid".to_string());
        }

        if self.password.is_empty() {
            errors.insert("password".to_string(), "Password is required".to_string());
        } else if self.password.len() < password_min_length {
            errors.insert(
                "password".to_string(),
                format!("Password must be at least {} characters", password_min_length),
            );
        }

        if errors.is_empty() {
            Ok(User {
                email: self.email.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_well_formed_credentials_pass() {
        let user = creds("agent@example.com", "secret1").validate(6).unwrap();
        assert_eq!(user.email, "agent@example.com");
    }

    #[test]
    fn test_missing_fields_report_required() {
        let errors = creds("", "").validate(6).unwrap_err();
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");
    }

    #[test]
    fn test_malformed_email_and_short_password() {
        let errors = creds("not-an-email", "12345").validate(6).unwrap_err();
        assert_eq!(errors["email"], "Email is invalid");
        assert_eq!(errors["password"], "Password must be at least 6 characters");
    }

    #[test]
    fn test_email_shape_edge_cases() {
        for bad in ["a@b", "a b@example.com", "@example.com", "a@.com", "a@example..com"] {
            assert!(creds(bad, "secret1").validate(6).is_err(), "{} should be rejected", bad);
        }
        for good in ["first.last+tag@sub.example.co.uk", "x@y.io"] {
            assert!(creds(good, "secret1").validate(6).is_ok(), "{} should be accepted", good);
        }
    }
}
