//! Single-tenant admin credential.
//!
//! The deployment supplies exactly one email/password pair through
//! configuration; login checks against it and nothing else. There is no
//! user store.

/// The configuration-supplied admin credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The identity a successful login is issued for.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Check a login attempt against the configured pair.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_pair_verifies() {
        let creds = AdminCredentials::new("admin@example.com", "hunter2");
        assert!(creds.verify("admin@example.com", "hunter2"));
    }

    #[test]
    fn wrong_email_or_password_is_rejected() {
        let creds = AdminCredentials::new("admin@example.com", "hunter2");
        assert!(!creds.verify("admin@example.com", "wrong"));
        assert!(!creds.verify("other@example.com", "hunter2"));
    }
}
