/// Session context for a request.
///
/// This is immutable and must be present for all domain routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    email: String,
}

impl SessionContext {
    pub fn new(email: String) -> Self {
        Self { email }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
