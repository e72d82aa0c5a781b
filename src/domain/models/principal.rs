//! Principal Domain Model
//!
//! The authenticated identity derived from a verified bearer token.

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    uid: String,
    email: String,
}

impl Principal {
    #[must_use]
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }

    /// Identity-provider user id (`sub` claim)
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Verified email; owns every listing this principal creates
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
