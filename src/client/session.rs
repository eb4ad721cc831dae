use async_trait::async_trait;

use super::error::ClientError;

/// Session access injected into controllers that act on the logged-in
/// client. Passing the accessor in keeps the controllers free of any
/// process-wide auth state and makes them trivial to drive from tests.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Bearer token for protected endpoints, when a session exists
    fn token(&self) -> Option<String>;

    /// Invoked after a successful profile update so whatever owns the
    /// session can re-fetch the user info it caches.
    async fn refresh_user_info(&self) -> Result<(), ClientError>;
}

/// Session backed by a fixed token, as loaded from the CLI config file.
/// Refreshing is a no-op; the CLI re-fetches on demand.
#[derive(Debug, Clone, Default)]
pub struct TokenSession {
    pub token: Option<String>,
}

impl TokenSession {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl SessionProvider for TokenSession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    async fn refresh_user_info(&self) -> Result<(), ClientError> {
        Ok(())
    }
}
