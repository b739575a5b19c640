//! Credential storage for the single-tenant OAuth flow.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CredentialSet;
use crate::error::Error;

/// Trait for storing and retrieving the credential set.
///
/// There is exactly one slot: storing replaces whatever was there before, wholesale.
/// Implementations must handle concurrent access safely.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Retrieve the stored credential set.
    ///
    /// # Returns
    ///
    /// `Some(CredentialSet)` if present, `None` if the flow has not completed yet.
    async fn get(&self) -> Result<Option<CredentialSet>, Error>;

    /// Store a credential set, replacing any previous one.
    async fn store(&self, credentials: CredentialSet) -> Result<(), Error>;

    /// Remove the stored credential set.
    async fn clear(&self) -> Result<(), Error>;
}

/// Process-memory storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    credentials: RwLock<Option<CredentialSet>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get(&self) -> Result<Option<CredentialSet>, Error> {
        Ok(self.credentials.read().await.clone())
    }

    async fn store(&self, credentials: CredentialSet) -> Result<(), Error> {
        *self.credentials.write().await = Some(credentials);
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        *self.credentials.write().await = None;
        Ok(())
    }
}
