use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::{CredentialStore, StoreError};

/// In-memory credential store for tests and local development.
///
/// The `failing` constructor builds a store whose every lookup errors, for
/// exercising the store-unavailable path without a database.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<HashMap<String, String>>,
    fail: bool,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that reports [`StoreError::Unavailable`] on every lookup.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            credentials: RwLock::new(HashMap::new()),
            fail: true,
        }
    }

    /// Associate `access_token` with `account_ref`, replacing any existing
    /// credential for that account.
    pub fn insert(&self, account_ref: &str, access_token: &str) {
        let mut map = self
            .credentials
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.insert(account_ref.to_owned(), access_token.to_owned());
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn credential_for_account(
        &self,
        account_ref: &str,
    ) -> Result<Option<String>, StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        let map = self
            .credentials
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(map.get(account_ref).cloned())
    }
}
