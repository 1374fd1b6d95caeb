use async_trait::async_trait;
use sqlx::PgPool;

use crate::{CredentialStore, StoreError};

/// Postgres-backed credential store.
///
/// Reads from the `account_credentials` table, where `account_id` is the
/// primary key — the one-credential-per-account invariant is enforced by the
/// schema, not this layer.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn credential_for_account(
        &self,
        account_ref: &str,
    ) -> Result<Option<String>, StoreError> {
        let token = sqlx::query_scalar::<_, String>(
            "SELECT access_token FROM account_credentials WHERE account_id = $1",
        )
        .bind(account_ref)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }
}
