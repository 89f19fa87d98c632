//! Auth identity seeding for test setups.
//!
//! `seed_auth_identities` is a thin fixture factory: it hands a record list
//! (or a sensible default) to the injected identity service and returns the
//! created identities unchanged, in order. Service failures propagate as-is;
//! there is no retry and no local recovery.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One external-provider binding of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    /// Provider-side subject (email address, provider user id).
    pub entity_id: String,
    /// Provider name, e.g. "emailpass".
    pub provider: String,
}

/// Input record for identity creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthIdentityRecord {
    pub id: String,
    pub provider_identities: Vec<ProviderIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_metadata: Option<serde_json::Value>,
}

/// A created auth identity, as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: String,
    pub provider_identities: Vec<ProviderIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// The injected identity service.
#[async_trait]
pub trait AuthIdentityService {
    type Error;

    async fn create_auth_identities(
        &self,
        records: Vec<AuthIdentityRecord>,
    ) -> Result<Vec<AuthIdentity>, Self::Error>;
}

/// Default seed: one identity with a single email/password binding.
pub fn default_records() -> Vec<AuthIdentityRecord> {
    vec![AuthIdentityRecord {
        id: "test-id".to_string(),
        provider_identities: vec![ProviderIdentity {
            entity_id: "admin@example.com".to_string(),
            provider: "emailpass".to_string(),
        }],
        app_metadata: None,
    }]
}

/// Seed auth identities through `service`. When `records` is `None`, the
/// default record list is used. The created identities come back unchanged
/// and in the order the service produced them.
pub async fn seed_auth_identities<S>(
    service: &S,
    records: Option<Vec<AuthIdentityRecord>>,
) -> Result<Vec<AuthIdentity>, S::Error>
where
    S: AuthIdentityService + Sync,
{
    let records = records.unwrap_or_else(default_records);
    service.create_auth_identities(records).await
}
