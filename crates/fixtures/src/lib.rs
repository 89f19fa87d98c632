pub mod auth;

pub use auth::{
    seed_auth_identities, AuthIdentity, AuthIdentityRecord, AuthIdentityService, ProviderIdentity,
};
