//! # API Shared
//!
//! Shared utilities and definitions for the recipe catalogue APIs.
//!
//! Contains:
//! - The mutation gate: shared-password hashing and authorization (`auth` module)
//! - Shared services like `HealthService`
//! - Request/response wire types used by more than one front end
//!
//! Used by `api-rest` and the operator CLI.

pub mod auth;
pub mod health;

pub use auth::{hash_password, AuthError, MutationGate};
pub use health::{HealthRes, HealthService};

/// Body of the credential-check and delete requests.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct PasswordReq {
    pub password: String,
}
