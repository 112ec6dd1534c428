/// Health check response shared by the APIs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Simple health service that can be used by every API front end.
///
/// This service provides a standardised way to check that the recipe service is up. It holds
/// no state; call the associated functions directly.
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Recipes is alive".into(),
        }
    }

    /// Body of the plain-text liveness probe.
    pub fn ping() -> &'static str {
        "ping"
    }
}
