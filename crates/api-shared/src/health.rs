use crate::types::HealthRes;

/// Liveness probe answer for the ERA services.
///
/// Carries no state: a process that can build the response is up.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// The fixed "alive" response served at `/health`.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "ERA is alive".into(),
        }
    }
}
