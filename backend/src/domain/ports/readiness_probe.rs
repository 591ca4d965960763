//! Port for checking that a backing service answers.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failure reported by a readiness probe.
    pub enum ReadinessError {
        /// The dependency did not answer.
        Unavailable { dependency: String, message: String } => "{dependency} unavailable: {message}",
    }
}

/// Dependency the service needs before it can take traffic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Confirm the dependency is reachable.
    async fn check(&self) -> Result<(), ReadinessError>;
}
