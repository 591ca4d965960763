//! Noticeboard: personal notes and a commented news feed behind cookie
//! sessions.
//!
//! The crate is laid out hexagonally: `domain` owns entities, services and
//! ports; `outbound` adapts the ports to PostgreSQL or memory; `inbound`
//! exposes the services over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
