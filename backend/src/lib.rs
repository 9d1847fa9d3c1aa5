//! Training tracker backend library.
//!
//! Hexagonal layout: [`domain`] holds aggregates, ports and services;
//! [`inbound`] adapts HTTP onto the driving ports; [`outbound`] implements
//! the repository ports for in-memory and PostgreSQL storage.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{ErrorDetails, Trace};
