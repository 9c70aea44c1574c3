//! Article catalogue backend.
//!
//! Hexagonal layout: [`domain`] holds the entities, filters and the
//! catalogue service; [`inbound`] adapts HTTP onto it; [`outbound`]
//! implements the store ports over PostgreSQL or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
