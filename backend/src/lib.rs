//! Support desk backend: session-authenticated ticket tracking over HTTP.
//!
//! Layers follow a hexagonal split. [`domain`] holds tickets, users and the
//! services enforcing ownership; [`inbound`] adapts HTTP onto the driving
//! ports; [`outbound`] provides PostgreSQL and in-memory stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
