//! HTTP API: server, routing, and request/response mapping.
//!
//! Two request surfaces share one `InventoryService`: a GraphQL endpoint at
//! `/graphql` and REST read endpoints under `/products`.

pub mod app;
pub mod middleware;
