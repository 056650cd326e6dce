//! HTTP façade over the address store.
//!
//! One resource path serves all four operations; the path itself comes from
//! configuration (`/addr_by_phone` by default). Payloads are validated into
//! domain types before the store is touched, so malformed input never costs
//! a round trip.

pub mod handlers;
pub mod response;
pub mod routes;

pub use routes::router;
