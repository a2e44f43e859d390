//! Synchronous API client core for the staff directory service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//! Parsed payloads come out as flat view models ready for an address-book
//! style UI.
//!
//! # Design
//! - `DirectoryClient` is stateless — it holds a base URL and an optional
//!   session cookie, nothing else.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Response validation is layered: HTTP status, then content type, then
//!   body decode, each with its own error variant. A sign-on layer serving
//!   HTML where data was expected is caught by the content-type layer.
//! - Wire records are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod views;

pub use client::DirectoryClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    CostCentreRef, Listing, LocationRecord, OrgData, OrgUnitRef, ProfileUpdate, UserListFilter,
    UserRecord,
};
pub use views::{Location, User};
