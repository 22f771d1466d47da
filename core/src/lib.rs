//! I/O-free client core for the student records admin interface.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the `students`
//! resource client sit two controllers: a paginated list and a create/edit
//! form. Both hand out ticketed requests and accept the responses back, so
//! the host decides when and how I/O happens.
//!
//! # Design
//! - `HttpAdapter` owns the base URL, JSON encoding and status classification.
//! - `StudentClient` splits every CRUD operation into `build_*` / `parse_*`.
//! - `ListController` and `FormController` are plain state machines; each
//!   mount owns its state and discards responses for superseded tickets.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod adapter;
pub mod cache;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod pagination;
pub mod request;
pub mod route;
pub mod types;

pub use adapter::HttpAdapter;
pub use cache::StudentCache;
pub use client::{StudentClient, TOTAL_COUNT_HEADER};
pub use error::{ApiError, FieldErrors};
pub use form::{FormController, FormMode, RecordState, SubmitState};
pub use http::{Envelope, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use list::{ListController, ListPage, ListState};
pub use pagination::{NavLink, PageLink, PageLinks, Pagination, DEFAULT_LIMIT};
pub use request::{Notification, Pending, Ticket};
pub use route::Route;
pub use types::{NewStudent, Student, StudentField, StudentId, StudentSummary};
