//! Stateless request builder and response parser for the `students` resource.
//!
//! # Design
//! `StudentClient` wraps an `HttpAdapter` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the round-trip in between.

use crate::adapter::HttpAdapter;
use crate::error::ApiError;
use crate::http::{Envelope, HttpRequest, HttpResponse};
use crate::types::{NewStudent, Student, StudentId, StudentSummary};

const RESOURCE: &str = "students";

/// Response header carrying the unpaginated row count of a list request.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[derive(Debug, Clone)]
pub struct StudentClient {
    http: HttpAdapter,
}

impl StudentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpAdapter::new(base_url),
        }
    }

    pub fn build_list_students(&self, page: u32, limit: u32) -> HttpRequest {
        self.http.get(
            RESOURCE,
            &[("_page", page.to_string()), ("_limit", limit.to_string())],
        )
    }

    pub fn build_get_student(&self, id: &StudentId) -> HttpRequest {
        self.http.get(&item_path(id), &[])
    }

    pub fn build_create_student(&self, input: &NewStudent) -> Result<HttpRequest, ApiError> {
        self.http.post(RESOURCE, input)
    }

    pub fn build_update_student(&self, id: &StudentId, student: &Student) -> Result<HttpRequest, ApiError> {
        self.http.put(&item_path(id), student)
    }

    pub fn build_delete_student(&self, id: &StudentId) -> HttpRequest {
        self.http.delete(&item_path(id))
    }

    /// The envelope is returned unchanged; read `TOTAL_COUNT_HEADER` from it.
    pub fn parse_list_students(&self, response: HttpResponse) -> Result<Envelope<Vec<StudentSummary>>, ApiError> {
        self.http.parse(response)
    }

    pub fn parse_get_student(&self, response: HttpResponse) -> Result<Envelope<Student>, ApiError> {
        self.http.parse(response)
    }

    pub fn parse_create_student(&self, response: HttpResponse) -> Result<Envelope<Student>, ApiError> {
        self.http.parse(response)
    }

    pub fn parse_update_student(&self, response: HttpResponse) -> Result<Envelope<Student>, ApiError> {
        self.http.parse(response)
    }

    pub fn parse_delete_student(&self, response: HttpResponse) -> Result<Envelope<()>, ApiError> {
        self.http
            .parse::<serde_json::Value>(response)
            .map(|envelope| envelope.map(|_| ()))
    }
}

fn item_path(id: &StudentId) -> String {
    format!("{RESOURCE}/{id}")
}
