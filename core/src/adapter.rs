//! Generic JSON-over-HTTP adapter bound to a base URL.
//!
//! Builds `get`/`post`/`put`/`delete` requests relative to the base URL and
//! turns responses into `Envelope<T>`. Non-2xx answers are classified into
//! `ApiError` variants here, so every resource client shares one policy.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, FieldErrors};
use crate::http::{Envelope, HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct HttpAdapter {
    base_url: String,
}

impl HttpAdapter {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get(&self, path: &str, params: &[(&str, String)]) -> HttpRequest {
        let mut url = self.url(path);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&encode_query(params));
        }
        HttpRequest {
            method: HttpMethod::Get,
            path: url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.with_json_body(HttpMethod::Post, path, body)
    }

    pub fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.with_json_body(HttpMethod::Put, path, body)
    }

    pub fn delete(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Decode a 2xx response into an envelope, or classify the failure.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Envelope<T>, ApiError> {
        check_status(&response)?;
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        let data = serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(Envelope {
            data,
            headers: response.headers,
        })
    }

    fn with_json_body<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: self.url(path),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[derive(serde::Deserialize)]
struct ValidationBody {
    error: FieldErrors,
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    debug!(status = response.status, "request failed");
    let errors = serde_json::from_str::<ValidationBody>(&response.body)
        .ok()
        .map(|ValidationBody { error }| error);
    if response.status == 404 {
        return Err(ApiError::NotFound {
            body: response.body.clone(),
            errors: errors.unwrap_or_default(),
        });
    }
    if let Some(error) = errors {
        return Err(ApiError::Validation {
            status: response.status,
            errors: error,
        });
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
