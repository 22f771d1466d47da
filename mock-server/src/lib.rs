use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";
const DEFAULT_LIMIT: usize = 10;
const GENDERS: [&str; 3] = ["male", "female", "other"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub country: String,
    pub avatar: String,
    pub btc_address: String,
}

/// Create/replace payload. Missing fields deserialize as empty strings so
/// they are reported per field instead of rejecting the whole body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StudentInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub country: String,
    pub avatar: String,
    pub btc_address: String,
}

impl StudentInput {
    fn validate(&self) -> Result<(), BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();
        let fields = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("gender", &self.gender),
            ("country", &self.country),
            ("avatar", &self.avatar),
            ("btc_address", &self.btc_address),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                errors.insert(name.to_string(), "required".to_string());
            }
        }
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            errors.insert("email".to_string(), "invalid email".to_string());
        }
        if !self.gender.is_empty() && !GENDERS.contains(&self.gender.as_str()) {
            errors.insert("gender".to_string(), "must be male, female or other".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn into_student(self, id: u64) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            country: self.country,
            avatar: self.avatar,
            btc_address: self.btc_address,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "_page")]
    pub page: Option<usize>,
    #[serde(rename = "_limit")]
    pub limit: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    students: BTreeMap<u64, Student>,
}

impl Store {
    pub fn seeded(students: Vec<Student>) -> Self {
        let next_id = students.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            next_id,
            students: students.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}

pub type Db = Arc<RwLock<Store>>;

enum Rejection {
    NotFound,
    Invalid(BTreeMap<String, String>),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::NotFound => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
            Rejection::Invalid(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": errors }))).into_response()
            }
        }
    }
}

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(students: Vec<Student>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded(students)));
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, students: Vec<Student>) -> Result<(), std::io::Error> {
    info!(seeded = students.len(), "serving students");
    axum::serve(listener, app_with(students)).await
}

async fn list_students(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let store = db.read().await;
    let total = store.students.len();
    let rows: Vec<Student> = match (params.page, params.limit) {
        (None, None) => store.students.values().cloned().collect(),
        (page, limit) => {
            let page = page.unwrap_or(1).max(1);
            let limit = limit.unwrap_or(DEFAULT_LIMIT);
            store
                .students
                .values()
                .skip((page - 1).saturating_mul(limit))
                .take(limit)
                .cloned()
                .collect()
        }
    };
    debug!(total, returned = rows.len(), "listing students");
    (
        [(HeaderName::from_static(TOTAL_COUNT_HEADER), total.to_string())],
        Json(rows),
    )
}

async fn create_student(
    State(db): State<Db>,
    Json(input): Json<StudentInput>,
) -> Result<(StatusCode, Json<Student>), Rejection> {
    input.validate().map_err(Rejection::Invalid)?;
    let mut store = db.write().await;
    let student = input.into_student(store.allocate_id());
    store.students.insert(student.id, student.clone());
    Ok((StatusCode::CREATED, Json(student)))
}

async fn get_student(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Student>, Rejection> {
    let store = db.read().await;
    store.students.get(&id).cloned().map(Json).ok_or(Rejection::NotFound)
}

async fn update_student(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<StudentInput>,
) -> Result<Json<Student>, Rejection> {
    let mut store = db.write().await;
    if !store.students.contains_key(&id) {
        return Err(Rejection::NotFound);
    }
    input.validate().map_err(Rejection::Invalid)?;
    let student = input.into_student(id);
    store.students.insert(id, student.clone());
    Ok(Json(student))
}

async fn delete_student(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let mut store = db.write().await;
    store
        .students
        .remove(&id)
        .map(|_| Json(json!({})))
        .ok_or(Rejection::NotFound)
}
