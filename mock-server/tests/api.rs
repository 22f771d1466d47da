use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Student, TOTAL_COUNT_HEADER};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn student(id: u64) -> Student {
    Student {
        id,
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        email: format!("s{id}@school.edu"),
        gender: "other".to_string(),
        country: "Vietnam".to_string(),
        avatar: format!("https://example.com/{id}.png"),
        btc_address: format!("btc{id}"),
    }
}

const VALID_BODY: &str = r#"{"first_name":"Ann","last_name":"Lee","email":"a@b.com","gender":"female","country":"Vietnam","avatar":"a.png","btc_address":"1Boat"}"#;

fn total_count(resp: &axum::response::Response) -> &str {
    resp.headers()
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_students_empty() {
    let resp = app().oneshot(get("/students?_page=1&_limit=10")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(total_count(&resp), "0");
    let students: Vec<Student> = body_json(resp).await;
    assert!(students.is_empty());
}

#[tokio::test]
async fn list_students_paginates_with_total_header() {
    let seed: Vec<Student> = (1..=25).map(student).collect();

    let resp = app_with(seed.clone())
        .oneshot(get("/students?_page=3&_limit=10"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(total_count(&resp), "25");
    let students: Vec<Student> = body_json(resp).await;
    let ids: Vec<u64> = students.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![21, 22, 23, 24, 25]);

    let resp = app_with(seed).oneshot(get("/students?_page=1&_limit=10")).await.unwrap();
    let students: Vec<Student> = body_json(resp).await;
    assert_eq!(students.len(), 10);
    assert_eq!(students[0].id, 1);
}

#[tokio::test]
async fn list_students_without_params_returns_everything() {
    let resp = app_with((1..=12).map(student).collect())
        .oneshot(get("/students"))
        .await
        .unwrap();
    let students: Vec<Student> = body_json(resp).await;
    assert_eq!(students.len(), 12);
}

#[tokio::test]
async fn list_students_page_past_end_is_empty() {
    let resp = app_with((1..=3).map(student).collect())
        .oneshot(get("/students?_page=4&_limit=10"))
        .await
        .unwrap();
    assert_eq!(total_count(&resp), "3");
    let students: Vec<Student> = body_json(resp).await;
    assert!(students.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_student_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/students", VALID_BODY))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Student = body_json(resp).await;
    assert_eq!(created.id, 1);
    assert_eq!(created.email, "a@b.com");
}

#[tokio::test]
async fn create_student_missing_email_returns_field_errors() {
    let body = r#"{"first_name":"Ann","last_name":"Lee","gender":"female","country":"Vietnam","avatar":"a.png","btc_address":"1Boat"}"#;
    let resp = app().oneshot(json_request("POST", "/students", body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"error": {"email": "required"}}));
}

// --- get ---

#[tokio::test]
async fn get_student_not_found() {
    let resp = app().oneshot(get("/students/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_student_bad_id_returns_400() {
    let resp = app().oneshot(get("/students/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_student_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/students/1", VALID_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_student_validates_body() {
    let resp = app_with(vec![student(1)])
        .oneshot(json_request("PUT", "/students/1", r#"{"id":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"]["email"], "required");
    assert_eq!(body["error"]["country"], "required");
}

// --- delete ---

#[tokio::test]
async fn delete_student_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/students/1")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/students", VALID_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Student = body_json(resp).await;
    let id = created.id;

    // list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/students?_page=1&_limit=10"))
        .await
        .unwrap();
    assert_eq!(total_count(&resp), "1");
    let students: Vec<Student> = body_json(resp).await;
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id, id);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/students/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Student = body_json(resp).await;
    assert_eq!(fetched, created);

    // update replaces the whole record
    let mut replacement = created.clone();
    replacement.country = "Japan".to_string();
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/students/{id}"),
            &serde_json::to_string(&replacement).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Student = body_json(resp).await;
    assert_eq!(updated, replacement);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/students/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"{}");

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/students/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // a new record gets a fresh id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/students", VALID_BODY))
        .await
        .unwrap();
    let second: Student = body_json(resp).await;
    assert!(second.id > id);
}
