//! Controllers driven end-to-end against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port with 25 seeded students, then runs
//! every request the controllers hand out over real HTTP using ureq.

use student_core::{
    ApiError, FormController, FormMode, HttpMethod, HttpRequest, HttpResponse, ListController,
    NavLink, NewStudent, Notification, RecordState, StudentCache, StudentClient, StudentField,
    StudentId, Transport,
};

/// Blocking transport that reports 4xx/5xx as data rather than `Err`.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, req.body.as_deref()) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse { status, headers, body })
    }
}

fn seed() -> Vec<mock_server::Student> {
    (1..=25)
        .map(|id| mock_server::Student {
            id,
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            email: format!("s{id}@school.edu"),
            gender: "other".to_string(),
            country: "Vietnam".to_string(),
            avatar: format!("https://example.com/{id}.png"),
            btc_address: format!("btc{id}"),
        })
        .collect()
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, seed()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn complete_input() -> NewStudent {
    NewStudent {
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "ann@school.edu".to_string(),
        gender: "female".to_string(),
        country: "Vietnam".to_string(),
        avatar: "https://example.com/ann.png".to_string(),
        btc_address: "1BoatSLRHtKNngkdXEeobR76b53LETtpyT".to_string(),
    }
}

#[test]
fn list_pages_through_seeded_students() {
    let base_url = start_server();
    let transport = UreqTransport::new();
    let client = StudentClient::new(&base_url);

    // Step 1: first page.
    let (mut list, pending) = ListController::mount(client, StudentCache::new(), 10, "");
    assert!(list.on_list_response(pending.ticket, transport.execute(&pending.request)));
    let ids: Vec<u64> = list.rows().iter().map(|s| s.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    let links = list.links().unwrap();
    assert_eq!(links.pages.len(), 3);
    assert_eq!(links.previous, NavLink::Disabled);
    assert!(links.next.is_enabled());

    // Step 2: jump to the last page.
    let pending = list.navigate("page=3").unwrap();
    assert_eq!(list.rows().len(), 10, "previous rows stay visible");
    list.on_list_response(pending.ticket, transport.execute(&pending.request));
    assert_eq!(list.rows().len(), 5);
    let links = list.links().unwrap();
    assert_eq!(links.next, NavLink::Disabled);
    assert_eq!(links.active().map(|l| l.number), Some(3));

    // Step 3: delete a row; the page is refetched with the new total.
    let pending = list.request_delete(StudentId::from(25));
    let refetch = list
        .on_delete_response(pending.ticket, transport.execute(&pending.request))
        .unwrap();
    list.on_list_response(refetch.ticket, transport.execute(&refetch.request));
    assert_eq!(list.rows().len(), 4);
    assert_eq!(list.visible().unwrap().pagination.total_count, 24);
    assert!(matches!(
        list.take_notifications().as_slice(),
        [Notification::Success(_)]
    ));
}

#[test]
fn create_then_edit_lifecycle() {
    let base_url = start_server();
    let transport = UreqTransport::new();
    let client = StudentClient::new(&base_url);
    let cache = StudentCache::new();

    // Step 1: create with a missing email is rejected per field.
    let (mut form, pending) = FormController::mount(client.clone(), cache.clone(), FormMode::Create);
    assert!(pending.is_none());
    let input = complete_input();
    for field in StudentField::ALL {
        if field != StudentField::Email {
            form.set_field(field, input.get(field));
        }
    }
    let pending = form.submit().unwrap();
    form.on_submit_response(pending.ticket, transport.execute(&pending.request));
    assert_eq!(form.field_error(StudentField::Email), Some("required"));
    assert_eq!(form.fields().first_name, "Ann", "form is kept after a rejection");

    // Step 2: typing clears the stale error before the next submit.
    form.set_field(StudentField::Email, input.email.clone());
    assert!(form.field_errors().is_none());

    // Step 3: a complete submit succeeds and resets the form.
    let pending = form.submit().unwrap();
    form.on_submit_response(pending.ticket, transport.execute(&pending.request));
    let created = match form.submission() {
        student_core::SubmitState::Succeeded(student) => student.clone(),
        other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(form.fields(), &NewStudent::default());
    assert_eq!(created.id, 26);

    // Step 4: fetching the created record returns exactly what was submitted.
    let id = StudentId::from(created.id);
    let (mut edit, pending) = FormController::mount(client.clone(), cache.clone(), FormMode::Edit(id.clone()));
    let pending = pending.unwrap();
    edit.on_fetch_response(pending.ticket, transport.execute(&pending.request));
    assert_eq!(edit.record(), &RecordState::Loaded);
    assert_eq!(edit.fields(), &input);

    // Step 5: updating twice with the same record stores the same result.
    edit.set_field(StudentField::Country, "Japan");
    let first = edit.submit().unwrap();
    edit.on_submit_response(first.ticket, transport.execute(&first.request));
    let once = cache.get(&id).unwrap();
    let second = edit.submit().unwrap();
    assert_eq!(first.request.body, second.request.body);
    edit.on_submit_response(second.ticket, transport.execute(&second.request));
    let twice = cache.get(&id).unwrap();
    assert_eq!(once, twice);
    assert_eq!(twice.country, "Japan");

    let verify = client.build_get_student(&id);
    let stored = client.parse_get_student(transport.execute(&verify).unwrap()).unwrap();
    assert_eq!(stored.data, twice);

    // Step 6: a deleted record shows up as not found in edit mode.
    let delete = client.build_delete_student(&id);
    client.parse_delete_student(transport.execute(&delete).unwrap()).unwrap();
    let (mut gone, pending) = FormController::mount(client, cache, FormMode::Edit(id));
    let pending = pending.unwrap();
    gone.on_fetch_response(pending.ticket, transport.execute(&pending.request));
    assert_eq!(gone.record(), &RecordState::NotFound);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = UreqTransport::new();
    let (mut list, pending) =
        ListController::mount(StudentClient::new(&format!("http://{addr}")), StudentCache::new(), 10, "");
    list.on_list_response(pending.ticket, transport.execute(&pending.request));
    assert!(matches!(list.error(), Some(ApiError::Transport(_))));
    assert!(!list.is_loading());
}
