//! Drives the core controllers for one command.
//!
//! Each command mounts the controller its route resolves to, executes the
//! requests the controller hands out through the transport, and renders the
//! settled state.

use student_core::{
    ApiError, FormController, FormMode, HttpResponse, ListController, Pending, RecordState, Route,
    StudentCache, StudentClient, StudentField, StudentId, SubmitState, Transport,
};
use tracing::{debug, info};

use crate::command::{Command, USAGE};
use crate::config::AdminConfig;
use crate::render;

/// Rendered output of a command and whether it should exit non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub failed: bool,
}

impl Report {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: false,
        }
    }

    fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: true,
        }
    }
}

pub struct Session<T> {
    client: StudentClient,
    cache: StudentCache,
    limit: u32,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(config: &AdminConfig, transport: T) -> Self {
        Self {
            client: StudentClient::new(&config.base_url),
            cache: StudentCache::new(),
            limit: config.page_limit,
            transport,
        }
    }

    pub fn run(&self, command: Command) -> Report {
        match command {
            Command::Help => Report::ok(USAGE),
            Command::Open { route, assignments } => self.open(&route, &assignments),
            Command::Delete { id, list_route } => self.delete(id, &list_route),
        }
    }

    fn open(&self, path: &str, assignments: &[(StudentField, String)]) -> Report {
        let route = Route::parse(path);
        info!(?route, "opening route");
        if !assignments.is_empty() && route.form_mode().is_none() {
            return Report::failed(format!("{path} does not accept field values\n"));
        }
        match route {
            Route::Dashboard => Report::ok("Dashboard\n\nOpen /students to manage student records.\n"),
            Route::About => Report::ok(format!(
                "About\n\n{} {}\n",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            )),
            Route::Students { page } => self.list(page),
            Route::AddStudent => self.form(FormMode::Create, assignments),
            Route::EditStudent(id) => self.form(FormMode::Edit(id), assignments),
            Route::NotFound => Report::failed(format!("Not found: {path}\n")),
        }
    }

    fn list(&self, page: u32) -> Report {
        let (mut list, pending) = ListController::mount(
            self.client.clone(),
            self.cache.clone(),
            self.limit,
            &format!("page={page}"),
        );
        list.on_list_response(pending.ticket, self.execute(&pending));
        Report {
            text: render::list(&list),
            failed: list.error().is_some(),
        }
    }

    fn form(&self, mode: FormMode, assignments: &[(StudentField, String)]) -> Report {
        let (mut form, pending) = FormController::mount(self.client.clone(), self.cache.clone(), mode);
        if let Some(pending) = pending {
            form.on_fetch_response(pending.ticket, self.execute(&pending));
        }
        if matches!(form.record(), RecordState::NotFound | RecordState::Failed(_)) {
            return Report::failed(render::form(&form));
        }
        if assignments.is_empty() {
            return Report::ok(render::form(&form));
        }

        for (field, value) in assignments {
            form.set_field(*field, value.clone());
        }
        let pending = match form.submit() {
            Ok(pending) => pending,
            Err(error) => return Report::failed(format!("{error}\n")),
        };
        form.on_submit_response(pending.ticket, self.execute(&pending));

        let mut text = render::notifications(&form.take_notifications());
        text.push('\n');
        text.push_str(&render::form(&form));
        Report {
            text,
            failed: matches!(form.submission(), SubmitState::Failed(_)),
        }
    }

    fn delete(&self, id: StudentId, list_route: &str) -> Report {
        let page = match Route::parse(list_route) {
            Route::Students { page } => page,
            _ => return Report::failed(format!("{list_route} is not a student list\n")),
        };
        let (mut list, pending) = ListController::mount(
            self.client.clone(),
            self.cache.clone(),
            self.limit,
            &format!("page={page}"),
        );
        list.on_list_response(pending.ticket, self.execute(&pending));

        let delete = list.request_delete(id);
        let refetch = list.on_delete_response(delete.ticket, self.execute(&delete));
        let deleted = refetch.is_some();
        if let Some(pending) = refetch {
            list.on_list_response(pending.ticket, self.execute(&pending));
        }

        let mut text = render::notifications(&list.take_notifications());
        text.push('\n');
        text.push_str(&render::list(&list));
        Report {
            text,
            failed: !deleted,
        }
    }

    fn execute(&self, pending: &Pending) -> Result<HttpResponse, ApiError> {
        debug!(seq = pending.ticket.seq(), "executing request");
        self.transport.execute(&pending.request)
    }
}
