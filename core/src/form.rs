//! Editable student form in create or edit mode.
//!
//! # Design
//! The mode is fixed at mount time and passed in explicitly, so the
//! controller never has to inspect a router. In edit mode the mount issues a
//! fetch-by-id; when it lands, the form fields are replaced wholesale with
//! the fetched record (including anything typed before it arrived). Submit
//! requests are ticketed like list fetches: only the latest one counts.

use std::mem;

use tracing::{debug, info, warn};

use crate::cache::StudentCache;
use crate::client::StudentClient;
use crate::error::{ApiError, FieldErrors};
use crate::http::HttpResponse;
use crate::request::{Notification, Pending, Sequencer, Ticket};
use crate::types::{NewStudent, Student, StudentField, StudentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(StudentId),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Add Student",
            FormMode::Edit(_) => "Edit Student",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Add",
            FormMode::Edit(_) => "Update",
        }
    }
}

/// Progress of the edit-mode fetch-by-id.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordState {
    /// Create mode: there is no record to fetch.
    Blank,
    Loading,
    Loaded,
    NotFound,
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Pending(Ticket),
    Succeeded(Student),
    Failed(ApiError),
}

impl SubmitState {
    fn ticket(&self) -> Option<Ticket> {
        match self {
            SubmitState::Pending(ticket) => Some(*ticket),
            _ => None,
        }
    }

    fn error(&self) -> Option<&ApiError> {
        match self {
            SubmitState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct FormController {
    client: StudentClient,
    cache: StudentCache,
    mode: FormMode,
    fields: NewStudent,
    record_id: Option<u64>,
    record: RecordState,
    create: SubmitState,
    update: SubmitState,
    seq: Sequencer,
    fetch: Option<Ticket>,
    notifications: Vec<Notification>,
    mounted: bool,
}

impl FormController {
    /// Mount the form. Edit mode returns the fetch-by-id request to execute.
    pub fn mount(client: StudentClient, cache: StudentCache, mode: FormMode) -> (Self, Option<Pending>) {
        let mut controller = Self {
            client,
            cache,
            mode,
            fields: NewStudent::default(),
            record_id: None,
            record: RecordState::Blank,
            create: SubmitState::Idle,
            update: SubmitState::Idle,
            seq: Sequencer::default(),
            fetch: None,
            notifications: Vec::new(),
            mounted: true,
        };

        let pending = match controller.mode.clone() {
            FormMode::Create => None,
            FormMode::Edit(id) => {
                if let Some(cached) = controller.cache.get(&id) {
                    debug!(%id, "prefilling form from cache");
                    controller.fields = cached.fields();
                    controller.record_id = Some(cached.id);
                }
                controller.record = RecordState::Loading;
                let pending = controller.seq.issue(controller.client.build_get_student(&id));
                controller.fetch = Some(pending.ticket);
                Some(pending)
            }
        };
        (controller, pending)
    }

    /// Set one field. A settled create attempt is cleared so its error does
    /// not linger while the user corrects the input.
    pub fn set_field(&mut self, field: StudentField, value: impl Into<String>) {
        self.fields.set(field, value);
        if self.mode == FormMode::Create
            && matches!(self.create, SubmitState::Succeeded(_) | SubmitState::Failed(_))
        {
            self.create = SubmitState::Idle;
        }
    }

    /// Build the create or update request for the current fields.
    pub fn submit(&mut self) -> Result<Pending, ApiError> {
        match self.mode.clone() {
            FormMode::Create => {
                let pending = self.seq.issue(self.client.build_create_student(&self.fields)?);
                debug!(seq = pending.ticket.seq(), "creating student");
                self.create = SubmitState::Pending(pending.ticket);
                Ok(pending)
            }
            FormMode::Edit(id) => {
                let record_id = match self.record_id.or_else(|| id.as_str().parse().ok()) {
                    Some(record_id) => record_id,
                    None => {
                        return Err(ApiError::Serialization(format!(
                            "student id `{id}` is not numeric"
                        )))
                    }
                };
                let student = Student::from_fields(record_id, self.fields.clone());
                let pending = self.seq.issue(self.client.build_update_student(&id, &student)?);
                debug!(seq = pending.ticket.seq(), %id, "updating student");
                self.update = SubmitState::Pending(pending.ticket);
                Ok(pending)
            }
        }
    }

    /// Apply the fetch-by-id response. Returns `false` if it was stale.
    pub fn on_fetch_response(&mut self, ticket: Ticket, result: Result<HttpResponse, ApiError>) -> bool {
        if !self.mounted || self.fetch != Some(ticket) {
            debug!(seq = ticket.seq(), "discarding stale student fetch");
            return false;
        }
        self.fetch = None;

        match result.and_then(|response| self.client.parse_get_student(response)) {
            Ok(envelope) => {
                let student = envelope.data;
                info!(id = student.id, "student loaded into form");
                self.fields = student.fields();
                self.record_id = Some(student.id);
                if let FormMode::Edit(id) = &self.mode {
                    self.cache.insert(id.clone(), student);
                }
                self.record = RecordState::Loaded;
            }
            Err(ApiError::NotFound { .. }) => {
                warn!(mode = ?self.mode, "student not found");
                self.record = RecordState::NotFound;
            }
            Err(error) => {
                warn!(%error, "student fetch failed");
                self.record = RecordState::Failed(error);
            }
        }
        true
    }

    /// Apply a create or update response. Returns `false` if it was stale.
    pub fn on_submit_response(&mut self, ticket: Ticket, result: Result<HttpResponse, ApiError>) -> bool {
        if !self.mounted {
            debug!(seq = ticket.seq(), "discarding submit response after unmount");
            return false;
        }
        if self.create.ticket() == Some(ticket) {
            self.apply_create(result);
            true
        } else if self.update.ticket() == Some(ticket) {
            self.apply_update(result);
            true
        } else {
            debug!(seq = ticket.seq(), "discarding stale submit response");
            false
        }
    }

    fn apply_create(&mut self, result: Result<HttpResponse, ApiError>) {
        match result.and_then(|response| self.client.parse_create_student(response)) {
            Ok(envelope) => {
                info!(id = envelope.data.id, "student created");
                self.fields = NewStudent::default();
                self.create = SubmitState::Succeeded(envelope.data);
                self.notifications
                    .push(Notification::Success("Student added".to_string()));
            }
            Err(error) => {
                warn!(%error, "student create failed");
                self.notifications
                    .push(Notification::Error(format!("Could not add student: {error}")));
                self.create = SubmitState::Failed(error);
            }
        }
    }

    fn apply_update(&mut self, result: Result<HttpResponse, ApiError>) {
        match result.and_then(|response| self.client.parse_update_student(response)) {
            Ok(envelope) => {
                info!(id = envelope.data.id, "student updated");
                if let FormMode::Edit(id) = &self.mode {
                    self.cache.insert(id.clone(), envelope.data.clone());
                }
                self.update = SubmitState::Succeeded(envelope.data);
                self.notifications
                    .push(Notification::Success("Student updated".to_string()));
            }
            Err(error) => {
                warn!(%error, "student update failed");
                self.notifications
                    .push(Notification::Error(format!("Could not update student: {error}")));
                self.update = SubmitState::Failed(error);
            }
        }
    }

    /// Invalidate outstanding requests; late responses are ignored afterwards.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.fetch = None;
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn fields(&self) -> &NewStudent {
        &self.fields
    }

    pub fn record(&self) -> &RecordState {
        &self.record
    }

    /// The submit state of the active mode.
    pub fn submission(&self) -> &SubmitState {
        match self.mode {
            FormMode::Create => &self.create,
            FormMode::Edit(_) => &self.update,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission(), SubmitState::Pending(_))
    }

    /// Field errors of the active mode's last failed submit, if structured.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.submission().error().and_then(ApiError::field_errors)
    }

    pub fn field_error(&self, field: StudentField) -> Option<&str> {
        self.field_errors()
            .and_then(|errors| errors.get(field.name()))
            .map(String::as_str)
    }

    pub fn submit_error(&self) -> Option<&ApiError> {
        self.submission().error()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }
}
