//! Client-side routes of the admin interface.

use crate::form::FormMode;
use crate::pagination::resolve_page;
use crate::types::StudentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Students { page: u32 },
    AddStudent,
    EditStudent(StudentId),
    About,
    NotFound,
}

impl Route {
    /// Resolve a path with optional query string, e.g. `/students?page=2`.
    pub fn parse(path_and_query: &str) -> Self {
        let (path, query) = path_and_query
            .split_once('?')
            .unwrap_or((path_and_query, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Dashboard,
            ["students"] => Route::Students {
                page: resolve_page(query),
            },
            ["students", "add"] => Route::AddStudent,
            ["students", id] => Route::EditStudent(StudentId::from(*id)),
            ["about"] => Route::About,
            _ => Route::NotFound,
        }
    }

    /// The form mode for the two form routes.
    pub fn form_mode(&self) -> Option<FormMode> {
        match self {
            Route::AddStudent => Some(FormMode::Create),
            Route::EditStudent(id) => Some(FormMode::Edit(id.clone())),
            _ => None,
        }
    }
}
