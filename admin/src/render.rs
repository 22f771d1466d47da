//! Plain-text rendering of controller state.

use std::fmt::Write;

use student_core::{
    FormController, ListController, NavLink, Notification, RecordState, StudentField,
    SubmitState,
};

pub fn list(controller: &ListController) -> String {
    let mut out = String::from("Students\n\n");
    if controller.is_loading() {
        out.push_str("Loading...\n");
        return out;
    }
    if let Some(error) = controller.error() {
        let _ = writeln!(out, "Could not load students: {error}");
    }

    let rows = controller.rows();
    if rows.is_empty() {
        out.push_str("No students.\n");
    } else {
        let _ = writeln!(out, "{:>5}  {:<20}  {:<30}  {}", "#", "Name", "Email", "Avatar");
        for student in rows {
            let _ = writeln!(
                out,
                "{:>5}  {:<20}  {:<30}  {}",
                student.id, student.last_name, student.email, student.avatar
            );
        }
    }

    if let Some(links) = controller.links() {
        let pages: Vec<String> = links
            .pages
            .iter()
            .map(|link| {
                if link.active {
                    format!("[{}]", link.number)
                } else {
                    link.number.to_string()
                }
            })
            .collect();
        let _ = writeln!(
            out,
            "\n{}  {}  {}",
            nav("Previous", &links.previous),
            pages.join(" "),
            nav("Next", &links.next)
        );
    }
    out
}

fn nav(label: &str, link: &NavLink) -> String {
    match link {
        NavLink::Enabled { href, .. } => format!("{label} <{href}>"),
        NavLink::Disabled => format!("({label})"),
    }
}

pub fn form(controller: &FormController) -> String {
    let mut out = format!("{}\n\n", controller.mode().title());
    match controller.record() {
        RecordState::Loading => out.push_str("Loading...\n"),
        RecordState::NotFound => {
            out.push_str("Student not found.\n");
            return out;
        }
        RecordState::Failed(error) => {
            let _ = writeln!(out, "Could not load student: {error}");
            return out;
        }
        RecordState::Blank | RecordState::Loaded => {}
    }

    for field in StudentField::ALL {
        let _ = writeln!(out, "{:<12} {}", field.name(), controller.fields().get(field));
        if let Some(message) = controller.field_error(field) {
            let _ = writeln!(out, "{:<12} ! {message}", "");
        }
    }

    match controller.submission() {
        SubmitState::Pending(_) => out.push_str("\nSubmitting...\n"),
        SubmitState::Succeeded(student) => {
            let _ = writeln!(out, "\nSaved student {}", student.id);
        }
        SubmitState::Failed(_) | SubmitState::Idle => {}
    }
    out
}

pub fn notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|notification| match notification {
            Notification::Success(message) => format!("ok: {message}\n"),
            Notification::Error(message) => format!("error: {message}\n"),
        })
        .collect()
}
