use student_core::{StudentField, StudentId};

use crate::error::AdminError;

pub const USAGE: &str = "\
student-admin <route> [field=value ...]
student-admin delete <id> [/students?page=N]

routes:
  /                 dashboard
  /students?page=N  paginated student list
  /students/add     create a student from the given field=value pairs
  /students/<id>    show a student, or update it with field=value pairs
  /about            about this tool

fields: email gender country first_name last_name avatar btc_address";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open {
        route: String,
        assignments: Vec<(StudentField, String)>,
    },
    Delete {
        id: StudentId,
        list_route: String,
    },
    Help,
}

impl Command {
    /// Parse the arguments that follow the program name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, AdminError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match args.as_slice() {
            [] | ["help" | "-h" | "--help", ..] => Ok(Command::Help),
            ["delete"] => Err(AdminError::Usage("delete needs a student id".to_string())),
            ["delete", id] => Ok(Command::Delete {
                id: StudentId::from(*id),
                list_route: "/students".to_string(),
            }),
            ["delete", id, route] => Ok(Command::Delete {
                id: StudentId::from(*id),
                list_route: route.to_string(),
            }),
            ["delete", ..] => Err(AdminError::Usage("too many arguments for delete".to_string())),
            [route, rest @ ..] => Ok(Command::Open {
                route: route.to_string(),
                assignments: rest
                    .iter()
                    .map(|arg| parse_assignment(arg))
                    .collect::<Result<_, _>>()?,
            }),
        }
    }
}

fn parse_assignment(arg: &str) -> Result<(StudentField, String), AdminError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| AdminError::Usage(format!("expected field=value, got `{arg}`")))?;
    let field = name.parse::<StudentField>().map_err(AdminError::Usage)?;
    Ok((field, value.to_string()))
}
