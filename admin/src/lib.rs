//! Command-line host for the student records admin interface.
//!
//! Resolves a client-side route, mounts the matching `student_core`
//! controller, executes its requests with a blocking ureq transport and
//! renders the settled state as text.

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod transport;

pub use command::Command;
pub use config::AdminConfig;
pub use error::AdminError;
pub use session::{Report, Session};
pub use transport::UreqTransport;
