//! Request tickets shared by the controllers.
//!
//! A controller hands out a `Pending` for every request it wants executed.
//! The host runs the request and returns the response together with the
//! ticket; the controller applies it only if the ticket is still current.

use crate::http::HttpRequest;

/// Identifies one issued request within a single controller mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// A request the host must execute, tagged with its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// Monotonic ticket source, one per mount.
#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    last: u64,
}

impl Sequencer {
    pub(crate) fn issue(&mut self, request: HttpRequest) -> Pending {
        self.last += 1;
        Pending {
            ticket: Ticket(self.last),
            request,
        }
    }
}

/// User-visible outcome of a mutation, drained by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}
