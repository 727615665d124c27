use tracing::debug;

/// Token handed to every route request. Only the newest one may draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RouteTicket(u64);

/// Single in-flight slot for route requests.
///
/// Requests are not aborted on the wire. Issuing a new ticket or calling
/// [`RouteSlot::cancel`] only makes older completions stale so they are
/// dropped instead of drawn.
#[derive(Debug, Default)]
pub struct RouteSlot {
    issued: u64,
}

impl RouteSlot {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn issue(&mut self) -> RouteTicket {
        self.issued += 1;
        RouteTicket(self.issued)
    }

    pub fn is_current(&self, ticket: RouteTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Invalidates every outstanding ticket.
    pub fn cancel(&mut self) {
        debug!("Cancelling route tickets up to {}", self.issued);
        self.issued += 1;
    }
}

#[test]
fn newest_ticket_wins_test() {
    let mut slot = RouteSlot::new();
    let first = slot.issue();
    let second = slot.issue();
    assert!(!slot.is_current(first));
    assert!(slot.is_current(second));
}

#[test]
fn cancel_invalidates_test() {
    let mut slot = RouteSlot::new();
    let ticket = slot.issue();
    slot.cancel();
    assert!(!slot.is_current(ticket));
}
