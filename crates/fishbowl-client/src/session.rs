use fishbowl_common::Ticket;

/// Per-connection session state: the ticket currently being echoed.
///
/// A fresh session has no ticket. The engine replaces it after each
/// successful exchange and clears it whenever an exchange fails.
#[derive(Debug, Clone, Default)]
pub struct Session {
    ticket: Option<Ticket>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_ticket(&self) -> bool {
        self.ticket.is_some()
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    pub fn clear(&mut self) {
        self.ticket = None;
    }

    /// Adopts the ticket from a reply. Replies without one keep the current ticket.
    pub fn set(&mut self, ticket: Option<Ticket>) {
        if let Some(ticket) = ticket {
            self.ticket = Some(ticket);
        }
    }
}
