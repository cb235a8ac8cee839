//! Cancel-and-reschedule bookkeeping for debounced suggestion lookups.
//!
//! The host owns the actual timer. It asks for a [`Ticket`] on every
//! keystroke and hands it back when the timer fires; only the most recently
//! issued ticket is honoured.

/// Handle for one scheduled run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    issued: u64,
    pending: Option<u64>,
}

impl Debouncer {
    /// Schedule a run, superseding whatever was pending.
    pub fn schedule(&mut self) -> Ticket {
        self.issued += 1;
        self.pending = Some(self.issued);
        Ticket(self.issued)
    }

    /// Drop the pending run. Every ticket issued so far becomes stale.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Claim the run for `ticket`.
    ///
    /// Returns `true` exactly once for the latest ticket, provided it was
    /// not cancelled in between.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if self.pending == Some(ticket.0) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
