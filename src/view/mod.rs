//! View models for the dashboard page.
//!
//! Each view owns its own loading/error/data state and renders itself to an
//! HTML fragment. Async fetches are issued as tickets from a `RequestGuard`,
//! so a response that arrives after the address changed is dropped instead of
//! overwriting newer state.

pub mod app;
pub mod portfolio;
pub mod yields;

pub use app::Dashboard;
pub use portfolio::{PortfolioData, PortfolioOutcome, PortfolioRequest, PortfolioView};
pub use yields::YieldHistoryView;

/// Loading / error / data triple held by every view.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
        }
    }
}

impl<T> FetchState<T> {
    /// Enter loading; clears a previous error but keeps the last data.
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.loading = false;
        self.error = None;
        self.data = Some(data);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Request-generation counter. Only the most recently issued ticket is current.
#[derive(Debug, Default)]
pub struct RequestGuard {
    generation: u64,
}

impl RequestGuard {
    pub fn issue(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Retire every outstanding ticket without issuing a new one.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }
}

/// Bordered card used by every section of the page.
pub(crate) fn card(body: &str) -> String {
    format!(
        "<div style=\"padding: 20px; border: 1px solid #ddd; border-radius: 8px\">\n{body}</div>\n"
    )
}

/// Centered status line ("Loading ...").
pub(crate) fn status(message: &str) -> String {
    format!(
        "<div style=\"padding: 20px; text-align: center\">\n  <p>{}</p>\n</div>\n",
        crate::chart::escape_xml(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut guard = RequestGuard::default();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
        guard.invalidate();
        assert!(!guard.is_current(second));
    }

    #[test]
    fn test_fetch_state_keeps_data_while_reloading() {
        let mut state = FetchState::default();
        state.succeed(1);
        state.start();
        assert!(state.loading);
        assert_eq!(state.data, Some(1));
        state.fail("boom");
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }
}
