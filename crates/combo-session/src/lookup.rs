//! Query changes and lookup completions.
//!
//! Every lookup carries a ticket. Under `LookupOrdering::DiscardStale` only the
//! latest ticket is applied; under `Unordered` completions are applied as they
//! arrive, whatever their order.

use combo_core::gate::{should_search, SearchDecision};
use tracing::{debug, debug_span};

use super::types::{LookupOrdering, LookupPurpose, LookupRequest, LookupTicket, Response};
use super::AutocompleteSession;

impl<T: Clone + PartialEq> AutocompleteSession<T> {
    /// The input's value changed, by typing or by an external write.
    pub fn input_changed(&mut self, value: &str) -> Response<T> {
        let _span = debug_span!("input_changed", chars = value.chars().count()).entered();
        let before = self.focus_snapshot();
        let prev = std::mem::replace(&mut self.state.query, value.to_string());
        self.state.aria_hint = value.is_empty();
        self.state.lookup_failed = false;
        let mut resp = Response::pass();
        match should_search(&prev, value, &self.config.gate()) {
            SearchDecision::Search => {
                resp.lookup = Some(self.issue_lookup(value.to_string(), LookupPurpose::Typed));
            }
            SearchDecision::ClearResults => self.clear_results(),
            SearchDecision::NoOp => {}
        }
        self.recompute_valid_choice();
        self.finish(resp, before)
    }

    /// The external watch saw a value that differs from the query. Returns
    /// `None` when the two already agree.
    pub fn sync_external_value(&mut self, value: &str) -> Option<Response<T>> {
        if value == self.state.query {
            return None;
        }
        debug!("external value change");
        Some(self.input_changed(value))
    }

    pub(super) fn issue_lookup(&mut self, query: String, purpose: LookupPurpose) -> LookupRequest {
        self.lookup_generation += 1;
        let ticket = LookupTicket {
            generation: self.lookup_generation,
            purpose,
        };
        debug!(?ticket, "lookup issued");
        LookupRequest { query, ticket }
    }

    fn is_stale(&self, ticket: LookupTicket) -> bool {
        self.config.lookup_ordering == LookupOrdering::DiscardStale
            && ticket.generation != self.lookup_generation
    }

    /// Apply a lookup's results. Returns `None` when the completion was
    /// discarded as stale.
    pub fn receive_options(&mut self, ticket: LookupTicket, results: Vec<T>) -> Option<Response<T>> {
        let _span = debug_span!("receive_options", ?ticket, count = results.len()).entered();
        if self.is_stale(ticket) {
            debug!(latest = self.lookup_generation, "stale lookup discarded");
            return None;
        }
        let before = self.focus_snapshot();
        let available = !results.is_empty();
        self.state.lookup_failed = false;
        self.replace_options(results);
        self.state.menu_open = available;
        match ticket.purpose {
            LookupPurpose::Typed => {
                if available && self.config.has_autoselect() {
                    self.state.selected = Some(0);
                }
            }
            LookupPurpose::ShowAll => {}
            LookupPurpose::ShowAllFocusFirst => {
                if available {
                    self.state.selected = Some(0);
                    self.state.option_focused = Some(0);
                    self.state.input_focused = false;
                }
            }
        }
        self.recompute_valid_choice();
        Some(self.finish(Response::pass(), before))
    }

    /// The source reported an error for this lookup. Results are cleared and
    /// the failure flagged; the widget stays usable.
    pub fn lookup_failed(&mut self, ticket: LookupTicket) -> Option<Response<T>> {
        let _span = debug_span!("lookup_failed", ?ticket).entered();
        if self.is_stale(ticket) {
            return None;
        }
        let before = self.focus_snapshot();
        self.clear_results();
        self.state.lookup_failed = true;
        self.recompute_valid_choice();
        Some(self.finish(Response::pass(), before))
    }
}
