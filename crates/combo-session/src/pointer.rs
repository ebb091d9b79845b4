use tracing::debug_span;

use super::types::Response;
use super::AutocompleteSession;

impl<T: Clone + PartialEq> AutocompleteSession<T> {
    /// Pointer entered an option. Ignored on hosts without real hover.
    pub fn option_hover(&mut self, index: usize) -> Response<T> {
        if !self.config.platform.hover_enabled() || index >= self.state.options.len() {
            return Response::pass();
        }
        self.state.hovered = Some(index);
        Response::pass()
    }

    /// Pointer left the list.
    pub fn list_pointer_leave(&mut self) -> Response<T> {
        if self.config.platform.hover_enabled() {
            self.state.hovered = None;
        }
        Response::pass()
    }

    pub fn option_click(&mut self, index: usize) -> Response<T> {
        let _span = debug_span!("option_click", index).entered();
        if index >= self.state.options.len() {
            return Response::pass();
        }
        let before = self.focus_snapshot();
        let mut resp = Response::pass();
        self.commit_option(index, &mut resp);
        self.finish(resp, before)
    }

    /// Clicking the input re-runs the current query, reopening the menu.
    pub fn input_click(&mut self) -> Response<T> {
        let query = self.state.query.clone();
        self.input_changed(&query)
    }
}
