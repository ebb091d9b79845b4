use tracing::{debug, debug_span};

use super::types::Response;
use super::AutocompleteSession;

impl<T: Clone + PartialEq> AutocompleteSession<T> {
    /// Confirm `options[index]`. Single-select writes its input value into the
    /// query and closes the menu; multi-select appends it to the committed
    /// options and clears the input for the next pick.
    pub(super) fn commit_option(&mut self, index: usize, resp: &mut Response<T>) {
        let Some(option) = self.state.options.get(index).cloned() else {
            return;
        };
        debug!(index, multiple = self.config.multiple, "commit option");
        self.cancel_pending_blur(resp);
        resp.confirmed = Some(option.clone());

        if self.config.multiple {
            self.add_selected_option(option);
            self.reset_input(true);
            self.recompute_valid_choice();
            return;
        }

        self.state.query = self.templates.input_value(&option);
        self.state.aria_hint = self.state.query.is_empty();
        self.state.input_focused = true;
        self.state.option_focused = None;
        self.state.hovered = None;
        self.state.clicked = Some(index);
        self.state.selected = Some(index);
        self.state.menu_open = false;
        self.state.valid_choice_made = true;
    }

    /// Clear the query and results. `keep_focus` leaves the caret in the
    /// input; otherwise the widget loses focus as well.
    pub(super) fn reset_input(&mut self, keep_focus: bool) {
        self.state.query.clear();
        self.state.aria_hint = true;
        self.clear_results();
        self.state.option_focused = None;
        self.state.input_focused = keep_focus;
    }

    /// Remove a committed option (multi-select only).
    pub fn remove_selected(&mut self, index: usize) -> Response<T> {
        let _span = debug_span!("remove_selected", index).entered();
        if !self.config.multiple || index >= self.state.selected_options.len() {
            debug!("nothing to remove");
            return Response::pass();
        }
        let removed = self.state.selected_options.remove(index);
        self.state.selected_options.retain(|o| o != &removed);
        let mut resp = Response::consumed();
        resp.removed = Some(removed);
        resp
    }
}
