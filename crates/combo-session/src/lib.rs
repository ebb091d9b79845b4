//! Autocomplete interaction state machine.
//!
//! `AutocompleteSession` owns the widget state and processes each input,
//! focus, pointer and keyboard event, returning a `Response` that the host
//! translates into callbacks, lookups, focus moves and timers.

pub(crate) mod types;

mod commit;
mod focus;
mod key_handlers;
mod lookup;
mod pointer;
mod response;
mod view;

#[cfg(test)]
mod tests;

use combo_core::classify::is_valid_choice;
use combo_core::status::StatusSnapshot;

pub use types::{
    key, BlurCommand, FocusRequest, FocusRole, KeyEvent, LookupOrdering, LookupPurpose,
    LookupRequest, LookupTicket, RelatedTarget, Response, SessionConfig, Templates, WidgetState,
};
pub use view::ViewModel;

use types::BlurPhase;

/// Stateful autocomplete session encapsulating all interaction logic.
pub struct AutocompleteSession<T> {
    config: SessionConfig,
    templates: Templates<T>,
    state: WidgetState<T>,

    blur: BlurPhase,
    blur_token: u64,
    /// Incremented for every lookup issued and every result clear.
    lookup_generation: u64,
}

impl<T: Clone + PartialEq> AutocompleteSession<T> {
    pub fn new(config: SessionConfig, templates: Templates<T>) -> Self {
        Self {
            config,
            templates,
            state: WidgetState::empty(),
            blur: BlurPhase::Idle,
            blur_token: 0,
            lookup_generation: 0,
        }
    }

    /// Pre-populate the widget with an initial value: it becomes the only
    /// option, the query and the selection. The menu stays closed.
    pub fn with_default_value(mut self, value: T) -> Self {
        self.state.query = self.templates.input_value(&value);
        self.state.aria_hint = self.state.query.is_empty();
        self.state.options = vec![value];
        self.state.selected = Some(0);
        self.recompute_valid_choice();
        self
    }

    /// Initial committed options in multi-select mode.
    pub fn with_selected_options(mut self, options: Vec<T>) -> Self {
        for option in options {
            self.add_selected_option(option);
        }
        self
    }

    pub fn state(&self) -> &WidgetState<T> {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn templates(&self) -> &Templates<T> {
        &self.templates
    }

    pub fn is_blur_pending(&self) -> bool {
        matches!(self.blur, BlurPhase::Requested { .. })
    }

    /// Generation of the most recently issued lookup.
    pub fn lookup_generation(&self) -> u64 {
        self.lookup_generation
    }

    /// Inputs for the status announcer.
    pub fn status_snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            result_count: self.state.options.len(),
            query_length: combo_core::classify::query_len(&self.state.query),
            min_query_length: self.config.min_length,
            selected_option: self.selected_input_value(),
            selected_index: self.state.selected,
            valid_choice_made: self.state.valid_choice_made,
            input_focused: self.state.is_focused(),
        }
    }

    // -- shared helpers ------------------------------------------------------

    fn selected_input_value(&self) -> Option<String> {
        self.state
            .selected
            .and_then(|i| self.state.options.get(i))
            .map(|o| self.templates.input_value(o))
    }

    fn recompute_valid_choice(&mut self) {
        let templates = &self.templates;
        self.state.valid_choice_made = is_valid_choice(
            &self.state.query,
            &self.state.options,
            |o| templates.input_value(o),
            self.config.has_autoselect(),
        );
    }

    fn add_selected_option(&mut self, option: T) {
        if !self.state.selected_options.contains(&option) {
            self.state.selected_options.push(option);
        }
    }

    /// Swap in a new option list. Every index into the old list is dropped;
    /// focus held by an option falls back to the input.
    fn replace_options(&mut self, options: Vec<T>) {
        let had_option_focus = self.state.option_focused.is_some();
        self.state.options = options;
        self.state.selected = None;
        self.state.option_focused = None;
        self.state.hovered = None;
        self.state.clicked = None;
        if had_option_focus {
            self.state.input_focused = true;
        }
    }

    /// Empty the list and close the menu. Any lookup still in flight is
    /// superseded.
    fn clear_results(&mut self) {
        self.lookup_generation += 1;
        self.replace_options(Vec::new());
        self.state.menu_open = false;
    }

    fn cancel_pending_blur(&mut self, resp: &mut Response<T>) {
        if let BlurPhase::Requested { token } = self.blur {
            tracing::debug!(token, "pending blur cancelled");
            self.blur = BlurPhase::Idle;
            resp.blur = Some(BlurCommand::Cancel);
        }
    }
}
