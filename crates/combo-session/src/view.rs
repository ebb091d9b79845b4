use combo_core::classify::{hint_value, query_len};

use super::AutocompleteSession;

/// Render-facing values derived from the widget state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub menu_visible: bool,
    /// The "no results" placeholder row is shown instead of options.
    pub show_no_options_found: bool,
    pub aria_expanded: bool,
    /// `"both"` with autoselect (inline hint), otherwise `"list"`.
    pub aria_autocomplete: &'static str,
    /// Option referenced by the input's active descendant. Only an option
    /// that actually holds focus is announced.
    pub active_descendant: Option<usize>,
    /// Option drawn with the focus style. `None` while the pointer hovers.
    pub focused_option: Option<usize>,
    pub hovered: Option<usize>,
    /// Completion text layered behind the input.
    pub hint: Option<String>,
    /// Suggestion markup, one per option.
    pub suggestions: Vec<String>,
    /// Input values of committed multi-select options.
    pub selected_labels: Vec<String>,
    /// Attach the usage hint to the input.
    pub describe_usage: bool,
    pub component_focused: bool,
    /// Show-all mode draws a dropdown arrow.
    pub dropdown_arrow: bool,
}

impl<T: Clone + PartialEq> AutocompleteSession<T> {
    pub fn view(&self) -> ViewModel {
        let state = &self.state;
        let autoselect = self.config.has_autoselect();

        let query_long_enough = query_len(&state.query) >= self.config.min_length;
        let show_no_options_found = self.config.show_no_options_found
            && state.input_focused
            && state.options.is_empty()
            && !state.query.is_empty()
            && query_long_enough;

        let focused = if state.input_focused {
            state.selected
        } else {
            state.option_focused
        };
        let focused_option = if state.hovered.is_some() {
            None
        } else {
            focused
        };

        let hint = if autoselect && self.config.platform.supports_pointer_events {
            self.selected_input_value()
                .and_then(|text| hint_value(&state.query, &text))
        } else {
            None
        };

        ViewModel {
            menu_visible: state.menu_open || show_no_options_found,
            show_no_options_found,
            aria_expanded: state.menu_open,
            aria_autocomplete: if autoselect { "both" } else { "list" },
            active_descendant: state.option_focused,
            focused_option,
            hovered: state.hovered,
            hint,
            suggestions: state
                .options
                .iter()
                .map(|o| self.templates.suggestion(o))
                .collect(),
            selected_labels: state
                .selected_options
                .iter()
                .map(|o| self.templates.input_value(o))
                .collect(),
            describe_usage: state.aria_hint,
            component_focused: state.is_focused(),
            dropdown_arrow: self.config.show_all_values,
        }
    }
}
