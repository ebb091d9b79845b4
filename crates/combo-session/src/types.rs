use std::fmt;
use std::sync::Arc;

use combo_core::gate::GateConfig;
use combo_core::platform::PlatformCapabilities;
use combo_core::settings::WidgetSettings;

// DOM key codes
pub mod key {
    pub const ENTER: u16 = 13;
    pub const ESCAPE: u16 = 27;
    pub const SPACE: u16 = 32;
    pub const UP: u16 = 38;
    pub const DOWN: u16 = 40;
}

/// A key press, already classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    ArrowUp,
    ArrowDown,
    Enter,
    Space,
    Escape,
    /// A text-producing key. `on_input` is false when the event target is an
    /// option rather than the text field.
    Printable { on_input: bool },
    /// Anything else; ignored.
    Other(u16),
}

impl KeyEvent {
    pub fn from_key_code(key_code: u16, target_is_input: bool) -> Self {
        match key_code {
            key::UP => Self::ArrowUp,
            key::DOWN => Self::ArrowDown,
            key::ENTER => Self::Enter,
            key::SPACE => Self::Space,
            key::ESCAPE => Self::Escape,
            code if combo_core::classify::is_printable_key_code(code) => Self::Printable {
                on_input: target_is_input,
            },
            code => Self::Other(code),
        }
    }
}

type Template<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Caller-supplied formatting for options. Both functions must be pure.
pub struct Templates<T> {
    input_value: Template<T>,
    suggestion: Template<T>,
}

impl<T> Templates<T> {
    pub fn new(
        input_value: impl Fn(&T) -> String + Send + Sync + 'static,
        suggestion: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            input_value: Arc::new(input_value),
            suggestion: Arc::new(suggestion),
        }
    }

    /// Text written into the input when the option is chosen.
    pub fn input_value(&self, option: &T) -> String {
        (self.input_value)(option)
    }

    /// Markup shown for the option in the list.
    pub fn suggestion(&self, option: &T) -> String {
        (self.suggestion)(option)
    }
}

impl<T: ToString> Templates<T> {
    /// Both templates render the option's `Display` text.
    pub fn plain() -> Self {
        Self::new(|o: &T| o.to_string(), |o: &T| o.to_string())
    }
}

impl<T> Clone for Templates<T> {
    fn clone(&self) -> Self {
        Self {
            input_value: Arc::clone(&self.input_value),
            suggestion: Arc::clone(&self.suggestion),
        }
    }
}

impl<T> fmt::Debug for Templates<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

/// Complete widget state. Only session handlers mutate it, so readers see a
/// consistent snapshot between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState<T> {
    pub query: String,
    pub options: Vec<T>,
    pub selected: Option<usize>,
    pub option_focused: Option<usize>,
    pub input_focused: bool,
    pub hovered: Option<usize>,
    pub clicked: Option<usize>,
    pub menu_open: bool,
    pub selected_options: Vec<T>,
    pub valid_choice_made: bool,
    /// The query is empty, so the usage hint is attached to the input.
    pub aria_hint: bool,
    /// The most recent lookup failed and its results were cleared.
    pub lookup_failed: bool,
}

impl<T> WidgetState<T> {
    pub(crate) fn empty() -> Self {
        Self {
            query: String::new(),
            options: Vec::new(),
            selected: None,
            option_focused: None,
            input_focused: false,
            hovered: None,
            clicked: None,
            menu_open: false,
            selected_options: Vec::new(),
            valid_choice_made: false,
            aria_hint: true,
            lookup_failed: false,
        }
    }

    /// Focus is somewhere inside the widget.
    pub fn is_focused(&self) -> bool {
        self.input_focused || self.option_focused.is_some()
    }
}

/// How lookup completions are ordered against newer queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupOrdering {
    /// Apply every completion as it arrives. A slow response for an old query
    /// can overwrite newer results.
    #[default]
    Unordered,
    /// Drop completions whose generation is not the latest issued.
    DiscardStale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub min_length: usize,
    pub autoselect: bool,
    pub multiple: bool,
    pub show_all_values: bool,
    pub confirm_on_blur: bool,
    pub show_no_options_found: bool,
    pub lookup_ordering: LookupOrdering,
    pub platform: PlatformCapabilities,
}

impl SessionConfig {
    pub fn from_settings(settings: &WidgetSettings, platform: PlatformCapabilities) -> Self {
        Self {
            min_length: settings.search.min_length,
            autoselect: settings.selection.autoselect,
            multiple: settings.selection.multiple,
            show_all_values: settings.search.show_all_values,
            confirm_on_blur: settings.selection.confirm_on_blur,
            show_no_options_found: settings.display.show_no_options_found,
            lookup_ordering: if settings.lookup.discard_stale {
                LookupOrdering::DiscardStale
            } else {
                LookupOrdering::Unordered
            },
            platform,
        }
    }

    pub(crate) fn gate(&self) -> GateConfig {
        GateConfig {
            min_length: self.min_length,
            show_all_values: self.show_all_values,
        }
    }

    /// Autoselect after platform gating.
    pub fn has_autoselect(&self) -> bool {
        self.platform.autoselect_allowed(self.autoselect)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_settings(&WidgetSettings::default(), PlatformCapabilities::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPurpose {
    /// Typing in the input.
    Typed,
    /// Space on an empty input in show-all mode: open the full list.
    ShowAll,
    /// Down on a closed menu in show-all mode: open the full list and focus
    /// its first option.
    ShowAllFocusFirst,
}

/// Identifies one lookup. Hand it back with the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    pub generation: u64,
    pub purpose: LookupPurpose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub query: String,
    pub ticket: LookupTicket,
}

/// Logical element roles the renderer maps to its own handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusRole {
    Input,
    Option(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub role: FocusRole,
    /// Select the whole input value (first focus from outside the widget).
    pub select_text: bool,
}

/// Where focus is going when an option loses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedTarget {
    Input,
    Option(usize),
    Outside,
}

/// Two-phase blur: an input blur only requests the commit; the host confirms
/// it after the blur delay unless focus came back first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlurPhase {
    Idle,
    Requested { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurCommand {
    /// Start the blur timer; call `confirm_blur(token)` when it fires.
    Schedule { token: u64 },
    /// Drop the pending blur timer.
    Cancel,
}

/// Outbound commands produced by one handler call.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    /// The event was handled; the host should prevent its default action.
    pub consumed: bool,
    /// Invoke the confirm callback with this option.
    pub confirmed: Option<T>,
    /// Invoke the remove callback with this option.
    pub removed: Option<T>,
    pub lookup: Option<LookupRequest>,
    pub focus: Option<FocusRequest>,
    pub blur: Option<BlurCommand>,
}

pub(crate) struct BlurIntent {
    pub(crate) keep_menu_open: bool,
    /// Replacement query; `None` keeps the typed text.
    pub(crate) query: Option<String>,
}
