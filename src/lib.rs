//! Headless accessible autocomplete.
//!
//! The interaction state machine lives in `combo_session`, the pure leaves
//! (classifier, gate, status, timers, settings) in `combo_core`. This crate
//! adds the host driver: `Widget` wires a session to a suggestion source,
//! callbacks, timers, the status announcer and an external-value watch.

pub mod builder;
pub mod error;
pub mod lookup_worker;
pub mod roles;
pub mod source;
mod trace_init;
pub mod watch;
pub mod widget;

pub use combo_core::platform::PlatformCapabilities;
pub use combo_core::settings::{load_settings, parse_settings_toml, MenuDisplay, WidgetSettings};
pub use combo_core::status::{DefaultMessages, StatusMessages};
pub use combo_core::timer::TimerKind;
pub use combo_session::{
    FocusRequest, FocusRole, LookupPurpose, LookupTicket, RelatedTarget, Templates, ViewModel,
    WidgetState,
};

pub use builder::WidgetBuilder;
pub use error::{BuildError, LookupError};
pub use lookup_worker::ThreadedSource;
pub use roles::{ElementIds, RoleRegistry};
pub use source::{Completion, Lookup, SubstringSource, SuggestionSource};
pub use trace_init::init_tracing;
pub use watch::{ExternalWatch, ValueProbe};
pub use widget::{EventOutcome, Widget};
