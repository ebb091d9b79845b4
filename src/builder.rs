use std::time::Duration;

use combo_core::platform::PlatformCapabilities;
use combo_core::settings::WidgetSettings;
use combo_core::status::{DefaultMessages, StatusAnnouncer, StatusMessages};
use combo_core::timer::TimerQueue;
use combo_session::{AutocompleteSession, SessionConfig, Templates};
use tracing::debug;

use crate::error::BuildError;
use crate::roles::ElementIds;
use crate::source::SuggestionSource;
use crate::watch::{ExternalWatch, ValueProbe};
use crate::widget::{Callback, Widget};

/// Assembles a `Widget`. `id` and `source` are required.
pub struct WidgetBuilder<T> {
    id: Option<String>,
    source: Option<Box<dyn SuggestionSource<T>>>,
    templates: Templates<T>,
    settings: WidgetSettings,
    platform: PlatformCapabilities,
    default_value: Option<T>,
    selected_options: Vec<T>,
    on_confirm: Option<Callback<T>>,
    on_remove: Option<Callback<T>>,
    messages: Box<dyn StatusMessages>,
    watch: ExternalWatch,
    poll_probe: Option<Box<dyn ValueProbe>>,
}

impl<T: Clone + PartialEq + 'static> WidgetBuilder<T> {
    pub fn new(templates: Templates<T>) -> Self {
        Self {
            id: None,
            source: None,
            templates,
            settings: WidgetSettings::default(),
            platform: PlatformCapabilities::default(),
            default_value: None,
            selected_options: Vec::new(),
            on_confirm: None,
            on_remove: None,
            messages: Box::new(DefaultMessages),
            watch: ExternalWatch::Disabled,
            poll_probe: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn source(mut self, source: impl SuggestionSource<T> + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn settings(mut self, settings: WidgetSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn platform(mut self, platform: PlatformCapabilities) -> Self {
        self.platform = platform;
        self
    }

    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn selected_options(mut self, options: Vec<T>) -> Self {
        self.selected_options = options;
        self
    }

    pub fn on_confirm(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_confirm = Some(Box::new(callback));
        self
    }

    pub fn on_remove(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_remove = Some(Box::new(callback));
        self
    }

    pub fn messages(mut self, messages: impl StatusMessages + 'static) -> Self {
        self.messages = Box::new(messages);
        self
    }

    pub fn watch(mut self, watch: ExternalWatch) -> Self {
        self.watch = watch;
        self
    }

    /// Poll the input's value through `probe` at the configured
    /// `timing.input_poll_ms`. Overrides `watch`.
    pub fn poll_input(mut self, probe: impl ValueProbe + 'static) -> Self {
        self.poll_probe = Some(Box::new(probe));
        self
    }

    pub fn build(self) -> Result<Widget<T>, BuildError> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(BuildError::MissingId)?;
        let source = self.source.ok_or(BuildError::MissingSource)?;
        let watch = match self.poll_probe {
            Some(probe) => ExternalWatch::Poll {
                probe,
                interval: self.settings.timing.input_poll_interval(),
            },
            None => self.watch,
        };
        if watch.interval() == Some(Duration::ZERO) {
            return Err(BuildError::InvalidPollInterval);
        }

        let config = SessionConfig::from_settings(&self.settings, self.platform);
        let mut session = AutocompleteSession::new(config, self.templates)
            .with_selected_options(self.selected_options);
        if let Some(value) = self.default_value {
            session = session.with_default_value(value);
        }

        debug!(%id, ?self.platform, "widget built");
        let mut widget = Widget {
            ids: ElementIds::new(id),
            session,
            source,
            timers: TimerQueue::new(),
            timing: self.settings.timing.clone(),
            menu: self.settings.display.menu,
            announcer: StatusAnnouncer::new(self.settings.timing.status_settle_delay()),
            messages: self.messages,
            on_confirm: self.on_confirm,
            on_remove: self.on_remove,
            watch,
            now: Duration::ZERO,
            pending_blur: None,
            mounted: true,
        };
        widget.mount();
        Ok(widget)
    }
}

impl<T: Clone + PartialEq + ToString + 'static> WidgetBuilder<T> {
    /// Builder whose templates render options with `Display`.
    pub fn plain() -> Self {
        Self::new(Templates::plain())
    }
}
