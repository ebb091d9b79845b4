//! Detection of input-value changes made outside the widget (browser
//! autofill, scripts writing the field directly).

use std::fmt;
use std::time::Duration;

/// Reads the input's current value. `None` when it cannot be read, for
/// example after the element was detached.
pub trait ValueProbe {
    fn read(&mut self) -> Option<String>;
}

impl<F> ValueProbe for F
where
    F: FnMut() -> Option<String>,
{
    fn read(&mut self) -> Option<String> {
        self()
    }
}

#[derive(Default)]
pub enum ExternalWatch {
    /// External writes are not noticed.
    #[default]
    Disabled,
    /// The host delivers changes itself through
    /// `Widget::external_value_changed`.
    Subscribed,
    /// The widget reads the probe every `interval`.
    Poll {
        probe: Box<dyn ValueProbe>,
        interval: Duration,
    },
}

impl ExternalWatch {
    pub fn poll(probe: impl ValueProbe + 'static, interval: Duration) -> Self {
        Self::Poll {
            probe: Box::new(probe),
            interval,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        match self {
            Self::Poll { interval, .. } => Some(*interval),
            _ => None,
        }
    }

    pub(crate) fn read(&mut self) -> Option<String> {
        match self {
            Self::Poll { probe, .. } => probe.read(),
            _ => None,
        }
    }
}

impl fmt::Debug for ExternalWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Subscribed => f.write_str("Subscribed"),
            Self::Poll { interval, .. } => f.debug_struct("Poll").field("interval", interval).finish(),
        }
    }
}
