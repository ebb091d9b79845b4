//! Debounced screen-reader status.
//!
//! The announcer re-enters `Announcing` whenever the result count, query length
//! or selected option changes, and settles once the user has paused for the
//! settle delay. While `Silenced` the live region is empty.

use std::time::Duration;

use tracing::debug;

/// The parts of the widget state the status line is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusSnapshot {
    pub result_count: usize,
    pub query_length: usize,
    pub min_query_length: usize,
    /// Input value of the selected option, if any.
    pub selected_option: Option<String>,
    pub selected_index: Option<usize>,
    pub valid_choice_made: bool,
    pub input_focused: bool,
}

impl StatusSnapshot {
    fn change_key(&self) -> (usize, usize, Option<&str>, Option<usize>) {
        (
            self.result_count,
            self.query_length,
            self.selected_option.as_deref(),
            self.selected_index,
        )
    }
}

/// Message catalogue for the live region. Implementations must be pure.
pub trait StatusMessages {
    fn query_too_short(&self, min_query_length: usize) -> String {
        format!("Type in {min_query_length} or more characters for results")
    }

    fn no_results(&self) -> String {
        "No search results".to_string()
    }

    fn selected_option(&self, option: &str, count: usize, index: usize) -> String {
        format!("{option} {} of {count} is highlighted", index + 1)
    }

    fn results(&self, count: usize, selected_description: &str) -> String {
        let (noun, verb) = if count == 1 {
            ("result", "is")
        } else {
            ("results", "are")
        };
        format!("{count} {noun} {verb} available. {selected_description}")
    }

    /// Text of the placeholder row shown when nothing matched.
    fn no_results_option(&self) -> String {
        "No results found".to_string()
    }

    /// Accessible description of a committed option's remove button.
    fn selected_option_description(&self) -> String {
        "Press Enter or Space to remove selection".to_string()
    }
}

/// English defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl StatusMessages for DefaultMessages {}

/// Status text for a snapshot, ignoring silencing.
pub fn status_text(snapshot: &StatusSnapshot, messages: &dyn StatusMessages) -> String {
    if snapshot.query_length < snapshot.min_query_length {
        return messages.query_too_short(snapshot.min_query_length);
    }
    if snapshot.result_count == 0 {
        return messages.no_results();
    }
    let selected = match (&snapshot.selected_option, snapshot.selected_index) {
        (Some(option), Some(index)) => {
            messages.selected_option(option, snapshot.result_count, index)
        }
        _ => String::new(),
    };
    messages.results(snapshot.result_count, &selected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPhase {
    Silenced,
    /// `settles_at` is `None` once the settle delay passed without silencing.
    Announcing { settles_at: Option<Duration> },
}

#[derive(Debug)]
pub struct StatusAnnouncer {
    phase: StatusPhase,
    settle_delay: Duration,
    last: Option<StatusSnapshot>,
    text: String,
    bump: bool,
}

impl StatusAnnouncer {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            phase: StatusPhase::Announcing { settles_at: None },
            settle_delay,
            last: None,
            text: String::new(),
            bump: false,
        }
    }

    pub fn phase(&self) -> StatusPhase {
        self.phase
    }

    /// Record a new snapshot. Returns the settle deadline when the announcer
    /// (re)started its debounce; the caller schedules the timer.
    pub fn observe(
        &mut self,
        snapshot: &StatusSnapshot,
        messages: &dyn StatusMessages,
        now: Duration,
    ) -> Option<Duration> {
        let changed = self
            .last
            .as_ref()
            .map_or(true, |last| last.change_key() != snapshot.change_key());
        self.text = status_text(snapshot, messages);
        let focus_or_choice_moved = self.last.as_ref().is_some_and(|last| {
            last.input_focused != snapshot.input_focused
                || last.valid_choice_made != snapshot.valid_choice_made
        });
        self.last = Some(snapshot.clone());
        if !changed {
            // Focus loss still needs a settle pass to silence a stale message.
            if focus_or_choice_moved
                && matches!(self.phase, StatusPhase::Announcing { settles_at: None })
            {
                return self.restart(now);
            }
            return None;
        }
        self.restart(now)
    }

    fn restart(&mut self, now: Duration) -> Option<Duration> {
        let settles_at = now + self.settle_delay;
        self.phase = StatusPhase::Announcing {
            settles_at: Some(settles_at),
        };
        Some(settles_at)
    }

    /// Settle timer expiry. Returns true when this moved the announcer to
    /// `Silenced`.
    pub fn settle(&mut self, now: Duration) -> bool {
        let StatusPhase::Announcing {
            settles_at: Some(at),
        } = self.phase
        else {
            return false;
        };
        if now < at {
            return false;
        }
        self.bump = !self.bump;
        let should_silence = self
            .last
            .as_ref()
            .map_or(true, |s| !s.input_focused || s.valid_choice_made);
        if should_silence {
            debug!(at = ?now, "status silenced");
            self.phase = StatusPhase::Silenced;
            true
        } else {
            self.phase = StatusPhase::Announcing { settles_at: None };
            false
        }
    }

    /// Tear down: drop the pending deadline without silencing.
    pub fn cancel(&mut self) {
        if let StatusPhase::Announcing { settles_at } = &mut self.phase {
            *settles_at = None;
        }
    }

    pub fn is_silenced(&self) -> bool {
        matches!(self.phase, StatusPhase::Silenced)
    }

    /// Text for the live region; empty while silenced.
    pub fn announcement(&self) -> &str {
        if self.is_silenced() {
            ""
        } else {
            &self.text
        }
    }

    /// Flips on every settle so the renderer can alternate live regions and
    /// force assistive technology to re-read identical text.
    pub fn bump(&self) -> bool {
        self.bump
    }
}
