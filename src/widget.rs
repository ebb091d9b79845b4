//! Host driver for one autocomplete instance.
//!
//! `Widget` owns the session, the suggestion source, the timers and the status
//! announcer. The renderer forwards DOM events to the entry points below and
//! calls `advance` with the current time; everything else (lookups, callbacks,
//! blur commits, status settling, external-value polling) happens in here.
//!
//! Time is a `Duration` since mount, supplied by the host. Events are stamped
//! with the time of the last `advance` call.

use std::time::Duration;

use combo_core::settings::{MenuDisplay, TimingSettings};
use combo_core::status::{StatusAnnouncer, StatusMessages};
use combo_core::timer::{TimerKind, TimerQueue};
use combo_session::{
    AutocompleteSession, BlurCommand, FocusRequest, KeyEvent, LookupRequest, LookupTicket,
    RelatedTarget, Response, ViewModel, WidgetState,
};
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::roles::ElementIds;
use crate::source::{Lookup, SuggestionSource};
use crate::watch::ExternalWatch;

pub(crate) type Callback<T> = Box<dyn FnMut(&T)>;

/// What the renderer must do right after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub prevent_default: bool,
    pub focus: Option<FocusRequest>,
}

pub struct Widget<T> {
    pub(crate) ids: ElementIds,
    pub(crate) session: AutocompleteSession<T>,
    pub(crate) source: Box<dyn SuggestionSource<T>>,
    pub(crate) timers: TimerQueue,
    pub(crate) timing: TimingSettings,
    pub(crate) menu: MenuDisplay,
    pub(crate) announcer: StatusAnnouncer,
    pub(crate) messages: Box<dyn StatusMessages>,
    pub(crate) on_confirm: Option<Callback<T>>,
    pub(crate) on_remove: Option<Callback<T>>,
    pub(crate) watch: ExternalWatch,
    pub(crate) now: Duration,
    pub(crate) pending_blur: Option<u64>,
    pub(crate) mounted: bool,
}

impl<T: Clone + PartialEq + 'static> Widget<T> {
    /// Called once by the builder after construction.
    pub(crate) fn mount(&mut self) {
        if let Some(interval) = self.watch.interval() {
            self.timers.schedule(TimerKind::InputPoll, self.now + interval);
        }
        self.observe_status();
    }

    // -- accessors -----------------------------------------------------------

    pub fn id(&self) -> &str {
        self.ids.input()
    }

    pub fn element_ids(&self) -> &ElementIds {
        &self.ids
    }

    pub fn state(&self) -> &WidgetState<T> {
        self.session.state()
    }

    pub fn view(&self) -> ViewModel {
        self.session.view()
    }

    pub fn menu_display(&self) -> MenuDisplay {
        self.menu
    }

    /// Live-region text; empty while the announcer is silenced.
    pub fn status(&self) -> &str {
        self.announcer.announcement()
    }

    /// Flips each time the status settles.
    pub fn status_bump(&self) -> bool {
        self.announcer.bump()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// When the host should next call `advance`.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    // -- DOM events ----------------------------------------------------------

    pub fn input_changed(&mut self, value: &str) -> EventOutcome {
        self.handle(|s| s.input_changed(value))
    }

    pub fn input_focus(&mut self) -> EventOutcome {
        self.handle(|s| s.input_focus())
    }

    pub fn input_blur(&mut self) -> EventOutcome {
        self.handle(|s| s.input_blur())
    }

    pub fn input_click(&mut self) -> EventOutcome {
        self.handle(|s| s.input_click())
    }

    pub fn option_focus(&mut self, index: usize) -> EventOutcome {
        self.handle(|s| s.option_focus(index))
    }

    pub fn option_blur(&mut self, index: usize, related: RelatedTarget) -> EventOutcome {
        self.handle(|s| s.option_blur(index, related))
    }

    pub fn option_hover(&mut self, index: usize) -> EventOutcome {
        self.handle(|s| s.option_hover(index))
    }

    pub fn list_pointer_leave(&mut self) -> EventOutcome {
        self.handle(|s| s.list_pointer_leave())
    }

    pub fn option_click(&mut self, index: usize) -> EventOutcome {
        self.handle(|s| s.option_click(index))
    }

    pub fn remove_selected(&mut self, index: usize) -> EventOutcome {
        self.handle(|s| s.remove_selected(index))
    }

    pub fn key_down(&mut self, key_code: u16, target_is_input: bool) -> EventOutcome {
        let event = KeyEvent::from_key_code(key_code, target_is_input);
        self.handle(|s| s.key_down(event))
    }

    /// A subscribed watch saw the input's value change.
    pub fn external_value_changed(&mut self, value: &str) -> EventOutcome {
        if !self.mounted {
            return EventOutcome::default();
        }
        match self.session.sync_external_value(value) {
            Some(resp) => self.dispatch(resp),
            None => EventOutcome::default(),
        }
    }

    // -- lookups -------------------------------------------------------------

    pub fn complete_lookup(&mut self, ticket: LookupTicket, results: Vec<T>) -> EventOutcome {
        self.apply_completion(ticket, Ok(results))
    }

    pub fn fail_lookup(&mut self, ticket: LookupTicket, error: LookupError) -> EventOutcome {
        self.apply_completion(ticket, Err(error))
    }

    /// Apply every completion an asynchronous source has ready. Returns the
    /// last focus move they produced.
    pub fn poll(&mut self) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        while self.mounted {
            let Some(done) = self.source.poll() else {
                break;
            };
            let next = self.apply_completion(done.ticket, done.result);
            if next.focus.is_some() {
                outcome.focus = next.focus;
            }
        }
        outcome
    }

    // -- time ----------------------------------------------------------------

    /// Move the clock to `now` and fire every timer due by then, earliest
    /// first. Returns the kinds that fired.
    pub fn advance(&mut self, now: Duration) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        if !self.mounted {
            return fired;
        }
        while let Some((kind, at)) = self.timers.pop_due(now) {
            self.now = self.now.max(at);
            self.fire(kind);
            fired.push(kind);
        }
        self.now = self.now.max(now);
        fired
    }

    /// Tear down: cancel every timer and ignore all later events.
    pub fn unmount(&mut self) {
        debug!(id = self.ids.input(), "unmount");
        self.timers.clear();
        self.announcer.cancel();
        self.pending_blur = None;
        self.mounted = false;
    }

    // -- internals -----------------------------------------------------------

    fn handle(
        &mut self,
        event: impl FnOnce(&mut AutocompleteSession<T>) -> Response<T>,
    ) -> EventOutcome {
        if !self.mounted {
            debug!("event after unmount ignored");
            return EventOutcome::default();
        }
        let resp = event(&mut self.session);
        self.dispatch(resp)
    }

    fn dispatch(&mut self, resp: Response<T>) -> EventOutcome {
        if let Some(option) = &resp.confirmed {
            if let Some(on_confirm) = self.on_confirm.as_mut() {
                on_confirm(option);
            }
        }
        if let Some(option) = &resp.removed {
            if let Some(on_remove) = self.on_remove.as_mut() {
                on_remove(option);
            }
        }
        match resp.blur {
            Some(BlurCommand::Schedule { token }) => {
                self.pending_blur = Some(token);
                self.timers
                    .schedule(TimerKind::BlurCommit, self.now + self.timing.blur_commit_delay());
            }
            Some(BlurCommand::Cancel) => {
                self.pending_blur = None;
                self.timers.cancel(TimerKind::BlurCommit);
            }
            None => {}
        }
        let mut focus = resp.focus;
        if let Some(request) = resp.lookup {
            if let Some(moved) = self.run_lookup(request) {
                focus = Some(moved);
            }
        }
        self.observe_status();
        EventOutcome {
            prevent_default: resp.consumed,
            focus,
        }
    }

    fn run_lookup(&mut self, request: LookupRequest) -> Option<FocusRequest> {
        let ticket = request.ticket;
        match self.source.search(&request.query, ticket) {
            Lookup::Ready(results) => self.apply_completion(ticket, Ok(results)).focus,
            Lookup::Failed(error) => self.apply_completion(ticket, Err(error)).focus,
            Lookup::Pending => None,
        }
    }

    fn apply_completion(
        &mut self,
        ticket: LookupTicket,
        result: Result<Vec<T>, LookupError>,
    ) -> EventOutcome {
        if !self.mounted {
            return EventOutcome::default();
        }
        let resp = match result {
            Ok(results) => self.session.receive_options(ticket, results),
            Err(error) => {
                warn!(%error, generation = ticket.generation, "lookup failed");
                self.session.lookup_failed(ticket)
            }
        };
        match resp {
            Some(resp) => self.dispatch(resp),
            None => EventOutcome::default(),
        }
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::BlurCommit => {
                if let Some(token) = self.pending_blur.take() {
                    let resp = self.session.confirm_blur(token);
                    self.dispatch(resp);
                }
            }
            TimerKind::StatusSettle => {
                self.announcer.settle(self.now);
            }
            TimerKind::InputPoll => {
                if let Some(value) = self.watch.read() {
                    if let Some(resp) = self.session.sync_external_value(&value) {
                        self.dispatch(resp);
                    }
                }
                if let Some(interval) = self.watch.interval() {
                    self.timers.schedule(TimerKind::InputPoll, self.now + interval);
                }
            }
        }
    }

    fn observe_status(&mut self) {
        let snapshot = self.session.status_snapshot();
        if let Some(deadline) = self.announcer.observe(&snapshot, &*self.messages, self.now) {
            self.timers.schedule(TimerKind::StatusSettle, deadline);
        }
    }
}
