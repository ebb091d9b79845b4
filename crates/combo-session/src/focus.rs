//! Focus and blur handling.
//!
//! Input blur is two-phase: `input_blur` only asks the host to start the blur
//! timer, and `confirm_blur` commits when it fires. Any focus returning to the
//! widget in between cancels the request, so clicking an option never commits
//! twice.

use tracing::{debug, debug_span};

use super::types::{BlurCommand, BlurIntent, BlurPhase, RelatedTarget, Response};
use super::AutocompleteSession;

impl<T: Clone + PartialEq> AutocompleteSession<T> {
    pub fn input_focus(&mut self) -> Response<T> {
        let _span = debug_span!("input_focus").entered();
        let before = self.focus_snapshot();
        let mut resp = Response::pass();
        self.cancel_pending_blur(&mut resp);
        self.state.input_focused = true;
        self.state.option_focused = None;
        self.finish(resp, before)
    }

    pub fn input_blur(&mut self) -> Response<T> {
        let _span = debug_span!("input_blur").entered();
        let mut resp = Response::pass();
        if self.state.option_focused.is_some() {
            // Focus moved into the list.
            self.cancel_pending_blur(&mut resp);
            return resp;
        }
        self.blur_token += 1;
        let token = self.blur_token;
        self.blur = BlurPhase::Requested { token };
        resp.blur = Some(BlurCommand::Schedule { token });
        resp
    }

    /// Second phase of an input blur. Tokens that were cancelled or superseded
    /// are ignored.
    pub fn confirm_blur(&mut self, token: u64) -> Response<T> {
        let _span = debug_span!("confirm_blur", token).entered();
        match self.blur {
            BlurPhase::Requested { token: pending } if pending == token => {}
            _ => {
                debug!("stale blur token");
                return Response::pass();
            }
        }
        self.blur = BlurPhase::Idle;
        let keeps_menu = self.config.platform.keeps_menu_on_blur();
        let intent = BlurIntent {
            keep_menu_open: self.state.menu_open && keeps_menu,
            query: if keeps_menu {
                None
            } else {
                self.selected_input_value()
            },
        };
        let before = self.focus_snapshot();
        let mut resp = Response::pass();
        self.component_blur(intent, &mut resp);
        self.finish(resp, before)
    }

    pub fn option_focus(&mut self, index: usize) -> Response<T> {
        let _span = debug_span!("option_focus", index).entered();
        if index >= self.state.options.len() {
            debug!("option index out of range");
            return Response::pass();
        }
        let before = self.focus_snapshot();
        let mut resp = Response::pass();
        self.focus_option(index, &mut resp);
        self.finish(resp, before)
    }

    /// An option lost focus. Leaving for the input or another option is a
    /// move within the widget and does nothing.
    pub fn option_blur(&mut self, index: usize, related: RelatedTarget) -> Response<T> {
        let _span = debug_span!("option_blur", index, ?related).entered();
        let within = match related {
            RelatedTarget::Input => true,
            RelatedTarget::Option(other) => other != index,
            RelatedTarget::Outside => false,
        };
        let moved_elsewhere = self.state.option_focused.is_some_and(|f| f != index);
        if within || moved_elsewhere {
            return Response::pass();
        }
        let before = self.focus_snapshot();
        let mut resp = Response::pass();
        self.cancel_pending_blur(&mut resp);
        let intent = BlurIntent {
            keep_menu_open: self.state.menu_open && self.config.platform.keeps_menu_on_blur(),
            query: self.selected_input_value(),
        };
        self.component_blur(intent, &mut resp);
        self.finish(resp, before)
    }

    pub(super) fn focus_option(&mut self, index: usize, resp: &mut Response<T>) {
        self.cancel_pending_blur(resp);
        self.state.option_focused = Some(index);
        self.state.selected = Some(index);
        self.state.input_focused = false;
        self.state.hovered = None;
    }

    /// Focus left the widget entirely. With confirm-on-blur the selected
    /// option, or else an option matching the query exactly, is confirmed.
    pub(super) fn component_blur(&mut self, intent: BlurIntent, resp: &mut Response<T>) {
        let confirm = self.config.confirm_on_blur;
        let resolved = if confirm {
            self.resolve_blur_option()
        } else {
            None
        };
        debug!(confirm, resolved = resolved.is_some(), "component blur");
        resp.confirmed = resolved.clone();

        if self.config.multiple {
            if let Some(option) = resolved {
                self.add_selected_option(option);
            }
            self.reset_input(false);
        } else {
            if confirm {
                // An exact match found ignoring case still writes the
                // option's own text back.
                let query = intent.query.or_else(|| {
                    resolved
                        .as_ref()
                        .filter(|_| !self.config.platform.keeps_menu_on_blur())
                        .map(|o| self.templates.input_value(o))
                });
                if let Some(query) = query {
                    self.state.query = query;
                    self.state.aria_hint = self.state.query.is_empty();
                }
            }
            self.state.input_focused = false;
            self.state.option_focused = None;
            self.state.hovered = None;
            self.state.clicked = None;
            self.state.menu_open = intent.keep_menu_open;
        }
        self.recompute_valid_choice();
    }

    fn resolve_blur_option(&self) -> Option<T> {
        let templates = &self.templates;
        let index = self.state.selected.or_else(|| {
            combo_core::classify::find_exact_match(&self.state.query, &self.state.options, |o| {
                templates.input_value(o)
            })
        })?;
        self.state.options.get(index).cloned()
    }
}
