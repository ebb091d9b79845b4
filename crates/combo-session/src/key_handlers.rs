use tracing::debug_span;

use super::types::{FocusRequest, FocusRole, KeyEvent, LookupPurpose, Response};
use super::AutocompleteSession;

impl<T: Clone + PartialEq> AutocompleteSession<T> {
    pub fn key_down(&mut self, event: KeyEvent) -> Response<T> {
        let _span = debug_span!("key_down", ?event, menu_open = self.state.menu_open).entered();
        let before = self.focus_snapshot();
        let resp = match event {
            KeyEvent::ArrowUp => self.handle_up(),
            KeyEvent::ArrowDown => self.handle_down(),
            KeyEvent::Enter => self.handle_enter(),
            KeyEvent::Space => self.handle_space(),
            KeyEvent::Escape => self.handle_escape(),
            KeyEvent::Printable { on_input: false } => self.handle_printable_on_option(),
            KeyEvent::Printable { on_input: true } | KeyEvent::Other(_) => Response::pass(),
        };
        self.finish(resp, before)
    }

    fn handle_up(&mut self) -> Response<T> {
        let mut resp = Response::consumed();
        if !self.state.menu_open {
            return resp;
        }
        match self.state.option_focused {
            Some(i) if i > 0 => self.focus_option(i - 1, &mut resp),
            _ => {
                self.state.option_focused = None;
                self.state.selected = None;
                self.state.input_focused = true;
            }
        }
        resp
    }

    fn handle_down(&mut self) -> Response<T> {
        let mut resp = Response::consumed();
        if self.config.show_all_values && !self.state.menu_open {
            resp.lookup = Some(self.issue_lookup(String::new(), LookupPurpose::ShowAllFocusFirst));
        } else if self.state.menu_open {
            let next = self.state.option_focused.map_or(0, |i| i + 1);
            if next < self.state.options.len() {
                self.focus_option(next, &mut resp);
            }
        }
        resp
    }

    fn handle_enter(&mut self) -> Response<T> {
        if !self.state.menu_open {
            return Response::pass();
        }
        let mut resp = Response::consumed();
        if let Some(i) = self.state.selected {
            self.commit_option(i, &mut resp);
        }
        resp
    }

    fn handle_space(&mut self) -> Response<T> {
        let mut resp = Response::pass();
        if self.config.show_all_values && !self.state.menu_open && self.state.query.is_empty() {
            resp.consumed = true;
            resp.lookup = Some(self.issue_lookup(String::new(), LookupPurpose::ShowAll));
        }
        if let Some(i) = self.state.option_focused {
            resp.consumed = true;
            self.commit_option(i, &mut resp);
        }
        resp
    }

    fn handle_escape(&mut self) -> Response<T> {
        let mut resp = Response::pass();
        self.cancel_pending_blur(&mut resp);
        self.state.menu_open = false;
        self.state.option_focused = None;
        self.state.hovered = None;
        self.state.input_focused = true;
        resp
    }

    /// Typing while an option holds focus sends the keystroke to the input.
    fn handle_printable_on_option(&mut self) -> Response<T> {
        let mut resp = Response::pass();
        self.cancel_pending_blur(&mut resp);
        self.state.option_focused = None;
        self.state.input_focused = true;
        resp.focus = Some(FocusRequest {
            role: FocusRole::Input,
            select_text: false,
        });
        resp
    }
}
