use super::{config, filter, session_with};
use crate::types::{key, BlurCommand, KeyEvent, Response, SessionConfig};
use crate::AutocompleteSession;

/// Headless host for integration tests.
///
/// Resolves every lookup synchronously against `filter`, records callbacks
/// and fires the blur timer on demand, so scenarios read like user stories.
pub(super) struct HeadlessWidget {
    pub session: AutocompleteSession<String>,
    pub confirmed: Vec<String>,
    pub removed: Vec<String>,
    blur_token: Option<u64>,
}

impl HeadlessWidget {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: session_with(config),
            confirmed: Vec::new(),
            removed: Vec::new(),
            blur_token: None,
        }
    }

    fn apply(&mut self, resp: Response<String>) {
        if let Some(option) = resp.confirmed {
            self.confirmed.push(option);
        }
        if let Some(option) = resp.removed {
            self.removed.push(option);
        }
        match resp.blur {
            Some(BlurCommand::Schedule { token }) => self.blur_token = Some(token),
            Some(BlurCommand::Cancel) => self.blur_token = None,
            None => {}
        }
        if let Some(req) = resp.lookup {
            if let Some(done) = self.session.receive_options(req.ticket, filter(&req.query)) {
                self.apply(done);
            }
        }
    }

    /// Focus the input and type `text` one character at a time.
    pub fn type_text(&mut self, text: &str) {
        if !self.session.state().input_focused {
            let resp = self.session.input_focus();
            self.apply(resp);
        }
        let mut query = self.session.state().query.clone();
        for ch in text.chars() {
            query.push(ch);
            let resp = self.session.input_changed(&query);
            self.apply(resp);
        }
    }

    pub fn press(&mut self, key_code: u16) {
        let on_input = self.session.state().input_focused;
        let resp = self
            .session
            .key_down(KeyEvent::from_key_code(key_code, on_input));
        self.apply(resp);
    }

    pub fn click(&mut self, index: usize) {
        let resp = self.session.input_blur();
        self.apply(resp);
        let resp = self.session.option_focus(index);
        self.apply(resp);
        let resp = self.session.option_click(index);
        self.apply(resp);
    }

    /// Tab away and let the blur timer fire.
    pub fn tab_out(&mut self) {
        let resp = self.session.input_blur();
        self.apply(resp);
        if let Some(token) = self.blur_token.take() {
            let resp = self.session.confirm_blur(token);
            self.apply(resp);
        }
    }

    pub fn remove(&mut self, index: usize) {
        let resp = self.session.remove_selected(index);
        self.apply(resp);
    }
}

#[test]
fn keyboard_pick_then_tab_out() {
    let mut w = HeadlessWidget::new(SessionConfig::default());
    w.type_text("ger");
    w.press(key::DOWN);
    w.press(key::ENTER);
    assert_eq!(w.confirmed, vec!["Germany".to_string()]);
    assert_eq!(w.session.state().query, "Germany");

    // Leaving re-confirms the option the query now names.
    w.tab_out();
    assert_eq!(w.confirmed, vec!["Germany".to_string(), "Germany".to_string()]);
    assert!(!w.session.state().is_focused());
}

#[test]
fn click_during_blur_confirms_once() {
    let mut w = HeadlessWidget::new(SessionConfig::default());
    w.type_text("an");
    w.click(0);
    assert_eq!(w.confirmed, vec!["France".to_string()]);
    assert_eq!(w.blur_token, None);
    assert!(w.session.state().input_focused);
}

#[test]
fn typed_exact_match_then_tab_out() {
    let mut w = HeadlessWidget::new(SessionConfig::default());
    w.type_text("France");
    w.tab_out();
    assert_eq!(w.confirmed, vec!["France".to_string()]);
    assert!(w.session.state().valid_choice_made);
}

#[test]
fn backspace_to_empty_closes_menu() {
    let mut w = HeadlessWidget::new(SessionConfig::default());
    w.type_text("f");
    assert!(w.session.state().menu_open);
    let resp = w.session.input_changed("");
    w.apply(resp);
    assert!(!w.session.state().menu_open);
    w.tab_out();
    assert!(w.confirmed.is_empty());
}

#[test]
fn multi_select_story() {
    let mut w = HeadlessWidget::new(config(|c| c.multiple = true));
    w.type_text("fr");
    w.press(key::DOWN);
    w.press(key::SPACE);
    w.type_text("ger");
    w.click(0);
    assert_eq!(
        w.session.state().selected_options,
        vec!["France".to_string(), "Germany".to_string()]
    );
    assert_eq!(w.confirmed, vec!["France".to_string(), "Germany".to_string()]);
    w.remove(0);
    assert_eq!(w.removed, vec!["France".to_string()]);
    assert_eq!(w.session.state().selected_options, vec!["Germany".to_string()]);
}

#[test]
fn show_all_down_then_escape() {
    let mut w = HeadlessWidget::new(config(|c| c.show_all_values = true));
    let resp = w.session.input_focus();
    w.apply(resp);
    w.press(key::DOWN);
    assert_eq!(w.session.state().option_focused, Some(0));
    w.press(key::DOWN);
    w.press(key::DOWN);
    w.press(key::DOWN);
    assert_eq!(w.session.state().option_focused, Some(2));
    w.press(key::ESCAPE);
    assert!(!w.session.state().menu_open);
    assert!(w.session.state().input_focused);
    assert!(w.confirmed.is_empty());
}
