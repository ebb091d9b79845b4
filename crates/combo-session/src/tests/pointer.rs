use combo_core::platform::PlatformCapabilities;

use super::*;
use crate::types::{FocusRequest, FocusRole};

#[test]
fn hover_and_leave() {
    let mut s = session();
    type_query(&mut s, "an");
    s.option_hover(1);
    assert_eq!(s.state().hovered, Some(1));
    s.list_pointer_leave();
    assert_eq!(s.state().hovered, None);
}

#[test]
fn hover_out_of_range_ignored() {
    let mut s = session();
    type_query(&mut s, "an");
    s.option_hover(7);
    assert_eq!(s.state().hovered, None);
}

#[test]
fn touch_ignores_hover() {
    let mut s = session_with(config(|c| c.platform = PlatformCapabilities::TOUCH));
    type_query(&mut s, "an");
    s.option_hover(0);
    assert_eq!(s.state().hovered, None);
}

#[test]
fn click_commits_exactly_once() {
    let mut s = session();
    type_query(&mut s, "an");
    s.option_hover(1);
    s.option_focus(1);
    let resp = s.option_click(1);
    assert_eq!(resp.confirmed.as_deref(), Some("Germany"));
    assert_eq!(
        resp.focus,
        Some(FocusRequest {
            role: FocusRole::Input,
            select_text: false
        })
    );
    let state = s.state();
    assert_eq!(state.query, "Germany");
    assert_eq!(state.clicked, Some(1));
    assert_eq!(state.selected, Some(1));
    assert_eq!(state.hovered, None);
    assert!(!state.menu_open);
    assert!(state.input_focused);
    assert!(state.valid_choice_made);
}

#[test]
fn click_out_of_range_ignored() {
    let mut s = session();
    type_query(&mut s, "an");
    let before = s.state().clone();
    assert!(s.option_click(5).is_empty());
    assert_eq!(s.state(), &before);
}
