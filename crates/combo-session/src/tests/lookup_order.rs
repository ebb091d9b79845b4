use super::*;
use crate::types::{KeyEvent, LookupOrdering};

fn discard_stale() -> SessionConfig {
    config(|c| c.lookup_ordering = LookupOrdering::DiscardStale)
}

#[test]
fn late_response_overwrites_newer_results_when_unordered() {
    let mut s = session();
    s.input_focus();
    let first = s.input_changed("g").lookup.unwrap();
    let second = s.input_changed("ge").lookup.unwrap();

    s.receive_options(second.ticket, filter(&second.query)).unwrap();
    assert_eq!(s.state().options, vec!["Germany".to_string()]);

    // The slow "g" lookup lands last and wins.
    s.receive_options(first.ticket, filter(&first.query)).unwrap();
    assert_eq!(
        s.state().options,
        vec!["Germany".to_string(), "United Kingdom".to_string()]
    );
    assert_eq!(s.state().query, "ge");
}

#[test]
fn stale_response_discarded() {
    let mut s = session_with(discard_stale());
    s.input_focus();
    let first = s.input_changed("g").lookup.unwrap();
    let second = s.input_changed("ge").lookup.unwrap();

    assert!(s.receive_options(second.ticket, filter(&second.query)).is_some());
    assert!(s.receive_options(first.ticket, filter(&first.query)).is_none());
    assert_eq!(s.state().options, vec!["Germany".to_string()]);
}

#[test]
fn clearing_results_supersedes_in_flight_lookup() {
    let mut s = session_with(discard_stale());
    s.input_focus();
    let pending = s.input_changed("g").lookup.unwrap();
    s.input_changed("");
    assert!(s.receive_options(pending.ticket, filter("g")).is_none());
    assert!(!s.state().menu_open);
    assert!(s.state().options.is_empty());
}

#[test]
fn empty_results_close_menu() {
    let mut s = session();
    type_query(&mut s, "zz");
    assert!(!s.state().menu_open);
    assert!(s.state().options.is_empty());
}

#[test]
fn failure_clears_and_flags() {
    let mut s = session();
    type_query(&mut s, "an");
    let req = s.input_changed("ang").lookup.unwrap();
    s.lookup_failed(req.ticket).unwrap();
    let state = s.state();
    assert!(state.lookup_failed);
    assert!(state.options.is_empty());
    assert!(!state.menu_open);
    assert_eq!(state.query, "ang");

    type_query(&mut s, "an");
    assert!(!s.state().lookup_failed);
    assert!(s.state().menu_open);
}

#[test]
fn stale_failure_discarded() {
    let mut s = session_with(discard_stale());
    type_query(&mut s, "an");
    let old = s.input_changed("a").lookup.unwrap();
    type_query(&mut s, "an");
    assert!(s.lookup_failed(old.ticket).is_none());
    assert!(s.state().menu_open);
}

#[test]
fn new_results_return_option_focus_to_input() {
    let mut s = session();
    type_query(&mut s, "an");
    s.key_down(KeyEvent::ArrowDown);
    s.key_down(KeyEvent::ArrowDown);
    let req = s.input_changed("a").lookup.unwrap();
    let resp = s.receive_options(req.ticket, filter("a")).unwrap();
    let state = s.state();
    assert_eq!(state.option_focused, None);
    assert_eq!(state.selected, None);
    assert!(state.input_focused);
    assert!(resp.focus.is_some());
}

#[test]
fn commit_supersedes_in_flight_lookup() {
    let mut s = session_with(config(|c| {
        c.lookup_ordering = LookupOrdering::DiscardStale;
        c.multiple = true;
    }));
    type_query(&mut s, "g");
    let pending = s.input_changed("ge").lookup.unwrap();
    s.option_click(0);
    assert_eq!(s.state().selected_options, vec!["Germany".to_string()]);

    assert!(s.receive_options(pending.ticket, filter(&pending.query)).is_none());
    let state = s.state();
    assert_eq!(state.query, "");
    assert!(!state.menu_open);
    assert!(state.options.is_empty());
}

#[test]
fn multi_select_blur_supersedes_in_flight_lookup() {
    let mut s = session_with(config(|c| {
        c.lookup_ordering = LookupOrdering::DiscardStale;
        c.multiple = true;
    }));
    type_query(&mut s, "g");
    let pending = s.input_changed("ge").lookup.unwrap();
    let token = match s.input_blur().blur {
        Some(crate::types::BlurCommand::Schedule { token }) => token,
        other => panic!("expected a scheduled blur, got {other:?}"),
    };
    s.confirm_blur(token);
    assert!(s.receive_options(pending.ticket, filter(&pending.query)).is_none());
    assert!(!s.state().menu_open);
}
