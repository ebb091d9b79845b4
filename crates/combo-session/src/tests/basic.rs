use super::*;
use crate::types::LookupPurpose;

#[test]
fn new_session_is_empty() {
    let s = session();
    let state = s.state();
    assert!(state.query.is_empty());
    assert!(state.options.is_empty());
    assert!(!state.menu_open);
    assert!(!state.valid_choice_made);
    assert!(state.aria_hint);
    assert!(!state.is_focused());
}

#[test]
fn default_value_prepopulates() {
    let s = session().with_default_value("France".to_string());
    let state = s.state();
    assert_eq!(state.query, "France");
    assert_eq!(state.options, vec!["France".to_string()]);
    assert_eq!(state.selected, Some(0));
    assert!(!state.menu_open);
    assert!(state.valid_choice_made);
    assert!(!state.aria_hint);
}

#[test]
fn query_below_min_length_clears() {
    let mut s = session_with(config(|c| c.min_length = 2));
    let resp = type_query(&mut s, "f");
    assert!(resp.lookup.is_none());
    assert!(!s.state().menu_open);
    assert!(s.state().options.is_empty());
}

#[test]
fn substring_source_opens_and_empty_query_closes() {
    let mut s = session();
    let resp = type_query(&mut s, "f");
    let req = resp.lookup.expect("lookup issued");
    assert_eq!(req.query, "f");
    assert_eq!(req.ticket.purpose, LookupPurpose::Typed);
    assert_eq!(s.state().options, vec!["France".to_string()]);
    assert!(s.state().menu_open);

    let resp = s.input_changed("");
    assert!(resp.lookup.is_none());
    assert!(s.state().options.is_empty());
    assert!(!s.state().menu_open);
}

#[test]
fn same_length_edit_keeps_results() {
    let mut s = session();
    type_query(&mut s, "fr");
    let resp = s.input_changed("fa");
    assert!(resp.lookup.is_none());
    assert_eq!(s.state().query, "fa");
    assert_eq!(s.state().options, vec!["France".to_string()]);
}

#[test]
fn autoselect_highlights_first_result() {
    let mut s = session_with(config(|c| c.autoselect = true));
    type_query(&mut s, "an");
    assert_eq!(s.state().options.len(), 2);
    assert_eq!(s.state().selected, Some(0));
    assert!(s.state().valid_choice_made);
}

#[test]
fn exact_query_is_valid_choice() {
    let mut s = session();
    type_query(&mut s, "fr");
    assert!(!s.state().valid_choice_made);
    type_query(&mut s, "FRANCE");
    assert!(s.state().valid_choice_made);
}

#[test]
fn aria_hint_follows_empty_query() {
    let mut s = session();
    s.input_changed("g");
    assert!(!s.state().aria_hint);
    s.input_changed("");
    assert!(s.state().aria_hint);
}

#[test]
fn input_click_reopens_full_list_in_show_all() {
    let mut s = session_with(config(|c| c.show_all_values = true));
    s.input_focus();
    let resp = s.input_click();
    let req = resp.lookup.clone().expect("show-all searches on empty query");
    assert_eq!(req.query, "");
    resolve(&mut s, &resp);
    assert_eq!(s.state().options.len(), COUNTRIES.len());
    assert!(s.state().menu_open);
}

#[test]
fn external_value_sync() {
    let mut s = session();
    type_query(&mut s, "fr");
    assert!(s.sync_external_value("fr").is_none());
    let resp = s.sync_external_value("germ").expect("value differs");
    assert_eq!(s.state().query, "germ");
    assert!(resp.lookup.is_some());
}

#[test]
fn status_snapshot_reflects_state() {
    let mut s = session_with(config(|c| {
        c.autoselect = true;
        c.min_length = 1;
    }));
    type_query(&mut s, "fr");
    let snap = s.status_snapshot();
    assert_eq!(snap.result_count, 1);
    assert_eq!(snap.query_length, 2);
    assert_eq!(snap.min_query_length, 1);
    assert_eq!(snap.selected_option.as_deref(), Some("France"));
    assert_eq!(snap.selected_index, Some(0));
    assert!(snap.valid_choice_made);
    assert!(snap.input_focused);
}

#[test]
fn lookup_generation_increases() {
    let mut s = session();
    let a = s.input_changed("f").lookup.unwrap().ticket.generation;
    let b = s.input_changed("fr").lookup.unwrap().ticket.generation;
    assert!(b > a);
    assert_eq!(s.lookup_generation(), b);
}
