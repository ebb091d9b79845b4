use super::*;
use crate::types::{BlurCommand, KeyEvent};

fn multi() -> AutocompleteSession<String> {
    session_with(config(|c| c.multiple = true)).with_selected_options(vec!["France".to_string()])
}

#[test]
fn commit_appends_and_resets_input() {
    let mut s = multi();
    type_query(&mut s, "ger");
    let resp = s.option_click(0);
    assert_eq!(resp.confirmed.as_deref(), Some("Germany"));
    let state = s.state();
    assert_eq!(
        state.selected_options,
        vec!["France".to_string(), "Germany".to_string()]
    );
    assert_eq!(state.query, "");
    assert!(!state.menu_open);
    assert!(state.options.is_empty());
    assert_eq!(state.selected, None);
    assert!(state.input_focused);
}

#[test]
fn remove_reports_option() {
    let mut s = multi();
    type_query(&mut s, "ger");
    s.option_click(0);
    let resp = s.remove_selected(0);
    assert_eq!(resp.removed.as_deref(), Some("France"));
    assert_eq!(s.state().selected_options, vec!["Germany".to_string()]);
}

#[test]
fn duplicate_commit_not_added_twice() {
    let mut s = multi();
    type_query(&mut s, "fr");
    let resp = s.key_down(KeyEvent::ArrowDown);
    assert!(resp.consumed);
    let resp = s.key_down(KeyEvent::Enter);
    assert_eq!(resp.confirmed.as_deref(), Some("France"));
    assert_eq!(s.state().selected_options, vec!["France".to_string()]);
}

#[test]
fn remove_out_of_range_or_single_select_ignored() {
    let mut s = multi();
    assert!(s.remove_selected(3).is_empty());
    assert_eq!(s.state().selected_options.len(), 1);

    let mut single = session().with_selected_options(vec!["France".to_string()]);
    assert!(single.remove_selected(0).removed.is_none());
}

#[test]
fn blur_appends_exact_match() {
    let mut s = multi();
    type_query(&mut s, "Germany");
    let token = match s.input_blur().blur {
        Some(BlurCommand::Schedule { token }) => token,
        other => panic!("expected scheduled blur, got {other:?}"),
    };
    let resp = s.confirm_blur(token);
    assert_eq!(resp.confirmed.as_deref(), Some("Germany"));
    let state = s.state();
    assert_eq!(
        state.selected_options,
        vec!["France".to_string(), "Germany".to_string()]
    );
    assert_eq!(state.query, "");
    assert!(!state.is_focused());
}

#[test]
fn blur_without_match_just_resets() {
    let mut s = multi();
    type_query(&mut s, "ger");
    let token = match s.input_blur().blur {
        Some(BlurCommand::Schedule { token }) => token,
        other => panic!("expected scheduled blur, got {other:?}"),
    };
    let resp = s.confirm_blur(token);
    assert!(resp.confirmed.is_none());
    assert_eq!(s.state().selected_options.len(), 1);
    assert_eq!(s.state().query, "");
}
