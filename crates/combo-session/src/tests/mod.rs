mod basic;
mod lookup_order;
mod multi;
mod pointer;
mod simulator;

use super::types::{Response, SessionConfig, Templates};
use super::AutocompleteSession;

pub(super) const COUNTRIES: [&str; 3] = ["France", "Germany", "United Kingdom"];

/// Case-insensitive substring filter over `COUNTRIES`.
pub(super) fn filter(query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    COUNTRIES
        .iter()
        .filter(|c| c.to_lowercase().contains(&needle))
        .map(|c| c.to_string())
        .collect()
}

pub(super) fn config(edit: impl FnOnce(&mut SessionConfig)) -> SessionConfig {
    let mut config = SessionConfig::default();
    edit(&mut config);
    config
}

pub(super) fn session_with(config: SessionConfig) -> AutocompleteSession<String> {
    AutocompleteSession::new(config, Templates::plain())
}

pub(super) fn session() -> AutocompleteSession<String> {
    session_with(SessionConfig::default())
}

/// Complete the response's lookup, if any, synchronously against `filter`.
pub(super) fn resolve(
    session: &mut AutocompleteSession<String>,
    resp: &Response<String>,
) -> Option<Response<String>> {
    let req = resp.lookup.as_ref()?;
    session.receive_options(req.ticket, filter(&req.query))
}

/// Focus the input and set its value, resolving the lookup.
pub(super) fn type_query(session: &mut AutocompleteSession<String>, query: &str) -> Response<String> {
    if !session.state().input_focused {
        session.input_focus();
    }
    let resp = session.input_changed(query);
    resolve(session, &resp);
    resp
}
